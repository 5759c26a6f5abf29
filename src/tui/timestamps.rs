use chrono::{DateTime, Datelike, Utc};

/// Compact timestamp for result cards, tiered by age:
/// - Relative under 7 days: "2h ago", "3d ago"
/// - Absolute otherwise: "Jan 15", "Dec 3, 2024"
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*timestamp);

    if duration.num_days() < 7 {
        format_relative(duration.num_seconds())
    } else {
        format_absolute(timestamp, &now)
    }
}

/// Full timestamp for the viewer header and message headers
pub fn format_full(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %-d, %Y %H:%M").to_string()
}

fn format_relative(seconds: i64) -> String {
    let minutes = seconds / 60;
    let hours = minutes / 60;
    let days = hours / 24;

    if days > 0 {
        format!("{}d ago", days)
    } else if hours > 0 {
        format!("{}h ago", hours)
    } else if minutes > 0 {
        format!("{}m ago", minutes)
    } else {
        "just now".to_string()
    }
}

fn format_absolute(timestamp: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
    if timestamp.year() == now.year() {
        timestamp.format("%b %-d").to_string()
    } else {
        timestamp.format("%b %-d, %Y").to_string()
    }
}
