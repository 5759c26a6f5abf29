use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage, ViewerState};
use super::layout::{ResultsLayout, ViewerLayout};
use super::timestamps::{format_full, format_timestamp};
use crate::models::{MatchLocation, SearchResult, Sender};
use crate::search::highlight::highlight_spans;

/// Screen-level state the results renderer needs
pub struct RenderState<'a> {
    pub query: &'a str,
    pub deep: bool,
    pub has_searched: bool,
    pub total_conversations: usize,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the results screen: search box, card list, preview, status bar
pub fn render_results(
    frame: &mut Frame,
    results: &[SearchResult],
    selected_idx: usize,
    state: &RenderState,
) {
    let layout = ResultsLayout::new(frame.area());

    render_search_box(frame, layout.search_area, state);
    render_result_list(frame, layout.results_area, results, selected_idx, state);
    render_result_preview(frame, layout.preview_area, results.get(selected_idx));
    render_results_status_bar(frame, layout.status_area, results.len(), selected_idx, state);
}

fn render_search_box(frame: &mut Frame, area: Rect, state: &RenderState) {
    let mut spans = vec![
        Span::styled("❯ ", Style::default().fg(Color::Rgb(16, 185, 129))),
        Span::styled(
            state.query.to_string(),
            Style::default().fg(Color::Rgb(250, 250, 250)),
        ),
    ];
    if state.deep {
        spans.push(Span::styled(
            "  [deep]",
            Style::default().fg(Color::Rgb(168, 85, 247)).add_modifier(Modifier::BOLD),
        ));
    }

    let title = format!(" Search {} conversations ", state.total_conversations);
    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
            .title(title),
    );

    frame.render_widget(paragraph, area);
}

fn badge_color(location: MatchLocation) -> Color {
    match location {
        MatchLocation::Title => Color::Rgb(59, 130, 246),
        MatchLocation::Summary => Color::Rgb(16, 185, 129),
        MatchLocation::Message => Color::Rgb(234, 179, 8),
        MatchLocation::Content => Color::Rgb(168, 85, 247),
    }
}

fn render_result_list(
    frame: &mut Frame,
    area: Rect,
    results: &[SearchResult],
    selected_idx: usize,
    state: &RenderState,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
        .title(" Results ");

    // Distinct empty states: nothing searched yet vs zero matches
    if results.is_empty() {
        let text = if state.has_searched {
            "No conversations found\n\nTry different keywords or deep search (Ctrl+D)"
        } else {
            "Start searching\n\nType keywords to search titles, summaries and messages"
        };
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(Color::Rgb(113, 113, 122)))
            .block(block)
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            let title = result
                .name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or("(untitled)")
                .to_string();

            let mut title_spans = vec![
                Span::styled(
                    title,
                    Style::default()
                        .fg(Color::Rgb(250, 250, 250))
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw(" "),
            ];
            for location in &result.match_locations {
                title_spans.push(Span::styled(
                    format!("[{}]", location.label()),
                    Style::default().fg(badge_color(*location)),
                ));
            }

            let meta = format!(
                "  {} messages · {} · updated {}",
                result.message_count,
                format_timestamp(&result.created_at),
                format_timestamp(&result.updated_at),
            );
            let meta_line =
                Line::from(Span::styled(meta, Style::default().fg(Color::Rgb(113, 113, 122))));

            let item = ListItem::new(Text::from(vec![Line::from(title_spans), meta_line]));
            if idx == selected_idx {
                item.style(Style::default().bg(Color::Rgb(39, 39, 42)))
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_result_preview(frame: &mut Frame, area: Rect, result: Option<&SearchResult>) {
    let muted = Style::default().fg(Color::Rgb(113, 113, 122));

    let content = if let Some(result) = result {
        let mut lines = vec![
            Line::from(Span::styled(
                result
                    .name
                    .as_deref()
                    .filter(|n| !n.is_empty())
                    .unwrap_or("(untitled)")
                    .to_string(),
                Style::default().fg(Color::Rgb(250, 250, 250)).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![Span::styled("Uuid: ", muted), Span::raw(result.uuid.clone())]),
            Line::from(vec![
                Span::styled("Created: ", muted),
                Span::raw(format_full(&result.created_at)),
            ]),
            Line::from(vec![
                Span::styled("Updated: ", muted),
                Span::raw(format_full(&result.updated_at)),
            ]),
            Line::from(vec![
                Span::styled("Messages: ", muted),
                Span::raw(result.message_count.to_string()),
            ]),
        ];

        let badges: Vec<Span> = result
            .match_locations
            .iter()
            .map(|l| Span::styled(format!("[{}] ", l.label()), Style::default().fg(badge_color(*l))))
            .collect();
        lines.push(Line::from(
            std::iter::once(Span::styled("Matched: ", muted)).chain(badges).collect::<Vec<_>>(),
        ));

        if !result.summary.is_empty() {
            lines.push(Line::from(""));
            for line in result.summary.lines() {
                lines.push(Line::from(line.to_string()));
            }
        }

        Text::from(lines)
    } else {
        Text::from("No result selected")
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
                .title(" Preview "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn render_results_status_bar(
    frame: &mut Frame,
    area: Rect,
    result_count: usize,
    selected_idx: usize,
    state: &RenderState,
) {
    if let Some(msg) = state.status_message {
        render_status_message(frame, area, msg);
        return;
    }

    let mut parts = vec![if state.deep { "[DEEP]".to_string() } else { "[SHALLOW]".to_string() }];

    if state.has_searched {
        parts.push(format!("{} of {} match", result_count, state.total_conversations));
        if result_count > 0 {
            parts.push(format!("result {}/{}", selected_idx + 1, result_count));
        }
    } else {
        parts.push(format!("{} conversations", state.total_conversations));
    }

    parts.push("Ctrl+D: deep".to_string());
    parts.push("Enter: open".to_string());
    parts.push("Ctrl+Y: copy".to_string());
    parts.push("Esc: clear".to_string());
    parts.push("Ctrl+C: quit".to_string());

    let paragraph = Paragraph::new(format!(" {} ", parts.join(" | ")))
        .style(Style::default().fg(Color::Rgb(250, 250, 250)).bg(Color::Rgb(24, 24, 27)));
    frame.render_widget(paragraph, area);
}

fn render_status_message(frame: &mut Frame, area: Rect, msg: &StatusMessage) {
    let fg = match msg.message_type {
        MessageType::Success => Color::Rgb(16, 185, 129),
        MessageType::Error => Color::Rgb(239, 68, 68),
    };
    let paragraph = Paragraph::new(format!(" {} ", msg.text))
        .style(Style::default().fg(fg).bg(Color::Rgb(24, 24, 27)));
    frame.render_widget(paragraph, area);
}

/// Render the single-conversation viewer with in-document highlighting.
///
/// Mutates the viewer's scroll offset: when a match navigation is pending
/// (`follow_current`), the current match is centered in the content area.
pub fn render_viewer(
    frame: &mut Frame,
    viewer: &mut ViewerState,
    status_message: Option<&StatusMessage>,
) {
    let layout = ViewerLayout::new(frame.area());

    render_viewer_header(frame, layout.header_area, viewer);
    render_find_box(frame, layout.search_area, viewer);

    let (lines, occurrence_lines) = build_viewer_body(viewer);

    // Content height inside the borders
    let inner_height = layout.content_area.height.saturating_sub(2);
    let max_scroll = lines.len().saturating_sub(inner_height as usize) as u16;

    if viewer.follow_current
        && let Some(idx) = viewer.navigator.current()
        && let Some(&line) = occurrence_lines.get(idx)
    {
        // Center the current match vertically
        viewer.scroll = (line as u16).saturating_sub(inner_height / 2).min(max_scroll);
        viewer.follow_current = false;
    }
    viewer.scroll = viewer.scroll.min(max_scroll);

    let paragraph = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
                .title(" Conversation "),
        )
        .scroll((viewer.scroll, 0));
    frame.render_widget(paragraph, layout.content_area);

    render_viewer_status_bar(frame, layout.status_area, status_message);
}

fn render_viewer_header(frame: &mut Frame, area: Rect, viewer: &ViewerState) {
    let conversation = &viewer.conversation;
    let lines = vec![
        Line::from(Span::styled(
            conversation.title().to_string(),
            Style::default().fg(Color::Rgb(250, 250, 250)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "{} messages · created {} · updated {}",
                conversation.messages.len(),
                format_full(&conversation.created_at),
                format_full(&conversation.updated_at),
            ),
            Style::default().fg(Color::Rgb(113, 113, 122)),
        )),
    ];
    frame.render_widget(Paragraph::new(Text::from(lines)), area);
}

fn render_find_box(frame: &mut Frame, area: Rect, viewer: &ViewerState) {
    let mut spans = vec![Span::styled("❯ ", Style::default().fg(Color::Rgb(16, 185, 129)))];

    if viewer.term.is_empty() {
        spans.push(Span::styled(
            "type to find in conversation",
            Style::default().fg(Color::Rgb(113, 113, 122)),
        ));
    } else {
        spans.push(Span::styled(
            viewer.term.clone(),
            Style::default().fg(Color::Rgb(250, 250, 250)),
        ));
        let counter = match viewer.navigator.current() {
            Some(current) => format!("  {} / {}", current + 1, viewer.navigator.count()),
            None => "  0 matches".to_string(),
        };
        spans.push(Span::styled(counter, Style::default().fg(Color::Rgb(113, 113, 122))));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
            .title(" Find "),
    );
    frame.render_widget(paragraph, area);
}

fn render_viewer_status_bar(frame: &mut Frame, area: Rect, status_message: Option<&StatusMessage>) {
    if let Some(msg) = status_message {
        render_status_message(frame, area, msg);
        return;
    }

    let hints = " Enter: next match | Ctrl+P: previous | ↑/↓: scroll | Esc: clear/close \
                 | Ctrl+Y: copy | Ctrl+C: quit ";
    let paragraph = Paragraph::new(hints)
        .style(Style::default().fg(Color::Rgb(250, 250, 250)).bg(Color::Rgb(24, 24, 27)));
    frame.render_widget(paragraph, area);
}

/// Build the transcript lines with highlight spans, returning for each match
/// occurrence the line it starts on.
///
/// Field order must mirror `searchable_fields`: summary first, then message
/// bodies in conversation order. That keeps occurrence numbering identical
/// to what the navigator counted.
fn build_viewer_body(viewer: &ViewerState) -> (Vec<Line<'static>>, Vec<usize>) {
    let term = viewer.navigator.term().to_string();
    let current = viewer.navigator.current();
    let conversation = &viewer.conversation;

    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut occurrence_lines: Vec<usize> = Vec::new();
    let mut counter = 0usize;

    if let Some(summary) = conversation.summary.as_deref()
        && !summary.is_empty()
    {
        lines.push(Line::from(Span::styled(
            "Summary",
            Style::default().fg(Color::Rgb(16, 185, 129)).add_modifier(Modifier::BOLD),
        )));
        append_highlighted_text(
            &mut lines,
            &mut occurrence_lines,
            &mut counter,
            summary,
            &term,
            current,
        );
        lines.push(Line::from(""));
    }

    for message in &conversation.messages {
        let (label, color) = match message.sender {
            Sender::Human => ("You", Color::Rgb(59, 130, 246)),
            Sender::Assistant => ("Assistant", Color::Rgb(16, 185, 129)),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} · ", label),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format_full(&message.created_at),
                Style::default().fg(Color::Rgb(113, 113, 122)),
            ),
        ]));
        if let Some(text) = message.text.as_deref() {
            append_highlighted_text(
                &mut lines,
                &mut occurrence_lines,
                &mut counter,
                text,
                &term,
                current,
            );
        }
        lines.push(Line::from(""));
    }

    (lines, occurrence_lines)
}

/// Append one text field as lines, splitting on term occurrences. The span
/// at the current occurrence index gets the emphasized style.
fn append_highlighted_text(
    lines: &mut Vec<Line<'static>>,
    occurrence_lines: &mut Vec<usize>,
    counter: &mut usize,
    text: &str,
    term: &str,
    current: Option<usize>,
) {
    let base = Style::default().fg(Color::Rgb(212, 212, 216));
    let matched = Style::default().fg(Color::Rgb(24, 24, 27)).bg(Color::Rgb(234, 179, 8));
    let emphasized = Style::default()
        .fg(Color::Rgb(250, 250, 250))
        .bg(Color::Rgb(249, 115, 22))
        .add_modifier(Modifier::BOLD);

    let mut spans: Vec<Span<'static>> = Vec::new();
    for piece in highlight_spans(text, term) {
        if piece.is_match {
            let style = if current == Some(*counter) { emphasized } else { matched };
            occurrence_lines.push(lines.len());
            spans.push(Span::styled(piece.text, style));
            *counter += 1;
        } else {
            // Literal pieces can span multiple lines
            let mut parts = piece.text.split('\n');
            if let Some(first) = parts.next()
                && !first.is_empty()
            {
                spans.push(Span::styled(first.to_string(), base));
            }
            for part in parts {
                lines.push(Line::from(std::mem::take(&mut spans)));
                if !part.is_empty() {
                    spans.push(Span::styled(part.to_string(), base));
                }
            }
        }
    }
    lines.push(Line::from(spans));
}
