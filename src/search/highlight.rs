//! In-conversation match highlighting and navigation.
//!
//! The navigator tracks a "current" occurrence of a search term within one
//! displayed conversation so the viewer can step through matches with
//! wraparound and scroll the current one into view. Occurrences are numbered
//! in document order: summary first, then message bodies top to bottom, left
//! to right within a field.
//!
//! Counting is done per field and summed, with [`highlight_spans`] producing
//! the exact same occurrences for the renderer - index `k` in the navigator
//! is always the `k`-th match span the renderer emits, so the two can never
//! drift apart. A consequence worth knowing: a term can never match across a
//! field boundary.
//!
//! State machine: empty term is Idle (`count = 0`, no current match); a term
//! with no occurrences is NoMatches; a term with occurrences is Active with
//! `current` in `0..count`, where `next`/`previous` cycle.

use crate::models::Conversation;

/// Snapshot of the navigator after a term change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchState {
    /// Non-overlapping case-insensitive occurrences across the document
    pub count: usize,
    /// Zero-based index of the current occurrence; `None` when there is no
    /// term or no match
    pub current: Option<usize>,
}

/// One segment of a text field, split on term occurrences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightSpan {
    pub text: String,
    pub is_match: bool,
}

/// Caller-held navigation state for one displayed conversation
#[derive(Debug, Clone)]
pub struct HighlightNavigator {
    fields: Vec<String>,
    term: String,
    count: usize,
    current: Option<usize>,
}

impl HighlightNavigator {
    pub fn new(conversation: &Conversation) -> Self {
        Self::from_fields(searchable_fields(conversation))
    }

    /// Build a navigator over raw text fields in document order
    pub fn from_fields(fields: Vec<String>) -> Self {
        Self { fields, term: String::new(), count: 0, current: None }
    }

    /// Set (or clear) the search term and recount occurrences.
    ///
    /// A non-empty term with matches resets the current occurrence to the
    /// first one; an empty term or zero matches clears it.
    pub fn set_term(&mut self, term: &str) -> MatchState {
        self.term = term.to_string();
        if self.term.is_empty() {
            self.count = 0;
            self.current = None;
        } else {
            self.count =
                self.fields.iter().map(|field| match_ranges(field, &self.term).len()).sum();
            self.current = if self.count > 0 { Some(0) } else { None };
        }
        self.state()
    }

    /// Advance to the next occurrence with wraparound; no-op without matches
    pub fn next(&mut self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let next = match self.current {
            Some(current) => (current + 1) % self.count,
            None => 0,
        };
        self.current = Some(next);
        self.current
    }

    /// Step back to the previous occurrence with wraparound; no-op without matches
    pub fn previous(&mut self) -> Option<usize> {
        if self.count == 0 {
            return None;
        }
        let previous = match self.current {
            Some(0) | None => self.count - 1,
            Some(current) => current - 1,
        };
        self.current = Some(previous);
        self.current
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current(&self) -> Option<usize> {
        self.current
    }

    pub fn state(&self) -> MatchState {
        MatchState { count: self.count, current: self.current }
    }
}

/// The searchable texts of a conversation in document order: summary first,
/// then every message body. Must stay aligned with the order the viewer
/// renders fields in.
pub fn searchable_fields(conversation: &Conversation) -> Vec<String> {
    let mut fields = Vec::with_capacity(conversation.messages.len() + 1);
    if let Some(summary) = conversation.summary.as_deref()
        && !summary.is_empty()
    {
        fields.push(summary.to_string());
    }
    for message in &conversation.messages {
        if let Some(text) = message.text.as_deref() {
            fields.push(text.to_string());
        }
    }
    fields
}

/// Split one text field into literal/match spans using the term as a
/// case-insensitive delimiter. Concatenating the span texts reproduces the
/// input; match spans appear in left-to-right order.
pub fn highlight_spans(text: &str, term: &str) -> Vec<HighlightSpan> {
    let ranges = match_ranges(text, term);
    if ranges.is_empty() {
        if text.is_empty() {
            return Vec::new();
        }
        return vec![HighlightSpan { text: text.to_string(), is_match: false }];
    }

    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut cursor = 0;
    for (start, end) in ranges {
        if start > cursor {
            spans.push(HighlightSpan {
                text: chars[cursor..start].iter().collect(),
                is_match: false,
            });
        }
        spans.push(HighlightSpan { text: chars[start..end].iter().collect(), is_match: true });
        cursor = end;
    }
    if cursor < chars.len() {
        spans.push(HighlightSpan { text: chars[cursor..].iter().collect(), is_match: false });
    }
    spans
}

/// Char-index ranges of non-overlapping case-insensitive occurrences of
/// `term` within `text`, left to right.
///
/// Case folding is done per char so ranges always line up with the original
/// text, which keeps span slicing safe for multi-byte input.
fn match_ranges(text: &str, term: &str) -> Vec<(usize, usize)> {
    if term.is_empty() || text.is_empty() {
        return Vec::new();
    }

    let haystack: Vec<char> = text.chars().map(fold_char).collect();
    let needle: Vec<char> = term.chars().map(fold_char).collect();
    if needle.len() > haystack.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
