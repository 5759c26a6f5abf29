//! TUI application state and event handling.
//!
//! The interactive session has two screens:
//!
//! - **Results**: a keyword box over the whole collection. The search engine
//!   reruns on every keystroke (a full linear scan; results are replaced
//!   wholesale, so a stale scan can never leak into a newer query) and the
//!   matches render as cards with match-location badges.
//! - **Viewer**: one conversation with an in-document find box. The
//!   [`HighlightNavigator`] owns occurrence counting and the current-match
//!   index; the renderer scrolls the current match into view.
//!
//! The `App` struct owns all state and runs the event loop via `run()`.
//! Rendering only happens when state changed (dirty flag) or every 100ms to
//! absorb terminal resizes.

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, Mode, poll_event};
use super::rendering::{RenderState, render_results, render_viewer};
use crate::clipboard::copy_to_clipboard;
use crate::models::{Conversation, SearchResult};
use crate::search::engine::search;
use crate::search::highlight::HighlightNavigator;

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Input length cap for both the keyword box and the find box
const MAX_INPUT_LEN: usize = 256;

/// Type of status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

/// State of the opened conversation screen
pub struct ViewerState {
    pub conversation: Conversation,
    pub navigator: HighlightNavigator,
    pub term: String,
    /// Vertical scroll offset into the rendered transcript
    pub scroll: u16,
    /// When set, the next render scrolls the current match into view
    pub follow_current: bool,
}

impl ViewerState {
    fn new(conversation: Conversation) -> Self {
        let navigator = HighlightNavigator::new(&conversation);
        Self { conversation, navigator, term: String::new(), scroll: 0, follow_current: false }
    }
}

pub struct App {
    conversations: Vec<Conversation>,
    query: String,
    deep: bool,
    results: Vec<SearchResult>,
    /// Distinguishes "no search yet" from "searched, zero matches"
    has_searched: bool,
    selected_idx: usize,
    viewer: Option<ViewerState>,
    status_message: Option<StatusMessage>,
    should_quit: bool,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(conversations: Vec<Conversation>) -> Self {
        Self {
            conversations,
            query: String::new(),
            deep: false,
            results: Vec::new(),
            has_searched: false,
            selected_idx: 0,
            viewer: None,
            status_message: None,
            should_quit: false,
            needs_redraw: true, // Initial draw needed
            last_draw_time: Instant::now(),
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            // Clear expired status messages (marks dirty if cleared)
            let had_status = self.status_message.is_some();
            self.check_and_clear_expired_status();
            if had_status && self.status_message.is_none() {
                self.needs_redraw = true;
            }

            // Draw if dirty or if it's been >100ms (for terminal resize handling)
            let now = Instant::now();
            let elapsed = now.duration_since(self.last_draw_time);
            if self.needs_redraw || elapsed >= Duration::from_millis(100) {
                terminal.draw(|frame| {
                    if let Some(viewer) = self.viewer.as_mut() {
                        render_viewer(frame, viewer, self.status_message.as_ref());
                    } else {
                        let state = RenderState {
                            query: &self.query,
                            deep: self.deep,
                            has_searched: self.has_searched,
                            total_conversations: self.conversations.len(),
                            status_message: self.status_message.as_ref(),
                        };
                        render_results(frame, &self.results, self.selected_idx, &state);
                    }
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100), self.mode())?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn mode(&self) -> Mode {
        if self.viewer.is_some() { Mode::Viewer } else { Mode::Results }
    }

    /// Dispatch a user action to the active screen (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        if action == Action::None {
            return;
        }
        if action == Action::Quit {
            self.should_quit = true;
            return;
        }

        if self.viewer.is_some() {
            self.handle_viewer_action(action);
        } else {
            self.handle_results_action(action);
        }
    }

    fn handle_results_action(&mut self, action: Action) {
        match action {
            Action::ClearInput => {
                if self.query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.query.clear();
                    self.run_search();
                }
            }
            Action::MoveUp => self.move_selection(-1),
            Action::MoveDown => self.move_selection(1),
            Action::PageUp => self.move_selection(-10),
            Action::PageDown => self.move_selection(10),
            Action::ToggleDeep => {
                self.deep = !self.deep;
                self.run_search();
            }
            Action::Open => self.open_selected(),
            Action::UpdateInput(c) => {
                if self.query.len() < MAX_INPUT_LEN {
                    self.query.push(c);
                    self.run_search();
                }
            }
            Action::DeleteChar => {
                if self.query.pop().is_some() {
                    self.run_search();
                }
            }
            Action::CopyToClipboard => self.copy_selected_transcript(),
            Action::Quit | Action::NextMatch | Action::PrevMatch | Action::None => {}
        }
    }

    fn handle_viewer_action(&mut self, action: Action) {
        let Some(viewer) = self.viewer.as_mut() else { return };

        match action {
            Action::ClearInput => {
                if viewer.term.is_empty() {
                    // Back to the result list
                    self.viewer = None;
                } else {
                    viewer.term.clear();
                    viewer.navigator.set_term("");
                    viewer.follow_current = false;
                }
            }
            Action::UpdateInput(c) => {
                if viewer.term.len() < MAX_INPUT_LEN {
                    viewer.term.push(c);
                    viewer.navigator.set_term(&viewer.term);
                    viewer.follow_current = true;
                }
            }
            Action::DeleteChar => {
                if viewer.term.pop().is_some() {
                    viewer.navigator.set_term(&viewer.term);
                    viewer.follow_current = true;
                }
            }
            Action::NextMatch => {
                if viewer.navigator.next().is_some() {
                    viewer.follow_current = true;
                }
            }
            Action::PrevMatch => {
                if viewer.navigator.previous().is_some() {
                    viewer.follow_current = true;
                }
            }
            Action::MoveUp => {
                viewer.scroll = viewer.scroll.saturating_sub(1);
                viewer.follow_current = false;
            }
            Action::MoveDown => {
                viewer.scroll = viewer.scroll.saturating_add(1);
                viewer.follow_current = false;
            }
            Action::PageUp => {
                viewer.scroll = viewer.scroll.saturating_sub(10);
                viewer.follow_current = false;
            }
            Action::PageDown => {
                viewer.scroll = viewer.scroll.saturating_add(10);
                viewer.follow_current = false;
            }
            Action::CopyToClipboard => {
                let transcript = viewer.conversation.transcript();
                self.copy_text(&transcript);
            }
            Action::Open | Action::ToggleDeep | Action::Quit | Action::None => {}
        }
        self.needs_redraw = true;
    }

    /// Rerun the collection search for the current query.
    ///
    /// An empty query means "no search performed", which renders differently
    /// from a search with zero matches.
    fn run_search(&mut self) {
        let keyword = self.query.trim();
        if keyword.is_empty() {
            self.results.clear();
            self.has_searched = false;
        } else {
            self.results = search(&self.conversations, keyword, self.deep);
            self.has_searched = true;
        }
        self.selected_idx = 0;
        self.needs_redraw = true;
    }

    fn move_selection(&mut self, delta: isize) {
        let total = self.results.len();
        if total == 0 {
            self.selected_idx = 0;
            return;
        }

        let old_idx = self.selected_idx;
        let new_idx = (self.selected_idx as isize + delta).max(0) as usize;
        self.selected_idx = new_idx.min(total - 1);

        if old_idx != self.selected_idx {
            self.needs_redraw = true;
        }
    }

    /// Open the selected result in the viewer
    fn open_selected(&mut self) {
        let Some(result) = self.results.get(self.selected_idx) else { return };

        match self.conversations.iter().find(|c| c.uuid == result.uuid) {
            Some(conversation) => {
                self.viewer = Some(ViewerState::new(conversation.clone()));
                self.needs_redraw = true;
            }
            None => {
                // Result refers to a conversation that is gone; should not
                // happen while the collection is immutable, but don't crash.
                self.set_status(
                    "✗ Conversation no longer in collection",
                    MessageType::Error,
                    STATUS_ERROR_DURATION_MS,
                );
            }
        }
    }

    fn copy_selected_transcript(&mut self) {
        let Some(result) = self.results.get(self.selected_idx) else {
            self.set_status("✗ No result selected", MessageType::Error, STATUS_ERROR_DURATION_MS);
            return;
        };

        let transcript = self
            .conversations
            .iter()
            .find(|c| c.uuid == result.uuid)
            .map(|c| c.transcript());
        match transcript {
            Some(text) => self.copy_text(&text),
            None => self.set_status(
                "✗ Conversation no longer in collection",
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    fn copy_text(&mut self, text: &str) {
        match copy_to_clipboard(text) {
            Ok(()) => self.set_status(
                "✓ Copied to clipboard",
                MessageType::Success,
                STATUS_SUCCESS_DURATION_MS,
            ),
            Err(e) => self.set_status(
                format!("✗ Clipboard error: {}", e),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            ),
        }
    }

    /// Set a transient status message with automatic expiry
    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    /// Check and clear expired status messages
    fn check_and_clear_expired_status(&mut self) {
        let should_clear = self
            .status_message
            .as_ref()
            .map(|msg| Instant::now() >= msg.expires_at)
            .unwrap_or(false);
        if should_clear {
            self.status_message = None;
        }
    }
}
