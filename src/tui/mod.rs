// TUI module for interactive search and viewing
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;
mod timestamps;

use anyhow::Result;
pub use app::App;
use terminal::TerminalManager;

use crate::models::Conversation;

/// Run the interactive browser over a loaded collection
pub fn run_interactive(conversations: Vec<Conversation>) -> Result<()> {
    let mut manager = TerminalManager::new()?;

    let mut app = App::new(conversations);
    let res = app.run(manager.terminal_mut());

    manager.restore()?;
    res
}
