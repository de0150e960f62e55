use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::storage::{self, Session};
use crate::surface::TextSurface;

use super::input;
use super::model::Model;
use super::update::update;
use super::App;

/// How long to wait for an event before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization, the initial file load,
    /// or the event loop encounters an I/O failure.
    pub fn run(&self) -> Result<()> {
        let (surface, session, notice) = self.load_initial()?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - scriv requires an interactive terminal")?;
        let size = terminal.size()?;

        let mut model = Model::new(surface, session, size.height.saturating_sub(1).max(1));
        if let Some(notice) = notice {
            model.set_status(notice);
        }

        let result = event_loop(&mut terminal, &mut model);
        ratatui::restore();
        result
    }

    /// Load the startup document, if a path was given.
    ///
    /// A path that does not exist yet opens an empty buffer bound to that
    /// path, the way editors create files on first save.
    fn load_initial(&self) -> Result<(TextSurface, Session, Option<String>)> {
        let Some(path) = &self.file else {
            let session = Session::untitled().force_plain(self.force_plain);
            return Ok((TextSurface::empty(), session, None));
        };

        let session = Session::with_path(path.clone()).force_plain(self.force_plain);
        if !path.exists() {
            let notice = format!("New file: {}", path.display());
            return Ok((TextSurface::empty(), session, Some(notice)));
        }

        let loaded = storage::load_document(path, session.format())
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let notice = loaded
            .fell_back_to_plain
            .then(|| "Could not parse RTF; loaded as plain text".to_string());
        Ok((loaded.surface, session, notice))
    }
}

fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<()> {
    while !model.should_quit {
        terminal.draw(|frame| crate::ui::render(frame, model))?;

        if event::poll(POLL_INTERVAL)? {
            let ev = event::read()?;
            if let Some(message) = input::handle_event(&ev, model) {
                update(model, message);
            }
        }
    }
    Ok(())
}
