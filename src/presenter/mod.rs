//! Result presenter
//!
//! Renders controller state and exposes the user-facing actions: clear,
//! theme toggle, highlight movement and link activation. The presenter owns
//! only the theme; everything else is read from the injected
//! `ControllerHandle` at render time.

mod command;
mod opener;
mod theme;
mod view;

pub use command::Command;
pub use opener::{ExternalOpener, SystemOpener};
pub use theme::{THEME_ATTRIBUTE, Theme};
pub use view::{ClearButton, RenderedItem, RenderedView, render};

use tokio::time::Instant;
use tracing::info;
use url::Url;

use crate::controller::ControllerHandle;
use crate::error::LookupResult;

pub struct ResultPresenter {
    controller: ControllerHandle,
    theme: Theme,
    opener: Box<dyn ExternalOpener>,
}

impl ResultPresenter {
    #[must_use]
    pub fn new(controller: ControllerHandle) -> Self {
        Self {
            controller,
            theme: Theme::default(),
            opener: Box::new(SystemOpener),
        }
    }

    #[must_use]
    pub fn with_opener(mut self, opener: impl ExternalOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    #[must_use]
    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// `(name, value)` of the root display attribute for the active theme
    #[must_use]
    pub fn root_attribute(&self) -> (&'static str, &'static str) {
        (THEME_ATTRIBUTE, self.theme.as_str())
    }

    /// Flip the theme; query state is untouched
    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        info!(theme = %self.theme, "theme changed");
        self.theme
    }

    /// Reset query, results, links and highlight, and abandon the running cycle
    pub fn clear(&self) {
        self.controller.clear();
    }

    /// Highlight a row; out-of-range rows clear the highlight
    pub fn highlight(&self, index: Option<usize>) -> Option<usize> {
        self.controller.store().set_highlight(index)
    }

    /// Move down one row, stopping at the last
    pub fn highlight_next(&self) -> Option<usize> {
        let state = self.controller.store().snapshot();
        let len = state.results().len();
        if len == 0 {
            return None;
        }
        let next = match state.highlight() {
            None => 0,
            Some(index) => (index + 1).min(len - 1),
        };
        self.highlight(Some(next))
    }

    /// Move up one row; moving up from the first row clears the highlight
    pub fn highlight_previous(&self) -> Option<usize> {
        let state = self.controller.store().snapshot();
        let len = state.results().len();
        let previous = match state.highlight() {
            None if len > 0 => Some(len - 1),
            None | Some(0) => None,
            Some(index) => Some(index - 1),
        };
        self.highlight(previous)
    }

    /// Open the link of row `index` externally
    ///
    /// Returns the opened link, or `None` when the row does not exist or its
    /// link has not been resolved.
    ///
    /// # Errors
    ///
    /// Returns an error if the link is not a valid URL or the opener fails.
    pub fn activate(&self, index: usize) -> LookupResult<Option<String>> {
        let state = self.controller.store().snapshot();
        let Some(link) = state.link(index) else {
            return Ok(None);
        };

        // Validated only; the opener gets the link exactly as rendered.
        Url::parse(link)?;
        self.opener.open(link)?;
        info!(index, link, "opened recipe link");
        Ok(Some(link.to_string()))
    }

    /// Open the highlighted row, if any
    ///
    /// # Errors
    ///
    /// Same as [`ResultPresenter::activate`].
    pub fn activate_highlighted(&self) -> LookupResult<Option<String>> {
        match self.controller.store().snapshot().highlight() {
            Some(index) => self.activate(index),
            None => Ok(None),
        }
    }

    #[must_use]
    pub fn render(&self) -> RenderedView {
        render(&self.controller.store().snapshot(), self.theme, Instant::now())
    }
}
