//! Render tree built from a state snapshot
//!
//! `render` is a pure function of `SearchState`, the theme and the current
//! instant; the presenter never keeps rendered output around.

use std::fmt;
use tokio::time::Instant;

use super::theme::Theme;
use crate::controller::SearchState;

/// Content of the clear button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearButton {
    /// Plain "Clear" label
    Label,
    /// Busy indicator while there is a query or resolved links
    Busy,
}

/// One row of the result list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedItem {
    pub index: usize,
    pub title: String,
    /// Opened externally on activation; `None` until resolved
    pub link: Option<String>,
    pub highlighted: bool,
}

/// Everything a view needs to draw one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedView {
    pub theme: Theme,
    pub query: String,
    pub clear_button: ClearButton,
    pub items: Vec<RenderedItem>,
    pub notification: Option<String>,
}

impl RenderedView {
    /// Highlighted row, or `-1` when none is highlighted
    #[must_use]
    pub fn highlight_index(&self) -> i64 {
        self.items
            .iter()
            .position(|item| item.highlighted)
            .and_then(|index| i64::try_from(index).ok())
            .unwrap_or(-1)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Build the render tree for `state`
#[must_use]
pub fn render(state: &SearchState, theme: Theme, now: Instant) -> RenderedView {
    let items = state
        .entries()
        .enumerate()
        .map(|(index, (result, link))| RenderedItem {
            index,
            title: result.title.clone(),
            link: link.map(str::to_string),
            highlighted: state.highlight() == Some(index),
        })
        .collect();

    let clear_button = if !state.query().is_empty() || state.links().iter().any(Option::is_some) {
        ClearButton::Busy
    } else {
        ClearButton::Label
    };

    let notification = state
        .notification()
        .filter(|notification| !notification.is_expired(now))
        .map(|notification| notification.message.clone());

    RenderedView {
        theme,
        query: state.query().to_string(),
        clear_button,
        items,
        notification,
    }
}

impl fmt::Display for RenderedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let button = match self.clear_button {
            ClearButton::Label => "Clear",
            ClearButton::Busy => "...",
        };
        writeln!(f, "[{}] search: {} ({button})", self.theme, self.query)?;

        for item in &self.items {
            let marker = if item.highlighted { '>' } else { ' ' };
            match &item.link {
                Some(link) => writeln!(f, "{marker} {}. {}  {link}", item.index + 1, item.title)?,
                None => writeln!(f, "{marker} {}. {}", item.index + 1, item.title)?,
            }
        }

        if let Some(message) = &self.notification {
            writeln!(f, "! {message}")?;
        }
        Ok(())
    }
}
