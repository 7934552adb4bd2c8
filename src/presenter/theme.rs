//! Display theme

use serde::{Deserialize, Serialize};
use std::fmt;

/// Root attribute the active theme is mirrored to
pub const THEME_ATTRIBUTE: &str = "data-theme";

/// Two-state display theme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    /// Gradient accent look; the default
    #[default]
    Accent,
}

impl Theme {
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Accent,
            Theme::Accent => Theme::Light,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Accent => "accent",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
