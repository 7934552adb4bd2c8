//! Line-oriented input mapping for terminal front ends
//!
//! Plain lines replace the query. Lines starting with `:` trigger presenter
//! actions; `::` escapes a literal leading colon.

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Query(String),
    Clear,
    ToggleTheme,
    HighlightNext,
    HighlightPrevious,
    /// Open the given 1-based row, or the highlighted one
    Open(Option<usize>),
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);

        if let Some(literal) = line.strip_prefix("::") {
            return Command::Query(format!(":{literal}"));
        }
        let Some(action) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let mut parts = action.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("clear" | "c"), None) => Command::Clear,
            (Some("theme" | "t"), None) => Command::ToggleTheme,
            (Some("next" | "n"), None) => Command::HighlightNext,
            (Some("prev" | "p"), None) => Command::HighlightPrevious,
            (Some("open" | "o"), None) => Command::Open(None),
            (Some("open" | "o"), Some(row)) => match row.parse::<usize>() {
                Ok(row) if row > 0 => Command::Open(Some(row)),
                _ => Command::Unknown(line.to_string()),
            },
            (Some("help" | "h"), None) => Command::Help,
            (Some("quit" | "q"), None) => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }

    /// Usage text for `:help`
    #[must_use]
    pub fn usage() -> &'static str {
        "type to search; :clear, :theme, :next, :prev, :open [row], :help, :quit (:: for a literal ':')"
    }
}
