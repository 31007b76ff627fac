//! Normalized viewer commands and the keys that produce them.
//!
//! The viewer reads one command per line. Single keys follow the usual
//! vi-style bindings; `/text` searches and `n`/`N` step through the hits;
//! `pan` and `resize` take numbers.

use crate::import::{read_json, LoadError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A command the viewer understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Pan { dx: i32, dy: i32 },
    Recenter,
    Search(String),
    /// Select the next hit of the last search.
    NextMatch,
    /// Select the previous hit of the last search.
    PrevMatch,
    Resize { width: i32, height: i32 },
    Quit,
}

/// Camera movement per key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanStep {
    pub x: i32,
    pub y: i32,
}

/// Viewer settings, loadable from a JSON file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewerConfig {
    /// Step for `h`/`j`/`k`/`l`.
    pub pan_step: PanStep,
    /// Step for `H`/`J`/`K`/`L`.
    pub pan_jump: PanStep,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            pan_step: PanStep { x: 5, y: 2 },
            pan_jump: PanStep { x: 25, y: 8 },
        }
    }
}

impl ViewerConfig {
    /// Loads the config at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        path.map_or_else(|| Ok(Self::default()), read_json)
    }

    /// Parses one input line. Blank or unrecognized lines yield `None`.
    pub fn parse(&self, line: &str) -> Option<Command> {
        let line = line.trim();

        if let Some(query) = line.strip_prefix('/') {
            return Some(Command::Search(query.trim().to_string()));
        }

        let mut words = line.split_whitespace();
        match words.next()? {
            "pan" => {
                let dx = words.next()?.parse().ok()?;
                let dy = words.next()?.parse().ok()?;
                Some(Command::Pan { dx, dy })
            }
            "resize" => {
                let width = words.next()?.parse().ok()?;
                let height = words.next()?.parse().ok()?;
                Some(Command::Resize { width, height })
            }
            key => self.key(key),
        }
    }

    fn key(&self, key: &str) -> Option<Command> {
        let (step, jump) = (self.pan_step, self.pan_jump);
        let pan = |dx, dy| Some(Command::Pan { dx, dy });

        match key {
            "h" | "left" => pan(step.x.saturating_neg(), 0),
            "l" | "right" => pan(step.x, 0),
            "k" | "up" => pan(0, step.y.saturating_neg()),
            "j" | "down" => pan(0, step.y),
            "H" => pan(jump.x.saturating_neg(), 0),
            "L" => pan(jump.x, 0),
            "K" => pan(0, jump.y.saturating_neg()),
            "J" => pan(0, jump.y),
            "c" => Some(Command::Recenter),
            "n" | "next" => Some(Command::NextMatch),
            "N" | "prev" => Some(Command::PrevMatch),
            "q" | "quit" => Some(Command::Quit),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_keys() {
        let config = ViewerConfig::default();
        assert_eq!(config.parse("h"), Some(Command::Pan { dx: -5, dy: 0 }));
        assert_eq!(config.parse("j"), Some(Command::Pan { dx: 0, dy: 2 }));
        assert_eq!(config.parse("K"), Some(Command::Pan { dx: 0, dy: -8 }));
        assert_eq!(config.parse("L"), Some(Command::Pan { dx: 25, dy: 0 }));
        assert_eq!(config.parse(" c "), Some(Command::Recenter));
        assert_eq!(config.parse("q"), Some(Command::Quit));
        assert_eq!(config.parse("n"), Some(Command::NextMatch));
        assert_eq!(config.parse("N"), Some(Command::PrevMatch));
    }

    #[test]
    fn test_search_and_arguments() {
        let config = ViewerConfig::default();
        assert_eq!(
            config.parse("/ L2 - RR "),
            Some(Command::Search("L2 - RR".into()))
        );
        assert_eq!(config.parse("pan 3 -2"), Some(Command::Pan { dx: 3, dy: -2 }));
        assert_eq!(
            config.parse("resize 100 30"),
            Some(Command::Resize {
                width: 100,
                height: 30
            })
        );
    }

    #[test]
    fn test_rejects_junk() {
        let config = ViewerConfig::default();
        assert_eq!(config.parse(""), None);
        assert_eq!(config.parse("pan x 2"), None);
        assert_eq!(config.parse("resize 10"), None);
        assert_eq!(config.parse("zoom"), None);
    }

    #[test]
    fn test_config_overrides_steps() {
        let config: ViewerConfig = serde_json::from_str(r#"{"panStep": {"x": 1, "y": 1}}"#).unwrap();
        assert_eq!(config.parse("l"), Some(Command::Pan { dx: 1, dy: 0 }));
        assert_eq!(config.parse("J"), Some(Command::Pan { dx: 0, dy: 8 }));
    }
}
