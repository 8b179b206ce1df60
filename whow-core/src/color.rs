//! Named colors a category can be displayed in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::WhowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
}

impl Color {
    pub const ALL: [Color; 8] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::White,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Yellow => "yellow",
            Color::Blue => "blue",
            Color::Magenta => "magenta",
            Color::Cyan => "cyan",
            Color::White => "white",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Color {
    type Err = WhowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Color::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| {
                let available: Vec<_> = Color::ALL.iter().map(|c| c.name()).collect();
                WhowError::InvalidInput(format!(
                    "Unknown color '{}'. Available: {}",
                    s,
                    available.join(", ")
                ))
            })
    }
}

impl TryFrom<String> for Color {
    type Error = WhowError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_case_insensitively() {
        assert_eq!("Red".parse::<Color>().unwrap(), Color::Red);
        assert_eq!(" MAGENTA ".parse::<Color>().unwrap(), Color::Magenta);
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn deserializes_capitalized_names() {
        #[derive(Deserialize)]
        struct Wrapper {
            color: Color,
        }

        let w: Wrapper = toml::from_str("color = \"Blue\"").unwrap();
        assert_eq!(w.color, Color::Blue);
    }
}
