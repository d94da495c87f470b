//! Screen corners the widget can dock to

use serde::{Deserialize, Serialize};
use std::fmt;

/// Docking corner, in cycling order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    #[default]
    BottomLeft,
    TopLeft,
    TopRight,
    BottomRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::BottomLeft,
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
    ];

    pub fn index(self) -> usize {
        match self {
            Corner::BottomLeft => 0,
            Corner::TopLeft => 1,
            Corner::TopRight => 2,
            Corner::BottomRight => 3,
        }
    }

    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Next corner, wrapping after `BottomRight`
    pub fn next(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// Only left corners leave room for the bar to the right
    pub fn allows_expansion(self) -> bool {
        matches!(self, Corner::BottomLeft | Corner::TopLeft)
    }

    pub fn is_top(self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    /// Glyph drawn inside the square
    pub fn indicator(self) -> &'static str {
        match self {
            Corner::BottomLeft => "◣",
            Corner::TopLeft => "◤",
            Corner::TopRight => "◥",
            Corner::BottomRight => "◢",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Corner::BottomLeft => "bottom_left",
            Corner::TopLeft => "top_left",
            Corner::TopRight => "top_right",
            Corner::BottomRight => "bottom_right",
        };
        f.write_str(name)
    }
}
