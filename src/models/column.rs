use serde::{Deserialize, Serialize};

/// Columns of the peer table, in display order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Column {
    Address,
    Subversion,
    Ping,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Address, Column::Subversion, Column::Ping];

    /// Map a view column index onto a column
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Column::Address => 0,
            Column::Subversion => 1,
            Column::Ping => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Column::Address => "Address",
            Column::Subversion => "Subversion",
            Column::Ping => "Ping (secs)",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// Interaction flags a view may apply to a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ItemFlags {
    pub selectable: bool,
    pub enabled: bool,
}
