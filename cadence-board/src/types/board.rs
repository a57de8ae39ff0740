//! Board-level types: Board metadata and the fixed column set

use serde::{Deserialize, Serialize};

use super::task::Status;

/// Board metadata: name, description, and the display-id prefix.
///
/// Columns are fixed (one per status) and sequences live in the registry, so
/// the board itself is just metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Prefix for rendered display keys, e.g. "CY" in "CY-7"
    #[serde(default = "Board::default_prefix")]
    pub prefix: String,
}

impl Board {
    /// Create a new board with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            prefix: Self::default_prefix(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the display-id prefix
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    fn default_prefix() -> String {
        "CY".to_string()
    }

    /// Render the display key for a 0-based display index
    pub fn display_key(&self, index: usize) -> String {
        format!("{}-{}", self.prefix, index + 1)
    }

    /// The fixed column set, in display order
    pub fn default_columns() -> Vec<Column> {
        Status::ALL
            .iter()
            .enumerate()
            .map(|(order, status)| Column {
                id: *status,
                name: status.title().to_string(),
                order,
            })
            .collect()
    }

    /// Look up a column by its key
    pub fn find_column(key: &str) -> Option<Column> {
        Status::from_key(key).map(|status| Column {
            id: status,
            name: status.title().to_string(),
            order: Status::ALL.iter().position(|s| *s == status).unwrap_or(0),
        })
    }
}

/// A kanban column: a workflow stage whose membership derives from task status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: Status,
    pub name: String,
    pub order: usize,
}
