//! Strongly-typed identifier newtypes

use serde::{Deserialize, Serialize};

/// Declare a ULID-backed string id newtype.
macro_rules! ulid_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Generate a fresh ULID-backed id
            pub fn new() -> Self {
                Self(ulid::Ulid::new().to_string())
            }

            /// Wrap an existing id string
            pub fn from_string(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the id as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }
    };
}

ulid_id!(
    /// Unique identifier for a task
    TaskId
);
ulid_id!(
    /// Unique identifier for a subtask
    SubtaskId
);
ulid_id!(
    /// Unique identifier for a checklist item
    ChecklistItemId
);
ulid_id!(
    /// Unique identifier for a comment
    CommentId
);
ulid_id!(
    /// Unique identifier for an attachment
    AttachmentId
);
ulid_id!(
    /// Unique identifier for an estimation record
    EstimateId
);

/// Identifier for a backlog section.
///
/// Section ids come from the registry's monotonic counter (`backlog-1`,
/// `backlog-2`, ...) and are never reused, so a deleted section's key can
/// never collide with a later one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(String);

impl SectionId {
    /// Build the id for the `n`-th allocated section
    pub fn from_counter(n: u64) -> Self {
        Self(format!("backlog-{n}"))
    }

    /// Wrap an existing id string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier for a team member; `"unassigned"` is the absent-owner marker.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// The absent-owner marker
    pub fn unassigned() -> Self {
        Self("unassigned".to_string())
    }

    /// Wrap an existing member id string
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Get the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether this is the absent-owner marker
    pub fn is_unassigned(&self) -> bool {
        self.0 == "unassigned"
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::unassigned()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for MemberId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for MemberId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
