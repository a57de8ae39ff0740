//! Container addressing: keys, kinds, axes, and gesture positions

use serde::{Deserialize, Serialize};

use super::ids::SectionId;
use super::task::Status;

/// The three container kinds on the placement surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContainerKind {
    KanbanColumn,
    ActiveSprint,
    BacklogSection,
}

/// Which placement axis a task lives on.
///
/// A task is always on exactly one axis: the active sprint, or one backlog
/// section. Kanban columns are not an axis - column membership is derived
/// from task status within the sprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Axis {
    Sprint,
    Section(SectionId),
}

/// A parsed container key: one of the droppable surfaces of the board.
///
/// Wire form is a plain string: `active-sprint`, `backlog-<n>`, or a column
/// status token such as `inprogress`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ContainerKey {
    /// The active sprint list
    Sprint,
    /// A backlog section
    Section(SectionId),
    /// A kanban column; addresses sprint tasks with this governing status
    Column(Status),
}

impl ContainerKey {
    /// Wire token for the active sprint
    pub const SPRINT: &'static str = "active-sprint";

    /// Parse a wire key; `None` for tokens naming no known container shape
    pub fn parse(key: &str) -> Option<Self> {
        if key == Self::SPRINT {
            return Some(Self::Sprint);
        }
        if let Some(status) = Status::from_key(key) {
            return Some(Self::Column(status));
        }
        let numbered = key
            .strip_prefix("backlog-")
            .is_some_and(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()));
        if numbered {
            return Some(Self::Section(SectionId::from_string(key)));
        }
        None
    }

    /// The kind of container this key names
    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Sprint => ContainerKind::ActiveSprint,
            Self::Section(_) => ContainerKind::BacklogSection,
            Self::Column(_) => ContainerKind::KanbanColumn,
        }
    }

    /// The placement axis this key addresses
    pub fn axis(&self) -> Axis {
        match self {
            Self::Sprint | Self::Column(_) => Axis::Sprint,
            Self::Section(id) => Axis::Section(id.clone()),
        }
    }
}

impl std::fmt::Display for ContainerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sprint => write!(f, "{}", Self::SPRINT),
            Self::Section(id) => write!(f, "{id}"),
            Self::Column(status) => write!(f, "{}", status.key()),
        }
    }
}

impl From<ContainerKey> for String {
    fn from(key: ContainerKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ContainerKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ContainerKey::parse(&value).ok_or_else(|| format!("unrecognized container key: {value}"))
    }
}

impl From<SectionId> for ContainerKey {
    fn from(id: SectionId) -> Self {
        Self::Section(id)
    }
}

impl From<Status> for ContainerKey {
    fn from(status: Status) -> Self {
        Self::Column(status)
    }
}

/// One end of a move gesture: a container plus an index within it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub container: ContainerKey,
    #[serde(default)]
    pub index: usize,
}

impl Position {
    /// Create a position
    pub fn new(container: ContainerKey, index: usize) -> Self {
        Self { container, index }
    }

    /// A position in the active sprint
    pub fn sprint(index: usize) -> Self {
        Self::new(ContainerKey::Sprint, index)
    }

    /// A position in a backlog section
    pub fn section(id: impl Into<SectionId>, index: usize) -> Self {
        Self::new(ContainerKey::Section(id.into()), index)
    }

    /// A position in a kanban column
    pub fn column(status: Status, index: usize) -> Self {
        Self::new(ContainerKey::Column(status), index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sprint() {
        assert_eq!(
            ContainerKey::parse("active-sprint"),
            Some(ContainerKey::Sprint)
        );
    }

    #[test]
    fn test_parse_column() {
        assert_eq!(
            ContainerKey::parse("inprogress"),
            Some(ContainerKey::Column(Status::Inprogress))
        );
    }

    #[test]
    fn test_parse_section() {
        let key = ContainerKey::parse("backlog-2").unwrap();
        assert_eq!(key, ContainerKey::Section(SectionId::from("backlog-2")));
        assert_eq!(key.kind(), ContainerKind::BacklogSection);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(ContainerKey::parse("archive"), None);
        assert_eq!(ContainerKey::parse("backlog-"), None);
        assert_eq!(ContainerKey::parse("backlog-x"), None);
    }

    #[test]
    fn test_axis() {
        assert_eq!(ContainerKey::Sprint.axis(), Axis::Sprint);
        assert_eq!(ContainerKey::Column(Status::Done).axis(), Axis::Sprint);
        assert_eq!(
            ContainerKey::Section("backlog-1".into()).axis(),
            Axis::Section("backlog-1".into())
        );
    }

    #[test]
    fn test_display_round_trip() {
        for key in [
            ContainerKey::Sprint,
            ContainerKey::Column(Status::Blocked),
            ContainerKey::Section("backlog-3".into()),
        ] {
            assert_eq!(ContainerKey::parse(&key.to_string()), Some(key));
        }
    }

    #[test]
    fn test_serde_uses_wire_string() {
        let position = Position::column(Status::Review, 2);
        let json = serde_json::to_value(&position).unwrap();
        assert_eq!(json["container"], "review");
        assert_eq!(json["index"], 2);

        let parsed: Position = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, position);

        let bad: Result<Position, _> =
            serde_json::from_value(serde_json::json!({"container": "nope", "index": 0}));
        assert!(bad.is_err());
    }
}
