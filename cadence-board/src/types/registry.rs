//! Container registry: the two placement axes and their ordered sequences

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::container::Axis;
use super::ids::{SectionId, TaskId};

/// A backlog section: a user-created ordered container
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    pub tasks: Vec<TaskId>,
}

/// The placement surface: the active sprint sequence plus the backlog
/// sections in creation order.
///
/// Maintains a reverse index from task id to its axis so that locating a
/// task's home is O(1) rather than a scan over every container. Section ids
/// come from a monotonic counter and are never reused.
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    sprint: Vec<TaskId>,
    sections: Vec<Section>,
    next_section: u64,
    home: HashMap<TaskId, Axis>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            sprint: Vec::new(),
            sections: Vec::new(),
            next_section: 1,
            home: HashMap::new(),
        }
    }

    // =========================================================================
    // Sections
    // =========================================================================

    /// Allocate a new backlog section at the end of the section list.
    ///
    /// The id is taken from the monotonic counter; the default title is
    /// "Backlog <n>".
    pub fn allocate_section(&mut self, title: Option<String>) -> Section {
        let n = self.next_section;
        self.next_section += 1;
        let section = Section {
            id: SectionId::from_counter(n),
            title: title.unwrap_or_else(|| format!("Backlog {n}")),
            tasks: Vec::new(),
        };
        self.sections.push(section.clone());
        section
    }

    /// Look up a section by id
    pub fn section(&self, id: &SectionId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    /// All sections in creation order
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Rename a section; returns the updated section
    pub fn rename_section(
        &mut self,
        id: &SectionId,
        title: impl Into<String>,
    ) -> Option<Section> {
        let section = self.sections.iter_mut().find(|s| &s.id == id)?;
        section.title = title.into();
        Some(section.clone())
    }

    /// Remove a section, dropping its task ids from the placement surface.
    ///
    /// Returns the removed section so the caller can dispose of its tasks.
    pub fn remove_section(&mut self, id: &SectionId) -> Option<Section> {
        let pos = self.sections.iter().position(|s| &s.id == id)?;
        let section = self.sections.remove(pos);
        for task in &section.tasks {
            self.home.remove(task);
        }
        Some(section)
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// The active sprint sequence
    pub fn sprint(&self) -> &[TaskId] {
        &self.sprint
    }

    /// The axis a task currently lives on
    pub fn home_of(&self, id: &TaskId) -> Option<&Axis> {
        self.home.get(id)
    }

    /// Whether a task is anywhere on the placement surface
    pub fn contains(&self, id: &TaskId) -> bool {
        self.home.contains_key(id)
    }

    /// Insert a task into the sprint at `index` (clamped to the sequence
    /// length); returns the actual insertion position.
    ///
    /// The task must not already live anywhere on the surface.
    pub fn insert_sprint(&mut self, index: usize, id: TaskId) -> usize {
        debug_assert!(!self.contains(&id), "task already placed: {id}");
        let at = index.min(self.sprint.len());
        self.sprint.insert(at, id.clone());
        self.home.insert(id, Axis::Sprint);
        at
    }

    /// Append a task at the end of the sprint; returns its position
    pub fn push_sprint(&mut self, id: TaskId) -> usize {
        self.insert_sprint(self.sprint.len(), id)
    }

    /// Insert a task into a section at `index` (clamped); returns the actual
    /// insertion position, or `None` if the section does not exist.
    pub fn insert_section(&mut self, sid: &SectionId, index: usize, id: TaskId) -> Option<usize> {
        debug_assert!(!self.contains(&id), "task already placed: {id}");
        let section = self.sections.iter_mut().find(|s| &s.id == sid)?;
        let at = index.min(section.tasks.len());
        section.tasks.insert(at, id.clone());
        self.home.insert(id, Axis::Section(sid.clone()));
        Some(at)
    }

    /// Append a task at the end of a section; returns its position, or
    /// `None` if the section does not exist.
    pub fn push_section(&mut self, sid: &SectionId, id: TaskId) -> Option<usize> {
        self.insert_section(sid, usize::MAX, id)
    }

    /// Remove a task from whichever axis holds it; returns that axis
    pub fn remove_task(&mut self, id: &TaskId) -> Option<Axis> {
        let axis = self.home.remove(id)?;
        match &axis {
            Axis::Sprint => self.sprint.retain(|t| t != id),
            Axis::Section(sid) => {
                if let Some(section) = self.sections.iter_mut().find(|s| &s.id == sid) {
                    section.tasks.retain(|t| t != id);
                }
            }
        }
        Some(axis)
    }

    // =========================================================================
    // Display index
    // =========================================================================

    /// The board-wide display order: the sprint sequence followed by every
    /// section's sequence in section-creation order.
    pub fn display_order(&self) -> Vec<TaskId> {
        let mut order = self.sprint.clone();
        for section in &self.sections {
            order.extend(section.tasks.iter().cloned());
        }
        order
    }

    /// Assign the display index: a bijection from every placed task id onto
    /// `0..N`.
    ///
    /// Indices are positional, so they churn when earlier tasks are
    /// inserted, removed, or reordered; a creation-time serial would be the
    /// stable alternative.
    pub fn display_index(&self) -> HashMap<TaskId, usize> {
        self.display_order()
            .into_iter()
            .enumerate()
            .map(|(i, id)| (id, i))
            .collect()
    }

    /// Display index of a single task
    pub fn index_of(&self, id: &TaskId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.display_order().iter().position(|t| t == id)
    }

    /// Total number of placed tasks
    pub fn len(&self) -> usize {
        self.sprint.len() + self.sections.iter().map(|s| s.tasks.len()).sum::<usize>()
    }

    /// Whether the placement surface is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify internal invariants: no duplicate ids across sequences, and
    /// the reverse index agrees with the sequences exactly.
    pub fn is_consistent(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        for id in &self.sprint {
            if !seen.insert(id.clone()) || self.home.get(id) != Some(&Axis::Sprint) {
                return false;
            }
        }
        for section in &self.sections {
            let axis = Axis::Section(section.id.clone());
            for id in &section.tasks {
                if !seen.insert(id.clone()) || self.home.get(id) != Some(&axis) {
                    return false;
                }
            }
        }
        seen.len() == self.home.len()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_section_counter_never_reuses() {
        let mut registry = Registry::new();
        let first = registry.allocate_section(Some("Backlog".into()));
        assert_eq!(first.id.as_str(), "backlog-1");

        let second = registry.allocate_section(None);
        assert_eq!(second.id.as_str(), "backlog-2");
        assert_eq!(second.title, "Backlog 2");

        registry.remove_section(&second.id).unwrap();
        let third = registry.allocate_section(None);
        assert_eq!(third.id.as_str(), "backlog-3");
    }

    #[test]
    fn test_insert_and_home() {
        let mut registry = Registry::new();
        let section = registry.allocate_section(None);

        let a = TaskId::from("a");
        let b = TaskId::from("b");
        registry.push_sprint(a.clone());
        registry.push_section(&section.id, b.clone()).unwrap();

        assert_eq!(registry.home_of(&a), Some(&Axis::Sprint));
        assert_eq!(registry.home_of(&b), Some(&Axis::Section(section.id.clone())));
        assert!(registry.is_consistent());
    }

    #[test]
    fn test_insert_sprint_clamps() {
        let mut registry = Registry::new();
        registry.push_sprint("a".into());
        registry.push_sprint("b".into());

        let at = registry.insert_sprint(99, "c".into());
        assert_eq!(at, 2);
        let expected: Vec<TaskId> = vec!["a".into(), "b".into(), "c".into()];
        assert_eq!(registry.sprint(), expected.as_slice());
    }

    #[test]
    fn test_remove_task_from_either_axis() {
        let mut registry = Registry::new();
        let section = registry.allocate_section(None);
        registry.push_sprint("a".into());
        registry.push_section(&section.id, "b".into()).unwrap();

        assert_eq!(registry.remove_task(&"a".into()), Some(Axis::Sprint));
        assert_eq!(
            registry.remove_task(&"b".into()),
            Some(Axis::Section(section.id.clone()))
        );
        assert_eq!(registry.remove_task(&"b".into()), None);
        assert!(registry.is_empty());
        assert!(registry.is_consistent());
    }

    #[test]
    fn test_remove_section_drops_tasks_from_surface() {
        let mut registry = Registry::new();
        let section = registry.allocate_section(None);
        registry.push_section(&section.id, "x".into()).unwrap();
        registry.push_section(&section.id, "y".into()).unwrap();

        let removed = registry.remove_section(&section.id).unwrap();
        assert_eq!(removed.tasks.len(), 2);
        assert!(!registry.contains(&"x".into()));
        assert!(registry.is_consistent());
    }

    #[test]
    fn test_display_order_concatenates_axes() {
        let mut registry = Registry::new();
        let first = registry.allocate_section(None);
        let second = registry.allocate_section(None);

        registry.push_sprint("s1".into());
        registry.push_sprint("s2".into());
        registry.push_section(&second.id, "b2".into()).unwrap();
        registry.push_section(&first.id, "b1".into()).unwrap();

        let order = registry.display_order();
        let keys: Vec<&str> = order.iter().map(|id| id.as_str()).collect();
        assert_eq!(keys, ["s1", "s2", "b1", "b2"]);
    }

    #[test]
    fn test_display_index_is_bijective() {
        let mut registry = Registry::new();
        let section = registry.allocate_section(None);
        registry.push_sprint("a".into());
        registry.push_section(&section.id, "b".into()).unwrap();
        registry.push_sprint("c".into());

        let index = registry.display_index();
        assert_eq!(index.len(), registry.len());
        let mut values: Vec<usize> = index.values().copied().collect();
        values.sort_unstable();
        assert_eq!(values, vec![0, 1, 2]);
        assert_eq!(registry.index_of(&"b".into()), Some(2));
    }
}
