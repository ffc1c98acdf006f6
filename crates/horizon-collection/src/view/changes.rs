//! Declarative structural deltas.
//!
//! A [`ChangeSet`] lists what a store mutation did at section and item
//! granularity. The data source computes one per mutation and hands it to
//! the widget through [`ChangeSet::apply_to`], whichever update style is in
//! use.

use std::fmt;

use crate::model::Coordinate;

use super::widget::CollectionWidget;

/// Sections and items inserted, deleted and reloaded by one mutation.
///
/// Index lists are kept sorted and free of repeats. Deleted indices refer to
/// the structure before the mutation; inserted and reloaded indices refer to
/// the structure after it.
///
/// # Example
///
/// ```
/// use horizon_collection::model::Coordinate;
/// use horizon_collection::view::ChangeSet;
///
/// let changes = ChangeSet::new()
///     .with_inserted_sections([2])
///     .with_inserted_items([Coordinate::new(0, 1)]);
/// assert!(!changes.is_empty());
/// assert_eq!(changes.inserted_sections(), &[2]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    inserted_sections: Vec<usize>,
    deleted_sections: Vec<usize>,
    reloaded_sections: Vec<usize>,
    inserted_items: Vec<Coordinate>,
    deleted_items: Vec<Coordinate>,
    reloaded_items: Vec<Coordinate>,
}

impl ChangeSet {
    /// Creates an empty change set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds inserted sections.
    pub fn with_inserted_sections(mut self, sections: impl IntoIterator<Item = usize>) -> Self {
        merge(&mut self.inserted_sections, sections);
        self
    }

    /// Adds deleted sections.
    pub fn with_deleted_sections(mut self, sections: impl IntoIterator<Item = usize>) -> Self {
        merge(&mut self.deleted_sections, sections);
        self
    }

    /// Adds reloaded sections.
    pub fn with_reloaded_sections(mut self, sections: impl IntoIterator<Item = usize>) -> Self {
        merge(&mut self.reloaded_sections, sections);
        self
    }

    /// Adds inserted items.
    pub fn with_inserted_items(mut self, items: impl IntoIterator<Item = Coordinate>) -> Self {
        merge(&mut self.inserted_items, items);
        self
    }

    /// Adds deleted items.
    pub fn with_deleted_items(mut self, items: impl IntoIterator<Item = Coordinate>) -> Self {
        merge(&mut self.deleted_items, items);
        self
    }

    /// Adds reloaded items.
    pub fn with_reloaded_items(mut self, items: impl IntoIterator<Item = Coordinate>) -> Self {
        merge(&mut self.reloaded_items, items);
        self
    }

    pub fn inserted_sections(&self) -> &[usize] {
        &self.inserted_sections
    }

    pub fn deleted_sections(&self) -> &[usize] {
        &self.deleted_sections
    }

    pub fn reloaded_sections(&self) -> &[usize] {
        &self.reloaded_sections
    }

    pub fn inserted_items(&self) -> &[Coordinate] {
        &self.inserted_items
    }

    pub fn deleted_items(&self) -> &[Coordinate] {
        &self.deleted_items
    }

    pub fn reloaded_items(&self) -> &[Coordinate] {
        &self.reloaded_items
    }

    /// Returns `true` if the mutation changed nothing the widget shows.
    pub fn is_empty(&self) -> bool {
        self.inserted_sections.is_empty()
            && self.deleted_sections.is_empty()
            && self.reloaded_sections.is_empty()
            && self.inserted_items.is_empty()
            && self.deleted_items.is_empty()
            && self.reloaded_items.is_empty()
    }

    /// Issues the widget commands for this change set.
    ///
    /// Deletions go first, then insertions, then reloads. Empty lists issue
    /// no command.
    pub fn apply_to<W: CollectionWidget + ?Sized>(&self, widget: &mut W) {
        if !self.deleted_items.is_empty() {
            widget.delete_items(&self.deleted_items);
        }
        if !self.deleted_sections.is_empty() {
            widget.delete_sections(&self.deleted_sections);
        }
        if !self.inserted_sections.is_empty() {
            widget.insert_sections(&self.inserted_sections);
        }
        if !self.inserted_items.is_empty() {
            widget.insert_items(&self.inserted_items);
        }
        if !self.reloaded_sections.is_empty() {
            widget.reload_sections(&self.reloaded_sections);
        }
        if !self.reloaded_items.is_empty() {
            widget.reload_items(&self.reloaded_items);
        }
    }
}

impl fmt::Display for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sections +{} -{} ~{}, items +{} -{} ~{}",
            self.inserted_sections.len(),
            self.deleted_sections.len(),
            self.reloaded_sections.len(),
            self.inserted_items.len(),
            self.deleted_items.len(),
            self.reloaded_items.len(),
        )
    }
}

fn merge<V: Ord>(list: &mut Vec<V>, values: impl IntoIterator<Item = V>) {
    list.extend(values);
    list.sort_unstable();
    list.dedup();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ElementKind, ReuseIdentifier};

    #[derive(Default)]
    struct Log(Vec<String>);

    impl CollectionWidget for Log {
        fn insert_sections(&mut self, s: &[usize]) {
            self.0.push(format!("insert_sections {s:?}"));
        }
        fn delete_sections(&mut self, s: &[usize]) {
            self.0.push(format!("delete_sections {s:?}"));
        }
        fn reload_sections(&mut self, s: &[usize]) {
            self.0.push(format!("reload_sections {s:?}"));
        }
        fn insert_items(&mut self, c: &[Coordinate]) {
            self.0.push(format!("insert_items {}", c.len()));
        }
        fn delete_items(&mut self, c: &[Coordinate]) {
            self.0.push(format!("delete_items {}", c.len()));
        }
        fn reload_items(&mut self, c: &[Coordinate]) {
            self.0.push(format!("reload_items {}", c.len()));
        }
        fn reload_all(&mut self) {
            self.0.push("reload_all".into());
        }
        fn register_cell(&mut self, _: &ReuseIdentifier) {}
        fn register_supplementary(&mut self, _: ElementKind, _: &ReuseIdentifier) {}
    }

    #[test]
    fn test_empty_issues_nothing() {
        let mut log = Log::default();
        let changes = ChangeSet::new();
        assert!(changes.is_empty());
        changes.apply_to(&mut log);
        assert!(log.0.is_empty());
    }

    #[test]
    fn test_sorted_without_repeats() {
        let changes = ChangeSet::new()
            .with_reloaded_sections([3, 1])
            .with_reloaded_sections([1, 0]);
        assert_eq!(changes.reloaded_sections(), &[0, 1, 3]);
    }

    #[test]
    fn test_apply_order() {
        let mut log = Log::default();
        ChangeSet::new()
            .with_reloaded_items([Coordinate::new(0, 0)])
            .with_reloaded_sections([0])
            .with_inserted_items([Coordinate::new(0, 1)])
            .with_inserted_sections([1])
            .with_deleted_sections([2])
            .with_deleted_items([Coordinate::new(3, 0)])
            .apply_to(&mut log);
        assert_eq!(
            log.0,
            vec![
                "delete_items 1",
                "delete_sections [2]",
                "insert_sections [1]",
                "insert_items 1",
                "reload_sections [0]",
                "reload_items 1",
            ]
        );
    }

    #[test]
    fn test_display_summary() {
        let changes = ChangeSet::new()
            .with_inserted_sections([4])
            .with_deleted_items([Coordinate::new(0, 0), Coordinate::new(0, 1)]);
        assert_eq!(changes.to_string(), "sections +1 -0 ~0, items +0 -2 ~0");
    }
}
