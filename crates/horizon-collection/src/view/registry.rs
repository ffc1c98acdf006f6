//! Bookkeeping for view kinds already registered with the widget.

use std::collections::HashSet;

use horizon_collection_core::logging::targets;

use crate::model::{ElementKind, ReuseIdentifier};

use super::widget::CollectionWidget;

/// Remembers which cell and supplementary kinds the widget knows, so each
/// kind is registered once.
#[derive(Debug, Default, Clone)]
pub struct ViewRegistry {
    cells: HashSet<ReuseIdentifier>,
    supplementary: HashSet<(ElementKind, ReuseIdentifier)>,
}

impl ViewRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a cell kind with `widget` unless it already was.
    ///
    /// Returns `true` if the widget was told about it.
    pub fn register_cell<W: CollectionWidget + ?Sized>(
        &mut self,
        widget: &mut W,
        kind: ReuseIdentifier,
    ) -> bool {
        if self.cells.contains(&kind) {
            return false;
        }
        tracing::debug!(target: targets::VIEW, %kind, "register cell kind");
        widget.register_cell(&kind);
        self.cells.insert(kind);
        true
    }

    /// Registers a supplementary kind for one slot with `widget` unless it
    /// already was.
    ///
    /// Returns `true` if the widget was told about it.
    pub fn register_supplementary<W: CollectionWidget + ?Sized>(
        &mut self,
        widget: &mut W,
        element: ElementKind,
        kind: ReuseIdentifier,
    ) -> bool {
        let key = (element, kind);
        if self.supplementary.contains(&key) {
            return false;
        }
        tracing::debug!(
            target: targets::VIEW,
            element = %key.0,
            kind = %key.1,
            "register supplementary kind"
        );
        widget.register_supplementary(key.0, &key.1);
        self.supplementary.insert(key);
        true
    }

    /// Returns `true` if the cell kind is registered.
    pub fn is_cell_registered(&self, kind: &ReuseIdentifier) -> bool {
        self.cells.contains(kind)
    }

    /// Returns `true` if the supplementary kind is registered for `element`.
    pub fn is_supplementary_registered(
        &self,
        element: ElementKind,
        kind: &ReuseIdentifier,
    ) -> bool {
        self.supplementary.contains(&(element, kind.clone()))
    }

    /// Returns the number of registered kinds of both families.
    pub fn len(&self) -> usize {
        self.cells.len() + self.supplementary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
