//! The widget seam.
//!
//! [`CollectionWidget`] is everything the data source needs from a grid or
//! list widget: structural commands, a batching transaction, and view kind
//! registration. Rendering, recycling and layout stay on the widget's side.

use horizon_collection_core::UpdateCompletion;

use crate::model::{Coordinate, ElementKind, ReuseIdentifier};

/// A stateful collection widget kept in sync by a
/// [`CollectionDataSource`](super::CollectionDataSource).
///
/// Section and item indices passed to delete commands refer to the widget's
/// structure before the transaction; indices passed to insert and reload
/// commands refer to the structure after it.
///
/// # Implementation Requirements
///
/// At minimum, implement the structural commands and the two registration
/// methods. The default [`perform_batch_updates`](Self::perform_batch_updates)
/// runs the body and reports completion immediately, which suits widgets
/// that do not animate.
///
/// # Example
///
/// ```
/// use horizon_collection::model::{Coordinate, ElementKind, ReuseIdentifier};
/// use horizon_collection::view::CollectionWidget;
///
/// #[derive(Default)]
/// struct Counter {
///     commands: usize,
/// }
///
/// impl CollectionWidget for Counter {
///     fn insert_sections(&mut self, _: &[usize]) { self.commands += 1; }
///     fn delete_sections(&mut self, _: &[usize]) { self.commands += 1; }
///     fn reload_sections(&mut self, _: &[usize]) { self.commands += 1; }
///     fn insert_items(&mut self, _: &[Coordinate]) { self.commands += 1; }
///     fn delete_items(&mut self, _: &[Coordinate]) { self.commands += 1; }
///     fn reload_items(&mut self, _: &[Coordinate]) { self.commands += 1; }
///     fn reload_all(&mut self) { self.commands += 1; }
///     fn register_cell(&mut self, _: &ReuseIdentifier) {}
///     fn register_supplementary(&mut self, _: ElementKind, _: &ReuseIdentifier) {}
/// }
/// ```
pub trait CollectionWidget {
    /// Inserts whole sections.
    fn insert_sections(&mut self, sections: &[usize]);

    /// Deletes whole sections.
    fn delete_sections(&mut self, sections: &[usize]);

    /// Redraws sections, including their supplementary views.
    fn reload_sections(&mut self, sections: &[usize]);

    /// Inserts items.
    fn insert_items(&mut self, coordinates: &[Coordinate]);

    /// Deletes items.
    fn delete_items(&mut self, coordinates: &[Coordinate]);

    /// Redraws items.
    fn reload_items(&mut self, coordinates: &[Coordinate]);

    /// Discards all visible structure and queries the data source afresh.
    fn reload_all(&mut self);

    /// Makes a cell kind dequeuable.
    fn register_cell(&mut self, kind: &ReuseIdentifier);

    /// Makes a header or footer view kind dequeuable.
    fn register_supplementary(&mut self, element: ElementKind, kind: &ReuseIdentifier);

    /// Runs `updates` as one atomic, animated transaction.
    ///
    /// The widget must call `updates` exactly once, synchronously, and
    /// resolve `completion` when the transaction's animation ends. Passing
    /// `false` (or dropping `completion`) reports that it did not finish.
    fn perform_batch_updates<F>(&mut self, updates: F, completion: UpdateCompletion)
    where
        F: FnOnce(&mut Self),
        Self: Sized,
    {
        updates(self);
        completion.complete(true);
    }
}
