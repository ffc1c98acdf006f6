//! User-supplied event handlers.
//!
//! Each widget lifecycle event has one optional slot. Setting a slot
//! replaces whatever was there; an empty slot makes the event a no-op.

use horizon_collection_core::{Point, Size};

use crate::model::Coordinate;

/// Called with the coordinate and item the user selected.
pub type SelectionHandler<T> = Box<dyn FnMut(Coordinate, &T) + Send>;

/// Called with the coordinate and item the user deselected.
pub type DeselectionHandler<T> = Box<dyn FnMut(Coordinate, &T) + Send>;

/// Returns the size of an item's cell.
pub type ItemSizeHandler<T> = Box<dyn FnMut(Coordinate, &T) -> Size + Send>;

/// Returns the size of a section's header or footer view.
pub type SupplementarySizeHandler<U> = Box<dyn FnMut(usize, &U) -> Size + Send>;

/// Called with the coordinates the widget asked about and the items that
/// resolved. The two lists may differ in length.
pub type PrefetchHandler<T> = Box<dyn FnMut(&[Coordinate], &[&T]) + Send>;

/// Called with the new content offset on every scroll.
pub type ContentOffsetHandler = Box<dyn FnMut(Point) + Send>;

/// Called for scroll phase events.
pub type ScrollHandler = Box<dyn FnMut(&ScrollMetrics) + Send>;

/// Called when a drag is about to end, with the release velocity and the
/// offset the scroll will settle at. The handler may move the target.
pub type WillEndDraggingHandler = Box<dyn FnMut(&ScrollMetrics, Point, &mut Point) + Send>;

/// Called when a drag ends, with whether the scroll keeps decelerating.
pub type DidEndDraggingHandler = Box<dyn FnMut(&ScrollMetrics, bool) + Send>;

/// The scroll state a widget reports alongside scroll events.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollMetrics {
    pub content_offset: Point,
    pub content_size: Size,
    pub viewport_size: Size,
}

impl ScrollMetrics {
    /// Creates scroll metrics.
    pub fn new(content_offset: Point, content_size: Size, viewport_size: Size) -> Self {
        Self {
            content_offset,
            content_size,
            viewport_size,
        }
    }
}

/// One optional slot per event kind.
pub struct EventHandlers<T, U> {
    pub(crate) selection: Option<SelectionHandler<T>>,
    pub(crate) deselection: Option<DeselectionHandler<T>>,
    pub(crate) item_size: Option<ItemSizeHandler<T>>,
    pub(crate) header_size: Option<SupplementarySizeHandler<U>>,
    pub(crate) footer_size: Option<SupplementarySizeHandler<U>>,
    pub(crate) begin_prefetch: Option<PrefetchHandler<T>>,
    pub(crate) cancel_prefetch: Option<PrefetchHandler<T>>,
    pub(crate) content_offset: Option<ContentOffsetHandler>,
    pub(crate) will_begin_dragging: Option<ScrollHandler>,
    pub(crate) will_end_dragging: Option<WillEndDraggingHandler>,
    pub(crate) did_end_dragging: Option<DidEndDraggingHandler>,
    pub(crate) did_end_decelerating: Option<ScrollHandler>,
    pub(crate) did_end_scroll_animation: Option<ScrollHandler>,
}

impl<T, U> Default for EventHandlers<T, U> {
    fn default() -> Self {
        Self {
            selection: None,
            deselection: None,
            item_size: None,
            header_size: None,
            footer_size: None,
            begin_prefetch: None,
            cancel_prefetch: None,
            content_offset: None,
            will_begin_dragging: None,
            will_end_dragging: None,
            did_end_dragging: None,
            did_end_decelerating: None,
            did_end_scroll_animation: None,
        }
    }
}

impl<T, U> EventHandlers<T, U> {
    /// Returns the number of occupied slots.
    pub fn registered_count(&self) -> usize {
        [
            self.selection.is_some(),
            self.deselection.is_some(),
            self.item_size.is_some(),
            self.header_size.is_some(),
            self.footer_size.is_some(),
            self.begin_prefetch.is_some(),
            self.cancel_prefetch.is_some(),
            self.content_offset.is_some(),
            self.will_begin_dragging.is_some(),
            self.will_end_dragging.is_some(),
            self.did_end_dragging.is_some(),
            self.did_end_decelerating.is_some(),
            self.did_end_scroll_animation.is_some(),
        ]
        .into_iter()
        .filter(|&set| set)
        .count()
    }

    /// Empties every slot.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

impl<T, U> std::fmt::Debug for EventHandlers<T, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventHandlers")
            .field("registered", &self.registered_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_start_empty() {
        let handlers: EventHandlers<String, String> = EventHandlers::default();
        assert_eq!(handlers.registered_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut handlers: EventHandlers<String, String> = EventHandlers::default();
        handlers.selection = Some(Box::new(|_, _| {}));
        handlers.content_offset = Some(Box::new(|_| {}));
        assert_eq!(handlers.registered_count(), 2);
        handlers.clear();
        assert_eq!(handlers.registered_count(), 0);
    }
}
