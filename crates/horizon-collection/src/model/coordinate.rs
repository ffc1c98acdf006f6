//! Coordinates for addressing items in a sectioned store.
//!
//! A [`Coordinate`] names one item by its section and its position within
//! that section. Coordinates are plain values: they are not tied to a store
//! and say nothing about whether an item exists there. Use
//! [`SectionedStore::item`](super::SectionedStore::item) to resolve one.

use std::fmt;

/// The position of one item: `(section, item)`.
///
/// Ordering is section-major, so sorting a list of coordinates groups them
/// by section and orders items within each section.
///
/// # Index Validity
///
/// Coordinates should be used immediately. Insertions and deletions shift
/// the items after them, so a previously computed coordinate may name a
/// different item, or nothing, after the store changes.
///
/// # Example
///
/// ```
/// use horizon_collection::model::Coordinate;
///
/// let first = Coordinate::new(0, 0);
/// let later = Coordinate::new(1, 0);
/// assert!(first < later);
/// assert_eq!(later.to_string(), "(1, 0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Coordinate {
    section: usize,
    item: usize,
}

impl Coordinate {
    /// Creates a coordinate.
    #[inline]
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Returns the section index.
    #[inline]
    pub const fn section(&self) -> usize {
        self.section
    }

    /// Returns the item index within the section.
    #[inline]
    pub const fn item(&self) -> usize {
        self.item
    }

    /// Returns a coordinate in the same section at another item index.
    #[inline]
    pub const fn with_item(&self, item: usize) -> Self {
        Self {
            section: self.section,
            item,
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.section, self.item)
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((section, item): (usize, usize)) -> Self {
        Self::new(section, item)
    }
}
