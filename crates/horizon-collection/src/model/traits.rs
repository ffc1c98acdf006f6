//! Capability traits for items held by a sectioned store.
//!
//! A widget recycles views by reuse identifier. Instead of inspecting items
//! at dequeue time, every item type states which view kind presents it:
//!
//! - [`CellModel`] for the items in a section
//! - [`SupplementaryModel`] for header and footer items
//! - [`SupplementaryContainer`] for the per-section bundle holding them
//!
//! [`HeaderFooter`] is the conventional container.

use std::borrow::Cow;
use std::fmt;

/// The identifier a widget uses to register and dequeue a view kind.
///
/// # Example
///
/// ```
/// use horizon_collection::model::ReuseIdentifier;
///
/// let id = ReuseIdentifier::new("PhotoCell");
/// assert_eq!(id.as_str(), "PhotoCell");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReuseIdentifier(Cow<'static, str>);

impl ReuseIdentifier {
    /// Create an identifier from a static name.
    pub const fn new(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    /// Create an identifier from an owned name.
    pub fn owned(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReuseIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ReuseIdentifier {
    fn from(name: &'static str) -> Self {
        Self::new(name)
    }
}

impl From<String> for ReuseIdentifier {
    fn from(name: String) -> Self {
        Self::owned(name)
    }
}

/// The slot a supplementary item occupies within its section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Shown before the section's items.
    Header,
    /// Shown after the section's items.
    Footer,
}

impl ElementKind {
    /// Both kinds, header first.
    pub const ALL: [ElementKind; 2] = [ElementKind::Header, ElementKind::Footer];
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => f.write_str("header"),
            Self::Footer => f.write_str("footer"),
        }
    }
}

/// An item presented by a cell.
///
/// # Example
///
/// ```
/// use horizon_collection::model::{CellModel, ReuseIdentifier};
///
/// struct Photo {
///     url: String,
/// }
///
/// impl CellModel for Photo {
///     fn cell_kind(&self) -> ReuseIdentifier {
///         ReuseIdentifier::new("PhotoCell")
///     }
/// }
/// ```
pub trait CellModel {
    /// Returns the cell kind the widget must dequeue for this item.
    fn cell_kind(&self) -> ReuseIdentifier;
}

/// An item presented by a header or footer view.
pub trait SupplementaryModel {
    /// Returns the view kind the widget must dequeue for this item.
    fn view_kind(&self) -> ReuseIdentifier;
}

/// The header/footer bundle attached to one section.
pub trait SupplementaryContainer {
    /// The header and footer item type.
    type Item: SupplementaryModel;

    /// Returns the header item, if any.
    fn header(&self) -> Option<&Self::Item>;

    /// Returns the footer item, if any.
    fn footer(&self) -> Option<&Self::Item>;

    /// Returns the placeholder used when a store is reset but keeps its
    /// structure: no header and no footer.
    fn empty() -> Self;

    /// Returns the item in the given slot.
    fn item(&self, kind: ElementKind) -> Option<&Self::Item> {
        match kind {
            ElementKind::Header => self.header(),
            ElementKind::Footer => self.footer(),
        }
    }
}

/// A section's optional header and optional footer.
///
/// # Example
///
/// ```
/// use horizon_collection::model::{HeaderFooter, ReuseIdentifier, SupplementaryModel};
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Title(&'static str);
///
/// impl SupplementaryModel for Title {
///     fn view_kind(&self) -> ReuseIdentifier {
///         ReuseIdentifier::new("TitleView")
///     }
/// }
///
/// let section = HeaderFooter::header(Title("Recent"));
/// assert_eq!(section.header_item(), Some(&Title("Recent")));
/// assert!(section.footer_item().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderFooter<U> {
    header: Option<U>,
    footer: Option<U>,
}

impl<U> HeaderFooter<U> {
    /// Create a container from optional parts.
    pub fn new(header: Option<U>, footer: Option<U>) -> Self {
        Self { header, footer }
    }

    /// Create a container with a header only.
    pub fn header(header: U) -> Self {
        Self::new(Some(header), None)
    }

    /// Create a container with a footer only.
    pub fn footer(footer: U) -> Self {
        Self::new(None, Some(footer))
    }

    /// Create a container with both parts.
    pub fn both(header: U, footer: U) -> Self {
        Self::new(Some(header), Some(footer))
    }

    /// Returns the header item.
    pub fn header_item(&self) -> Option<&U> {
        self.header.as_ref()
    }

    /// Returns the footer item.
    pub fn footer_item(&self) -> Option<&U> {
        self.footer.as_ref()
    }

    /// Returns `true` if neither part is set.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.footer.is_none()
    }
}

impl<U> Default for HeaderFooter<U> {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl<U: SupplementaryModel> SupplementaryContainer for HeaderFooter<U> {
    type Item = U;

    fn header(&self) -> Option<&U> {
        self.header.as_ref()
    }

    fn footer(&self) -> Option<&U> {
        self.footer.as_ref()
    }

    fn empty() -> Self {
        Self::default()
    }
}

/// Strings present as a single plain cell kind.
impl CellModel for String {
    fn cell_kind(&self) -> ReuseIdentifier {
        ReuseIdentifier::new("TextCell")
    }
}

impl CellModel for &'static str {
    fn cell_kind(&self) -> ReuseIdentifier {
        ReuseIdentifier::new("TextCell")
    }
}

/// Strings present as a single plain supplementary kind.
impl SupplementaryModel for String {
    fn view_kind(&self) -> ReuseIdentifier {
        ReuseIdentifier::new("TextSupplementaryView")
    }
}

impl SupplementaryModel for &'static str {
    fn view_kind(&self) -> ReuseIdentifier {
        ReuseIdentifier::new("TextSupplementaryView")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reuse_identifier() {
        let a = ReuseIdentifier::new("Cell");
        let b = ReuseIdentifier::owned(String::from("Cell"));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "Cell");
    }

    #[test]
    fn test_header_footer_slots() {
        let hf = HeaderFooter::both("top", "bottom");
        assert_eq!(hf.item(ElementKind::Header), Some(&"top"));
        assert_eq!(hf.item(ElementKind::Footer), Some(&"bottom"));
        assert!(!hf.is_empty());

        let empty: HeaderFooter<&'static str> = SupplementaryContainer::empty();
        assert!(empty.is_empty());
        assert!(empty.item(ElementKind::Header).is_none());
    }

    #[test]
    fn test_string_kinds() {
        assert_eq!("a".cell_kind().as_str(), "TextCell");
        assert_eq!(String::from("h").view_kind().as_str(), "TextSupplementaryView");
    }
}
