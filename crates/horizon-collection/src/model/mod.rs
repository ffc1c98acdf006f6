//! The widget-agnostic half of Horizon Collection.
//!
//! This module holds the sectioned data a collection widget displays, with
//! no knowledge of any widget:
//!
//! - Items are grouped into ordered sections
//! - Each section index may carry a supplementary container (header/footer)
//! - Every mutation is a plain, synchronous operation on the store
//!
//! # Core Types
//!
//! - `Coordinate`: Identifies an item by section and position
//! - `SectionedStore`: Owns the item sections and supplementary containers
//! - `CellModel` / `SupplementaryModel`: Name the view kind presenting an item
//! - `SupplementaryContainer`: The per-section header/footer bundle
//! - `HeaderFooter`: The conventional container
//!
//! # Example
//!
//! ```
//! use horizon_collection::model::{Coordinate, HeaderFooter, SectionedStore};
//!
//! let mut store: SectionedStore<String, HeaderFooter<String>> = SectionedStore::empty();
//! let section = store.append_new_section(vec!["Apple".into(), "Banana".into()]);
//! store.append_supplementary(HeaderFooter::header("Fruit".into()));
//!
//! assert_eq!(store.number_of_items(section), 2);
//! assert_eq!(
//!     store.item(Coordinate::new(0, 1)).map(String::as_str),
//!     Some("Banana")
//! );
//! ```
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────┐  mutate   ┌──────────────────────┐  ChangeSet  ┌──────────┐
//! │     Caller      │──────────>│ CollectionDataSource │────────────>│  Widget  │
//! └─────────────────┘           └──────────────────────┘             └──────────┘
//!                                          │                              │
//!                                          v                              │
//!                                 ┌────────────────┐     queries          │
//!                                 │ SectionedStore │<─────────────────────┘
//!                                 └────────────────┘
//! ```

mod coordinate;
mod indices;
mod store;
mod traits;

pub use coordinate::Coordinate;
pub use store::{ItemPlacement, SectionedStore};
pub use traits::{
    CellModel, ElementKind, HeaderFooter, ReuseIdentifier, SupplementaryContainer,
    SupplementaryModel,
};
