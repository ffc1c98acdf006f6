//! Horizon Collection - a sectioned data source for collection widgets.
//!
//! This is the main crate. It re-exports the ambient layer from
//! `horizon-collection-core` (errors, diagnostics, completion, geometry) and
//! adds:
//!
//! - [`model`]: the widget-agnostic sectioned store
//! - [`view`]: the widget seam and the reconciling data source
//! - [`config`]: data source tunables loaded from TOML
//!
//! # Example
//!
//! ```
//! use horizon_collection::prelude::*;
//!
//! #[derive(Default)]
//! struct Grid {
//!     reloads: usize,
//! }
//!
//! impl CollectionWidget for Grid {
//!     fn insert_sections(&mut self, _: &[usize]) {}
//!     fn delete_sections(&mut self, _: &[usize]) {}
//!     fn reload_sections(&mut self, _: &[usize]) {}
//!     fn insert_items(&mut self, _: &[Coordinate]) {}
//!     fn delete_items(&mut self, _: &[Coordinate]) {}
//!     fn reload_items(&mut self, _: &[Coordinate]) {}
//!     fn reload_all(&mut self) { self.reloads += 1; }
//!     fn register_cell(&mut self, _: &ReuseIdentifier) {}
//!     fn register_supplementary(&mut self, _: ElementKind, _: &ReuseIdentifier) {}
//! }
//!
//! let mut source: CollectionDataSource<String, HeaderFooter<String>, Grid> =
//!     CollectionDataSource::new(Grid::default(), vec![vec!["a".into()]], Vec::new());
//!
//! source.on_select(|coordinate, item| println!("selected {item} at {coordinate}"));
//!
//! let pending = source.insert_items(
//!     vec!["b".into()],
//!     &[Coordinate::new(0, 1)],
//!     UpdateStyle::Batched,
//! );
//! assert!(pending.wait());
//! assert_eq!(source.number_of_items(0), 2);
//! ```

pub use horizon_collection_core::*;

pub mod config;
pub mod model;
pub mod prelude;
pub mod view;

static_assertions::assert_impl_all!(model::Coordinate: Send, Sync, Copy);
static_assertions::assert_impl_all!(
    model::SectionedStore<String, model::HeaderFooter<String>>: Send, Sync, Clone
);
static_assertions::assert_impl_all!(view::ChangeSet: Send, Sync);
static_assertions::assert_impl_all!(config::DataSourceConfig: Send, Sync);
