//! Prelude module for Horizon Collection.
//!
//! ```
//! use horizon_collection::prelude::*;
//! ```
//!
//! This provides access to:
//! - The store and its value types (`SectionedStore`, `Coordinate`, `HeaderFooter`)
//! - The capability traits items implement (`CellModel`, `SupplementaryModel`)
//! - The data source and widget seam (`CollectionDataSource`, `CollectionWidget`)
//! - Update plumbing (`UpdateStyle`, `ChangeSet`, `PendingUpdate`)

// ============================================================================
// Model
// ============================================================================

pub use crate::model::{
    CellModel, Coordinate, ElementKind, HeaderFooter, ItemPlacement, ReuseIdentifier,
    SectionedStore, SupplementaryContainer, SupplementaryModel,
};

// ============================================================================
// View
// ============================================================================

pub use crate::view::{
    ChangeSet, CollectionDataSource, CollectionWidget, ScrollMetrics, UpdateStyle,
};

// ============================================================================
// Ambient
// ============================================================================

pub use crate::config::DataSourceConfig;
pub use horizon_collection_core::{DiagnosticLevel, DiagnosticSink, PendingUpdate, Point, Size};
