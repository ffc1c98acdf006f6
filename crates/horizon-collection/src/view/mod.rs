//! The widget-facing half of Horizon Collection.
//!
//! # Core Types
//!
//! - `CollectionWidget`: The commands and transaction a widget offers
//! - `ChangeSet`: A declarative structural delta
//! - `CollectionDataSource`: Owns the store and widget and reconciles them
//! - `EventHandlers`: One optional handler slot per widget lifecycle event
//! - `ViewRegistry`: Remembers which view kinds the widget already knows

mod changes;
mod data_source;
mod handlers;
mod registry;
mod widget;

pub use changes::ChangeSet;
pub use data_source::{CollectionDataSource, UpdateStyle};
pub use handlers::{
    ContentOffsetHandler, DeselectionHandler, DidEndDraggingHandler, EventHandlers,
    ItemSizeHandler, PrefetchHandler, ScrollHandler, ScrollMetrics, SelectionHandler,
    SupplementarySizeHandler, WillEndDraggingHandler,
};
pub use registry::ViewRegistry;
pub use widget::CollectionWidget;
