//! Core systems for Horizon Collection.
//!
//! This crate provides the ambient layer shared by the collection data source:
//!
//! - **Errors**: contract violations (fatal) and configuration errors
//! - **Diagnostics**: tracing targets, the injected [`DiagnosticSink`], and a
//!   recording sink with an explicit assertion hook for tests
//! - **Completion**: the channel through which a widget reports that a batched
//!   update finished
//! - **Geometry**: the [`Point`] and [`Size`] values exchanged with handlers
//!
//! # Completion Example
//!
//! ```
//! use horizon_collection_core::completion::completion_pair;
//!
//! let (completion, pending) = completion_pair();
//! pending.on_complete(|finished| println!("update finished: {finished}"));
//! completion.complete(true);
//! ```

pub mod completion;
mod error;
pub mod geometry;
pub mod logging;

pub use completion::{completion_pair, PendingUpdate, UpdateCompletion};
pub use error::{contract_violation, ConfigError, ContractViolation, CoordinateText, Result};
pub use geometry::{Point, Size};
pub use logging::{
    DiagnosticLevel, DiagnosticSink, PerfSpan, RecordedMessage, RecordingSink, TracingSink,
};
