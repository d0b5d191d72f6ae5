//! Guest manifest reconciliation and notification engine.
//!
//! Pure engine crate: receives pre-loaded rows plus column-mapping
//! configuration, returns comparison results and rendered messages.
//! No UI dependencies.

pub mod cleanup;
pub mod compare;
pub mod config;
pub mod error;
pub mod load;
pub mod messages;
pub mod model;
pub mod normalize;
pub mod resolve;
pub mod template;

pub use compare::{compare, run_compare};
pub use config::{CompareJob, MessageJob, TravelMode};
pub use error::EngineError;
pub use messages::{generate_messages, run_messages};
pub use model::{CellValue, Field, GuestComparison, ProcessedMessage, Row};
