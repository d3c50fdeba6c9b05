//! `growlog` - A local tracker for children's growth measurements
//!
//! This library provides the core functionality for recording weight and
//! height measurements, classifying the derived body-mass index into weight
//! categories, and persisting the record history locally.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod record;
pub mod screen;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use metrics::{compute_index, Category, ChartPoint, Severity};
pub use record::{ChildReference, NutritionRecord};
pub use screen::{EditTarget, Field, Screen, ScreenState, SubmitOutcome};
pub use store::{KvStore, RecordList, RecordStore, StoreStats};
