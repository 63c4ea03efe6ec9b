//! Core view pipeline for community notes datasets
//!
//! This crate loads an annotated notes CSV once, derives the week
//! column, and turns filter criteria into a filtered subset, chart
//! aggregates and paginated rows.

pub mod aggregate;
pub mod dataset;
pub mod error;
pub mod note;
pub mod paginate;
pub mod pipeline;
pub mod week;

pub use aggregate::Aggregates;
pub use dataset::{Dataset, FilterOptions, LoadStats};
pub use error::{Error, Result};
pub use note::Note;
pub use paginate::{Page, PageRow, PAGE_SIZE};
pub use pipeline::{compute_view, filter, Subset, Summary, ViewResult};
