//! Collaborator contracts consumed by the transform pipeline.
//!
//! # Traits
//!
//! - [`DatasetRegistry`]: dataset lookup, hierarchy navigation, publish,
//!   change notification
//! - [`SourceSelector`]: synchronous single-choice source selection

mod dataset_registry;
mod source_selector;

pub use dataset_registry::DatasetRegistry;
pub use source_selector::{SourceChoice, SourceSelector};
