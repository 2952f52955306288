//! In-memory collaborator implementations.
//!
//! [`InMemoryRegistry`] and [`FixedSelector`] implement the collaborator
//! traits without any host framework, for unit tests, integration tests,
//! and fully in-process embeddings.

mod registry_stub;
mod selector_stub;

pub use registry_stub::{DataEvent, InMemoryRegistry};
pub use selector_stub::FixedSelector;
