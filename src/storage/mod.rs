//! Preview handle storage implementations

pub mod in_memory;

pub use in_memory::{InMemoryPreviewStore, PreviewEntry};
