//! chunkers-core - Core types and traits for doc-chunkers
//!
//! This crate provides the [`Chunker`] interface shared by every splitter,
//! the error type, configuration, and input detection/loading (raw text,
//! filesystem paths and URLs).

pub mod config;
pub mod error;
pub mod source;
pub mod traits;
pub mod types;

pub use config::*;
pub use error::{ChunkError, Result};
pub use source::InputSource;
pub use traits::*;
pub use types::*;
