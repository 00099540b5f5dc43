//! Welldoc Domain Layer
//!
//! This crate contains the data model shared by every other welldoc crate and the
//! trait interfaces for the external collaborators (document conversion, chunk
//! index, text generation).
//!
//! ## Key Concepts
//!
//! - **Document**: one physical report file with its resolved metadata record
//! - **TocEntry**: a table-of-contents line (numeral, title, page, category)
//! - **Category**: a label from the fixed section taxonomy
//! - **Well**: the logical unit owning 1..N candidate documents
//! - **Chunk**: a retrievable text or table fragment tagged with provenance
//!
//! ## Architecture
//!
//! - Pure data and value logic only
//! - Infrastructure implementations (stores, generators, converters) live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod category;
pub mod chunk;
pub mod document;
pub mod keyword;
pub mod provenance;
pub mod request;
pub mod toc;
pub mod traits;
pub mod well;

// Re-exports for convenience
pub use category::Category;
pub use chunk::{Chunk, ChunkType};
pub use document::{Document, ParseMethod};
pub use provenance::Provenance;
pub use request::{DocumentScope, SummaryRequest};
pub use toc::TocEntry;
pub use well::Well;
