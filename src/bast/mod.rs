//! BAST module - business logic for the Berita Acara Serah Terima generator.
//!
//! The pipeline runs in a fixed order:
//! - `header` - the five header fields and the combined timestamp
//! - `manifest` - tabular file loading (CSV / Excel) and the koli aggregate
//! - `validation` - schema checks on the loaded manifest
//! - `compose` - maps header, table and total onto abstract layout blocks
//! - `generator` - renders the blocks into the final PDF document
//! - `multipart` / `handlers` - the HTTP upload boundary

pub mod compose;
pub mod generator;
pub mod handlers;
pub mod header;
pub mod manifest;
pub mod multipart;
pub mod traits;
pub mod validation;

pub use compose::{compose, ComposeError, LayoutBlock, DISPLAY_COLUMNS};
pub use generator::{BastGenerator, BastRequest};
pub use header::HeaderInfo;
pub use manifest::{FileKind, ManifestError, ManifestTable};
pub use traits::{Generator, Validator};
pub use validation::{validate_manifest, REQUIRED_QTY_COLUMN};

use thiserror::Error;

/// Errors that can occur during document generation.
#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("gagal menyusun dokumen: {0}")]
    Compose(#[from] ComposeError),
}

/// Result of a successful document generation.
#[derive(Debug)]
pub struct GeneratedDocument {
    pub filename: String,
    pub pdf: Vec<u8>,
    pub tanggal: String,
}
