//! BAST document generator.
//!
//! Wires composition and rendering into the generator interface: one request
//! in, one finished PDF document out.

use crate::pdf;

use super::compose::compose;
use super::header::HeaderInfo;
use super::manifest::ManifestTable;
use super::traits::{Generator, Validator};
use super::validation::validate_manifest;
use super::{GeneratedDocument, GeneratorError};

/// Request untuk membuat dokumen BAST.
#[derive(Debug)]
pub struct BastRequest {
    pub header: HeaderInfo,
    pub table: ManifestTable,
}

impl Validator for BastRequest {
    /// Validate header completeness and the manifest schema, returning every
    /// problem in one message.
    fn validate(&self) -> Result<(), String> {
        let missing = self.header.missing_fields();
        if !missing.is_empty() {
            return Err(format!("Lengkapi header: {}", missing.join(", ")));
        }

        let (valid, errors) = validate_manifest(Some(&self.table));
        if !valid {
            return Err(errors.join("\n"));
        }

        Ok(())
    }
}

/// Generator untuk dokumen Berita Acara Serah Terima.
pub struct BastGenerator;

impl BastGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BastGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<BastRequest> for BastGenerator {
    /// Generate the document from the request data. The koli total is
    /// recomputed from the table here, never carried in separately.
    fn generate(&self, request: BastRequest) -> Result<GeneratedDocument, GeneratorError> {
        let total = request.table.total_koli();
        let blocks = compose(&request.header, &request.table, total)?;
        let pdf = pdf::layout::render(&blocks);

        Ok(GeneratedDocument {
            filename: request.header.filename(),
            pdf,
            tanggal: request.header.tanggal_display(),
        })
    }
}
