//! HTTP handlers for the BAST form boundary.
//!
//! Two actions share one pipeline: parse the multipart form, check the
//! header, load the manifest, validate the schema. `preview` then returns
//! the parsed table for display, `generate` renders and streams the PDF.

use actix_multipart::Multipart;
use actix_web::{http::header, HttpResponse, Responder};
use log::{error, info};
use sanitize_filename::sanitize;
use serde::Serialize;
use utoipa::ToSchema;

use crate::ErrorResponse;

use super::generator::{BastGenerator, BastRequest};
use super::header::HeaderInfo;
use super::manifest::{FileKind, ManifestTable};
use super::multipart::BastMultipart;
use super::traits::Generator;
use super::validation::validate_manifest;

/// Form fields of one BAST submission (documentation schema).
#[derive(Debug, ToSchema)]
pub struct BastFormRequest {
    #[schema(example = "2024-01-15")]
    pub tanggal: String,
    #[schema(example = "09:30:00")]
    pub waktu: String,
    #[schema(example = "WH Cakung")]
    pub warehouse: String,
    #[schema(example = "JNE")]
    pub courier: String,
    #[schema(example = "Budi Santoso")]
    pub driver: String,
    #[schema(example = "B 1234 CD")]
    pub police: String,
    /// Manifest file (CSV, XLSX or XLS).
    #[schema(value_type = String, format = Binary)]
    pub file: String,
}

/// Parsed manifest returned for preview before generating the document.
#[derive(Debug, Serialize, ToSchema)]
pub struct ManifestPreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    #[schema(example = 42)]
    pub total_koli: i64,
}

/// Schema problems found in an uploaded manifest, reported together.
#[derive(Debug, Serialize, ToSchema)]
pub struct ValidationFailure {
    #[schema(example = json!(["Kolom KOLI QTY wajib ada."]))]
    pub errors: Vec<String>,
}

/// Shared upload pipeline. Any failure is terminal for the request and is
/// returned as the response to send.
async fn load_validated(
    payload: Multipart,
) -> Result<(HeaderInfo, ManifestTable), HttpResponse> {
    let parsed = match BastMultipart::parse(payload).await {
        Ok(parsed) => parsed,
        Err(e) => {
            error!("Failed to parse BAST multipart payload: {}", e);
            return Err(e.into());
        }
    };

    let header = parsed.header_info();
    let missing = header.missing_fields();
    if !missing.is_empty() {
        return Err(HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
            "Lengkapi header: {}",
            missing.join(", ")
        ))));
    }

    let Some((bytes, filename)) = parsed.file else {
        return Err(HttpResponse::BadRequest()
            .json(ErrorResponse::bad_request("Tidak ada file yang diunggah.")));
    };

    let kind = FileKind::from_filename(&filename);
    let table = match ManifestTable::from_bytes(&bytes, kind) {
        Ok(table) => table,
        Err(e) => {
            error!("Failed to read manifest '{}': {}", filename, e);
            return Err(HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!(
                "Gagal membaca file: {}",
                e
            ))));
        }
    };

    let (valid, errors) = validate_manifest(Some(&table));
    if !valid {
        return Err(HttpResponse::UnprocessableEntity().json(ValidationFailure { errors }));
    }

    Ok((header, table))
}

#[utoipa::path(
    context_path = "/api",
    tag = "BAST Service",
    post,
    path = "/bast/preview",
    request_body(content = inline(BastFormRequest), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Parsed manifest with the koli total", body = ManifestPreview),
        (status = 400, description = "Incomplete header or unreadable file", body = ErrorResponse),
        (status = 422, description = "Manifest failed schema validation", body = ValidationFailure)
    )
)]
pub async fn preview_manifest(payload: Multipart) -> impl Responder {
    let (_, table) = match load_validated(payload).await {
        Ok(result) => result,
        Err(response) => return response,
    };

    info!("Manifest preview: {} baris", table.row_count());
    let total_koli = table.total_koli();
    HttpResponse::Ok().json(ManifestPreview {
        columns: table.columns,
        rows: table.rows,
        total_koli,
    })
}

#[utoipa::path(
    context_path = "/api",
    tag = "BAST Service",
    post,
    path = "/bast/generate",
    request_body(content = inline(BastFormRequest), content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Generated BAST document", body = Vec<u8>, content_type = "application/pdf"),
        (status = 400, description = "Incomplete header or unreadable file", body = ErrorResponse),
        (status = 422, description = "Manifest failed schema validation", body = ValidationFailure),
        (status = 500, description = "Document rendering failed", body = ErrorResponse)
    )
)]
pub async fn generate_bast(payload: Multipart) -> impl Responder {
    let (header, table) = match load_validated(payload).await {
        Ok(result) => result,
        Err(response) => return response,
    };

    let request = BastRequest { header, table };
    let document = match BastGenerator::new().generate(request) {
        Ok(document) => document,
        Err(e) => {
            error!("Failed to generate BAST document: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("{}", e)));
        }
    };

    info!(
        "Generated BAST document '{}' ({} bytes)",
        document.filename,
        document.pdf.len()
    );

    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", sanitize(&document.filename)),
        ))
        .body(document.pdf)
}

/// Configure BAST routes.
pub fn config(cfg: &mut actix_web::web::ServiceConfig) {
    use actix_web::web;

    cfg.service(web::resource("/bast/preview").route(web::post().to(preview_manifest)))
        .service(web::resource("/bast/generate").route(web::post().to(generate_bast)));
}
