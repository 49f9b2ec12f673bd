//! Multipart parsing for the BAST form boundary.
//!
//! The form submits the five header fields plus the manifest file in one
//! `multipart/form-data` payload. Field values are read to completion here;
//! interpretation (defaults, validation) happens downstream.

use actix_multipart::{Field, Multipart};
use actix_web::HttpResponse;
use chrono::{Local, NaiveDate, NaiveTime};
use futures::StreamExt;
use sanitize_filename::sanitize;

use crate::ErrorResponse;

use super::header::HeaderInfo;

#[derive(Debug, thiserror::Error)]
pub enum MultipartParseError {
    #[error("Multipart field error: {0}")]
    FieldError(String),
    #[error("IO error: {0}")]
    IoError(String),
    #[error("Invalid UTF-8 data: {0}")]
    Utf8Error(String),
    #[error("Format tanggal tidak valid: {0}")]
    InvalidDate(String),
    #[error("Format waktu tidak valid: {0}")]
    InvalidTime(String),
}

impl From<MultipartParseError> for HttpResponse {
    fn from(error: MultipartParseError) -> Self {
        match error {
            MultipartParseError::Utf8Error(_)
            | MultipartParseError::InvalidDate(_)
            | MultipartParseError::InvalidTime(_) => {
                HttpResponse::BadRequest().json(ErrorResponse::bad_request(&format!("{}", error)))
            }
            _ => HttpResponse::InternalServerError()
                .json(ErrorResponse::internal_error(&format!("{}", error))),
        }
    }
}

/// Raw values of one submitted BAST form.
#[derive(Debug, Default)]
pub struct BastMultipart {
    pub tanggal: Option<NaiveDate>,
    pub waktu: Option<NaiveTime>,
    pub warehouse: String,
    pub courier: String,
    pub driver: String,
    pub police: String,
    /// Uploaded manifest as (bytes, sanitized original filename).
    pub file: Option<(Vec<u8>, String)>,
}

impl BastMultipart {
    pub async fn parse(mut multipart: Multipart) -> Result<Self, MultipartParseError> {
        let mut parsed = Self::default();

        while let Some(item) = multipart.next().await {
            let mut field = item.map_err(|e| MultipartParseError::FieldError(e.to_string()))?;
            let content_disposition = field.content_disposition().ok_or_else(|| {
                MultipartParseError::FieldError("Content disposition not found".to_string())
            })?;
            let name = content_disposition
                .get_name()
                .ok_or_else(|| MultipartParseError::FieldError("Field name not found".to_string()))?
                .to_string();
            let maybe_filename = content_disposition.get_filename().map(|s| s.to_string());

            if name == "file" {
                let data = read_field_bytes(&mut field).await?;
                let original_filename = match maybe_filename {
                    Some(fname) => sanitize(&fname),
                    None => "manifest.xlsx".to_string(),
                };
                parsed.file = Some((data, original_filename));
                continue;
            }

            let value = read_field_string(&mut field).await?;
            match name.as_str() {
                "tanggal" => {
                    if !value.trim().is_empty() {
                        let date = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
                            .map_err(|_| MultipartParseError::InvalidDate(value.clone()))?;
                        parsed.tanggal = Some(date);
                    }
                }
                "waktu" => {
                    if !value.trim().is_empty() {
                        parsed.waktu = Some(parse_time(value.trim())?);
                    }
                }
                "warehouse" => parsed.warehouse = value,
                "courier" => parsed.courier = value,
                "driver" => parsed.driver = value,
                "police" => parsed.police = value,
                _ => {
                    continue;
                }
            }
        }

        Ok(parsed)
    }

    /// Build the header from the parsed values, applying the form defaults:
    /// today's date and midnight when the inputs were left empty.
    pub fn header_info(&self) -> HeaderInfo {
        let tanggal = self.tanggal.unwrap_or_else(|| Local::now().date_naive());
        let waktu = self.waktu.unwrap_or(NaiveTime::MIN);

        HeaderInfo::new(
            tanggal,
            waktu,
            self.warehouse.clone(),
            self.courier.clone(),
            self.driver.clone(),
            self.police.clone(),
        )
    }
}

/// Accept both `HH:MM:SS` and the `HH:MM` that time inputs usually submit.
fn parse_time(value: &str) -> Result<NaiveTime, MultipartParseError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|_| MultipartParseError::InvalidTime(value.to_string()))
}

async fn read_field_bytes(field: &mut Field) -> Result<Vec<u8>, MultipartParseError> {
    let mut buffer = Vec::new();
    while let Some(chunk) = field.next().await {
        let data_chunk = chunk.map_err(|e| MultipartParseError::IoError(e.to_string()))?;
        buffer.extend_from_slice(&data_chunk);
    }
    Ok(buffer)
}

async fn read_field_string(field: &mut Field) -> Result<String, MultipartParseError> {
    let buffer = read_field_bytes(field).await?;
    String::from_utf8(buffer).map_err(|e| MultipartParseError::Utf8Error(e.to_string()))
}
