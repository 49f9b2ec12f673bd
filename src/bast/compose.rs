//! Document composition.
//!
//! Maps the header fields, the validated manifest and the koli aggregate onto
//! an ordered list of abstract layout blocks. The blocks carry every styling
//! and sizing parameter the renderer needs; nothing here touches the PDF
//! layer directly.

use thiserror::Error;

use super::header::HeaderInfo;
use super::manifest::ManifestTable;

/// Fixed display columns of the data table, in their canonical order.
pub const DISPLAY_COLUMNS: [&str; 6] = [
    "NO",
    "DELIVERY ORDER",
    "AIRWAYBILL",
    "STATE",
    "PROVIDER",
    "KOLI QTY",
];

/// Width of each display column as a fraction of the page content width.
const COLUMN_WIDTH_PERCENT: [(&str, f32); 6] = [
    ("NO", 0.05),
    ("DELIVERY ORDER", 0.20),
    ("AIRWAYBILL", 0.25),
    ("STATE", 0.10),
    ("PROVIDER", 0.20),
    ("KOLI QTY", 0.08),
];

/// Width of the bordered TOTAL KOLI box, in page units.
const TOTAL_BOX_WIDTH: f32 = 150.0;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("kolom wajib tidak ditemukan: {0}")]
    MissingColumns(String),
}

/// One abstract block of the document, produced fresh per generation.
#[derive(Debug, Clone)]
pub enum LayoutBlock {
    Title {
        text: String,
        font_size: f32,
        space_after: f32,
    },
    HeaderSummary {
        /// Label/value lines of the left cell, one per line.
        fields: Vec<(String, String)>,
        total_label: String,
        total_value: String,
        box_width: f32,
        label_row_height: f32,
        value_row_height: f32,
    },
    DataTable {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        /// Per-column fraction of the content width.
        width_fractions: Vec<f32>,
        font_size: f32,
    },
    Signature {
        titles: [String; 3],
        roles: [String; 3],
        spacer_rows: usize,
        underscore: String,
        note: String,
        note_font_size: f32,
    },
}

/// Compose the full document as an ordered block list.
///
/// The manifest columns may arrive in any order; they are mapped onto the
/// canonical display order here. A missing display column is fatal.
pub fn compose(
    header: &HeaderInfo,
    table: &ManifestTable,
    total: i64,
) -> Result<Vec<LayoutBlock>, ComposeError> {
    let indices = display_column_indices(table)?;

    let rows: Vec<Vec<String>> = table
        .rows
        .iter()
        .map(|row| {
            indices
                .iter()
                .map(|&idx| row.get(idx).cloned().unwrap_or_default())
                .collect()
        })
        .collect();

    let display_header: Vec<String> =
        DISPLAY_COLUMNS.iter().map(|name| name.to_string()).collect();
    let width_fractions = column_width_fractions(&display_header);

    Ok(vec![
        LayoutBlock::Title {
            text: "BERITA ACARA SERAH TERIMA".to_string(),
            font_size: 18.0,
            space_after: 20.0,
        },
        LayoutBlock::HeaderSummary {
            fields: vec![
                ("Tanggal".to_string(), header.tanggal_display()),
                ("Warehouse".to_string(), header.warehouse.clone()),
                ("Courier Name".to_string(), header.courier.clone()),
                ("Driver Name".to_string(), header.driver.clone()),
                ("Police Number".to_string(), header.police.clone()),
            ],
            total_label: "TOTAL KOLI".to_string(),
            total_value: total.to_string(),
            box_width: TOTAL_BOX_WIDTH,
            label_row_height: 25.0,
            value_row_height: 35.0,
        },
        LayoutBlock::DataTable {
            header: display_header,
            rows,
            width_fractions,
            font_size: 8.0,
        },
        LayoutBlock::Signature {
            titles: [
                "Diperiksa oleh".to_string(),
                "Diserahkan oleh".to_string(),
                "Diterima oleh".to_string(),
            ],
            roles: [
                "(Security WH)".to_string(),
                "(Dispatcher WH)".to_string(),
                "(Driver Courier)".to_string(),
            ],
            spacer_rows: 3,
            underscore: "__________________".to_string(),
            note: "* BAST ini sebagai bukti bahwa paket sudah diserahkan dengan \
                   kondisi baik dan jumlah koli sesuai."
                .to_string(),
            note_font_size: 8.0,
        },
    ])
}

/// Map the canonical display columns onto their positions in the manifest.
fn display_column_indices(table: &ManifestTable) -> Result<Vec<usize>, ComposeError> {
    let mut indices = Vec::with_capacity(DISPLAY_COLUMNS.len());
    let mut missing = Vec::new();

    for name in DISPLAY_COLUMNS {
        match table.column_index(name) {
            Some(idx) => indices.push(idx),
            None => missing.push(name),
        }
    }

    if missing.is_empty() {
        Ok(indices)
    } else {
        Err(ComposeError::MissingColumns(missing.join(", ")))
    }
}

/// Per-column width fractions for a header list. Columns outside the fixed
/// map split the remaining fraction evenly; with the canonical header this
/// branch never runs.
pub fn column_width_fractions(header: &[String]) -> Vec<f32> {
    let lookup = |name: &str| {
        COLUMN_WIDTH_PERCENT
            .iter()
            .find(|(col, _)| *col == name)
            .map(|(_, fraction)| *fraction)
    };

    let defined: f32 = header.iter().filter_map(|name| lookup(name)).sum();
    let undefined = header.iter().filter(|name| lookup(name).is_none()).count();
    let remaining = 1.0 - defined;

    header
        .iter()
        .map(|name| lookup(name).unwrap_or_else(|| remaining / undefined as f32))
        .collect()
}
