//! Block layout and pagination.
//!
//! Walks the composed layout blocks top-down on an A4 page, breaking the
//! data table across pages with its header row repeated, and keeping the
//! bottom band clear for the page-number footer.

use crate::bast::compose::LayoutBlock;

use super::canvas::{text_width, Font, PageCanvas};
use super::numbered::NumberedDocument;

pub const A4_WIDTH: f32 = 595.28;
pub const A4_HEIGHT: f32 = 841.89;
/// Half-inch margins on all sides.
pub const PAGE_MARGIN: f32 = 36.0;

/// Band above the bottom margin reserved for the footer.
const FOOTER_CLEARANCE: f32 = 18.0;

const LINE_HEIGHT: f32 = 14.0;
const BODY_FONT_SIZE: f32 = 10.0;
const TABLE_ROW_HEIGHT: f32 = 12.0;
const SIGNATURE_ROW_HEIGHT: f32 = 16.0;

const DARK_GREY: (f32, f32, f32) = (0.66, 0.66, 0.66);
const WHITESMOKE: (f32, f32, f32) = (0.96, 0.96, 0.96);

/// Usable width between the margins.
pub const fn content_width() -> f32 {
    A4_WIDTH - 2.0 * PAGE_MARGIN
}

/// Render the block list to paginated PDF bytes.
pub fn render(blocks: &[LayoutBlock]) -> Vec<u8> {
    let mut doc = NumberedDocument::new(A4_WIDTH, A4_HEIGHT);
    let mut y = A4_HEIGHT - PAGE_MARGIN;

    for block in blocks {
        match block {
            LayoutBlock::Title {
                text,
                font_size,
                space_after,
            } => {
                y -= font_size;
                doc.canvas()
                    .text_centered(A4_WIDTH / 2.0, y, Font::HelveticaBold, *font_size, text);
                y -= space_after;
            }
            LayoutBlock::HeaderSummary {
                fields,
                total_label,
                total_value,
                box_width,
                label_row_height,
                value_row_height,
            } => {
                draw_header_summary(
                    doc.canvas(),
                    &mut y,
                    fields,
                    total_label,
                    total_value,
                    *box_width,
                    *label_row_height,
                    *value_row_height,
                );
            }
            LayoutBlock::DataTable {
                header,
                rows,
                width_fractions,
                font_size,
            } => {
                draw_data_table(&mut doc, &mut y, header, rows, width_fractions, *font_size);
            }
            LayoutBlock::Signature {
                titles,
                roles,
                spacer_rows,
                underscore,
                note,
                note_font_size,
            } => {
                draw_signature(
                    &mut doc,
                    &mut y,
                    titles,
                    roles,
                    *spacer_rows,
                    underscore,
                    note,
                    *note_font_size,
                );
            }
        }
    }

    doc.finish()
}

/// Break to a fresh page when `needed` points no longer fit above the
/// footer band.
fn ensure_room(doc: &mut NumberedDocument, y: &mut f32, needed: f32) {
    if *y - needed < PAGE_MARGIN + FOOTER_CLEARANCE {
        doc.end_page();
        *y = A4_HEIGHT - PAGE_MARGIN;
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_header_summary(
    canvas: &mut PageCanvas,
    y: &mut f32,
    fields: &[(String, String)],
    total_label: &str,
    total_value: &str,
    box_width: f32,
    label_row_height: f32,
    value_row_height: f32,
) {
    let top = *y;
    let left_x = PAGE_MARGIN;

    // Left cell: one label/value pair per line, bold labels.
    let mut line_y = top - BODY_FONT_SIZE;
    for (label, value) in fields {
        let label_text = format!("{label}:");
        canvas.text(left_x, line_y, Font::HelveticaBold, BODY_FONT_SIZE, &label_text);
        canvas.text(
            left_x + text_width(&label_text, BODY_FONT_SIZE) + 4.0,
            line_y,
            Font::Helvetica,
            BODY_FONT_SIZE,
            value,
        );
        line_y -= LINE_HEIGHT;
    }

    // Right cell: the bordered TOTAL KOLI box.
    let box_x = A4_WIDTH - PAGE_MARGIN - box_width;
    let box_height = label_row_height + value_row_height;
    let box_cx = box_x + box_width / 2.0;

    canvas.rect_fill(
        box_x,
        top - label_row_height,
        box_width,
        label_row_height,
        WHITESMOKE,
    );
    canvas.rect_stroke(box_x, top - box_height, box_width, box_height, 2.0);

    let label_size = 12.0;
    let value_size = 20.0;
    canvas.text_centered(
        box_cx,
        top - label_row_height + (label_row_height - label_size) / 2.0,
        Font::HelveticaBold,
        label_size,
        total_label,
    );
    canvas.text_centered(
        box_cx,
        top - box_height + (value_row_height - value_size) / 2.0,
        Font::HelveticaBold,
        value_size,
        total_value,
    );

    let block_height = (fields.len() as f32 * LINE_HEIGHT).max(box_height);
    *y -= block_height + 10.0;
}

fn draw_data_table(
    doc: &mut NumberedDocument,
    y: &mut f32,
    header: &[String],
    rows: &[Vec<String>],
    width_fractions: &[f32],
    font_size: f32,
) {
    let widths: Vec<f32> = width_fractions
        .iter()
        .map(|fraction| fraction * content_width())
        .collect();

    ensure_room(doc, y, 2.0 * TABLE_ROW_HEIGHT);
    draw_table_header(doc.canvas(), *y, header, &widths, font_size);
    *y -= TABLE_ROW_HEIGHT;

    for row in rows {
        if *y - TABLE_ROW_HEIGHT < PAGE_MARGIN + FOOTER_CLEARANCE {
            doc.end_page();
            *y = A4_HEIGHT - PAGE_MARGIN;
            // The header row repeats on every page the table spans.
            draw_table_header(doc.canvas(), *y, header, &widths, font_size);
            *y -= TABLE_ROW_HEIGHT;
        }

        let canvas = doc.canvas();
        let mut x = PAGE_MARGIN;
        for (cell, width) in row.iter().zip(&widths) {
            canvas.text_centered(
                x + width / 2.0,
                *y - TABLE_ROW_HEIGHT + (TABLE_ROW_HEIGHT - font_size) / 2.0,
                Font::Helvetica,
                font_size,
                &fit_text(cell, *width, font_size),
            );
            x += width;
        }
        draw_grid_row(canvas, *y, &widths);
        *y -= TABLE_ROW_HEIGHT;
    }

    *y -= 15.0;
}

fn draw_table_header(
    canvas: &mut PageCanvas,
    top: f32,
    header: &[String],
    widths: &[f32],
    font_size: f32,
) {
    let table_width: f32 = widths.iter().sum();
    canvas.rect_fill(
        PAGE_MARGIN,
        top - TABLE_ROW_HEIGHT,
        table_width,
        TABLE_ROW_HEIGHT,
        DARK_GREY,
    );

    canvas.set_fill_rgb(WHITESMOKE.0, WHITESMOKE.1, WHITESMOKE.2);
    let mut x = PAGE_MARGIN;
    for (name, width) in header.iter().zip(widths) {
        canvas.text_centered(
            x + width / 2.0,
            top - TABLE_ROW_HEIGHT + (TABLE_ROW_HEIGHT - font_size) / 2.0,
            Font::Helvetica,
            font_size,
            &fit_text(name, *width, font_size),
        );
        x += width;
    }
    canvas.set_fill_rgb(0.0, 0.0, 0.0);

    draw_grid_row(canvas, top, widths);
}

/// Thin grid lines around each cell of one table row.
fn draw_grid_row(canvas: &mut PageCanvas, top: f32, widths: &[f32]) {
    let mut x = PAGE_MARGIN;
    for width in widths {
        canvas.rect_stroke(x, top - TABLE_ROW_HEIGHT, *width, TABLE_ROW_HEIGHT, 0.3);
        x += width;
    }
}

/// Truncate a cell value to the column width, keeping 1pt padding each side.
fn fit_text(text: &str, max_width: f32, font_size: f32) -> String {
    let available = max_width - 2.0;
    if text_width(text, font_size) <= available {
        return text.to_string();
    }

    let char_w = text_width("0", font_size);
    let max_chars = (available / char_w).max(0.0) as usize;
    text.chars().take(max_chars).collect()
}

#[allow(clippy::too_many_arguments)]
fn draw_signature(
    doc: &mut NumberedDocument,
    y: &mut f32,
    titles: &[String; 3],
    roles: &[String; 3],
    spacer_rows: usize,
    underscore: &str,
    note: &str,
    note_font_size: f32,
) {
    // Title, spacers, underscores, roles, plus the note line. The block is
    // kept together: it moves to a fresh page when it does not fit.
    let rows = 3 + spacer_rows;
    let height = rows as f32 * SIGNATURE_ROW_HEIGHT + LINE_HEIGHT;
    ensure_room(doc, y, height);

    let canvas = doc.canvas();
    let col_width = content_width() / 3.0;
    let col_center =
        |col: usize| PAGE_MARGIN + col_width * (col as f32 + 0.5);

    for (col, title) in titles.iter().enumerate() {
        canvas.text_centered(
            col_center(col),
            *y - BODY_FONT_SIZE,
            Font::Helvetica,
            BODY_FONT_SIZE,
            title,
        );
    }
    *y -= SIGNATURE_ROW_HEIGHT * (1 + spacer_rows) as f32;

    for col in 0..3 {
        canvas.text_centered(
            col_center(col),
            *y - BODY_FONT_SIZE,
            Font::Helvetica,
            BODY_FONT_SIZE,
            underscore,
        );
    }
    *y -= SIGNATURE_ROW_HEIGHT;

    for (col, role) in roles.iter().enumerate() {
        canvas.text_centered(
            col_center(col),
            *y - BODY_FONT_SIZE,
            Font::Helvetica,
            BODY_FONT_SIZE,
            role,
        );
    }
    *y -= SIGNATURE_ROW_HEIGHT;

    canvas.text_centered(
        A4_WIDTH / 2.0,
        *y - note_font_size,
        Font::Helvetica,
        note_font_size,
        note,
    );
    *y -= LINE_HEIGHT;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_width() {
        assert!((content_width() - 523.28).abs() < 1e-3);
    }

    #[test]
    fn test_fit_text_truncates_long_values() {
        assert_eq!(fit_text("AB", 100.0, 8.0), "AB");
        let narrow = fit_text("ABCDEFGHIJ", 20.0, 8.0);
        assert!(narrow.len() < 10);
    }
}
