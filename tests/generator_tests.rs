use bast_server::bast::compose::DISPLAY_COLUMNS;
use bast_server::bast::generator::{BastGenerator, BastRequest};
use bast_server::bast::header::HeaderInfo;
use bast_server::bast::manifest::ManifestTable;
use bast_server::bast::traits::{Generator, Validator};
use chrono::{NaiveDate, NaiveTime};

fn sample_header() -> HeaderInfo {
    HeaderInfo::new(
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        NaiveTime::from_hms_opt(9, 30, 0).unwrap(),
        "WH1".to_string(),
        "ABC".to_string(),
        "John".to_string(),
        "B1234CD".to_string(),
    )
}

fn table_with_rows(rows: Vec<Vec<&str>>) -> ManifestTable {
    ManifestTable {
        columns: DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: rows
            .into_iter()
            .map(|row| row.into_iter().map(String::from).collect())
            .collect(),
    }
}

fn count_occurrences(haystack: &[u8], needle: &[u8]) -> usize {
    haystack
        .windows(needle.len())
        .filter(|window| *window == needle)
        .count()
}

#[test]
fn test_generate_scenario() {
    let table = table_with_rows(vec![
        vec!["1", "DO-1", "AWB-1", "DKI", "JNE", "3"],
        vec!["2", "DO-2", "AWB-2", "JABAR", "JNT", "bad"],
    ]);
    assert_eq!(table.total_koli(), 3);

    let request = BastRequest {
        header: sample_header(),
        table,
    };
    assert!(request.validate().is_ok());

    let document = BastGenerator::new().generate(request).unwrap();
    assert_eq!(document.filename, "BAST_WH1_ABC_B1234CD_20240115_093000.pdf");
    assert_eq!(document.tanggal, "15/01/2024 09:30:00");
    assert!(document.pdf.starts_with(b"%PDF-"));

    // Content streams are uncompressed, so the drawn strings are visible.
    assert!(count_occurrences(&document.pdf, b"(BERITA ACARA SERAH TERIMA)") == 1);
    assert!(count_occurrences(&document.pdf, b"(TOTAL KOLI)") == 1);
    assert_eq!(count_occurrences(&document.pdf, b"(1/1)"), 1);
}

#[test]
fn test_generate_multi_page_footers() {
    let rows: Vec<Vec<String>> = (1..=150)
        .map(|no| {
            vec![
                no.to_string(),
                format!("DO-{no}"),
                format!("AWB-{no}"),
                "DKI".to_string(),
                "JNE".to_string(),
                "1".to_string(),
            ]
        })
        .collect();
    let table = ManifestTable {
        columns: DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows,
    };

    let request = BastRequest {
        header: sample_header(),
        table,
    };
    let document = BastGenerator::new().generate(request).unwrap();

    // 150 rows paginate to three pages; every page gets exactly one footer
    // and the table header row is redrawn on each of them.
    assert_eq!(count_occurrences(&document.pdf, b"(1/3)"), 1);
    assert_eq!(count_occurrences(&document.pdf, b"(2/3)"), 1);
    assert_eq!(count_occurrences(&document.pdf, b"(3/3)"), 1);
    assert_eq!(count_occurrences(&document.pdf, b"(1/1)"), 0);
    assert_eq!(count_occurrences(&document.pdf, b"(NO)"), 3);
}

#[test]
fn test_request_validation_reports_header_and_schema() {
    let header = HeaderInfo::new(
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
        NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        String::new(),
        "ABC".to_string(),
        "John".to_string(),
        "B1234CD".to_string(),
    );
    let request = BastRequest {
        header,
        table: table_with_rows(vec![vec!["1", "DO-1", "AWB-1", "DKI", "JNE", "3"]]),
    };

    let message = request.validate().unwrap_err();
    assert!(message.contains("Lengkapi header"));
    assert!(message.contains("Warehouse"));
}
