use bast_server::bast::compose::{compose, ComposeError, LayoutBlock, DISPLAY_COLUMNS};
use bast_server::bast::header::HeaderInfo;
use bast_server::bast::manifest::ManifestTable;
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

fn canonical_table() -> ManifestTable {
    ManifestTable {
        columns: DISPLAY_COLUMNS.iter().map(|c| c.to_string()).collect(),
        rows: vec![
            vec!["1", "DO-1", "AWB-1", "DKI", "JNE", "3"]
                .into_iter()
                .map(String::from)
                .collect(),
            vec!["2", "DO-2", "AWB-2", "JABAR", "JNT", ""]
                .into_iter()
                .map(String::from)
                .collect(),
        ],
    }
}

#[test]
fn test_block_order() {
    let blocks = compose(&sample_header(), &canonical_table(), 3).unwrap();
    assert_eq!(blocks.len(), 4);
    assert!(matches!(blocks[0], LayoutBlock::Title { .. }));
    assert!(matches!(blocks[1], LayoutBlock::HeaderSummary { .. }));
    assert!(matches!(blocks[2], LayoutBlock::DataTable { .. }));
    assert!(matches!(blocks[3], LayoutBlock::Signature { .. }));
}

#[test]
fn test_header_summary_carries_form_values() {
    let blocks = compose(&sample_header(), &canonical_table(), 3).unwrap();
    let LayoutBlock::HeaderSummary {
        fields,
        total_value,
        box_width,
        ..
    } = &blocks[1]
    else {
        panic!("expected header summary block");
    };

    assert_eq!(fields[0].0, "Tanggal");
    assert_eq!(fields[0].1, "15/01/2024 09:30:00");
    assert_eq!(fields[1].1, "WH1");
    assert_eq!(total_value, "3");
    assert_eq!(*box_width, 150.0);
}

#[test]
fn test_permuted_columns_render_in_canonical_order() {
    let table = ManifestTable {
        columns: vec![
            "KOLI QTY".to_string(),
            "NO".to_string(),
            "PROVIDER".to_string(),
            "DELIVERY ORDER".to_string(),
            "STATE".to_string(),
            "AIRWAYBILL".to_string(),
        ],
        rows: vec![vec!["3", "1", "JNE", "DO-1", "DKI", "AWB-1"]
            .into_iter()
            .map(String::from)
            .collect()],
    };

    let blocks = compose(&sample_header(), &table, 3).unwrap();
    let LayoutBlock::DataTable { header, rows, .. } = &blocks[2] else {
        panic!("expected data table block");
    };

    assert_eq!(header, &DISPLAY_COLUMNS.map(String::from).to_vec());
    assert_eq!(rows[0], vec!["1", "DO-1", "AWB-1", "DKI", "JNE", "3"]);
}

#[test]
fn test_missing_display_column_is_fatal() {
    let table = ManifestTable {
        columns: vec!["NO".to_string(), "KOLI QTY".to_string()],
        rows: vec![vec!["1".to_string(), "3".to_string()]],
    };

    let err = compose(&sample_header(), &table, 3).unwrap_err();
    let ComposeError::MissingColumns(missing) = err;
    assert!(missing.contains("DELIVERY ORDER"));
    assert!(missing.contains("AIRWAYBILL"));
    assert!(!missing.contains("NO"));
}

#[test]
fn test_blank_cells_stay_empty_strings() {
    let blocks = compose(&sample_header(), &canonical_table(), 3).unwrap();
    let LayoutBlock::DataTable { rows, .. } = &blocks[2] else {
        panic!("expected data table block");
    };
    assert_eq!(rows[1][5], "");
}

#[test]
fn test_data_table_width_fractions() {
    let blocks = compose(&sample_header(), &canonical_table(), 3).unwrap();
    let LayoutBlock::DataTable {
        width_fractions, ..
    } = &blocks[2]
    else {
        panic!("expected data table block");
    };
    assert_eq!(width_fractions, &vec![0.05, 0.20, 0.25, 0.10, 0.20, 0.08]);
}
