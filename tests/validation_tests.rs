use bast_server::bast::manifest::{FileKind, ManifestTable};
use bast_server::bast::validation::validate_manifest;

#[test]
fn test_header_only_file_is_empty() {
    let csv = b"NO,DELIVERY ORDER,AIRWAYBILL,STATE,PROVIDER,KOLI QTY\n";
    let table = ManifestTable::from_bytes(csv, FileKind::Csv).unwrap();

    let (valid, errors) = validate_manifest(Some(&table));
    assert!(!valid);
    assert_eq!(errors, vec!["File kosong.".to_string()]);
}

#[test]
fn test_empty_table_skips_column_check() {
    // Missing KOLI QTY as well, but the emptiness check stops first.
    let csv = b"NO,AIRWAYBILL\n";
    let table = ManifestTable::from_bytes(csv, FileKind::Csv).unwrap();

    let (valid, errors) = validate_manifest(Some(&table));
    assert!(!valid);
    assert_eq!(errors, vec!["File kosong.".to_string()]);
}

#[test]
fn test_missing_qty_column_is_reported() {
    let csv = b"NO,AIRWAYBILL\n1,AWB-1\n";
    let table = ManifestTable::from_bytes(csv, FileKind::Csv).unwrap();

    let (valid, errors) = validate_manifest(Some(&table));
    assert!(!valid);
    assert_eq!(errors, vec!["Kolom KOLI QTY wajib ada.".to_string()]);
}

#[test]
fn test_valid_manifest_passes() {
    let csv = b"NO,DELIVERY ORDER,AIRWAYBILL,STATE,PROVIDER,KOLI QTY\n1,DO-1,AWB-1,DKI,JNE,3\n";
    let table = ManifestTable::from_bytes(csv, FileKind::Csv).unwrap();

    let (valid, errors) = validate_manifest(Some(&table));
    assert!(valid);
    assert!(errors.is_empty());
}
