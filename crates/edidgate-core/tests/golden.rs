use std::fs;
use std::path::Path;

use edidgate_core::{Report, decode_edid_file};

fn load_expected_report(dir: &str) -> Report {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let expected_path = root.join(dir).join("expected_report.json");

    let expected_json = fs::read_to_string(&expected_path).expect("read expected_report.json");
    serde_json::from_str(&expected_json).expect("parse expected report")
}

fn run_golden(dir: &str) {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("..").join("..");
    let input = root.join(dir).join("input.txt");
    let expected = load_expected_report(dir);

    let mut actual = decode_edid_file(&input).expect("decode edid");
    actual.generated_at = expected.generated_at.clone();
    actual.input.path = expected.input.path.clone();

    let actual_value = serde_json::to_value(actual).expect("serialize actual");
    let expected_value = serde_json::to_value(expected).expect("serialize expected");

    assert_eq!(actual_value, expected_value, "golden mismatch in {dir}");
}

#[test]
fn golden_base_block() {
    run_golden("tests/golden/base_block");
}

#[test]
fn golden_extension_bad_checksum() {
    run_golden("tests/golden/extension_bad_checksum");
}

#[test]
fn golden_extension_bad_checksum_blames_extension() {
    let report = load_expected_report("tests/golden/extension_bad_checksum");
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.blocks[0].block, 1);
    assert!(report.blocks[0].warnings.is_empty());
}

#[test]
fn golden_trailing_byte() {
    run_golden("tests/golden/trailing_byte");
}

#[test]
fn golden_short_dump() {
    run_golden("tests/golden/short_dump");
}

#[test]
fn golden_no_header() {
    run_golden("tests/golden/no_header");
}

#[test]
fn golden_rejections_record_nothing() {
    for dir in ["tests/golden/short_dump", "tests/golden/no_header"] {
        let report = load_expected_report(dir);
        assert_eq!(report.status, edidgate_core::STATUS_REJECTED);
        assert_eq!(report.edid_size, 0);
        assert_eq!(report.num_blocks, 0);
        assert!(report.blocks.is_empty());
    }
}
