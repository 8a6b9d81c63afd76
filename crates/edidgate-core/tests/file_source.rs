use std::fs;

use edidgate_core::envelope::layout;
use edidgate_core::{SourceError, decode_edid_file, read_edid_file};
use tempfile::TempDir;

fn base_block() -> Vec<u8> {
    let mut page = vec![0u8; layout::EDID_PAGE_SIZE];
    page[layout::HEADER_RANGE].copy_from_slice(layout::EDID_HEADER);
    let sum = page.iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    page[layout::EDID_PAGE_SIZE - 1] = 0u8.wrapping_sub(sum);
    page
}

fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .map(|row| {
            row.iter()
                .map(|b| format!("{b:02x}"))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn binary_and_hex_dumps_read_the_same() {
    let temp = TempDir::new().expect("tempdir");
    let block = base_block();
    let bin = temp.path().join("monitor.bin");
    let txt = temp.path().join("monitor.txt");
    fs::write(&bin, &block).unwrap();
    fs::write(&txt, hex_dump(&block)).unwrap();

    assert_eq!(read_edid_file(&bin).unwrap(), block);
    assert_eq!(read_edid_file(&txt).unwrap(), block);
}

#[test]
fn missing_file_is_io_error() {
    let temp = TempDir::new().expect("tempdir");
    let err = read_edid_file(&temp.path().join("missing.bin")).unwrap_err();
    assert!(matches!(err, SourceError::Io(_)));
}

#[test]
fn decode_file_reports_parsed_descriptor() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("monitor.bin");
    fs::write(&path, base_block()).unwrap();

    let report = decode_edid_file(&path).unwrap();
    assert_eq!(report.status, 0);
    assert_eq!(report.outcome, "parsed");
    assert_eq!(report.input.bytes, 128);
    assert_eq!(report.num_blocks, 1);
}

#[test]
fn decode_file_reports_bad_extension_checksum() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("monitor.bin");
    let mut edid = base_block();
    edid[layout::EXTENSION_COUNT_OFFSET] = 1;
    edid[layout::EDID_PAGE_SIZE - 1] = edid[layout::EDID_PAGE_SIZE - 1].wrapping_sub(1);
    let mut ext = vec![0u8; layout::EDID_PAGE_SIZE];
    ext[0] = 0x02;
    edid.extend_from_slice(&ext);
    fs::write(&path, &edid).unwrap();

    let report = decode_edid_file(&path).unwrap();
    assert_eq!(report.status, edidgate_core::STATUS_CONFORMITY_FAILURES);
    assert_eq!(report.num_blocks, 2);
    assert_eq!(report.failures, 1);
    assert_eq!(report.blocks.len(), 1);
    assert_eq!(report.blocks[0].block, 1);
}
