//! LSM info block, scan information and channel table tests.

use lsm_reader::{ChannelColor, ErrorKind, LsmFile, MemorySource, TiffError};

use super::test_utils::{DirectoryBuilder, LsmBuilder, LsmInfoBuilder};

fn open_with_info(info: LsmInfoBuilder) -> Result<LsmFile<MemorySource>, TiffError> {
    let bytes = LsmBuilder::new()
        .add_directory(
            DirectoryBuilder::image(4, 2, 1, 1)
                .strips(vec![vec![0; 8]])
                .lsm_info(info),
        )
        .add_directory(DirectoryBuilder::image(2, 1, 1, 1).thumbnail())
        .build();
    LsmFile::open(MemorySource::new(bytes))
}

/// Summary lines of directory `index`; directories are separated by a blank line.
fn summary_section(summary: &str, index: usize) -> &str {
    summary.split("\n\n").nth(index).unwrap_or_default()
}

fn two_channels() -> LsmInfoBuilder {
    LsmInfoBuilder::new(4, 2, 1, 2)
        .pixel_size(0.2e-6, 0.2e-6, 1.0e-6)
        .scan_information(vec![0x1000_0000, 0x2000_0000])
        .channels(
            vec![0x0000_FF00, 0x0000_00FF],
            vec![b"ChS1\0".to_vec(), b"Ch2-T2\0".to_vec()],
        )
}

// =============================================================================
// Info Block
// =============================================================================

#[test]
fn test_info_block_is_parsed() {
    let file = open_with_info(two_channels()).unwrap();
    let info = file.lsm_info().unwrap();

    assert_eq!(info.version, 0x0400);
    assert_eq!(info.length, 384);
    assert_eq!(info.dimensions.x, 4);
    assert_eq!(info.dimensions.y, 2);
    assert_eq!(info.dimensions.z, 1);
    assert_eq!(info.dimensions.channels, 2);
    assert_eq!(info.dimensions.time, 1);
    assert_eq!(info.intensity_data_type, 1);
    assert_eq!(info.pixel_size, [0.2e-6, 0.2e-6, 1.0e-6]);
    assert_eq!(info.scan_information, vec![0x1000_0000, 0x2000_0000]);

    assert!(file.directories()[1].lsm_info.is_none());
}

#[test]
fn test_older_info_version_fails_open() {
    let mut info = two_channels();
    info.version = 0x0030;
    let err = open_with_info(info).unwrap_err();
    assert!(matches!(err, TiffError::InvalidInfoVersion(0x0030)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_bad_info_code_fails_open() {
    let mut info = two_channels();
    info.code = 0x4C49;
    let err = open_with_info(info).unwrap_err();
    assert!(matches!(err, TiffError::InvalidInfoCode(0x4C49)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_unknown_info_version_fails_open() {
    let mut info = two_channels();
    info.version = 0x0500;
    let err = open_with_info(info).unwrap_err();
    assert!(matches!(err, TiffError::InvalidInfoVersion(0x0500)));
}

#[test]
fn test_length_mismatch_fails_open() {
    let mut info = two_channels();
    info.field_length = Some(400);
    let err = open_with_info(info).unwrap_err();
    assert!(matches!(
        err,
        TiffError::InfoLengthMismatch {
            declared: 384,
            field: 400
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_field_shorter_than_header_fails_open() {
    let mut info = two_channels();
    info.length = 100;
    let err = open_with_info(info).unwrap_err();
    assert!(matches!(err, TiffError::InfoTooShort { .. }));
}

#[test]
fn test_info_without_optional_blocks() {
    let file = open_with_info(LsmInfoBuilder::new(4, 2, 1, 1)).unwrap();
    let info = file.lsm_info().unwrap();

    assert_eq!(info.scan_information_offset, 0);
    assert!(info.scan_information.is_empty());
    assert!(info.channels.is_none());
    // Zero colors and zero names still agree
    assert!(summary_section(&file.summary(), 0).ends_with("  Colors:"));
}

// =============================================================================
// Channel Table
// =============================================================================

#[test]
fn test_channel_names_and_colors() {
    let file = open_with_info(two_channels()).unwrap();
    let channels = file.lsm_info().unwrap().channels.as_ref().unwrap();

    assert_eq!(
        channels.colors,
        vec![ChannelColor(0x0000_FF00), ChannelColor(0x0000_00FF)]
    );
    assert_eq!(channels.names, vec!["ChS1".to_string(), "Ch2-T2".to_string()]);
}

#[test]
fn test_summary_lists_colors() {
    let file = open_with_info(two_channels()).unwrap();
    let summary = file.summary();

    assert!(summary.contains("  Data type: 1\n"));
    assert!(summary.contains("  Colors:\n    0x0000FF00 (ChS1)\n    0x000000FF (Ch2-T2)\n"));
}

#[test]
fn test_summary_skips_colors_when_counts_differ() {
    let info = LsmInfoBuilder::new(4, 2, 1, 2).channels(vec![1, 2], vec![b"only".to_vec()]);
    let file = open_with_info(info).unwrap();
    let summary = file.summary();
    assert!(!summary_section(&summary, 0).contains("Colors"));
    // The thumbnail has no channel table
    assert!(summary_section(&summary, 1).ends_with("  Colors:"));
}

#[test]
fn test_name_truncated_at_nul() {
    let info = LsmInfoBuilder::new(4, 2, 1, 1).channels(vec![1], vec![b"Ch1\0garbage".to_vec()]);
    let file = open_with_info(info).unwrap();
    let channels = file.lsm_info().unwrap().channels.as_ref().unwrap();
    assert_eq!(channels.names, vec!["Ch1".to_string()]);
}

#[test]
fn test_empty_name() {
    let info = LsmInfoBuilder::new(4, 2, 1, 2).channels(vec![1, 2], vec![Vec::new(), b"B".to_vec()]);
    let file = open_with_info(info).unwrap();
    let channels = file.lsm_info().unwrap().channels.as_ref().unwrap();
    assert_eq!(channels.names, vec![String::new(), "B".to_string()]);
}

#[test]
fn test_name_at_limit_accepted() {
    let info = LsmInfoBuilder::new(4, 2, 1, 1).channels(vec![1], vec![vec![b'x'; 1024]]);
    let file = open_with_info(info).unwrap();
    let channels = file.lsm_info().unwrap().channels.as_ref().unwrap();
    assert_eq!(channels.names[0].len(), 1024);
}

#[test]
fn test_name_over_limit_fails_open() {
    let info = LsmInfoBuilder::new(4, 2, 1, 2)
        .channels(vec![1, 2], vec![b"ok".to_vec(), vec![b'x'; 1025]]);
    let err = open_with_info(info).unwrap_err();
    assert!(matches!(
        err,
        TiffError::NameTooLong {
            index: 1,
            length: 1025,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_info_serializes_to_json() {
    let file = open_with_info(two_channels()).unwrap();
    let json = serde_json::to_value(file.directories()).unwrap();

    let info = &json[0]["lsm_info"];
    assert_eq!(info["dimensions"]["channels"], 2);
    assert_eq!(info["channels"]["names"][1], "Ch2-T2");
    assert_eq!(info["channels"]["colors"][0], 0xFF00);
}
