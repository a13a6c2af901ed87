//! Container-level tests: header validation and the directory chain.

use lsm_reader::{ByteSource, ErrorKind, LsmFile, MemorySource, TiffError};

use super::test_utils::{
    temp_path, DirectoryBuilder, LsmBuilder, TAG_BITS_PER_SAMPLE, TAG_IMAGE_LENGTH,
    TAG_IMAGE_WIDTH, TAG_SAMPLES_PER_PIXEL, TYPE_LONG, TYPE_SHORT,
};

fn open(bytes: Vec<u8>) -> Result<LsmFile<MemorySource>, TiffError> {
    LsmFile::open(MemorySource::new(bytes))
}

/// A 4x2 uncompressed plane holding the bytes 1..=8 in one strip.
fn minimal_file() -> Vec<u8> {
    LsmBuilder::new()
        .add_directory(DirectoryBuilder::image(4, 2, 1, 1).strips(vec![(1..=8).collect()]))
        .build()
}

// =============================================================================
// Header
// =============================================================================

#[test]
fn test_minimal_file() {
    let file = open(minimal_file()).unwrap();

    assert_eq!(file.header().first_ifd_offset, 8);
    assert_eq!(file.directories().len(), 1);

    let dir = file.directory(0).unwrap();
    assert_eq!(dir.width, 4);
    assert_eq!(dir.height, 2);
    assert_eq!(dir.bits_per_sample, vec![8]);
    assert_eq!(dir.compression, 1);
    assert_eq!(dir.strip_count(), 1);
    assert_eq!(dir.strip_byte_counts, vec![8]);
    assert!(dir.lsm_info.is_none());
}

#[test]
fn test_big_endian_magic_rejected() {
    let err = open(LsmBuilder::new().with_magic(*b"MM").build()).unwrap_err();
    assert!(matches!(err, TiffError::InvalidMagic(0x4D4D)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_wrong_version_rejected() {
    let err = open(LsmBuilder::new().with_version(43).build()).unwrap_err();
    assert!(matches!(err, TiffError::InvalidVersion(43)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_truncated_header() {
    let mut bytes = minimal_file();
    bytes.truncate(4);
    let err = open(bytes).unwrap_err();
    assert!(matches!(
        err,
        TiffError::FileTooSmall {
            required: 6,
            actual: 4
        }
    ));
}

// =============================================================================
// Directory Chain
// =============================================================================

#[test]
fn test_zero_directories() {
    let file = open(LsmBuilder::new().build()).unwrap();
    assert!(file.directories().is_empty());
    assert!(file.summary().is_empty());
}

#[test]
fn test_out_of_line_bits_per_sample() {
    let bits: Vec<u8> = [8u16, 8, 8].iter().flat_map(|b| b.to_le_bytes()).collect();
    let file = open(
        LsmBuilder::new()
            .add_directory(
                DirectoryBuilder::new()
                    .entry(TAG_IMAGE_WIDTH, TYPE_LONG, 1, 4)
                    .entry(TAG_IMAGE_LENGTH, TYPE_LONG, 1, 2)
                    .external(TAG_BITS_PER_SAMPLE, TYPE_SHORT, 3, bits)
                    .entry(TAG_SAMPLES_PER_PIXEL, TYPE_SHORT, 1, 3),
            )
            .build(),
    )
    .unwrap();

    let dir = &file.directories()[0];
    assert_eq!(dir.bits_per_sample, vec![8, 8, 8]);
    assert_eq!(dir.samples_per_pixel, 3);
    // Absent tags take their defaults
    assert_eq!(dir.compression, 1);
    assert_eq!(dir.predictor, 1);
    assert_eq!(dir.planar_configuration, 1);
    assert!(file.summary().contains("  Bits per sample: 8 8 8\n"));
}

#[test]
fn test_two_element_list_is_read_from_offset() {
    let bits: Vec<u8> = [8u16, 16].iter().flat_map(|b| b.to_le_bytes()).collect();
    let file = open(
        LsmBuilder::new()
            .add_directory(
                DirectoryBuilder::new()
                    .entry(TAG_IMAGE_WIDTH, TYPE_LONG, 1, 4)
                    .external(TAG_BITS_PER_SAMPLE, TYPE_SHORT, 2, bits),
            )
            .build(),
    )
    .unwrap();

    assert_eq!(file.directories()[0].bits_per_sample, vec![8, 16]);
}

#[test]
fn test_directory_without_strips() {
    let file = open(
        LsmBuilder::new()
            .add_directory(DirectoryBuilder::image(16, 16, 1, 1))
            .build(),
    )
    .unwrap();

    let dir = file.directory(0).unwrap();
    assert_eq!(dir.strip_count(), 0);
    assert!(matches!(
        file.read_strip(0, 0),
        Err(TiffError::StripIndexOutOfRange { index: 0, count: 0 })
    ));
}

#[test]
fn test_parse_is_idempotent() {
    let bytes = LsmBuilder::new()
        .add_directory(DirectoryBuilder::image(4, 2, 1, 1).strips(vec![vec![0; 8]]))
        .add_directory(DirectoryBuilder::image(2, 1, 1, 1).thumbnail().strips(vec![vec![0; 2]]))
        .build();

    let first = open(bytes.clone()).unwrap();
    let second = open(bytes).unwrap();
    assert_eq!(first.directories(), second.directories());
}

#[test]
fn test_thumbnails_are_filtered_from_images() {
    let file = open(
        LsmBuilder::new()
            .add_directory(DirectoryBuilder::image(64, 64, 1, 1))
            .add_directory(DirectoryBuilder::image(8, 8, 1, 1).thumbnail())
            .add_directory(DirectoryBuilder::image(64, 64, 1, 1))
            .add_directory(DirectoryBuilder::image(8, 8, 1, 1).thumbnail())
            .build(),
    )
    .unwrap();

    assert_eq!(file.directories().len(), 4);
    assert!(file.directories()[1].is_thumbnail());
    let widths: Vec<u32> = file.images().map(|d| d.width).collect();
    assert_eq!(widths, vec![64, 64]);
}

#[test]
fn test_subfile_type_uses_reduced_bit_only() {
    // Bit 1 (page) alone does not make a thumbnail
    let file = open(
        LsmBuilder::new()
            .add_directory(DirectoryBuilder::image(4, 4, 1, 1).entry(0x00FE, TYPE_LONG, 1, 2))
            .build(),
    )
    .unwrap();
    assert!(!file.directories()[0].is_thumbnail());
}

#[test]
fn test_next_offset_past_end_is_io_error() {
    let err = open(
        LsmBuilder::new()
            .add_directory(DirectoryBuilder::image(4, 2, 1, 1).next_offset(0xFFF0))
            .build(),
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_cycle_is_rejected() {
    let err = open(
        LsmBuilder::new()
            .add_directory(DirectoryBuilder::image(4, 2, 1, 1))
            .add_directory(DirectoryBuilder::image(4, 2, 1, 1).next_offset(8))
            .build(),
    )
    .unwrap_err();
    assert!(matches!(err, TiffError::DirectoryCycle(8)));
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[test]
fn test_directory_index_out_of_range() {
    let file = open(minimal_file()).unwrap();
    assert!(matches!(
        file.directory(1),
        Err(TiffError::DirectoryIndexOutOfRange { index: 1, count: 1 })
    ));
}

// =============================================================================
// Summary and Sources
// =============================================================================

#[test]
fn test_summary_lists_every_directory() {
    let file = open(
        LsmBuilder::new()
            .add_directory(DirectoryBuilder::image(4, 2, 5, 2).strips(vec![vec![1]]))
            .add_directory(DirectoryBuilder::image(2, 1, 1, 1).thumbnail())
            .build(),
    )
    .unwrap();

    let summary = file.summary();
    assert!(summary.contains("Directory 0\n  Type: full image\n  Width: 4\n  Height: 2\n"));
    assert!(summary.contains("  Compression: 5 (LZW)\n"));
    assert!(summary.contains("  Bits per sample: 8\n"));
    assert!(summary.contains("Directory 1\n  Type: thumbnail\n"));
    assert!(summary.contains("  Strips: 0\n"));
}

#[test]
fn test_open_path() {
    let path = temp_path("open.lsm");
    std::fs::write(&path, minimal_file()).unwrap();

    let file = LsmFile::open_path(&path).unwrap();
    assert_eq!(file.source().identifier(), path.display().to_string());
    assert_eq!(
        &file.read_strip(0, 0).unwrap()[..],
        &[1, 2, 3, 4, 5, 6, 7, 8]
    );

    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_open_missing_path_is_io_error() {
    let err = LsmFile::open_path(temp_path("missing.lsm")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}

#[test]
fn test_directories_serialize_to_json() {
    let file = open(minimal_file()).unwrap();
    let json = serde_json::to_value(file.directories()).unwrap();
    assert_eq!(json[0]["width"], 4);
    assert_eq!(json[0]["strip_offsets"].as_array().unwrap().len(), 1);
    assert!(json[0]["lsm_info"].is_null());
}
