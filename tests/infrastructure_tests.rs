//! Infrastructure layer tests
//!
//! Tests for the built-in catalogue, JSON signature tables, and fragment
//! loading from files and readers.

use magicid::domain::entities::ContentType;
use magicid::domain::services::{Matcher, Registry};
use magicid::{ConfigurationError, FileType, IdentifyError, SignatureTable};
use rstest::*;
use std::fs;
use std::io::{self, Cursor, Read};
use tempfile::TempDir;

// ============================================================================
// Catalogue Tests
// ============================================================================

#[rstest]
#[case(FileType::Gzip, &[0x1F, 0x8B])]
#[case(FileType::Pdf, &[0x25, 0x50, 0x44, 0x46])]
#[case(FileType::Png, &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A])]
#[case(FileType::Bmp, &[0x42, 0x4D])]
#[case(FileType::Gif, &[0x47, 0x49, 0x46, 0x38])]
#[case(FileType::Jpeg, &[0xFF, 0xD8])]
#[case(FileType::Bzip2, &[0x42, 0x5A, 0x68])]
#[case(FileType::Zip, &[0x50, 0x4B, 0x03, 0x04])]
#[case(FileType::SevenZip, &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C])]
#[case(FileType::JavaClass, &[0xCA, 0xFE, 0xBA, 0xBE])]
fn test_catalogue_magic_bytes(#[case] file_type: FileType, #[case] magic: &[u8]) {
    assert_eq!(file_type.magic(), magic);
}

#[rstest]
#[case("application/x-bzip", Some(FileType::Bzip2))]
#[case("Application/Java-VM", Some(FileType::JavaClass))]
#[case("image/gif;foo=bar", Some(FileType::Gif))]
#[case("text/plain", None)]
fn test_file_type_from_mime(#[case] mime: &str, #[case] expected: Option<FileType>) {
    assert_eq!(FileType::from_mime_type(mime), expected);
}

#[rstest]
fn test_catalogue_content_type_metadata() {
    let zip: ContentType = FileType::SevenZip.into();
    assert_eq!(zip.mime_type(), "application/x-7z-compressed");
    assert_eq!(zip.primary_suffix(), Some("7z"));
    assert_eq!(FileType::SevenZip.to_string(), "7-Zip Archive");
}

// ============================================================================
// SignatureTable Tests
// ============================================================================

const MP3_TABLE: &str = r#"{
  "types": [
    {
      "mime_type": "audio/mpeg",
      "description": "MPEG audio",
      "suffixes": ["mp3"],
      "signatures": [
        { "pattern": "49 44 33" },
        { "pattern": "FF FB" }
      ]
    },
    {
      "mime_type": "audio/x-wav",
      "suffixes": ["wav"],
      "signatures": [
        { "pattern": "52 49 46 46 ?? ?? ?? ?? 57 41 56 45" }
      ]
    },
    {
      "mime_type": "application/x-tar",
      "suffixes": ["tar"],
      "signatures": [
        { "offset": 257, "pattern": "75 73 74 61 72" }
      ]
    }
  ]
}"#;

#[rstest]
fn test_table_from_json() {
    let matcher = Matcher::new(Registry::from_json(MP3_TABLE).unwrap());
    assert_eq!(matcher.registry().type_count(), 3);
    assert_eq!(matcher.registry().signature_count(), 4);
    assert_eq!(matcher.required_len(), 262);

    let id = |data: &[u8]| matcher.identify(data).map(|ct| ct.mime_type().to_string());
    assert_eq!(id(b"ID3\x04\x00"), Some("audio/mpeg".to_string()));
    assert_eq!(id(&[0xFF, 0xFB, 0x90]), Some("audio/mpeg".to_string()));
    assert_eq!(id(b"RIFF\x24\x08\x00\x00WAVEfmt "), Some("audio/x-wav".to_string()));
    assert_eq!(id(b"RIFF\x24\x08\x00\x00AVI LIST"), None);

    let mut tar = vec![0u8; 300];
    tar[257..262].copy_from_slice(b"ustar");
    assert_eq!(id(&tar), Some("application/x-tar".to_string()));
    assert_eq!(id(&tar[..261]), None);
}

#[rstest]
fn test_table_roundtrips_builtin_catalogue() {
    let json = SignatureTable::builtin().to_json().unwrap();
    let from_json = Registry::from_json(&json).unwrap();
    let builtin = Registry::default_catalogue().unwrap();
    assert_eq!(from_json.content_types(), builtin.content_types());
    assert_eq!(
        from_json.all_signatures().collect::<Vec<_>>(),
        builtin.all_signatures().collect::<Vec<_>>()
    );
}

#[rstest]
#[case(r#"{ "types": [ { "mime_type": "x/y", "signatures": [ { "pattern": "ZZ" } ] } ] }"#)]
#[case(r#"{ "types": [ { "mime_type": "x/y", "signatures": [ { "pattern": "" } ] } ] }"#)]
#[case(r#"{ "types": [ { "mime_type": "x/y" } ] }"#)]
#[case(r#"{ "types": [ { "mime_type": "", "signatures": [ { "pattern": "01" } ] } ] }"#)]
#[case(r#"{ "types": [ { "mime_type": "x/y", "signatures": [ { "offset": 18446744073709551615, "pattern": "01" } ] } ] }"#)]
fn test_bad_tables_are_rejected(#[case] json: &str) {
    assert!(Registry::from_json(json).is_err());
}

#[rstest]
fn test_table_duplicate_is_configuration_error() {
    let json = r#"{ "types": [
        { "mime_type": "application/gzip", "signatures": [ { "pattern": "1F 8B" } ] },
        { "mime_type": "application/x-gzip", "signatures": [ { "pattern": "1f 8b" } ] }
    ] }"#;
    assert!(matches!(
        Registry::from_json(json),
        Err(ConfigurationError::DuplicateSignature { offset: 0, .. })
    ));
}

#[rstest]
fn test_table_extends_builtin_catalogue() {
    let mut builder = Registry::builder();
    SignatureTable::builtin().register_into(&mut builder).unwrap();
    SignatureTable::from_json(MP3_TABLE)
        .unwrap()
        .register_into(&mut builder)
        .unwrap();
    let matcher = Matcher::new(builder.build());
    assert_eq!(matcher.registry().type_count(), 13);
    assert_eq!(
        matcher.identify(b"ID3\x03").map(ContentType::mime_type),
        Some("audio/mpeg")
    );
    assert_eq!(
        matcher.identify(b"GIF89a").map(ContentType::mime_type),
        Some("image/gif")
    );
}

// ============================================================================
// Loader Tests
// ============================================================================

#[fixture]
fn matcher() -> Matcher {
    Matcher::with_default_catalogue().unwrap()
}

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

#[rstest]
fn test_identify_path(matcher: Matcher, temp_dir: TempDir) {
    let path = temp_dir.path().join("document.bin");
    let mut data = b"%PDF-1.5\n".to_vec();
    data.extend(std::iter::repeat_n(0x20u8, 64 * 1024));
    fs::write(&path, &data).unwrap();

    let found = matcher.identify_path(&path).unwrap();
    assert_eq!(found.map(ContentType::mime_type), Some("application/pdf"));
}

#[rstest]
fn test_extension_is_ignored(matcher: Matcher, temp_dir: TempDir) {
    let path = temp_dir.path().join("picture.png");
    fs::write(&path, [0xFFu8, 0xD8, 0xFF, 0xE1, 0x00]).unwrap();

    let found = matcher.identify_path(&path).unwrap();
    assert_eq!(found.map(ContentType::mime_type), Some("image/jpeg"));
}

#[rstest]
fn test_identify_path_skips_non_files(matcher: Matcher, temp_dir: TempDir) {
    let empty = temp_dir.path().join("empty.gz");
    fs::write(&empty, b"").unwrap();

    assert!(matcher.identify_path(&empty).unwrap().is_none());
    assert!(matcher.identify_path(temp_dir.path()).unwrap().is_none());
    assert!(
        matcher
            .identify_path(temp_dir.path().join("missing"))
            .unwrap()
            .is_none()
    );
}

#[rstest]
fn test_identify_reader_reads_only_required_len(matcher: Matcher) {
    let mut source = Cursor::new(vec![0x1Fu8, 0x8B, 0x08, 0x00, 0, 0, 0, 0, 0, 0, 0, 0]);
    let found = matcher.identify_reader(&mut source).unwrap();
    assert_eq!(found.map(ContentType::mime_type), Some("application/gzip"));
    assert_eq!(source.position(), matcher.required_len() as u64);
}

struct FailingReader;

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::other("device gone"))
    }
}

#[rstest]
fn test_identify_reader_propagates_io_errors(matcher: Matcher) {
    let err = matcher.identify_reader(FailingReader).unwrap_err();
    assert!(matches!(err, IdentifyError::Read(_)));
}
