//! Built-in signature catalogue
//!
//! Magic bytes for the formats recognized out of the box. This is data
//! fed to the registry at startup, the detection logic lives in
//! [`crate::domain::services`].

use crate::domain::entities::{ContentType, FileSignature, essence};
use crate::domain::services::{Matcher, Registry};
use crate::error::ConfigurationError;
use std::fmt;

pub mod table;

/// Formats covered by the built-in catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    /// GNU zip
    Gzip,
    /// Adobe PDF
    Pdf,
    /// PNG image format
    Png,
    /// BMP image format
    Bmp,
    /// GIF image format
    Gif,
    /// JPEG image format
    Jpeg,
    /// bzip2 compressed data
    Bzip2,
    /// ZIP archive
    Zip,
    /// 7-Zip archive
    SevenZip,
    /// Java class file
    JavaClass,
}

impl FileType {
    /// Every catalogued format, in registration order
    pub const ALL: [FileType; 10] = [
        FileType::Gzip,
        FileType::Pdf,
        FileType::Png,
        FileType::Bmp,
        FileType::Gif,
        FileType::Jpeg,
        FileType::Bzip2,
        FileType::Zip,
        FileType::SevenZip,
        FileType::JavaClass,
    ];

    /// Returns the canonical mime type
    pub fn mime_type(&self) -> &'static str {
        match self {
            FileType::Gzip => "application/gzip",
            FileType::Pdf => "application/pdf",
            FileType::Png => "image/png",
            FileType::Bmp => "image/bmp",
            FileType::Gif => "image/gif",
            FileType::Jpeg => "image/jpeg",
            FileType::Bzip2 => "application/x-bzip",
            FileType::Zip => "application/zip",
            FileType::SevenZip => "application/x-7z-compressed",
            FileType::JavaClass => "application/java-vm",
        }
    }

    /// Returns a human-readable name for this file type
    pub fn name(&self) -> &'static str {
        match self {
            FileType::Gzip => "GNU Zip",
            FileType::Pdf => "Adobe PDF",
            FileType::Png => "PNG Image",
            FileType::Bmp => "BMP Image",
            FileType::Gif => "GIF Image",
            FileType::Jpeg => "JPEG Image",
            FileType::Bzip2 => "BZIP 2",
            FileType::Zip => "ZIP Archive",
            FileType::SevenZip => "7-Zip Archive",
            FileType::JavaClass => "Java Bytecode",
        }
    }

    /// Returns the conventional suffixes, primary first
    pub fn suffixes(&self) -> &'static [&'static str] {
        match self {
            FileType::Gzip => &["gz"],
            FileType::Pdf => &["pdf"],
            FileType::Png => &["png"],
            FileType::Bmp => &["bmp"],
            FileType::Gif => &["gif"],
            FileType::Jpeg => &["jpeg", "jpg", "jpe"],
            FileType::Bzip2 => &["bz2"],
            FileType::Zip => &["zip"],
            FileType::SevenZip => &["7z"],
            FileType::JavaClass => &["class"],
        }
    }

    /// Returns the magic bytes expected at offset 0
    pub fn magic(&self) -> &'static [u8] {
        match self {
            FileType::Gzip => &[0x1F, 0x8B],
            FileType::Pdf => b"%PDF",
            FileType::Png => &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A],
            FileType::Bmp => b"BM",
            FileType::Gif => b"GIF8",
            FileType::Jpeg => &[0xFF, 0xD8],
            FileType::Bzip2 => b"BZh",
            FileType::Zip => &[0x50, 0x4B, 0x03, 0x04],
            FileType::SevenZip => &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C],
            FileType::JavaClass => &[0xCA, 0xFE, 0xBA, 0xBE],
        }
    }

    /// Returns the signature for this format
    pub fn signature(&self) -> FileSignature {
        FileSignature::new(self.magic())
    }

    /// Returns the content type for this format
    pub fn content_type(&self) -> ContentType {
        ContentType::new(self.mime_type())
            .with_description(self.name())
            .with_suffixes(self.suffixes())
    }

    /// Maps a mime type back to a catalogued format, ignoring case and parameters
    pub fn from_mime_type(mime: &str) -> Option<FileType> {
        let mime = essence(mime);
        FileType::ALL
            .into_iter()
            .find(|ft| ft.mime_type().eq_ignore_ascii_case(mime))
    }

    /// Maps a detected content type back to a catalogued format
    pub fn from_content_type(content_type: &ContentType) -> Option<FileType> {
        Self::from_mime_type(content_type.mime_type())
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl From<FileType> for ContentType {
    fn from(file_type: FileType) -> Self {
        file_type.content_type()
    }
}

/// Builds a registry holding every catalogued format
pub fn default_registry() -> Result<Registry, ConfigurationError> {
    let mut builder = Registry::builder();
    for file_type in FileType::ALL {
        builder.register(file_type.signature(), file_type)?;
    }
    Ok(builder.build())
}

impl Registry {
    /// Creates a registry with the built-in catalogue
    pub fn default_catalogue() -> Result<Self, ConfigurationError> {
        default_registry()
    }
}

impl Matcher {
    /// Creates a matcher over the built-in catalogue
    pub fn with_default_catalogue() -> Result<Self, ConfigurationError> {
        default_registry().map(Matcher::new)
    }
}
