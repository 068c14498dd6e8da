//! JSON signature tables
//!
//! Lets a deployment supply its own catalogue instead of (or on top of)
//! the built-in one. A table looks like:
//!
//! ```json
//! {
//!   "types": [
//!     {
//!       "mime_type": "audio/mpeg",
//!       "description": "MP3 with ID3 tag",
//!       "suffixes": ["mp3"],
//!       "signatures": [{ "pattern": "49 44 33" }, { "offset": 0, "pattern": "FF FB" }]
//!     }
//!   ]
//! }
//! ```
//!
//! Patterns are hex byte pairs separated by whitespace, `??` for a wildcard.

use crate::domain::entities::{ContentType, FileSignature, Pattern};
use crate::domain::services::{Registry, RegistryBuilder};
use crate::error::ConfigurationError;
use crate::infrastructure::signatures::FileType;
use serde::{Deserialize, Serialize};

/// One signature line of a table entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureSpec {
    #[serde(default)]
    pub offset: usize,
    pub pattern: String,
}

/// A content type and the signatures that identify it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeSpec {
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub suffixes: Vec<String>,
    pub signatures: Vec<SignatureSpec>,
}

impl TypeSpec {
    fn content_type(&self) -> ContentType {
        let content_type = ContentType::new(self.mime_type.as_str()).with_suffixes(&self.suffixes);
        match &self.description {
            Some(description) => content_type.with_description(description.as_str()),
            None => content_type,
        }
    }
}

/// A full signature table document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureTable {
    pub types: Vec<TypeSpec>,
}

impl SignatureTable {
    /// Parses a table from JSON text
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the table as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Describes the built-in catalogue as a table
    pub fn builtin() -> Self {
        let types = FileType::ALL
            .into_iter()
            .map(|ft| TypeSpec {
                mime_type: ft.mime_type().to_string(),
                description: Some(ft.name().to_string()),
                suffixes: ft.suffixes().iter().map(|s| s.to_string()).collect(),
                signatures: vec![SignatureSpec {
                    offset: 0,
                    pattern: Pattern::exact(ft.magic()).to_string(),
                }],
            })
            .collect();
        Self { types }
    }

    /// Registers every entry of this table into `builder`, in document order
    pub fn register_into(&self, builder: &mut RegistryBuilder) -> Result<(), ConfigurationError> {
        for spec in &self.types {
            if spec.signatures.is_empty() {
                return Err(ConfigurationError::MalformedTable(format!(
                    "{} declares no signatures",
                    spec.mime_type
                )));
            }
            for line in &spec.signatures {
                let pattern: Pattern = line.pattern.parse()?;
                builder.register(
                    FileSignature::new(pattern).with_offset(line.offset),
                    spec.content_type(),
                )?;
            }
        }
        Ok(())
    }

    /// Builds a registry holding only this table's entries
    pub fn to_registry(&self) -> Result<Registry, ConfigurationError> {
        let mut builder = Registry::builder();
        self.register_into(&mut builder)?;
        Ok(builder.build())
    }
}

impl Registry {
    /// Builds a registry from a JSON signature table
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        SignatureTable::from_json(json)?.to_registry()
    }
}
