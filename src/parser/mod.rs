use crate::errors::LoadError;
use serde::Deserialize;
use std::path::Path;

// Only the include list matters; `parameters` and friends are ignored.
#[derive(Debug, Default, Deserialize)]
struct ClassHeader {
    #[serde(default)]
    classes: Option<Vec<String>>,
}

/// Decoder for Kapitan class and target documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassParser;

impl ClassParser {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Decode a YAML document into its declared `classes` list.
    ///
    /// Only the first document of a multi-document stream is read. An empty
    /// document, a missing `classes` key and `classes: null` all yield an
    /// empty list.
    ///
    /// # Errors
    /// Returns `LoadError::Decode` if `content` is not valid YAML or `classes`
    /// is not a list of strings.
    pub fn parse_document(&self, content: &str, path: &Path) -> Result<Vec<String>, LoadError> {
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let header = match serde_yaml::Deserializer::from_str(content).next() {
            Some(document) => Option::<ClassHeader>::deserialize(document)
                .map_err(|source| LoadError::Decode { path: path.to_path_buf(), source })?,
            None => None,
        };
        Ok(header.and_then(|h| h.classes).unwrap_or_default())
    }

    /// Read and decode the document at `path`.
    ///
    /// # Errors
    /// Returns `LoadError::Io` if the file cannot be read, or
    /// `LoadError::Decode` as for [`ClassParser::parse_document`].
    pub fn parse_file(&self, path: &Path) -> Result<Vec<String>, LoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        self.parse_document(&content, path)
    }
}
