//! Output path derivation.
//!
//! Works purely on the structure of the path string; nothing here touches
//! the filesystem.

use std::path::{Path, PathBuf};

use crate::error::{Result, SubEmbedError};

/// Prefix inserted before the movie's base name to form the output file name
pub const OUTPUT_PREFIX: &str = "SRT-";

/// Decomposed movie path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaPath {
    /// Parent directory, empty when the path is a bare file name
    pub directory: String,
    /// File name without its extension
    pub base_name: String,
    /// Extension including the leading dot, or empty
    pub extension: String,
}

impl MediaPath {
    /// Split a raw movie path into directory, base name and extension
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(SubEmbedError::PathFormat("path is empty".to_string()));
        }

        let path = Path::new(raw);
        let file_name = path
            .file_name()
            .ok_or_else(|| SubEmbedError::PathFormat(format!("'{}' does not name a file", raw)))?;

        let base_name = Path::new(file_name)
            .file_stem()
            .unwrap_or(file_name)
            .to_string_lossy()
            .into_owned();
        let extension = Path::new(file_name)
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();
        let directory = path
            .parent()
            .map(|parent| parent.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            directory,
            base_name,
            extension,
        })
    }

    /// File name with extension, e.g. `movie.mkv`
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }

    /// Path of the movie this record was parsed from
    pub fn path(&self) -> PathBuf {
        self.in_directory(self.file_name())
    }

    /// `<directory>/SRT-<base name><extension>`
    pub fn output_path(&self) -> PathBuf {
        self.in_directory(format!("{}{}", OUTPUT_PREFIX, self.file_name()))
    }

    fn in_directory(&self, file_name: String) -> PathBuf {
        if self.directory.is_empty() {
            PathBuf::from(file_name)
        } else {
            Path::new(&self.directory).join(file_name)
        }
    }
}
