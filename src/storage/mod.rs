// src/storage/mod.rs
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::Serialize;

use crate::extractors::ExtractedSection;
use crate::utils::error::StorageError;

/// How an extracted section is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// The section body as plain text
    Text,
    /// A JSON object with the body and where it was found
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Stdout,
    File(PathBuf),
}

// JSON shape: the section fields plus when it was extracted
#[derive(Serialize)]
struct SectionMetadata<'a> {
    #[serde(flatten)]
    section: &'a ExtractedSection,
    extracted_at: String,
}

pub struct StorageManager {
    destination: Destination,
    format: OutputFormat,
}

impl StorageManager {
    /// Creates a StorageManager writing to `output`, or to stdout when `None`.
    /// Missing parent directories of the output file are created.
    pub fn new(output: Option<&Path>, format: OutputFormat) -> Result<Self, StorageError> {
        let destination = match output {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        fs::create_dir_all(parent).map_err(StorageError::IoError)?;
                    }
                }
                Destination::File(path.to_path_buf())
            }
            None => Destination::Stdout,
        };

        Ok(Self { destination, format })
    }

    pub fn destination(&self) -> &Destination {
        &self.destination
    }

    /// Renders the section in the configured format. Output is always
    /// newline terminated.
    pub fn render(&self, section: &ExtractedSection) -> Result<String, StorageError> {
        match self.format {
            OutputFormat::Text => Ok(section.content.clone()),
            OutputFormat::Json => {
                let metadata = SectionMetadata {
                    section,
                    extracted_at: chrono::Utc::now().to_rfc3339(),
                };
                let mut rendered = serde_json::to_string_pretty(&metadata)
                    .map_err(|e| StorageError::SerializationError(e.to_string()))?;
                rendered.push('\n');
                Ok(rendered)
            }
        }
    }

    /// Writes the rendered section to the destination.
    pub fn save_section(&self, section: &ExtractedSection) -> Result<(), StorageError> {
        let rendered = self.render(section)?;

        match &self.destination {
            Destination::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(rendered.as_bytes())?;
                stdout.flush()?;
            }
            Destination::File(path) => {
                fs::write(path, rendered.as_bytes()).map_err(StorageError::IoError)?;
                tracing::info!("Saved section for {} to {}", section.version, path.display());
            }
        }

        Ok(())
    }
}
