use crate::ScrapeError;
use crate::naming;
use crate::results::PageRecord;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

/// Writes page records into an output directory, one new file per record
#[derive(Debug, Clone)]
pub struct ContentWriter {
    output_dir: PathBuf,
}

impl ContentWriter {
    /// Create a writer, creating `output_dir` and its parents if missing
    pub fn create(output_dir: impl Into<PathBuf>) -> Result<Self, ScrapeError> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|source| ScrapeError::Io {
            path: output_dir.clone(),
            source,
        })?;
        Ok(Self { output_dir })
    }

    /// Directory that receives the files
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Write `text_blocks` captured from `url` and return the new file's path
    pub fn write(&self, url: &Url, text_blocks: &[String]) -> Result<PathBuf, ScrapeError> {
        let record = PageRecord::new(url.to_string(), text_blocks.to_vec());
        self.write_record(url, &record)
    }

    /// Write an already built record
    pub fn write_record(&self, url: &Url, record: &PageRecord) -> Result<PathBuf, ScrapeError> {
        let body = record.render();

        let (path, mut file) =
            naming::create_unique(url, &self.output_dir).map_err(|source| ScrapeError::Io {
                path: self.output_dir.clone(),
                source,
            })?;

        if let Err(source) = file.write_all(body.as_bytes()).and_then(|_| file.flush()) {
            drop(file);
            // Never leave a half-written record behind
            if let Err(e) = fs::remove_file(&path) {
                ::log::warn!("Failed to remove partial file {}: {}", path.display(), e);
            }
            return Err(ScrapeError::Io { path, source });
        }

        ::log::debug!("Wrote {} bytes to {}", body.len(), path.display());
        Ok(path)
    }
}
