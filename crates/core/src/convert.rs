//! HTML to EPUB conversion.
//!
//! The pipeline only talks to the [`Converter`] trait. [`PandocConverter`]
//! is the production implementation and shells out to `pandoc`.

use std::future::Future;
use std::path::{Path, PathBuf};

use tokio::process::Command;
use tracing::{debug, error};

use crate::{KindlerError, Result};

/// Extension of converted files.
pub const EPUB_EXTENSION: &str = "epub";

/// Something that turns a stored HTML page into an e-book next to it.
pub trait Converter: Send + Sync {
    /// Converts `html` and returns the path of the produced e-book.
    fn convert(&self, html: &Path) -> impl Future<Output = Result<PathBuf>> + Send;
}

/// Converts pages by running `pandoc -f html -t epub3`.
#[derive(Debug, Clone)]
pub struct PandocConverter {
    program: String,
}

impl Default for PandocConverter {
    fn default() -> Self {
        Self::new("pandoc")
    }
}

impl PandocConverter {
    /// Uses `program` as the pandoc executable.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

/// Path of the e-book produced for `html`: same directory and stem.
pub fn epub_path(html: &Path) -> PathBuf {
    html.with_extension(EPUB_EXTENSION)
}

impl Converter for PandocConverter {
    async fn convert(&self, html: &Path) -> Result<PathBuf> {
        let output_path = epub_path(html);
        debug!(program = %self.program, input = %html.display(), "running converter");

        let output = Command::new(&self.program)
            .args(["-f", "html", "-t", "epub3", "-o"])
            .arg(&output_path)
            .arg(html)
            .output()
            .await
            .map_err(|source| KindlerError::ConverterUnavailable { program: self.program.clone(), source })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            error!("An error occurred while converting the HTML file to EPUB: {stderr}");
            return Err(KindlerError::ConversionFailed { input: html.to_path_buf(), status: output.status, stderr });
        }

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn test_epub_path() {
        assert_eq!(epub_path(Path::new("sends/My_Post.html")), PathBuf::from("sends/My_Post.epub"));
        assert_eq!(epub_path(Path::new("sends/v1.2_notes.html")), PathBuf::from("sends/v1.2_notes.epub"));
    }

    #[test]
    fn test_default_program() {
        assert_eq!(PandocConverter::default().program(), "pandoc");
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let converter = PandocConverter::new("kindler-test-no-such-program");
        let err = converter.convert(Path::new("page.html")).await.unwrap_err();

        assert!(matches!(err, KindlerError::ConverterUnavailable { .. }));
        assert_eq!(err.kind(), ErrorKind::Conversion);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_nonzero_exit_is_conversion_failure() {
        let converter = PandocConverter::new("false");
        let err = converter.convert(Path::new("page.html")).await.unwrap_err();

        assert!(matches!(err, KindlerError::ConversionFailed { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_zero_exit_returns_epub_path() {
        let converter = PandocConverter::new("true");
        let out = converter.convert(Path::new("dir/page.html")).await.unwrap();

        assert_eq!(out, PathBuf::from("dir/page.epub"));
    }
}
