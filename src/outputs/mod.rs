//! Output rendering for resolved pages.
//!
//! The presentation layer is a pure function of the session state: it never
//! issues requests and never mutates the session.
//!
//! # Submodules
//!
//! - [`json`]: Serializes a [`PageResult`](crate::models::PageResult) for machine consumption
//! - [`markdown`]: Renders the article list, counts and pagination bar as Markdown

pub mod json;
pub mod markdown;

use std::error::Error;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{info, instrument};

use crate::models::UnknownCodeError;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    #[default]
    Markdown,
    Json,
}

impl FromStr for Format {
    type Err = UnknownCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Format::Markdown),
            "json" => Ok(Format::Json),
            _ => Err(UnknownCodeError::new("format", s, ["markdown", "json"].into_iter())),
        }
    }
}

/// Write rendered output to `path`, creating parent directories as needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_output(path: &Path, rendered: &str) -> Result<(), Box<dyn Error>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }
    fs::write(path, rendered).await?;
    info!(bytes = rendered.len(), "Wrote output");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_parsing() {
        assert_eq!("JSON".parse::<Format>().unwrap(), Format::Json);
        assert_eq!("md".parse::<Format>().unwrap(), Format::Markdown);
        assert!("html".parse::<Format>().is_err());
    }

    #[tokio::test]
    async fn test_write_output_creates_parent_dirs() {
        let dir = std::env::temp_dir().join(format!("cynews-out-{}", std::process::id()));
        let path = dir.join("nested").join("page.md");

        write_output(&path, "# Latest Cybersecurity News\n").await.unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, "# Latest Cybersecurity News\n");
        let _ = std::fs::remove_dir_all(&dir);
    }
}
