//! Report delivery

use std::io::Write;
use std::path::PathBuf;

use super::export::Report;
use crate::common::{paths, Error, Result};

/// Where a delivered report ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    File(PathBuf),
    Stdout,
}

impl std::fmt::Display for Delivery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Stdout => write!(f, "standard output"),
        }
    }
}

/// Offers a finished report to the user
pub trait ReportSink {
    fn deliver(&self, report: &Report) -> Result<Delivery>;
}

/// Writes reports into a directory, one file per report
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ReportSink for DirectorySink {
    fn deliver(&self, report: &Report) -> Result<Delivery> {
        let path = self.dir.join(&report.file_name);
        let write_err = |e: std::io::Error| Error::FileWrite {
            path: path.display().to_string(),
            error: e.to_string(),
        };

        paths::ensure_dir(&self.dir).map_err(write_err)?;
        std::fs::write(&path, &report.contents).map_err(write_err)?;

        tracing::info!(path = %path.display(), bytes = report.contents.len(), "Report written");
        Ok(Delivery::File(path))
    }
}

/// Prints reports to standard output
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn deliver(&self, report: &Report) -> Result<Delivery> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(report.contents.as_bytes())?;
        stdout.flush()?;
        Ok(Delivery::Stdout)
    }
}
