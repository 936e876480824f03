//! Error types for Vitae
//!
//! Library errors use `thiserror`; the binary converts them to `anyhow`
//! at the top level so every failure exits non-zero with a readable message.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Vitae operations
pub type VitaeResult<T> = Result<T, VitaeError>;

/// Main error type for Vitae operations
#[derive(Error, Debug)]
pub enum VitaeError {
    /// Template name did not resolve to a file in the templates directory
    #[error("template '{name}' not found in {dir} (available: {available})")]
    TemplateNotFound {
        name: String,
        dir: PathBuf,
        available: String,
    },

    /// Directory required for an operation is missing
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// LaTeX engine is not installed or not on PATH
    #[error("'{program}' is not installed or not on PATH - install a TeX distribution (e.g. `brew install --cask basictex` or `apt install texlive-xetex`)")]
    CompilerUnavailable { program: String },

    /// LaTeX engine exited non-zero
    #[error("compiling '{name}' failed (exit {code}):\n{log}")]
    CompileFailed {
        name: String,
        code: i32,
        log: String,
    },

    /// Compiler exited zero but produced no PDF
    #[error("compiler reported success but no PDF was produced at {path}")]
    MissingArtifact { path: PathBuf },

    /// Invalid configuration file
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scrape API error
    #[error(transparent)]
    Scrape(#[from] crate::scrape::ScrapeError),
}
