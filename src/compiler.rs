//! Compile orchestration
//!
//! Wraps the external LaTeX engine: runs it against a template source in the
//! templates directory, relocates the finished PDF into the output directory,
//! and removes the auxiliary files the engine leaves behind. Compilation is
//! deterministic and idempotent, so there are no retries; rerunning the
//! command is the retry mechanism.

use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use crate::config::Config;
use crate::error::{VitaeError, VitaeResult};
use crate::templates::resolve_template;

/// Auxiliary file extensions the engine produces next to the source
const AUX_EXTENSIONS: &[&str] = &["aux", "log", "out", "toc", "fls", "fdb_latexmk"];

/// Lines of engine output kept in a failure message
const LOG_TAIL_LINES: usize = 20;

/// Options for one compilation run
#[derive(Debug, Clone)]
pub struct CompileOptions {
    /// Directory containing `.tex` sources
    pub templates_dir: PathBuf,
    /// Directory receiving finished PDFs
    pub output_dir: PathBuf,
    /// Engine binary to invoke
    pub program: String,
    /// Number of engine passes
    pub passes: u32,
}

impl CompileOptions {
    /// Build options from loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            templates_dir: config.paths.templates.clone(),
            output_dir: config.paths.output.clone(),
            program: config.compiler.program.clone(),
            passes: config.compiler.passes.max(1),
        }
    }
}

/// Result of a successful compilation
#[derive(Debug, Clone)]
pub struct CompileOutcome {
    /// Template stem that was compiled
    pub name: String,
    /// Final artifact location
    pub pdf: PathBuf,
    /// Auxiliary files that were removed
    pub cleaned: Vec<PathBuf>,
}

/// Check whether the engine binary is installed and answers `--version`
pub fn check_available(program: &str) -> bool {
    Command::new(program)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Compile one template and move the PDF into the output directory.
///
/// On failure nothing is written to the output directory; auxiliary files
/// from the aborted run stay next to the source for inspection.
pub fn compile(options: &CompileOptions, name: &str) -> VitaeResult<CompileOutcome> {
    let source = resolve_template(&options.templates_dir, name)?;
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(name)
        .to_string();
    let file_name = source
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(name)
        .to_string();

    if !check_available(&options.program) {
        return Err(VitaeError::CompilerUnavailable {
            program: options.program.clone(),
        });
    }

    for _ in 0..options.passes {
        let output = Command::new(&options.program)
            .arg("-interaction=nonstopmode")
            .arg(&file_name)
            .current_dir(&options.templates_dir)
            .output()?;

        if !output.status.success() {
            return Err(VitaeError::CompileFailed {
                name: stem,
                code: output.status.code().unwrap_or(-1),
                log: log_tail(&output),
            });
        }
    }

    let pdf_source = options.templates_dir.join(format!("{stem}.pdf"));
    if !pdf_source.is_file() {
        return Err(VitaeError::MissingArtifact { path: pdf_source });
    }

    std::fs::create_dir_all(&options.output_dir)?;
    let pdf_dest = options.output_dir.join(format!("{stem}.pdf"));
    move_file(&pdf_source, &pdf_dest)?;

    let cleaned = clean_auxiliary(&options.templates_dir, &stem);

    Ok(CompileOutcome {
        name: stem,
        pdf: pdf_dest,
        cleaned,
    })
}

/// Remove engine by-products next to the source; missing files are fine
fn clean_auxiliary(templates_dir: &Path, stem: &str) -> Vec<PathBuf> {
    let mut cleaned = Vec::new();
    for ext in AUX_EXTENSIONS {
        let aux = templates_dir.join(format!("{stem}.{ext}"));
        if aux.is_file() && std::fs::remove_file(&aux).is_ok() {
            cleaned.push(aux);
        }
    }
    cleaned
}

/// Rename, falling back to copy + remove when the output directory sits on
/// another filesystem
fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    if std::fs::rename(from, to).is_ok() {
        return Ok(());
    }
    std::fs::copy(from, to)?;
    std::fs::remove_file(from)
}

/// Last lines of combined engine output, stderr preferred
fn log_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(LOG_TAIL_LINES);
    lines[start..].join("\n")
}
