//! Common test utilities for Vitae integration tests.
//!
//! Provides `TestEnv` - an isolated project directory with helpers to stage
//! templates, a config file pointing at a stub LaTeX engine, and to run the
//! vitae binary against it.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Result of running a vitae CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated project directory with CLI execution helpers
pub struct TestEnv {
    pub project_root: TempDir,
    vitae_bin: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create temp project"),
            vitae_bin: PathBuf::from(env!("CARGO_BIN_EXE_vitae")),
        }
    }

    /// Path relative to the project root
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Run vitae in this project
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run vitae in this project with extra env vars
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute vitae");
        self.output_to_result(output)
    }

    /// Build the command without running it (for spawn-based watch tests)
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.vitae_bin);
        cmd.current_dir(self.project_root.path())
            .args(args)
            .env_remove("FIRECRAWL_API_KEY")
            .env_remove("FIRECRAWL_API_URL")
            .env_remove("VITAE_TEMPLATES_DIR")
            .env_remove("VITAE_OUTPUT_DIR")
            .env_remove("VITAE_COMPILER");
        cmd
    }

    fn output_to_result(&self, output: Output) -> TestResult {
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Write a template source under templates/
    pub fn write_template(&self, stem: &str, content: &str) {
        let dir = self.project_path("templates");
        std::fs::create_dir_all(&dir).expect("Failed to create templates dir");
        std::fs::write(dir.join(format!("{stem}.tex")), content)
            .expect("Failed to write template");
    }

    /// Write vitae.toml pointing the compiler at `program`
    pub fn write_config_with_compiler(&self, program: &Path) {
        let config = format!(
            "[compiler]\nprogram = \"{}\"\n",
            program.display()
        );
        std::fs::write(self.project_path("vitae.toml"), config)
            .expect("Failed to write config");
    }

    /// Install a stub LaTeX engine script and wire it into vitae.toml.
    ///
    /// The stub answers the `--version` probe, then either emits
    /// `<stem>.pdf` plus auxiliary files (success) or fails with a LaTeX-ish
    /// message on stderr.
    #[cfg(unix)]
    pub fn install_stub_engine(&self, succeed: bool) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let body = if succeed {
            "#!/bin/sh\n\
             [ \"$1\" = \"--version\" ] && exit 0\n\
             stem=$(basename \"$2\" .tex)\n\
             echo pdf > \"$stem.pdf\"\n\
             echo aux > \"$stem.aux\"\n\
             echo log > \"$stem.log\"\n\
             exit 0\n"
        } else {
            "#!/bin/sh\n\
             [ \"$1\" = \"--version\" ] && exit 0\n\
             echo '! Undefined control sequence.' >&2\n\
             exit 1\n"
        };

        let path = self.project_path("stub-latex.sh");
        std::fs::write(&path, body).expect("Failed to write stub engine");
        let mut perms = std::fs::metadata(&path).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).unwrap();

        self.write_config_with_compiler(&path);
        path
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
