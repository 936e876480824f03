//! E2E tests for `vitae compile`

mod common;

use common::TestEnv;

#[test]
fn compile_missing_template_fails_without_artifact() {
    let env = TestEnv::new();
    env.write_template("classic", "\\documentclass{article}");

    let result = env.run(&["compile", "missing"]);

    assert!(!result.is_success(), "expected failure: {:?}", result);
    assert!(
        result.stderr.contains("'missing' not found"),
        "stderr: {}",
        result.stderr
    );
    assert!(
        result.stderr.contains("classic"),
        "available templates should be listed: {}",
        result.stderr
    );
    assert!(!env.project_path("output/missing.pdf").exists());
}

#[test]
fn compile_without_name_off_tty_lists_templates() {
    let env = TestEnv::new();
    env.write_template("classic", "\\documentclass{article}");
    env.write_template("modern", "\\documentclass{article}");

    // stdin is a pipe, not a terminal, so no prompt is possible
    let result = env.run(&["compile"]);

    assert!(!result.is_success());
    assert!(
        result.stderr.contains("classic") && result.stderr.contains("modern"),
        "stderr: {}",
        result.stderr
    );
}

#[test]
fn compile_with_empty_templates_dir_reports_error() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.project_path("templates")).unwrap();

    let result = env.run(&["compile"]);

    assert!(!result.is_success());
    assert!(
        result.stderr.contains("no templates found"),
        "stderr: {}",
        result.stderr
    );
}

#[cfg(unix)]
#[test]
fn compile_success_writes_single_pdf_and_cleans_aux() {
    let env = TestEnv::new();
    env.write_template("classic", "\\documentclass{article}");
    env.install_stub_engine(true);

    let result = env.run(&["compile", "classic"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(env.project_path("output/classic.pdf").is_file());
    assert!(!env.project_path("templates/classic.pdf").exists());
    assert!(!env.project_path("templates/classic.aux").exists());
    assert!(!env.project_path("templates/classic.log").exists());

    // Exactly one artifact in the output directory
    let entries: Vec<_> = std::fs::read_dir(env.project_path("output"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[cfg(unix)]
#[test]
fn compile_accepts_name_with_extension() {
    let env = TestEnv::new();
    env.write_template("classic", "\\documentclass{article}");
    env.install_stub_engine(true);

    let result = env.run(&["compile", "classic.tex"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(env.project_path("output/classic.pdf").is_file());
}

#[cfg(unix)]
#[test]
fn compile_failure_exits_nonzero_without_artifact() {
    let env = TestEnv::new();
    env.write_template("broken", "\\documentclass{article}");
    env.install_stub_engine(false);

    let result = env.run(&["compile", "broken"]);

    assert!(!result.is_success());
    assert!(
        result.stderr.contains("Undefined control sequence"),
        "compiler log should be surfaced: {}",
        result.stderr
    );
    assert!(!env.project_path("output").exists());
}

#[cfg(unix)]
#[test]
fn compile_json_emits_result_record() {
    let env = TestEnv::new();
    env.write_template("classic", "\\documentclass{article}");
    env.install_stub_engine(true);

    let result = env.run(&["compile", "classic", "--json"]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(
        result.stdout.contains("\"event\":\"compile\""),
        "stdout: {}",
        result.stdout
    );
    assert!(result.stdout.contains("\"template\":\"classic\""));
}

#[cfg(unix)]
#[test]
fn compile_honors_cli_path_overrides() {
    let env = TestEnv::new();
    std::fs::create_dir_all(env.project_path("tex")).unwrap();
    std::fs::write(
        env.project_path("tex/classic.tex"),
        "\\documentclass{article}",
    )
    .unwrap();
    env.install_stub_engine(true);

    let result = env.run(&[
        "compile",
        "classic",
        "--templates",
        "tex",
        "--output",
        "pdf",
    ]);

    assert!(result.is_success(), "stderr: {}", result.stderr);
    assert!(env.project_path("pdf/classic.pdf").is_file());
}

#[cfg(unix)]
#[test]
fn compile_rerun_is_idempotent() {
    let env = TestEnv::new();
    env.write_template("classic", "\\documentclass{article}");
    env.install_stub_engine(true);

    assert!(env.run(&["compile", "classic"]).is_success());
    let second = env.run(&["compile", "classic"]);

    assert!(second.is_success(), "stderr: {}", second.stderr);
    assert!(env.project_path("output/classic.pdf").is_file());
}
