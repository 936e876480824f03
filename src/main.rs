//! Vitae CLI - LaTeX resume compiler with watch mode and job-posting scraping
//!
//! Usage: vitae <COMMAND>
//!
//! Commands:
//!   compile  Compile a resume template to PDF
//!   watch    Watch templates and recompile on save
//!   scrape   Scrape a job-posting URL and print its content

mod cli;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use vitae::compiler::{compile, CompileOptions};
use vitae::config::Config;
use vitae::scrape::{extract_content, FirecrawlClient, ScrapeError};
use vitae::templates::list_templates;
use vitae::watcher::{watch, WatchEvent, WatchOptions};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            name,
            templates,
            output,
        } => cmd_compile(name, templates, output, cli.json),
        Commands::Watch { templates, output } => cmd_watch(templates, output, cli.json),
        Commands::Scrape {
            url,
            only_main_content,
        } => cmd_scrape(&url, only_main_content, cli.json),
    }
}

/// Load config from the working directory and fold in CLI overrides
fn compile_options(
    templates: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<CompileOptions> {
    let cwd = std::env::current_dir()?;
    let (config, warnings) = Config::load_or_default(&cwd);

    if !json {
        for warning in &warnings {
            eprintln!(
                "⚠ Unknown config key '{}' in {}",
                warning.key,
                warning.file.display()
            );
        }
    }

    let mut options = CompileOptions::from_config(&config);
    if let Some(dir) = templates {
        options.templates_dir = dir;
    }
    if let Some(dir) = output {
        options.output_dir = dir;
    }
    Ok(options)
}

fn cmd_compile(
    name: Option<String>,
    templates: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let options = compile_options(templates, output, json)?;

    let name = match name {
        Some(name) => name,
        None => choose_template(&options.templates_dir)?,
    };

    if !json {
        println!("📄 Compiling {}...", name);
    }

    let outcome = compile(&options, &name)?;

    if json {
        let record = serde_json::json!({
            "event": "compile",
            "template": outcome.name,
            "output": outcome.pdf.display().to_string(),
            "cleaned": outcome.cleaned.len(),
        });
        println!("{}", serde_json::to_string(&record)?);
    } else {
        println!("✓ PDF generated: {}", outcome.pdf.display());
        for aux in &outcome.cleaned {
            println!("  Cleaned up: {}", aux.display());
        }
    }

    Ok(())
}

/// Interactive template choice, or a listing error off a TTY
fn choose_template(templates_dir: &PathBuf) -> Result<String> {
    use is_terminal::IsTerminal;

    let templates = list_templates(templates_dir)?;
    if templates.is_empty() {
        anyhow::bail!(
            "no templates found in {} - add a .tex file first",
            templates_dir.display()
        );
    }

    if !std::io::stdin().is_terminal() {
        anyhow::bail!(
            "no template name given (available: {})",
            templates.join(", ")
        );
    }

    let selection = dialoguer::Select::new()
        .with_prompt("Select a template to compile")
        .items(&templates)
        .default(0)
        .interact()?;

    Ok(templates[selection].clone())
}

fn cmd_watch(templates: Option<PathBuf>, output: Option<PathBuf>, json: bool) -> Result<()> {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let compile_opts = compile_options(templates, output, json)?;
    let options = WatchOptions {
        compile: compile_opts.clone(),
        json,
    };

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })?;

    if !json {
        println!("👀 Vitae Watch");
        println!("Templates: {}", compile_opts.templates_dir.display());
        println!("Output: {}", compile_opts.output_dir.display());
        println!("Compiler: {}", compile_opts.program);
        println!("Press Ctrl+C to stop\n");
    }

    watch(options, running, |event| {
        if json {
            println!("{}", event.to_json());
        } else {
            match event {
                WatchEvent::WatchStarted { templates_dir, .. } => {
                    println!("📂 Watching: {}", templates_dir);
                }
                WatchEvent::FileChanged { path } => {
                    println!("📝 Detected save: {}", path);
                }
                WatchEvent::CompileStarted { template } => {
                    println!("📄 Compiling {}...", template);
                }
                WatchEvent::CompileFinished { template, output } => {
                    println!("✓ Compiled {}: {}", template, output);
                }
                WatchEvent::Error { message } => {
                    eprintln!("✗ Error: {}", message);
                }
                WatchEvent::Shutdown => {
                    println!("\n👋 Shutting down...");
                }
            }
        }
    })?;

    Ok(())
}

fn cmd_scrape(url: &str, only_main_content: bool, json: bool) -> Result<()> {
    let client = FirecrawlClient::from_env()?;
    let response = client.scrape(url, only_main_content)?;

    if json {
        println!("{}", serde_json::to_string(&response)?);
        return Ok(());
    }

    let content = extract_content(&response).ok_or(ScrapeError::EmptyContent)?;
    println!("{}", content);
    Ok(())
}
