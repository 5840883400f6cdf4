// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{load_and_validate, resolve_settings, Settings};
use crate::engine::{DirectoryMonitor, Runtime, TokioClock};
use crate::exec::ShellCommand;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::Scanner;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings (defaults, optional TOML file, CLI flags)
/// - the directory monitor over the real filesystem
/// - the shell-command handler
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let file_cfg = match args.config.as_deref() {
        Some(path) => Some(load_and_validate(path)?),
        None => None,
    };
    let settings = resolve_settings(&args, file_cfg.as_ref())?;

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let scanner = Scanner::new(fs, settings.root.clone(), settings.pattern.clone());

    if args.dry_run {
        print_dry_run(&settings, &scanner)?;
        return Ok(());
    }

    let monitor = DirectoryMonitor::with_scanner(scanner, settings.delay);
    let handler = ShellCommand::new(
        settings.command.clone(),
        settings.token.clone(),
        settings.verbose,
    );

    // Ctrl-C → graceful shutdown.
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            info!("Ctrl+C received; stopping");
            cancel.cancel();
        });
    }

    let mut runtime = Runtime::new(monitor, settings.options, TokioClock, handler);
    let summary = runtime.run(&cancel).await?;
    debug!(?summary, "run finished");
    Ok(())
}

/// Dry-run output: resolved settings plus the files currently watched.
fn print_dry_run(settings: &Settings, scanner: &Scanner) -> Result<()> {
    println!("dirmon dry-run");
    println!("  root = {}", settings.root.display());
    println!("  suffix = {}", settings.pattern.as_str());
    println!("  delay = {:?}", settings.delay);
    println!("  delivery = {:?}", settings.options.delivery);
    println!("  force = {}", settings.options.force);
    println!("  cascade = {}", settings.options.cascade);
    println!("  command = {}", settings.command);
    println!("  token = {}", settings.token);
    println!();

    let files = scanner.scan()?;
    println!("watched files ({}):", files.len());
    for file in &files {
        println!("  - {}", file.display());
    }

    debug!("dry-run complete (no execution)");
    Ok(())
}
