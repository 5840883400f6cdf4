// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{ArgAction, Parser, ValueEnum};

use crate::errors::{DirmonError, Result};

const AFTER_HELP: &str = r#"The --suffix option limits the watched files to those whose path matches a
regular expression anchored at the end of the name. It is a regex, not a glob:
to match a literal period, escape it with a backslash.

If the shell command contains the token (default %%), it is replaced with a
space-delimited list of the changed paths. With --loop the command runs once
per changed file and the token is replaced with one path at a time.

File deletions are not detected.

Examples:
    dirmon -l -d 10 "echo File %% has changed"
        Every 10 seconds, display each changed file on a separate line.

    dirmon -s "\.rb|\.yaml" rake
        Every 5 seconds, run rake if any Ruby or YAML file changed."#;

/// Command-line arguments for `dirmon`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "dirmon",
    version,
    about = "Watch a directory tree and run a shell command when files change.",
    long_about = None,
    after_help = AFTER_HELP,
    disable_version_flag = true
)]
pub struct CliArgs {
    /// Regex selecting the watched files, anchored at the end of the path
    /// [default: .*].
    #[arg(short, long, value_name = "REGEX")]
    pub suffix: Option<String>,

    /// Seconds to sleep between scans [default: 5.0].
    #[arg(short, long, value_name = "SECS", allow_negative_numbers = true)]
    pub delay: Option<f64>,

    /// Execute the command once for each changed file.
    #[arg(short = 'l', long = "loop")]
    pub per_file: bool,

    /// Force a first execution on all watched files.
    #[arg(short, long)]
    pub force: bool,

    /// Re-scan after each execution and handle files changed by it in the
    /// same cycle.
    #[arg(short, long)]
    pub cascade: bool,

    /// String replaced by the changed file names [default: %%].
    #[arg(short, long, value_name = "STR")]
    pub token: Option<String>,

    /// Print each command on standard output before running it.
    #[arg(short = 'V', long)]
    pub verbose: bool,

    /// Directory tree to watch [default: .].
    #[arg(long, value_name = "DIR")]
    pub root: Option<String>,

    /// Optional TOML file with default settings; flags override it.
    #[arg(long, value_name = "PATH")]
    pub config: Option<String>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `DIRMON_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate settings, list the files currently watched, and exit
    /// without running anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Print version.
    #[arg(short = 'v', long, action = ArgAction::Version)]
    pub version: Option<bool>,

    /// The shell command to run. Remaining words are joined with spaces.
    #[arg(
        value_name = "SHELL_COMMAND",
        trailing_var_arg = true
    )]
    pub command: Vec<String>,
}

impl CliArgs {
    /// The shell command, or an error if none was given.
    pub fn shell_command(&self) -> Result<String> {
        let cmd = self.command.join(" ");
        if cmd.trim().is_empty() {
            return Err(DirmonError::ConfigError(
                "shell command is required".to_string(),
            ));
        }
        Ok(cmd)
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
