// tests/shell_command.rs

mod common;
use crate::common::{init_tracing, TestResult};

use std::path::PathBuf;

use dirmon::exec::{render_command, ChangeHandler, ShellCommand};

fn paths(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

#[test]
fn token_is_replaced_with_space_joined_paths() {
    assert_eq!(
        render_command("echo %% changed", "%%", &paths(&["./a.rb", "./b.rb"])),
        "echo ./a.rb ./b.rb changed"
    );
}

#[test]
fn every_occurrence_is_replaced() {
    assert_eq!(
        render_command("cp FILE FILE.bak", "FILE", &paths(&["x.txt"])),
        "cp x.txt x.txt.bak"
    );
}

#[test]
fn command_without_token_runs_unchanged() {
    assert_eq!(render_command("rake", "%%", &paths(&["a.rb"])), "rake");
}

#[cfg(unix)]
#[tokio::test]
async fn shell_command_runs_with_substituted_paths() -> TestResult {
    init_tracing();
    let dir = tempfile::TempDir::new()?;
    let out = dir.path().join("out.txt");

    let template = format!("printf '%s\\n' %% >> {}", out.display());
    let mut handler = ShellCommand::new(template, "%%", false);

    handler.handle(paths(&["Billy.rb", "Cindy.rb"])).await?;
    handler.handle(paths(&["Frank.rb"])).await?;

    let written = std::fs::read_to_string(&out)?;
    assert_eq!(written, "Billy.rb\nCindy.rb\nFrank.rb\n");
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn failing_command_does_not_stop_watching() -> TestResult {
    init_tracing();
    let mut handler = ShellCommand::new("exit 3", "%%", false);

    handler.handle(paths(&["a.rb"])).await?;
    Ok(())
}
