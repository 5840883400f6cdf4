// tests/real_fs.rs

mod common;
use crate::common::{init_tracing, RecordingHandler, TestResult};

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

use dirmon::engine::{DirectoryMonitor, MonitorOptions};
use dirmon::fs::{FileSystem, RealFileSystem};

fn write(root: &Path, rel: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, rel).unwrap();
    path
}

/// Set an explicit mtime so tests don't depend on timestamp granularity.
fn set_mtime(path: &Path, offset_secs: u64) {
    let stamp = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000 + offset_secs);
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(stamp)
        .unwrap();
}

fn relative(root: &Path, paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            p.strip_prefix(root)
                .unwrap()
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn walk_is_depth_first_sorted_and_skips_directories() -> TestResult {
    let dir = TempDir::new()?;
    let root = dir.path();
    for rel in ["b.rb", "a/z.rb", "a/b/c.rb", "c.txt", "a/a.txt"] {
        write(root, rel);
    }
    fs::create_dir_all(root.join("empty"))?;

    let listed = RealFileSystem.list(root)?;

    assert_eq!(
        relative(root, &listed),
        vec!["a/a.txt", "a/b/c.rb", "a/z.rb", "b.rb", "c.txt"]
    );
    assert_eq!(listed, RealFileSystem.list(root)?);
    Ok(())
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");

    let err = RealFileSystem.list(&missing).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(err.to_string().contains("nope"));
}

#[test]
fn modified_reads_the_file_mtime() -> TestResult {
    let dir = TempDir::new()?;
    let path = write(dir.path(), "x.rb");
    set_mtime(&path, 7);

    assert_eq!(
        RealFileSystem.modified(&path)?,
        SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_007)
    );
    Ok(())
}

#[tokio::test]
async fn monitor_detects_mtime_changes_on_disk() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let root = dir.path();
    let app = write(root, "lib/app.rb");
    let notes = write(root, "notes.txt");
    let spec = write(root, "spec/app_spec.rb");
    for (i, p) in [&app, &notes, &spec].into_iter().enumerate() {
        set_mtime(p, i as u64);
    }

    let mut monitor =
        DirectoryMonitor::new(Arc::new(RealFileSystem), root, r"\.rb", Duration::ZERO)?;
    monitor.prime()?;
    let options = MonitorOptions::default();
    let mut handler = RecordingHandler::new();

    monitor.run_cycle(&options, &mut handler).await?;
    assert!(handler.calls().is_empty());

    set_mtime(&spec, 100);
    set_mtime(&notes, 100);
    set_mtime(&app, 100);
    let report = monitor.run_cycle(&options, &mut handler).await?;

    assert_eq!(
        relative(root, &report.delivered),
        vec!["lib/app.rb", "spec/app_spec.rb"]
    );
    assert_eq!(handler.calls().len(), 1);
    Ok(())
}

#[cfg(unix)]
#[tokio::test]
async fn dangling_symlink_is_watched_by_its_own_mtime() -> TestResult {
    init_tracing();
    let dir = TempDir::new()?;
    let root = dir.path();
    let app = write(root, "app.rb");
    set_mtime(&app, 0);
    // Editor lock files are links to a target that does not exist.
    std::os::unix::fs::symlink("user@host.123", root.join(".#app.rb"))?;

    assert!(RealFileSystem.modified(&root.join(".#app.rb")).is_ok());

    let mut monitor =
        DirectoryMonitor::new(Arc::new(RealFileSystem), root, r"\.rb", Duration::ZERO)?;
    assert_eq!(monitor.prime()?, 2);

    let mut handler = RecordingHandler::new();
    let report = monitor
        .run_cycle(&MonitorOptions::default(), &mut handler)
        .await?;
    assert_eq!(report.invocations, 0);

    set_mtime(&app, 50);
    let report = monitor
        .run_cycle(&MonitorOptions::default(), &mut handler)
        .await?;
    assert_eq!(relative(root, &report.delivered), vec!["app.rb"]);
    Ok(())
}
