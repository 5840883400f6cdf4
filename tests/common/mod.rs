#![allow(dead_code)]

pub use dirmon_test_utils::{
    init_tracing, with_timeout, MonitorBuilder, RecordingHandler, ScriptedClock,
};

use std::error::Error;

use dirmon::engine::{DirectoryMonitor, MonitorOptions, RunSummary, Runtime};
use dirmon::fs::mock::MockFileSystem;
use tokio_util::sync::CancellationToken;

pub type TestResult = Result<(), Box<dyn Error>>;

/// Pattern used by most behaviour tests: Ruby files, plus an alternative
/// that never matches, to check alternations are grouped before anchoring.
pub const RUBY_SUFFIX: &str = r"\.rb|xyzzy";

/// Run the full loop over the fixture tree.
///
/// `script` lists what gets touched during each sleep; the loop runs one
/// cycle more than there are steps. Returns the recorded deliveries (joined
/// with spaces, the way the CLI substitutes them) and the run summary.
pub async fn run_script(
    options: MonitorOptions,
    script: &[&[&str]],
) -> Result<(Vec<String>, RunSummary), Box<dyn Error>> {
    let (monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    run_script_on(monitor, &fs, options, script, RecordingHandler::new()).await
}

/// Like [`run_script`], but with a caller-built monitor and handler.
pub async fn run_script_on(
    monitor: DirectoryMonitor,
    fs: &MockFileSystem,
    options: MonitorOptions,
    script: &[&[&str]],
    handler: RecordingHandler,
) -> Result<(Vec<String>, RunSummary), Box<dyn Error>> {
    init_tracing();

    let cancel = CancellationToken::new();
    let mut clock = ScriptedClock::new(fs, &cancel);
    for step in script {
        clock = clock.then_touch(step);
    }

    let recorder = handler.clone();
    let mut runtime = Runtime::new(monitor, options, clock, handler);
    let summary = with_timeout(runtime.run(&cancel)).await?;

    Ok((recorder.joined(), summary))
}
