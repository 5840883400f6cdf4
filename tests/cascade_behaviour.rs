// tests/cascade_behaviour.rs

mod common;
use crate::common::{
    init_tracing, run_script_on, MonitorBuilder, RecordingHandler, TestResult, RUBY_SUFFIX,
};

use dirmon::engine::MonitorOptions;

fn cascading() -> MonitorOptions {
    MonitorOptions::default().cascade(true)
}

#[tokio::test]
async fn batched_cascade_delivers_follow_up_changes_in_the_same_cycle() -> TestResult {
    let (monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    let handler = RecordingHandler::new().touching(&fs, "Billy.rb", &["Frank.rb"]);

    let (calls, summary) =
        run_script_on(monitor, &fs, cascading(), &[&["Billy.rb"]], handler).await?;

    assert_eq!(calls, vec!["Billy.rb", "Frank.rb"]);
    // Both deliveries happen within the second cycle.
    assert_eq!(summary.cycles, 2);
    assert_eq!(summary.invocations, 2);
    Ok(())
}

#[tokio::test]
async fn without_cascade_handler_changes_are_absorbed() -> TestResult {
    let (monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    let handler = RecordingHandler::new().touching(&fs, "Billy.rb", &["Frank.rb"]);

    let (calls, _) = run_script_on(
        monitor,
        &fs,
        MonitorOptions::default(),
        &[&["Billy.rb"], &[]],
        handler,
    )
    .await?;

    assert_eq!(calls, vec!["Billy.rb"]);
    Ok(())
}

#[tokio::test]
async fn per_file_cascade_redetects_between_files() -> TestResult {
    let (monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    let handler = RecordingHandler::new().touching(&fs, "Billy.rb", &["Frank.rb"]);

    let (calls, summary) = run_script_on(
        monitor,
        &fs,
        cascading().per_file(true),
        &[&["Cindy.rb", "Billy.rb"]],
        handler,
    )
    .await?;

    assert_eq!(calls, vec!["Billy.rb", "Cindy.rb", "Frank.rb"]);
    assert_eq!(summary.files_delivered, 3);
    Ok(())
}

#[tokio::test]
async fn file_changed_before_its_own_delivery_is_delivered_once() -> TestResult {
    let (monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    let handler = RecordingHandler::new().touching(&fs, "Billy.rb", &["Cindy.rb"]);

    let (calls, _) = run_script_on(
        monitor,
        &fs,
        cascading().per_file(true).force(true),
        &[],
        handler,
    )
    .await?;

    assert_eq!(calls, vec!["Billy.rb", "Cindy.rb", "Frank.rb"]);
    Ok(())
}

#[tokio::test]
async fn unwatched_side_effects_do_not_cascade() -> TestResult {
    let (monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    let handler = RecordingHandler::new().touching(&fs, "Billy.rb", &["Dan.dat", "Ira.rb.foo"]);

    let (calls, _) =
        run_script_on(monitor, &fs, cascading(), &[&["Billy.rb"]], handler).await?;

    assert_eq!(calls, vec!["Billy.rb"]);
    Ok(())
}

#[tokio::test]
async fn self_touching_handler_is_capped_per_cycle() -> TestResult {
    init_tracing();
    let (mut monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    monitor.prime()?;
    let mut handler = RecordingHandler::new().touching(&fs, "Billy.rb", &["Billy.rb"]);
    let options = MonitorOptions {
        cascade_limit: 3,
        ..cascading()
    };

    fs.touch("Billy.rb");
    let report = monitor.run_cycle(&options, &mut handler).await?;
    assert_eq!(report.invocations, 3);
    assert_eq!(report.rescans, 3);

    // The last self-inflicted change was recorded, so the next cycle is quiet.
    let report = monitor.run_cycle(&options, &mut handler).await?;
    assert_eq!(report.invocations, 0);

    assert_eq!(handler.joined(), vec!["Billy.rb"; 3]);
    Ok(())
}

#[tokio::test]
async fn zero_cascade_limit_still_delivers_once() -> TestResult {
    let (mut monitor, fs) = MonitorBuilder::new()
        .with_fixture_files()
        .suffix(RUBY_SUFFIX)
        .build();
    monitor.prime()?;
    let mut handler = RecordingHandler::new();
    let options = MonitorOptions {
        cascade_limit: 0,
        ..cascading()
    };

    fs.touch("Billy.rb");
    let report = monitor.run_cycle(&options, &mut handler).await?;

    assert_eq!(report.invocations, 1);
    assert_eq!(handler.joined(), vec!["Billy.rb"]);
    Ok(())
}
