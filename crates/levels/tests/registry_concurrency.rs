//! Integration tests for concurrent registry access.
//!
//! These tests stress the single readers/writer lock from many threads:
//! racing entry creation for one name must converge on one cell, bulk
//! updates must serialize, and readers must never observe a partially
//! applied pattern.

use std::sync::Arc;
use std::thread;

use levels::{LevelManager, LevelRegistry, LevelSpec};
use logging::{Severity, WriterSink};

fn shared_registry() -> Arc<LevelRegistry> {
    Arc::new(LevelRegistry::new(
        Arc::new(WriterSink::new(Vec::new())),
        Severity::Info,
    ))
}

/// Verifies racing `level` calls for one name agree on a single cell.
#[test]
fn racing_creation_converges_on_one_cell() {
    let registry = shared_registry();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || registry.level("Contended"))
        })
        .collect();

    let cells: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread completes"))
        .collect();

    cells[0].set(Severity::Fatal);
    assert!(
        cells.iter().all(|cell| cell.get() == Severity::Fatal),
        "all threads must share the same threshold cell"
    );
}

/// Verifies overlapping bulk updates serialize: every matched entry ends
/// at one of the two competing values, never a mix within one update.
#[test]
fn overlapping_bulk_updates_serialize() {
    let registry = shared_registry();
    for i in 0..32 {
        registry.level(&format!("Worker.{i}"));
    }

    let writers: Vec<_> = [Severity::Debug, Severity::Error]
        .into_iter()
        .map(|severity| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..50 {
                    assert!(registry.set_level("Worker.*", LevelSpec::from(severity)));
                }
            })
        })
        .collect();

    for writer in writers {
        writer.join().expect("writer completes");
    }

    // Both writers finished; the last update fully applied, so every
    // worker entry holds the same severity.
    let first = registry.level("Worker.0").get();
    assert!(first == Severity::Debug || first == Severity::Error);
    for i in 1..32 {
        assert_eq!(registry.level(&format!("Worker.{i}")).get(), first);
    }
}

/// Verifies renders taken while writers run are internally consistent
/// snapshots of comma-joined sorted pairs.
#[test]
fn concurrent_renders_see_consistent_snapshots() {
    let registry = shared_registry();
    for i in 0..16 {
        registry.level(&format!("Sub.{i}"));
    }

    let writer = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for round in 0..100 {
                let severity = if round % 2 == 0 {
                    Severity::Debug
                } else {
                    Severity::Warn
                };
                registry.set_level("Sub.*", LevelSpec::from(severity));
            }
        })
    };

    let reader = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for _ in 0..100 {
                let rendered = registry.render();
                let pairs: Vec<&str> = rendered.split(',').collect();
                assert_eq!(pairs.len(), 17, "snapshot lost entries: {rendered}");
                let mut sorted = pairs.clone();
                sorted.sort_unstable();
                assert_eq!(pairs, sorted, "render must stay sorted: {rendered}");

                // A bulk update holds the exclusive lock for its whole
                // pass, so a snapshot shows the pattern fully applied or
                // not at all - never a mix across the matched family.
                let sub_levels: Vec<&str> = pairs
                    .iter()
                    .filter(|pair| pair.starts_with("Sub."))
                    .filter_map(|pair| pair.split(':').nth(1))
                    .collect();
                assert!(
                    sub_levels.windows(2).all(|w| w[0] == w[1]),
                    "partially applied pattern observed: {rendered}"
                );
            }
        })
    };

    writer.join().expect("writer completes");
    reader.join().expect("reader completes");
}

/// Verifies handles issued before concurrent churn keep logging safely
/// while their thresholds move under them.
#[test]
fn issued_handles_survive_concurrent_retuning() {
    let registry = shared_registry();
    let logger = registry.named("Churn", &[]);

    let tuner = {
        let registry = Arc::clone(&registry);
        thread::spawn(move || {
            for round in 0..200 {
                let severity = if round % 2 == 0 {
                    Severity::Trace
                } else {
                    Severity::Fatal
                };
                registry.set_level("Churn", LevelSpec::from(severity));
            }
        })
    };

    for _ in 0..200 {
        logger.info("spin").expect("emit never fails on a vec sink");
    }

    tuner.join().expect("tuner completes");
}
