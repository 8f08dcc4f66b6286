//! Concurrent writers against a shared registry.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use memgauge_core::encoding::encode_registry;
use memgauge_core::{Registry, Sample};

#[test]
fn labeled_increments_are_not_lost() {
    const WORKERS: usize = 8;
    const PER_WORKER: usize = 1_000;

    let r = Arc::new(Registry::new());
    let hits = r.register_counter("hits", "Hits.", &["path"]).unwrap();

    let handles: Vec<_> = (0..WORKERS)
        .map(|i| {
            let hits = Arc::clone(&hits);
            thread::spawn(move || {
                let path = if i % 2 == 0 { "/even" } else { "/odd" };
                for _ in 0..PER_WORKER {
                    hits.with_labels(&[path]).unwrap().inc();
                    hits.with_labels(&["/all"]).unwrap().inc();
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let snap = r.snapshot_all().unwrap();
    let fam = snap.family("hits").unwrap();
    assert_eq!(fam.find(&["/all"]), Some(Sample::Counter((WORKERS * PER_WORKER) as f64)));
    assert_eq!(fam.find(&["/even"]), Some(Sample::Counter((WORKERS / 2 * PER_WORKER) as f64)));
    assert_eq!(fam.find(&["/odd"]), Some(Sample::Counter((WORKERS / 2 * PER_WORKER) as f64)));
    assert_eq!(fam.series.len(), 3);
}

#[test]
fn gauge_set_is_exact_while_other_labels_change() {
    let r = Arc::new(Registry::new());
    let g = r.register_gauge("memory_usage_mb", "Memory.", &["name"]).unwrap();

    let noise = {
        let g = Arc::clone(&g);
        thread::spawn(move || {
            for i in 0..5_000 {
                g.with_labels(&["noisy"]).unwrap().set(i as f64);
            }
        })
    };

    for v in [1.25, 512.0, 0.001, 77.7] {
        let quiet = g.with_labels(&["quiet"]).unwrap();
        quiet.set(v);
        assert_eq!(quiet.get(), v);
    }
    noise.join().unwrap();
}

#[test]
fn summary_snapshots_pair_count_with_sum() {
    let r = Arc::new(Registry::new());
    let latency = r.register_summary("latency_seconds", "Latency.", &[]).unwrap();
    let stop = Arc::new(AtomicBool::new(false));

    let writers: Vec<_> = (0..4)
        .map(|_| {
            let child = latency.get().unwrap();
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    child.observe(1.0);
                }
            })
        })
        .collect();

    for _ in 0..20_000 {
        let snap = r.snapshot_all().unwrap();
        match snap.family("latency_seconds").unwrap().find(&[]) {
            Some(Sample::Summary { count, sum }) => assert_eq!(count as f64, sum),
            other => panic!("unexpected sample {other:?}"),
        }
    }

    stop.store(true, Ordering::Relaxed);
    for w in writers {
        w.join().unwrap();
    }
}

#[test]
fn scrapes_run_alongside_writers() {
    let r = Arc::new(Registry::new());
    let hits = r.register_counter("hits", "Hits.", &["path"]).unwrap();

    let writer = {
        let hits = Arc::clone(&hits);
        thread::spawn(move || {
            for i in 0..2_000 {
                let path = format!("/p{}", i % 50);
                hits.with_labels(&[path.as_str()]).unwrap().inc();
            }
        })
    };

    let mut last_rows = 0;
    for _ in 0..50 {
        let text = encode_registry(&r).unwrap();
        let rows = text.lines().filter(|l| l.starts_with("hits{")).count();
        assert!(rows >= last_rows, "series never disappear");
        last_rows = rows;
    }
    writer.join().unwrap();

    let text = encode_registry(&r).unwrap();
    assert_eq!(text.lines().filter(|l| l.starts_with("hits{")).count(), 50);
}
