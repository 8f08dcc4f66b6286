use std::sync::{Mutex, MutexGuard};
use std::time::Instant;

use crate::snapshot::Sample;

use super::{Metric, MetricKind};

#[derive(Debug, Default, Clone, Copy)]
struct SummaryState {
    count: u64,
    sum: f64,
}

/// Count and sum of observations. No quantiles are tracked.
///
/// The `(count, sum)` pair sits behind a per-series mutex, so an observation
/// and a read never interleave: every sample is a pair some sequence of whole
/// observations produced. The lock is held for one addition.
#[derive(Debug, Default)]
pub struct Summary {
    state: Mutex<SummaryState>,
}

impl Summary {
    /// The state is plain numbers updated without panicking, so a poisoned
    /// lock still guards a consistent pair.
    fn lock(&self) -> MutexGuard<'_, SummaryState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn observe(&self, v: f64) {
        let mut s = self.lock();
        s.count += 1;
        s.sum += v;
    }

    /// Observe elapsed wall time in seconds when the returned guard drops.
    pub fn start_timer(&self) -> SummaryTimer<'_> {
        SummaryTimer {
            summary: self,
            start: Instant::now(),
        }
    }

    pub fn count(&self) -> u64 {
        self.lock().count
    }

    pub fn sum(&self) -> f64 {
        self.lock().sum
    }

    /// `sum / count`, or 0 when nothing was observed.
    pub fn average(&self) -> f64 {
        let s = *self.lock();
        if s.count == 0 {
            0.0
        } else {
            s.sum / s.count as f64
        }
    }
}

impl Metric for Summary {
    const KIND: MetricKind = MetricKind::Summary;

    fn sample(&self) -> Sample {
        let s = *self.lock();
        Sample::Summary {
            count: s.count,
            sum: s.sum,
        }
    }
}

/// Guard returned by [`Summary::start_timer`].
pub struct SummaryTimer<'a> {
    summary: &'a Summary,
    start: Instant,
}

impl Drop for SummaryTimer<'_> {
    fn drop(&mut self) {
        self.summary.observe(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[test]
    fn average_of_empty_summary_is_zero() {
        let s = Summary::default();
        assert_eq!(s.count(), 0);
        assert_eq!(s.average(), 0.0);
    }

    #[test]
    fn observe_tracks_count_and_sum() {
        let s = Summary::default();
        s.observe(1.0);
        s.observe(2.0);
        s.observe(6.0);
        assert_eq!(s.count(), 3);
        assert_eq!(s.sum(), 9.0);
        assert_eq!(s.average(), 3.0);
    }

    #[test]
    fn timer_observes_on_drop() {
        let s = Summary::default();
        {
            let _t = s.start_timer();
        }
        assert_eq!(s.count(), 1);
        assert!(s.sum() >= 0.0);
    }

    #[test]
    fn samples_never_split_an_observation() {
        let s = Arc::new(Summary::default());
        let stop = Arc::new(AtomicBool::new(false));

        let writers: Vec<_> = (0..4)
            .map(|_| {
                let s = Arc::clone(&s);
                let stop = Arc::clone(&stop);
                std::thread::spawn(move || {
                    while !stop.load(Ordering::Relaxed) {
                        s.observe(1.0);
                    }
                })
            })
            .collect();

        for _ in 0..20_000 {
            match s.sample() {
                Sample::Summary { count, sum } => assert_eq!(count as f64, sum),
                other => panic!("unexpected sample {other:?}"),
            }
        }

        stop.store(true, Ordering::Relaxed);
        for w in writers {
            w.join().unwrap();
        }
        assert_eq!(s.count() as f64, s.sum());
    }
}
