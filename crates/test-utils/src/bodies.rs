//! Canned task bodies and probes for scheduler tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use taskmill::dag::{TaskBody, boxed_body};
use tokio::time::Instant;

/// Body that sleeps for `ms` and then succeeds.
pub fn succeed_after(ms: u64) -> TaskBody {
    boxed_body(move || async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok(())
    })
}

/// Body that sleeps for `ms` and then fails with `message`.
pub fn fail_after(ms: u64, message: &str) -> TaskBody {
    let message = message.to_string();
    boxed_body(move || async move {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Err(anyhow::anyhow!(message))
    })
}

/// Body that never finishes.
pub fn hang() -> TaskBody {
    boxed_body(|| async {
        std::future::pending::<()>().await;
        Ok(())
    })
}

/// Tracks how many instrumented bodies are running at once.
#[derive(Debug, Clone, Default)]
pub struct ConcurrencyProbe {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl ConcurrencyProbe {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body that counts itself as running for `ms`, then succeeds.
    pub fn body(&self, ms: u64) -> TaskBody {
        let probe = self.clone();
        boxed_body(move || async move {
            let now = probe.current.fetch_add(1, Ordering::SeqCst) + 1;
            probe.peak.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(ms)).await;
            probe.current.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        })
    }

    /// Highest number of simultaneously running bodies seen so far.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// One timeline entry recorded by a [`Timeline`] body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mark {
    Start(&'static str),
    End(&'static str),
}

/// Records when instrumented bodies start and finish.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    marks: Arc<Mutex<Vec<(Instant, Mark)>>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Body labelled `label` that runs for `ms` and then succeeds.
    pub fn body(&self, label: &'static str, ms: u64) -> TaskBody {
        let marks = Arc::clone(&self.marks);
        boxed_body(move || async move {
            marks.lock().unwrap().push((Instant::now(), Mark::Start(label)));
            tokio::time::sleep(Duration::from_millis(ms)).await;
            marks.lock().unwrap().push((Instant::now(), Mark::End(label)));
            Ok(())
        })
    }

    /// Marks in recording order.
    pub fn marks(&self) -> Vec<Mark> {
        self.marks.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
    }

    /// Time at which `mark` was recorded.
    pub fn at(&self, mark: &Mark) -> Option<Instant> {
        self.marks
            .lock()
            .unwrap()
            .iter()
            .find(|(_, m)| m == mark)
            .map(|(t, _)| *t)
    }
}
