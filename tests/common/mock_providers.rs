/*!
 * Mock observability helpers for dispatch tests
 */

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use xdocai::DispatchProbe;

/// Probe recording the peak number of concurrently running translation calls
pub struct RecordingProbe {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl RecordingProbe {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            current: AtomicUsize::new(0),
            peak: AtomicUsize::new(0),
        })
    }

    /// Highest number of calls observed in flight at the same time
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

impl DispatchProbe for RecordingProbe {
    fn job_started(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn job_finished(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }
}
