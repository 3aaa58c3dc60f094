use std::sync::atomic::{AtomicU64, Ordering};

use backend_domain::CheckInOutcome;

#[derive(Debug, Default)]
pub struct Metrics {
    scans: AtomicU64,
    ignored_frames: AtomicU64,
    check_ins: AtomicU64,
    already_checked_in: AtomicU64,
    rejections: AtomicU64,
    store_failures: AtomicU64,
}

impl Metrics {
    pub fn record_scan(&self) {
        self.scans.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignored_frame(&self) {
        self.ignored_frames.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_outcome(&self, outcome: &CheckInOutcome) {
        let counter = match outcome {
            CheckInOutcome::CheckedIn { .. } => &self.check_ins,
            CheckInOutcome::AlreadyCheckedIn { .. } => &self.already_checked_in,
            CheckInOutcome::Rejected(err) if err.is_transient() => &self.store_failures,
            CheckInOutcome::Rejected(_) => &self.rejections,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn check_ins(&self) -> u64 {
        self.check_ins.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let scans = self.scans.load(Ordering::Relaxed);
        let ignored = self.ignored_frames.load(Ordering::Relaxed);
        let check_ins = self.check_ins.load(Ordering::Relaxed);
        let already = self.already_checked_in.load(Ordering::Relaxed);
        let rejections = self.rejections.load(Ordering::Relaxed);
        let failures = self.store_failures.load(Ordering::Relaxed);

        format!(
            "# TYPE dewana_scans_total counter\n\
dewana_scans_total {}\n\
# TYPE dewana_ignored_frames_total counter\n\
dewana_ignored_frames_total {}\n\
# TYPE dewana_check_ins_total counter\n\
dewana_check_ins_total {}\n\
# TYPE dewana_already_checked_in_total counter\n\
dewana_already_checked_in_total {}\n\
# TYPE dewana_check_in_rejections_total counter\n\
dewana_check_in_rejections_total {}\n\
# TYPE dewana_store_failures_total counter\n\
dewana_store_failures_total {}\n",
            scans, ignored, check_ins, already, rejections, failures
        )
    }
}
