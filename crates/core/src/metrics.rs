use resolver_guard_policy::{Decision, DenyReason};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Default)]
pub struct GuardMetrics {
    allowed: AtomicU64,
    denied_no_grant: AtomicU64,
    denied_action: AtomicU64,
    denied_locale: AtomicU64,
    malformed: AtomicU64,
    upstream_failures: AtomicU64,
}

impl GuardMetrics {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn record_decision(&self, decision: &Decision) {
        let counter = match decision {
            Decision::Allow => &self.allowed,
            Decision::Deny(DenyReason::NoGrantForResource) => &self.denied_no_grant,
            Decision::Deny(DenyReason::ActionNotGranted) => &self.denied_action,
            Decision::Deny(DenyReason::LocaleNotGranted) => &self.denied_locale,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_malformed(&self) {
        self.malformed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn inc_upstream_failures(&self) {
        self.upstream_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            allowed: self.allowed.load(Ordering::Relaxed),
            denied_no_grant: self.denied_no_grant.load(Ordering::Relaxed),
            denied_action: self.denied_action.load(Ordering::Relaxed),
            denied_locale: self.denied_locale.load(Ordering::Relaxed),
            malformed: self.malformed.load(Ordering::Relaxed),
            upstream_failures: self.upstream_failures.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub allowed: u64,
    pub denied_no_grant: u64,
    pub denied_action: u64,
    pub denied_locale: u64,
    pub malformed: u64,
    pub upstream_failures: u64,
}

impl MetricsSnapshot {
    pub fn denied(&self) -> u64 {
        self.denied_no_grant + self.denied_action + self.denied_locale
    }

    pub fn decisions(&self) -> u64 {
        self.allowed + self.denied()
    }

    pub fn denial_rate(&self) -> f64 {
        let total = self.decisions();
        if total == 0 {
            return 0.0;
        }
        self.denied() as f64 / total as f64
    }
}
