//! Per-policy premium streak that drives automatic risk-profile changes.
//!
//! A streak counts successful premiums since the policy was created or last
//! claimed against. Reaching the threshold lowers the owner's risk by one and
//! restarts the streak; any claim raises the owner's risk by one and restarts
//! it unconditionally.

use serde::Serialize;

use crate::person::{MAX_RISK, MIN_RISK};

/// Direction of a risk-profile change triggered by policy activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskAdjustment {
    Decrease,
    Increase,
}

impl RiskAdjustment {
    /// New risk after applying this adjustment, clamped to `[MIN_RISK, MAX_RISK]`.
    pub fn apply(self, risk: u8) -> u8 {
        match self {
            RiskAdjustment::Decrease => risk.saturating_sub(1).max(MIN_RISK),
            RiskAdjustment::Increase => risk.saturating_add(1).min(MAX_RISK),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PremiumStreak {
    count: u32,
    threshold: u32,
}

impl PremiumStreak {
    pub fn new(threshold: u32) -> Self {
        PremiumStreak { count: 0, threshold: threshold.max(1) }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// Record a processed premium. Returns `Decrease` when the streak
    /// reaches the threshold; the streak is then reset to zero.
    pub fn on_premium(&mut self) -> Option<RiskAdjustment> {
        self.count += 1;
        if self.count >= self.threshold {
            self.count = 0;
            Some(RiskAdjustment::Decrease)
        } else {
            None
        }
    }

    /// Record a paid claim.
    pub fn on_claim(&mut self) -> RiskAdjustment {
        self.count = 0;
        RiskAdjustment::Increase
    }
}
