use std::io::{self, Write};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::risk::RiskAdjustment;
use crate::types::{PersonId, PolicyId, PolicyNumber, PolicyType};

/// Which gated operation an authentication failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Operation {
    CreatePolicy,
    CancelPolicy,
    ProcessPremium,
    FileClaim,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CompanyEvent {
    PolicyCreated {
        policy_id: PolicyId,
        policy_number: PolicyNumber,
        owner_id: PersonId,
        policy_type: PolicyType,
        premium_amount: Decimal,
        coverage_amount: Decimal,
    },
    /// Creation refused after the owner authenticated: unknown policy type
    /// or a negative amount. No policy number was drawn.
    PolicyRejected {
        owner_id: PersonId,
        reason: String,
    },
    PolicyCancelled {
        policy_id: PolicyId,
    },
    PremiumProcessed {
        policy_id: PolicyId,
        amount: Decimal,
        streak: u32,
    },
    PremiumRejected {
        policy_id: PolicyId,
        amount: Decimal,
    },
    ClaimFiled {
        policy_id: PolicyId,
        amount: Decimal,
    },
    /// Claim refused on business rules: exceeds coverage or negative.
    ClaimRejected {
        policy_id: PolicyId,
        amount: Decimal,
        coverage_amount: Decimal,
    },
    RiskAdjusted {
        owner_id: PersonId,
        adjustment: RiskAdjustment,
        from: u8,
        to: u8,
    },
    /// Carries no secret or digest, only what was attempted.
    AuthenticationFailed {
        operation: Operation,
        policy_id: Option<PolicyId>,
    },
    /// The id was never issued by this company.
    UnknownPolicy {
        operation: Operation,
        policy_id: PolicyId,
    },
}

/// Log record. `seq` is the entry's index in the log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub seq: u64,
    pub event: CompanyEvent,
}

/// Append-only record of everything a company did, in order.
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { entries: Vec::new() }
    }

    pub fn push(&mut self, event: CompanyEvent) {
        let seq = self.entries.len() as u64;
        self.entries.push(LogEntry { seq, event });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// One JSON object per line.
    pub fn write_ndjson<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for entry in &self.entries {
            serde_json::to_writer(&mut writer, entry)?;
            writeln!(writer)?;
        }
        writer.flush()
    }
}
