use std::cmp::Ordering;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::error::{InvalidArgument, Result};
use crate::person::{Person, SharedPerson};
use crate::types::{CompanyId, PersonId, PolicyNumber, PolicyType};

/// A policy binding one person to one issuing company.
///
/// Every write is gated by the owner's credential. The owner is held weakly:
/// once the caller drops the person, no secret can authenticate against
/// the policy any more.
#[derive(Debug)]
pub struct InsurancePolicy {
    owner: Weak<RwLock<Person>>,
    owner_id: PersonId,
    issuer: CompanyId,
    policy_type: PolicyType,
    premium_amount: Decimal,
    coverage_amount: Decimal,
    /// `true` while active. Only ever moves `true → false`.
    status: bool,
    policy_number: PolicyNumber,
}

/// Read-only snapshot returned to an authenticated owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyDetails {
    pub policy_number: PolicyNumber,
    pub owner_id: PersonId,
    pub owner_name: String,
    pub issuer: CompanyId,
    pub policy_type: PolicyType,
    pub premium_amount: Decimal,
    pub coverage_amount: Decimal,
    pub active: bool,
}

fn non_negative(field: &'static str, value: Decimal) -> Result<Decimal> {
    if value < Decimal::ZERO {
        return Err(InvalidArgument::NegativeAmount { field, value: value.to_string() });
    }
    Ok(value)
}

/// Policy terms that passed validation. Checked before a policy number is
/// drawn, so a refused request leaves the number stream untouched.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Terms {
    pub policy_type: PolicyType,
    pub premium_amount: Decimal,
    pub coverage_amount: Decimal,
}

impl Terms {
    pub(crate) fn parse(
        policy_type: &str,
        premium_amount: Decimal,
        coverage_amount: Decimal,
    ) -> Result<Self> {
        Ok(Terms {
            policy_type: policy_type.parse()?,
            premium_amount: non_negative("premium_amount", premium_amount)?,
            coverage_amount: non_negative("coverage_amount", coverage_amount)?,
        })
    }
}

impl InsurancePolicy {
    /// Stand-alone construction with a thread-local random policy number.
    /// Policies issued through `InsuranceCompany::create_policy` are also
    /// guaranteed unique within that company.
    pub fn new(
        owner: &SharedPerson,
        issuer: CompanyId,
        policy_type: &str,
        premium_amount: Decimal,
        coverage_amount: Decimal,
    ) -> Result<Self> {
        let terms = Terms::parse(policy_type, premium_amount, coverage_amount)?;
        let owner_id = owner.read().id();
        let number = PolicyNumber::generate(&mut rand::rng());
        Ok(Self::issue(Arc::downgrade(owner), owner_id, issuer, terms, number))
    }

    /// Does not lock the owner, so callers may already hold its write guard.
    pub(crate) fn issue(
        owner: Weak<RwLock<Person>>,
        owner_id: PersonId,
        issuer: CompanyId,
        terms: Terms,
        policy_number: PolicyNumber,
    ) -> Self {
        InsurancePolicy {
            owner,
            owner_id,
            issuer,
            policy_type: terms.policy_type,
            premium_amount: terms.premium_amount,
            coverage_amount: terms.coverage_amount,
            status: true,
            policy_number,
        }
    }

    /// The owner, if the caller still holds it.
    pub fn owner(&self) -> Option<SharedPerson> {
        self.owner.upgrade()
    }

    pub fn owner_id(&self) -> PersonId {
        self.owner_id
    }

    pub fn issuer(&self) -> CompanyId {
        self.issuer
    }

    pub fn policy_type(&self) -> PolicyType {
        self.policy_type
    }

    pub fn premium_amount(&self) -> Decimal {
        self.premium_amount
    }

    pub fn coverage_amount(&self) -> Decimal {
        self.coverage_amount
    }

    pub fn is_active(&self) -> bool {
        self.status
    }

    pub fn policy_number(&self) -> &PolicyNumber {
        &self.policy_number
    }

    fn authorize(&self, candidate: &str, action: &'static str) -> bool {
        let ok = self
            .owner
            .upgrade()
            .is_some_and(|owner| owner.read().verify_secret(candidate));
        if !ok {
            warn!(policy_number = %self.policy_number, action, "owner authentication failed");
        }
        ok
    }

    pub fn get_policy_details(&self, candidate: &str) -> Result<PolicyDetails> {
        let owner = self.owner.upgrade().ok_or(InvalidArgument::AuthenticationDenied)?;
        let owner = owner.read();
        if !owner.verify_secret(candidate) {
            warn!(policy_number = %self.policy_number, "policy details denied");
            return Err(InvalidArgument::AuthenticationDenied);
        }
        Ok(PolicyDetails {
            policy_number: self.policy_number.clone(),
            owner_id: self.owner_id,
            owner_name: owner.name().to_string(),
            issuer: self.issuer,
            policy_type: self.policy_type,
            premium_amount: self.premium_amount,
            coverage_amount: self.coverage_amount,
            active: self.status,
        })
    }

    pub fn set_policy_type(&mut self, new_type: PolicyType, candidate: &str) -> bool {
        if !self.authorize(candidate, "set_policy_type") {
            return false;
        }
        self.policy_type = new_type;
        true
    }

    pub fn set_premium_amount(&mut self, amount: Decimal, candidate: &str) -> bool {
        if non_negative("premium_amount", amount).is_err()
            || !self.authorize(candidate, "set_premium_amount")
        {
            return false;
        }
        self.premium_amount = amount;
        true
    }

    pub fn set_coverage_amount(&mut self, amount: Decimal, candidate: &str) -> bool {
        if non_negative("coverage_amount", amount).is_err()
            || !self.authorize(candidate, "set_coverage_amount")
        {
            return false;
        }
        self.coverage_amount = amount;
        true
    }

    /// Cancellation is one-way: asking to reactivate a cancelled policy
    /// fails even with the right secret.
    pub fn set_status(&mut self, active: bool, candidate: &str) -> bool {
        if active && !self.status {
            return false;
        }
        if !self.authorize(candidate, "set_status") {
            return false;
        }
        self.status = active;
        true
    }

    /// Cancel without re-checking the owner; the caller has already done so.
    pub(crate) fn cancel(&mut self) {
        self.status = false;
    }
}

/// Lexicographic on the policy number.
pub fn compare_by_policy_number(a: &InsurancePolicy, b: &InsurancePolicy) -> Ordering {
    a.policy_number.cmp(&b.policy_number)
}
