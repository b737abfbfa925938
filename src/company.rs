use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::config::BackOfficeConfig;
use crate::credential::Credential;
use crate::error::{InvalidArgument, Result};
use crate::events::{CompanyEvent, EventLog, Operation};
use crate::person::{Person, SharedPerson};
use crate::policy::{InsurancePolicy, Terms};
use crate::risk::{PremiumStreak, RiskAdjustment};
use crate::types::{CompanyId, PolicyId, PolicyNumber};

/// The issuer: owns every policy it writes and keeps the running books.
///
/// Customer-facing operations (`create_policy`, `cancel_policy`,
/// `process_premium`, `file_claim`) authenticate against the policyholder's
/// credential and report failure with `false`, except `create_policy` which
/// returns an error. Administrative getters authenticate against the
/// company's own credential and return `Err` on mismatch.
pub struct InsuranceCompany {
    id: CompanyId,
    company_name: String,
    credential: Credential,
    /// Every policy ever issued, cancelled ones included. `PolicyId(i)` is
    /// `policies[i]`.
    policies: Vec<InsurancePolicy>,
    /// Parallel to `policies`.
    streaks: Vec<PremiumStreak>,
    issued_numbers: HashSet<PolicyNumber>,
    total_premiums_collected: Decimal,
    total_claims_paid: Decimal,
    rng: ChaCha20Rng,
    streak_threshold: u32,
    log: EventLog,
}

impl InsuranceCompany {
    pub fn new(company_name: &str, secret: &str) -> Self {
        Self::with_config(company_name, secret, &BackOfficeConfig::canonical())
    }

    pub fn with_config(company_name: &str, secret: &str, config: &BackOfficeConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha20Rng::seed_from_u64(seed),
            None => ChaCha20Rng::from_rng(&mut rand::rng()),
        };
        InsuranceCompany {
            id: CompanyId::next(),
            company_name: company_name.to_string(),
            credential: Credential::new(secret),
            policies: Vec::new(),
            streaks: Vec::new(),
            issued_numbers: HashSet::new(),
            total_premiums_collected: Decimal::ZERO,
            total_claims_paid: Decimal::ZERO,
            rng,
            streak_threshold: config.premium_streak_threshold,
            log: EventLog::new(),
        }
    }

    pub fn id(&self) -> CompanyId {
        self.id
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn policy(&self, policy_id: PolicyId) -> Option<&InsurancePolicy> {
        self.policies.get(policy_id.0)
    }

    /// For owner-gated edits of policy terms; the setters check the secret.
    pub fn policy_mut(&mut self, policy_id: PolicyId) -> Option<&mut InsurancePolicy> {
        self.policies.get_mut(policy_id.0)
    }

    /// Premiums processed on this policy since creation or its last claim.
    pub fn consecutive_premiums(&self, policy_id: PolicyId) -> Option<u32> {
        self.streaks.get(policy_id.0).map(PremiumStreak::count)
    }

    /// Distinct policyholders across the registry, cancelled policies included.
    pub fn customer_count(&self) -> usize {
        self.policies
            .iter()
            .map(InsurancePolicy::owner_id)
            .collect::<HashSet<_>>()
            .len()
    }

    fn fresh_policy_number(&mut self) -> PolicyNumber {
        loop {
            let candidate = PolicyNumber::generate(&mut self.rng);
            if !self.issued_numbers.contains(&candidate) {
                return candidate;
            }
            debug!(policy_number = %candidate, "policy number collision, redrawing");
        }
    }

    fn deny(&mut self, operation: Operation, policy_id: Option<PolicyId>) {
        warn!(company = %self.company_name, ?operation, ?policy_id, "authentication failed");
        self.log.push(CompanyEvent::AuthenticationFailed { operation, policy_id });
    }

    /// The live owner of `policy_id`. A dropped owner counts as a failed
    /// authentication.
    fn owner_handle(&mut self, policy_id: PolicyId, operation: Operation) -> Option<SharedPerson> {
        let Some(policy) = self.policies.get(policy_id.0) else {
            warn!(company = %self.company_name, ?policy_id, ?operation, "unknown policy");
            self.log.push(CompanyEvent::UnknownPolicy { operation, policy_id });
            return None;
        };
        let handle = policy.owner();
        if handle.is_none() {
            self.deny(operation, Some(policy_id));
        }
        handle
    }

    fn adjust_risk(&mut self, owner: &mut Person, adjustment: RiskAdjustment) {
        let from = owner.risk_profile();
        let to = adjustment.apply(from);
        if from != to && owner.set_risk_profile(to) {
            info!(owner = ?owner.id(), from, to, ?adjustment, "risk profile adjusted");
            self.log.push(CompanyEvent::RiskAdjusted {
                owner_id: owner.id(),
                adjustment,
                from,
                to,
            });
        }
    }

    fn authorize_admin(&self, candidate: &str) -> Result<()> {
        if self.credential.verify(candidate) {
            Ok(())
        } else {
            warn!(company = %self.company_name, "administrative access denied");
            Err(InvalidArgument::AuthenticationDenied)
        }
    }

    /// Issue a new policy to `person`, authenticated by the person's own
    /// secret. On any error neither the registry nor the person changes.
    pub fn create_policy(
        &mut self,
        person: &SharedPerson,
        candidate: &str,
        policy_type: &str,
        premium_amount: Decimal,
        coverage_amount: Decimal,
    ) -> Result<PolicyId> {
        let mut owner = person.write();
        if !owner.verify_secret(candidate) {
            self.deny(Operation::CreatePolicy, None);
            return Err(InvalidArgument::AuthenticationDenied);
        }

        let terms = match Terms::parse(policy_type, premium_amount, coverage_amount) {
            Ok(terms) => terms,
            Err(err) => {
                warn!(company = %self.company_name, owner = ?owner.id(), %err, "policy refused");
                self.log.push(CompanyEvent::PolicyRejected {
                    owner_id: owner.id(),
                    reason: err.to_string(),
                });
                return Err(err);
            }
        };

        let policy_number = self.fresh_policy_number();
        let policy = InsurancePolicy::issue(
            Arc::downgrade(person),
            owner.id(),
            self.id,
            terms,
            policy_number.clone(),
        );

        let policy_id = PolicyId(self.policies.len());
        self.issued_numbers.insert(policy_number.clone());
        self.log.push(CompanyEvent::PolicyCreated {
            policy_id,
            policy_number: policy_number.clone(),
            owner_id: owner.id(),
            policy_type: policy.policy_type(),
            premium_amount,
            coverage_amount,
        });
        self.policies.push(policy);
        self.streaks.push(PremiumStreak::new(self.streak_threshold));
        owner.set_is_insured(true);

        info!(
            company = %self.company_name,
            %policy_number,
            owner = ?owner.id(),
            policy_type,
            "policy created"
        );
        Ok(policy_id)
    }

    /// Mark the policy inactive. It stays in the registry and the owner's
    /// `is_insured` flag is left as it was.
    pub fn cancel_policy(&mut self, policy_id: PolicyId, candidate: &str) -> bool {
        let Some(handle) = self.owner_handle(policy_id, Operation::CancelPolicy) else {
            return false;
        };
        if !handle.read().verify_secret(candidate) {
            self.deny(Operation::CancelPolicy, Some(policy_id));
            return false;
        }

        self.policies[policy_id.0].cancel();
        self.log.push(CompanyEvent::PolicyCancelled { policy_id });
        info!(company = %self.company_name, ?policy_id, "policy cancelled");
        true
    }

    pub fn process_premium(&mut self, policy_id: PolicyId, candidate: &str, amount: Decimal) -> bool {
        let Some(handle) = self.owner_handle(policy_id, Operation::ProcessPremium) else {
            return false;
        };
        let mut owner = handle.write();
        if !owner.verify_secret(candidate) {
            self.deny(Operation::ProcessPremium, Some(policy_id));
            return false;
        }
        if amount < Decimal::ZERO {
            warn!(?policy_id, %amount, "negative premium refused");
            self.log.push(CompanyEvent::PremiumRejected { policy_id, amount });
            return false;
        }

        self.total_premiums_collected += amount;
        let streak = &mut self.streaks[policy_id.0];
        let adjustment = streak.on_premium();
        let count = streak.count();
        self.log.push(CompanyEvent::PremiumProcessed { policy_id, amount, streak: count });
        debug!(?policy_id, %amount, streak = count, "premium processed");

        if let Some(adjustment) = adjustment {
            self.adjust_risk(&mut owner, adjustment);
        }
        true
    }

    /// Pay a claim against the policy. Claims above the policy's coverage
    /// are refused without touching any state.
    pub fn file_claim(&mut self, policy_id: PolicyId, candidate: &str, amount: Decimal) -> bool {
        let Some(handle) = self.owner_handle(policy_id, Operation::FileClaim) else {
            return false;
        };
        let mut owner = handle.write();
        if !owner.verify_secret(candidate) {
            self.deny(Operation::FileClaim, Some(policy_id));
            return false;
        }

        let coverage_amount = self.policies[policy_id.0].coverage_amount();
        if amount < Decimal::ZERO || amount > coverage_amount {
            info!(?policy_id, %amount, %coverage_amount, "claim rejected");
            self.log.push(CompanyEvent::ClaimRejected { policy_id, amount, coverage_amount });
            return false;
        }

        self.total_claims_paid += amount;
        let adjustment = self.streaks[policy_id.0].on_claim();
        self.log.push(CompanyEvent::ClaimFiled { policy_id, amount });
        info!(company = %self.company_name, ?policy_id, %amount, "claim paid");

        self.adjust_risk(&mut owner, adjustment);
        true
    }

    pub fn get_policies(&self, candidate: &str) -> Result<&[InsurancePolicy]> {
        self.authorize_admin(candidate)?;
        Ok(&self.policies)
    }

    /// Distinct, still-live policyholders in order of their first policy.
    pub fn get_customers(&self, candidate: &str) -> Result<Vec<SharedPerson>> {
        self.authorize_admin(candidate)?;
        let mut seen = HashSet::new();
        Ok(self
            .policies
            .iter()
            .filter(|p| seen.insert(p.owner_id()))
            .filter_map(InsurancePolicy::owner)
            .collect())
    }

    pub fn get_total_premiums_collected(&self, candidate: &str) -> Result<Decimal> {
        self.authorize_admin(candidate)?;
        Ok(self.total_premiums_collected)
    }

    pub fn get_total_claims_paid(&self, candidate: &str) -> Result<Decimal> {
        self.authorize_admin(candidate)?;
        Ok(self.total_claims_paid)
    }

    pub fn get_audit_log(&self, candidate: &str) -> Result<&EventLog> {
        self.authorize_admin(candidate)?;
        Ok(&self.log)
    }
}

/// Rank companies by how many distinct customers they have written.
pub fn compare_by_customer_count(a: &InsuranceCompany, b: &InsuranceCompany) -> Ordering {
    a.customer_count().cmp(&b.customer_count())
}
