use std::cmp::Ordering;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::credential::Credential;
use crate::error::{InvalidArgument, Result};
use crate::types::{Gender, PersonId};

pub const MIN_RISK: u8 = 1;
pub const MAX_RISK: u8 = 10;
/// Upper bound for a plausible age in years.
pub const MAX_AGE: u32 = 150;

/// A person shared between its owner and the policies that reference it.
/// Policies only hold a `Weak` to it.
pub type SharedPerson = Arc<RwLock<Person>>;

/// A policyholder.
#[derive(Debug)]
pub struct Person {
    id: PersonId,
    name: String,
    age: u32,
    gender: Gender,
    credential: Credential,
    /// 1 = lowest risk, 10 = highest.
    risk_profile: u8,
    /// Maintained by `InsuranceCompany`, not derived from policy state.
    is_insured: bool,
}

impl Person {
    pub fn new(
        name: &str,
        age: u32,
        gender: &str,
        secret: &str,
        risk_profile: u8,
        is_insured: bool,
    ) -> Result<Self> {
        let gender: Gender = gender.parse()?;
        if !(MIN_RISK..=MAX_RISK).contains(&risk_profile) {
            return Err(InvalidArgument::InvalidRiskProfile(risk_profile));
        }
        if age > MAX_AGE {
            return Err(InvalidArgument::InvalidAge(age));
        }
        Ok(Person {
            id: PersonId::next(),
            name: name.to_string(),
            age,
            gender,
            credential: Credential::new(secret),
            risk_profile,
            is_insured,
        })
    }

    pub fn into_shared(self) -> SharedPerson {
        Arc::new(RwLock::new(self))
    }

    pub fn id(&self) -> PersonId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn risk_profile(&self) -> u8 {
        self.risk_profile
    }

    pub fn is_insured(&self) -> bool {
        self.is_insured
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn verify_secret(&self, candidate: &str) -> bool {
        self.credential.verify(candidate)
    }

    pub fn set_age(&mut self, new_age: u32) -> bool {
        if new_age > MAX_AGE {
            return false;
        }
        self.age = new_age;
        true
    }

    pub fn set_risk_profile(&mut self, new_value: u8) -> bool {
        if !(MIN_RISK..=MAX_RISK).contains(&new_value) {
            return false;
        }
        self.risk_profile = new_value;
        true
    }

    pub fn set_is_insured(&mut self, flag: bool) -> bool {
        self.is_insured = flag;
        true
    }
}

/// Rank by risk profile alone; persons with equal risk compare equal.
pub fn compare_by_risk(a: &Person, b: &Person) -> Ordering {
    a.risk_profile.cmp(&b.risk_profile)
}
