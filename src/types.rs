use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Serialize;

use crate::error::InvalidArgument;

static NEXT_PERSON_ID: AtomicU64 = AtomicU64::new(1);
static NEXT_COMPANY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a policyholder. Two persons with identical
/// attributes are still distinct customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PersonId(pub u64);

impl PersonId {
    pub(crate) fn next() -> Self {
        PersonId(NEXT_PERSON_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to the issuing company, held by each policy in place of a pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CompanyId(pub u64);

impl CompanyId {
    pub(crate) fn next() -> Self {
        CompanyId(NEXT_COMPANY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Index into a company's policy registry. Only meaningful for the company
/// that returned it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct PolicyId(pub usize);

/// Externally visible policy identifier: fixed-length, alphanumeric.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PolicyNumber(String);

impl PolicyNumber {
    pub const LEN: usize = 16;

    /// Draw a fresh identifier of `LEN` characters. Uniqueness is the
    /// caller's concern; see `InsuranceCompany::create_policy`.
    pub fn generate(rng: &mut impl Rng) -> Self {
        PolicyNumber(rng.sample_iter(Alphanumeric).take(Self::LEN).map(char::from).collect())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for PolicyNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            other => Err(InvalidArgument::InvalidGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
        })
    }
}

/// Lines of business a policy may be written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PolicyType {
    Life,
    Health,
    Automobile,
    Home,
    Travel,
}

impl PolicyType {
    pub const ALL: [PolicyType; 5] = [
        PolicyType::Life,
        PolicyType::Health,
        PolicyType::Automobile,
        PolicyType::Home,
        PolicyType::Travel,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PolicyType::Life => "Life",
            PolicyType::Health => "Health",
            PolicyType::Automobile => "Automobile",
            PolicyType::Home => "Home",
            PolicyType::Travel => "Travel",
        }
    }
}

impl FromStr for PolicyType {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| InvalidArgument::InvalidPolicyType(s.to_string()))
    }
}

impl fmt::Display for PolicyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
