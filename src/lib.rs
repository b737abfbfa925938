pub mod company;
pub mod config;
pub mod credential;
pub mod error;
pub mod events;
pub mod person;
pub mod policy;
pub mod risk;
pub mod types;

pub use company::{InsuranceCompany, compare_by_customer_count};
pub use credential::Credential;
pub use error::{InvalidArgument, Result};
pub use person::{Person, SharedPerson, compare_by_risk};
pub use policy::{InsurancePolicy, PolicyDetails, compare_by_policy_number};
