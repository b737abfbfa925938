use policydesk::config::BackOfficeConfig;
use policydesk::types::{PolicyId, PolicyType};
use policydesk::{InsuranceCompany, Person, SharedPerson};
use rust_decimal::Decimal;

pub const COMPANY_KEY: &str = "bench-admin";

pub struct Scenario {
    pub customers: usize,
    pub policies_per_customer: usize,
}

pub const SMALL: Scenario = Scenario { customers: 10, policies_per_customer: 1 };

pub const MEDIUM: Scenario = Scenario { customers: 200, policies_per_customer: 2 };

pub const LARGE: Scenario = Scenario { customers: 2_000, policies_per_customer: 3 };

pub fn secret_for(n: usize) -> String {
    format!("bench-fp-{n}")
}

pub fn make_customers(n: usize) -> Vec<SharedPerson> {
    (0..n)
        .map(|i| {
            let gender = if i % 2 == 0 { "Male" } else { "Female" };
            Person::new(&format!("Customer {i}"), 30 + (i % 40) as u32, gender, &secret_for(i), 5, false)
                .expect("valid bench person")
                .into_shared()
        })
        .collect()
}

/// A seeded company with every customer holding `policies_per_customer`
/// policies. Returns the handles alongside the owner index.
pub fn build_book(
    scenario: &Scenario,
    seed: u64,
) -> (InsuranceCompany, Vec<SharedPerson>, Vec<(PolicyId, usize)>) {
    let customers = make_customers(scenario.customers);
    let mut company =
        InsuranceCompany::with_config("Bench Mutual", COMPANY_KEY, &BackOfficeConfig::seeded(seed));
    let mut handles = Vec::with_capacity(scenario.customers * scenario.policies_per_customer);
    for (i, person) in customers.iter().enumerate() {
        for k in 0..scenario.policies_per_customer {
            let kind = PolicyType::ALL[k % PolicyType::ALL.len()];
            let id = company
                .create_policy(
                    person,
                    &secret_for(i),
                    kind.as_str(),
                    Decimal::new(10_000, 2),
                    Decimal::new(1_000_000, 2),
                )
                .expect("bench policy");
            handles.push((id, i));
        }
    }
    (company, customers, handles)
}
