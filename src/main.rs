use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufWriter;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use policydesk::config::BackOfficeConfig;
use policydesk::types::PolicyType;
use policydesk::{InsuranceCompany, Person, SharedPerson, compare_by_risk};

const COMPANY_KEY: &str = "replay-admin";

/// Replays a seeded book of business through one company: every customer
/// buys a policy, pays monthly premiums and now and then files a claim.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let mut seed: u64 = 42;
    let mut customers: usize = 25;
    let mut months: u32 = 12;
    let mut output_path = "audit.ndjson".to_string();
    let mut quiet = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                seed = args[i].parse().expect("--seed requires a u64");
            }
            "--customers" => {
                i += 1;
                customers = args[i].parse().expect("--customers requires a positive integer");
            }
            "--months" => {
                i += 1;
                months = args[i].parse().expect("--months requires a u32");
            }
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--quiet" => quiet = true,
            _ => {}
        }
        i += 1;
    }

    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let mut company =
        InsuranceCompany::with_config("Replay Mutual", COMPANY_KEY, &BackOfficeConfig::seeded(seed));

    let mut book: Vec<(SharedPerson, String)> = Vec::with_capacity(customers);
    for n in 0..customers {
        let secret = format!("fp-{seed}-{n}");
        let gender = if rng.random_bool(0.5) { "Male" } else { "Female" };
        let person = Person::new(
            &format!("Customer {n}"),
            rng.random_range(18..80),
            gender,
            &secret,
            rng.random_range(1..=10),
            false,
        )
        .expect("generated person is valid")
        .into_shared();
        book.push((person, secret));
    }

    let mut policies = Vec::with_capacity(customers);
    for (person, secret) in &book {
        let policy_type = PolicyType::ALL[rng.random_range(0..PolicyType::ALL.len())];
        let premium = Decimal::new(rng.random_range(2_000..50_000), 2);
        let coverage = premium * Decimal::from(rng.random_range(50i64..200));
        let id = company
            .create_policy(person, secret, policy_type.as_str(), premium, coverage)
            .expect("customer authenticates with own secret");
        policies.push((id, premium, coverage, secret.as_str()));
    }

    for month in 1..=months {
        for &(id, premium, coverage, secret) in &policies {
            company.process_premium(id, secret, premium);
            if rng.random_bool(0.04) {
                // Occasionally over-claim to exercise the coverage check.
                let factor = Decimal::new(rng.random_range(1..120), 2);
                company.file_claim(id, secret, coverage * factor);
            }
        }
        info!(month, "month closed");
    }

    let log = company.get_audit_log(COMPANY_KEY).expect("company key");
    let file = File::create(&output_path).expect("failed to create output file");
    log.write_ndjson(BufWriter::new(file)).expect("failed to write audit log");

    if quiet {
        return;
    }

    let premiums = company.get_total_premiums_collected(COMPANY_KEY).expect("company key");
    let claims = company.get_total_claims_paid(COMPANY_KEY).expect("company key");
    let mut customers = company.get_customers(COMPANY_KEY).expect("company key");
    customers.sort_by(|a, b| compare_by_risk(&a.read(), &b.read()));

    let mut by_risk: BTreeMap<u8, usize> = BTreeMap::new();
    for c in &customers {
        *by_risk.entry(c.read().risk_profile()).or_insert(0) += 1;
    }

    println!("=== {} (seed {seed}, {months} months) ===", company.company_name());
    println!("  Policies:            {}", policies.len());
    println!("  Customers:           {}", customers.len());
    println!("  Premiums collected:  {premiums:.2}");
    println!("  Claims paid:         {claims:.2}");
    if !premiums.is_zero() {
        println!("  Loss ratio:          {:.1}%", claims / premiums * Decimal::ONE_HUNDRED);
    }
    println!("  Audit entries:       {} -> {output_path}", log.len());
    println!("\n  Risk | Customers");
    for (risk, n) in &by_risk {
        println!("  {risk:>4} | {n}");
    }
}
