use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use policydesk::events::CompanyEvent;
use policydesk::{InsuranceCompany, InvalidArgument, Person};

#[test]
fn claim_then_premiums_scenario() {
    let a = Person::new("A", 30, "Male", "s1", 5, false).unwrap().into_shared();
    let mut company = InsuranceCompany::new("C", "k1");

    let p = company.create_policy(&a, "s1", "Life", dec!(100), dec!(10000)).unwrap();
    assert!(a.read().is_insured());

    assert!(company.file_claim(p, "s1", dec!(5000)));
    assert_eq!(company.get_total_claims_paid("k1").unwrap(), dec!(5000));
    assert_eq!(a.read().risk_profile(), 6);

    for _ in 0..3 {
        assert!(company.process_premium(p, "s1", dec!(100)));
    }
    assert_eq!(a.read().risk_profile(), 5);
    assert_eq!(company.get_total_premiums_collected("k1").unwrap(), dec!(300));
}

#[test]
fn thousand_policies_have_distinct_numbers() {
    let p = Person::new("Bulk", 45, "Female", "bulk", 4, false).unwrap().into_shared();
    let mut company = InsuranceCompany::new("Volume Re", "admin");

    for n in 0..1_000 {
        let kind = ["Life", "Health", "Automobile", "Home"][n % 4];
        company.create_policy(&p, "bulk", kind, dec!(10), dec!(1000)).unwrap();
    }

    let policies = company.get_policies("admin").unwrap();
    assert_eq!(policies.len(), 1_000);
    let numbers: HashSet<&str> = policies.iter().map(|p| p.policy_number().as_str()).collect();
    assert_eq!(numbers.len(), 1_000, "duplicate policy numbers issued");
    assert!(policies.iter().all(|p| p.policy_number().len() == 16));
}

#[test]
fn failed_authentication_never_moves_the_books() {
    let owner = Person::new("Owner", 52, "Female", "right", 7, false).unwrap().into_shared();
    let mut company = InsuranceCompany::new("Strict", "admin");
    let id = company.create_policy(&owner, "right", "Home", dec!(80), dec!(50000)).unwrap();

    for _ in 0..5 {
        assert!(!company.process_premium(id, "wrong", dec!(80)));
        assert!(!company.file_claim(id, "wrong", dec!(100)));
        assert!(!company.cancel_policy(id, "wrong"));
    }
    // The company key is not the owner's key either.
    assert!(!company.process_premium(id, "admin", dec!(80)));

    assert_eq!(company.get_total_premiums_collected("admin").unwrap(), Decimal::ZERO);
    assert_eq!(company.get_total_claims_paid("admin").unwrap(), Decimal::ZERO);
    assert_eq!(company.consecutive_premiums(id), Some(0));
    assert_eq!(owner.read().risk_profile(), 7);
    assert!(company.policy(id).unwrap().is_active());

    let failures = company
        .get_audit_log("admin")
        .unwrap()
        .entries()
        .iter()
        .filter(|e| matches!(e.event, CompanyEvent::AuthenticationFailed { .. }))
        .count();
    assert_eq!(failures, 16);
}

#[test]
fn read_and_write_failures_use_different_channels() {
    let owner = Person::new("Owner", 33, "Male", "mine", 5, false).unwrap().into_shared();
    let mut company = InsuranceCompany::new("Split", "admin");
    let id = company.create_policy(&owner, "mine", "Travel", dec!(20), dec!(3000)).unwrap();

    let policy = company.policy(id).unwrap();
    assert_eq!(
        policy.get_policy_details("theirs").unwrap_err(),
        InvalidArgument::AuthenticationDenied
    );
    assert_eq!(
        company.get_policies("theirs").unwrap_err(),
        InvalidArgument::AuthenticationDenied
    );

    let policy = company.policy_mut(id).unwrap();
    assert!(!policy.set_premium_amount(dec!(1), "theirs"));
    assert!(!company.cancel_policy(id, "theirs"));
}

#[test]
fn cancelling_last_policy_leaves_person_insured() {
    let owner = Person::new("Owner", 61, "Female", "mine", 3, false).unwrap().into_shared();
    let mut company = InsuranceCompany::new("Legacy", "admin");
    let id = company.create_policy(&owner, "mine", "Health", dec!(40), dec!(9000)).unwrap();

    assert!(company.cancel_policy(id, "mine"));
    assert!(!company.policy(id).unwrap().is_active());
    assert!(owner.read().is_insured());
    assert_eq!(company.get_policies("admin").unwrap().len(), 1);
}

#[test]
fn shared_company_serializes_concurrent_premiums() {
    let owners: Vec<_> = (0..4)
        .map(|n| {
            Person::new(&format!("P{n}"), 40, "Male", &format!("fp{n}"), 9, false)
                .unwrap()
                .into_shared()
        })
        .collect();
    let company = Arc::new(Mutex::new(InsuranceCompany::new("Threaded", "admin")));
    let ids: Vec<_> = owners
        .iter()
        .enumerate()
        .map(|(n, p)| {
            company
                .lock()
                .create_policy(p, &format!("fp{n}"), "Life", dec!(10), dec!(1000))
                .unwrap()
        })
        .collect();

    let handles: Vec<_> = ids
        .iter()
        .enumerate()
        .map(|(n, &id)| {
            let company = Arc::clone(&company);
            thread::spawn(move || {
                let secret = format!("fp{n}");
                for _ in 0..30 {
                    assert!(company.lock().process_premium(id, &secret, dec!(10)));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let company = company.lock();
    assert_eq!(company.get_total_premiums_collected("admin").unwrap(), dec!(1200));
    // 30 premiums per policy = 10 decreases, from 9 floored at 1.
    for owner in &owners {
        assert_eq!(owner.read().risk_profile(), 1);
    }
}
