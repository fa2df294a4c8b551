#![cfg(test)]
use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

fn setup() -> (Env, CodeRegistryClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(CodeRegistry, ());
    let client = CodeRegistryClient::new(&env, &contract_id);
    (env, client)
}

#[test]
fn test_register_and_resolve() {
    let (env, client) = setup();
    let owner = Address::generate(&env);
    let payout = Address::generate(&env);
    let code = String::from_str(&env, "REF123");

    assert!(!client.is_registered(&code));
    client.register(&owner, &code, &payout);

    assert!(client.is_registered(&code));
    assert_eq!(client.resolve(&code), payout);
    let entry = client.get_code_entry(&code);
    assert_eq!(entry.owner, owner);
    assert_eq!(entry.payout_address, payout);
}

#[test]
fn test_duplicate_registration_rejected() {
    let (env, client) = setup();
    let owner = Address::generate(&env);
    let payout = Address::generate(&env);
    let code = String::from_str(&env, "REF123");

    client.register(&owner, &code, &payout);
    let other = Address::generate(&env);
    let result = client.try_register(&other, &code, &other);
    assert!(result.is_err());
    assert_eq!(client.resolve(&code), payout);
}

#[test]
fn test_rotate_payout_address() {
    let (env, client) = setup();
    let owner = Address::generate(&env);
    let payout = Address::generate(&env);
    let code = String::from_str(&env, "REF123");

    client.register(&owner, &code, &payout);

    let new_payout = Address::generate(&env);
    client.set_payout_address(&code, &new_payout);
    assert_eq!(client.resolve(&code), new_payout);
}

#[test]
fn test_transfer_code_ownership() {
    let (env, client) = setup();
    let owner = Address::generate(&env);
    let payout = Address::generate(&env);
    let code = String::from_str(&env, "REF123");

    client.register(&owner, &code, &payout);

    let new_owner = Address::generate(&env);
    client.transfer_code(&code, &new_owner);
    assert_eq!(client.get_code_entry(&code).owner, new_owner);
    // Payout address is untouched by an ownership transfer.
    assert_eq!(client.resolve(&code), payout);
}

#[test]
fn test_unknown_code() {
    let (env, client) = setup();
    let code = String::from_str(&env, "MISSING");
    assert!(!client.is_registered(&code));
    assert!(client.try_resolve(&code).is_err());
}
