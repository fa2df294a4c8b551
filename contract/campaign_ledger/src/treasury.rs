//! Per-campaign fund custody.
//!
//! The clone-per-campaign treasury of the source design maps here to a
//! lightweight owned resource: one persistent balance row per
//! `(campaign, token)`, credited through `fund_campaign` and debited only
//! by ledger settlement code. Nothing outside this contract can reach a
//! debit, and every debit is scoped to a single campaign's row, so one
//! campaign's funds can never cover or drain another's.

use campaign_types::{CampaignId, Error};
use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::storage_types::{PersistentKey, TTL_PERSISTENT};

pub fn balance(env: &Env, campaign: &CampaignId, token: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&PersistentKey::TreasuryBalance(campaign.clone(), token.clone()))
        .unwrap_or(0)
}

/// Pull `amount` of `token` from `from` and credit the campaign's row.
/// The row exists independently of the campaign record, so pre-funding a
/// predicted campaign id is allowed.
pub fn credit(env: &Env, campaign: &CampaignId, token: &Address, from: &Address, amount: i128) {
    let client = token::Client::new(env, token);
    if client
        .try_transfer(from, &env.current_contract_address(), &amount)
        .is_err()
    {
        panic_with_error!(env, Error::TransferFailed);
    }

    let key = PersistentKey::TreasuryBalance(campaign.clone(), token.clone());
    let held = balance(env, campaign, token);
    let new_held = held
        .checked_add(amount)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticError));
    env.storage().persistent().set(&key, &new_held);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);
}

/// Reduce the campaign's row by `amount`. Reverts rather than underflows.
/// Callers debit accounting before performing any token transfer.
pub fn debit(env: &Env, campaign: &CampaignId, token: &Address, amount: i128) {
    let held = balance(env, campaign, token);
    if held < amount {
        panic_with_error!(env, Error::InsufficientBalance);
    }
    let key = PersistentKey::TreasuryBalance(campaign.clone(), token.clone());
    env.storage().persistent().set(&key, &(held - amount));
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);
}

/// Move `amount` of `token` out of the contract to `recipient`. The
/// corresponding row debit must already have happened.
pub fn transfer_out(env: &Env, token: &Address, recipient: &Address, amount: i128) {
    let client = token::Client::new(env, token);
    if client
        .try_transfer(&env.current_contract_address(), recipient, &amount)
        .is_err()
    {
        panic_with_error!(env, Error::TransferFailed);
    }
}
