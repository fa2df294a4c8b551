#![no_std]

//! Attribution code registry.
//!
//! A keyed registry mapping opaque codes to payout addresses. Policy
//! modules resolve codes when computing rewards; the settlement ledger
//! never calls this contract. Codes are owned by their registrant; only
//! the owner may rotate the payout address or hand the code over.

#[cfg(test)]
mod test;

use campaign_types::Error;
use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, symbol_short, Address, Env, String,
};

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Code(String),
}

#[derive(Clone)]
#[contracttype]
pub struct CodeEntry {
    pub owner: Address,
    pub payout_address: Address,
    pub registered_at: u64,
}

pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

#[contract]
pub struct CodeRegistry;

#[contractimpl]
impl CodeRegistry {
    /// Register a code owned by `owner`, paying out to `payout_address`.
    pub fn register(env: Env, owner: Address, code: String, payout_address: Address) {
        owner.require_auth();

        let key = PersistentKey::Code(code.clone());
        if env.storage().persistent().has(&key) {
            panic_with_error!(&env, Error::CodeAlreadyExists);
        }

        let entry = CodeEntry {
            owner: owner.clone(),
            payout_address,
            registered_at: env.ledger().timestamp(),
        };
        env.storage().persistent().set(&key, &entry);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);

        env.events()
            .publish((symbol_short!("code"), symbol_short!("register")), (code, owner));
    }

    /// Point an existing code at a new payout address. Owner only.
    pub fn set_payout_address(env: Env, code: String, payout_address: Address) {
        let key = PersistentKey::Code(code.clone());
        let mut entry = get_entry(&env, &key);
        entry.owner.require_auth();

        entry.payout_address = payout_address;
        env.storage().persistent().set(&key, &entry);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);

        env.events()
            .publish((symbol_short!("code"), symbol_short!("payout")), code);
    }

    /// Hand a code over to a new owner. Owner only.
    pub fn transfer_code(env: Env, code: String, new_owner: Address) {
        let key = PersistentKey::Code(code.clone());
        let mut entry = get_entry(&env, &key);
        entry.owner.require_auth();

        entry.owner = new_owner.clone();
        env.storage().persistent().set(&key, &entry);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);

        env.events()
            .publish((symbol_short!("code"), symbol_short!("transfer")), (code, new_owner));
    }

    /// View functions
    pub fn resolve(env: Env, code: String) -> Address {
        get_entry(&env, &PersistentKey::Code(code)).payout_address
    }

    pub fn is_registered(env: Env, code: String) -> bool {
        env.storage().persistent().has(&PersistentKey::Code(code))
    }

    pub fn get_code_entry(env: Env, code: String) -> CodeEntry {
        get_entry(&env, &PersistentKey::Code(code))
    }
}

fn get_entry(env: &Env, key: &PersistentKey) -> CodeEntry {
    env.storage()
        .persistent()
        .get(key)
        .unwrap_or_else(|| panic_with_error!(env, Error::CodeNotFound))
}
