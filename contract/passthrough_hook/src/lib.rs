#![no_std]

//! Pass-through policy module.
//!
//! The simplest hook variant: the campaign sponsor (its creator) is the
//! only authorized caller, `reward` forwards exactly the payout list the
//! sponsor encoded into `hook_data`, and `withdraw` returns funds to the
//! sponsor. There is no distribution phase, so every reservation-based
//! capability reverts with `UnsupportedOperation` rather than silently
//! doing nothing.


use campaign_types::{
    AllocationInstruction, CampaignId, CampaignStatus, DistributeOutcome, Distribution, Error,
    Payout, RewardOutcome,
};
use soroban_sdk::{
    contract, contractimpl, contracttype, panic_with_error, xdr::FromXdr, Address, Bytes, Env,
    String, Vec,
};

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Sponsor(CampaignId),
}

pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days

#[contract]
pub struct PassThroughHook;

#[contractimpl]
impl PassThroughHook {
    /// Record the creator as the campaign's sponsor. Set-once: a second
    /// binding attempt for the same campaign id is rejected, so a direct
    /// caller cannot rebind an existing campaign's sponsor.
    pub fn on_create(env: Env, _caller: Address, campaign: CampaignId, creator: Address, _hook_data: Bytes) {
        let key = PersistentKey::Sponsor(campaign);
        if env.storage().persistent().has(&key) {
            panic_with_error!(&env, Error::Unauthorized);
        }
        env.storage().persistent().set(&key, &creator);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_PERSISTENT, TTL_PERSISTENT);
    }

    /// Forward the sponsor-encoded payout list verbatim. No fee.
    pub fn on_reward(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        _token: Address,
        hook_data: Bytes,
    ) -> RewardOutcome {
        require_sponsor(&env, &campaign, &caller);
        let payouts = Vec::<Payout>::from_xdr(&env, &hook_data)
            .unwrap_or_else(|_| panic_with_error!(&env, Error::InvalidHookData));
        RewardOutcome { payouts, fee: None }
    }

    pub fn on_allocate(
        env: Env,
        _caller: Address,
        _campaign: CampaignId,
        _token: Address,
        _hook_data: Bytes,
    ) -> Vec<AllocationInstruction> {
        panic_with_error!(&env, Error::UnsupportedOperation)
    }

    pub fn on_deallocate(
        env: Env,
        _caller: Address,
        _campaign: CampaignId,
        _token: Address,
        _hook_data: Bytes,
    ) -> Vec<AllocationInstruction> {
        panic_with_error!(&env, Error::UnsupportedOperation)
    }

    pub fn on_distribute(
        env: Env,
        _caller: Address,
        _campaign: CampaignId,
        _token: Address,
        _hook_data: Bytes,
    ) -> DistributeOutcome {
        panic_with_error!(&env, Error::UnsupportedOperation)
    }

    pub fn on_distribute_fees(
        env: Env,
        _caller: Address,
        _campaign: CampaignId,
        _token: Address,
        _hook_data: Bytes,
    ) -> Vec<Distribution> {
        panic_with_error!(&env, Error::UnsupportedOperation)
    }

    /// Return the requested amount to the sponsor. `hook_data` is the
    /// XDR-encoded amount.
    pub fn on_withdraw(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        _token: Address,
        hook_data: Bytes,
    ) -> Payout {
        let sponsor = require_sponsor(&env, &campaign, &caller);
        let amount = i128::from_xdr(&env, &hook_data)
            .unwrap_or_else(|_| panic_with_error!(&env, Error::InvalidHookData));
        Payout {
            recipient: sponsor,
            amount,
            extra_data: Bytes::new(&env),
        }
    }

    pub fn on_status_change(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        _current: CampaignStatus,
        _requested: CampaignStatus,
        _hook_data: Bytes,
    ) -> bool {
        caller == sponsor(&env, &campaign)
    }

    pub fn on_metadata_update(env: Env, caller: Address, campaign: CampaignId, _metadata: String) -> bool {
        caller == sponsor(&env, &campaign)
    }

    pub fn describe(env: Env, _campaign: CampaignId) -> String {
        String::from_str(&env, "pass-through campaign")
    }

    pub fn get_sponsor(env: Env, campaign: CampaignId) -> Address {
        sponsor(&env, &campaign)
    }
}

fn sponsor(env: &Env, campaign: &CampaignId) -> Address {
    env.storage()
        .persistent()
        .get(&PersistentKey::Sponsor(campaign.clone()))
        .unwrap_or_else(|| panic_with_error!(env, Error::CampaignNotFound))
}

fn require_sponsor(env: &Env, campaign: &CampaignId, caller: &Address) -> Address {
    let sponsor = sponsor(env, campaign);
    if caller != &sponsor {
        panic_with_error!(env, Error::Unauthorized);
    }
    sponsor
}
