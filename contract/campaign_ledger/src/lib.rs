#![no_std]

//! Core settlement ledger for attribution-and-reward campaigns.
//!
//! Sponsors fund isolated per-campaign treasuries; pluggable policy
//! modules ("hooks") decide who gets paid and how much; this contract
//! owns campaign identity, the lifecycle state machine and all
//! allocation/fee accounting, and is the only code allowed to move a
//! campaign's funds.
//!
//! Solvency law: for every `(campaign, token)` the treasury balance must
//! cover `payouts + fees` while the campaign is live, and `fees` alone
//! once it is `Finalized`. The asymmetry is intentional: unclaimed payout
//! allocations become forfeit to the sponsor's withdrawal right on
//! finalization, while fee obligations to the policy operator survive
//! until explicitly distributed. Do not "fix" this into the stricter
//! invariant; downstream hooks depend on it for fund recovery.


mod events;
pub mod storage_types;
mod treasury;

use campaign_types::{
    AllocationInstruction, CampaignHookClient, CampaignId, CampaignStatus, Error, FeeEntry,
};
use soroban_sdk::{
    contract, contractimpl, panic_with_error, xdr::ToXdr, Address, Bytes, BytesN, Env, String,
};
use storage_types::{
    AllocationTotals, Campaign, DataKey, PersistentKey, TTL_INSTANCE, TTL_PERSISTENT,
};

#[contract]
pub struct CampaignLedger;

#[contractimpl]
impl CampaignLedger {
    /// Create a campaign governed by `hook`. The id is deterministic over
    /// `(creator, hook, nonce)` so it can be predicted and pre-funded.
    /// The hook's `on_create` may revert to reject creation.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        hook: Address,
        nonce: u64,
        hook_data: Bytes,
    ) -> CampaignId {
        creator.require_auth();

        let campaign_id = derive_id(&env, &creator, &hook, nonce);
        let campaign_key = PersistentKey::Campaign(campaign_id.clone());
        if env.storage().persistent().has(&campaign_key) {
            panic_with_error!(&env, Error::CampaignAlreadyExists);
        }

        CampaignHookClient::new(&env, &hook).on_create(&creator, &campaign_id, &creator, &hook_data);

        let campaign = Campaign {
            hook: hook.clone(),
            creator: creator.clone(),
            status: CampaignStatus::Inactive,
            created_at: env.ledger().timestamp(),
            metadata: String::from_str(&env, ""),
        };
        env.storage().persistent().set(&campaign_key, &campaign);
        extend_persistent(&env, &campaign_key);

        let count: u64 = env
            .storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0);
        env.storage()
            .instance()
            .set(&DataKey::CampaignCount, &(count + 1));
        extend_instance(&env);

        events::emit_campaign_created(
            &env,
            events::CampaignCreatedEvent {
                campaign: campaign_id.clone(),
                creator,
                hook,
                nonce,
            },
        );

        campaign_id
    }

    /// Pull `amount` of `token` from `from` into the campaign's treasury.
    /// The campaign record need not exist yet: ids are predictable, and
    /// pre-funding a predicted id is a supported flow.
    pub fn fund_campaign(env: Env, from: Address, campaign: CampaignId, token: Address, amount: i128) {
        from.require_auth();
        if amount <= 0 {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        treasury::credit(&env, &campaign, &token, &from, amount);
        extend_instance(&env);

        events::emit_campaign_funded(
            &env,
            events::CampaignFundedEvent {
                campaign,
                token,
                from,
                amount,
            },
        );
    }

    /// The "send now" primitive: the hook computes immediate payouts and
    /// an optional fee. Payouts transfer at once; the fee is reserved
    /// under the hook-chosen key, never sent, and must later be claimed
    /// through `distribute_fees`.
    pub fn reward(env: Env, caller: Address, campaign: CampaignId, token: Address, hook_data: Bytes) {
        caller.require_auth();
        let record = load_campaign(&env, &campaign);
        require_not_finalized(&env, &record);

        let outcome = CampaignHookClient::new(&env, &record.hook)
            .on_reward(&caller, &campaign, &token, &hook_data);
        if outcome.payouts.is_empty() && outcome.fee.is_none() {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let mut totals = get_totals(&env, &campaign, &token);
        let fee_reserved = match &outcome.fee {
            Some(fee) => {
                reserve_fee(&env, &campaign, &token, &mut totals, fee);
                fee.amount
            }
            None => 0,
        };

        let mut total_paid: i128 = 0;
        for payout in outcome.payouts.iter() {
            if payout.amount <= 0 {
                panic_with_error!(&env, Error::ZeroAmount);
            }
            total_paid = checked_add(&env, total_paid, payout.amount);
        }

        // All accounting lands before any token leaves the treasury.
        treasury::debit(&env, &campaign, &token, total_paid);
        set_totals(&env, &campaign, &token, &totals);
        check_solvency(&env, &campaign, &token, &record.status, &totals);

        for payout in outcome.payouts.iter() {
            treasury::transfer_out(&env, &token, &payout.recipient, payout.amount);
        }
        extend_instance(&env);

        events::emit_rewarded(
            &env,
            events::RewardedEvent {
                campaign,
                token,
                caller,
                total_paid,
                fee_reserved,
            },
        );
    }

    /// Reserve funds against future claims. No tokens move; the increase
    /// must fit inside the treasury's unallocated headroom.
    pub fn allocate(env: Env, caller: Address, campaign: CampaignId, token: Address, hook_data: Bytes) {
        caller.require_auth();
        let record = load_campaign(&env, &campaign);
        require_not_finalized(&env, &record);

        let instructions = CampaignHookClient::new(&env, &record.hook)
            .on_allocate(&caller, &campaign, &token, &hook_data);
        if instructions.is_empty() {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let mut totals = get_totals(&env, &campaign, &token);
        let mut total_reserved: i128 = 0;
        for instruction in instructions.iter() {
            if instruction.amount <= 0 {
                panic_with_error!(&env, Error::ZeroAmount);
            }
            let key = PersistentKey::AllocatedPayout(
                campaign.clone(),
                token.clone(),
                instruction.key.clone(),
            );
            let reserved = get_amount(&env, &key);
            set_amount(&env, &key, checked_add(&env, reserved, instruction.amount));
            totals.payouts = checked_add(&env, totals.payouts, instruction.amount);
            total_reserved = checked_add(&env, total_reserved, instruction.amount);
        }

        set_totals(&env, &campaign, &token, &totals);
        check_solvency(&env, &campaign, &token, &record.status, &totals);
        extend_instance(&env);

        events::emit_allocated(
            &env,
            events::AllocatedEvent {
                campaign,
                token,
                total_reserved,
            },
        );
    }

    /// Release reservations back to the campaign's headroom. No tokens
    /// move.
    pub fn deallocate(env: Env, caller: Address, campaign: CampaignId, token: Address, hook_data: Bytes) {
        caller.require_auth();
        let record = load_campaign(&env, &campaign);
        require_not_finalized(&env, &record);

        let instructions = CampaignHookClient::new(&env, &record.hook)
            .on_deallocate(&caller, &campaign, &token, &hook_data);
        if instructions.is_empty() {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let mut totals = get_totals(&env, &campaign, &token);
        let mut total_released: i128 = 0;
        for instruction in instructions.iter() {
            release_allocation(&env, &campaign, &token, &mut totals, &instruction);
            total_released = checked_add(&env, total_released, instruction.amount);
        }

        set_totals(&env, &campaign, &token, &totals);
        extend_instance(&env);

        events::emit_deallocated(
            &env,
            events::DeallocatedEvent {
                campaign,
                token,
                total_released,
            },
        );
    }

    /// Consume reservations into actual payments. The only primitive that
    /// both reduces a persistent reservation and moves tokens.
    pub fn distribute(env: Env, caller: Address, campaign: CampaignId, token: Address, hook_data: Bytes) {
        caller.require_auth();
        let record = load_campaign(&env, &campaign);
        require_not_finalized(&env, &record);

        let outcome = CampaignHookClient::new(&env, &record.hook)
            .on_distribute(&caller, &campaign, &token, &hook_data);
        if outcome.distributions.is_empty() {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let mut totals = get_totals(&env, &campaign, &token);
        let fee_reserved = match &outcome.fee {
            Some(fee) => {
                reserve_fee(&env, &campaign, &token, &mut totals, fee);
                fee.amount
            }
            None => 0,
        };

        let mut total_paid: i128 = 0;
        for distribution in outcome.distributions.iter() {
            let instruction = AllocationInstruction {
                key: distribution.key.clone(),
                amount: distribution.amount,
                extra_data: distribution.extra_data.clone(),
            };
            release_allocation(&env, &campaign, &token, &mut totals, &instruction);
            treasury::debit(&env, &campaign, &token, distribution.amount);
            total_paid = checked_add(&env, total_paid, distribution.amount);
        }

        set_totals(&env, &campaign, &token, &totals);
        check_solvency(&env, &campaign, &token, &record.status, &totals);

        for distribution in outcome.distributions.iter() {
            treasury::transfer_out(&env, &token, &distribution.recipient, distribution.amount);
        }
        extend_instance(&env);

        events::emit_distributed(
            &env,
            events::DistributedEvent {
                campaign,
                token,
                total_paid,
                fee_reserved,
            },
        );
    }

    /// Pay out reserved fees. Available in every state, including
    /// `Finalized`: fee claims survive finalization.
    pub fn distribute_fees(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) {
        caller.require_auth();
        let record = load_campaign(&env, &campaign);

        let instructions = CampaignHookClient::new(&env, &record.hook)
            .on_distribute_fees(&caller, &campaign, &token, &hook_data);
        if instructions.is_empty() {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let mut totals = get_totals(&env, &campaign, &token);
        let mut total_paid: i128 = 0;
        for distribution in instructions.iter() {
            if distribution.amount <= 0 {
                panic_with_error!(&env, Error::ZeroAmount);
            }
            let key = PersistentKey::AllocatedFee(
                campaign.clone(),
                token.clone(),
                distribution.key.clone(),
            );
            let reserved = get_amount(&env, &key);
            if reserved < distribution.amount {
                panic_with_error!(&env, Error::InsufficientAllocation);
            }
            set_amount(&env, &key, reserved - distribution.amount);
            totals.fees = checked_sub(&env, totals.fees, distribution.amount);
            treasury::debit(&env, &campaign, &token, distribution.amount);
            total_paid = checked_add(&env, total_paid, distribution.amount);
        }

        set_totals(&env, &campaign, &token, &totals);
        check_solvency(&env, &campaign, &token, &record.status, &totals);

        for distribution in instructions.iter() {
            treasury::transfer_out(&env, &token, &distribution.recipient, distribution.amount);
        }
        extend_instance(&env);

        events::emit_fees_distributed(
            &env,
            events::FeesDistributedEvent {
                campaign,
                token,
                total_paid,
            },
        );
    }

    /// Withdraw unallocated funds. The hook decides who may withdraw and
    /// how much; the ledger enforces that the treasury stays above the
    /// required reserve for the campaign's current status. Full recovery
    /// is therefore only possible once the campaign is `Finalized`.
    pub fn withdraw_funds(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) {
        caller.require_auth();
        let record = load_campaign(&env, &campaign);

        let payout = CampaignHookClient::new(&env, &record.hook)
            .on_withdraw(&caller, &campaign, &token, &hook_data);
        if payout.amount <= 0 {
            panic_with_error!(&env, Error::ZeroAmount);
        }

        let totals = get_totals(&env, &campaign, &token);
        treasury::debit(&env, &campaign, &token, payout.amount);
        check_solvency(&env, &campaign, &token, &record.status, &totals);

        treasury::transfer_out(&env, &token, &payout.recipient, payout.amount);
        extend_instance(&env);

        events::emit_funds_withdrawn(
            &env,
            events::FundsWithdrawnEvent {
                campaign,
                token,
                recipient: payout.recipient,
                amount: payout.amount,
            },
        );
    }

    /// Request a status transition. The ledger enforces exactly one rule
    /// of its own: `Finalized` is terminal. Everything else is hook
    /// policy.
    pub fn update_status(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        new_status: CampaignStatus,
        hook_data: Bytes,
    ) {
        caller.require_auth();
        let mut record = load_campaign(&env, &campaign);

        if record.status == CampaignStatus::Finalized || new_status == record.status {
            panic_with_error!(&env, Error::InvalidCampaignStatus);
        }

        let accepted = CampaignHookClient::new(&env, &record.hook).on_status_change(
            &caller,
            &campaign,
            &record.status,
            &new_status,
            &hook_data,
        );
        if !accepted {
            panic_with_error!(&env, Error::Unauthorized);
        }

        let old_status = record.status;
        record.status = new_status;
        store_campaign(&env, &campaign, &record);
        extend_instance(&env);

        events::emit_status_updated(
            &env,
            events::StatusUpdatedEvent {
                campaign,
                old_status,
                new_status,
            },
        );
    }

    /// Replace the campaign's metadata, subject to hook authorization.
    pub fn update_metadata(env: Env, caller: Address, campaign: CampaignId, metadata: String) {
        caller.require_auth();
        let mut record = load_campaign(&env, &campaign);
        require_not_finalized(&env, &record);

        let accepted = CampaignHookClient::new(&env, &record.hook)
            .on_metadata_update(&caller, &campaign, &metadata);
        if !accepted {
            panic_with_error!(&env, Error::Unauthorized);
        }

        record.metadata = metadata;
        store_campaign(&env, &campaign, &record);
        extend_instance(&env);

        events::emit_metadata_updated(&env, events::MetadataUpdatedEvent { campaign });
    }

    /// View functions
    pub fn derive_campaign_id(env: Env, creator: Address, hook: Address, nonce: u64) -> CampaignId {
        derive_id(&env, &creator, &hook, nonce)
    }

    pub fn get_campaign(env: Env, campaign: CampaignId) -> Campaign {
        load_campaign(&env, &campaign)
    }

    pub fn get_status(env: Env, campaign: CampaignId) -> CampaignStatus {
        load_campaign(&env, &campaign).status
    }

    pub fn get_metadata(env: Env, campaign: CampaignId) -> String {
        load_campaign(&env, &campaign).metadata
    }

    pub fn get_treasury_balance(env: Env, campaign: CampaignId, token: Address) -> i128 {
        treasury::balance(&env, &campaign, &token)
    }

    pub fn get_total_allocations(env: Env, campaign: CampaignId, token: Address) -> AllocationTotals {
        get_totals(&env, &campaign, &token)
    }

    pub fn get_allocated_payout(
        env: Env,
        campaign: CampaignId,
        token: Address,
        key: BytesN<32>,
    ) -> i128 {
        get_amount(&env, &PersistentKey::AllocatedPayout(campaign, token, key))
    }

    pub fn get_allocated_fee(env: Env, campaign: CampaignId, token: Address, key: BytesN<32>) -> i128 {
        get_amount(&env, &PersistentKey::AllocatedFee(campaign, token, key))
    }

    pub fn campaign_count(env: Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::CampaignCount)
            .unwrap_or(0)
    }

    /// Pass-through to the hook's read-only description.
    pub fn describe_campaign(env: Env, campaign: CampaignId) -> String {
        let record = load_campaign(&env, &campaign);
        CampaignHookClient::new(&env, &record.hook).describe(&campaign)
    }
}

// Helper functions
fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

fn derive_id(env: &Env, creator: &Address, hook: &Address, nonce: u64) -> CampaignId {
    let mut preimage = Bytes::new(env);
    preimage.append(&creator.clone().to_xdr(env));
    preimage.append(&hook.clone().to_xdr(env));
    preimage.extend_from_array(&nonce.to_be_bytes());
    env.crypto().sha256(&preimage).to_bytes()
}

fn load_campaign(env: &Env, campaign: &CampaignId) -> Campaign {
    env.storage()
        .persistent()
        .get(&PersistentKey::Campaign(campaign.clone()))
        .unwrap_or_else(|| panic_with_error!(env, Error::CampaignNotFound))
}

fn store_campaign(env: &Env, campaign: &CampaignId, record: &Campaign) {
    let key = PersistentKey::Campaign(campaign.clone());
    env.storage().persistent().set(&key, record);
    extend_persistent(env, &key);
}

fn require_not_finalized(env: &Env, record: &Campaign) {
    if record.status == CampaignStatus::Finalized {
        panic_with_error!(env, Error::InvalidCampaignStatus);
    }
}

fn get_totals(env: &Env, campaign: &CampaignId, token: &Address) -> AllocationTotals {
    env.storage()
        .persistent()
        .get(&PersistentKey::Totals(campaign.clone(), token.clone()))
        .unwrap_or(AllocationTotals {
            payouts: 0,
            fees: 0,
        })
}

fn set_totals(env: &Env, campaign: &CampaignId, token: &Address, totals: &AllocationTotals) {
    let key = PersistentKey::Totals(campaign.clone(), token.clone());
    env.storage().persistent().set(&key, totals);
    extend_persistent(env, &key);
}

fn get_amount(env: &Env, key: &PersistentKey) -> i128 {
    env.storage().persistent().get(key).unwrap_or(0)
}

fn set_amount(env: &Env, key: &PersistentKey, amount: i128) {
    env.storage().persistent().set(key, &amount);
    extend_persistent(env, key);
}

fn checked_add(env: &Env, a: i128, b: i128) -> i128 {
    a.checked_add(b)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticError))
}

fn checked_sub(env: &Env, a: i128, b: i128) -> i128 {
    a.checked_sub(b)
        .unwrap_or_else(|| panic_with_error!(env, Error::ArithmeticError))
}

/// Funds that must stay in the treasury for the given status. Once a
/// campaign is `Finalized`, outstanding payout allocations are no longer
/// protected; fee obligations are, until distributed.
fn required_reserve(env: &Env, status: &CampaignStatus, totals: &AllocationTotals) -> i128 {
    match status {
        CampaignStatus::Finalized => totals.fees,
        _ => checked_add(env, totals.payouts, totals.fees),
    }
}

fn check_solvency(
    env: &Env,
    campaign: &CampaignId,
    token: &Address,
    status: &CampaignStatus,
    totals: &AllocationTotals,
) {
    if treasury::balance(env, campaign, token) < required_reserve(env, status, totals) {
        panic_with_error!(env, Error::InsufficientBalance);
    }
}

/// Reserve a hook-reported fee under its key. Fees are reserved, never
/// sent, until claimed through `distribute_fees`.
fn reserve_fee(
    env: &Env,
    campaign: &CampaignId,
    token: &Address,
    totals: &mut AllocationTotals,
    fee: &FeeEntry,
) {
    if fee.amount <= 0 {
        panic_with_error!(env, Error::ZeroAmount);
    }
    let key = PersistentKey::AllocatedFee(campaign.clone(), token.clone(), fee.key.clone());
    let reserved = get_amount(env, &key);
    set_amount(env, &key, checked_add(env, reserved, fee.amount));
    totals.fees = checked_add(env, totals.fees, fee.amount);
}

/// Decrease the payout reservation under an instruction's key, failing
/// with `InsufficientAllocation` if the key cannot cover it.
fn release_allocation(
    env: &Env,
    campaign: &CampaignId,
    token: &Address,
    totals: &mut AllocationTotals,
    instruction: &AllocationInstruction,
) {
    if instruction.amount <= 0 {
        panic_with_error!(env, Error::ZeroAmount);
    }
    let key = PersistentKey::AllocatedPayout(
        campaign.clone(),
        token.clone(),
        instruction.key.clone(),
    );
    let reserved = get_amount(env, &key);
    if reserved < instruction.amount {
        panic_with_error!(env, Error::InsufficientAllocation);
    }
    set_amount(env, &key, reserved - instruction.amount);
    totals.payouts = checked_sub(env, totals.payouts, instruction.amount);
}
