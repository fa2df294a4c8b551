#![no_std]

//! Shared data model for the campaign settlement ledger.
//!
//! Everything the ledger and the policy modules ("hooks") exchange lives
//! here: instruction types, the campaign status enum, the error taxonomy
//! and the `CampaignHook` client interface. Hooks are independent
//! contracts; the ledger only ever talks to them through
//! `CampaignHookClient`.

use soroban_sdk::{
    contractclient, contracterror, contracttype, Address, Bytes, BytesN, Env, String, Vec,
};

/// Campaign identity: `sha256(creator || hook || nonce)`, derivable before
/// the campaign exists so treasuries can be pre-funded.
pub type CampaignId = BytesN<32>;

/// Opaque hook-chosen identifier for an allocation or fee entry. Not
/// necessarily a recipient address; hooks may key by payment id,
/// attribution id, etc.
pub type AllocationKey = BytesN<32>;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Caller rejected by the hook, or not permitted by the registry.
    Unauthorized = 1,
    CampaignNotFound = 2,
    CampaignAlreadyExists = 3,
    /// Illegal state transition, or financial activity against FINALIZED.
    InvalidCampaignStatus = 4,
    /// Deallocate/distribute exceeds a key's reserved balance.
    InsufficientAllocation = 5,
    /// Treasury balance would drop below the required reserve.
    InsufficientBalance = 6,
    /// Operation would have no effect.
    ZeroAmount = 7,
    /// Underlying token move rejected by the token or recipient.
    TransferFailed = 8,
    /// Hook variant does not implement the requested capability.
    UnsupportedOperation = 9,
    /// Hook-specific data could not be decoded.
    InvalidHookData = 10,
    ArithmeticError = 11,
    CodeNotFound = 12,
    CodeAlreadyExists = 13,
}

/// Campaign lifecycle. `Finalized` is terminal: the ledger refuses every
/// outgoing transition regardless of what the hook authorizes. All other
/// transition legality is hook policy.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[contracttype]
pub enum CampaignStatus {
    Inactive,
    Active,
    Finalizing,
    Finalized,
}

/// An instruction to move `amount` of the operation's token to `recipient`
/// immediately. Carries no persistent allocation.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Payout {
    pub recipient: Address,
    pub amount: i128,
    pub extra_data: Bytes,
}

/// A requested delta to the reserved-but-unpaid balance under `key`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct AllocationInstruction {
    pub key: AllocationKey,
    pub amount: i128,
    pub extra_data: Bytes,
}

/// Consumption of a reservation under `key` into an actual payment to
/// `recipient`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct Distribution {
    pub recipient: Address,
    pub key: AllocationKey,
    pub amount: i128,
    pub extra_data: Bytes,
}

/// A fee owed to the policy operator, reserved under `key` until claimed
/// through fee distribution.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FeeEntry {
    pub key: AllocationKey,
    pub amount: i128,
}

/// What a hook returns from `on_reward`: immediate payouts plus an
/// optional reserved fee.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RewardOutcome {
    pub payouts: Vec<Payout>,
    pub fee: Option<FeeEntry>,
}

/// What a hook returns from `on_distribute`: reservations to consume plus
/// an optional reserved fee.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DistributeOutcome {
    pub distributions: Vec<Distribution>,
    pub fee: Option<FeeEntry>,
}

/// The capability set the ledger consumes on a campaign's policy module.
///
/// Each hook variant implements a subset; an unsupported capability must
/// revert with [`Error::UnsupportedOperation`], never silently no-op, so
/// the ledger can assume "no revert means effects are exactly what was
/// returned". Hooks decide authorization and payout math; the ledger
/// independently re-validates every returned instruction.
#[contractclient(name = "CampaignHookClient")]
pub trait CampaignHook {
    /// Authorize campaign creation. Revert to reject; no return value.
    fn on_create(env: Env, caller: Address, campaign: CampaignId, creator: Address, hook_data: Bytes);

    /// Compute immediate payouts (and an optional reserved fee) for the
    /// "send now" primitive.
    fn on_reward(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) -> RewardOutcome;

    /// Compute reservation increases.
    fn on_allocate(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) -> Vec<AllocationInstruction>;

    /// Compute reservation releases.
    fn on_deallocate(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) -> Vec<AllocationInstruction>;

    /// Compute reservation consumption into payments.
    fn on_distribute(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) -> DistributeOutcome;

    /// Compute which fee keys to pay to which recipients.
    fn on_distribute_fees(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) -> Vec<Distribution>;

    /// Authorize a withdrawal and compute the single payout leaving the
    /// treasury. The ledger still enforces the solvency reserve.
    fn on_withdraw(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        token: Address,
        hook_data: Bytes,
    ) -> Payout;

    /// Accept or reject a status transition. The ledger has already
    /// refused transitions out of `Finalized` before this is called.
    fn on_status_change(
        env: Env,
        caller: Address,
        campaign: CampaignId,
        current: CampaignStatus,
        requested: CampaignStatus,
        hook_data: Bytes,
    ) -> bool;

    /// Accept or reject a metadata update.
    fn on_metadata_update(env: Env, caller: Address, campaign: CampaignId, metadata: String)
        -> bool;

    /// Read-only campaign description (arbitrary metadata/URI). No
    /// authorization requirement.
    fn describe(env: Env, campaign: CampaignId) -> String;
}
