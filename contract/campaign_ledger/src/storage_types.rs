use campaign_types::{AllocationKey, CampaignId, CampaignStatus};
use soroban_sdk::{contracttype, Address, String};

// Storage keys for instance data
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    CampaignCount,
}

// Storage keys for persistent data
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    /// Funds held for a campaign, per token.
    TreasuryBalance(CampaignId, Address),
    /// Aggregate allocation/fee totals, per token. Kept equal to the sum
    /// of the per-key rows so the solvency check is O(1).
    Totals(CampaignId, Address),
    /// Reserved-but-unpaid payout balance under a hook-chosen key.
    AllocatedPayout(CampaignId, Address, AllocationKey),
    /// Reserved fee owed to the policy operator under a hook-chosen key.
    AllocatedFee(CampaignId, Address, AllocationKey),
}

/// Campaign record. `hook` and `creator` are immutable after creation;
/// `status` and `metadata` change only through the guarded entry points.
#[derive(Clone)]
#[contracttype]
pub struct Campaign {
    pub hook: Address,
    pub creator: Address,
    pub status: CampaignStatus,
    pub created_at: u64,
    pub metadata: String,
}

#[derive(Clone)]
#[contracttype]
pub struct AllocationTotals {
    pub payouts: i128,
    pub fees: i128,
}

// Constants
pub const TTL_INSTANCE: u32 = 17280 * 30; // 30 days
pub const TTL_PERSISTENT: u32 = 17280 * 90; // 90 days
