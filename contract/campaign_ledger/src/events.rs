use campaign_types::{CampaignId, CampaignStatus};
use soroban_sdk::{contracttype, Address, Symbol};

#[contracttype]
#[derive(Clone)]
pub struct CampaignCreatedEvent {
    pub campaign: CampaignId,
    pub creator: Address,
    pub hook: Address,
    pub nonce: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct CampaignFundedEvent {
    pub campaign: CampaignId,
    pub token: Address,
    pub from: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct RewardedEvent {
    pub campaign: CampaignId,
    pub token: Address,
    pub caller: Address,
    pub total_paid: i128,
    pub fee_reserved: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct AllocatedEvent {
    pub campaign: CampaignId,
    pub token: Address,
    pub total_reserved: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct DeallocatedEvent {
    pub campaign: CampaignId,
    pub token: Address,
    pub total_released: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct DistributedEvent {
    pub campaign: CampaignId,
    pub token: Address,
    pub total_paid: i128,
    pub fee_reserved: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct FeesDistributedEvent {
    pub campaign: CampaignId,
    pub token: Address,
    pub total_paid: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct FundsWithdrawnEvent {
    pub campaign: CampaignId,
    pub token: Address,
    pub recipient: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone)]
pub struct StatusUpdatedEvent {
    pub campaign: CampaignId,
    pub old_status: CampaignStatus,
    pub new_status: CampaignStatus,
}

#[contracttype]
#[derive(Clone)]
pub struct MetadataUpdatedEvent {
    pub campaign: CampaignId,
}

pub fn emit_campaign_created(env: &soroban_sdk::Env, event: CampaignCreatedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_created"),), event);
}

pub fn emit_campaign_funded(env: &soroban_sdk::Env, event: CampaignFundedEvent) {
    env.events()
        .publish((Symbol::new(env, "campaign_funded"),), event);
}

pub fn emit_rewarded(env: &soroban_sdk::Env, event: RewardedEvent) {
    env.events().publish((Symbol::new(env, "rewarded"),), event);
}

pub fn emit_allocated(env: &soroban_sdk::Env, event: AllocatedEvent) {
    env.events().publish((Symbol::new(env, "allocated"),), event);
}

pub fn emit_deallocated(env: &soroban_sdk::Env, event: DeallocatedEvent) {
    env.events()
        .publish((Symbol::new(env, "deallocated"),), event);
}

pub fn emit_distributed(env: &soroban_sdk::Env, event: DistributedEvent) {
    env.events()
        .publish((Symbol::new(env, "distributed"),), event);
}

pub fn emit_fees_distributed(env: &soroban_sdk::Env, event: FeesDistributedEvent) {
    env.events()
        .publish((Symbol::new(env, "fees_distributed"),), event);
}

pub fn emit_funds_withdrawn(env: &soroban_sdk::Env, event: FundsWithdrawnEvent) {
    env.events()
        .publish((Symbol::new(env, "funds_withdrawn"),), event);
}

pub fn emit_status_updated(env: &soroban_sdk::Env, event: StatusUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "status_updated"),), event);
}

pub fn emit_metadata_updated(env: &soroban_sdk::Env, event: MetadataUpdatedEvent) {
    env.events()
        .publish((Symbol::new(env, "metadata_updated"),), event);
}
