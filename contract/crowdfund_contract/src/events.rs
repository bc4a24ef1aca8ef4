use soroban_sdk::{contracttype, Address, Env, Symbol};

use crate::storage_types::CampaignId;

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct LaunchedEvent {
    pub id: CampaignId,
    pub creator: Address,
    pub goal: i128,
    pub start_at: u64,
    pub end_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct CanceledEvent {
    pub id: CampaignId,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct PledgedEvent {
    pub id: CampaignId,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct UnpledgedEvent {
    pub id: CampaignId,
    pub contributor: Address,
    pub amount: i128,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct ClaimedEvent {
    pub id: CampaignId,
}

#[contracttype]
#[derive(Clone, Debug, PartialEq)]
pub struct RefundedEvent {
    pub id: CampaignId,
    pub contributor: Address,
    pub amount: i128,
}

pub fn emit_launched(env: &Env, event: LaunchedEvent) {
    env.events()
        .publish((Symbol::new(env, "launched"), event.id), event);
}

pub fn emit_canceled(env: &Env, event: CanceledEvent) {
    env.events()
        .publish((Symbol::new(env, "canceled"), event.id), event);
}

pub fn emit_pledged(env: &Env, event: PledgedEvent) {
    env.events()
        .publish((Symbol::new(env, "pledged"), event.id), event);
}

pub fn emit_unpledged(env: &Env, event: UnpledgedEvent) {
    env.events()
        .publish((Symbol::new(env, "unpledged"), event.id), event);
}

pub fn emit_claimed(env: &Env, event: ClaimedEvent) {
    env.events()
        .publish((Symbol::new(env, "claimed"), event.id), event);
}

pub fn emit_refunded(env: &Env, event: RefundedEvent) {
    env.events()
        .publish((Symbol::new(env, "refunded"), event.id), event);
}
