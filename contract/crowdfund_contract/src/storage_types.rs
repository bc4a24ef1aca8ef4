use soroban_sdk::{contracterror, contracttype, Address};

// Instance storage: deployment-wide configuration and the campaign counter
#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Admin,
    Token,
    MaxDuration,
    CampaignCount,
}

// Persistent storage: one entry per campaign and per (campaign, contributor) pledge
#[derive(Clone)]
#[contracttype]
pub enum PersistentKey {
    Campaign(CampaignId),
    Pledge(CampaignId, Address),
}

pub type CampaignId = u64;

#[derive(Clone, Debug, PartialEq)]
#[contracttype]
pub struct Campaign {
    pub id: CampaignId,
    pub creator: Address,
    pub goal: i128,
    pub pledged: i128,
    pub start_at: u64,
    pub end_at: u64,
    pub claimed: bool,
}

/// Effective lifecycle phase, derived from the ledger clock on every call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[contracttype]
pub enum CampaignPhase {
    Pending,
    Active,
    Succeeded,
    Failed,
    Claimed,
}

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CrowdfundError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidConfig = 3,
    CampaignNotFound = 4,
    NotCreator = 5,
    StartAtInPast = 6,
    EndAtBeforeStartAt = 7,
    DurationTooLong = 8,
    InvalidGoal = 9,
    AlreadyStarted = 10,
    NotStarted = 11,
    AlreadyEnded = 12,
    InvalidAmount = 13,
    InsufficientPledge = 14,
    NotEnded = 15,
    PledgedBelowGoal = 16,
    GoalCompleted = 17,
    AlreadyClaimed = 18,
    ArithmeticOverflow = 19,
    TokenTransferFailed = 20,
}

// Constants
pub const DAY_IN_SECONDS: u64 = 86400;
pub const DEFAULT_MAX_DURATION: u64 = 30 * DAY_IN_SECONDS;
pub const DAY_IN_LEDGERS: u32 = 17280;
pub const TTL_INSTANCE: u32 = DAY_IN_LEDGERS * 30; // 30 days
pub const TTL_PERSISTENT: u32 = DAY_IN_LEDGERS * 90; // 90 days
