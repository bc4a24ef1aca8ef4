use soroban_sdk::{token, Address, Env};

use crate::storage_types::*;

pub fn extend_instance(env: &Env) {
    env.storage().instance().extend_ttl(TTL_INSTANCE, TTL_INSTANCE);
}

fn extend_persistent(env: &Env, key: &PersistentKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_PERSISTENT, TTL_PERSISTENT);
}

pub fn read_admin(env: &Env) -> Result<Address, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(CrowdfundError::NotInitialized)
}

/// Token ledger every pledge is denominated in
pub fn read_token(env: &Env) -> Result<Address, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn read_max_duration(env: &Env) -> Result<u64, CrowdfundError> {
    env.storage()
        .instance()
        .get(&DataKey::MaxDuration)
        .ok_or(CrowdfundError::NotInitialized)
}

pub fn read_campaign_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::CampaignCount)
        .unwrap_or(0)
}

pub fn write_campaign_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::CampaignCount, &count);
}

pub fn load_campaign(env: &Env, id: CampaignId) -> Result<Campaign, CrowdfundError> {
    let key = PersistentKey::Campaign(id);
    let campaign: Campaign = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(CrowdfundError::CampaignNotFound)?;
    extend_persistent(env, &key);
    Ok(campaign)
}

pub fn save_campaign(env: &Env, campaign: &Campaign) {
    let key = PersistentKey::Campaign(campaign.id);
    env.storage().persistent().set(&key, campaign);
    extend_persistent(env, &key);
}

pub fn remove_campaign(env: &Env, id: CampaignId) {
    env.storage().persistent().remove(&PersistentKey::Campaign(id));
}

pub fn read_pledge(env: &Env, id: CampaignId, contributor: &Address) -> i128 {
    let key = PersistentKey::Pledge(id, contributor.clone());
    match env.storage().persistent().get::<PersistentKey, i128>(&key) {
        Some(amount) => {
            extend_persistent(env, &key);
            amount
        }
        None => 0,
    }
}

/// Zero entries are dropped rather than stored.
pub fn write_pledge(env: &Env, id: CampaignId, contributor: &Address, amount: i128) {
    let key = PersistentKey::Pledge(id, contributor.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_persistent(env, &key);
    }
}

/// Derive the lifecycle phase of `campaign` at ledger time `now`.
///
/// Nothing about the phase is stored: the window bounds, the pledged total
/// and the claimed flag fully determine it, so every entry point recomputes
/// it from the current ledger timestamp.
pub fn phase_at(now: u64, campaign: &Campaign) -> CampaignPhase {
    if campaign.claimed {
        CampaignPhase::Claimed
    } else if now < campaign.start_at {
        CampaignPhase::Pending
    } else if now <= campaign.end_at {
        CampaignPhase::Active
    } else if campaign.pledged >= campaign.goal {
        CampaignPhase::Succeeded
    } else {
        CampaignPhase::Failed
    }
}

/// Pull `amount` from `from` into custody using the allowance `from` granted
/// to this contract.
pub fn pull_into_custody(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    let token_client = token::TokenClient::new(env, token);
    let custody = env.current_contract_address();

    match token_client.try_transfer_from(&custody, from, &custody, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(CrowdfundError::TokenTransferFailed),
    }
}

/// Release `amount` from custody to `to`.
pub fn release_from_custody(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), CrowdfundError> {
    let token_client = token::TokenClient::new(env, token);

    match token_client.try_transfer(&env.current_contract_address(), to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(CrowdfundError::TokenTransferFailed),
    }
}
