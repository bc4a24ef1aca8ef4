#![no_std]

mod campaign;
mod events;
mod storage_types;


use soroban_sdk::{contract, contractimpl, log, Address, Env};

pub use storage_types::{
    Campaign, CampaignId, CampaignPhase, CrowdfundError, DAY_IN_SECONDS, DEFAULT_MAX_DURATION,
};
use storage_types::DataKey;

#[contract]
pub struct CrowdfundContract;

#[contractimpl]
impl CrowdfundContract {
    /// Bind the registry to the token ledger pledges are made in and set the
    /// longest window a campaign may run for (in seconds). `admin` must sign.
    pub fn initialize(
        env: Env,
        admin: Address,
        token: Address,
        max_duration: u64,
    ) -> Result<(), CrowdfundError> {
        admin.require_auth();

        if env.storage().instance().has(&DataKey::Admin) {
            return Err(CrowdfundError::AlreadyInitialized);
        }
        if max_duration == 0 {
            return Err(CrowdfundError::InvalidConfig);
        }

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::MaxDuration, &max_duration);
        campaign::write_campaign_count(&env, 0);
        campaign::extend_instance(&env);

        log!(&env, "crowdfund initialized", admin, token, max_duration);
        Ok(())
    }

    /// Launch a campaign collecting toward `goal` between `start_at` and
    /// `end_at` (inclusive). Returns the new campaign id, starting at 1.
    pub fn launch(
        env: Env,
        creator: Address,
        goal: i128,
        start_at: u64,
        end_at: u64,
    ) -> Result<CampaignId, CrowdfundError> {
        creator.require_auth();
        let max_duration = campaign::read_max_duration(&env)?;
        let now = env.ledger().timestamp();

        if start_at < now {
            return Err(CrowdfundError::StartAtInPast);
        }
        if end_at <= start_at {
            return Err(CrowdfundError::EndAtBeforeStartAt);
        }
        if end_at - start_at > max_duration {
            return Err(CrowdfundError::DurationTooLong);
        }
        if goal <= 0 {
            return Err(CrowdfundError::InvalidGoal);
        }

        let id = campaign::read_campaign_count(&env)
            .checked_add(1)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        let record = Campaign {
            id,
            creator: creator.clone(),
            goal,
            pledged: 0,
            start_at,
            end_at,
            claimed: false,
        };

        campaign::save_campaign(&env, &record);
        campaign::write_campaign_count(&env, id);
        campaign::extend_instance(&env);

        log!(&env, "campaign launched", id, goal, start_at, end_at);
        events::emit_launched(
            &env,
            events::LaunchedEvent {
                id,
                creator,
                goal,
                start_at,
                end_at,
            },
        );

        Ok(id)
    }

    /// Remove a campaign that has not opened yet. Only the creator may do this.
    pub fn cancel(env: Env, creator: Address, id: CampaignId) -> Result<(), CrowdfundError> {
        creator.require_auth();
        let record = campaign::load_campaign(&env, id)?;

        if record.creator != creator {
            return Err(CrowdfundError::NotCreator);
        }
        if campaign::phase_at(env.ledger().timestamp(), &record) != CampaignPhase::Pending {
            return Err(CrowdfundError::AlreadyStarted);
        }

        // Nothing can be pledged before start_at, so there is no pledge ledger to clear.
        campaign::remove_campaign(&env, id);
        campaign::extend_instance(&env);

        log!(&env, "campaign canceled", id);
        events::emit_canceled(&env, events::CanceledEvent { id });

        Ok(())
    }

    /// Pledge `amount` to an active campaign. The contributor must have
    /// approved this contract for at least `amount` on the token ledger.
    pub fn pledge(
        env: Env,
        contributor: Address,
        id: CampaignId,
        amount: i128,
    ) -> Result<(), CrowdfundError> {
        contributor.require_auth();
        let token = campaign::read_token(&env)?;
        let mut record = campaign::load_campaign(&env, id)?;

        match campaign::phase_at(env.ledger().timestamp(), &record) {
            CampaignPhase::Pending => return Err(CrowdfundError::NotStarted),
            CampaignPhase::Active => {}
            _ => return Err(CrowdfundError::AlreadyEnded),
        }
        if amount <= 0 {
            return Err(CrowdfundError::InvalidAmount);
        }

        let entry = campaign::read_pledge(&env, id, &contributor)
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;
        record.pledged = record
            .pledged
            .checked_add(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        // Accounting is committed before the token call; a rejected transfer
        // fails the whole invocation and rolls these writes back.
        campaign::save_campaign(&env, &record);
        campaign::write_pledge(&env, id, &contributor, entry);
        campaign::pull_into_custody(&env, &token, &contributor, amount)?;
        campaign::extend_instance(&env);

        log!(&env, "pledged", id, contributor, amount);
        events::emit_pledged(
            &env,
            events::PledgedEvent {
                id,
                contributor,
                amount,
            },
        );

        Ok(())
    }

    /// Withdraw part or all of an earlier pledge while the window is still open.
    pub fn unpledge(
        env: Env,
        contributor: Address,
        id: CampaignId,
        amount: i128,
    ) -> Result<(), CrowdfundError> {
        contributor.require_auth();
        let token = campaign::read_token(&env)?;
        let mut record = campaign::load_campaign(&env, id)?;

        match campaign::phase_at(env.ledger().timestamp(), &record) {
            CampaignPhase::Pending | CampaignPhase::Active => {}
            _ => return Err(CrowdfundError::AlreadyEnded),
        }
        if amount <= 0 {
            return Err(CrowdfundError::InvalidAmount);
        }

        let entry = campaign::read_pledge(&env, id, &contributor);
        if entry < amount {
            return Err(CrowdfundError::InsufficientPledge);
        }

        record.pledged = record
            .pledged
            .checked_sub(amount)
            .ok_or(CrowdfundError::ArithmeticOverflow)?;

        campaign::save_campaign(&env, &record);
        campaign::write_pledge(&env, id, &contributor, entry - amount);
        campaign::release_from_custody(&env, &token, &contributor, amount)?;
        campaign::extend_instance(&env);

        log!(&env, "unpledged", id, contributor, amount);
        events::emit_unpledged(
            &env,
            events::UnpledgedEvent {
                id,
                contributor,
                amount,
            },
        );

        Ok(())
    }

    /// Pay the pooled pledges out to the creator once the window has closed
    /// with the goal met. Returns the amount paid.
    pub fn claim(env: Env, creator: Address, id: CampaignId) -> Result<i128, CrowdfundError> {
        creator.require_auth();
        let token = campaign::read_token(&env)?;
        let mut record = campaign::load_campaign(&env, id)?;

        if record.creator != creator {
            return Err(CrowdfundError::NotCreator);
        }
        match campaign::phase_at(env.ledger().timestamp(), &record) {
            CampaignPhase::Pending | CampaignPhase::Active => {
                return Err(CrowdfundError::NotEnded)
            }
            CampaignPhase::Failed => return Err(CrowdfundError::PledgedBelowGoal),
            CampaignPhase::Claimed => return Err(CrowdfundError::AlreadyClaimed),
            CampaignPhase::Succeeded => {}
        }

        // The flag is persisted before funds move so a re-entrant or retried
        // claim sees the campaign as already settled.
        record.claimed = true;
        campaign::save_campaign(&env, &record);
        campaign::release_from_custody(&env, &token, &creator, record.pledged)?;
        campaign::extend_instance(&env);

        log!(&env, "campaign claimed", id, record.pledged);
        events::emit_claimed(&env, events::ClaimedEvent { id });

        Ok(record.pledged)
    }

    /// Return the caller's own pledge after the window closed short of the
    /// goal. Returns the amount refunded, which is 0 when the caller has
    /// nothing left pledged.
    pub fn refund(env: Env, contributor: Address, id: CampaignId) -> Result<i128, CrowdfundError> {
        contributor.require_auth();
        let token = campaign::read_token(&env)?;
        let mut record = campaign::load_campaign(&env, id)?;

        match campaign::phase_at(env.ledger().timestamp(), &record) {
            CampaignPhase::Pending | CampaignPhase::Active => {
                return Err(CrowdfundError::NotEnded)
            }
            CampaignPhase::Succeeded | CampaignPhase::Claimed => {
                return Err(CrowdfundError::GoalCompleted)
            }
            CampaignPhase::Failed => {}
        }

        let amount = campaign::read_pledge(&env, id, &contributor);
        if amount > 0 {
            record.pledged = record
                .pledged
                .checked_sub(amount)
                .ok_or(CrowdfundError::ArithmeticOverflow)?;

            campaign::save_campaign(&env, &record);
            campaign::write_pledge(&env, id, &contributor, 0);
            campaign::release_from_custody(&env, &token, &contributor, amount)?;
        }
        campaign::extend_instance(&env);

        log!(&env, "refunded", id, contributor, amount);
        events::emit_refunded(
            &env,
            events::RefundedEvent {
                id,
                contributor,
                amount,
            },
        );

        Ok(amount)
    }

    // View functions

    /// Look up a campaign. After refunds `pledged` is the amount still held
    /// for it, not the peak total reached during the window.
    pub fn get_campaign(env: Env, id: CampaignId) -> Result<Campaign, CrowdfundError> {
        campaign::load_campaign(&env, id)
    }

    /// Number of campaigns ever launched, including canceled ones.
    pub fn campaigns_count(env: Env) -> u64 {
        campaign::read_campaign_count(&env)
    }

    /// Amount `contributor` currently has pledged to campaign `id`, 0 if none.
    pub fn get_pledge(env: Env, id: CampaignId, contributor: Address) -> i128 {
        campaign::read_pledge(&env, id, &contributor)
    }

    /// Lifecycle phase of campaign `id` at the current ledger time.
    pub fn phase(env: Env, id: CampaignId) -> Result<CampaignPhase, CrowdfundError> {
        let record = campaign::load_campaign(&env, id)?;
        Ok(campaign::phase_at(env.ledger().timestamp(), &record))
    }

    /// Address that authorized `initialize`.
    pub fn admin(env: Env) -> Result<Address, CrowdfundError> {
        campaign::read_admin(&env)
    }

    /// Token ledger that holds pledged funds in custody.
    pub fn token_address(env: Env) -> Result<Address, CrowdfundError> {
        campaign::read_token(&env)
    }

    /// Longest allowed campaign window, in seconds.
    pub fn max_duration(env: Env) -> Result<u64, CrowdfundError> {
        campaign::read_max_duration(&env)
    }
}
