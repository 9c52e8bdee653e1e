#![no_std]

//! Multi-pool reward farm.
//!
//! Stakers deposit a stake asset into one of several pools and earn a share of
//! a single per-ledger reward emission. The emission is split between pools by
//! weight and inside a pool by stake. Accrual is lazy: a pool's accumulator is
//! only brought current when something touches that pool.

pub mod batch;
pub mod engine;
pub mod errors;
pub mod events;
pub mod guard;
pub mod pool;
pub mod state;
pub mod user;

pub use batch::{BatchReport, CallOutcome, FarmCall};
pub use errors::{ErrorCategory, FarmError};
pub use pool::PoolRecord;
pub use user::UserRecord;

use common::ownable;
use soroban_sdk::{contract, contractimpl, Address, Env, Vec};

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct RewardFarm;

#[contractimpl]
impl RewardFarm {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `owner`            – account allowed to manage pools and rates.
    /// * `reward_token`     – token paid out on harvest. The farm must be
    ///   funded with it separately.
    /// * `reward_per_block` – emission per ledger across all pools.
    pub fn initialize(
        env: Env,
        owner: Address,
        reward_token: Address,
        reward_per_block: i128,
    ) -> Result<(), FarmError> {
        if state::is_initialized(&env) {
            return Err(FarmError::AlreadyInitialized);
        }
        if reward_per_block < 0 {
            return Err(FarmError::InvalidInput);
        }

        ownable::init_owner(&env, &owner);
        state::set_reward_token(&env, &reward_token);
        state::set_reward_per_block(&env, reward_per_block);
        state::set_total_weight(&env, 0);
        state::mark_initialized(&env);
        state::extend_instance_ttl(&env);

        events::publish_initialized(&env, owner, reward_token, reward_per_block);

        Ok(())
    }

    // ── Pool administration ─────────────────────────────────────────────────

    /// Register `stake_token` as a new pool with `weight`. Returns its index.
    pub fn add_pool(
        env: Env,
        caller: Address,
        weight: u32,
        stake_token: Address,
    ) -> Result<u32, FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        engine::add_pool(&env, &caller, weight, &stake_token)
    }

    /// Change a pool's weight. Returns the new total weight.
    ///
    /// Pools are *not* synchronised first, so the new ratio also prices
    /// every pool's interval since its last sync.
    pub fn set_weight(env: Env, caller: Address, pool: u32, weight: u32) -> Result<u64, FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        engine::set_weight(&env, &caller, pool, weight)
    }

    /// Change the emission rate, optionally synchronising every pool at the
    /// old rate first.
    pub fn set_reward_per_block(
        env: Env,
        caller: Address,
        reward_per_block: i128,
        sync_all_first: bool,
    ) -> Result<(), FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        engine::set_reward_per_block(&env, &caller, reward_per_block, sync_all_first)
    }

    // ── Synchronisation ─────────────────────────────────────────────────────

    /// Bring one pool's accumulator to the current ledger.
    pub fn sync_pool(env: Env, pool: u32) -> Result<PoolRecord, FarmError> {
        guard::require_initialized(&env)?;
        state::extend_instance_ttl(&env);
        engine::sync_pool(&env, pool)
    }

    /// Synchronise the listed pools. Fails without touching any pool if one
    /// index is unknown.
    pub fn mass_sync(env: Env, pools: Vec<u32>) -> Result<u32, FarmError> {
        guard::require_initialized(&env)?;
        state::extend_instance_ttl(&env);
        engine::mass_sync(&env, &pools)
    }

    pub fn mass_sync_all(env: Env) -> Result<u32, FarmError> {
        guard::require_initialized(&env)?;
        state::extend_instance_ttl(&env);
        engine::mass_sync_all(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` from `caller` on behalf of `beneficiary`.
    pub fn deposit(
        env: Env,
        caller: Address,
        pool: u32,
        amount: i128,
        beneficiary: Address,
    ) -> Result<(), FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        engine::deposit(&env, &caller, pool, amount, &beneficiary).map(|_| ())
    }

    /// Unstake `amount` of `caller`'s stake and send it to `recipient`.
    pub fn withdraw(
        env: Env,
        caller: Address,
        pool: u32,
        amount: i128,
        recipient: Address,
    ) -> Result<(), FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        engine::withdraw(&env, &caller, pool, amount, &recipient).map(|_| ())
    }

    /// Pay `caller`'s pending reward to `recipient`. Returns the amount paid.
    pub fn harvest(
        env: Env,
        caller: Address,
        pool: u32,
        recipient: Address,
    ) -> Result<i128, FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        engine::harvest(&env, &caller, pool, &recipient)
    }

    /// Return the whole stake to `recipient`, forfeiting pending reward.
    /// Available while paused.
    pub fn emergency_withdraw(
        env: Env,
        caller: Address,
        pool: u32,
        recipient: Address,
    ) -> Result<i128, FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        engine::emergency_withdraw(&env, &caller, pool, &recipient)
    }

    // ── Batch ───────────────────────────────────────────────────────────────

    /// Run several operations as `caller` in one invocation.
    ///
    /// With `strict` the first failing call aborts and reverts the whole
    /// batch. Without it failing calls are skipped and reported.
    pub fn batch(
        env: Env,
        caller: Address,
        calls: Vec<FarmCall>,
        strict: bool,
    ) -> Result<BatchReport, FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        batch::execute(&env, &caller, &calls, strict)
    }

    // ── Guard ───────────────────────────────────────────────────────────────

    /// Stop or resume deposit, withdraw and harvest.
    pub fn set_paused(env: Env, caller: Address, paused: bool) -> Result<(), FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        guard::set_paused(&env, &caller, paused)
    }

    /// Hand over ownership.
    ///
    /// With `direct` the change is immediate; `new_owner = None` then
    /// requires `renounce`. Otherwise `new_owner` is staged and must call
    /// `claim_ownership`; staging `None` cancels a pending handoff.
    pub fn transfer_ownership(
        env: Env,
        caller: Address,
        new_owner: Option<Address>,
        renounce: bool,
        direct: bool,
    ) -> Result<(), FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        guard::transfer_ownership(&env, &caller, new_owner, renounce, direct)
    }

    pub fn claim_ownership(env: Env, caller: Address) -> Result<(), FarmError> {
        guard::require_initialized(&env)?;
        caller.require_auth();
        state::extend_instance_ttl(&env);
        guard::claim_ownership(&env, &caller)
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn pool_length(env: Env) -> u32 {
        pool::count(&env)
    }

    pub fn pool_info(env: Env, pool: u32) -> Result<PoolRecord, FarmError> {
        pool::load(&env, pool)
    }

    pub fn user_info(env: Env, pool: u32, account: Address) -> Result<UserRecord, FarmError> {
        engine::user_info(&env, pool, &account)
    }

    /// Reward `account` could harvest right now. Read-only: the pool's
    /// accumulator is projected to the current ledger, not stored.
    pub fn pending_reward(env: Env, pool: u32, account: Address) -> Result<i128, FarmError> {
        engine::pending_reward(&env, pool, &account)
    }

    /// The pool's current per-ledger share of the emission.
    pub fn pool_reward(env: Env, pool: u32) -> Result<i128, FarmError> {
        engine::pool_reward(&env, pool)
    }

    /// The farm's balance of the pool's stake token.
    pub fn staked_supply(env: Env, pool: u32) -> Result<i128, FarmError> {
        let record = pool::load(&env, pool)?;
        engine::staked_supply(&env, &record.stake_token)
    }

    pub fn total_weight(env: Env) -> u64 {
        state::total_weight(&env)
    }

    pub fn reward_per_block(env: Env) -> i128 {
        state::reward_per_block(&env)
    }

    pub fn reward_token(env: Env) -> Result<Address, FarmError> {
        state::reward_token(&env)
    }

    pub fn owner(env: Env) -> Option<Address> {
        ownable::get_owner(&env)
    }

    pub fn pending_owner(env: Env) -> Option<Address> {
        ownable::get_pending_owner(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        guard::is_paused(&env)
    }

    pub fn is_initialized(env: Env) -> bool {
        state::is_initialized(&env)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────




#[cfg(test)]
mod test_pause;

#[cfg(test)]
mod test_precision;
