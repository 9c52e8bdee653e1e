//! Ledger mutations behind the contract's entry points.
//!
//! Every operation here runs in three phases: validate and compute against
//! in-memory copies of the pool and user records, move tokens, then write
//! storage and publish events. A failure therefore leaves no trace, which is
//! what lets a lenient batch skip a call without rolling back its neighbours.
//! Authentication is the caller's job; these functions trust `caller`.

use common::fixed_point::precision_for_decimals;
use soroban_sdk::{contracttype, token::TokenClient, Address, Env, Vec, U256};

use crate::{
    events, guard,
    pool::{self, PoolRecord},
    state,
    user::{self, UserRecord},
    FarmError,
};

/// A pool record brought to the current ledger but not yet written back.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Synced {
    pub index: u32,
    pub pool: PoolRecord,
    pub staked_supply: i128,
    pub advanced: bool,
}

// ── Token collaborator ───────────────────────────────────────────────────────

/// The farm's own holding of `stake_token`, which is the pool's staked supply.
pub fn staked_supply(env: &Env, stake_token: &Address) -> Result<i128, FarmError> {
    match TokenClient::new(env, stake_token).try_balance(&env.current_contract_address()) {
        Ok(Ok(balance)) => Ok(balance),
        _ => Err(FarmError::AssetTransferFailed),
    }
}

fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), FarmError> {
    if amount == 0 {
        return Ok(());
    }
    match TokenClient::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(FarmError::AssetTransferFailed),
    }
}

fn asset_precision(env: &Env, stake_token: &Address) -> Result<U256, FarmError> {
    let decimals = match TokenClient::new(env, stake_token).try_decimals() {
        Ok(Ok(decimals)) => decimals,
        _ => return Err(FarmError::AssetTransferFailed),
    };
    precision_for_decimals(env, decimals).ok_or(FarmError::ArithmeticOverflow)
}

// ── Synchronisation ──────────────────────────────────────────────────────────

/// Computes the pool's state at the current ledger without persisting it.
pub fn project(env: &Env, index: u32) -> Result<Synced, FarmError> {
    let mut pool = pool::load(env, index)?;
    let staked_supply = staked_supply(env, &pool.stake_token)?;
    let advanced = pool.accrue(
        env,
        state::current_block(env),
        staked_supply,
        state::reward_per_block(env),
        state::total_weight(env),
    )?;
    Ok(Synced {
        index,
        pool,
        staked_supply,
        advanced,
    })
}

fn commit(env: &Env, synced: &Synced) {
    if !synced.advanced {
        return;
    }
    pool::store(env, synced.index, &synced.pool);
    events::publish_pool_synced(
        env,
        synced.index,
        synced.pool.last_synced_block,
        synced.staked_supply,
        synced.pool.acc_reward_per_share.clone(),
    );
}

pub fn sync_pool(env: &Env, index: u32) -> Result<PoolRecord, FarmError> {
    let synced = project(env, index)?;
    commit(env, &synced);
    Ok(synced.pool)
}

/// Synchronises each listed pool. Every index is checked and every pool
/// projected before anything is written; duplicates are synced once.
/// Returns the number of distinct pools.
pub fn mass_sync(env: &Env, indices: &Vec<u32>) -> Result<u32, FarmError> {
    let count = pool::count(env);
    if indices.iter().any(|index| index >= count) {
        return Err(FarmError::UnknownPool);
    }

    let mut seen: Vec<u32> = Vec::new(env);
    let mut projected: Vec<Synced> = Vec::new(env);
    for index in indices.iter() {
        if seen.contains(index) {
            continue;
        }
        seen.push_back(index);
        projected.push_back(project(env, index)?);
    }

    for synced in projected.iter() {
        commit(env, &synced);
    }
    Ok(seen.len())
}

pub fn mass_sync_all(env: &Env) -> Result<u32, FarmError> {
    let mut all = Vec::new(env);
    for index in 0..pool::count(env) {
        all.push_back(index);
    }
    mass_sync(env, &all)
}

// ── Staking flow ─────────────────────────────────────────────────────────────

/// Pulls `amount` of the pool's stake token from `caller` and credits it to
/// `beneficiary`. A zero amount only synchronises the pool.
pub fn deposit(
    env: &Env,
    caller: &Address,
    index: u32,
    amount: i128,
    beneficiary: &Address,
) -> Result<i128, FarmError> {
    guard::require_not_paused(env)?;
    if amount < 0 {
        return Err(FarmError::InvalidInput);
    }

    let synced = project(env, index)?;
    let mut record = user::load(env, index, beneficiary);
    record.apply_delta(env, &synced.pool, amount)?;

    transfer(
        env,
        &synced.pool.stake_token,
        caller,
        &env.current_contract_address(),
        amount,
    )?;

    commit(env, &synced);
    user::store(env, index, beneficiary, &record);
    events::publish_deposit(
        env,
        caller.clone(),
        index,
        amount,
        beneficiary.clone(),
        record.staked,
    );
    Ok(amount)
}

/// Debits `amount` from `caller`'s stake and sends it to `recipient`. The
/// reward earned so far stays pending.
pub fn withdraw(
    env: &Env,
    caller: &Address,
    index: u32,
    amount: i128,
    recipient: &Address,
) -> Result<i128, FarmError> {
    guard::require_not_paused(env)?;
    if amount < 0 {
        return Err(FarmError::InvalidInput);
    }

    let synced = project(env, index)?;
    let mut record = user::load(env, index, caller);
    record.apply_delta(env, &synced.pool, -amount)?;

    transfer(
        env,
        &synced.pool.stake_token,
        &env.current_contract_address(),
        recipient,
        amount,
    )?;

    commit(env, &synced);
    user::store(env, index, caller, &record);
    events::publish_withdraw(
        env,
        caller.clone(),
        index,
        amount,
        recipient.clone(),
        record.staked,
    );
    Ok(amount)
}

/// Pays `caller`'s pending reward to `recipient` and returns the amount.
pub fn harvest(
    env: &Env,
    caller: &Address,
    index: u32,
    recipient: &Address,
) -> Result<i128, FarmError> {
    guard::require_not_paused(env)?;

    let synced = project(env, index)?;
    let mut record = user::load(env, index, caller);
    let paid = record.settle(env, &synced.pool)?;

    transfer(
        env,
        &state::reward_token(env)?,
        &env.current_contract_address(),
        recipient,
        paid,
    )?;

    commit(env, &synced);
    user::store(env, index, caller, &record);
    events::publish_harvest(
        env,
        caller.clone(),
        index,
        paid,
        recipient.clone(),
        record.reward_debt.clone(),
    );
    Ok(paid)
}

/// Returns `caller`'s whole stake to `recipient` and forfeits its reward.
/// Works while paused and never touches the pool accumulator.
pub fn emergency_withdraw(
    env: &Env,
    caller: &Address,
    index: u32,
    recipient: &Address,
) -> Result<i128, FarmError> {
    let pool = pool::load(env, index)?;
    let sink = env.current_contract_address();
    if *recipient == sink {
        return Err(FarmError::ZeroAddressRecipient);
    }

    let mut record = user::load(env, index, caller);
    let amount = record.reset(env);

    transfer(env, &pool.stake_token, &sink, recipient, amount)?;

    user::store(env, index, caller, &record);
    events::publish_emergency_withdraw(env, caller.clone(), index, amount, recipient.clone());
    Ok(amount)
}

// ── Administration ───────────────────────────────────────────────────────────

/// Registers `stake_token` as a new pool. Existing accumulators are left
/// unsynchronised, so the grown total weight also applies to their pending
/// intervals.
pub fn add_pool(
    env: &Env,
    caller: &Address,
    weight: u32,
    stake_token: &Address,
) -> Result<u32, FarmError> {
    guard::require_owner(env, caller)?;
    if *stake_token == state::reward_token(env)? {
        return Err(FarmError::TokensIdentical);
    }
    if pool::index_of(env, stake_token).is_some() {
        return Err(FarmError::DuplicateAsset);
    }

    let precision = asset_precision(env, stake_token)?;
    let total_weight = state::total_weight(env)
        .checked_add(u64::from(weight))
        .ok_or(FarmError::ArithmeticOverflow)?;

    let record = PoolRecord::new(
        env,
        stake_token.clone(),
        weight,
        precision,
        state::current_block(env),
    );
    let index = pool::register(env, &record);
    state::set_total_weight(env, total_weight);

    events::publish_pool_added(env, index, stake_token.clone(), weight, total_weight);
    Ok(index)
}

/// Changes a pool's weight in place. No pool is synchronised first: the new
/// ratio reprices every pool's whole unsynchronised interval.
pub fn set_weight(env: &Env, caller: &Address, index: u32, weight: u32) -> Result<u64, FarmError> {
    guard::require_owner(env, caller)?;
    let mut record = pool::load(env, index)?;

    let total_weight = state::total_weight(env)
        .checked_sub(u64::from(record.weight))
        .and_then(|rest| rest.checked_add(u64::from(weight)))
        .ok_or(FarmError::ArithmeticOverflow)?;

    record.weight = weight;
    pool::store(env, index, &record);
    state::set_total_weight(env, total_weight);

    events::publish_weight_set(env, index, weight, total_weight);
    Ok(total_weight)
}

/// Changes the emission rate. With `sync_all_first` every pool is settled at
/// the old rate first; without it the new rate applies retroactively.
pub fn set_reward_per_block(
    env: &Env,
    caller: &Address,
    reward_per_block: i128,
    sync_all_first: bool,
) -> Result<(), FarmError> {
    guard::require_owner(env, caller)?;
    if reward_per_block < 0 {
        return Err(FarmError::InvalidInput);
    }

    if sync_all_first {
        mass_sync_all(env)?;
    }
    state::set_reward_per_block(env, reward_per_block);

    events::publish_reward_rate_set(env, reward_per_block, sync_all_first);
    Ok(())
}

// ── Queries ──────────────────────────────────────────────────────────────────

/// Reward `account` could harvest from the pool at the current ledger.
pub fn pending_reward(env: &Env, index: u32, account: &Address) -> Result<i128, FarmError> {
    let synced = project(env, index)?;
    user::load(env, index, account).pending(env, &synced.pool)
}

/// The pool's current per-block share of the emission.
pub fn pool_reward(env: &Env, index: u32) -> Result<i128, FarmError> {
    let record = pool::load(env, index)?;
    pool::pool_reward(
        env,
        state::reward_per_block(env),
        record.weight,
        state::total_weight(env),
    )
}

pub fn user_info(env: &Env, index: u32, account: &Address) -> Result<UserRecord, FarmError> {
    pool::load(env, index)?;
    Ok(user::load(env, index, account))
}
