//! Pool ledger: append-only pool records and the lazy accumulator step.

use common::fixed_point::{checked_add_u256, mul_div_floor, mul_div_wide};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, U256};

use crate::{state, FarmError};

// ── Storage keys ─────────────────────────────────────────────────────────────

// (POOL, index) -> PoolRecord
const POOL: Symbol = symbol_short!("POOL");
// (POOL_AST, stake token) -> index
const POOL_ASSET: Symbol = symbol_short!("POOL_AST");
const POOL_COUNT: Symbol = symbol_short!("POOL_CNT");

/// One registered stake asset.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolRecord {
    pub stake_token: Address,
    pub weight: u32,
    pub last_synced_block: u32,
    /// Reward per staked unit, scaled by `precision`.
    pub acc_reward_per_share: U256,
    pub precision: U256,
}

impl PoolRecord {
    pub fn new(
        env: &Env,
        stake_token: Address,
        weight: u32,
        precision: U256,
        current_block: u32,
    ) -> Self {
        Self {
            stake_token,
            weight,
            last_synced_block: current_block,
            acc_reward_per_share: U256::from_u32(env, 0),
            precision,
        }
    }

    /// Brings the accumulator to `current_block`.
    ///
    /// The reward for the whole unsynchronised span is priced with the
    /// *current* weight, total weight and emission rate. With no stake or no
    /// total weight only `last_synced_block` moves. Returns whether the record
    /// changed.
    pub fn accrue(
        &mut self,
        env: &Env,
        current_block: u32,
        staked_supply: i128,
        reward_per_block: i128,
        total_weight: u64,
    ) -> Result<bool, FarmError> {
        if current_block <= self.last_synced_block {
            return Ok(false);
        }
        if staked_supply <= 0 || total_weight == 0 {
            self.last_synced_block = current_block;
            return Ok(true);
        }

        let elapsed = i128::from(current_block - self.last_synced_block);
        let per_block = pool_reward(env, reward_per_block, self.weight, total_weight)?;
        let reward = per_block
            .checked_mul(elapsed)
            .ok_or(FarmError::ArithmeticOverflow)?;
        let delta = mul_div_wide(env, reward, &self.precision, staked_supply)
            .ok_or(FarmError::ArithmeticOverflow)?;

        self.acc_reward_per_share = checked_add_u256(&self.acc_reward_per_share, &delta)
            .ok_or(FarmError::ArithmeticOverflow)?;
        self.last_synced_block = current_block;
        Ok(true)
    }
}

/// A pool's share of the per-block emission: `rate * weight / total_weight`.
pub fn pool_reward(
    env: &Env,
    reward_per_block: i128,
    weight: u32,
    total_weight: u64,
) -> Result<i128, FarmError> {
    if total_weight == 0 {
        return Ok(0);
    }
    mul_div_floor(
        env,
        reward_per_block,
        i128::from(weight),
        i128::from(total_weight),
    )
    .ok_or(FarmError::ArithmeticOverflow)
}

// ── Storage ──────────────────────────────────────────────────────────────────

pub fn count(env: &Env) -> u32 {
    env.storage().instance().get(&POOL_COUNT).unwrap_or(0)
}

pub fn exists(env: &Env, index: u32) -> bool {
    index < count(env)
}

pub fn load(env: &Env, index: u32) -> Result<PoolRecord, FarmError> {
    if !exists(env, index) {
        return Err(FarmError::UnknownPool);
    }
    env.storage()
        .persistent()
        .get(&(POOL, index))
        .ok_or(FarmError::UnknownPool)
}

pub fn store(env: &Env, index: u32, pool: &PoolRecord) {
    let key = (POOL, index);
    env.storage().persistent().set(&key, pool);
    state::extend_persistent_ttl(env, &key);
}

pub fn index_of(env: &Env, stake_token: &Address) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&(POOL_ASSET, stake_token.clone()))
}

/// Appends `pool` and returns its index. Indices are never reused.
pub fn register(env: &Env, pool: &PoolRecord) -> u32 {
    let index = count(env);
    store(env, index, pool);

    let asset_key = (POOL_ASSET, pool.stake_token.clone());
    env.storage().persistent().set(&asset_key, &index);
    state::extend_persistent_ttl(env, &asset_key);

    env.storage().instance().set(&POOL_COUNT, &(index + 1));
    index
}
