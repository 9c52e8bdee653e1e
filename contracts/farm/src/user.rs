//! Per-(pool, account) stake ledger.
//!
//! A record never stores its reward directly. The claimable amount is always
//! `staked * acc_reward_per_share / precision - reward_debt`, and every change
//! to `staked` moves `reward_debt` by the same scaled amount so that the
//! claimable value is unchanged by the change itself. The debt is as wide as
//! the accumulator; only the difference has to fit an `i128`.

use common::fixed_point::{in_wide_range, share_floor};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, I256};

use crate::{pool::PoolRecord, state, FarmError};

// (USER, pool, account) -> UserRecord
const USER: Symbol = symbol_short!("USER");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UserRecord {
    pub staked: i128,
    pub reward_debt: I256,
}

impl UserRecord {
    pub fn empty(env: &Env) -> Self {
        Self {
            staked: 0,
            reward_debt: I256::from_i32(env, 0),
        }
    }

    /// Reward earned by the current stake since the pool's inception.
    pub fn accumulated(&self, env: &Env, pool: &PoolRecord) -> Result<I256, FarmError> {
        share_floor(env, self.staked, &pool.acc_reward_per_share, &pool.precision)
            .ok_or(FarmError::ArithmeticOverflow)
    }

    pub fn pending(&self, env: &Env, pool: &PoolRecord) -> Result<i128, FarmError> {
        let pending = self.accumulated(env, pool)?.sub(&self.reward_debt);
        if pending < I256::from_i32(env, 0) {
            return Err(FarmError::AccountingViolation);
        }
        pending.to_i128().ok_or(FarmError::ArithmeticOverflow)
    }

    /// Adds `delta` (which may be negative) to the stake at the pool's
    /// current accumulator without changing what is pending.
    ///
    /// The debt adjustment floors toward negative infinity so that pending
    /// can never be driven below zero by rounding.
    pub fn apply_delta(
        &mut self,
        env: &Env,
        pool: &PoolRecord,
        delta: i128,
    ) -> Result<(), FarmError> {
        let staked = self
            .staked
            .checked_add(delta)
            .ok_or(FarmError::ArithmeticOverflow)?;
        if staked < 0 {
            return Err(FarmError::InsufficientStake);
        }
        let debt_delta = share_floor(env, delta, &pool.acc_reward_per_share, &pool.precision)
            .ok_or(FarmError::ArithmeticOverflow)?;

        let reward_debt = self.reward_debt.add(&debt_delta);
        if !in_wide_range(env, &reward_debt) {
            return Err(FarmError::ArithmeticOverflow);
        }
        self.reward_debt = reward_debt;
        self.staked = staked;
        Ok(())
    }

    /// Marks everything pending as paid and returns it.
    pub fn settle(&mut self, env: &Env, pool: &PoolRecord) -> Result<i128, FarmError> {
        let paid = self.pending(env, pool)?;
        self.reward_debt = self.accumulated(env, pool)?;
        Ok(paid)
    }

    /// Clears the record, forfeiting anything pending. Returns the stake.
    pub fn reset(&mut self, env: &Env) -> i128 {
        let staked = self.staked;
        *self = Self::empty(env);
        staked
    }
}

// ── Storage ──────────────────────────────────────────────────────────────────

/// Loads a record; accounts that never deposited read as empty.
pub fn load(env: &Env, pool: u32, account: &Address) -> UserRecord {
    env.storage()
        .persistent()
        .get(&(USER, pool, account.clone()))
        .unwrap_or_else(|| UserRecord::empty(env))
}

pub fn store(env: &Env, pool: u32, account: &Address, record: &UserRecord) {
    let key = (USER, pool, account.clone());
    env.storage().persistent().set(&key, record);
    state::extend_persistent_ttl(env, &key);
}
