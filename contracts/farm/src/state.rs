use soroban_sdk::{symbol_short, Address, Env, IntoVal, Symbol, Val};

use crate::FarmError;

// ── Storage key constants ────────────────────────────────────────────────────

const INITIALIZED: Symbol = symbol_short!("INIT");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_PER_BLOCK: Symbol = symbol_short!("RWD_PB");
const TOTAL_WEIGHT: Symbol = symbol_short!("TOT_WT");

/// Ledgers kept in hand before an entry's TTL is extended again.
const DAY_OF_LEDGERS: u32 = 17_280;

// ── TTL ──────────────────────────────────────────────────────────────────────

/// Extends instance storage (global state, owner, pause flag) to the
/// network maximum.
pub fn extend_instance_ttl(env: &Env) {
    let max_ttl = env.storage().max_ttl();
    env.storage()
        .instance()
        .extend_ttl(max_ttl.saturating_sub(DAY_OF_LEDGERS), max_ttl);
}

/// Extends a persistent entry (pool or user record) to the network maximum.
pub fn extend_persistent_ttl<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    let max_ttl = env.storage().max_ttl();
    env.storage()
        .persistent()
        .extend_ttl(key, max_ttl.saturating_sub(DAY_OF_LEDGERS), max_ttl);
}

// ── Global state ─────────────────────────────────────────────────────────────

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&INITIALIZED)
}

pub fn mark_initialized(env: &Env) {
    env.storage().instance().set(&INITIALIZED, &true);
}

pub fn reward_token(env: &Env) -> Result<Address, FarmError> {
    env.storage()
        .instance()
        .get(&REWARD_TOKEN)
        .ok_or(FarmError::NotInitialized)
}

pub fn set_reward_token(env: &Env, token: &Address) {
    env.storage().instance().set(&REWARD_TOKEN, token);
}

pub fn reward_per_block(env: &Env) -> i128 {
    env.storage().instance().get(&REWARD_PER_BLOCK).unwrap_or(0)
}

pub fn set_reward_per_block(env: &Env, rate: i128) {
    env.storage().instance().set(&REWARD_PER_BLOCK, &rate);
}

/// Sum of all pool weights, maintained incrementally by add/set.
pub fn total_weight(env: &Env) -> u64 {
    env.storage().instance().get(&TOTAL_WEIGHT).unwrap_or(0)
}

pub fn set_total_weight(env: &Env, total: u64) {
    env.storage().instance().set(&TOTAL_WEIGHT, &total);
}

/// Current block height as seen by the farm.
pub fn current_block(env: &Env) -> u32 {
    env.ledger().sequence()
}
