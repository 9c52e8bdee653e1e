#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env, I256, U256};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub owner: Address,
    pub reward_token: Address,
    pub reward_per_block: i128,
    pub ledger: u32,
}

/// Fired when a stake asset is registered as a new pool.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolAddedEvent {
    pub pool: u32,
    pub stake_token: Address,
    pub weight: u32,
    pub total_weight: u64,
    pub ledger: u32,
}

/// Fired when a pool's allocation weight changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WeightSetEvent {
    pub pool: u32,
    pub weight: u32,
    pub total_weight: u64,
    pub ledger: u32,
}

/// Fired when the emission rate changes. `synced` tells whether every pool
/// was synchronised at the old rate first.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardRateSetEvent {
    pub reward_per_block: i128,
    pub synced: bool,
    pub ledger: u32,
}

/// Fired when a pool's accumulator is brought to the current ledger.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolSyncedEvent {
    pub pool: u32,
    pub last_synced_block: u32,
    pub staked_supply: i128,
    pub acc_reward_per_share: U256,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub caller: Address,
    pub pool: u32,
    pub amount: i128,
    pub beneficiary: Address,
    pub staked: i128,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub caller: Address,
    pub pool: u32,
    pub amount: i128,
    pub recipient: Address,
    pub staked: i128,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct HarvestEvent {
    pub caller: Address,
    pub pool: u32,
    pub amount: i128,
    pub recipient: Address,
    pub reward_debt: I256,
    pub ledger: u32,
}

/// Fired when a staker exits a pool forfeiting its pending reward.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EmergencyWithdrawEvent {
    pub caller: Address,
    pub pool: u32,
    pub amount: i128,
    pub recipient: Address,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PausedEvent {
    pub caller: Address,
    pub paused: bool,
    pub ledger: u32,
}

/// Fired on every ownership change. `new_owner` is `None` after renouncing,
/// `pending` is set while a two-phase handoff awaits its claim.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipEvent {
    pub previous_owner: Option<Address>,
    pub new_owner: Option<Address>,
    pub pending: Option<Address>,
    pub ledger: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchEvent {
    pub caller: Address,
    pub calls: u32,
    pub failed: u32,
    pub strict: bool,
    pub ledger: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address, reward_token: Address, reward_per_block: i128) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            owner,
            reward_token,
            reward_per_block,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_added(
    env: &Env,
    pool: u32,
    stake_token: Address,
    weight: u32,
    total_weight: u64,
) {
    env.events().publish(
        (symbol_short!("POOL_ADD"), pool),
        PoolAddedEvent {
            pool,
            stake_token,
            weight,
            total_weight,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_weight_set(env: &Env, pool: u32, weight: u32, total_weight: u64) {
    env.events().publish(
        (symbol_short!("POOL_SET"), pool),
        WeightSetEvent {
            pool,
            weight,
            total_weight,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_rate_set(env: &Env, reward_per_block: i128, synced: bool) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        RewardRateSetEvent {
            reward_per_block,
            synced,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_pool_synced(
    env: &Env,
    pool: u32,
    last_synced_block: u32,
    staked_supply: i128,
    acc_reward_per_share: U256,
) {
    env.events().publish(
        (symbol_short!("POOL_SYNC"), pool),
        PoolSyncedEvent {
            pool,
            last_synced_block,
            staked_supply,
            acc_reward_per_share,
        },
    );
}

pub fn publish_deposit(
    env: &Env,
    caller: Address,
    pool: u32,
    amount: i128,
    beneficiary: Address,
    staked: i128,
) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), beneficiary.clone(), pool),
        DepositEvent {
            caller,
            pool,
            amount,
            beneficiary,
            staked,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(
    env: &Env,
    caller: Address,
    pool: u32,
    amount: i128,
    recipient: Address,
    staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), caller.clone(), pool),
        WithdrawEvent {
            caller,
            pool,
            amount,
            recipient,
            staked,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_harvest(
    env: &Env,
    caller: Address,
    pool: u32,
    amount: i128,
    recipient: Address,
    reward_debt: I256,
) {
    env.events().publish(
        (symbol_short!("HARVEST"), caller.clone(), pool),
        HarvestEvent {
            caller,
            pool,
            amount,
            recipient,
            reward_debt,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_emergency_withdraw(
    env: &Env,
    caller: Address,
    pool: u32,
    amount: i128,
    recipient: Address,
) {
    env.events().publish(
        (symbol_short!("EMERGENCY"), caller.clone(), pool),
        EmergencyWithdrawEvent {
            caller,
            pool,
            amount,
            recipient,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address, paused: bool) {
    env.events().publish(
        (symbol_short!("PAUSED"),),
        PausedEvent {
            caller,
            paused,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_ownership(
    env: &Env,
    previous_owner: Option<Address>,
    new_owner: Option<Address>,
    pending: Option<Address>,
) {
    env.events().publish(
        (symbol_short!("OWN_XFER"),),
        OwnershipEvent {
            previous_owner,
            new_owner,
            pending,
            ledger: env.ledger().sequence(),
        },
    );
}

pub fn publish_batch(env: &Env, caller: Address, calls: u32, failed: u32, strict: bool) {
    env.events().publish(
        (symbol_short!("BATCH"), caller.clone()),
        BatchEvent {
            caller,
            calls,
            failed,
            strict,
            ledger: env.ledger().sequence(),
        },
    );
}
