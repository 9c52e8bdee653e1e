//! Multi-call executor.
//!
//! A batch runs a list of farm operations as a single caller, authorised once,
//! against one ledger sequence. Later calls observe the writes of earlier ones.

use soroban_sdk::{contracttype, log, Address, Env, Vec};

use crate::{engine, events, guard, state, FarmError};

/// One operation inside a batch. Arguments mirror the matching entry point
/// with the caller left out.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FarmCall {
    /// (pool, amount, beneficiary)
    Deposit(u32, i128, Address),
    /// (pool, amount, recipient)
    Withdraw(u32, i128, Address),
    /// (pool, recipient)
    Harvest(u32, Address),
    /// (pool, recipient)
    EmergencyWithdraw(u32, Address),
    SyncPool(u32),
    MassSync(Vec<u32>),
    MassSyncAll,
    /// (weight, stake token)
    AddPool(u32, Address),
    /// (pool, weight)
    SetWeight(u32, u32),
    /// (reward per block, sync all first)
    SetRewardPerBlock(i128, bool),
    SetPaused(bool),
    /// (new owner, renounce, direct)
    TransferOwnership(Option<Address>, bool, bool),
    ClaimOwnership,
}

/// Result of one call. `Applied` carries the call's value: the amount moved
/// for staking calls, the new pool index for `AddPool`, the ledger a
/// `SyncPool` brought the pool to, the pools touched by mass syncs, the new
/// total weight for `SetWeight`, and zero otherwise. `Failed` carries the
/// `FarmError` code.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CallOutcome {
    Applied(i128),
    Failed(u32),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BatchReport {
    /// Ledger sequence every call observed.
    pub ledger: u32,
    pub outcomes: Vec<CallOutcome>,
    /// Outcome of the final call.
    pub last: CallOutcome,
}

/// Runs `calls` in order.
///
/// In strict mode the first failure is returned and the host discards every
/// effect of the batch. Otherwise a failing call is recorded and skipped;
/// operations never write before they can no longer fail, so a skipped call
/// leaves nothing behind.
pub fn execute(
    env: &Env,
    caller: &Address,
    calls: &Vec<FarmCall>,
    strict: bool,
) -> Result<BatchReport, FarmError> {
    if calls.is_empty() {
        return Err(FarmError::InvalidInput);
    }

    let mut outcomes = Vec::new(env);
    let mut failed: u32 = 0;

    for (position, call) in calls.iter().enumerate() {
        let outcome = match dispatch(env, caller, call) {
            Ok(value) => CallOutcome::Applied(value),
            Err(err) if strict => return Err(err),
            Err(err) => {
                log!(env, "batch call skipped", position as u32, err as u32);
                failed = failed.saturating_add(1);
                CallOutcome::Failed(err as u32)
            }
        };
        outcomes.push_back(outcome);
    }

    events::publish_batch(env, caller.clone(), calls.len(), failed, strict);

    let last = outcomes.last().ok_or(FarmError::InvalidInput)?;
    Ok(BatchReport {
        ledger: state::current_block(env),
        outcomes,
        last,
    })
}

fn dispatch(env: &Env, caller: &Address, call: FarmCall) -> Result<i128, FarmError> {
    match call {
        FarmCall::Deposit(pool, amount, beneficiary) => {
            engine::deposit(env, caller, pool, amount, &beneficiary)
        }
        FarmCall::Withdraw(pool, amount, recipient) => {
            engine::withdraw(env, caller, pool, amount, &recipient)
        }
        FarmCall::Harvest(pool, recipient) => engine::harvest(env, caller, pool, &recipient),
        FarmCall::EmergencyWithdraw(pool, recipient) => {
            engine::emergency_withdraw(env, caller, pool, &recipient)
        }
        FarmCall::SyncPool(pool) => {
            engine::sync_pool(env, pool).map(|record| i128::from(record.last_synced_block))
        }
        FarmCall::MassSync(pools) => engine::mass_sync(env, &pools).map(i128::from),
        FarmCall::MassSyncAll => engine::mass_sync_all(env).map(i128::from),
        FarmCall::AddPool(weight, stake_token) => {
            engine::add_pool(env, caller, weight, &stake_token).map(i128::from)
        }
        FarmCall::SetWeight(pool, weight) => {
            engine::set_weight(env, caller, pool, weight).map(i128::from)
        }
        FarmCall::SetRewardPerBlock(rate, sync_all_first) => {
            engine::set_reward_per_block(env, caller, rate, sync_all_first).map(|()| 0)
        }
        FarmCall::SetPaused(paused) => guard::set_paused(env, caller, paused).map(|()| 0),
        FarmCall::TransferOwnership(new_owner, renounce, direct) => {
            guard::transfer_ownership(env, caller, new_owner, renounce, direct).map(|()| 0)
        }
        FarmCall::ClaimOwnership => guard::claim_ownership(env, caller).map(|()| 0),
    }
}
