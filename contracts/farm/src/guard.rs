//! Owner and pause gating for the farm's entry points.
//!
//! The pause is a selective circuit breaker: it stops `deposit`, `withdraw`
//! and `harvest` only. Emergency exit, synchronisation, reads and owner
//! operations stay available while it is engaged.

use common::ownable;
use soroban_sdk::{symbol_short, Address, Env, Symbol};

use crate::{events, state, FarmError};

const PAUSED: Symbol = symbol_short!("PAUSED");

pub fn require_initialized(env: &Env) -> Result<(), FarmError> {
    if !state::is_initialized(env) {
        return Err(FarmError::NotInitialized);
    }
    Ok(())
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<(), FarmError> {
    ownable::require_owner(env, caller).map_err(FarmError::from)
}

pub fn is_paused(env: &Env) -> bool {
    env.storage().instance().get(&PAUSED).unwrap_or(false)
}

/// Fails with `Paused` while the staking circuit breaker is engaged.
pub fn require_not_paused(env: &Env) -> Result<(), FarmError> {
    if is_paused(env) {
        return Err(FarmError::Paused);
    }
    Ok(())
}

/// Engages or releases the circuit breaker. Owner only.
pub fn set_paused(env: &Env, caller: &Address, paused: bool) -> Result<(), FarmError> {
    require_owner(env, caller)?;

    env.storage().instance().set(&PAUSED, &paused);

    events::publish_paused(env, caller.clone(), paused);

    Ok(())
}

/// Owner-only ownership handoff; see [`ownable::transfer_ownership`].
pub fn transfer_ownership(
    env: &Env,
    caller: &Address,
    new_owner: Option<Address>,
    renounce: bool,
    direct: bool,
) -> Result<(), FarmError> {
    let previous = ownable::get_owner(env);
    ownable::transfer_ownership(env, caller, new_owner, renounce, direct)?;

    events::publish_ownership(
        env,
        previous,
        ownable::get_owner(env),
        ownable::get_pending_owner(env),
    );

    Ok(())
}

/// Completes a staged handoff for the pending owner.
pub fn claim_ownership(env: &Env, caller: &Address) -> Result<(), FarmError> {
    let previous = ownable::claim_ownership(env, caller)?;

    events::publish_ownership(env, previous, Some(caller.clone()), None);

    Ok(())
}
