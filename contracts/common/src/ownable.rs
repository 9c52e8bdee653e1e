use soroban_sdk::{symbol_short, Address, Env, Symbol};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");

// ── Types ────────────────────────────────────────────────────────────────────

/// Reasons an ownership operation is refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum OwnableError {
    /// Caller is not the current owner (or the contract has been renounced).
    NotOwner,
    /// Caller is not the staged pending owner, or nothing is staged.
    NotPendingOwner,
    /// A direct transfer named no new owner without renouncing.
    InvalidOwner,
}

/// How a `transfer_ownership` call took effect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Handoff {
    /// The owner changed immediately.
    Applied,
    /// The new owner was staged and must call `claim_ownership`.
    Staged,
}

// ── Core Functions ───────────────────────────────────────────────────────────

/// Sets the first owner. Callers are responsible for only doing this once.
pub fn init_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

/// Returns the current owner, or `None` once ownership has been renounced.
pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns the owner staged by a two-phase transfer, if any.
pub fn get_pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn is_owner(env: &Env, caller: &Address) -> bool {
    get_owner(env).map_or(false, |owner| owner == *caller)
}

pub fn require_owner(env: &Env, caller: &Address) -> Result<(), OwnableError> {
    if !is_owner(env, caller) {
        return Err(OwnableError::NotOwner);
    }
    Ok(())
}

/// Hands ownership to `new_owner`.
///
/// With `direct` the change is applied at once and any staged owner is
/// cleared; `new_owner = None` then renounces ownership, which is only
/// accepted together with `renounce`. Without `direct` the new owner is staged
/// (or the staged owner cleared) until it calls [`claim_ownership`].
pub fn transfer_ownership(
    env: &Env,
    caller: &Address,
    new_owner: Option<Address>,
    renounce: bool,
    direct: bool,
) -> Result<Handoff, OwnableError> {
    require_owner(env, caller)?;

    if direct {
        match new_owner {
            Some(owner) => env.storage().instance().set(&OWNER, &owner),
            None if renounce => env.storage().instance().remove(&OWNER),
            None => return Err(OwnableError::InvalidOwner),
        }
        env.storage().instance().remove(&PENDING_OWNER);
        return Ok(Handoff::Applied);
    }

    match new_owner {
        Some(owner) => env.storage().instance().set(&PENDING_OWNER, &owner),
        None => env.storage().instance().remove(&PENDING_OWNER),
    }
    Ok(Handoff::Staged)
}

/// Completes a staged transfer. Returns the previous owner.
pub fn claim_ownership(env: &Env, caller: &Address) -> Result<Option<Address>, OwnableError> {
    let pending = get_pending_owner(env).ok_or(OwnableError::NotPendingOwner)?;
    if pending != *caller {
        return Err(OwnableError::NotPendingOwner);
    }

    let previous = get_owner(env);
    env.storage().instance().set(&OWNER, &pending);
    env.storage().instance().remove(&PENDING_OWNER);
    Ok(previous)
}
