use soroban_sdk::{Env, I256, U256};

/// Default decimal exponent of the reward accumulator scale (`10^18`).
pub const PRECISION_DECIMALS: u32 = 18;

/// Decimals added on top of a stake asset's own decimals when deriving a
/// per-pool accumulator scale. A 7-decimal Stellar asset lands on `10^18`.
pub const PRECISION_HEADROOM_DECIMALS: u32 = PRECISION_DECIMALS - 7;

/// Largest power of ten that fits a `U256`.
pub const MAX_POW10: u32 = 76;

/// Largest accumulator scale exponent. Below `2^128`, so a stake times the
/// remainder of `acc / precision` always fits a `U256`.
pub const MAX_PRECISION_DECIMALS: u32 = 38;

// Wide products and shares are kept within +/- 2^253 so that adding or
// subtracting two of them can never leave `I256`.
const WIDE_LIMIT_BITS: u32 = 253;

/// `10^exp` as a `U256`, or `None` past [`MAX_POW10`].
pub fn pow10(env: &Env, exp: u32) -> Option<U256> {
    if exp > MAX_POW10 {
        return None;
    }
    Some(U256::from_u32(env, 10).pow(exp))
}

/// Accumulator scale for a stake asset with `asset_decimals` decimals, or
/// `None` past 27 decimals.
pub fn precision_for_decimals(env: &Env, asset_decimals: u32) -> Option<U256> {
    let exp = asset_decimals.checked_add(PRECISION_HEADROOM_DECIMALS)?;
    if exp > MAX_PRECISION_DECIMALS {
        return None;
    }
    pow10(env, exp)
}

pub fn u256_max(env: &Env) -> U256 {
    U256::from_parts(env, u64::MAX, u64::MAX, u64::MAX, u64::MAX)
}

fn wide_limit(env: &Env) -> U256 {
    U256::from_u32(env, 1).shl(WIDE_LIMIT_BITS)
}

fn is_zero(value: &U256) -> bool {
    *value == U256::from_u32(value.env(), 0)
}

/// `a * b`, or `None` where the host would trap on overflow.
pub fn checked_mul_u256(a: &U256, b: &U256) -> Option<U256> {
    if is_zero(a) {
        return Some(a.clone());
    }
    if *b > u256_max(a.env()).div(a) {
        return None;
    }
    Some(a.mul(b))
}

/// `a + b`, or `None` where the host would trap on overflow.
pub fn checked_add_u256(a: &U256, b: &U256) -> Option<U256> {
    if *b > u256_max(a.env()).sub(a) {
        return None;
    }
    Some(a.add(b))
}

/// Reinterprets a magnitude below `2^255` as a non-negative `I256`.
fn to_i256(env: &Env, value: &U256) -> I256 {
    I256::from_be_bytes(env, &value.to_be_bytes())
}

/// Whether `value` lies within the wide working range.
pub fn in_wide_range(env: &Env, value: &I256) -> bool {
    let limit = to_i256(env, &wide_limit(env));
    let floor = I256::from_i32(env, 0).sub(&limit);
    *value <= limit && *value >= floor
}

/// Computes `floor(a * b / denominator)` through a 256-bit intermediate.
///
/// Rounding is toward negative infinity, so a negative product rounds away
/// from zero. Returns `None` for a zero denominator or when the quotient does
/// not fit an `i128`. Nothing wraps or saturates.
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Option<i128> {
    if denominator == 0 {
        return None;
    }
    if a == 0 || b == 0 {
        return Some(0);
    }

    let negative = (a < 0) ^ (b < 0) ^ (denominator < 0);
    let numerator =
        U256::from_u128(env, a.unsigned_abs()).mul(&U256::from_u128(env, b.unsigned_abs()));
    let divisor = U256::from_u128(env, denominator.unsigned_abs());
    let quotient = numerator.div(&divisor).to_u128()?;

    if !negative {
        return i128::try_from(quotient).ok();
    }

    let exact = is_zero(&numerator.rem_euclid(&divisor));
    let magnitude = if exact {
        quotient
    } else {
        quotient.checked_add(1)?
    };
    0i128.checked_sub_unsigned(magnitude)
}

/// `floor(amount * scale / denominator)` for a non-negative `amount` and a
/// positive `denominator`, kept as a `U256`.
pub fn mul_div_wide(env: &Env, amount: i128, scale: &U256, denominator: i128) -> Option<U256> {
    if amount < 0 || denominator <= 0 {
        return None;
    }
    let product = checked_mul_u256(&U256::from_u128(env, amount.unsigned_abs()), scale)?;
    Some(product.div(&U256::from_u128(env, denominator.unsigned_abs())))
}

/// `floor(amount * acc / precision)` with a signed `amount`, rounded toward
/// negative infinity. `None` on a zero `precision` or outside the wide range.
///
/// `acc` is split into `whole * precision + rest` so that only the result,
/// not `amount * acc`, has to fit. Requires `precision < 2^129`.
pub fn share_floor(env: &Env, amount: i128, acc: &U256, precision: &U256) -> Option<I256> {
    if is_zero(precision) {
        return None;
    }
    let stake = U256::from_u128(env, amount.unsigned_abs());
    let whole = checked_mul_u256(&stake, &acc.div(precision))?;
    let rest = checked_mul_u256(&stake, &acc.rem_euclid(precision))?;

    let mut magnitude = checked_add_u256(&whole, &rest.div(precision))?;
    if amount < 0 && !is_zero(&rest.rem_euclid(precision)) {
        magnitude = magnitude.add(&U256::from_u32(env, 1));
    }
    if magnitude > wide_limit(env) {
        return None;
    }

    let share = to_i256(env, &magnitude);
    if amount < 0 {
        Some(I256::from_i32(env, 0).sub(&share))
    } else {
        Some(share)
    }
}
