//! Safe arithmetic helpers - no unwrap, no panics

/// Add u64 with saturation at MAX
pub fn add_u64(a: u64, b: u64) -> u64 {
    a.saturating_add(b)
}

/// Subtract u64 with saturation at 0
pub fn sub_u64(a: u64, b: u64) -> u64 {
    a.saturating_sub(b)
}

/// Minimum of two u64
pub fn min_u64(a: u64, b: u64) -> u64 {
    if a < b { a } else { b }
}

/// floor(a * b / d) computed in u128; None on d == 0 or if the result
/// does not fit in u64
pub fn mul_div_floor(a: u64, b: u64, d: u64) -> Option<u64> {
    if d == 0 {
        return None;
    }
    let q = (a as u128) * (b as u128) / (d as u128);
    if q > u64::MAX as u128 {
        None
    } else {
        Some(q as u64)
    }
}

/// Pro-rata share of `pool` for `amount` out of `total`, rounded down.
///
/// Returns 0 when `total` is 0. Never exceeds `pool` while
/// `amount <= total`, so a sum of shares over a partition of `total`
/// never exceeds `pool`.
pub fn pro_rata_floor(amount: u64, pool: u64, total: u64) -> u64 {
    match mul_div_floor(amount, pool, total) {
        Some(share) => min_u64(share, pool),
        None => {
            if total == 0 {
                0
            } else {
                pool
            }
        }
    }
}
