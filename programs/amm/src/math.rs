//! Constant product AMM math (x·y=k)

/// Scaling factor for prices (1e6)
pub const SCALE: u64 = 1_000_000;

/// Basis points scale (10,000 bps = 100%)
pub const BPS_SCALE: u64 = 10_000;

/// LP tokens locked forever on pool creation so the pool can never be
/// fully drained
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmError {
    InvalidAmount,
    InsufficientLiquidity,
    Overflow,
}

/// Integer square root (floor), Newton iteration
pub fn isqrt(n: u128) -> u128 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}

/// LP minted when a pool is created
///
/// - L = sqrt(x·y)
/// - Recipient gets L - MINIMUM_LIQUIDITY; the floor is locked
pub fn initial_lp(token_in: u64, native_in: u64) -> Result<u64, AmmError> {
    if token_in == 0 || native_in == 0 {
        return Err(AmmError::InvalidAmount);
    }
    let k = (token_in as u128) * (native_in as u128);
    let l = isqrt(k);
    if l <= MINIMUM_LIQUIDITY as u128 {
        return Err(AmmError::InsufficientLiquidity);
    }
    u64::try_from(l - MINIMUM_LIQUIDITY as u128).map_err(|_| AmmError::Overflow)
}

/// LP minted for a deposit into an existing pool
///
/// LP = min(Δx·S/x, Δy·S/y); any excess on the other side is donated to the pool
pub fn proportional_lp(
    token_in: u64,
    native_in: u64,
    token_reserve: u64,
    native_reserve: u64,
    lp_supply: u64,
) -> Result<u64, AmmError> {
    if token_in == 0 || native_in == 0 {
        return Err(AmmError::InvalidAmount);
    }
    if token_reserve == 0 || native_reserve == 0 || lp_supply == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    let by_token = (token_in as u128) * (lp_supply as u128) / (token_reserve as u128);
    let by_native = (native_in as u128) * (lp_supply as u128) / (native_reserve as u128);
    let lp = by_token.min(by_native);
    if lp == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    u64::try_from(lp).map_err(|_| AmmError::Overflow)
}

/// Native per token, scaled by SCALE: p = y/x
pub fn spot_price(token_reserve: u64, native_reserve: u64) -> u64 {
    if token_reserve == 0 {
        return 0;
    }
    let p = (native_reserve as u128) * (SCALE as u128) / (token_reserve as u128);
    u64::try_from(p).unwrap_or(u64::MAX)
}

/// Tokens out for an exact native input, fee taken on input
///
/// - Δy_net = Δy·(1 - fee)
/// - Δx_out = x·Δy_net / (y + Δy_net)
pub fn quote_tokens_out(
    token_reserve: u64,
    native_reserve: u64,
    fee_bps: u64,
    native_in: u64,
) -> Result<u64, AmmError> {
    if token_reserve == 0 || native_reserve == 0 {
        return Err(AmmError::InsufficientLiquidity);
    }
    if native_in == 0 || fee_bps >= BPS_SCALE {
        return Err(AmmError::InvalidAmount);
    }
    let dy_net = (native_in as u128) * ((BPS_SCALE - fee_bps) as u128) / (BPS_SCALE as u128);
    let out = (token_reserve as u128) * dy_net / ((native_reserve as u128) + dy_net);
    u64::try_from(out).map_err(|_| AmmError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_isqrt() {
        assert_eq!(isqrt(0), 0);
        assert_eq!(isqrt(1), 1);
        assert_eq!(isqrt(15), 3);
        assert_eq!(isqrt(16), 4);
        assert_eq!(isqrt(u64::MAX as u128 * u64::MAX as u128), u64::MAX as u128);
    }

    #[test]
    fn test_initial_lp_locks_floor() {
        // 1M tokens (9 decimals) against 1.3 SOL
        let tokens = 1_000_000 * 1_000_000_000u64;
        let native = 1_300_000_000u64;
        let lp = initial_lp(tokens, native).unwrap();
        let l = isqrt(tokens as u128 * native as u128) as u64;
        assert_eq!(lp, l - MINIMUM_LIQUIDITY);
    }

    #[test]
    fn test_initial_lp_dust_pool_rejected() {
        assert_eq!(initial_lp(10, 10), Err(AmmError::InsufficientLiquidity));
        assert_eq!(initial_lp(0, 10), Err(AmmError::InvalidAmount));
    }

    #[test]
    fn test_proportional_lp_takes_smaller_side() {
        // Pool 1000:4000 with 2000 LP; deposit 100:800 -> min(200, 400)
        assert_eq!(proportional_lp(100, 800, 1_000, 4_000, 2_000), Ok(200));
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(spot_price(1_000, 2_000), 2 * SCALE);
        assert_eq!(spot_price(0, 2_000), 0);
    }

    #[test]
    fn test_quote_tokens_out_below_reserve() {
        let out = quote_tokens_out(1_000_000, 1_000_000, 30, 1_000_000).unwrap();
        // Half the pool at zero fee; slightly less with the fee
        assert!(out < 500_000);
        assert!(out > 490_000);
    }

    proptest! {
        #[test]
        fn isqrt_is_floor(n in any::<u64>()) {
            let n = n as u128;
            let r = isqrt(n);
            prop_assert!(r * r <= n);
            prop_assert!((r + 1) * (r + 1) > n);
        }
    }
}
