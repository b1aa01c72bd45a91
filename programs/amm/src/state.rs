//! AMM state - constant product pool

use firstbuy_common::{Lamports, Pubkey, TokenAmount};

use crate::math::{self, AmmError, MINIMUM_LIQUIDITY};

/// Pool reserves and parameters for one token/native pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pool {
    /// Pool address (custody of both reserves)
    pub address: Pubkey,

    /// Token this pool pairs with the native asset
    pub token: Pubkey,

    /// Token reserve (x in x·y=k)
    pub token_reserve: TokenAmount,

    /// Native reserve (y in x·y=k)
    pub native_reserve: Lamports,

    /// LP supply including the locked floor
    pub lp_supply: u64,

    /// Fee in basis points (e.g., 30 = 0.30%)
    pub fee_bps: u64,
}

impl Pool {
    /// Empty pool, created on first deposit
    pub fn new(address: Pubkey, token: Pubkey, fee_bps: u64) -> Self {
        Self {
            address,
            token,
            token_reserve: 0,
            native_reserve: 0,
            lp_supply: 0,
            fee_bps,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lp_supply == 0
    }

    /// LP tokens a deposit would mint, without changing the pool
    pub fn quote_deposit(&self, token_in: TokenAmount, native_in: Lamports) -> Result<u64, AmmError> {
        if self.is_empty() {
            math::initial_lp(token_in, native_in)
        } else {
            math::proportional_lp(
                token_in,
                native_in,
                self.token_reserve,
                self.native_reserve,
                self.lp_supply,
            )
        }
    }

    /// Apply a deposit already quoted at `minted`
    pub fn apply_deposit(&mut self, token_in: TokenAmount, native_in: Lamports, minted: u64) -> Result<(), AmmError> {
        let locked = if self.is_empty() { MINIMUM_LIQUIDITY } else { 0 };
        let token_reserve = self.token_reserve.checked_add(token_in).ok_or(AmmError::Overflow)?;
        let native_reserve = self.native_reserve.checked_add(native_in).ok_or(AmmError::Overflow)?;
        let lp_supply = self
            .lp_supply
            .checked_add(minted)
            .and_then(|s| s.checked_add(locked))
            .ok_or(AmmError::Overflow)?;

        self.token_reserve = token_reserve;
        self.native_reserve = native_reserve;
        self.lp_supply = lp_supply;
        Ok(())
    }

    /// Get spot price: p = y/x (scaled)
    pub fn spot_price(&self) -> u64 {
        math::spot_price(self.token_reserve, self.native_reserve)
    }

    /// Invariant k = x·y
    pub fn k(&self) -> u128 {
        (self.token_reserve as u128) * (self.native_reserve as u128)
    }

    /// Tokens a buyer would get for `native_in`
    pub fn quote_buy(&self, native_in: Lamports) -> Result<TokenAmount, AmmError> {
        math::quote_tokens_out(self.token_reserve, self.native_reserve, self.fee_bps, native_in)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::SCALE;

    fn pool() -> Pool {
        Pool::new([7; 32], [1; 32], 30)
    }

    #[test]
    fn test_first_deposit_locks_floor() {
        let mut p = pool();
        let minted = p.quote_deposit(1_000_000, 4_000_000).unwrap();
        assert_eq!(minted, 2_000_000 - MINIMUM_LIQUIDITY);

        p.apply_deposit(1_000_000, 4_000_000, minted).unwrap();
        assert_eq!(p.lp_supply, 2_000_000);
        assert_eq!(p.k(), 4_000_000_000_000);
        assert_eq!(p.spot_price(), 4 * SCALE);
    }

    #[test]
    fn test_second_deposit_is_proportional() {
        let mut p = pool();
        let first = p.quote_deposit(1_000_000, 4_000_000).unwrap();
        p.apply_deposit(1_000_000, 4_000_000, first).unwrap();

        let second = p.quote_deposit(500_000, 2_000_000).unwrap();
        assert_eq!(second, 1_000_000);
        p.apply_deposit(500_000, 2_000_000, second).unwrap();
        assert_eq!(p.spot_price(), 4 * SCALE);
    }

    #[test]
    fn test_quote_buy_on_empty_pool_fails() {
        assert_eq!(pool().quote_buy(1_000), Err(AmmError::InsufficientLiquidity));
    }
}
