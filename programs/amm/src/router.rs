//! Constant product router - seeds token/native pools
//!
//! Pools are keyed by token address. Each pool holds both reserves at its
//! own address, derived from the router and token keys.

use std::collections::HashMap;

use firstbuy_common::{
    CollaboratorError, LaunchToken, Lamports, LiquidityReceipt, LiquidityRouter, NativeBank, Pubkey,
    TokenAmount,
};
use pinocchio::msg;

use crate::math::AmmError;
use crate::state::Pool;

/// Default pool fee: 0.30%
pub const DEFAULT_FEE_BPS: u64 = 30;

/// Deterministic pool address for (router, token)
pub fn pool_address(router: &Pubkey, token: &Pubkey) -> Pubkey {
    let mut out = [0u8; 32];
    for (i, b) in out.iter_mut().enumerate() {
        *b = router[i] ^ token[i].rotate_left(3) ^ 0x5a;
    }
    out
}

impl From<AmmError> for CollaboratorError {
    fn from(_: AmmError) -> Self {
        CollaboratorError::Rejected
    }
}

#[derive(Debug, Clone)]
pub struct ConstantProductRouter {
    key: Pubkey,
    fee_bps: u64,
    paused: bool,
    pools: HashMap<Pubkey, Pool>,
    /// LP balances by (pool, holder)
    lp_balances: HashMap<(Pubkey, Pubkey), u64>,
}

impl ConstantProductRouter {
    pub fn new(key: Pubkey) -> Self {
        Self::with_fee(key, DEFAULT_FEE_BPS)
    }

    pub fn with_fee(key: Pubkey, fee_bps: u64) -> Self {
        Self {
            key,
            fee_bps,
            paused: false,
            pools: HashMap::new(),
            lp_balances: HashMap::new(),
        }
    }

    /// Paused routers reject every deposit
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pool(&self, token: &Pubkey) -> Option<&Pool> {
        self.pools.get(token)
    }

    pub fn lp_balance(&self, pool: &Pubkey, holder: &Pubkey) -> u64 {
        self.lp_balances.get(&(*pool, *holder)).copied().unwrap_or(0)
    }
}

impl LiquidityRouter for ConstantProductRouter {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn add_liquidity_native(
        &mut self,
        token: &mut dyn LaunchToken,
        bank: &mut dyn NativeBank,
        provider: &Pubkey,
        token_amount: TokenAmount,
        native_amount: Lamports,
        lp_recipient: &Pubkey,
    ) -> Result<LiquidityReceipt, CollaboratorError> {
        if self.paused {
            msg!("Router: paused");
            return Err(CollaboratorError::Paused);
        }

        let token_key = token.key();
        let address = pool_address(&self.key, &token_key);
        let pool = self
            .pools
            .get(&token_key)
            .copied()
            .unwrap_or_else(|| Pool::new(address, token_key, self.fee_bps));

        // Quote first so nothing moves on a bad deposit
        let minted = pool.quote_deposit(token_amount, native_amount)?;
        let mut next = pool;
        next.apply_deposit(token_amount, native_amount, minted)?;
        let holder = (address, *lp_recipient);
        let lp_after = self
            .lp_balance(&address, lp_recipient)
            .checked_add(minted)
            .ok_or(CollaboratorError::Rejected)?;

        token.transfer_from(&self.key, provider, &address, token_amount)?;
        if let Err(e) = bank.transfer(provider, &address, native_amount) {
            // Hand the tokens back; the pool controls its own address
            token.transfer(&address, provider, token_amount)?;
            return Err(e);
        }

        self.pools.insert(token_key, next);
        self.lp_balances.insert(holder, lp_after);

        msg!("Router: liquidity added");

        Ok(LiquidityReceipt {
            pool: address,
            lp_tokens: minted,
            token_amount,
            native_amount,
        })
    }
}
