//! Shared amounts, receipts and call context

pub use pinocchio::pubkey::Pubkey;

/// Native asset amount (base units)
pub type Lamports = u64;

/// Launch token amount (base units)
pub type TokenAmount = u64;

pub const LAMPORTS_PER_SOL: Lamports = 1_000_000_000;

/// Default per-address contribution cap: 0.5 SOL
pub const DEFAULT_MAX_CONTRIBUTION: Lamports = LAMPORTS_PER_SOL / 2;

/// Who is calling and how much native value rides along with the call.
///
/// `attached` is credited to the callee only if the call succeeds; a failed
/// call leaves it with the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    pub caller: Pubkey,
    pub attached: Lamports,
}

impl CallContext {
    pub fn new(caller: Pubkey) -> Self {
        Self { caller, attached: 0 }
    }

    pub fn with_value(caller: Pubkey, attached: Lamports) -> Self {
        Self { caller, attached }
    }
}

/// Liquidity position minted by the AMM router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityReceipt {
    /// Pool the liquidity went into
    pub pool: Pubkey,
    /// LP tokens minted to the recipient
    pub lp_tokens: u64,
    /// Tokens the pool actually consumed
    pub token_amount: TokenAmount,
    /// Native amount the pool actually consumed
    pub native_amount: Lamports,
}
