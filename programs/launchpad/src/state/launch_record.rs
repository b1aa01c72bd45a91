//! Launch record - written once, never changed

use firstbuy_common::{Lamports, LiquidityReceipt, TokenAmount};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LaunchRecord {
    /// Tokens paired into the pool
    pub tokens_to_liquidity: TokenAmount,
    /// Escrow plus operator seed paired into the pool
    pub native_to_liquidity: Lamports,
    /// Lamports the operator attached to the launch call
    pub operator_seed: Lamports,
    /// Tokens held back for contributors (numerator of the payout ratio)
    pub tokens_reserved: TokenAmount,
    /// Total contributed at launch (denominator of the payout ratio)
    pub contributions_snapshot: Lamports,
    pub receipt: LiquidityReceipt,
    pub launched_at: i64,
}
