//! Collaborator capabilities
//!
//! The launchpad never owns the token, the AMM or the allowlist. It talks to
//! them through these traits, bundled per call in an [`Env`].
//!
//! Contract for every fallible method: an `Err` means nothing moved.
//! Methods that take a `from`/`owner` address act with that address's
//! authority; the host only passes addresses it controls (the campaign's own
//! account) or the verified caller.

use crate::{CollaboratorError, Lamports, LiquidityReceipt, Pubkey, TokenAmount};

/// Native asset balances (lamports)
pub trait NativeBank {
    fn balance(&self, owner: &Pubkey) -> Lamports;

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: Lamports) -> Result<(), CollaboratorError>;
}

/// Fungible launch token
pub trait LaunchToken {
    /// Token address
    fn key(&self) -> Pubkey;

    fn balance_of(&self, owner: &Pubkey) -> TokenAmount;

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> TokenAmount;

    /// Set `spender`'s allowance over `owner`'s balance (overwrites)
    fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: TokenAmount) -> Result<(), CollaboratorError>;

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: TokenAmount) -> Result<(), CollaboratorError>;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &mut self,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: TokenAmount,
    ) -> Result<(), CollaboratorError>;

    /// Hand token ownership from `caller` (must be the current owner) to `new_owner`
    fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: &Pubkey) -> Result<(), CollaboratorError>;
}

/// AMM router able to seed a token/native pool
pub trait LiquidityRouter {
    /// Router address (spender of the provider's tokens)
    fn key(&self) -> Pubkey;

    /// Pull `token_amount` tokens (via allowance) and `native_amount` lamports
    /// from `provider` into the pool, minting LP tokens to `lp_recipient`.
    fn add_liquidity_native(
        &mut self,
        token: &mut dyn LaunchToken,
        bank: &mut dyn NativeBank,
        provider: &Pubkey,
        token_amount: TokenAmount,
        native_amount: Lamports,
        lp_recipient: &Pubkey,
    ) -> Result<LiquidityReceipt, CollaboratorError>;
}

/// Boolean membership oracle
pub trait Allowlist {
    fn key(&self) -> Pubkey;

    fn is_member(&self, who: &Pubkey) -> bool;
}

/// Wall-clock source for the launch timestamp
pub trait Clock {
    fn unix_timestamp(&self) -> i64;
}

/// Collaborators for one call
pub struct Env<'a> {
    pub bank: &'a mut dyn NativeBank,
    pub token: &'a mut dyn LaunchToken,
    pub router: &'a mut dyn LiquidityRouter,
    pub allowlist: &'a dyn Allowlist,
    pub clock: &'a dyn Clock,
}
