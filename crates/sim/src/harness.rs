//! A full set of collaborators for one campaign

use firstbuy_amm::ConstantProductRouter;
use firstbuy_common::{Env, Pubkey, TokenAmount};

use crate::{key, FixedClock, MemberSet, MemoryBank, MemoryToken};

pub const TOKEN_KEY: u8 = 0xA1;
pub const ROUTER_KEY: u8 = 0xA2;
pub const ALLOWLIST_KEY: u8 = 0xA3;
pub const SUPPLIER_KEY: u8 = 0xA4;

/// Launch genesis timestamp used by default
pub const GENESIS_TS: i64 = 1_700_000_000;

#[derive(Debug, Clone)]
pub struct Harness {
    pub bank: MemoryBank,
    pub token: MemoryToken,
    pub router: ConstantProductRouter,
    pub allowlist: MemberSet,
    pub clock: FixedClock,
    /// Account holding the launch token supply
    pub supplier: Pubkey,
}

impl Harness {
    /// Token owned by `token_owner`, `supply` minted to the supplier
    pub fn new(token_owner: Pubkey, supply: TokenAmount) -> Self {
        let supplier = key(SUPPLIER_KEY);
        let mut token = MemoryToken::new(key(TOKEN_KEY), token_owner);
        token.mint(&supplier, supply);
        Self {
            bank: MemoryBank::new(),
            token,
            router: ConstantProductRouter::new(key(ROUTER_KEY)),
            allowlist: MemberSet::new(key(ALLOWLIST_KEY)),
            clock: FixedClock(GENESIS_TS),
            supplier,
        }
    }

    pub fn env(&mut self) -> Env<'_> {
        Env {
            bank: &mut self.bank,
            token: &mut self.token,
            router: &mut self.router,
            allowlist: &self.allowlist,
            clock: &self.clock,
        }
    }
}
