//! Shared setup for handler tests

use firstbuy_common::*;
use firstbuy_sim::{key, Harness, ROUTER_KEY, TOKEN_KEY};

use crate::instructions::*;
use crate::state::Campaign;

pub const OPERATOR: u8 = 0x0F;
pub const CAMPAIGN: u8 = 0xCA;
pub const TENTH_SOL: Lamports = LAMPORTS_PER_SOL / 10;
pub const SUPPLY: TokenAmount = 10_000_000;
pub const RESERVE: TokenAmount = 1_000_000;
pub const LIQUIDITY: TokenAmount = 1_000_000;

pub struct Fixture {
    pub campaign: Campaign,
    pub h: Harness,
}

impl Fixture {
    /// Token configured, supplier approved, reserve set, window open
    pub fn new() -> Self {
        let mut campaign = Campaign::new(key(CAMPAIGN), key(OPERATOR), key(ROUTER_KEY));
        let mut h = Harness::new(campaign.id, SUPPLY);
        h.token.approve(&h.supplier, &campaign.id, SUPPLY).unwrap();
        h.bank.fund(&key(OPERATOR), LAMPORTS_PER_SOL);

        campaign.token = Some(key(TOKEN_KEY));
        campaign.supplier = h.supplier;
        campaign.reserved_for_contributors = RESERVE;
        Self { campaign, h }
    }

    pub fn operator(&self) -> CallContext {
        CallContext::new(self.campaign.operator)
    }

    pub fn fund(&mut self, tag: u8, lamports: Lamports) -> Pubkey {
        let who = key(tag);
        self.h.bank.fund(&who, lamports);
        who
    }

    pub fn contribute(&mut self, who: Pubkey, amount: Lamports) -> Result<Lamports, LaunchError> {
        let mut env = self.h.env();
        process_contribute(&mut self.campaign, &mut env, &CallContext::with_value(who, amount))
    }

    pub fn launch(&mut self, token_amount: TokenAmount) -> Result<crate::state::LaunchRecord, LaunchError> {
        let ctx = self.operator();
        let mut env = self.h.env();
        process_launch_token(&mut self.campaign, &mut env, &ctx, token_amount)
    }

    pub fn withdraw(&mut self, who: Pubkey) -> Result<TokenAmount, LaunchError> {
        let mut env = self.h.env();
        process_withdraw_tokens(&mut self.campaign, &mut env, &CallContext::new(who))
    }

    /// Three contributors at 0.1 SOL each
    pub fn with_three_contributors() -> (Self, [Pubkey; 3]) {
        let mut f = Self::new();
        let users = [1u8, 2, 3].map(|tag| f.fund(tag, LAMPORTS_PER_SOL));
        for who in users {
            f.contribute(who, TENTH_SOL).unwrap();
        }
        (f, users)
    }

    /// Three contributors, launched with LIQUIDITY tokens
    pub fn launched() -> (Self, [Pubkey; 3]) {
        let (mut f, users) = Self::with_three_contributors();
        f.launch(LIQUIDITY).unwrap();
        (f, users)
    }
}
