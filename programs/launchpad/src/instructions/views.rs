//! Read-only queries

use firstbuy_common::{Lamports, Pubkey, TokenAmount};

use crate::instructions::withdraw::payout_for;
use crate::state::{Campaign, LaunchRecord};

impl Campaign {
    /// Cumulative lamports contributed by `who`
    pub fn eth_contributions(&self, who: &Pubkey) -> Lamports {
        self.ledger.amount_of(who)
    }

    pub fn is_liquidity_added(&self) -> bool {
        self.is_launched()
    }

    pub fn total_contributed(&self) -> Lamports {
        self.ledger.total_contributed
    }

    pub fn contributor_count(&self) -> usize {
        self.ledger.contributor_count()
    }

    /// Tokens `who` could withdraw right now
    pub fn pending_payout(&self, who: &Pubkey) -> TokenAmount {
        match self.ledger.record(who) {
            Some(r) if !r.withdrawn => payout_for(self, r.amount),
            _ => 0,
        }
    }

    pub fn launch_record(&self) -> Option<&LaunchRecord> {
        self.launch.as_ref()
    }
}
