//! Contribution ledger - per-address records and running totals

use std::collections::HashMap;

use firstbuy_common::{Lamports, LaunchError, Pubkey, TokenAmount};
use model_safety::math::sub_u64;

/// One contributor's cumulative position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContributorRecord {
    pub amount: Lamports,
    pub withdrawn: bool,
}

/// What a credit changed, so it can be taken back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credit {
    pub amount: Lamports,
    pub created: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContributionLedger {
    records: HashMap<Pubkey, ContributorRecord>,
    /// Sum of every credited amount
    pub total_contributed: Lamports,
    /// Lamports held for contributors and not yet moved out
    pub escrow: Lamports,
    /// Sum of amounts whose holders have withdrawn
    pub settled_contributions: Lamports,
    pub tokens_distributed: TokenAmount,
    pub tokens_swept: TokenAmount,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, who: &Pubkey) -> Option<&ContributorRecord> {
        self.records.get(who)
    }

    /// Cumulative amount for `who` (0 if never contributed)
    pub fn amount_of(&self, who: &Pubkey) -> Lamports {
        self.records.get(who).map(|r| r.amount).unwrap_or(0)
    }

    pub fn contributor_count(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Pubkey, &ContributorRecord)> {
        self.records.iter()
    }

    /// Sum of record amounts, widened
    pub fn sum_amounts(&self) -> u128 {
        self.records.values().map(|r| r.amount as u128).sum()
    }

    /// Every recorded contribution has been paid out
    pub fn all_settled(&self) -> bool {
        self.settled_contributions == self.total_contributed
    }

    /// Amount `who` would hold after adding `amount`, read from the stored record
    pub fn projected(&self, who: &Pubkey, amount: Lamports) -> Result<Lamports, LaunchError> {
        self.amount_of(who)
            .checked_add(amount)
            .ok_or(LaunchError::ArithmeticOverflow)
    }

    /// Add `amount` to `who`'s record and to the totals
    ///
    /// All-or-nothing: on overflow nothing changes.
    pub fn credit(&mut self, who: &Pubkey, amount: Lamports) -> Result<Credit, LaunchError> {
        let next = self.projected(who, amount)?;
        let total = self
            .total_contributed
            .checked_add(amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        let escrow = self
            .escrow
            .checked_add(amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;

        let created = !self.records.contains_key(who);
        self.records.entry(*who).or_default().amount = next;
        self.total_contributed = total;
        self.escrow = escrow;

        Ok(Credit { amount, created })
    }

    /// Undo a credit whose asset transfer failed
    pub fn revert_credit(&mut self, who: &Pubkey, credit: Credit) {
        if credit.created {
            self.records.remove(who);
        } else if let Some(r) = self.records.get_mut(who) {
            r.amount = sub_u64(r.amount, credit.amount);
        }
        self.total_contributed = sub_u64(self.total_contributed, credit.amount);
        self.escrow = sub_u64(self.escrow, credit.amount);
    }

    /// Flag `who` as paid `payout` tokens
    pub fn mark_withdrawn(&mut self, who: &Pubkey, payout: TokenAmount) -> Result<(), LaunchError> {
        let record = self.records.get(who).copied().ok_or(LaunchError::NoContribution)?;
        if record.withdrawn {
            return Err(LaunchError::AlreadyWithdrawn);
        }
        let settled = self
            .settled_contributions
            .checked_add(record.amount)
            .ok_or(LaunchError::ArithmeticOverflow)?;
        let distributed = self
            .tokens_distributed
            .checked_add(payout)
            .ok_or(LaunchError::ArithmeticOverflow)?;

        if let Some(r) = self.records.get_mut(who) {
            r.withdrawn = true;
        }
        self.settled_contributions = settled;
        self.tokens_distributed = distributed;
        Ok(())
    }

    /// Undo a withdrawal whose token transfer failed
    pub fn revert_withdrawn(&mut self, who: &Pubkey, payout: TokenAmount) {
        if let Some(r) = self.records.get_mut(who) {
            if r.withdrawn {
                r.withdrawn = false;
                self.settled_contributions = sub_u64(self.settled_contributions, r.amount);
                self.tokens_distributed = sub_u64(self.tokens_distributed, payout);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn who(tag: u8) -> Pubkey {
        [tag; 32]
    }

    #[test]
    fn test_credit_accumulates() {
        let mut ledger = ContributionLedger::new();
        let first = ledger.credit(&who(1), 100).unwrap();
        assert!(first.created);
        let second = ledger.credit(&who(1), 50).unwrap();
        assert!(!second.created);

        assert_eq!(ledger.amount_of(&who(1)), 150);
        assert_eq!(ledger.total_contributed, 150);
        assert_eq!(ledger.escrow, 150);
        assert_eq!(ledger.contributor_count(), 1);
    }

    #[test]
    fn test_revert_credit_restores_prior_state() {
        let mut ledger = ContributionLedger::new();
        ledger.credit(&who(1), 100).unwrap();
        let before = ledger.clone();

        let c = ledger.credit(&who(2), 40).unwrap();
        ledger.revert_credit(&who(2), c);
        assert_eq!(ledger, before);

        let c = ledger.credit(&who(1), 40).unwrap();
        ledger.revert_credit(&who(1), c);
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_overflow_changes_nothing() {
        let mut ledger = ContributionLedger::new();
        ledger.credit(&who(1), u64::MAX).unwrap();
        let before = ledger.clone();
        assert_eq!(ledger.credit(&who(2), 1), Err(LaunchError::ArithmeticOverflow));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_mark_withdrawn_once() {
        let mut ledger = ContributionLedger::new();
        ledger.credit(&who(1), 100).unwrap();

        assert_eq!(ledger.mark_withdrawn(&who(2), 5), Err(LaunchError::NoContribution));
        ledger.mark_withdrawn(&who(1), 7).unwrap();
        assert_eq!(ledger.mark_withdrawn(&who(1), 7), Err(LaunchError::AlreadyWithdrawn));
        assert_eq!(ledger.tokens_distributed, 7);
        assert!(ledger.all_settled());

        ledger.revert_withdrawn(&who(1), 7);
        assert_eq!(ledger.tokens_distributed, 0);
        assert!(!ledger.all_settled());
        assert!(!ledger.record(&who(1)).unwrap().withdrawn);
    }

    proptest! {
        #[test]
        fn totals_match_records(
            credits in proptest::collection::vec((0u8..6, 1u64..1_000_000_000), 0..30)
        ) {
            let mut ledger = ContributionLedger::new();
            for (tag, amount) in &credits {
                ledger.credit(&who(*tag), *amount).unwrap();
            }
            prop_assert_eq!(ledger.sum_amounts(), ledger.total_contributed as u128);
            prop_assert_eq!(ledger.escrow, ledger.total_contributed);
        }
    }
}
