//! Native balances

use std::collections::{HashMap, HashSet};

use firstbuy_common::{CollaboratorError, Lamports, NativeBank, Pubkey};

#[derive(Debug, Clone, Default)]
pub struct MemoryBank {
    balances: HashMap<Pubkey, Lamports>,
    /// Accounts that refuse incoming transfers
    rejecting: HashSet<Pubkey>,
}

impl MemoryBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `amount` out of thin air (airdrop)
    pub fn fund(&mut self, owner: &Pubkey, amount: Lamports) {
        let entry = self.balances.entry(*owner).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Make `owner` reject (or accept again) incoming transfers
    pub fn set_rejecting(&mut self, owner: &Pubkey, rejecting: bool) {
        if rejecting {
            self.rejecting.insert(*owner);
        } else {
            self.rejecting.remove(owner);
        }
    }

    /// Sum of every balance
    pub fn supply(&self) -> u128 {
        self.balances.values().map(|b| *b as u128).sum()
    }
}

impl NativeBank for MemoryBank {
    fn balance(&self, owner: &Pubkey) -> Lamports {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: Lamports) -> Result<(), CollaboratorError> {
        if self.rejecting.contains(to) {
            return Err(CollaboratorError::Rejected);
        }
        let from_balance = self.balance(from);
        if from_balance < amount {
            return Err(CollaboratorError::InsufficientBalance);
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        let to_balance = self
            .balance(to)
            .checked_add(amount)
            .ok_or(CollaboratorError::Rejected)?;

        self.balances.insert(*from, from_balance - amount);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}
