//! Fungible token with allowances and an owner

use std::collections::{HashMap, HashSet};

use firstbuy_common::{CollaboratorError, LaunchToken, Pubkey, TokenAmount};

#[derive(Debug, Clone)]
pub struct MemoryToken {
    key: Pubkey,
    owner: Pubkey,
    balances: HashMap<Pubkey, TokenAmount>,
    allowances: HashMap<(Pubkey, Pubkey), TokenAmount>,
    /// Accounts whose outgoing transfers are blocked
    frozen: HashSet<Pubkey>,
}

impl MemoryToken {
    pub fn new(key: Pubkey, owner: Pubkey) -> Self {
        Self {
            key,
            owner,
            balances: HashMap::new(),
            allowances: HashMap::new(),
            frozen: HashSet::new(),
        }
    }

    pub fn owner(&self) -> Pubkey {
        self.owner
    }

    pub fn mint(&mut self, to: &Pubkey, amount: TokenAmount) {
        let entry = self.balances.entry(*to).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    pub fn set_frozen(&mut self, account: &Pubkey, frozen: bool) {
        if frozen {
            self.frozen.insert(*account);
        } else {
            self.frozen.remove(account);
        }
    }

    pub fn total_supply(&self) -> u128 {
        self.balances.values().map(|b| *b as u128).sum()
    }

    fn move_balance(&mut self, from: &Pubkey, to: &Pubkey, amount: TokenAmount) -> Result<(), CollaboratorError> {
        if self.frozen.contains(from) {
            return Err(CollaboratorError::Frozen);
        }
        let from_balance = self.balance_of(from);
        if from_balance < amount {
            return Err(CollaboratorError::InsufficientBalance);
        }
        if from == to || amount == 0 {
            return Ok(());
        }
        let to_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(CollaboratorError::Rejected)?;
        self.balances.insert(*from, from_balance - amount);
        self.balances.insert(*to, to_balance);
        Ok(())
    }
}

impl LaunchToken for MemoryToken {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn balance_of(&self, owner: &Pubkey) -> TokenAmount {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &Pubkey, spender: &Pubkey) -> TokenAmount {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    fn approve(&mut self, owner: &Pubkey, spender: &Pubkey, amount: TokenAmount) -> Result<(), CollaboratorError> {
        if amount == 0 {
            self.allowances.remove(&(*owner, *spender));
        } else {
            self.allowances.insert((*owner, *spender), amount);
        }
        Ok(())
    }

    fn transfer(&mut self, from: &Pubkey, to: &Pubkey, amount: TokenAmount) -> Result<(), CollaboratorError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &Pubkey,
        from: &Pubkey,
        to: &Pubkey,
        amount: TokenAmount,
    ) -> Result<(), CollaboratorError> {
        // Owners move their own balance without an allowance
        if spender == from {
            return self.move_balance(from, to, amount);
        }
        let allowed = self.allowance(from, spender);
        if allowed < amount {
            return Err(CollaboratorError::InsufficientAllowance);
        }
        self.move_balance(from, to, amount)?;
        self.approve(from, spender, allowed - amount)
    }

    fn transfer_ownership(&mut self, caller: &Pubkey, new_owner: &Pubkey) -> Result<(), CollaboratorError> {
        if *caller != self.owner {
            return Err(CollaboratorError::NotOwner);
        }
        self.owner = *new_owner;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key;

    #[test]
    fn test_transfer_from_spends_allowance() {
        let mut t = MemoryToken::new(key(9), key(1));
        t.mint(&key(1), 1_000);
        t.approve(&key(1), &key(2), 600).unwrap();

        t.transfer_from(&key(2), &key(1), &key(3), 400).unwrap();
        assert_eq!(t.allowance(&key(1), &key(2)), 200);
        assert_eq!(t.balance_of(&key(3)), 400);

        assert_eq!(
            t.transfer_from(&key(2), &key(1), &key(3), 201),
            Err(CollaboratorError::InsufficientAllowance)
        );
        assert_eq!(t.balance_of(&key(1)), 600);
    }

    #[test]
    fn test_frozen_account_cannot_send() {
        let mut t = MemoryToken::new(key(9), key(1));
        t.mint(&key(1), 10);
        t.set_frozen(&key(1), true);
        assert_eq!(t.transfer(&key(1), &key(2), 1), Err(CollaboratorError::Frozen));
        assert_eq!(t.total_supply(), 10);
    }

    #[test]
    fn test_only_owner_hands_over_ownership() {
        let mut t = MemoryToken::new(key(9), key(1));
        assert_eq!(t.transfer_ownership(&key(2), &key(3)), Err(CollaboratorError::NotOwner));
        t.transfer_ownership(&key(1), &key(3)).unwrap();
        assert_eq!(t.owner(), key(3));
    }
}
