//! Allowlist membership and a fixed clock

use std::collections::HashSet;

use firstbuy_common::{Allowlist, Clock, Pubkey};

#[derive(Debug, Clone)]
pub struct MemberSet {
    key: Pubkey,
    members: HashSet<Pubkey>,
}

impl MemberSet {
    pub fn new(key: Pubkey) -> Self {
        Self { key, members: HashSet::new() }
    }

    pub fn add(&mut self, who: &Pubkey) {
        self.members.insert(*who);
    }
}

impl Allowlist for MemberSet {
    fn key(&self) -> Pubkey {
        self.key
    }

    fn is_member(&self, who: &Pubkey) -> bool {
        self.members.contains(who)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn unix_timestamp(&self) -> i64 {
        self.0
    }
}
