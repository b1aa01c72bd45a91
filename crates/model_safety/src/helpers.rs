//! Invariant checking helpers

use crate::math::*;
use crate::state::*;

/// Sum of all recorded contributions
pub fn sum_contributions(s: &State) -> u64 {
    s.users.iter().fold(0u64, |acc, u| add_u64(acc, u.amount))
}

/// P1: Conservation - every credited lamport is in escrow, in the pool,
/// or was drained by the operator; the ledger total matches the records
pub fn conservation_ok(s: &State) -> bool {
    let sum = sum_contributions(s);
    let accounted = add_u64(add_u64(s.escrow, s.to_liquidity), s.drained);
    sum == s.total_contributed && accounted == s.total_contributed
}

/// P1 (pre-launch, undrained form): escrow equals the sum of records
pub fn escrow_matches_records(s: &State) -> bool {
    s.escrow == sum_contributions(s)
}

/// P2: No record above the largest cap ever configured
pub fn caps_ok(s: &State) -> bool {
    s.users.iter().all(|u| u.amount <= s.cap_high_water)
}

/// P3: Launch flag and frozen ratio never change once set
pub fn launch_monotone(before: &State, after: &State) -> bool {
    if !before.launched {
        return true;
    }
    after.launched
        && after.snapshot_total == before.snapshot_total
        && after.reserved_at_launch == before.reserved_at_launch
}

/// P4: Withdrawn flags never clear, and amounts never change after launch
pub fn withdrawn_monotone(before: &State, after: &State) -> bool {
    if before.users.len() != after.users.len() {
        return false;
    }
    before.users.iter().zip(after.users.iter()).all(|(a, b)| {
        let flag_ok = !a.withdrawn || b.withdrawn;
        let amount_ok = !before.launched || a.amount == b.amount;
        flag_ok && amount_ok
    })
}

/// P5: Tokens paid never exceed the reserve frozen at launch
pub fn payouts_bounded(s: &State) -> bool {
    s.distributed <= s.reserved_at_launch
}

/// P6: Nothing that holds value moved
pub fn balances_unchanged(before: &State, after: &State) -> bool {
    if before.escrow != after.escrow
        || before.total_contributed != after.total_contributed
        || before.distributed != after.distributed
        || before.to_liquidity != after.to_liquidity
        || before.drained != after.drained
    {
        return false;
    }
    if before.users.len() != after.users.len() {
        return false;
    }
    before.users.iter().zip(after.users.iter()).all(|(a, b)| a == b)
}

/// Payout a contributor would receive now (0 before launch)
pub fn payout_for(s: &State, uid: usize) -> u64 {
    if !s.launched || uid >= s.users.len() {
        return 0;
    }
    pro_rata_floor(s.users[uid].amount, s.reserved_at_launch, s.snapshot_total)
}

/// Every contributor with a non-zero amount has withdrawn
pub fn all_settled(s: &State) -> bool {
    s.users.iter().all(|u| u.amount == 0 || u.withdrawn)
}
