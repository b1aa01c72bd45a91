//! State transition functions - all total, no panics
//!
//! A rejected transition returns the state unchanged.

use crate::helpers::*;
use crate::math::add_u64;
use crate::state::*;

/// Contribute `amount` for user `uid` (P1, P2)
pub fn contribute(mut s: State, uid: usize, amount: u64) -> State {
    if s.launched || !s.open || amount == 0 {
        return s;
    }

    // A drained campaign takes nothing new
    if s.escrow < s.total_contributed {
        return s;
    }

    if uid >= s.users.len() {
        return s;
    }

    // Re-read the stored cumulative amount, never a cached one
    let current = s.users[uid].amount;
    let next = match current.checked_add(amount) {
        Some(n) => n,
        None => return s,
    };
    if next > s.params.cap {
        return s;
    }
    let total = match s.total_contributed.checked_add(amount) {
        Some(t) => t,
        None => return s,
    };
    let escrow = match s.escrow.checked_add(amount) {
        Some(e) => e,
        None => return s,
    };

    s.users[uid].amount = next;
    s.total_contributed = total;
    s.escrow = escrow;

    s
}

/// Toggle the contribution window (operator, pre-launch)
pub fn set_open(mut s: State, open: bool) -> State {
    if !s.authorized_operator || s.launched {
        return s;
    }
    s.open = open;
    s
}

/// Change the per-address cap (operator, pre-launch)
pub fn set_cap(mut s: State, cap: u64) -> State {
    if !s.authorized_operator || s.launched {
        return s;
    }
    s.params.cap = cap;
    if cap > s.cap_high_water {
        s.cap_high_water = cap;
    }
    s
}

/// Launch: move the whole escrow into the pool and freeze the ratio (P3)
pub fn launch(mut s: State) -> State {
    if !s.authorized_operator || s.launched {
        return s;
    }

    // Escrow drained below what contributors are owed
    if s.escrow < s.total_contributed || s.escrow == 0 {
        return s;
    }

    // Contributors need a configured reserve to redeem against
    if s.total_contributed > 0 && s.params.reserved == 0 {
        return s;
    }

    s.to_liquidity = add_u64(s.to_liquidity, s.escrow);
    s.escrow = 0;
    s.snapshot_total = s.total_contributed;
    s.reserved_at_launch = if s.total_contributed == 0 { 0 } else { s.params.reserved };
    s.open = false;

    // Flag flips last
    s.launched = true;

    s
}

/// Redeem user `uid`'s pro-rata allocation exactly once (P4, P5)
pub fn withdraw(mut s: State, uid: usize) -> State {
    if !s.launched {
        return s;
    }

    if uid >= s.users.len() {
        return s;
    }

    if s.users[uid].amount == 0 || s.users[uid].withdrawn {
        return s;
    }

    let payout = payout_for(&s, uid);

    // Flag before the transfer
    s.users[uid].withdrawn = true;
    s.distributed = add_u64(s.distributed, payout);

    s
}

/// Drain the escrow to the operator, any state (does not touch records)
pub fn emergency_withdraw(mut s: State) -> State {
    if !s.authorized_operator {
        return s;
    }
    s.drained = add_u64(s.drained, s.escrow);
    s.escrow = 0;
    s
}

/// Privileged calls made by someone else (should be no-ops for P6)
pub fn launch_unauthorized(mut s: State) -> State {
    s.authorized_operator = false;
    let after = launch(s);
    restore_operator(after)
}

pub fn emergency_withdraw_unauthorized(mut s: State) -> State {
    s.authorized_operator = false;
    let after = emergency_withdraw(s);
    restore_operator(after)
}

fn restore_operator(mut s: State) -> State {
    s.authorized_operator = true;
    s
}

/// Fold a sequence of contributions; used by tests and proofs
pub fn contribute_all(s: State, amounts: &[(usize, u64)]) -> State {
    amounts
        .iter()
        .fold(s, |acc, &(uid, amount)| contribute(acc, uid, amount))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TENTH: u64 = 100_000_000;

    #[test]
    fn test_three_equal_contributors() {
        let s = State::with_users(3);
        let s = contribute_all(s, &[(0, TENTH), (1, TENTH), (2, TENTH)]);
        assert_eq!(s.total_contributed, 3 * TENTH);
        assert!(escrow_matches_records(&s));

        let s = launch(s);
        assert!(s.launched);
        assert_eq!(s.to_liquidity, 3 * TENTH);

        let s = withdraw(withdraw(withdraw(s, 0), 1), 2);
        assert_eq!(s.distributed, 3 * (s.params.reserved / 3));
        assert!(all_settled(&s));

        let before = s.clone();
        let s = withdraw(s, 0);
        assert!(balances_unchanged(&before, &s));
    }

    #[test]
    fn test_cap_exceeded_is_noop() {
        let s = State::with_users(1);
        let before = s.clone();
        let s = contribute(s, 0, 600_000_000);
        assert_eq!(s, before);
    }

    #[test]
    fn test_withdraw_before_launch_is_noop() {
        let s = contribute(State::with_users(1), 0, TENTH);
        let before = s.clone();
        assert_eq!(withdraw(s, 0), before);
    }

    #[test]
    fn test_launch_after_drain_refused() {
        let s = contribute(State::with_users(1), 0, TENTH);
        let s = emergency_withdraw(s);
        assert_eq!(s.drained, TENTH);
        let before = s.clone();
        assert_eq!(launch(s.clone()), before);
        assert_eq!(contribute(s, 0, TENTH), before);
    }

    #[test]
    fn test_launch_without_reserve_refused() {
        let mut s = contribute(State::with_users(1), 0, TENTH);
        s.params.reserved = 0;
        let before = s.clone();
        assert_eq!(launch(s), before);
    }

    #[test]
    fn test_unauthorized_privileged_calls() {
        let s = contribute(State::with_users(2), 1, TENTH);
        let before = s.clone();
        assert_eq!(emergency_withdraw_unauthorized(s.clone()), before);
        assert_eq!(launch_unauthorized(s), before);
    }

    #[derive(Clone, Debug)]
    enum Step {
        Contribute(usize, u64),
        SetOpen(bool),
        SetCap(u64),
        Launch,
        Withdraw(usize),
        Emergency,
    }

    fn any_step() -> impl Strategy<Value = Step> {
        prop_oneof![
            6 => (0usize..4, 0u64..700_000_000).prop_map(|(u, a)| Step::Contribute(u, a)),
            1 => any::<bool>().prop_map(Step::SetOpen),
            1 => (0u64..1_000_000_000).prop_map(Step::SetCap),
            1 => Just(Step::Launch),
            3 => (0usize..4).prop_map(Step::Withdraw),
            1 => Just(Step::Emergency),
        ]
    }

    fn apply(s: State, step: &Step) -> State {
        match *step {
            Step::Contribute(uid, amount) => contribute(s, uid, amount),
            Step::SetOpen(open) => set_open(s, open),
            Step::SetCap(cap) => set_cap(s, cap),
            Step::Launch => launch(s),
            Step::Withdraw(uid) => withdraw(s, uid),
            Step::Emergency => emergency_withdraw(s),
        }
    }

    proptest! {
        #[test]
        fn invariants_hold_across_adversarial_sequences(
            steps in proptest::collection::vec(any_step(), 1..40)
        ) {
            let mut s = State::with_users(4);
            for step in &steps {
                let before = s.clone();
                s = apply(s, step);
                prop_assert!(conservation_ok(&s));
                prop_assert!(caps_ok(&s));
                prop_assert!(launch_monotone(&before, &s));
                prop_assert!(withdrawn_monotone(&before, &s));
                prop_assert!(payouts_bounded(&s));
                if !s.launched && s.drained == 0 {
                    prop_assert!(escrow_matches_records(&s));
                }
            }
        }

        #[test]
        fn contribution_order_does_not_change_totals(
            amounts in proptest::collection::vec((0usize..4, 1u64..40_000_000), 1..12)
        ) {
            let forward = contribute_all(State::with_users(4), &amounts);
            let mut reversed_amounts = amounts.clone();
            reversed_amounts.reverse();
            let reversed = contribute_all(State::with_users(4), &reversed_amounts);
            prop_assert_eq!(forward.total_contributed, reversed.total_contributed);
            prop_assert_eq!(forward.users, reversed.users);
        }
    }
}
