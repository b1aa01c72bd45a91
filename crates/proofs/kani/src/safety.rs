//! Kani safety proofs for the six campaign invariants

use kani::{any, assume};
use model_safety::{helpers::*, math::*, transitions::*};
use crate::{adversary::*, generators::*, sanitizer::*};

/// P1: Conservation
/// Every credited lamport stays accounted for across adversarial sequences
#[kani::proof]
#[kani::unwind(8)] // Allow up to 8 loop iterations
fn p1_conservation_holds_across_short_adversary_sequences() {
    let mut s = any_state_bounded();
    assume(conservation_ok(&s));

    let mut steps: u8 = any();
    steps = (steps % MAX_STEPS) + 1;

    for _ in 0..steps {
        s = adversary_step(s);
        kani::assert(conservation_ok(&s), "P1: escrow + pool + drained must equal contributions");
    }
}

/// P2: Cap
/// A contribution over the cap leaves the state untouched
#[kani::proof]
fn p2_contribution_over_cap_is_rejected() {
    let s = any_collecting_state();
    let uid: usize = (any::<u8>() as usize) % N_USERS;
    let amount: u64 = any();

    assume(s.users[uid].amount.saturating_add(amount) > s.params.cap);

    let before = s.clone();
    let after = contribute(s, uid, amount);

    kani::assert(after == before, "P2: over-cap contribution must have no effect");
    kani::assert(caps_ok(&after), "P2: no record above the cap");
}

/// P3: Launch once
/// A second launch changes nothing
#[kani::proof]
fn p3_launch_is_single_shot() {
    let s = any_collecting_state();
    let once = launch(s);
    assume(once.launched);

    let twice = launch(once.clone());
    kani::assert(twice == once, "P3: relaunch must be a no-op");
    kani::assert(launch_monotone(&once, &twice), "P3: launched flag never reverts");
}

/// P4: Exactly-once withdrawal
#[kani::proof]
fn p4_withdraw_pays_once() {
    let s = launch(any_collecting_state());
    assume(s.launched);

    let uid: usize = (any::<u8>() as usize) % N_USERS;
    assume(s.users[uid].amount > 0);

    let first = withdraw(s.clone(), uid);
    kani::assert(first.users[uid].withdrawn, "P4: flag set on first withdrawal");
    kani::assert(
        first.distributed == s.distributed + payout_for(&s, uid),
        "P4: first withdrawal pays the pro-rata share",
    );

    let second = withdraw(first.clone(), uid);
    kani::assert(balances_unchanged(&first, &second), "P4: second withdrawal pays nothing");
}

/// P4 (pre-launch): withdrawal before launch never pays
#[kani::proof]
fn p4_no_withdrawal_before_launch() {
    let s = any_collecting_state();
    let uid: usize = (any::<u8>() as usize) % N_USERS;

    let before = s.clone();
    let after = withdraw(s, uid);
    kani::assert(balances_unchanged(&before, &after), "P4: withdraw before launch must not move value");
}

/// P5: Payouts bounded
/// Settling every contributor never pays more than the reserve
#[kani::proof]
fn p5_full_settlement_stays_within_reserve() {
    let mut s = launch(any_collecting_state());
    assume(s.launched);

    for uid in 0..N_USERS {
        s = withdraw(s, uid);
    }

    kani::assert(payouts_bounded(&s), "P5: distributed <= reserved");
    kani::assert(all_settled(&s), "P5: every contributor settled");
    kani::assert(
        sub_u64(s.reserved_at_launch, s.distributed) < N_USERS as u64 + 1,
        "P5: rounding dust below one unit per contributor",
    );
}

/// P6: Authorization
/// Privileged transitions called by anyone else cannot move value
#[kani::proof]
fn p6_unauthorized_cannot_mutate() {
    let s = any_state_bounded();
    let before = s.clone();

    let after = launch_unauthorized(s.clone());
    kani::assert(balances_unchanged(&before, &after), "P6: unauthorized launch must not move value");
    kani::assert(after.launched == before.launched, "P6: unauthorized launch must not flip the flag");

    let after = emergency_withdraw_unauthorized(s);
    kani::assert(balances_unchanged(&before, &after), "P6: unauthorized drain must not move value");
}
