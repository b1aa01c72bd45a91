//! Generators for arbitrary reachable states (for Kani)
//!
//! States are built by running the model's own transitions from a fresh
//! campaign, so every generated state is reachable and satisfies the
//! invariants by construction.

#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use model_safety::{state::*, transitions::*};
#[cfg(kani)]
use crate::sanitizer::{Sanitize, N_USERS};

// Ultra-small bounds for very fast verification
#[cfg(kani)]
const MAX_AMOUNT: u64 = 200;

#[cfg(kani)]
pub fn any_params() -> Params {
    let cap_raw: u16 = any();
    let reserved_raw: u16 = any();
    Params {
        cap: (cap_raw as u64).max(1),
        reserved: reserved_raw as u64,
    }
}

/// Open campaign with N_USERS contributors and arbitrary bounded contributions
#[cfg(kani)]
pub fn any_collecting_state() -> State {
    let mut s = State::with_users(N_USERS);
    s.params = any_params();
    s.cap_high_water = s.params.cap;
    let mut s = s.sanitize();

    for uid in 0..N_USERS {
        let raw: u8 = any();
        s = contribute(s, uid, (raw as u64) % MAX_AMOUNT);
    }
    s
}

/// Reachable state, possibly launched and partially settled
#[cfg(kani)]
pub fn any_state_bounded() -> State {
    let mut s = any_collecting_state();

    if any::<bool>() {
        s = launch(s);
        for uid in 0..N_USERS {
            if any::<bool>() {
                s = withdraw(s, uid);
            }
        }
    }
    s
}
