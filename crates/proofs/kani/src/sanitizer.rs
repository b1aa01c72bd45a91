//! State space sanitizer - bounds values for Kani exploration

use model_safety::state::*;

pub const N_USERS: usize = 3;
pub const MAX_STEPS: u8 = 4;

/// Bounds for tractable verification
const MAX_CAP: u64 = 1_000;
const MAX_RESERVED: u64 = 10_000;

pub trait Sanitize {
    fn sanitize(self) -> Self;
}

impl Sanitize for State {
    fn sanitize(mut self) -> State {
        // Clamp user count
        while self.users.len() > N_USERS {
            self.users.pop();
        }

        // Small cap keeps the product in pro-rata math cheap for the solver
        self.params.cap = if self.params.cap > MAX_CAP {
            self.params.cap % MAX_CAP
        } else {
            self.params.cap
        };
        if self.cap_high_water < self.params.cap {
            self.cap_high_water = self.params.cap;
        }

        self.params.reserved = if self.params.reserved > MAX_RESERVED {
            self.params.reserved % MAX_RESERVED
        } else {
            self.params.reserved
        };

        self
    }
}
