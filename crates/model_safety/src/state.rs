//! Pure state model for Kani verification

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Contributor {
    pub amount: u64,     // Only grows, and only before launch
    pub withdrawn: bool, // Flips once (P4)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Params {
    pub cap: u64,      // Per-address contribution cap
    pub reserved: u64, // Tokens set aside for contributors
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    pub escrow: u64,            // Native held for contributors
    pub total_contributed: u64, // Sum of credited contributions
    pub open: bool,
    pub launched: bool,
    pub snapshot_total: u64,     // total_contributed frozen at launch
    pub reserved_at_launch: u64, // Reserve frozen at launch
    pub distributed: u64,        // Tokens paid to contributors
    pub to_liquidity: u64,       // Native sent into the pool
    pub drained: u64,            // Native removed by emergency withdrawals
    pub cap_high_water: u64,     // Largest cap ever configured
    pub users: arrayvec::ArrayVec<Contributor, 6>, // Small fixed bound for Kani
    pub params: Params,
    pub authorized_operator: bool, // For P6: privileged checks
}

impl Default for Params {
    fn default() -> Self {
        Self {
            cap: 500_000_000,
            reserved: 1_000_000,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        let params = Params::default();
        Self {
            escrow: 0,
            total_contributed: 0,
            open: true,
            launched: false,
            snapshot_total: 0,
            reserved_at_launch: 0,
            distributed: 0,
            to_liquidity: 0,
            drained: 0,
            cap_high_water: params.cap,
            users: arrayvec::ArrayVec::new(),
            params,
            authorized_operator: true,
        }
    }
}

impl State {
    /// Fresh campaign with `n` empty contributor slots
    pub fn with_users(n: usize) -> Self {
        let mut s = Self::default();
        while s.users.len() < n && !s.users.is_full() {
            s.users.push(Contributor::default());
        }
        s
    }
}
