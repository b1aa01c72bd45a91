//! Adversarial step generator

#[cfg(kani)]
use kani::any;
#[cfg(kani)]
use model_safety::{state::*, transitions::*};

#[derive(Clone, Copy)]
pub enum Step {
    Contribute,
    SetOpen,
    SetCap,
    Launch,
    Withdraw,
    Emergency,
    LaunchUnauthorized,
    EmergencyUnauthorized,
}

#[cfg(kani)]
impl kani::Arbitrary for Step {
    fn any() -> Self {
        let choice: u8 = any();
        match choice % 8 {
            0 => Step::Contribute,
            1 => Step::SetOpen,
            2 => Step::SetCap,
            3 => Step::Launch,
            4 => Step::Withdraw,
            5 => Step::Emergency,
            6 => Step::LaunchUnauthorized,
            _ => Step::EmergencyUnauthorized,
        }
    }
}

#[cfg(kani)]
pub fn adversary_step(s: State) -> State {
    if s.users.is_empty() {
        return s;
    }

    match any::<Step>() {
        Step::Contribute => {
            let uid: usize = (any::<u8>() as usize) % s.users.len();
            let x: u64 = (any::<u16>() as u64) % 1_000;
            contribute(s, uid, x)
        }
        Step::SetOpen => set_open(s, any()),
        Step::SetCap => {
            let cap: u64 = (any::<u16>() as u64) % 1_000;
            set_cap(s, cap)
        }
        Step::Launch => launch(s),
        Step::Withdraw => {
            let uid: usize = (any::<u8>() as usize) % s.users.len();
            withdraw(s, uid)
        }
        Step::Emergency => emergency_withdraw(s),
        Step::LaunchUnauthorized => launch_unauthorized(s),
        Step::EmergencyUnauthorized => emergency_withdraw_unauthorized(s),
    }
}
