//! End-to-end campaigns driven through the instruction dispatcher

use std::sync::{Arc, Mutex};
use std::thread;

use firstbuy_common::*;
use firstbuy_launchpad::{process_instruction, Campaign};
use firstbuy_sim::{key, Harness, ALLOWLIST_KEY, ROUTER_KEY, TOKEN_KEY};
use pinocchio::program_error::ProgramError;

const OPERATOR: u8 = 0x0F;
const CAMPAIGN: u8 = 0xCA;
const TENTH: Lamports = LAMPORTS_PER_SOL / 10;
const SUPPLY: TokenAmount = 100_000_000;
const LIQUIDITY: TokenAmount = 1_000_000;
const RESERVE: TokenAmount = 1_000_000;

struct Session {
    campaign: Campaign,
    h: Harness,
}

impl Session {
    /// Fresh campaign; the token and reserve are set through instructions
    fn start() -> Self {
        let campaign = Campaign::new(key(CAMPAIGN), key(OPERATOR), key(ROUTER_KEY));
        let mut h = Harness::new(campaign.id, SUPPLY);
        h.token.approve(&h.supplier, &campaign.id, SUPPLY).unwrap();
        h.bank.fund(&key(OPERATOR), LAMPORTS_PER_SOL);

        let mut s = Self { campaign, h };
        let supplier = s.h.supplier;
        s.operator(LaunchInstruction::SetTokenAddress { token: key(TOKEN_KEY), supplier }).unwrap();
        s.operator(LaunchInstruction::SetReservedTokens { amount: RESERVE }).unwrap();
        s
    }

    fn call(&mut self, ctx: CallContext, ix: LaunchInstruction) -> Result<(), LaunchError> {
        let data = ix.pack();
        let mut env = self.h.env();
        process_instruction(&mut self.campaign, &mut env, &ctx, &data).map_err(|e| expect_launch_error(&e))
    }

    fn operator(&mut self, ix: LaunchInstruction) -> Result<(), LaunchError> {
        self.call(CallContext::new(key(OPERATOR)), ix)
    }

    fn contribute(&mut self, who: Pubkey, amount: Lamports) -> Result<(), LaunchError> {
        self.call(CallContext::with_value(who, amount), LaunchInstruction::Contribute)
    }

    fn withdraw(&mut self, who: Pubkey) -> Result<(), LaunchError> {
        self.call(CallContext::new(who), LaunchInstruction::WithdrawTokens)
    }

    fn funded(&mut self, tag: u8) -> Pubkey {
        let who = key(tag);
        self.h.bank.fund(&who, LAMPORTS_PER_SOL);
        who
    }
}

fn expect_launch_error(e: &ProgramError) -> LaunchError {
    match LaunchError::from_program_error(e) {
        Some(err) => err,
        None => panic!("not a launch error: {:?}", e),
    }
}

#[test]
fn three_equal_contributors_split_the_reserve() {
    let mut s = Session::start();
    let users = [s.funded(1), s.funded(2), s.funded(3)];
    for who in users {
        s.contribute(who, TENTH).unwrap();
    }
    assert_eq!(s.campaign.total_contributed(), 3 * TENTH);

    s.operator(LaunchInstruction::LaunchToken { token_amount: LIQUIDITY }).unwrap();
    assert!(s.campaign.is_liquidity_added());

    for who in users {
        s.withdraw(who).unwrap();
        assert_eq!(s.h.token.balance_of(&who), RESERVE / 3);
    }
    assert_eq!(s.withdraw(users[1]), Err(LaunchError::AlreadyWithdrawn));
    assert_eq!(s.h.token.balance_of(&users[1]), RESERVE / 3);

    assert_eq!(
        s.operator(LaunchInstruction::LaunchToken { token_amount: LIQUIDITY }),
        Err(LaunchError::AlreadyLaunched)
    );
}

#[test]
fn over_cap_contribution_leaves_escrow_unchanged() {
    let mut s = Session::start();
    let alice = s.funded(1);
    let bob = s.funded(2);
    s.contribute(bob, TENTH).unwrap();
    let escrow = s.campaign.ledger.escrow;

    assert_eq!(s.contribute(alice, 6 * TENTH), Err(LaunchError::CapExceeded));
    assert_eq!(s.campaign.ledger.escrow, escrow);
    assert_eq!(s.campaign.eth_contributions(&alice), 0);
    assert_eq!(s.h.bank.balance(&alice), LAMPORTS_PER_SOL);
}

#[test]
fn allowlisted_campaign_with_raised_cap() {
    let mut s = Session::start();
    let alice = s.funded(1);
    let mallory = s.funded(2);
    s.h.allowlist.add(&alice);
    s.operator(LaunchInstruction::SetAllowlist { allowlist: Some(key(ALLOWLIST_KEY)) }).unwrap();
    s.operator(LaunchInstruction::SetMaxContribution { amount: 8 * TENTH }).unwrap();

    s.contribute(alice, 7 * TENTH).unwrap();
    assert_eq!(s.contribute(mallory, TENTH), Err(LaunchError::NotAllowlisted));

    s.operator(LaunchInstruction::SetIsOpen { open: false }).unwrap();
    assert_eq!(s.contribute(alice, TENTH), Err(LaunchError::WindowClosed));

    s.operator(LaunchInstruction::LaunchToken { token_amount: LIQUIDITY }).unwrap();
    s.withdraw(alice).unwrap();
    // Sole contributor gets the whole reserve
    assert_eq!(s.h.token.balance_of(&alice), RESERVE);
}

#[test]
fn failed_launch_can_be_retried() {
    let mut s = Session::start();
    let alice = s.funded(1);
    s.contribute(alice, 2 * TENTH).unwrap();

    s.h.router.set_paused(true);
    assert_eq!(
        s.operator(LaunchInstruction::LaunchToken { token_amount: LIQUIDITY }),
        Err(LaunchError::LaunchFailed)
    );
    assert!(!s.campaign.is_liquidity_added());
    assert_eq!(s.h.bank.balance(&s.campaign.id), 2 * TENTH);
    assert_eq!(s.withdraw(alice), Err(LaunchError::NotLaunched));

    s.h.router.set_paused(false);
    s.operator(LaunchInstruction::LaunchToken { token_amount: LIQUIDITY }).unwrap();
    s.withdraw(alice).unwrap();
    assert_eq!(s.h.token.balance_of(&alice), RESERVE);
}

#[test]
fn emergency_drain_blocks_launch() {
    let mut s = Session::start();
    let alice = s.funded(1);
    s.contribute(alice, TENTH).unwrap();

    assert_eq!(
        s.call(CallContext::new(alice), LaunchInstruction::EmergencyWithdraw),
        Err(LaunchError::Unauthorized)
    );
    assert_eq!(s.h.bank.balance(&s.campaign.id), TENTH);

    s.operator(LaunchInstruction::EmergencyWithdraw).unwrap();
    assert_eq!(s.campaign.ledger.escrow, 0);
    assert_eq!(s.h.bank.balance(&key(OPERATOR)), LAMPORTS_PER_SOL + TENTH);

    assert_eq!(
        s.operator(LaunchInstruction::LaunchToken { token_amount: LIQUIDITY }),
        Err(LaunchError::InsufficientEscrow)
    );

    // A drained campaign stops taking money
    let bob = s.funded(2);
    assert_eq!(s.contribute(bob, 5 * TENTH), Err(LaunchError::InsufficientEscrow));
    assert_eq!(s.h.bank.balance(&s.campaign.id), 0);
}

#[test]
fn operator_handover_sweep_and_release() {
    let mut s = Session::start();
    let users = [s.funded(1), s.funded(2), s.funded(3)];
    for who in users {
        s.contribute(who, TENTH).unwrap();
    }
    s.operator(LaunchInstruction::LaunchToken { token_amount: LIQUIDITY }).unwrap();

    let successor = key(0x50);
    s.operator(LaunchInstruction::TransferOperator { new_operator: successor }).unwrap();
    assert_eq!(
        s.operator(LaunchInstruction::SweepUnclaimed),
        Err(LaunchError::Unauthorized)
    );

    let next = CallContext::new(successor);
    assert_eq!(s.call(next, LaunchInstruction::SweepUnclaimed), Err(LaunchError::ClaimsOutstanding));
    for who in users {
        s.withdraw(who).unwrap();
    }
    s.call(next, LaunchInstruction::SweepUnclaimed).unwrap();
    assert_eq!(s.h.token.balance_of(&successor), 1);

    s.call(next, LaunchInstruction::ReleaseTokenOwnership { new_owner: successor }).unwrap();
    assert_eq!(s.h.token.owner(), successor);
}

#[test]
fn concurrent_contributors_share_one_campaign() {
    let session = Arc::new(Mutex::new(Session::start()));
    let mut handles = Vec::new();

    for tag in 1u8..=8 {
        let session = Arc::clone(&session);
        handles.push(thread::spawn(move || {
            let mut s = session.lock().unwrap();
            let who = s.funded(tag);
            drop(s);
            for _ in 0..6 {
                let mut s = session.lock().unwrap();
                // Sixth attempt crosses the 0.5 cap
                let _ = s.contribute(who, TENTH);
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    let s = session.lock().unwrap();
    assert_eq!(s.campaign.contributor_count(), 8);
    assert_eq!(s.campaign.total_contributed(), 8 * 5 * TENTH);
    assert_eq!(s.campaign.ledger.escrow, s.campaign.total_contributed());
    assert_eq!(s.h.bank.balance(&s.campaign.id), s.campaign.total_contributed());
    for tag in 1u8..=8 {
        assert_eq!(s.campaign.eth_contributions(&key(tag)), 5 * TENTH);
    }
}
