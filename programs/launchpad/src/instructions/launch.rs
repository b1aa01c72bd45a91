//! Launch instruction - pair the escrow with tokens in an AMM pool, once
//!
//! Steps that move assets are journaled. If any later step fails, the
//! journal is replayed in reverse and the campaign is left exactly as it
//! was. Adding liquidity is the last interaction and the only one that is
//! never undone. Whatever the router did not consume is then settled: the
//! router allowance is put back, unused tokens go to the supplier and unused
//! native refunds the seed first. The launch record is written last.

use arrayvec::ArrayVec;
use firstbuy_common::*;
use pinocchio::msg;

use crate::state::{Campaign, LaunchRecord};

/// Compensating action for one completed launch step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Undo {
    /// Return the operator seed
    RefundSeed { to: Pubkey, amount: Lamports },
    /// Send pulled tokens back to the supplier
    ReturnTokens { to: Pubkey, amount: TokenAmount },
    /// Put the router's allowance back where it was
    RestoreApproval { spender: Pubkey, previous: TokenAmount },
}

#[derive(Debug, Default)]
struct Journal {
    entries: ArrayVec<Undo, 4>,
}

impl Journal {
    fn record(&mut self, undo: Undo) {
        // At most three steps are journaled
        self.entries.push(undo);
    }

    /// Replay in reverse; keeps going past a failed entry
    fn unwind(self, campaign_id: &Pubkey, env: &mut Env<'_>) {
        for undo in self.entries.into_iter().rev() {
            let undone = match undo {
                Undo::RefundSeed { to, amount } => env.bank.transfer(campaign_id, &to, amount),
                Undo::ReturnTokens { to, amount } => env.token.transfer(campaign_id, &to, amount),
                Undo::RestoreApproval { spender, previous } => env.token.approve(campaign_id, &spender, previous),
            };
            if undone.is_err() {
                msg!("Error: Launch undo step failed");
            }
        }
    }
}

/// Amounts fixed before any step runs
#[derive(Debug, Clone, Copy)]
struct LaunchPlan {
    token_amount: TokenAmount,
    reserve: TokenAmount,
    /// Liquidity tokens plus reserve, pulled from the supplier
    pulled: TokenAmount,
    seed: Lamports,
    native: Lamports,
    /// Router allowance over the campaign before the launch
    previous_approval: TokenAmount,
}

/// Process launch instruction
///
/// The whole ledger escrow goes to liquidity. Lamports attached to the call
/// are an operator seed on top of it and are never counted as contributions.
/// With contributions the reserve must have been configured; with none,
/// nothing is reserved.
pub fn process_launch_token(
    campaign: &mut Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
    token_amount: TokenAmount,
) -> Result<LaunchRecord, LaunchError> {
    campaign.require_operator(ctx)?;
    campaign.require_not_launched()?;

    if campaign.token.is_none() {
        msg!("Error: Token address not set");
        return Err(LaunchError::NotConfigured);
    }
    if token_amount == 0 {
        return Err(LaunchError::InvalidAmount);
    }
    campaign.checked_token(env)?;
    campaign.check_router(env)?;

    let escrow = campaign.ledger.escrow;
    let total = campaign.ledger.total_contributed;
    if total > 0 && campaign.reserved_for_contributors == 0 {
        msg!("Error: Contributor reserve not set");
        return Err(LaunchError::NotConfigured);
    }
    if escrow < total {
        msg!("Error: Escrow no longer covers contributions");
        return Err(LaunchError::InsufficientEscrow);
    }
    let seed = ctx.attached;
    let native = escrow.checked_add(seed).ok_or(LaunchError::ArithmeticOverflow)?;
    if native == 0 {
        msg!("Error: Nothing to pair with the tokens");
        return Err(LaunchError::InsufficientEscrow);
    }
    let reserve = if total == 0 { 0 } else { campaign.reserved_for_contributors };
    let pulled = token_amount
        .checked_add(reserve)
        .ok_or(LaunchError::ArithmeticOverflow)?;

    let previous_approval = env.token.allowance(&campaign.id, &campaign.router);
    let plan = LaunchPlan { token_amount, reserve, pulled, seed, native, previous_approval };
    let mut journal = Journal::default();

    let receipt = match run_steps(campaign, env, ctx, &plan, &mut journal) {
        Ok(receipt) => receipt,
        Err(e) => {
            journal.unwind(&campaign.id, env);
            msg!("Error: Launch step rejected, unwound");
            log_collaborator_error(e);
            return Err(LaunchError::LaunchFailed);
        }
    };

    let record = LaunchRecord {
        tokens_to_liquidity: receipt.token_amount,
        native_to_liquidity: receipt.native_amount,
        operator_seed: plan.seed,
        tokens_reserved: plan.reserve,
        contributions_snapshot: total,
        receipt,
        launched_at: env.clock.unix_timestamp(),
    };

    let native_left = settle(campaign, env, ctx, &plan, &receipt);
    campaign.ledger.escrow = native_left;
    campaign.is_open = false;
    // Launched flag last
    campaign.launch = Some(record);

    pinocchio_log::log!("Launched: {} tokens, {} lamports", record.tokens_to_liquidity, record.native_to_liquidity);
    Ok(record)
}

fn run_steps(
    campaign: &Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
    plan: &LaunchPlan,
    journal: &mut Journal,
) -> Result<LiquidityReceipt, CollaboratorError> {
    if plan.seed > 0 {
        env.bank.transfer(&ctx.caller, &campaign.id, plan.seed)?;
        journal.record(Undo::RefundSeed { to: ctx.caller, amount: plan.seed });
    }

    env.token
        .transfer_from(&campaign.id, &campaign.supplier, &campaign.id, plan.pulled)?;
    journal.record(Undo::ReturnTokens { to: campaign.supplier, amount: plan.pulled });

    env.token.approve(&campaign.id, &campaign.router, plan.token_amount)?;
    journal.record(Undo::RestoreApproval { spender: campaign.router, previous: plan.previous_approval });

    env.router.add_liquidity_native(
        &mut *env.token,
        &mut *env.bank,
        &campaign.id,
        plan.token_amount,
        plan.native,
        &campaign.operator,
    )
}

/// Reconcile the plan against what the router consumed.
///
/// Runs after liquidity is added, so nothing here can fail the launch.
/// Returns the native amount left in the campaign, which stays in escrow.
fn settle(
    campaign: &Campaign,
    env: &mut Env<'_>,
    ctx: &CallContext,
    plan: &LaunchPlan,
    receipt: &LiquidityReceipt,
) -> Lamports {
    if let Err(e) = env.token.approve(&campaign.id, &campaign.router, plan.previous_approval) {
        msg!("Error: Router allowance not restored");
        log_collaborator_error(e);
    }

    let unused_tokens = plan.token_amount.saturating_sub(receipt.token_amount);
    if unused_tokens > 0 {
        match env.token.transfer(&campaign.id, &campaign.supplier, unused_tokens) {
            Ok(()) => {
                pinocchio_log::log!("Returned {} unused tokens", unused_tokens);
            }
            Err(e) => {
                msg!("Error: Unused tokens not returned");
                log_collaborator_error(e);
            }
        }
    }

    let unused_native = plan.native.saturating_sub(receipt.native_amount);
    let refund = unused_native.min(plan.seed);
    if refund == 0 {
        return unused_native;
    }
    match env.bank.transfer(&campaign.id, &ctx.caller, refund) {
        Ok(()) => unused_native - refund,
        Err(e) => {
            msg!("Error: Unused seed not refunded");
            log_collaborator_error(e);
            unused_native
        }
    }
}

fn log_collaborator_error(e: CollaboratorError) {
    match e {
        CollaboratorError::InsufficientBalance => msg!("Cause: insufficient balance"),
        CollaboratorError::InsufficientAllowance => msg!("Cause: insufficient allowance"),
        CollaboratorError::NotOwner => msg!("Cause: not owner"),
        CollaboratorError::Frozen => msg!("Cause: account frozen"),
        CollaboratorError::Paused => msg!("Cause: venue paused"),
        CollaboratorError::Rejected => msg!("Cause: rejected"),
    }
}

#[cfg(test)]
#[path = "launch_test.rs"]
mod launch_test;
