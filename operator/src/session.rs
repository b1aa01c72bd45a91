//! Session replay against an in-memory campaign
//!
//! A session is a JSON list of calls. Each call names its caller (a
//! participant name, `operator`, or a base58 address), the lamports attached
//! and the action. Calls go through the same dispatcher a host would use.

use std::collections::HashMap;

use firstbuy_amm::ConstantProductRouter;
use firstbuy_common::*;
use firstbuy_launchpad::{process_instruction, Campaign, CampaignParams};
use firstbuy_sim::{key, Harness, ALLOWLIST_KEY, ROUTER_KEY, TOKEN_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{parse_address, Config};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("unknown caller: {0}")]
    UnknownCaller(String),

    #[error("invalid address in session: {0}")]
    InvalidAddress(String),

    #[error("step {step} ({action}) failed: {error}")]
    Rejected {
        step: usize,
        action: &'static str,
        error: LaunchError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Contribute,
    SetTokenAddress,
    SetAllowlist { enabled: bool },
    SetMaxContribution { amount: Lamports },
    SetReservedTokens { amount: TokenAmount },
    SetIsOpen { open: bool },
    LaunchToken { token_amount: TokenAmount },
    WithdrawTokens,
    EmergencyWithdraw,
    TransferOperator { to: String },
    ReleaseTokenOwnership { to: String },
    SweepUnclaimed,
    /// Host-side fault injection: pause or resume the router
    PauseRouter { paused: bool },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::Contribute => "contribute",
            Action::SetTokenAddress => "set_token_address",
            Action::SetAllowlist { .. } => "set_allowlist",
            Action::SetMaxContribution { .. } => "set_max_contribution",
            Action::SetReservedTokens { .. } => "set_reserved_tokens",
            Action::SetIsOpen { .. } => "set_is_open",
            Action::LaunchToken { .. } => "launch_token",
            Action::WithdrawTokens => "withdraw_tokens",
            Action::EmergencyWithdraw => "emergency_withdraw",
            Action::TransferOperator { .. } => "transfer_operator",
            Action::ReleaseTokenOwnership { .. } => "release_token_ownership",
            Action::SweepUnclaimed => "sweep_unclaimed",
            Action::PauseRouter { .. } => "pause_router",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub caller: String,
    #[serde(default)]
    pub value: Lamports,
    #[serde(flatten)]
    pub action: Action,
}

/// Result of one replayed call
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    pub step: usize,
    pub caller: String,
    pub action: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip)]
    pub rejection: Option<LaunchError>,
}

/// Campaign plus collaborators, seeded from a config
pub struct Rehearsal {
    pub campaign: Campaign,
    pub harness: Harness,
    pub names: HashMap<String, Pubkey>,
}

impl Rehearsal {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let operator = parse_address(&config.operator)?;
        let id = parse_address(&config.campaign)?;

        let params = CampaignParams {
            max_contribution: config.params.max_contribution,
            reserved_for_contributors: config.params.reserved_tokens,
            is_open: config.params.is_open,
            allowlist: config.params.use_allowlist.then(|| key(ALLOWLIST_KEY)),
        };
        let mut campaign = Campaign::with_params(id, operator, key(ROUTER_KEY), params);

        let mut harness = Harness::new(id, config.token.supply);
        harness.router = ConstantProductRouter::with_fee(key(ROUTER_KEY), config.router.fee_bps);
        harness
            .token
            .approve(&harness.supplier, &id, config.token.supply)
            .map_err(|e| anyhow::anyhow!("supplier approval failed: {}", e))?;
        harness.bank.fund(&operator, config.operator_lamports);
        campaign.token = Some(key(TOKEN_KEY));
        campaign.supplier = harness.supplier;

        let mut names = HashMap::new();
        names.insert("operator".to_string(), operator);
        for p in &config.participants {
            let who = parse_address(&p.address)?;
            harness.bank.fund(&who, p.lamports);
            if p.allowlisted {
                harness.allowlist.add(&who);
            }
            names.insert(p.name.clone(), who);
        }

        Ok(Self { campaign, harness, names })
    }

    /// Participant name, `operator`, or a base58 address
    pub fn resolve(&self, who: &str) -> Result<Pubkey, SessionError> {
        if let Some(k) = self.names.get(who) {
            return Ok(*k);
        }
        match parse_address(who) {
            Ok(k) => Ok(k),
            Err(_) => Err(SessionError::UnknownCaller(who.to_string())),
        }
    }

    fn address(&self, who: &str) -> Result<Pubkey, SessionError> {
        self.resolve(who)
            .map_err(|_| SessionError::InvalidAddress(who.to_string()))
    }

    fn instruction(&self, action: &Action) -> Result<Option<LaunchInstruction>, SessionError> {
        let ix = match action {
            Action::Contribute => LaunchInstruction::Contribute,
            Action::SetTokenAddress => LaunchInstruction::SetTokenAddress {
                token: key(TOKEN_KEY),
                supplier: self.harness.supplier,
            },
            Action::SetAllowlist { enabled } => LaunchInstruction::SetAllowlist {
                allowlist: enabled.then(|| key(ALLOWLIST_KEY)),
            },
            Action::SetMaxContribution { amount } => LaunchInstruction::SetMaxContribution { amount: *amount },
            Action::SetReservedTokens { amount } => LaunchInstruction::SetReservedTokens { amount: *amount },
            Action::SetIsOpen { open } => LaunchInstruction::SetIsOpen { open: *open },
            Action::LaunchToken { token_amount } => LaunchInstruction::LaunchToken { token_amount: *token_amount },
            Action::WithdrawTokens => LaunchInstruction::WithdrawTokens,
            Action::EmergencyWithdraw => LaunchInstruction::EmergencyWithdraw,
            Action::TransferOperator { to } => LaunchInstruction::TransferOperator { new_operator: self.address(to)? },
            Action::ReleaseTokenOwnership { to } => {
                LaunchInstruction::ReleaseTokenOwnership { new_owner: self.address(to)? }
            }
            Action::SweepUnclaimed => LaunchInstruction::SweepUnclaimed,
            Action::PauseRouter { .. } => return Ok(None),
        };
        Ok(Some(ix))
    }

    /// Replay one call; `Err` only for calls that could not be formed
    pub fn apply(&mut self, step: usize, call: &Call) -> Result<Outcome, SessionError> {
        let caller = self.resolve(&call.caller)?;
        let action = call.action.name();

        let result = match self.instruction(&call.action)? {
            Some(ix) => {
                let data = ix.pack();
                let ctx = CallContext::with_value(caller, call.value);
                let mut env = self.harness.env();
                process_instruction(&mut self.campaign, &mut env, &ctx, &data)
                    .map_err(|e| LaunchError::from_program_error(&e).unwrap_or(LaunchError::InvalidInstruction))
            }
            None => {
                if let Action::PauseRouter { paused } = call.action {
                    self.harness.router.set_paused(paused);
                }
                Ok(())
            }
        };

        match &result {
            Ok(()) => log::info!("step {}: {} by {} ok", step, action, call.caller),
            Err(e) => log::warn!("step {}: {} by {} rejected: {}", step, action, call.caller, e),
        }

        Ok(Outcome {
            step,
            caller: call.caller.clone(),
            action,
            ok: result.is_ok(),
            error: result.err().map(|e| e.to_string()),
            rejection: result.err(),
        })
    }

    /// Replay every call; with `strict` the first rejection aborts the run
    pub fn run(&mut self, calls: &[Call], strict: bool) -> Result<Vec<Outcome>, SessionError> {
        let mut outcomes = Vec::with_capacity(calls.len());
        for (step, call) in calls.iter().enumerate() {
            let outcome = self.apply(step, call)?;
            if let (true, Some(error)) = (strict, outcome.rejection) {
                return Err(SessionError::Rejected { step, action: outcome.action, error });
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

/// Contribute from every participant, launch, then withdraw for each
pub fn default_session(config: &Config, contribution: Lamports, token_amount: TokenAmount) -> Vec<Call> {
    let mut calls = Vec::new();
    for p in &config.participants {
        calls.push(Call { caller: p.name.clone(), value: contribution, action: Action::Contribute });
    }
    calls.push(Call {
        caller: "operator".to_string(),
        value: 0,
        action: Action::LaunchToken { token_amount },
    });
    for p in &config.participants {
        calls.push(Call { caller: p.name.clone(), value: 0, action: Action::WithdrawTokens });
    }
    calls
}

pub fn load_session(path: &str) -> anyhow::Result<Vec<Call>> {
    use anyhow::Context;
    let text = std::fs::read_to_string(path)
        .context(format!("Failed to read session file: {}", path))?;
    let calls: Vec<Call> = serde_json::from_str(&text)
        .context("Failed to parse session JSON")?;
    Ok(calls)
}
