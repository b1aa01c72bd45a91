//! Campaign - the single aggregate every operation runs against

use firstbuy_common::{CallContext, Env, Lamports, LaunchError, Pubkey, TokenAmount, DEFAULT_MAX_CONTRIBUTION};

use crate::state::{ContributionLedger, LaunchRecord};

/// Tunables set at creation and changeable by the operator until launch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CampaignParams {
    pub max_contribution: Lamports,
    pub reserved_for_contributors: TokenAmount,
    pub is_open: bool,
    pub allowlist: Option<Pubkey>,
}

impl Default for CampaignParams {
    fn default() -> Self {
        Self {
            max_contribution: DEFAULT_MAX_CONTRIBUTION,
            reserved_for_contributors: 0,
            is_open: true,
            allowlist: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Campaign {
    /// Campaign address; holds the escrow and the reserved tokens
    pub id: Pubkey,
    /// Privileged caller
    pub operator: Pubkey,
    /// AMM router the launch seeds liquidity through
    pub router: Pubkey,
    /// Launch token, unset until configured
    pub token: Option<Pubkey>,
    /// Account the launch pulls tokens from
    pub supplier: Pubkey,
    pub allowlist: Option<Pubkey>,
    pub max_contribution: Lamports,
    pub reserved_for_contributors: TokenAmount,
    pub is_open: bool,
    pub ledger: ContributionLedger,
    /// Set exactly once, by a successful launch
    pub launch: Option<LaunchRecord>,
}

impl Campaign {
    pub fn new(id: Pubkey, operator: Pubkey, router: Pubkey) -> Self {
        Self::with_params(id, operator, router, CampaignParams::default())
    }

    pub fn with_params(id: Pubkey, operator: Pubkey, router: Pubkey, params: CampaignParams) -> Self {
        Self {
            id,
            operator,
            router,
            token: None,
            supplier: operator,
            allowlist: params.allowlist,
            max_contribution: params.max_contribution,
            reserved_for_contributors: params.reserved_for_contributors,
            is_open: params.is_open,
            ledger: ContributionLedger::new(),
            launch: None,
        }
    }

    pub fn is_launched(&self) -> bool {
        self.launch.is_some()
    }

    pub fn params(&self) -> CampaignParams {
        CampaignParams {
            max_contribution: self.max_contribution,
            reserved_for_contributors: self.reserved_for_contributors,
            is_open: self.is_open,
            allowlist: self.allowlist,
        }
    }

    pub fn require_operator(&self, ctx: &CallContext) -> Result<(), LaunchError> {
        if ctx.caller != self.operator {
            return Err(LaunchError::Unauthorized);
        }
        Ok(())
    }

    pub fn require_not_launched(&self) -> Result<(), LaunchError> {
        if self.is_launched() {
            return Err(LaunchError::AlreadyLaunched);
        }
        Ok(())
    }

    /// Configured token, checked against the one supplied for this call
    pub fn checked_token(&self, env: &Env<'_>) -> Result<Pubkey, LaunchError> {
        let token = self.token.ok_or(LaunchError::NotConfigured)?;
        if env.token.key() != token {
            return Err(LaunchError::InvalidCollaborator);
        }
        Ok(token)
    }

    pub fn check_router(&self, env: &Env<'_>) -> Result<(), LaunchError> {
        if env.router.key() != self.router {
            return Err(LaunchError::InvalidCollaborator);
        }
        Ok(())
    }

    /// Membership of `who` when an allowlist is configured
    pub fn check_allowlist(&self, env: &Env<'_>, who: &Pubkey) -> Result<(), LaunchError> {
        let Some(list) = self.allowlist else {
            return Ok(());
        };
        if env.allowlist.key() != list {
            return Err(LaunchError::InvalidCollaborator);
        }
        if !env.allowlist.is_member(who) {
            return Err(LaunchError::NotAllowlisted);
        }
        Ok(())
    }
}
