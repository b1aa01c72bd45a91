//! JSON report of a replayed session

use anyhow::{Context, Result};
use firstbuy_common::{LaunchToken, Lamports, TokenAmount};
use serde::Serialize;

use crate::config::encode_address;
use crate::session::{Outcome, Rehearsal};

#[derive(Debug, Serialize)]
pub struct Report {
    pub launched: bool,
    pub is_open: bool,
    pub total_contributed: Lamports,
    pub escrow: Lamports,
    pub contributor_count: usize,
    pub tokens_distributed: TokenAmount,
    pub tokens_swept: TokenAmount,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch: Option<LaunchSummary>,
    pub contributors: Vec<ContributorReport>,
    pub outcomes: Vec<Outcome>,
}

#[derive(Debug, Serialize)]
pub struct LaunchSummary {
    pub pool: String,
    pub lp_tokens: u64,
    pub tokens_to_liquidity: TokenAmount,
    pub native_to_liquidity: Lamports,
    pub operator_seed: Lamports,
    pub tokens_reserved: TokenAmount,
    pub contributions_snapshot: Lamports,
    pub launched_at: i64,
    /// Native per token in the new pool, scaled by 1e6
    pub spot_price: u64,
    /// Tokens a cap-sized buy would get from the new pool, after fees
    pub cap_buy_quote: TokenAmount,
}

#[derive(Debug, Serialize)]
pub struct ContributorReport {
    pub name: String,
    pub address: String,
    pub contributed: Lamports,
    pub withdrawn: bool,
    pub pending_payout: TokenAmount,
    pub token_balance: TokenAmount,
}

impl Report {
    pub fn build(r: &Rehearsal, outcomes: Vec<Outcome>) -> Self {
        let campaign = &r.campaign;

        let launch = campaign.launch_record().map(|record| {
            let pool = r.harness.router.pool(&r.harness.token.key());
            let spot_price = pool.map(|p| p.spot_price()).unwrap_or(0);
            let cap_buy_quote = pool
                .and_then(|p| p.quote_buy(campaign.max_contribution).ok())
                .unwrap_or(0);
            LaunchSummary {
                pool: encode_address(&record.receipt.pool),
                lp_tokens: record.receipt.lp_tokens,
                tokens_to_liquidity: record.tokens_to_liquidity,
                native_to_liquidity: record.native_to_liquidity,
                operator_seed: record.operator_seed,
                tokens_reserved: record.tokens_reserved,
                contributions_snapshot: record.contributions_snapshot,
                launched_at: record.launched_at,
                spot_price,
                cap_buy_quote,
            }
        });

        let mut contributors: Vec<ContributorReport> = r
            .names
            .iter()
            .filter_map(|(name, who)| {
                let record = campaign.ledger.record(who)?;
                Some(ContributorReport {
                    name: name.clone(),
                    address: encode_address(who),
                    contributed: record.amount,
                    withdrawn: record.withdrawn,
                    pending_payout: campaign.pending_payout(who),
                    token_balance: r.harness.token.balance_of(who),
                })
            })
            .collect();
        contributors.sort_by(|a, b| a.name.cmp(&b.name));

        Self {
            launched: campaign.is_liquidity_added(),
            is_open: campaign.is_open,
            total_contributed: campaign.total_contributed(),
            escrow: campaign.ledger.escrow,
            contributor_count: campaign.contributor_count(),
            tokens_distributed: campaign.ledger.tokens_distributed,
            tokens_swept: campaign.ledger.tokens_swept,
            launch,
            contributors,
            outcomes,
        }
    }

    pub fn write(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize report")?;
        std::fs::write(path, json)
            .context(format!("Failed to write report to {}", path))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::default_session;
    use firstbuy_common::LAMPORTS_PER_SOL;

    #[test]
    fn test_report_after_default_session() {
        let config = Config::default_devnet();
        let mut r = Rehearsal::from_config(&config).unwrap();
        let calls = default_session(&config, LAMPORTS_PER_SOL / 10, 1_000_000);
        let outcomes = r.run(&calls, true).unwrap();

        let report = Report::build(&r, outcomes);
        assert!(report.launched);
        assert_eq!(report.contributor_count, 3);
        assert_eq!(report.contributors[0].name, "alice");
        assert_eq!(report.contributors[0].token_balance, 333_333);
        assert_eq!(report.contributors[0].pending_payout, 0);

        let launch = report.launch.as_ref().unwrap();
        assert_eq!(launch.native_to_liquidity, 300_000_000);
        // 0.3 SOL against 1,000,000 tokens
        assert_eq!(launch.spot_price, 300 * 1_000_000);
        // A 0.5 SOL buy takes well over half the pool but never all of it
        assert!(launch.cap_buy_quote > 500_000);
        assert!(launch.cap_buy_quote < 1_000_000);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["outcomes"].as_array().unwrap().len(), 7);
        assert!(json["outcomes"][0].get("error").is_none());
    }
}
