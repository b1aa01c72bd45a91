//! FirstBuy launch rehearsal
//!
//! Off-chain tool that replays a session of launchpad calls against
//! in-memory collaborators and writes a JSON report, so an operator can
//! check caps, the launch split and every payout before going live.
//!
//! Usage:
//!   firstbuy-operator                  replay `$FIRSTBUY_CONFIG`'s session
//!   firstbuy-operator --strict         stop at the first rejected call
//!   firstbuy-operator init <path>      write a default config

mod config;
mod report;
mod session;

use anyhow::{Context, Result};
use config::Config;
use firstbuy_common::LAMPORTS_PER_SOL;
use report::Report;
use session::{default_session, load_session, Rehearsal};

/// Contribution and launch size for the built-in session
const DEFAULT_CONTRIBUTION: u64 = LAMPORTS_PER_SOL / 10;
const DEFAULT_LAUNCH_TOKENS: u64 = 1_000_000;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.first().map(String::as_str) == Some("init") {
        let path = args.get(1).map(String::as_str).unwrap_or("firstbuy-config.toml");
        return Config::write_default(path);
    }
    let strict = args.iter().any(|a| a == "--strict");

    log::info!("Starting FirstBuy launch rehearsal");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({:#}), using default devnet config", e);
        Config::default_devnet()
    });

    log::info!("Operator: {}", config.operator);
    log::info!("Campaign: {}", config.campaign);
    log::info!("Participants: {}", config.participants.len());

    let mut rehearsal = Rehearsal::from_config(&config).context("Failed to seed campaign")?;

    let session_path = config.session_path();
    let calls = if std::path::Path::new(&session_path).exists() {
        load_session(&session_path)?
    } else {
        log::info!("No session at {}, replaying the default session", session_path);
        default_session(&config, DEFAULT_CONTRIBUTION, DEFAULT_LAUNCH_TOKENS)
    };

    let outcomes = rehearsal.run(&calls, strict)?;
    let rejected = outcomes.iter().filter(|o| !o.ok).count();

    let report = Report::build(&rehearsal, outcomes);
    let report_path = config.report_path();
    report.write(&report_path)?;

    log::info!(
        "Replayed {} calls ({} rejected); launched: {}; report written to {}",
        calls.len(),
        rejected,
        report.launched,
        report_path
    );
    if let Some(launch) = &report.launch {
        log::info!(
            "Pool {} seeded with {} tokens and {} lamports ({} LP)",
            launch.pool,
            launch.tokens_to_liquidity,
            launch.native_to_liquidity,
            launch.lp_tokens
        );
    }

    Ok(())
}
