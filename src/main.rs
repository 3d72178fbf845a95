//! raft-agent: natural-language order search.
//!
//! Usage:
//!     raft-agent "orders from Ohio over $500"

use std::io::Write;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use raft_agent_lib::config::{
    self, CompletionSettings, OrderSourceSettings, DEFAULT_FETCH_TIMEOUT_SECS,
};
use raft_agent_lib::models::OrdersDocument;
use raft_agent_lib::pipeline::build_pipeline;

#[derive(Parser, Debug)]
#[command(name = "raft-agent", version, about = "Find orders matching a natural-language query")]
struct Args {
    /// Natural-language query, e.g. "orders from Ohio over $500"
    query: String,

    /// Order listing endpoint
    #[arg(long, env = "RAFT_ORDERS_URL", default_value = config::DEFAULT_ORDERS_URL)]
    orders_url: String,

    /// Timeout for the order listing request, in seconds
    #[arg(long, env = "RAFT_FETCH_TIMEOUT_SECS", default_value_t = DEFAULT_FETCH_TIMEOUT_SECS)]
    fetch_timeout_secs: u64,

    /// Debug-level logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    // A missing .env is fine; the process environment still applies.
    dotenv::dotenv().ok();

    let args = Args::parse();
    raft_agent_lib::init_tracing(args.verbose);

    let completion = CompletionSettings::from_env();
    let orders = OrderSourceSettings {
        url: args.orders_url,
        timeout: Duration::from_secs(args.fetch_timeout_secs),
    };

    let pipeline = build_pipeline(&completion, &orders).context("Failed to set up order pipeline")?;
    let (state, report) = pipeline.run_with_report(&args.query);

    tracing::info!(
        run_id = %report.run_id,
        chunks = report.chunks_total,
        chunks_rejected = report.chunks_rejected,
        candidates = report.candidates_extracted,
        kept = report.orders_kept,
        dropped = report.dropped.total(),
        "Run summary"
    );

    let document = OrdersDocument {
        orders: state.final_orders(),
    };
    let json = serde_json::to_string_pretty(&document).context("Failed to serialize orders")?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{json}").context("Failed to write orders to stdout")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Args::command().debug_assert();
    }

    #[test]
    fn query_is_required() {
        let err = Args::try_parse_from(["raft-agent"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn parses_query_and_overrides() {
        let args = Args::try_parse_from([
            "raft-agent",
            "orders from Ohio over $500",
            "--orders-url",
            "http://localhost:9000/orders",
            "--fetch-timeout-secs",
            "2",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.query, "orders from Ohio over $500");
        assert_eq!(args.orders_url, "http://localhost:9000/orders");
        assert_eq!(args.fetch_timeout_secs, 2);
        assert!(args.verbose);
    }
}
