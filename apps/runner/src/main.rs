//! Admin Reports table runner.

#![forbid(unsafe_code)]

mod json_lines_sink;
mod runner_command;

use std::env;
use std::io::{self, BufWriter};
use std::sync::Arc;

use adminreports_application::{QueryContext, ReportTableService};
use adminreports_core::{AppError, AppResult};
use adminreports_domain::Qualifier;
use adminreports_infrastructure::{AdminReportsConfig, HttpAdminReportsClient};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::json_lines_sink::{JsonLinesSink, write_table_catalog};
use crate::runner_command::{ROW_LIMIT_ENV, RunnerCommand, parse_row_limit};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    match RunnerCommand::parse(env::args().skip(1))? {
        RunnerCommand::Tables => {
            write_table_catalog(&mut BufWriter::new(io::stdout()), ReportTableService::tables())
        }
        RunnerCommand::Query { table, qualifiers } => run_query(table.as_str(), &qualifiers).await,
    }
}

async fn run_query(table: &str, qualifiers: &[Qualifier]) -> AppResult<()> {
    let config = AdminReportsConfig::from_env()?;
    let row_limit = parse_row_limit(env::var(ROW_LIMIT_ENV).ok())?;

    let client = HttpAdminReportsClient::from_config(&config)?;
    let mut service = ReportTableService::new(Arc::new(client));
    if let Some(customer_id) = config.default_customer_id.as_deref() {
        service = service.with_default_customer_id(customer_id);
    }

    let cancellation = CancellationToken::new();
    let mut context = QueryContext::new().with_cancellation(cancellation.clone());
    if let Some(limit) = row_limit {
        context = context.with_limit(limit);
    }
    cancel_on_ctrl_c(cancellation.clone());

    info!(
        table,
        qualifiers = qualifiers.len(),
        row_limit = ?row_limit,
        base_url = %config.base_url,
        "running report query"
    );

    let mut sink = JsonLinesSink::new(BufWriter::new(io::stdout()), row_limit, cancellation);
    let result = service.execute(table, qualifiers, &context, &mut sink).await;
    sink.complete(result).map(|_| ())
}

fn cancel_on_ctrl_c(cancellation: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("interrupt received, cancelling report query");
            cancellation.cancel();
        }
    });
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}
