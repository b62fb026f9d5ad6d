use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use seacharge::application::storefront::{Session, Storefront};
use seacharge::application::support::SupportAssistant;
use seacharge::config::Config;
use seacharge::domain::catalog::{Catalog, ServiceCategory};
use seacharge::domain::ports::{AssistantBackendBox, PaymentGatewayRef, TransactionHistoryBox};
use seacharge::domain::transaction::PayerType;
use seacharge::infrastructure::gemini::GeminiClient;
use seacharge::infrastructure::in_memory::InMemoryTransactionHistory;
use seacharge::infrastructure::simulated_gateway::SimulatedPaymentGateway;
use seacharge::interfaces::csv::event_reader::SessionEventReader;
use seacharge::interfaces::csv::report_writer::ReportWriter;
use seacharge::interfaces::csv::transaction_writer::TransactionWriter;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Simulated payment processing time in milliseconds
    #[arg(long, global = true)]
    payment_delay_ms: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a session script (`action,value` CSV) and print the completed transactions
    Run {
        script: PathBuf,

        /// Payer type the session starts with
        #[arg(long, default_value = "consumer")]
        payer: PayerType,
    },
    /// List plans with their provider
    Catalog {
        #[arg(long)]
        category: Option<ServiceCategory>,
    },
    /// Ask the support assistant a single question
    Ask { message: String },
    /// Print account metrics followed by the transaction history
    Dashboard {
        #[arg(long)]
        admin: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(ms) = cli.payment_delay_ms {
        config.payment_delay = Duration::from_millis(ms);
    }

    let storefront = build_storefront(&config).into_diagnostic()?;
    let stdout = io::stdout();

    match cli.command {
        Command::Run { script, payer } => {
            let file = File::open(script).into_diagnostic()?;
            let reader = SessionEventReader::new(file);
            let mut session = Session::new(payer);

            for event_result in reader.events() {
                match event_result {
                    Ok(event) => {
                        if let Err(e) = storefront.handle(&mut session, event).await {
                            warn!(error = %e, "Error processing event");
                        }
                    }
                    Err(e) => {
                        warn!(error = %e, "Error reading event");
                    }
                }
            }
            info!(
                completed = session.completed.len(),
                cart = session.cart.len(),
                "session finished"
            );

            let mut writer = TransactionWriter::new(stdout.lock());
            writer
                .write_transactions(&session.completed)
                .into_diagnostic()?;
        }
        Command::Catalog { category } => {
            let mut writer = ReportWriter::new(stdout.lock());
            writer
                .write_catalog(storefront.catalog(), category)
                .into_diagnostic()?;
        }
        Command::Ask { message } => {
            let mut session = Session::default();
            if let Some(reply) = storefront.ask(&mut session, &message).await {
                writeln!(stdout.lock(), "{}", reply.text()).into_diagnostic()?;
            }
        }
        Command::Dashboard { admin } => {
            let report = storefront.dashboard(admin).await.into_diagnostic()?;
            let mut out = stdout.lock();
            ReportWriter::new(&mut out)
                .write_dashboard(&report)
                .into_diagnostic()?;
            TransactionWriter::new(&mut out)
                .write_transactions(&report.recent)
                .into_diagnostic()?;
        }
    }

    Ok(())
}

fn build_storefront(config: &Config) -> seacharge::error::Result<Storefront> {
    let catalog = Catalog::seeded();

    let backend: Option<AssistantBackendBox> = match &config.gemini_api_key {
        Some(key) => Some(Box::new(GeminiClient::new(
            &config.gemini_base_url,
            &config.gemini_model,
            key,
            config.request_timeout,
        )?)),
        None => {
            info!("no Gemini API key configured; support assistant is offline");
            None
        }
    };
    let assistant = SupportAssistant::new(backend, &catalog)?;

    let gateway: PaymentGatewayRef = Arc::new(SimulatedPaymentGateway::new(config.payment_delay));
    let history: TransactionHistoryBox = Box::new(InMemoryTransactionHistory::seeded(&catalog)?);

    Ok(Storefront::new(catalog, gateway, history, assistant))
}
