use clap::Parser;
use gwiz_presale::application::coordinator::PurchaseCoordinator;
use gwiz_presale::config::SaleConfig;
use gwiz_presale::domain::ports::InvestApiBox;
use gwiz_presale::domain::purchase::{PurchaseOutcome, PurchaseState};
use gwiz_presale::domain::rate::RateConverter;
use gwiz_presale::infrastructure::http::HttpInvestApi;
use gwiz_presale::infrastructure::in_memory::{MemoryAlerts, RecordingInvestApi, SimulatedWallet};
use gwiz_presale::interfaces::amounts::AmountPair;
use miette::{IntoDiagnostic, Result};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Buy $GWIZ with BNB from the command line", long_about = None)]
struct Cli {
    /// Sell amount in BNB
    amount: String,

    /// Sale configuration JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Backend base URL. When omitted the purchase is recorded locally (dry run).
    #[arg(long)]
    backend_url: Option<String>,

    /// Address reported by the simulated wallet.
    #[arg(long, default_value = "0x00000000000000000000000000000000000000aa")]
    payer: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gwiz_presale=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SaleConfig::load(path).into_diagnostic()?,
        None => SaleConfig::default(),
    };

    let converter = RateConverter::new(config.rate).into_diagnostic()?;
    let mut amounts = AmountPair::new(converter);
    if !amounts.set_sell(&cli.amount) {
        miette::bail!(
            "invalid amount {:?}: expected digits with at most one decimal point",
            cli.amount
        );
    }
    println!("selling {} BNB for {} $GWIZ", amounts.sell(), amounts.buy());

    let wallet = SimulatedWallet::connected(&cli.payer);
    let recorder = RecordingInvestApi::new();
    let invest: InvestApiBox = match &cli.backend_url {
        Some(url) => Box::new(HttpInvestApi::new(url)),
        None => Box::new(recorder.clone()),
    };
    let alerts = MemoryAlerts::new();
    let coordinator = PurchaseCoordinator::new(
        Box::new(wallet),
        invest,
        Box::new(alerts.clone()),
        &config,
    );

    let state = coordinator.submit(&cli.amount).await;
    for (color, message) in alerts.alerts().await {
        println!("[{color}] {message}");
    }

    match state {
        PurchaseState::Done(PurchaseOutcome::Success) => {
            for record in recorder.records().await {
                println!(
                    "recorded investment: investor={} tokenId={} amount={}",
                    record.payer, record.token_id, record.sell_amount
                );
            }
            Ok(())
        }
        PurchaseState::Done(PurchaseOutcome::Failure(reason)) => {
            miette::bail!("purchase confirmed on-chain but not recorded: {reason}")
        }
        _ => miette::bail!("purchase was not submitted; check the amount and wallet connection"),
    }
}
