use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use shopify_payouts::orchestration::export_payouts_for_date;
use shopify_payouts::{
    AppError, Config, PayoutDate, PayoutFetcher, PayoutsSource, ShopifyDataSource,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(
    name = "shopify-payouts",
    version,
    about = "Export Shopify Payments payout transactions to CSV"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Export one day's payout transactions to shopify_payouts_<date>.csv (default)
    Export(ExportArgs),

    /// Look up an order by its global ID and print it as JSON
    Order {
        /// Order GID, e.g. gid://shopify/Order/123
        id: String,
    },
}

#[derive(Args, Debug)]
struct ExportArgs {
    /// Payout date (YYYY-MM-DD); defaults to yesterday in local time
    #[arg(long)]
    date: Option<PayoutDate>,

    /// Directory the CSV is written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,
}

impl Cli {
    /// Subcommand to run; a bare invocation exports yesterday's payouts.
    fn command(self) -> Commands {
        self.cmd
            .unwrap_or_else(|| Commands::Export(ExportArgs::default()))
    }
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            date: None,
            output_dir: PathBuf::from("."),
        }
    }
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env().map_err(AppError::from)?;
    let source = Arc::new(ShopifyDataSource::from_config(&config));
    tracing::debug!("Using GraphQL endpoint {}", source.graphql_url());

    match cli.command() {
        Commands::Export(args) => {
            let date = args.date.unwrap_or_else(PayoutDate::yesterday);
            let fetcher = PayoutFetcher::with_page_size(source, config.page_size);
            let path = export_payouts_for_date(&fetcher, date, &args.output_dir)
                .await
                .with_context(|| format!("exporting payouts for {}", date))?;
            println!("{}", path.display());
        }
        Commands::Order { id } => {
            let order = source
                .fetch_order(&id)
                .await
                .map_err(AppError::from)
                .with_context(|| format!("looking up order {}", id))?
                .ok_or_else(|| anyhow::anyhow!("order not found: {}", id))?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        }
    }

    Ok(())
}
