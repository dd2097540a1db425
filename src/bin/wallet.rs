//! YP Bank Wallet - CLI front-end for the wallet overview.

use clap::Parser;
use std::io::{self, Write};
use ypbank_wallet::config::{FailureRates, LatencyConfig};
use ypbank_wallet::csv_format::TransactionCsv;
use ypbank_wallet::provider::{DataProvider, FixtureProvider, RandomProvider, Resource};
use ypbank_wallet::{
    Config, DebitCredit, OutputFormat, ProviderKind, Result, TransactionRecord, UserProfile, Wallet,
    WalletBoard,
};

#[derive(Parser)]
#[command(name = "ypbank_wallet")]
#[command(about = "Show wallet balances and recent transactions", long_about = None)]
struct Cli {
    /// Data provider (fixture, random)
    #[arg(short, long, default_value = "fixture")]
    provider: String,

    /// Seed for the random provider
    #[arg(long)]
    seed: Option<u64>,

    /// Skip simulated latency and failures
    #[arg(long)]
    no_latency: bool,

    /// Hide the balance of this wallet id (repeatable)
    #[arg(long)]
    hide: Vec<u32>,

    /// Only show transactions whose title contains this text
    #[arg(short, long)]
    search: Option<String>,

    /// Only show debit or credit transactions (debit, credit)
    #[arg(short, long)]
    direction: Option<String>,

    /// Transaction output format (table, csv)
    #[arg(long, default_value = "table")]
    format: String,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<String>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::from_path(path)?,
        None => Config::default(),
    };
    let kind = cli.provider.parse::<ProviderKind>()?;
    let format = cli.format.parse::<OutputFormat>()?;
    let direction = cli
        .direction
        .as_deref()
        .map(str::parse::<DebitCredit>)
        .transpose()?;

    let mut provider: Box<dyn DataProvider> = match kind {
        ProviderKind::Fixture => Box::new(FixtureProvider::new()),
        ProviderKind::Random => {
            let mut random = match cli.seed {
                Some(seed) => RandomProvider::seeded(&config, seed)?,
                None => RandomProvider::new(&config)?,
            };
            if cli.no_latency {
                random = random
                    .with_latency(LatencyConfig::none())
                    .with_failure_rate(FailureRates::none());
            }
            Box::new(random)
        }
    };

    let mut profile: Resource<UserProfile> = Resource::new();
    let mut wallets: Resource<Vec<Wallet>> = Resource::new();
    let mut transactions: Resource<Vec<TransactionRecord>> = Resource::new();

    // Failures are recorded on the resource and reported after the table
    profile.resolve(provider.user_profile().map(|r| r.data)).ok();
    wallets.resolve(provider.wallets().map(|r| r.data)).ok();
    transactions.resolve(provider.transactions().map(|r| r.data)).ok();

    let mut board = WalletBoard::new(
        wallets.get_or(&Vec::new()).clone(),
        transactions.get_or(&Vec::new()).clone(),
    )
    .with_mask(config.mask_glyph, config.mask_min_width);
    for id in &cli.hide {
        if board.toggle_visibility(*id).is_none() {
            log::warn!("No wallet with id {}", id);
        }
    }
    if let Some(query) = cli.search {
        board.set_search(query);
    }
    board.set_direction_filter(direction);

    let mut stdout = io::stdout();
    match format {
        OutputFormat::Table => {
            print_table(&mut stdout, profile.value(), &board)?;
            for error in [profile.error(), wallets.error(), transactions.error()]
                .into_iter()
                .flatten()
            {
                writeln!(stdout, "! {}", error)?;
            }
        }
        OutputFormat::Csv => {
            let csv = TransactionCsv {
                transactions: board.filtered_transactions().into_iter().cloned().collect(),
            };
            csv.write_to(&mut stdout)?;
        }
    }

    Ok(())
}

fn print_table<W: Write>(
    writer: &mut W,
    profile: Option<&UserProfile>,
    board: &WalletBoard,
) -> Result<()> {
    match profile {
        Some(profile) => writeln!(
            writer,
            "{} ({})",
            profile.full_name, profile.account_number
        )?,
        None => writeln!(writer, "Profile unavailable")?,
    }
    writeln!(writer)?;

    for wallet in board.wallets() {
        let balance = board.balance_text(wallet.id).unwrap_or_default();
        writeln!(writer, "[{}] {:<12} {:>18}", wallet.id, wallet.title, balance)?;
        writeln!(writer, "    {}", wallet.conversion)?;
    }
    writeln!(writer)?;

    writeln!(writer, "Recent transactions")?;
    let transactions = board.filtered_transactions();
    if transactions.is_empty() {
        writeln!(writer, "  (none)")?;
    }
    for tx in transactions {
        writeln!(
            writer,
            "  {:<12} {:<55} {:>10}",
            tx.display_date(),
            tx.title,
            tx.amount
        )?;
    }
    Ok(())
}
