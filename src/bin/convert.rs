//! YP Bank Convert - CLI front-end for the currency conversion screen.

use clap::Parser;
use std::io::{self, BufRead, Write};
use ypbank_wallet::{Config, ConversionSession, Currency, Result, SessionAction, SessionView};

#[derive(Parser)]
#[command(name = "ypbank_convert")]
#[command(about = "Convert an amount between the wallet currencies", long_about = None)]
struct Cli {
    /// Amount field content; repeat to replay several edits (reads stdin if omitted)
    #[arg(short, long)]
    amount: Vec<String>,

    /// Input currency (CAD, NGN)
    #[arg(short, long)]
    from: Option<String>,

    /// Exchange rate: units of quote currency per 1 base currency
    #[arg(short, long)]
    rate: Option<f64>,

    /// Swap currencies after the amounts are applied
    #[arg(long)]
    swap: bool,

    /// Print the screen state as JSON
    #[arg(long)]
    json: bool,

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

    let mut config = match cli.config {
        Some(ref path) => Config::from_path(path)?,
        None => Config::default(),
    };
    if let Some(rate) = cli.rate {
        config.rate = rate;
    }
    if let Some(ref from) = cli.from {
        config.default_from = Some(from.parse::<Currency>()?);
    }
    config.validate()?;

    let mut session = ConversionSession::new(config.exchange_rate()?, config.start_currency())?;
    let mut stdout = io::stdout();

    if cli.amount.is_empty() {
        // One field value per line; ":swap" and ":reset" act like the screen buttons
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line?;
            let action = match line.trim() {
                ":swap" => SessionAction::Swap,
                ":reset" => SessionAction::Reset,
                _ => SessionAction::Input(line),
            };
            session.apply(action);
            print_view(&mut stdout, &session.view(), cli.json)?;
        }
    } else {
        for amount in cli.amount {
            session.apply(SessionAction::Input(amount));
        }
        if cli.swap {
            session.apply(SessionAction::Swap);
        }
        print_view(&mut stdout, &session.view(), cli.json)?;
    }

    Ok(())
}

fn print_view<W: Write>(writer: &mut W, view: &SessionView, json: bool) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *writer, view)?;
        writeln!(writer)?;
        return Ok(());
    }

    let shown = if view.display.is_empty() { "0.00" } else { view.display.as_str() };
    writeln!(writer, "{} -> {}", view.from_currency, view.to_currency)?;
    writeln!(writer, "  You send:    {}{}", view.from_symbol, shown)?;
    writeln!(writer, "  They get:    {}{}", view.to_symbol, view.converted)?;
    writeln!(writer, "  Rate:        {}", view.rate_caption)?;
    writeln!(writer, "  {}", view.fee_label)?;
    writeln!(
        writer,
        "  [{}]{}",
        view.send_label,
        if view.can_submit { "" } else { " (disabled)" }
    )?;
    Ok(())
}
