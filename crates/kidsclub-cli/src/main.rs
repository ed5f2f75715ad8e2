use std::process;

use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand, ValueEnum};
use kidsclub::schedule::DateRange;
use kidsclub::types::ResultTable;
use kidsclub::utils::RangeStats;
use kidsclub::{Credentials, Session, aggregator};
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "kidsclub")]
#[command(about = "Weekly and monthly attendance tables for the kids' club reservation board", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(
        long = "id",
        env = "KIDSCLUB_USER_ID",
        default_value = "",
        hide_default_value = true,
        global = true,
        help = "Member ID used to log in"
    )]
    user_id: String,

    #[arg(
        long = "password",
        env = "KIDSCLUB_USER_PW",
        default_value = "",
        hide_default_value = true,
        hide_env_values = true,
        global = true,
        help = "Member password used to log in"
    )]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct RangeArgs {
    #[arg(
        long,
        value_name = "YYYY-MM-DD",
        help = "Any date inside the period to show (defaults to today)",
        value_parser = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| e.to_string()),
    )]
    date: Option<NaiveDate>,

    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Show bookings for the Monday-to-Sunday week containing the date
    Week(RangeArgs),
    /// Show bookings for the calendar month containing the date
    Month(RangeArgs),
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn print_table(table: &ResultTable, format: &OutputFormat) {
    match format {
        OutputFormat::Json => serialize_json(table),
        OutputFormat::Text => {
            if table.is_empty() {
                println!("No days to display.");
            } else {
                print!("{}", table);
                print!("{}", RangeStats::from_table(table));
            }
        }
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let (args, range) = match cli.command {
        Commands::Week(args) => {
            let reference = args.date.unwrap_or_else(|| Local::now().date_naive());
            (args, DateRange::weekly(reference))
        }
        Commands::Month(args) => {
            let reference = args.date.unwrap_or_else(|| Local::now().date_naive());
            (args, DateRange::monthly(reference))
        }
    };

    let credentials = Credentials::new(cli.user_id, cli.password);
    if !credentials.is_complete() {
        log::error!("Provide --id and --password (or KIDSCLUB_USER_ID / KIDSCLUB_USER_PW)");
        process::exit(1);
    }

    let session = Session::login(&credentials).await.unwrap_or_else(|e| {
        log::error!("{}", e);
        process::exit(1);
    });

    let table = aggregator::fetch_range_of(&session, range).await;
    print_table(&table, &args.format);
}
