use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use passgen::export::{export_history_json, export_text};
use passgen::utils::{mask_tail, parse_date};
use passgen::{generate_passwords, Config, PasswordHistory, PasswordOptions};

/// Leading characters left visible in `history list`
const MASK_VISIBLE: usize = 3;

#[derive(Parser, Debug)]
#[command(
    name = "passgen",
    author,
    version,
    about = "Secure password generator",
    long_about = None
)]
struct Cli {
    /// Folder holding the history database
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate one or more passwords
    Generate(GenerateArgs),
    /// Inspect or manage the generation history
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Password length
    #[arg(short, long, default_value_t = passgen::PASSWORD_DEFAULT_LENGTH)]
    length: usize,

    /// How many passwords to generate
    #[arg(short, long, default_value_t = passgen::BATCH_MIN)]
    count: usize,

    #[arg(long)]
    no_lowercase: bool,

    #[arg(long)]
    no_uppercase: bool,

    #[arg(long)]
    no_numbers: bool,

    #[arg(long)]
    no_symbols: bool,

    /// Record the generated passwords in the history
    #[arg(long)]
    save: bool,
}

impl GenerateArgs {
    fn options(&self) -> PasswordOptions {
        PasswordOptions {
            include_lowercase: !self.no_lowercase,
            include_uppercase: !self.no_uppercase,
            include_numbers: !self.no_numbers,
            include_symbols: !self.no_symbols,
        }
    }
}

#[derive(Subcommand, Debug)]
enum HistoryCommand {
    /// Show the newest entries
    List {
        /// Number of entries to show
        #[arg(long, default_value_t = passgen::HISTORY_RECENT_DEFAULT)]
        limit: usize,

        /// Only entries generated on this day (YYYY-MM-DD or YYYYMMDD, UTC)
        #[arg(long)]
        date: Option<String>,

        /// Print passwords in full instead of masked
        #[arg(long)]
        reveal: bool,
    },
    /// Show database ID, version and entry count
    Info,
    /// Delete every entry
    Clear,
    /// Print the whole history as JSON
    Export,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    // RUST_LOG overrides the flag
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp_secs()
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::from_env().context("Failed to load configuration")?;
    let data_dir = cli.data_dir.unwrap_or(config.data_dir);
    log::debug!("Using data folder {}", data_dir.display());

    match cli.command {
        Command::Generate(args) => {
            let passwords = generate_passwords(args.length, args.count, &args.options())?;
            println!("{}", export_text(&passwords));

            if args.save {
                let mut history = PasswordHistory::open_or_create(&data_dir)
                    .with_context(|| format!("Failed to open history in {}", data_dir.display()))?;
                for password in &passwords {
                    history.add(password, args.length, &args.options())?;
                }
                log::info!("Saved {} password(s) to history", passwords.len());
            }
        }
        Command::History(command) => {
            let mut history = PasswordHistory::open_or_create(&data_dir)
                .with_context(|| format!("Failed to open history in {}", data_dir.display()))?;

            match command {
                HistoryCommand::List { limit, date, reveal } => {
                    let mut entries = match date {
                        Some(date) => {
                            let day = parse_date(&date)
                                .with_context(|| format!("Invalid date '{date}'"))?;
                            history.by_date(day)?
                        }
                        None => history.entries()?,
                    };
                    entries.truncate(limit);

                    for entry in entries {
                        let password = if reveal {
                            entry.password.clone()
                        } else {
                            mask_tail(&entry.password, MASK_VISIBLE)
                        };
                        println!(
                            "{}  {:>3}  {}",
                            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                            entry.length,
                            password
                        );
                    }
                }
                HistoryCommand::Info => {
                    let props = history.properties()?;
                    println!("Database ID: {}", props.database_id);
                    println!("Version:     {}", props.version);
                    if let Some(created) = props.create_timestamp {
                        println!("Created:     {}", created.format("%Y-%m-%d %H:%M:%S"));
                    }
                    println!("Entries:     {}/{}", history.len()?, history.max_entries());
                }
                HistoryCommand::Clear => {
                    history.clear()?;
                    println!("History cleared");
                }
                HistoryCommand::Export => {
                    println!("{}", export_history_json(&history.entries()?)?);
                }
            }
        }
    }

    Ok(())
}
