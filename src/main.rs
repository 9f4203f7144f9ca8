use chrono::{Local, NaiveDate};
use clap::{Args, Parser, Subcommand};
use dinebook::application::negotiator::{AvailabilityNegotiator, CheckOutcome};
use dinebook::config::{ClientConfig, ResponsePolicy};
use dinebook::domain::calendar::{AvailabilityCalendar, CALENDAR_PARTY_SIZE};
use dinebook::domain::card::CardInput;
use dinebook::domain::loyalty;
use dinebook::domain::ports::TimeSlotSource;
use dinebook::domain::reservation::{ReservationField, validate_reservation_date};
use dinebook::infrastructure::http::HttpAvailabilityChecker;
use dinebook::interfaces::csv::card_reader::CardReader;
use dinebook::interfaces::csv::report_writer::ReportWriter;
use dinebook::interfaces::html::render_notice;
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io;
use std::num::NonZeroU32;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Date to validate against instead of today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct ServerArgs {
    #[arg(long, env = "DINEBOOK_BASE_URL", default_value = dinebook::config::DEFAULT_BASE_URL)]
    base_url: String,
    #[arg(long, env = "DINEBOOK_TIMEOUT_SECS", default_value_t = dinebook::config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl ServerArgs {
    fn config(self) -> ClientConfig {
        ClientConfig::new(self.base_url).with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Validate one set of card fields as the payment form would while typing
    Card {
        #[arg(long, default_value = "")]
        number: String,
        #[arg(long, default_value = "")]
        expiry: String,
        #[arg(long, default_value = "")]
        cvv: String,
        #[arg(long, default_value = "")]
        name: String,
    },
    /// Validate every row of a CSV file with columns number,expiry,cvv,holder
    Cards { input: PathBuf },
    /// Ask the reservation server whether a slot is free
    Check {
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        guests: String,
        #[command(flatten)]
        server: ServerArgs,
        /// Apply every response as it completes instead of dropping stale ones
        #[arg(long)]
        last_completed: bool,
        /// Print the notice as the HTML fragment the reservation page inserts
        #[arg(long)]
        html: bool,
    },
    /// Show which evening slots are open over the coming week
    Calendar {
        #[arg(long, default_value_t = CALENDAR_PARTY_SIZE)]
        guests: u32,
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Preview loyalty points for a member reservation
    Points {
        #[arg(long)]
        guests: u32,
        #[arg(long, default_value_t = 0)]
        current: u32,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());

    match cli.command {
        Command::Card {
            number,
            expiry,
            cvv,
            name,
        } => {
            let input = CardInput {
                number,
                expiry,
                cvv,
                holder_name: name,
            };
            let report = input.validate_live(today);
            for (field, verdict) in report.fields() {
                println!("{}: {}", field, verdict);
            }
            if report.has_errors() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Cards { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = CardReader::new(file);
            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            for (index, card) in reader.cards().into_diagnostic()?.enumerate() {
                match card {
                    Ok(card) => {
                        let report = card.validate_for_submission(today);
                        writer.write_report(index + 1, &report).into_diagnostic()?;
                    }
                    Err(e) => {
                        eprintln!("Error reading card row {}: {}", index + 1, e);
                    }
                }
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Check {
            date,
            time,
            guests,
            server,
            last_completed,
            html,
        } => {
            let policy = if last_completed {
                ResponsePolicy::LastCompleted
            } else {
                ResponsePolicy::LatestIssued
            };
            let config = server.config().with_response_policy(policy);
            config.validate().into_diagnostic()?;

            if let Ok(parsed) = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
                && let Err(e) = validate_reservation_date(parsed, today)
            {
                return Err(miette!("{}", e));
            }

            info!(base_url = %config.base_url, "checking availability");
            let checker = HttpAvailabilityChecker::new(&config).into_diagnostic()?;
            let negotiator = AvailabilityNegotiator::new(Box::new(checker), config.response_policy);
            negotiator.field_changed(ReservationField::Date, date).await;
            negotiator.field_changed(ReservationField::Guests, guests).await;
            match negotiator.field_changed(ReservationField::Time, time).await {
                CheckOutcome::Available => println!("available"),
                CheckOutcome::Unavailable(notice) if html => {
                    println!("{}", render_notice(&notice));
                }
                CheckOutcome::Unavailable(notice) => {
                    println!("unavailable: {}", notice.message);
                    for slot in &notice.alternatives {
                        println!("  {} ({})", slot.label, slot.value);
                    }
                }
                CheckOutcome::Incomplete => {
                    return Err(miette!("date, time and guests must all be valid"));
                }
                CheckOutcome::Superseded | CheckOutcome::Failed => {}
            }
        }
        Command::Calendar { guests, server } => {
            let party_size =
                NonZeroU32::new(guests).ok_or_else(|| miette!("guests must be at least 1"))?;
            let config = server.config();
            config.validate().into_diagnostic()?;

            let source = HttpAvailabilityChecker::new(&config).into_diagnostic()?;
            let slots = source.open_slots(today, party_size).await.map_err(|e| {
                warn!(error = %e, "could not load open time slots");
                miette!("Unable to load availability. Please try again later.")
            })?;
            let calendar = AvailabilityCalendar::build(today, &slots);
            for day in calendar.days() {
                let cells: Vec<String> = day
                    .cells
                    .iter()
                    .map(|cell| format!("{} {}", cell.time, if cell.available { "✓" } else { "✗" }))
                    .collect();
                println!("{} {}  {}", day.date, day.weekday(), cells.join("  "));
            }
        }
        Command::Points { guests, current } => {
            let preview = loyalty::preview(guests, current);
            println!("{} points", preview.earned);
            println!("{} points total", preview.total);
        }
    }

    Ok(ExitCode::SUCCESS)
}
