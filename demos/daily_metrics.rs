//! Fetch one day of metrics and print a summary
//!
//! Reads `ULTRAHUMAN_API_KEY` (and optionally `ULTRAHUMAN_BASE_URL`) from the
//! environment or a `.env` file. Usage: `daily_metrics [YYYY-MM-DD] [email]`

use chrono::{NaiveDate, Utc};
use tracing_subscriber::EnvFilter;
use ultrahuman_client::{MetricData, MetricPayload, UltrahumanClient};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let date = match args.next() {
        Some(raw) => match NaiveDate::parse_from_str(&raw, "%Y-%m-%d") {
            Ok(date) => date,
            Err(e) => {
                eprintln!("Error: invalid date '{raw}': {e}");
                std::process::exit(2);
            }
        },
        None => Utc::now().date_naive(),
    };
    let email = args.next();

    let client = match UltrahumanClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    match client.daily_metrics_for_date(date, email.as_deref()).await {
        Ok(data) => {
            println!("time zone: {}", data.latest_time_zone);
            for key in data.keys() {
                println!("{key}:");
                for entry in data.entries(key) {
                    match &entry.metric_data {
                        MetricPayload::Typed(MetricData::Sleep(sleep)) => {
                            println!("  sleep: score {}", sleep.sleep_score.score)
                        }
                        MetricPayload::Typed(data) => match data.as_series() {
                            Some(series) => println!(
                                "  {}: {} {}",
                                entry.tag, series.last_reading, series.unit
                            ),
                            None => println!("  {}", entry.tag),
                        },
                        MetricPayload::Untyped(_) => println!("  {} (untyped)", entry.tag),
                    }
                }
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
