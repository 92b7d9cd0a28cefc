use anyhow::Result;
use clap::{Parser, Subcommand};
use rmcp::ServiceExt;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trail_scout::console::Console;
use trail_scout::filters::{Difficulty, RecommendationRequest, Season, TrailFilters};
use trail_scout::formatters::{format_recommendations, format_weather_report};
use trail_scout::service::TrailService;
use trail_scout::{Config, TrailAdvisor};

#[derive(Parser)]
#[command(name = "trail-scout", version, about = "Hiking trail recommendations for any city")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a city and browse trails interactively (default)
    Interactive,
    /// Serve the trail tools over MCP on stdio
    Serve,
    /// Print the weather report for a city
    Weather { city: String },
    /// Print a summary and trail recommendations for a city
    Recommend {
        city: String,
        #[arg(long, default_value = "easy")]
        difficulty: Difficulty,
        /// Trail length in miles (0 to 10, steps of 0.5)
        #[arg(long, default_value_t = 0.0)]
        length: f64,
        /// Elevation gain in feet (0 to 1000, steps of 100)
        #[arg(long, default_value_t = 0)]
        elevation: u32,
        #[arg(long, default_value = "spring")]
        season: Season,
        #[arg(long)]
        pet_friendly: bool,
        /// Specific needs, free text
        #[arg(long)]
        preferences: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trail_scout=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let advisor = TrailAdvisor::from_config(&config)?;

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => {
            let stdin = BufReader::new(tokio::io::stdin());
            Console::new(&advisor, stdin, std::io::stdout()).run().await?;
        }
        Command::Serve => {
            tracing::info!("Starting MCP trail server");

            let server = TrailService::new(advisor).serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;

            tracing::info!("Server shutdown complete");
        }
        Command::Weather { city } => {
            let report = advisor.weather(&city).await?;
            print!("{}", format_weather_report(&report));
        }
        Command::Recommend {
            city,
            difficulty,
            length,
            elevation,
            season,
            pet_friendly,
            preferences,
        } => {
            let filters = TrailFilters::new(difficulty, length, elevation, season, pet_friendly)?;
            let request = RecommendationRequest::new(city, filters, preferences);
            let summary = advisor.summary(&request).await?;
            let completion = advisor.recommendations(&request).await?;
            print!("{}", format_recommendations(&request.city, &summary, &completion));
        }
    }

    Ok(())
}
