use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use potion_timer::commands::{self, CountdownInput};
use potion_timer::{OutputFormat, config, logging};

#[derive(Parser)]
#[command(name = "ptimer")]
#[command(about = "Completion time calculator and live countdown for potion speed-ups")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the completion time once
    Calc {
        #[command(flatten)]
        countdown: CountdownArgs,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Run a live countdown until completion
    Watch {
        #[command(flatten)]
        countdown: CountdownArgs,
    },
    /// Show configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct CountdownArgs {
    #[arg(long, help = "Start time: 'now', RFC 3339, or 'YYYY-MM-DD HH:MM' (local)")]
    start: Option<String>,
    #[arg(long, allow_negative_numbers = true, help = "Duration days")]
    days: Option<i64>,
    #[arg(long, allow_negative_numbers = true, help = "Duration hours")]
    hours: Option<i64>,
    #[arg(long, allow_negative_numbers = true, help = "Duration minutes")]
    minutes: Option<i64>,
    #[arg(long, allow_negative_numbers = true, help = "Number of potions used")]
    potions: Option<i64>,
}

impl From<&CountdownArgs> for CountdownInput {
    fn from(args: &CountdownArgs) -> Self {
        CountdownInput {
            start: args.start.clone(),
            days: args.days,
            hours: args.hours,
            minutes: args.minutes,
            potions: args.potions,
        }
    }
}

#[derive(Parser)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::load()?;
    logging::init(config.logging.filter.as_deref());

    match &cli.command {
        Commands::Calc { countdown, format } => {
            commands::calc::calc(&config, &countdown.into(), *format)?;
        }
        Commands::Watch { countdown } => {
            let input: CountdownInput = countdown.into();
            tokio::runtime::Runtime::new()?.block_on(commands::watch::watch(&config, &input))?;
        }
        Commands::Config(args) => match &args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(key, &config)?,
        },
    }

    Ok(())
}
