use clap::{Parser, Subcommand};
use streakline_core::time::MAX_WINDOW_DAYS;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "streakline", version, about = "Streakline CLI")]
struct Cli {
    /// Treat this YYYY-MM-DD day as today
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline totals and today's numbers
    Summary,
    /// Focus minutes bucketed by day, hour, weekday or month
    Focus {
        /// Bucket: day, hour, weekday, month
        #[arg(long, default_value = "day")]
        by: streakline_core::stats::FocusBucket,
        /// Trailing days for the day bucket (defaults to config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_WINDOW_DAYS)))]
        days: Option<u32>,
    },
    /// Activity heatmap over trailing days
    Heatmap {
        /// Window length (defaults to config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_WINDOW_DAYS)))]
        days: Option<u32>,
    },
    /// Per-day trend over trailing days
    Trend {
        /// Window length (defaults to config)
        #[arg(long, value_parser = clap::value_parser!(u32).range(0..=i64::from(MAX_WINDOW_DAYS)))]
        days: Option<u32>,
    },
    /// Task distributions and completion rate
    Tasks {
        /// Group by: list, priority, tag
        #[arg(long, default_value = "list")]
        by: String,
        /// Which tasks to count: all, completed, open
        #[arg(long, default_value = "all")]
        scope: streakline_core::stats::TaskScope,
    },
    /// Per-habit streaks and rates
    Habits,
    /// Habit check-ins
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Achievement progress
    Achievements {
        /// Only show unlocked achievements
        #[arg(long)]
        unlocked: bool,
    },
    /// XP score breakdown
    Score,
    /// Context bundle for an external assistant
    Context,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("STREAKLINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    let today = cli.today.as_deref();

    let result = match cli.command {
        Commands::Summary => commands::report::summary(today),
        Commands::Focus { by, days } => commands::report::focus(today, by, days),
        Commands::Heatmap { days } => commands::report::heatmap(today, days),
        Commands::Trend { days } => commands::report::trend(today, days),
        Commands::Tasks { by, scope } => commands::report::tasks(today, &by, scope),
        Commands::Habits => commands::habit::list(today),
        Commands::Habit { action } => commands::habit::run(today, action),
        Commands::Achievements { unlocked } => commands::achievements::list(today, unlocked),
        Commands::Score => commands::achievements::score(today),
        Commands::Context => commands::achievements::context(today),
        Commands::Config { action } => commands::config::run(today, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
