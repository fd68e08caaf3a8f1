use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cli;

use duvet_finder::data::{Budget, Preferences, Season, SleepTemperature, Size};

#[derive(Parser)]
#[command(name = "duvet-finder")]
#[command(about = "Rank a duvet catalog against sleep preferences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct CatalogArgs {
    /// Catalog JSON file (default: bundled catalog)
    #[arg(long)]
    catalog: Option<String>,

    /// Run config JSON file (points, top_n)
    #[arg(long)]
    config: Option<String>,
}

#[derive(Args)]
struct PreferenceArgs {
    /// How warm the sleeper usually is
    #[arg(long, value_enum)]
    temperature: Option<SleepTemperature>,

    /// When the duvet will be used
    #[arg(long, value_enum)]
    season: Option<Season>,

    /// Whether allergies matter (true or false)
    #[arg(long)]
    allergies: Option<bool>,

    /// Price range
    #[arg(long, value_enum)]
    budget: Option<Budget>,

    /// Bed size
    #[arg(long, value_enum)]
    size: Option<Size>,

    /// Raw questionnaire answer, e.g. `season=winter` or `allergies=yes`.
    /// Explicit flags win over answers for the same axis.
    #[arg(long = "answer", value_name = "KEY=VALUE")]
    answers: Vec<String>,
}

impl PreferenceArgs {
    fn into_preferences(self) -> Result<Preferences> {
        let answers = self
            .answers
            .iter()
            .map(|answer| {
                answer
                    .split_once('=')
                    .ok_or_else(|| anyhow::anyhow!("Answer must be KEY=VALUE: {}", answer))
            })
            .collect::<Result<Vec<_>>>()?;
        let mut prefs = Preferences::from_answers(answers)?;

        if self.temperature.is_some() {
            prefs.sleep_temperature = self.temperature;
        }
        if self.season.is_some() {
            prefs.season = self.season;
        }
        if self.allergies.is_some() {
            prefs.allergies = self.allergies;
        }
        if self.budget.is_some() {
            prefs.budget = self.budget;
        }
        if self.size.is_some() {
            prefs.size = self.size;
        }
        Ok(prefs)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Rank the catalog against the given preferences
    Recommend {
        #[command(flatten)]
        source: CatalogArgs,

        #[command(flatten)]
        prefs: PreferenceArgs,

        /// Number of matches to show (default from config, 6)
        #[arg(long)]
        top: Option<usize>,

        /// Output format (json or md)
        #[arg(long, default_value = "md")]
        format: String,
    },

    /// Answer the questionnaire interactively, then show matches
    Ask {
        #[command(flatten)]
        source: CatalogArgs,

        /// Number of matches to show (default from config, 6)
        #[arg(long)]
        top: Option<usize>,

        /// Output format (json or md)
        #[arg(long, default_value = "md")]
        format: String,
    },

    /// Compare two products in the variants they would be recommended in
    Compare {
        /// First product slug or id
        #[arg(long)]
        a: String,

        /// Second product slug or id
        #[arg(long)]
        b: String,

        #[command(flatten)]
        source: CatalogArgs,

        #[command(flatten)]
        prefs: PreferenceArgs,

        /// Output format (json or md)
        #[arg(long, default_value = "md")]
        format: String,
    },

    /// Validate a catalog file
    Validate {
        /// Catalog JSON file (default: bundled catalog)
        #[arg(long)]
        catalog: Option<String>,
    },

    /// List catalog products
    Catalog {
        /// Catalog JSON file (default: bundled catalog)
        #[arg(long)]
        catalog: Option<String>,

        /// Output format (json or md)
        #[arg(long, default_value = "md")]
        format: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recommend {
            source,
            prefs,
            top,
            format,
        } => {
            let prefs = prefs.into_preferences()?;
            tracing::info!(preferences = ?prefs, format = %format, "Recommending");
            cli::recommend(
                source.catalog.as_deref(),
                source.config.as_deref(),
                prefs,
                top,
                &format,
            )?;
        }
        Commands::Ask {
            source,
            top,
            format,
        } => {
            tracing::info!(format = %format, "Starting questionnaire");
            cli::ask(
                source.catalog.as_deref(),
                source.config.as_deref(),
                top,
                &format,
            )?;
        }
        Commands::Compare {
            a,
            b,
            source,
            prefs,
            format,
        } => {
            tracing::info!(a = %a, b = %b, "Comparing products");
            cli::compare_products(
                source.catalog.as_deref(),
                source.config.as_deref(),
                &a,
                &b,
                prefs.into_preferences()?,
                &format,
            )?;
        }
        Commands::Validate { catalog } => {
            tracing::info!(catalog = ?catalog, "Validating catalog");
            cli::validate_catalog(catalog.as_deref())?;
        }
        Commands::Catalog { catalog, format } => {
            tracing::info!(catalog = ?catalog, "Listing catalog");
            cli::list_catalog(catalog.as_deref(), &format)?;
        }
    }

    Ok(())
}
