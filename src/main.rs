mod catalog;
mod extract;
mod fetch;
mod report;
mod settings;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tracing::info;

use settings::Settings;

#[derive(Parser)]
#[command(
    name = "ons_components",
    about = "List the ONS design system components and compare design system catalogs"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Page to scrape (overrides ONS_URL); not accepted by the catalog commands
    #[arg(long)]
    url: Option<String>,
}

impl Cli {
    fn try_parse_checked<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        if cli.url.is_some()
            && matches!(
                cli.command,
                Some(Commands::Components { .. } | Commands::Patterns { .. })
            )
        {
            return Err(Self::command().error(
                ErrorKind::ArgumentConflict,
                "--url only applies to scraping",
            ));
        }
        Ok(cli)
    }

    /// `scrape --url` wins over the top-level `--url`.
    fn url_flag(&self) -> Option<String> {
        match &self.command {
            Some(Commands::Scrape { url: Some(url) }) => Some(url.clone()),
            _ => self.url.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the components page and print each nav link (default)
    Scrape {
        /// Page to scrape (overrides ONS_URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Group a components.json file by component name
    Components {
        file: PathBuf,
        /// Case-insensitive filter on component or organisation name
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Group a patterns.json file by pattern name
    Patterns {
        file: PathBuf,
        /// Case-insensitive filter on pattern or organisation name
        #[arg(short, long, default_value = "")]
        search: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::try_parse_checked(std::env::args_os()).unwrap_or_else(|e| e.exit());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    run(cli, &mut out).await?;
    out.flush()?;
    Ok(())
}

async fn run<W: Write>(cli: Cli, out: &mut W) -> anyhow::Result<()> {
    let url_flag = cli.url_flag();
    match cli.command {
        None | Some(Commands::Scrape { .. }) => {
            let url = scrape_url(url_flag, Settings::load()?);
            let client = fetch::client()?;
            report::scrape(&client, &url, out).await?;
        }
        Some(Commands::Components { file, search }) => {
            let data = catalog::components::load_components(&file)?;
            let shown = catalog::components::group_components(&data).render(out, &search)?;
            info!("Displayed {} components", shown);
        }
        Some(Commands::Patterns { file, search }) => {
            let data = catalog::patterns::load_patterns(&file)?;
            let shown = catalog::patterns::group_patterns(&data)?.render(out, &search)?;
            info!("Displayed {} patterns", shown);
        }
    }
    Ok(())
}

fn scrape_url(flag: Option<String>, settings: Settings) -> String {
    flag.unwrap_or(settings.url)
}
