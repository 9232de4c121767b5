use clap::Parser;

/// Scrapeboot — bootstrap the scraping project end to end: find the
/// manifest and the scraper, provision a venv, install dependencies, run.
#[derive(Parser, Debug)]
#[command(name = "scrapeboot")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project directory to bootstrap (defaults to the current directory)
    #[arg(value_name = "PROJECT_DIR")]
    pub project_dir: Option<String>,

    /// Skip the pre-run confirmation prompt
    #[arg(long, default_value = "false")]
    pub yes: bool,

    /// Print the final report as JSON on stdout
    #[arg(long, default_value = "false")]
    pub json: bool,
}
