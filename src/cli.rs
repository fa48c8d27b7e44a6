use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser};
use tracing::debug;

use crate::config::Config;
use crate::launcher::{QueryLauncher, Selection};
use crate::search::SystemOpener;

/// Open a Google Scholar search built from the literature-review keyword list.
///
/// With no arguments the first 40 lines of `keywords.md` become the query.
#[derive(Parser, Debug)]
#[command(name = "scholar_launcher", version, about)]
pub struct Cli {
    /// Keyword document to read [default: keywords.md]
    #[arg(long, value_name = "PATH")]
    pub keywords: Option<PathBuf>,

    /// Number of leading lines used for the query [default: 40]
    #[arg(long, value_name = "N", conflicts_with = "section")]
    pub lines: Option<usize>,

    /// Build the query from the entries of one `## <NAME>` section instead
    #[arg(long, value_name = "NAME")]
    pub section: Option<String>,

    /// Maximum number of section entries to use [default: 12]
    #[arg(long, value_name = "N", requires = "section")]
    pub max_terms: Option<usize>,

    /// Print the query and URL without opening a browser
    #[arg(long)]
    pub dry_run: bool,

    /// Config file [default: <config dir>/scholar_launcher/config.toml]
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        debug!(?config, "effective config");

        let launcher = QueryLauncher::new(
            self.keywords.clone().unwrap_or_else(|| config.keywords.path.clone()),
            self.selection(&config),
        );

        let mut stdout = io::stdout().lock();
        if self.dry_run {
            launcher.dry_run(&mut stdout)?;
        } else {
            let opener = SystemOpener::new(config.browser.opener);
            launcher.launch(&opener, &mut stdout)?;
        }
        Ok(())
    }

    fn selection(&self, config: &Config) -> Selection {
        match &self.section {
            Some(name) => Selection::Section {
                name: name.clone(),
                max_terms: self.max_terms.unwrap_or(config.keywords.max_terms),
            },
            None => Selection::Prefix {
                lines: self.lines.unwrap_or(config.keywords.line_limit),
            },
        }
    }
}
