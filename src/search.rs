use std::process::Command;

use tracing::{debug, info, warn};

use crate::error::LaunchError;

/// Fixed Google Scholar endpoint; the encoded query is appended verbatim.
pub const SCHOLAR_SEARCH_URL: &str = "https://scholar.google.com/scholar?q=";

/// One flattened query together with the URL it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub url: String,
}

impl SearchRequest {
    pub fn scholar(query: impl Into<String>) -> Self {
        let query = query.into();
        let url = scholar_url(&query);
        Self { query, url }
    }
}

pub fn encode_query(query: &str) -> String {
    urlencoding::encode(query).into_owned()
}

pub fn scholar_url(query: &str) -> String {
    format!("{}{}", SCHOLAR_SEARCH_URL, encode_query(query))
}

/// Asks the host to open a URL with its preferred handler.
pub trait Opener {
    fn open(&self, url: &str) -> Result<(), LaunchError>;
}

/// Spawns the platform URL handler, or a configured command.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    custom: Option<String>,
}

impl SystemOpener {
    pub fn new(custom: Option<String>) -> Self {
        Self {
            custom: custom.filter(|c| !c.trim().is_empty()),
        }
    }

    fn candidates(&self, url: &str) -> Vec<Vec<String>> {
        let mut commands = Vec::new();

        if let Some(custom) = &self.custom {
            let mut argv: Vec<String> = custom.split_whitespace().map(str::to_string).collect();
            argv.push(url.to_string());
            commands.push(argv);
        }

        if cfg!(target_os = "macos") {
            commands.push(vec!["open".to_string(), url.to_string()]);
        } else if cfg!(target_os = "windows") {
            // `start` treats the first quoted argument as a window title
            commands.push(
                ["cmd", "/C", "start", "", url]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            );
        } else {
            commands.push(vec!["xdg-open".to_string(), url.to_string()]);
            for browser in ["firefox", "google-chrome", "chromium", "brave-browser"] {
                commands.push(vec![browser.to_string(), url.to_string()]);
            }
        }

        commands
    }
}

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), LaunchError> {
        for argv in self.candidates(url) {
            let Some((program, args)) = argv.split_first() else {
                continue;
            };
            match Command::new(program).args(args).spawn() {
                Ok(_) => {
                    info!(opener = %program, "browser launch requested");
                    return Ok(());
                }
                Err(e) => debug!(opener = %program, error = %e, "opener unavailable"),
            }
        }

        warn!("no URL opener could be spawned");
        Err(LaunchError::NoOpener)
    }
}
