use std::time::Duration;
use anyhow::{anyhow, Context, Result};
use simplelog::LevelFilter;

pub const DEFAULT_API_URL: &str = "https://jntuhresults.dhethi.com/api/getAllResult";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub log_level: LevelFilter,
}

impl Config {
    // Reads settings from the environment, falling back to defaults for unset keys.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_url = lookup("RESULTS_API_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout_secs = match lookup("RESULTS_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .with_context(|| format!("RESULTS_TIMEOUT_SECS is not a number: {raw}"))?;
                if secs == 0 {
                    return Err(anyhow!("RESULTS_TIMEOUT_SECS must be greater than zero"));
                }
                secs
            }
            None => DEFAULT_TIMEOUT_SECS,
        };

        let log_level = match lookup("LOG_LEVEL") {
            Some(raw) => raw
                .trim()
                .parse::<LevelFilter>()
                .map_err(|_| anyhow!("LOG_LEVEL is not a valid level: {raw}"))?,
            None => LevelFilter::Info,
        };

        Ok(Self {
            api_url,
            timeout: Duration::from_secs(timeout_secs),
            log_level,
        })
    }
}

// What the user asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub roll_number: String,
    pub json: bool,
}

impl Invocation {
    // The first positional argument is the roll number; `ROLL_NUMBER` is the fallback.
    pub fn from_args<I>(args: I, env_roll_number: Option<String>) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut json = false;
        let mut roll_number = None;
        for arg in args {
            if arg == "--json" {
                json = true;
            } else if arg.starts_with("--") {
                return Err(anyhow!("Unknown option: {arg}"));
            } else if roll_number.is_none() {
                roll_number = Some(arg);
            } else {
                return Err(anyhow!("Unexpected argument: {arg}"));
            }
        }

        let roll_number = roll_number
            .or(env_roll_number)
            .context("Usage: gradecard [--json] <roll-number> (or set ROLL_NUMBER)")?;
        Ok(Self { roll_number, json })
    }
}
