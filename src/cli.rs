use std::path::PathBuf;

use clap::Parser;

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "music-jammer")]
#[command(version)]
#[command(about = "Terminal client for Music Jammer listening rooms")]
pub struct Args {
    /// TOML config file (defaults to ./jammer.toml when present)
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Backend base URL, e.g. http://127.0.0.1:8000/
    #[arg(long)]
    pub base_url: Option<String>,

    /// How often to poll the current song while in a room, in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,
}

impl Args {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            poll_interval_ms: self.poll_interval_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_become_overrides() {
        let args = Args::parse_from([
            "music-jammer",
            "--base-url",
            "http://jammer.local",
            "--poll-interval-ms",
            "500",
        ]);
        let overrides = args.overrides();
        assert_eq!(overrides.base_url.as_deref(), Some("http://jammer.local"));
        assert_eq!(overrides.poll_interval_ms, Some(500));
        assert_eq!(args.config, None);
    }
}
