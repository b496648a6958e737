use crate::starfield::Region;
use crate::types::Config;
use clap::Parser;
use std::path::PathBuf;

/// Chat with a remote assistant from your terminal.
#[derive(Debug, Default, Parser)]
#[command(name = "stellar-chat", version, about)]
pub struct Args {
    /// Chat endpoint URL (POST, JSON)
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Stars per unit of surface area
    #[arg(long)]
    pub density: Option<f64>,

    /// Depth units per millisecond
    #[arg(long)]
    pub speed: Option<f64>,

    /// Star color (#rrggbb or a color name)
    #[arg(long)]
    pub color: Option<String>,

    /// Where the starfield is drawn
    #[arg(long, value_enum)]
    pub region: Option<Region>,

    /// Disable the starfield background
    #[arg(long)]
    pub no_stars: bool,

    /// Log filter, e.g. `debug` or `stellar_chat=trace`
    #[arg(long)]
    pub log_level: Option<String>,
}

impl Args {
    /// Command-line values win over whatever the config file says.
    pub fn apply(&self, config: &mut Config) {
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(density) = self.density {
            config.starfield.density = density;
        }
        if let Some(speed) = self.speed {
            config.starfield.speed = speed;
        }
        if let Some(color) = &self.color {
            config.starfield.color = color.clone();
        }
        if let Some(region) = self.region {
            config.starfield.region = region;
        }
        if self.no_stars {
            config.starfield.enabled = false;
        }
        if let Some(level) = &self.log_level {
            config.log_level = Some(level.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config_values() {
        let args = Args::parse_from([
            "stellar-chat",
            "--endpoint",
            "http://127.0.0.1:9000/chat",
            "--speed",
            "0.2",
            "--region",
            "transcript",
            "--no-stars",
        ]);
        let mut config = Config::default();

        args.apply(&mut config);

        assert_eq!(config.endpoint, "http://127.0.0.1:9000/chat");
        assert_eq!(config.starfield.speed, 0.2);
        assert_eq!(config.starfield.region, Region::Transcript);
        assert!(!config.starfield.enabled);
        assert_eq!(config.starfield.color, "#ffffff");
    }

    #[test]
    fn no_flags_leave_config_untouched() {
        let args = Args::parse_from(["stellar-chat"]);
        let mut config = Config::default();
        args.apply(&mut config);
        assert_eq!(config, Config::default());
    }
}
