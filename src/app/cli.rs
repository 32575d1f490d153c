use clap::Parser;
use std::path::PathBuf;

/// Singboard - the karaoke "now singing" board for your terminal 🎤
#[derive(Parser, Debug)]
#[command(name = "singboard", version, about)]
pub struct Args {
    /// Store to watch: a directory with one file per key, or a .json file
    #[arg(long, short = 's')]
    pub store: Option<PathBuf>,

    /// Use this config file instead of the default location
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    /// Generate default config.toml to stdout
    #[arg(long)]
    pub generate_config: bool,

    /// Log filter, e.g. "info" or "singboard=debug"
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Lay out the current store contents on a WIDTHxHEIGHT headless surface,
    /// print the result as JSON and exit
    #[arg(long, value_name = "WIDTHxHEIGHT", value_parser = parse_size)]
    pub headless_dump: Option<(f64, f64)>,
}

fn parse_size(s: &str) -> Result<(f64, f64), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("bad width {w:?}"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("bad height {h:?}"))?;
    if w <= 0.0 || h <= 0.0 {
        return Err("width and height must be positive".to_string());
    }
    Ok((w, h))
}
