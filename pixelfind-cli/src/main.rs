use clap::Parser;
use pixelfind::io::{load_buffer, save_buffer};
use pixelfind::{Argb, FindConfig, Finder, Match, Rect};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "Find a template image inside a larger image")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Override the tolerance from the config file.
    #[arg(long)]
    tolerance: Option<f32>,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    First,
    All,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct AreaConfig {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
}

impl From<AreaConfig> for Rect {
    fn from(value: AreaConfig) -> Self {
        Rect::new(value.x, value.y, value.width, value.height)
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct OverlayConfig {
    /// RGBA channels.
    color: [u8; 4],
    thickness: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            color: [255, 0, 0, 255],
            thickness: 1,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    template_path: String,
    output_path: Option<String>,
    annotated_path: Option<String>,
    mode: ModeConfig,
    tolerance: f32,
    area: Option<AreaConfig>,
    parallel: bool,
    merge_iou: Option<f32>,
    overlay: OverlayConfig,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = FindConfig::default();
        Self {
            image_path: String::new(),
            template_path: String::new(),
            output_path: None,
            annotated_path: None,
            mode: ModeConfig::First,
            tolerance: cfg.tolerance,
            area: None,
            parallel: cfg.parallel,
            merge_iou: cfg.merge_iou,
            overlay: OverlayConfig::default(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MatchRecord {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    quadrant: Option<usize>,
}

impl From<Match> for MatchRecord {
    fn from(value: Match) -> Self {
        Self {
            x: value.rect.x,
            y: value.rect.y,
            width: value.rect.width,
            height: value.rect.height,
            quadrant: value.quadrant,
        }
    }
}

#[derive(Debug, Serialize)]
struct Output {
    found: bool,
    elapsed_ms: f64,
    matches: Vec<MatchRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive("pixelfind=info".parse()?),
            )
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.template_path.is_empty() {
        return Err("image_path and template_path must be set in the config".into());
    }

    let mut source = load_buffer(&config.image_path)?;
    let target = load_buffer(&config.template_path)?;
    let finder = Finder::new(&target).with_config(FindConfig {
        area: config.area.map(Rect::from),
        tolerance: cli.tolerance.unwrap_or(config.tolerance),
        parallel: config.parallel,
        merge_iou: config.merge_iou,
    });

    let start = Instant::now();
    let matches = match config.mode {
        ModeConfig::First => finder.find(&source)?.into_iter().collect(),
        ModeConfig::All => finder.find_all(&source)?,
    };
    let elapsed_ms = start.elapsed().as_secs_f64() * 1e3;
    tracing::info!(matches = matches.len(), elapsed_ms, "search finished");

    if let Some(path) = &config.annotated_path {
        let rects: Vec<Rect> = matches.iter().map(|m| m.rect).collect();
        source.draw_rects(
            &rects,
            Argb::from(config.overlay.color),
            config.overlay.thickness,
        );
        save_buffer(&source, path)?;
    }

    let output = Output {
        found: !matches.is_empty(),
        elapsed_ms,
        matches: matches.into_iter().map(MatchRecord::from).collect(),
    };
    let json = serde_json::to_string_pretty(&output)?;

    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
