use crate::cli::{Cli, SplinesArg};
use crate::errors::KapigraphError;
use crate::graph::{resolve_targets, Resolution};
use crate::inventory::Inventory;
use crate::utils::config::{self, Config};
use crate::visualization::{DotGenerator, DotOptions, EdgeStyle, SvgGenerator};
use clap::CommandFactory;
use clap_complete::generate;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const DEFAULT_INVENTORY: &str = "inventory";
pub const DEFAULT_OUTPUT: &str = "kapitan.dot";

/// Effective settings for one run, after merging CLI flags, config file and defaults.
#[derive(Debug, Clone)]
pub struct Settings {
    pub target: Option<String>,
    pub inventory: PathBuf,
    pub output: PathBuf,
    pub svg: Option<PathBuf>,
    pub json: Option<PathBuf>,
    pub dot: DotOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            target: None,
            inventory: PathBuf::from(DEFAULT_INVENTORY),
            output: PathBuf::from(DEFAULT_OUTPUT),
            svg: None,
            json: None,
            dot: DotOptions::default(),
        }
    }
}

impl Settings {
    /// Explicit CLI flags win over the config file, which wins over defaults.
    ///
    /// # Errors
    /// Returns `KapigraphError::Config` if the config names an unknown splines style.
    pub fn resolve(
        cli: &Cli,
        config: Option<Config>,
        config_path: &Path,
    ) -> Result<Self, KapigraphError> {
        let cfg = config.unwrap_or_default();
        let dot_cfg = cfg.dot.unwrap_or_default();
        let defaults = DotOptions::default();

        let splines = match (cli.splines, dot_cfg.splines) {
            (Some(arg), _) => splines_from_arg(arg),
            (None, Some(s)) => s.parse::<EdgeStyle>().map_err(|e| KapigraphError::Config {
                path: config_path.to_path_buf(),
                message: e.to_string(),
            })?,
            (None, None) => defaults.splines,
        };

        Ok(Self {
            target: cli.target.clone().or(cfg.target),
            inventory: cli
                .inventory
                .clone()
                .or(cfg.inventory)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INVENTORY)),
            output: cli
                .output
                .clone()
                .or(cfg.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            svg: cli.svg.clone().or(cfg.svg.and_then(|s| s.path)),
            json: cli.json.clone().or(cfg.json),
            dot: DotOptions {
                layout: cli.layout.clone().or(dot_cfg.layout).unwrap_or(defaults.layout),
                splines,
                font: cli.font.clone().or(dot_cfg.font),
                ..DotOptions::default()
            },
        })
    }
}

fn splines_from_arg(arg: SplinesArg) -> EdgeStyle {
    match arg {
        SplinesArg::Ortho => EdgeStyle::Ortho,
        SplinesArg::Curved => EdgeStyle::Curved,
        SplinesArg::Polyline => EdgeStyle::Polyline,
        SplinesArg::Spline => EdgeStyle::Spline,
    }
}

/// Load the inventory, resolve the selected targets and write every requested output.
///
/// Nothing is written unless loading, resolution and rendering all succeed.
///
/// # Errors
/// Returns `KapigraphError` on load/decode failures, an unknown target, a Graphviz
/// failure, or when an output file cannot be written.
pub fn run(settings: &Settings) -> Result<Resolution, KapigraphError> {
    let mut inventory = Inventory::load(&settings.inventory)?;

    if let Some(target) = settings.target.as_deref() {
        inventory.select(target)?;
        log::info!("Only using classes referenced by target '{target}'.");
    } else {
        log::info!(
            "Using all targets. If the resulting graph is too large, filter down with '-t TARGET_NAME'."
        );
    }

    let universe = inventory.universe();
    let resolution = resolve_targets(&universe, inventory.target_names());
    if !resolution.unresolved.is_empty() {
        let names: Vec<&str> = resolution.unresolved.iter().map(String::as_str).collect();
        log::debug!("Classes referenced but not found: {}", names.join(", "));
    }
    if !resolution.cycles.is_empty() {
        log::warn!("{} class cycle(s) found; edges are still emitted", resolution.cycles.len());
    }

    log::info!("Generating dot for {} nodes...", resolution.relationships.len());
    let dot =
        DotGenerator::new().generate_dot_with_options(&resolution.relationships, &settings.dot);
    let svg = settings.svg.as_ref().map(|_| SvgGenerator::new().render_dot(&dot)).transpose()?;
    let json = settings
        .json
        .as_ref()
        .map(|_| serde_json::to_string_pretty(&resolution))
        .transpose()?;

    log::info!("Writing out to {}", settings.output.display());
    write_output(&settings.output, &dot)?;
    if let (Some(path), Some(content)) = (settings.svg.as_ref(), svg) {
        log::info!("Writing SVG to {}", path.display());
        write_output(path, &content)?;
    }
    if let (Some(path), Some(content)) = (settings.json.as_ref(), json) {
        log::info!("Writing JSON to {}", path.display());
        write_output(path, &content)?;
    }
    Ok(resolution)
}

fn write_output(path: &Path, content: &str) -> Result<(), KapigraphError> {
    fs::write(path, content)
        .map_err(|source| KapigraphError::Write { path: path.to_path_buf(), source })
}

fn load_config(cli: &Cli) -> Result<(Option<Config>, PathBuf), KapigraphError> {
    if let Some(path) = cli.config.as_ref() {
        return Ok((Some(config::load_config_at(path)?), path.clone()));
    }
    let dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let cfg = config::load_config_near(&dir)?;
    Ok((cfg, dir.join(config::DEFAULT_CONFIG_FILE)))
}

/// Configure `env_logger` on stderr from the `--quiet`/`--verbose` flags.
///
/// `RUST_LOG` applies when neither flag is given.
pub fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose == 1 {
        builder.filter_level(log::LevelFilter::Debug);
    } else if cli.verbose > 1 {
        builder.filter_level(log::LevelFilter::Trace);
    }
    builder.format_timestamp(None).format_target(false);
    let _ = builder.target(env_logger::Target::Stderr).try_init();
}

/// Run the CLI logic in-process.
///
/// Returns an exit code (0 = success, 1 = any failure).
#[must_use]
pub fn run_cli(cli: Cli) -> i32 {
    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let bin_name = env!("CARGO_PKG_NAME");
        generate(shell, &mut cmd, bin_name, &mut io::stdout());
        return 0;
    }

    let settings = match load_config(&cli)
        .and_then(|(cfg, cfg_path)| Settings::resolve(&cli, cfg, &cfg_path))
    {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return 1;
        }
    };

    match run(&settings) {
        Ok(_) => 0,
        Err(e) => {
            eprintln!("error: {e}");
            1
        }
    }
}
