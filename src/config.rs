//! Command line arguments and YAML parameter files
//!
//! Parameters are layered: preset, then the config file (if any), then
//! individual command line flags.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use field_simulation::{FieldParams, Preset};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PresetArg {
    Neural,
    BioMesh,
    Flowing,
}

impl From<PresetArg> for Preset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Neural => Preset::NeuralField,
            PresetArg::BioMesh => Preset::BioMesh,
            PresetArg::Flowing => Preset::FlowingLines,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "fieldfx", version, about = "Interactive particle field animation")]
pub struct Args {
    /// Visual preset to start from
    #[arg(long, value_enum, default_value_t = PresetArg::Neural)]
    pub preset: PresetArg,

    /// Seed for the random generator; a fresh one is drawn when omitted
    #[arg(long)]
    pub seed: Option<u64>,

    /// YAML file with full or partial field parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Upper bound on the number of entities
    #[arg(long)]
    pub max_entities: Option<usize>,

    /// Start with the tuning panel hidden
    #[arg(long)]
    pub no_panel: bool,
}

/// Everything the application needs to start
#[derive(Debug, Clone)]
pub struct Settings {
    pub preset: Preset,
    pub params: FieldParams,
    pub seed: u64,
    pub show_panel: bool,
}

/// Merge the mapping in `yaml` over `base`; keys absent from the file keep
/// their values from `base`
pub fn overlay_yaml(base: FieldParams, yaml: &str) -> Result<FieldParams> {
    let overlay: serde_yaml::Value = serde_yaml::from_str(yaml)?;
    let mut merged = serde_yaml::to_value(&base)?;

    match (&mut merged, overlay) {
        (_, serde_yaml::Value::Null) => return Ok(base),
        (serde_yaml::Value::Mapping(fields), serde_yaml::Value::Mapping(overrides)) => {
            for (key, value) in overrides {
                fields.insert(key, value);
            }
        }
        _ => bail!("expected a mapping of field parameters"),
    }

    Ok(serde_yaml::from_value(merged)?)
}

/// Layer preset, optional file contents and flags into validated parameters
fn layer(args: &Args, file: Option<&str>) -> Result<FieldParams> {
    let mut params = FieldParams::preset(args.preset.into());

    if let Some(yaml) = file {
        params = overlay_yaml(params, yaml)?;
    }
    if let Some(max_entities) = args.max_entities {
        params.max_entities = max_entities;
    }

    params.validate().context("invalid field parameters")?;
    Ok(params)
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?,
            ),
            None => None,
        };

        let params = layer(args, file.as_deref()).with_context(|| match &args.config {
            Some(path) => format!("failed to load parameters from {}", path.display()),
            None => "failed to load parameters".to_string(),
        })?;

        Ok(Self {
            preset: args.preset.into(),
            params,
            seed: args.seed.unwrap_or_else(rand::random),
            show_panel: !args.no_panel,
        })
    }
}
