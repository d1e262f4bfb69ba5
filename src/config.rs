use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::output::OutputFormat;
use crate::reference::{GridRegion, RouteKind};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Starting values for a blank assessment form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentConfig {
    #[serde(default = "default_functional_unit_kg")]
    pub default_functional_unit_kg: f64,
    #[serde(default = "default_route")]
    pub default_route: RouteKind,
    #[serde(default = "default_grid_region")]
    pub default_grid_region: GridRegion,
    #[serde(default = "default_plant_yield_pct")]
    pub default_plant_yield_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub detail: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub format: Option<OutputFormat>,
    pub detail: Option<bool>,
    pub grid_region: Option<GridRegion>,
    pub route: Option<RouteKind>,
    pub functional_unit_kg: Option<f64>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/metal-lca/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(format) = overrides.format {
            self.output.format = format;
        }
        if let Some(detail) = overrides.detail {
            self.output.detail = detail;
        }
        if let Some(region) = overrides.grid_region {
            self.assessment.default_grid_region = region;
        }
        if let Some(route) = overrides.route {
            self.assessment.default_route = route;
        }
        if let Some(kg) = overrides.functional_unit_kg {
            self.assessment.default_functional_unit_kg = kg;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[assessment]
default_functional_unit_kg = 1000.0
default_route = "primary"
default_grid_region = "EU"
default_plant_yield_pct = 85.0

[output]
# table | json | csv
format = "table"
detail = false
"#;
        template.to_string()
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            default_functional_unit_kg: default_functional_unit_kg(),
            default_route: default_route(),
            default_grid_region: default_grid_region(),
            default_plant_yield_pct: default_plant_yield_pct(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            detail: false,
        }
    }
}

fn default_functional_unit_kg() -> f64 {
    1000.0
}

fn default_route() -> RouteKind {
    RouteKind::Primary
}

fn default_grid_region() -> GridRegion {
    GridRegion::EuropeanUnion
}

fn default_plant_yield_pct() -> f64 {
    85.0
}
