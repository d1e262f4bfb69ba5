pub mod calculator;
pub mod defaults;
pub mod demo;
pub mod flows;
pub mod validate;

use std::fmt::{Display, Formatter};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::reference::{FuelMix, GridRegion, Material, RouteKind, TransportMode};

pub use calculator::{calc_breakdown, calc_phase1, run_assessment, ImpactBreakdown};
pub use defaults::estimate_missing;
pub use flows::{material_flow, MaterialFlow};
pub use validate::{
    check_readiness, validate_composition, validate_fuel_mix, validate_percent_sum, PercentPart,
    PercentSumCheck, ReadinessIssue, ReadinessReport, WizardStep,
};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompositionPart {
    pub component: String,
    pub percent: f64,
}

impl CompositionPart {
    pub fn new(component: impl Into<String>, percent: f64) -> Self {
        Self {
            component: component.into(),
            percent,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnergyProfile {
    /// `None` means unknown; the defaulting pass fills it.
    #[serde(default)]
    pub electricity_kwh_per_t: Option<f64>,
    /// `None` means the whole mix is unset. An explicit all-zero mix is
    /// kept as given.
    #[serde(default)]
    pub fuel_mix_pct: Option<FuelMix>,
    pub grid_region: GridRegion,
    // Renewables and efficiency bonus are carried for reporting; the
    // emissions formula does not discount the grid factor by them.
    #[serde(default)]
    pub onsite_renewables_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub efficiency_bonus_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransportLeg {
    pub mode: TransportMode,
    pub distance_km: f64,
    /// Falls back to the functional-unit mass when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mass_tonnes: Option<f64>,
}

impl TransportLeg {
    pub fn new(mode: TransportMode, distance_km: f64) -> Self {
        Self {
            mode,
            distance_km,
            mass_tonnes: None,
        }
    }

    pub fn with_mass(mut self, mass_tonnes: f64) -> Self {
        self.mass_tonnes = Some(mass_tonnes);
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductionRoute {
    pub route: RouteKind,
    pub plant_yield_pct: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recycled_content_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byproduct_credit_pct: Option<f64>,
    pub energy: EnergyProfile,
    #[serde(default)]
    pub transport_inbound: Vec<TransportLeg>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentInput {
    pub product_name: String,
    #[serde(alias = "metal")]
    pub material: Material,
    pub functional_unit_kg: f64,
    #[serde(default)]
    pub composition: Vec<CompositionPart>,
    pub route: ProductionRoute,
}

impl AssessmentInput {
    pub fn tonnes(&self) -> f64 {
        self.functional_unit_kg / 1000.0
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HotspotSource {
    Electricity,
    Fuels,
    Transport,
}

impl HotspotSource {
    pub const ALL: [HotspotSource; 3] = [
        HotspotSource::Electricity,
        HotspotSource::Fuels,
        HotspotSource::Transport,
    ];
}

impl Display for HotspotSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Electricity => "Electricity",
            Self::Fuels => "Fuels",
            Self::Transport => "Transport",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Hotspot {
    pub name: HotspotSource,
    pub share_pct: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentResult {
    pub gwp_kgco2e: f64,
    pub energy_mj: f64,
    pub water_m3: f64,
    pub hotspots: Vec<Hotspot>,
}

impl AssessmentResult {
    pub fn hotspot(&self, source: HotspotSource) -> Option<&Hotspot> {
        self.hotspots.iter().find(|h| h.name == source)
    }

    pub fn share_pct(&self, source: HotspotSource) -> f64 {
        self.hotspot(source).map(|h| h.share_pct).unwrap_or(0.0)
    }

    pub fn share_total(&self) -> f64 {
        self.hotspots.iter().map(|h| h.share_pct).sum()
    }

    /// Largest contributor, if any emissions were computed.
    pub fn dominant_hotspot(&self) -> Option<&Hotspot> {
        self.hotspots
            .iter()
            .filter(|h| h.share_pct > 0.0)
            .max_by(|a, b| a.share_pct.total_cmp(&b.share_pct))
    }
}

/// Everything the CLI renders for one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub generated_at: DateTime<Utc>,
    pub filled_input: AssessmentInput,
    pub result: AssessmentResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<ImpactBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<MaterialFlow>,
}

pub(crate) fn round2(value: f64) -> f64 {
    // Half-up, matching the rounding the web form displays.
    (value * 100.0 + 0.5).floor() / 100.0
}

#[cfg(test)]
mod tests {
    use super::{round2, AssessmentInput, AssessmentResult, Hotspot, HotspotSource};
    use crate::reference::Material;

    #[test]
    fn deserializes_web_form_payload() {
        let payload = r#"{
            "product_name": "Al Cable",
            "metal": "aluminum",
            "functional_unit_kg": 1000,
            "composition": [{"component": "Aluminium", "percent": 100}],
            "route": {
                "route": "primary",
                "plant_yield_pct": 85,
                "energy": {
                    "electricity_kwh_per_t": null,
                    "grid_region": "EU",
                    "onsite_renewables_pct": 0
                },
                "transport_inbound": [{"mode": "sea", "distance_km": 500}]
            }
        }"#;
        let input: AssessmentInput = serde_json::from_str(payload).expect("valid payload");
        assert_eq!(input.material, Material::Aluminum);
        assert!(input.route.energy.electricity_kwh_per_t.is_none());
        assert!(input.route.energy.fuel_mix_pct.is_none());
        assert_eq!(input.route.transport_inbound.len(), 1);
        assert!(input.route.transport_inbound[0].mass_tonnes.is_none());
        assert!((input.tonnes() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn rounds_half_up_to_two_decimals() {
        assert_eq!(round2(336.03408), 336.03);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.12);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn dominant_hotspot_ignores_zero_shares() {
        let empty = AssessmentResult {
            gwp_kgco2e: 0.0,
            energy_mj: 0.0,
            water_m3: 0.0,
            hotspots: HotspotSource::ALL
                .into_iter()
                .map(|name| Hotspot {
                    name,
                    share_pct: 0.0,
                })
                .collect(),
        };
        assert!(empty.dominant_hotspot().is_none());
        assert_eq!(empty.share_pct(HotspotSource::Fuels), 0.0);
    }
}
