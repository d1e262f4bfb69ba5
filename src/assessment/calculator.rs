use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::assessment::defaults::estimate_missing_with;
use crate::assessment::flows::material_flow_with;
use crate::assessment::{
    round2, AssessmentInput, AssessmentReport, AssessmentResult, Hotspot, HotspotSource,
};
use crate::error::ConfigurationError;
use crate::reference::{
    process_energy_mj_per_t, ReferenceTables, FUEL_EMISSION_FACTOR_KG_PER_MJ, KWH_TO_MJ,
};

/// Unrounded per-contributor quantities behind an [`AssessmentResult`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ImpactBreakdown {
    pub tonnes: f64,
    pub electricity_kwh: f64,
    pub electricity_kgco2e: f64,
    pub fuel_mj: f64,
    pub fuel_kgco2e: f64,
    pub transport_tkm: f64,
    pub transport_kgco2e: f64,
    pub water_m3: f64,
}

impl ImpactBreakdown {
    pub fn gwp_kgco2e(&self) -> f64 {
        self.electricity_kgco2e + self.fuel_kgco2e + self.transport_kgco2e
    }

    pub fn energy_mj(&self) -> f64 {
        self.electricity_kwh * KWH_TO_MJ + self.fuel_mj
    }

    pub fn contribution(&self, source: HotspotSource) -> f64 {
        match source {
            HotspotSource::Electricity => self.electricity_kgco2e,
            HotspotSource::Fuels => self.fuel_kgco2e,
            HotspotSource::Transport => self.transport_kgco2e,
        }
    }

    /// Shares of total GWP in percent; all zero when nothing was emitted
    /// or the total is not finite.
    pub fn hotspots(&self) -> Vec<Hotspot> {
        let total = self.gwp_kgco2e();
        HotspotSource::ALL
            .into_iter()
            .map(|name| {
                let share_pct = if total == 0.0 || !total.is_finite() {
                    0.0
                } else {
                    round2(self.contribution(name) / total * 100.0)
                };
                Hotspot { name, share_pct }
            })
            .collect()
    }

    /// Rounded totals. Shares follow the unrounded total, so a GWP that
    /// rounds to 0.00 can still carry shares summing to 100.
    pub fn to_result(&self) -> AssessmentResult {
        let gwp = self.gwp_kgco2e();
        if gwp == 0.0 {
            warn!("total GWP is zero; hotspot shares reported as 0");
        } else if !gwp.is_finite() {
            warn!(gwp, "total GWP is not finite; hotspot shares reported as 0");
        }
        AssessmentResult {
            gwp_kgco2e: round2(gwp),
            energy_mj: round2(self.energy_mj()),
            water_m3: round2(self.water_m3),
            hotspots: self.hotspots(),
        }
    }
}

/// Fills missing data, then computes GWP, energy, water and hotspot shares.
pub fn calc_phase1(input: &AssessmentInput) -> Result<AssessmentResult, ConfigurationError> {
    calc_phase1_with(ReferenceTables::builtin(), input)
}

pub fn calc_phase1_with(
    tables: &ReferenceTables,
    input: &AssessmentInput,
) -> Result<AssessmentResult, ConfigurationError> {
    Ok(calc_breakdown_with(tables, input)?.to_result())
}

pub fn calc_breakdown(input: &AssessmentInput) -> Result<ImpactBreakdown, ConfigurationError> {
    calc_breakdown_with(ReferenceTables::builtin(), input)
}

pub fn calc_breakdown_with(
    tables: &ReferenceTables,
    input: &AssessmentInput,
) -> Result<ImpactBreakdown, ConfigurationError> {
    let filled = estimate_missing_with(tables, input)?;
    breakdown_of_filled(tables, &filled)
}

fn breakdown_of_filled(
    tables: &ReferenceTables,
    filled: &AssessmentInput,
) -> Result<ImpactBreakdown, ConfigurationError> {
    let tonnes = filled.tonnes();
    let energy = &filled.route.energy;

    let grid_factor = tables.grid_kg_per_kwh(energy.grid_region)?;
    let electricity_kwh = energy.electricity_kwh_per_t.unwrap_or(0.0) * tonnes;
    let electricity_kgco2e = electricity_kwh * grid_factor;

    let fuel_mj = energy
        .fuel_mix_pct
        .map(|mix| {
            mix.shares()
                .map(|(category, pct)| pct / 100.0 * process_energy_mj_per_t(category) * tonnes)
                .sum::<f64>()
        })
        .unwrap_or(0.0);
    let fuel_kgco2e = fuel_mj * FUEL_EMISSION_FACTOR_KG_PER_MJ;

    let mut transport_tkm = 0.0;
    let mut transport_kgco2e = 0.0;
    for leg in &filled.route.transport_inbound {
        let mass = leg.mass_tonnes.unwrap_or(tonnes);
        let tkm = leg.distance_km * mass;
        transport_tkm += tkm;
        transport_kgco2e += tkm * tables.transport_kg_per_tkm(leg.mode)?;
    }

    let water_m3 = tables.water_m3_per_t(filled.material, filled.route.route)? * tonnes;

    let breakdown = ImpactBreakdown {
        tonnes,
        electricity_kwh,
        electricity_kgco2e,
        fuel_mj,
        fuel_kgco2e,
        transport_tkm,
        transport_kgco2e,
        water_m3,
    };
    debug!(
        material = %filled.material,
        route = %filled.route.route,
        gwp = breakdown.gwp_kgco2e(),
        energy = breakdown.energy_mj(),
        water = water_m3,
        "computed impact breakdown"
    );
    Ok(breakdown)
}

/// One full run: fill, compute, and optionally attach breakdown and flow.
pub fn run_assessment(
    tables: &ReferenceTables,
    input: &AssessmentInput,
    detail: bool,
) -> Result<AssessmentReport, ConfigurationError> {
    let filled = estimate_missing_with(tables, input)?;
    let breakdown = breakdown_of_filled(tables, &filled)?;
    let flow = if detail {
        material_flow_with(tables, &filled)?
    } else {
        None
    };
    Ok(AssessmentReport {
        generated_at: Utc::now(),
        result: breakdown.to_result(),
        breakdown: detail.then_some(breakdown),
        flow,
        filled_input: filled,
    })
}

#[cfg(test)]
mod tests {
    use super::{calc_breakdown, calc_phase1, calc_phase1_with, run_assessment};
    use crate::assessment::demo::demo_input;
    use crate::assessment::{
        AssessmentInput, CompositionPart, EnergyProfile, HotspotSource, ProductionRoute,
        TransportLeg,
    };
    use crate::error::ConfigurationError;
    use crate::reference::{
        FuelMix, GridRegion, Material, ReferenceTables, RouteKind, TransportMode,
    };

    fn input(material: Material, route: RouteKind, kg: f64) -> AssessmentInput {
        AssessmentInput {
            product_name: "Plate".to_string(),
            material,
            functional_unit_kg: kg,
            composition: vec![CompositionPart::new("Base", 100.0)],
            route: ProductionRoute {
                route,
                plant_yield_pct: 90.0,
                recycled_content_pct: None,
                byproduct_credit_pct: None,
                energy: EnergyProfile {
                    electricity_kwh_per_t: None,
                    fuel_mix_pct: None,
                    grid_region: GridRegion::EuropeanUnion,
                    onsite_renewables_pct: 0.0,
                    efficiency_bonus_pct: None,
                },
                transport_inbound: Vec::new(),
            },
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn eu_primary_steel_with_defaulted_fuels() {
        let mut steel = input(Material::Steel, RouteKind::Primary, 1000.0);
        steel.route.energy.electricity_kwh_per_t = Some(1200.0);

        // electricity: 1200 kWh * 0.28 = 336 kg
        // fuels: (.25*45 + .50*35 + .15*40 + .05*50 + .05*42) MJ = 39.35 MJ * 0.08 = 3.148 kg
        let result = calc_phase1(&steel).expect("steel is covered");
        assert!(close(result.gwp_kgco2e, 339.15), "{result:?}");
        assert!(close(result.energy_mj, 4359.35), "{result:?}");
        assert!(close(result.water_m3, 6.0), "{result:?}");
        assert!(close(result.share_pct(HotspotSource::Electricity), 99.07));
        assert!(close(result.share_pct(HotspotSource::Fuels), 0.93));
        assert!(close(result.share_pct(HotspotSource::Transport), 0.0));
    }

    #[test]
    fn sea_leg_without_mass_uses_functional_unit() {
        let mut copper = input(Material::Copper, RouteKind::Secondary, 2000.0);
        copper.route.energy.electricity_kwh_per_t = Some(0.0);
        copper.route.energy.fuel_mix_pct = Some(FuelMix::default());
        copper
            .route
            .transport_inbound
            .push(TransportLeg::new(TransportMode::Sea, 500.0));

        let breakdown = calc_breakdown(&copper).expect("copper is covered");
        assert!(close(breakdown.transport_tkm, 1000.0));
        assert!(close(breakdown.transport_kgco2e, 500.0 * 2.0 * 0.01));

        let result = calc_phase1(&copper).expect("copper is covered");
        assert!(close(result.gwp_kgco2e, 10.0));
        assert!(close(result.share_pct(HotspotSource::Transport), 100.0));
        assert!(close(result.water_m3, 2.0));
    }

    #[test]
    fn explicit_leg_mass_overrides_functional_unit() {
        let mut copper = input(Material::Copper, RouteKind::Secondary, 2000.0);
        copper.route.energy.electricity_kwh_per_t = Some(0.0);
        copper.route.energy.fuel_mix_pct = Some(FuelMix::default());
        copper.route.transport_inbound = vec![
            TransportLeg::new(TransportMode::Truck, 100.0).with_mass(5.0),
            TransportLeg::new(TransportMode::Air, 10.0),
        ];
        let breakdown = calc_breakdown(&copper).expect("copper is covered");
        assert!(close(breakdown.transport_tkm, 500.0 + 20.0));
        assert!(close(breakdown.transport_kgco2e, 500.0 * 0.12 + 20.0 * 0.85));
    }

    #[test]
    fn explicit_zeros_give_zero_gwp_and_zero_shares() {
        // Zeros are explicit values, so the defaulting pass leaves them.
        let mut aluminium = input(Material::Aluminium, RouteKind::Primary, 1000.0);
        aluminium.route.energy.electricity_kwh_per_t = Some(0.0);
        aluminium.route.energy.fuel_mix_pct = Some(FuelMix::default());

        let result = calc_phase1(&aluminium).expect("aluminium is covered");
        assert_eq!(result.gwp_kgco2e, 0.0);
        assert_eq!(result.energy_mj, 0.0);
        assert_eq!(result.hotspots.len(), 3);
        for hotspot in &result.hotspots {
            assert_eq!(hotspot.share_pct, 0.0);
            assert!(hotspot.share_pct.is_finite());
        }
        assert!(close(result.water_m3, 12.0));
    }

    #[test]
    fn overflowing_total_gives_zero_shares_not_nan() {
        let mut aluminium = demo_input(Material::Aluminium);
        aluminium.functional_unit_kg = 1.7e308;

        let result = calc_phase1(&aluminium).expect("aluminium is covered");
        assert!(result.gwp_kgco2e.is_infinite());
        for hotspot in &result.hotspots {
            assert!(hotspot.share_pct.is_finite(), "{result:?}");
            assert_eq!(hotspot.share_pct, 0.0);
        }
    }

    #[test]
    fn tiny_gwp_rounds_to_zero_but_keeps_shares() {
        let mut steel = input(Material::Steel, RouteKind::Primary, 1000.0);
        steel.route.energy.electricity_kwh_per_t = Some(0.0);
        steel.route.energy.fuel_mix_pct = Some(FuelMix::default());
        steel
            .route
            .transport_inbound
            .push(TransportLeg::new(TransportMode::Sea, 0.4));

        // 0.4 t-km * 0.01 = 0.004 kg
        let result = calc_phase1(&steel).expect("steel is covered");
        assert_eq!(result.gwp_kgco2e, 0.0);
        assert!(close(result.share_pct(HotspotSource::Transport), 100.0));
    }

    #[test]
    fn renewables_and_efficiency_do_not_change_emissions() {
        let base = demo_input(Material::Steel);
        let mut greener = base.clone();
        greener.route.energy.onsite_renewables_pct = 80.0;
        greener.route.energy.efficiency_bonus_pct = Some(15.0);
        assert_eq!(
            calc_phase1(&base).expect("steel is covered"),
            calc_phase1(&greener).expect("steel is covered")
        );
    }

    #[test]
    fn composition_does_not_influence_results() {
        let base = demo_input(Material::Aluminium);
        let mut other = base.clone();
        other.composition = vec![CompositionPart::new("Unobtainium", 3.0)];
        assert_eq!(
            calc_phase1(&base).expect("aluminium is covered"),
            calc_phase1(&other).expect("aluminium is covered")
        );
    }

    #[test]
    fn missing_water_row_surfaces_as_configuration_error() {
        let mut tables = ReferenceTables::standard();
        tables.water_m3_per_t.clear();
        let err = calc_phase1_with(&tables, &demo_input(Material::Steel))
            .expect_err("water table is empty");
        assert!(matches!(
            err,
            ConfigurationError::MissingMaterialRow { table: "water", .. }
        ));
    }

    #[test]
    fn report_attaches_detail_only_on_request() {
        let tables = ReferenceTables::builtin();
        let input = demo_input(Material::Lithium);
        let plain = run_assessment(tables, &input, false).expect("lithium is covered");
        assert!(plain.breakdown.is_none());
        assert!(plain.flow.is_none());

        let detailed = run_assessment(tables, &input, true).expect("lithium is covered");
        assert_eq!(detailed.result, plain.result);
        let breakdown = detailed.breakdown.expect("breakdown requested");
        assert_eq!(breakdown.to_result(), detailed.result);
        assert!(detailed.flow.is_some());
        assert_eq!(detailed.filled_input.route.byproduct_credit_pct, Some(0.5));
    }
}
