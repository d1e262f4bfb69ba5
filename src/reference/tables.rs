use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::ConfigurationError;
use crate::reference::{FuelCategory, FuelMix, GridRegion, Material, RouteKind, TransportMode};

/// kWh to MJ.
pub const KWH_TO_MJ: f64 = 3.6;

/// Flat emission factor applied to every fuel category (kg CO2e per MJ).
// Per-fuel factors would be more faithful; the reference data collapses them.
pub const FUEL_EMISSION_FACTOR_KG_PER_MJ: f64 = 0.08;

/// Process energy per tonne of product for a full (100%) share of a fuel.
pub fn process_energy_mj_per_t(category: FuelCategory) -> f64 {
    match category {
        FuelCategory::NaturalGas => 45.0,
        FuelCategory::Coal => 35.0,
        FuelCategory::Oil => 40.0,
        FuelCategory::Lpg => 50.0,
        FuelCategory::Other => 42.0,
    }
}

static BUILTIN: Lazy<ReferenceTables> = Lazy::new(ReferenceTables::standard);

type RouteTable<T> = BTreeMap<(Material, RouteKind), T>;

/// Default and factor tables. Material-keyed tables only hold canonical
/// materials; every lookup canonicalizes first.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    pub(crate) electricity_kwh_per_t: RouteTable<f64>,
    pub(crate) fuel_mix_pct: RouteTable<FuelMix>,
    pub(crate) plant_yield_pct: RouteTable<f64>,
    pub(crate) recycled_content_pct: RouteTable<f64>,
    pub(crate) byproduct_credit_pct: RouteTable<f64>,
    pub(crate) water_m3_per_t: RouteTable<f64>,
    pub(crate) grid_kg_per_kwh: BTreeMap<GridRegion, f64>,
    pub(crate) transport_kg_per_tkm: BTreeMap<TransportMode, f64>,
    pub(crate) renewables_pct: BTreeMap<GridRegion, f64>,
}

/// Every default the tables hold for one (material, route) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteDefaults {
    pub material: Material,
    pub route: RouteKind,
    pub electricity_kwh_per_t: f64,
    pub fuel_mix_pct: FuelMix,
    pub plant_yield_pct: f64,
    pub recycled_content_pct: f64,
    pub byproduct_credit_pct: f64,
    pub water_m3_per_t: f64,
}

impl ReferenceTables {
    /// Process-wide tables, built on first use and never mutated.
    pub fn builtin() -> &'static ReferenceTables {
        &BUILTIN
    }

    pub fn standard() -> Self {
        use Material::{Aluminium, Calcium, Copper, Lithium, Steel};

        let mut electricity = RouteTable::new();
        per_route(&mut electricity, Aluminium, [14_500.0, 800.0, 7_650.0]);
        per_route(&mut electricity, Copper, [2_500.0, 400.0, 1_450.0]);
        per_route(&mut electricity, Steel, [500.0, 600.0, 550.0]);
        per_route(&mut electricity, Calcium, [800.0, 200.0, 500.0]);
        per_route(&mut electricity, Lithium, [2_000.0, 100.0, 1_050.0]);

        // Aluminium rows are stored as fractions rather than percentages.
        let mut fuel_mix = RouteTable::new();
        per_route(
            &mut fuel_mix,
            Aluminium,
            [
                FuelMix::new(0.6, 0.2, 0.1, 0.05, 0.05),
                FuelMix::new(0.8, 0.1, 0.05, 0.02, 0.03),
                FuelMix::new(0.7, 0.15, 0.07, 0.04, 0.04),
            ],
        );
        per_route(
            &mut fuel_mix,
            Copper,
            [
                FuelMix::new(35.0, 30.0, 20.0, 10.0, 5.0),
                FuelMix::new(55.0, 20.0, 15.0, 5.0, 5.0),
                FuelMix::new(45.0, 25.0, 17.0, 8.0, 5.0),
            ],
        );
        per_route(
            &mut fuel_mix,
            Steel,
            [
                FuelMix::new(25.0, 50.0, 15.0, 5.0, 5.0),
                FuelMix::new(40.0, 30.0, 20.0, 5.0, 5.0),
                FuelMix::new(32.0, 40.0, 17.0, 6.0, 5.0),
            ],
        );
        per_route(
            &mut fuel_mix,
            Calcium,
            [
                FuelMix::new(30.0, 40.0, 20.0, 5.0, 5.0),
                FuelMix::new(50.0, 20.0, 20.0, 5.0, 5.0),
                FuelMix::new(40.0, 30.0, 20.0, 5.0, 5.0),
            ],
        );
        per_route(
            &mut fuel_mix,
            Lithium,
            [
                FuelMix::new(20.0, 10.0, 10.0, 5.0, 55.0),
                FuelMix::new(30.0, 5.0, 5.0, 5.0, 55.0),
                FuelMix::new(25.0, 7.5, 7.5, 5.0, 55.0),
            ],
        );

        let mut plant_yield = RouteTable::new();
        per_route(&mut plant_yield, Aluminium, [85.0, 92.0, 88.0]);
        per_route(&mut plant_yield, Copper, [88.0, 95.0, 91.0]);
        per_route(&mut plant_yield, Steel, [90.0, 96.0, 93.0]);
        per_route(&mut plant_yield, Calcium, [75.0, 88.0, 81.0]);
        per_route(&mut plant_yield, Lithium, [60.0, 95.0, 77.0]);

        let mut recycled = RouteTable::new();
        per_route(&mut recycled, Aluminium, [0.0, 95.0, 40.0]);
        per_route(&mut recycled, Copper, [0.0, 90.0, 35.0]);
        per_route(&mut recycled, Steel, [0.0, 85.0, 30.0]);
        per_route(&mut recycled, Calcium, [0.0, 70.0, 25.0]);
        per_route(&mut recycled, Lithium, [0.0, 80.0, 35.0]);

        let mut byproduct = RouteTable::new();
        per_route(&mut byproduct, Aluminium, [5.0, 2.0, 3.0]);
        per_route(&mut byproduct, Copper, [8.0, 3.0, 5.0]);
        per_route(&mut byproduct, Steel, [3.0, 1.0, 2.0]);
        per_route(&mut byproduct, Calcium, [2.0, 1.0, 1.5]);
        per_route(&mut byproduct, Lithium, [1.0, 0.5, 0.75]);

        let mut water = RouteTable::new();
        per_route(&mut water, Aluminium, [12.0, 2.0, 7.0]);
        per_route(&mut water, Copper, [8.0, 1.0, 4.0]);
        per_route(&mut water, Steel, [6.0, 1.0, 3.0]);
        per_route(&mut water, Calcium, [5.0, 1.0, 3.0]);
        per_route(&mut water, Lithium, [15.0, 2.0, 8.0]);

        let grid_kg_per_kwh = BTreeMap::from([
            (GridRegion::India, 0.82),
            (GridRegion::EuropeanUnion, 0.28),
            (GridRegion::UnitedStates, 0.39),
            (GridRegion::China, 0.58),
            (GridRegion::Other, 0.45),
        ]);

        let transport_kg_per_tkm = BTreeMap::from([
            (TransportMode::Truck, 0.12),
            (TransportMode::Rail, 0.03),
            (TransportMode::Sea, 0.01),
            (TransportMode::Air, 0.85),
        ]);

        let renewables_pct = BTreeMap::from([
            (GridRegion::India, 15.0),
            (GridRegion::EuropeanUnion, 35.0),
            (GridRegion::UnitedStates, 20.0),
            (GridRegion::China, 25.0),
            (GridRegion::Other, 22.0),
        ]);

        Self {
            electricity_kwh_per_t: electricity,
            fuel_mix_pct: fuel_mix,
            plant_yield_pct: plant_yield,
            recycled_content_pct: recycled,
            byproduct_credit_pct: byproduct,
            water_m3_per_t: water,
            grid_kg_per_kwh,
            transport_kg_per_tkm,
            renewables_pct,
        }
    }

    pub fn electricity_kwh_per_t(
        &self,
        material: Material,
        route: RouteKind,
    ) -> Result<f64, ConfigurationError> {
        lookup(&self.electricity_kwh_per_t, "electricity", material, route)
    }

    pub fn fuel_mix_pct(
        &self,
        material: Material,
        route: RouteKind,
    ) -> Result<FuelMix, ConfigurationError> {
        lookup(&self.fuel_mix_pct, "fuel_mix", material, route)
    }

    pub fn plant_yield_pct(
        &self,
        material: Material,
        route: RouteKind,
    ) -> Result<f64, ConfigurationError> {
        lookup(&self.plant_yield_pct, "plant_yield", material, route)
    }

    pub fn recycled_content_pct(
        &self,
        material: Material,
        route: RouteKind,
    ) -> Result<f64, ConfigurationError> {
        lookup(&self.recycled_content_pct, "recycled_content", material, route)
    }

    pub fn byproduct_credit_pct(
        &self,
        material: Material,
        route: RouteKind,
    ) -> Result<f64, ConfigurationError> {
        lookup(&self.byproduct_credit_pct, "byproduct_credit", material, route)
    }

    pub fn water_m3_per_t(
        &self,
        material: Material,
        route: RouteKind,
    ) -> Result<f64, ConfigurationError> {
        lookup(&self.water_m3_per_t, "water", material, route)
    }

    pub fn grid_kg_per_kwh(&self, region: GridRegion) -> Result<f64, ConfigurationError> {
        self.grid_kg_per_kwh
            .get(&region)
            .copied()
            .ok_or(ConfigurationError::MissingGridRegion(region))
    }

    pub fn transport_kg_per_tkm(&self, mode: TransportMode) -> Result<f64, ConfigurationError> {
        self.transport_kg_per_tkm
            .get(&mode)
            .copied()
            .ok_or(ConfigurationError::MissingTransportMode(mode))
    }

    /// Typical on-site renewables share for a region. Informational only:
    /// the defaulting pass never applies it.
    pub fn typical_renewables_pct(&self, region: GridRegion) -> Option<f64> {
        self.renewables_pct.get(&region).copied()
    }

    pub fn route_defaults(
        &self,
        material: Material,
        route: RouteKind,
    ) -> Result<RouteDefaults, ConfigurationError> {
        Ok(RouteDefaults {
            material: material.canonical(),
            route,
            electricity_kwh_per_t: self.electricity_kwh_per_t(material, route)?,
            fuel_mix_pct: self.fuel_mix_pct(material, route)?,
            plant_yield_pct: self.plant_yield_pct(material, route)?,
            recycled_content_pct: self.recycled_content_pct(material, route)?,
            byproduct_credit_pct: self.byproduct_credit_pct(material, route)?,
            water_m3_per_t: self.water_m3_per_t(material, route)?,
        })
    }

    pub fn material_defaults(
        &self,
        material: Material,
    ) -> Result<Vec<RouteDefaults>, ConfigurationError> {
        RouteKind::ALL
            .into_iter()
            .map(|route| self.route_defaults(material, route))
            .collect()
    }
}

fn per_route<T>(table: &mut RouteTable<T>, material: Material, rows: [T; 3]) {
    for (route, row) in RouteKind::ALL.into_iter().zip(rows) {
        table.insert((material, route), row);
    }
}

fn lookup<T: Copy>(
    table: &RouteTable<T>,
    name: &'static str,
    material: Material,
    route: RouteKind,
) -> Result<T, ConfigurationError> {
    let canonical = material.canonical();
    table
        .get(&(canonical, route))
        .copied()
        .ok_or(ConfigurationError::MissingMaterialRow {
            table: name,
            material: canonical,
            route,
        })
}

#[cfg(test)]
mod tests {
    use crate::error::ConfigurationError;
    use crate::reference::{GridRegion, Material, ReferenceTables, RouteKind, TransportMode};

    #[test]
    fn builtin_tables_cover_every_material_and_route() {
        let tables = ReferenceTables::builtin();
        for material in Material::ALL {
            let rows = tables
                .material_defaults(material)
                .expect("every material should be covered");
            assert_eq!(rows.len(), 3);
        }
        for region in GridRegion::ALL {
            assert!(tables.grid_kg_per_kwh(region).is_ok());
            assert!(tables.typical_renewables_pct(region).is_some());
        }
        for mode in TransportMode::ALL {
            assert!(tables.transport_kg_per_tkm(mode).is_ok());
        }
    }

    #[test]
    fn synonym_resolves_to_identical_rows() {
        let tables = ReferenceTables::builtin();
        for route in RouteKind::ALL {
            let british = tables
                .route_defaults(Material::Aluminium, route)
                .expect("aluminium row");
            let american = tables
                .route_defaults(Material::Aluminum, route)
                .expect("aluminum row");
            assert_eq!(british, american);
        }
    }

    #[test]
    fn known_factors_match_reference_values() {
        let tables = ReferenceTables::builtin();
        assert_eq!(tables.grid_kg_per_kwh(GridRegion::EuropeanUnion), Ok(0.28));
        assert_eq!(tables.grid_kg_per_kwh(GridRegion::India), Ok(0.82));
        assert_eq!(tables.transport_kg_per_tkm(TransportMode::Sea), Ok(0.01));
        assert_eq!(
            tables.electricity_kwh_per_t(Material::Copper, RouteKind::Secondary),
            Ok(400.0)
        );
        assert_eq!(
            tables.water_m3_per_t(Material::Steel, RouteKind::Primary),
            Ok(6.0)
        );
    }

    #[test]
    fn missing_row_is_a_configuration_error() {
        let mut tables = ReferenceTables::standard();
        tables
            .water_m3_per_t
            .retain(|(material, _), _| *material != Material::Lithium);
        let err = tables
            .water_m3_per_t(Material::Lithium, RouteKind::Hybrid)
            .expect_err("lithium water row was removed");
        assert_eq!(
            err,
            ConfigurationError::MissingMaterialRow {
                table: "water",
                material: Material::Lithium,
                route: RouteKind::Hybrid,
            }
        );

        tables.grid_kg_per_kwh.remove(&GridRegion::China);
        assert_eq!(
            tables.grid_kg_per_kwh(GridRegion::China),
            Err(ConfigurationError::MissingGridRegion(GridRegion::China))
        );

        tables.transport_kg_per_tkm.remove(&TransportMode::Rail);
        assert_eq!(
            tables.transport_kg_per_tkm(TransportMode::Rail),
            Err(ConfigurationError::MissingTransportMode(TransportMode::Rail))
        );
        assert_eq!(tables.transport_kg_per_tkm(TransportMode::Truck), Ok(0.12));
    }
}
