use crate::assessment::{
    AssessmentInput, CompositionPart, EnergyProfile, ProductionRoute, TransportLeg,
};
use crate::config::AssessmentConfig;
use crate::reference::{FuelMix, GridRegion, Material, RouteKind, TransportMode};

/// Sample project for a material; every field is filled so it can be run
/// as-is.
pub fn demo_input(material: Material) -> AssessmentInput {
    let mut input = AssessmentInput {
        product_name: "Metal Product".to_string(),
        material,
        functional_unit_kg: 1000.0,
        composition: vec![CompositionPart::new(material.to_string(), 100.0)],
        route: ProductionRoute {
            route: RouteKind::Secondary,
            plant_yield_pct: 92.0,
            recycled_content_pct: Some(0.0),
            byproduct_credit_pct: None,
            energy: EnergyProfile {
                electricity_kwh_per_t: Some(1200.0),
                fuel_mix_pct: Some(FuelMix::new(50.0, 30.0, 10.0, 5.0, 5.0)),
                grid_region: GridRegion::India,
                onsite_renewables_pct: 0.0,
                efficiency_bonus_pct: None,
            },
            transport_inbound: vec![TransportLeg::new(TransportMode::Truck, 1200.0)],
        },
    };

    match material.canonical() {
        Material::Aluminium => {
            input.product_name = "Al Cable".to_string();
            input.composition = vec![
                CompositionPart::new("Aluminium", 98.0),
                CompositionPart::new("Magnesium", 2.0),
            ];
            input.route.recycled_content_pct = Some(60.0);
        }
        Material::Calcium => {
            input.product_name = "Calcium Carbonate Powder".to_string();
            input.composition = vec![
                CompositionPart::new("Calcium Carbonate", 95.0),
                CompositionPart::new("Magnesium Carbonate", 3.0),
                CompositionPart::new("Other Impurities", 2.0),
            ];
            input.route.recycled_content_pct = Some(25.0);
            input.route.plant_yield_pct = 81.0;
            input.route.energy.electricity_kwh_per_t = Some(500.0);
            input.route.energy.fuel_mix_pct = Some(FuelMix::new(40.0, 30.0, 20.0, 5.0, 5.0));
        }
        Material::Lithium => {
            input.product_name = "Lithium Carbonate Battery Grade".to_string();
            input.composition = vec![
                CompositionPart::new("Lithium Carbonate", 99.5),
                CompositionPart::new("Sodium", 0.3),
                CompositionPart::new("Potassium", 0.2),
            ];
            input.route.recycled_content_pct = Some(35.0);
            input.route.plant_yield_pct = 77.0;
            input.route.energy.electricity_kwh_per_t = Some(1050.0);
            input.route.energy.fuel_mix_pct = Some(FuelMix::new(25.0, 7.5, 7.5, 5.0, 55.0));
            input.route.energy.onsite_renewables_pct = 30.0;
        }
        _ => {}
    }
    input
}

/// Empty form for a material: electricity and fuel mix left unknown.
pub fn blank_input(material: Material, defaults: &AssessmentConfig) -> AssessmentInput {
    AssessmentInput {
        product_name: String::new(),
        material,
        functional_unit_kg: defaults.default_functional_unit_kg,
        composition: vec![CompositionPart::new(material.to_string(), 100.0)],
        route: ProductionRoute {
            route: defaults.default_route,
            plant_yield_pct: defaults.default_plant_yield_pct,
            recycled_content_pct: None,
            byproduct_credit_pct: None,
            energy: EnergyProfile {
                electricity_kwh_per_t: None,
                fuel_mix_pct: None,
                grid_region: defaults.default_grid_region,
                onsite_renewables_pct: 0.0,
                efficiency_bonus_pct: None,
            },
            transport_inbound: Vec::new(),
        },
    }
}
