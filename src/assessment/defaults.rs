use tracing::debug;

use crate::assessment::AssessmentInput;
use crate::error::ConfigurationError;
use crate::reference::ReferenceTables;

/// Fills every unknown field from the built-in reference tables.
pub fn estimate_missing(input: &AssessmentInput) -> Result<AssessmentInput, ConfigurationError> {
    estimate_missing_with(ReferenceTables::builtin(), input)
}

/// Returns a filled copy of `input`; fields that are already set pass
/// through untouched, so applying this twice equals applying it once.
pub fn estimate_missing_with(
    tables: &ReferenceTables,
    input: &AssessmentInput,
) -> Result<AssessmentInput, ConfigurationError> {
    let material = input.material;
    let route_kind = input.route.route;
    let mut filled = input.clone();
    let route = &mut filled.route;
    let energy = &mut route.energy;

    if energy.electricity_kwh_per_t.is_none() {
        let value = tables.electricity_kwh_per_t(material, route_kind)?;
        debug!(%material, route = %route_kind, value, "defaulted electricity intensity");
        energy.electricity_kwh_per_t = Some(value);
    }
    if energy.fuel_mix_pct.is_none() {
        let mix = tables.fuel_mix_pct(material, route_kind)?;
        debug!(%material, route = %route_kind, ?mix, "defaulted fuel mix");
        energy.fuel_mix_pct = Some(mix);
    }
    // Zero and absent are indistinguishable for the efficiency bonus; no
    // table supplies a value, so it settles at zero.
    energy.efficiency_bonus_pct = Some(energy.efficiency_bonus_pct.unwrap_or(0.0));

    if route.recycled_content_pct.is_none() {
        let value = tables.recycled_content_pct(material, route_kind)?;
        debug!(%material, route = %route_kind, value, "defaulted recycled content");
        route.recycled_content_pct = Some(value);
    }
    if route.byproduct_credit_pct.is_none() {
        let value = tables.byproduct_credit_pct(material, route_kind)?;
        debug!(%material, route = %route_kind, value, "defaulted byproduct credit");
        route.byproduct_credit_pct = Some(value);
    }

    Ok(filled)
}
