use serde::{Deserialize, Serialize};

use crate::assessment::defaults::estimate_missing_with;
use crate::assessment::AssessmentInput;
use crate::error::ConfigurationError;
use crate::reference::ReferenceTables;

/// Mass balance (tonnes) across the plant, as drawn in the flow diagram.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MaterialFlow {
    pub feed_tonnes: f64,
    pub virgin_feed_tonnes: f64,
    pub scrap_feed_tonnes: f64,
    pub product_tonnes: f64,
    pub process_loss_tonnes: f64,
    pub byproduct_credit_tonnes: f64,
}

impl MaterialFlow {
    pub fn loop_pct(&self) -> f64 {
        if self.feed_tonnes == 0.0 {
            return 0.0;
        }
        self.scrap_feed_tonnes / self.feed_tonnes * 100.0
    }
}

pub fn material_flow(input: &AssessmentInput) -> Result<Option<MaterialFlow>, ConfigurationError> {
    material_flow_with(ReferenceTables::builtin(), input)
}

/// `None` when the plant yield is not positive.
pub fn material_flow_with(
    tables: &ReferenceTables,
    input: &AssessmentInput,
) -> Result<Option<MaterialFlow>, ConfigurationError> {
    let filled = estimate_missing_with(tables, input)?;
    let route = &filled.route;
    if route.plant_yield_pct <= 0.0 {
        return Ok(None);
    }
    let product = filled.tonnes();
    let feed = product / (route.plant_yield_pct / 100.0);
    let scrap = feed * route.recycled_content_pct.unwrap_or(0.0) / 100.0;
    Ok(Some(MaterialFlow {
        feed_tonnes: feed,
        virgin_feed_tonnes: feed - scrap,
        scrap_feed_tonnes: scrap,
        product_tonnes: product,
        process_loss_tonnes: feed - product,
        byproduct_credit_tonnes: product * route.byproduct_credit_pct.unwrap_or(0.0) / 100.0,
    }))
}
