use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::assessment::{round2, AssessmentInput, CompositionPart};
use crate::reference::FuelMix;

pub const PERCENT_SUM_TOLERANCE: f64 = 0.1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PercentPart {
    pub label: String,
    pub value: f64,
}

impl PercentPart {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PercentSumCheck {
    pub ok: bool,
    /// Sum of the parts, rounded to two decimals.
    pub total: f64,
}

pub fn validate_percent_sum(parts: &[PercentPart]) -> PercentSumCheck {
    let total: f64 = parts.iter().map(|p| p.value).sum();
    PercentSumCheck {
        ok: (total - 100.0).abs() <= PERCENT_SUM_TOLERANCE,
        total: round2(total),
    }
}

pub fn validate_composition(parts: &[CompositionPart]) -> PercentSumCheck {
    let parts = parts
        .iter()
        .map(|p| PercentPart::new(p.component.clone(), p.percent))
        .collect::<Vec<_>>();
    validate_percent_sum(&parts)
}

pub fn validate_fuel_mix(mix: &FuelMix) -> PercentSumCheck {
    let parts = mix
        .shares()
        .map(|(category, value)| PercentPart::new(category.label(), value))
        .collect::<Vec<_>>();
    validate_percent_sum(&parts)
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Product,
    Route,
    Energy,
    Transport,
    Review,
}

impl Display for WizardStep {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let display = match self {
            Self::Product => "Product & Composition",
            Self::Route => "Production Route",
            Self::Energy => "Energy Profile",
            Self::Transport => "Transport",
            Self::Review => "Review",
        };
        write!(f, "{display}")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessIssue {
    pub step: WizardStep,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReadinessReport {
    pub composition: PercentSumCheck,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_mix: Option<PercentSumCheck>,
    pub issues: Vec<ReadinessIssue>,
}

impl ReadinessReport {
    pub fn is_ready(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues_for(&self, step: WizardStep) -> impl Iterator<Item = &ReadinessIssue> {
        self.issues.iter().filter(move |i| i.step == step)
    }
}

/// Step gates a form applies before letting a user run the assessment.
/// The engine itself computes on whatever it is given.
pub fn check_readiness(input: &AssessmentInput) -> ReadinessReport {
    let mut issues = Vec::new();
    let mut push = |step: WizardStep, message: String| issues.push(ReadinessIssue { step, message });

    if input.product_name.trim().is_empty() {
        push(WizardStep::Product, "product name is empty".to_string());
    }
    if input.composition.is_empty() {
        push(WizardStep::Product, "composition has no parts".to_string());
    }
    for (idx, part) in input.composition.iter().enumerate() {
        if part.component.trim().is_empty() {
            push(
                WizardStep::Product,
                format!("composition part {} has no name", idx + 1),
            );
        }
        if part.percent <= 0.0 {
            push(
                WizardStep::Product,
                format!(
                    "composition part {} has a non-positive share ({})",
                    idx + 1,
                    part.percent
                ),
            );
        }
    }

    let plant_yield = input.route.plant_yield_pct;
    if !(plant_yield > 0.0 && plant_yield <= 100.0) {
        push(
            WizardStep::Route,
            format!("plant yield {plant_yield}% is outside (0, 100]"),
        );
    }

    // The engine computes on an all-zero mix; this gate still rejects it.
    let mix = input.route.energy.fuel_mix_pct.as_ref();
    match mix {
        None => push(
            WizardStep::Energy,
            "fuel mix is unset; fill missing data to apply route defaults".to_string(),
        ),
        Some(mix) if !mix.shares().any(|(_, share)| share > 0.0) => push(
            WizardStep::Energy,
            "fuel mix has no positive share".to_string(),
        ),
        Some(_) => {}
    }
    let fuel_mix = mix.map(validate_fuel_mix);

    let composition = validate_composition(&input.composition);
    if !composition.ok {
        push(
            WizardStep::Review,
            format!("composition sums to {}%, expected 100%", composition.total),
        );
    }

    ReadinessReport {
        composition,
        fuel_mix,
        issues,
    }
}
