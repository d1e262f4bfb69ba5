use anyhow::Result;

use crate::assessment::{AssessmentReport, ReadinessReport};
use crate::reference::RouteDefaults;

pub fn report_to_csv(report: &AssessmentReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["metric", "value", "unit"])?;
    let result = &report.result;
    writer.write_record([
        "gwp".to_string(),
        format!("{:.2}", result.gwp_kgco2e),
        "kg CO2e".to_string(),
    ])?;
    writer.write_record([
        "energy".to_string(),
        format!("{:.2}", result.energy_mj),
        "MJ".to_string(),
    ])?;
    writer.write_record([
        "water".to_string(),
        format!("{:.2}", result.water_m3),
        "m3".to_string(),
    ])?;
    for hotspot in &result.hotspots {
        writer.write_record([
            format!("share_{}", hotspot.name.to_string().to_lowercase()),
            format!("{:.2}", hotspot.share_pct),
            "%".to_string(),
        ])?;
    }
    if let Some(flow) = &report.flow {
        writer.write_record([
            "feed".to_string(),
            format!("{:.3}", flow.feed_tonnes),
            "t".to_string(),
        ])?;
        writer.write_record([
            "scrap_feed".to_string(),
            format!("{:.3}", flow.scrap_feed_tonnes),
            "t".to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn readiness_to_csv(report: &ReadinessReport) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record(["step", "message"])?;
    for issue in &report.issues {
        writer.write_record([issue.step.to_string(), issue.message.clone()])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

pub fn reference_to_csv(rows: &[RouteDefaults]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(vec![]);
    writer.write_record([
        "material",
        "route",
        "electricity_kwh_per_t",
        "natural_gas_pct",
        "coal_pct",
        "oil_pct",
        "lpg_pct",
        "other_pct",
        "plant_yield_pct",
        "recycled_content_pct",
        "byproduct_credit_pct",
        "water_m3_per_t",
    ])?;
    for row in rows {
        let mix = &row.fuel_mix_pct;
        writer.write_record([
            row.material.as_slug().to_string(),
            row.route.to_string(),
            row.electricity_kwh_per_t.to_string(),
            mix.natural_gas.to_string(),
            mix.coal.to_string(),
            mix.oil.to_string(),
            mix.lpg.to_string(),
            mix.other.to_string(),
            row.plant_yield_pct.to_string(),
            row.recycled_content_pct.to_string(),
            row.byproduct_credit_pct.to_string(),
            row.water_m3_per_t.to_string(),
        ])?;
    }
    let data = writer.into_inner()?;
    Ok(String::from_utf8_lossy(&data).to_string())
}

#[cfg(test)]
mod tests {
    use super::{reference_to_csv, report_to_csv};
    use crate::assessment::demo::demo_input;
    use crate::assessment::run_assessment;
    use crate::reference::{Material, ReferenceTables};

    #[test]
    fn report_csv_has_one_row_per_metric() {
        let report = run_assessment(ReferenceTables::builtin(), &demo_input(Material::Steel), false)
            .expect("steel is covered");
        let csv = report_to_csv(&report).expect("csv");
        let lines = csv.lines().collect::<Vec<_>>();
        assert_eq!(lines[0], "metric,value,unit");
        assert_eq!(lines[1], "gwp,1131.33,kg CO2e");
        assert_eq!(lines.len(), 7);
        assert!(lines.iter().any(|l| l.starts_with("share_transport,")));
    }

    #[test]
    fn reference_csv_lists_three_routes() {
        let rows = ReferenceTables::builtin()
            .material_defaults(Material::Copper)
            .expect("copper is covered");
        let csv = reference_to_csv(&rows).expect("csv");
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.contains("copper,secondary,400,55,20,15,5,5,95,90,3,1"));
    }
}
