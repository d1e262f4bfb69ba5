use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color, ContentArrangement, Row, Table};

use crate::assessment::{
    AssessmentInput, AssessmentReport, HotspotSource, ImpactBreakdown, MaterialFlow,
    ReadinessReport,
};
use crate::output::format::{
    format_co2e, format_distance, format_energy, format_number, format_pct, format_volume,
    format_weight, format_with_commas,
};
use crate::reference::RouteDefaults;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn opt_pct(value: Option<f64>) -> String {
    value
        .map(|v| format_pct(v, 1))
        .unwrap_or_else(|| "-".to_string())
}

pub fn render_report(report: &AssessmentReport) -> String {
    let input = &report.filled_input;
    let result = &report.result;

    let mut summary = new_table();
    summary.set_header(vec!["Product", "Material", "Route", "Functional Unit"]);
    summary.add_row(vec![
        input.product_name.clone(),
        format!("{} ({})", input.material, input.material.symbol()),
        input.route.route.to_string(),
        format_weight(input.functional_unit_kg, "kg", 0),
    ]);

    let mut totals = new_table();
    totals.set_header(vec!["Global Warming Potential", "Energy", "Water"]);
    totals.add_row(vec![
        format_co2e(result.gwp_kgco2e, 2),
        format_energy(result.energy_mj, 0),
        format_volume(result.water_m3, 2),
    ]);

    let dominant = result.dominant_hotspot().map(|h| h.name);
    let mut hotspots = new_table();
    hotspots.set_header(vec!["Hotspot", "Share of GWP"]);
    for hotspot in &result.hotspots {
        let share = Cell::new(format_pct(hotspot.share_pct, 2));
        let share = if Some(hotspot.name) == dominant {
            share.fg(Color::Red)
        } else {
            share
        };
        hotspots.add_row(Row::from(vec![Cell::new(hotspot.name.to_string()), share]));
    }

    let mut out = String::new();
    out.push_str(&summary.to_string());
    out.push('\n');
    out.push_str(&totals.to_string());
    out.push('\n');
    out.push_str(&hotspots.to_string());
    if let Some(breakdown) = &report.breakdown {
        out.push('\n');
        out.push_str(&render_breakdown_table(breakdown));
    }
    if let Some(flow) = &report.flow {
        out.push('\n');
        out.push_str(&render_flow_table(flow));
    }
    out
}

pub fn render_breakdown_table(breakdown: &ImpactBreakdown) -> String {
    let mut table = new_table();
    table.set_header(vec!["Contributor", "Activity", "Emissions"]);
    for source in HotspotSource::ALL {
        let activity = match source {
            HotspotSource::Electricity => {
                format!("{} kWh", format_with_commas(breakdown.electricity_kwh, 1))
            }
            HotspotSource::Fuels => format_energy(breakdown.fuel_mj, 2),
            HotspotSource::Transport => {
                format!("{} t-km", format_with_commas(breakdown.transport_tkm, 1))
            }
        };
        table.add_row(vec![
            source.to_string(),
            activity,
            format_co2e(breakdown.contribution(source), 3),
        ]);
    }
    table.to_string()
}

pub fn render_flow_table(flow: &MaterialFlow) -> String {
    let mut table = new_table();
    table.set_header(vec!["Flow", "Tonnes"]);
    let rows = [
        ("Virgin feed", flow.virgin_feed_tonnes),
        ("Post-consumer scrap", flow.scrap_feed_tonnes),
        ("Total feed", flow.feed_tonnes),
        ("Product", flow.product_tonnes),
        ("Process losses", flow.process_loss_tonnes),
        ("Byproduct credit", flow.byproduct_credit_tonnes),
    ];
    for (label, tonnes) in rows {
        table.add_row(vec![label.to_string(), format_number(tonnes, 3)]);
    }
    let mut out = table.to_string();
    out.push_str(&format!("\nClosed-loop share: {}", format_pct(flow.loop_pct(), 1)));
    out
}

pub fn render_input_table(input: &AssessmentInput) -> String {
    let route = &input.route;
    let energy = &route.energy;
    let mut table = new_table();
    table.set_header(vec!["Field", "Value"]);
    table.add_row(vec!["Product".to_string(), input.product_name.clone()]);
    table.add_row(vec!["Material".to_string(), input.material.to_string()]);
    table.add_row(vec![
        "Functional unit".to_string(),
        format_weight(input.functional_unit_kg, "kg", 0),
    ]);
    for part in &input.composition {
        table.add_row(vec![
            format!("Composition: {}", part.component),
            format_pct(part.percent, 1),
        ]);
    }
    table.add_row(vec!["Route".to_string(), route.route.to_string()]);
    table.add_row(vec![
        "Plant yield".to_string(),
        format_pct(route.plant_yield_pct, 1),
    ]);
    table.add_row(vec![
        "Recycled content".to_string(),
        opt_pct(route.recycled_content_pct),
    ]);
    table.add_row(vec![
        "Byproduct credit".to_string(),
        opt_pct(route.byproduct_credit_pct),
    ]);
    table.add_row(vec![
        "Electricity".to_string(),
        energy
            .electricity_kwh_per_t
            .map(|v| format!("{} kWh/t", format_with_commas(v, 0)))
            .unwrap_or_else(|| "unknown".to_string()),
    ]);
    match &energy.fuel_mix_pct {
        Some(mix) => {
            for (category, share) in mix.shares() {
                table.add_row(vec![
                    format!("Fuel: {}", category.label()),
                    format_pct(share, 2),
                ]);
            }
        }
        None => {
            table.add_row(vec!["Fuel mix".to_string(), "unknown".to_string()]);
        }
    }
    table.add_row(vec!["Grid region".to_string(), energy.grid_region.to_string()]);
    table.add_row(vec![
        "On-site renewables".to_string(),
        format_pct(energy.onsite_renewables_pct, 1),
    ]);
    table.add_row(vec![
        "Efficiency bonus".to_string(),
        opt_pct(energy.efficiency_bonus_pct),
    ]);
    for (idx, leg) in route.transport_inbound.iter().enumerate() {
        let mass = leg
            .mass_tonnes
            .map(|m| format_weight(m, "t", 2))
            .unwrap_or_else(|| "functional unit".to_string());
        table.add_row(vec![
            format!("Transport leg {}", idx + 1),
            format!("{} {} ({mass})", leg.mode, format_distance(leg.distance_km, 0)),
        ]);
    }
    table.to_string()
}

pub fn render_readiness_table(report: &ReadinessReport) -> String {
    let mut table = new_table();
    table.set_header(vec!["Step", "Status", "Detail"]);
    let total_cell = |ok: bool, total: f64| {
        let status = if ok { "OK" } else { "CHECK" };
        (status, format!("sum {}", format_pct(total, 2)))
    };

    let (status, detail) = total_cell(report.composition.ok, report.composition.total);
    table.add_row(vec!["Composition".to_string(), status.to_string(), detail]);
    if let Some(fuel) = &report.fuel_mix {
        let (status, detail) = total_cell(fuel.ok, fuel.total);
        table.add_row(vec!["Fuel mix".to_string(), status.to_string(), detail]);
    }
    for issue in &report.issues {
        table.add_row(Row::from(vec![
            Cell::new(issue.step.to_string()),
            Cell::new("ISSUE").fg(Color::Red),
            Cell::new(issue.message.clone()),
        ]));
    }
    let verdict = if report.is_ready() {
        "Ready to run"
    } else {
        "Not ready"
    };
    format!("{table}\n{verdict}")
}

pub fn render_reference_table(
    rows: &[RouteDefaults],
    typical_renewables: &[(String, f64)],
) -> String {
    let mut table = new_table();
    table.set_header(vec![
        "Route",
        "Electricity (kWh/t)",
        "Fuel mix NG/Coal/Oil/LPG/Other",
        "Yield",
        "Recycled",
        "Byproduct",
        "Water (m3/t)",
    ]);
    for row in rows {
        let mix = &row.fuel_mix_pct;
        table.add_row(vec![
            row.route.to_string(),
            format_with_commas(row.electricity_kwh_per_t, 0),
            format!(
                "{}/{}/{}/{}/{}",
                mix.natural_gas, mix.coal, mix.oil, mix.lpg, mix.other
            ),
            format_pct(row.plant_yield_pct, 0),
            format_pct(row.recycled_content_pct, 0),
            format_pct(row.byproduct_credit_pct, 2),
            format_number(row.water_m3_per_t, 1),
        ]);
    }
    let mut out = table.to_string();
    if !typical_renewables.is_empty() {
        let mut regions = new_table();
        regions.set_header(vec!["Grid region", "Typical on-site renewables"]);
        for (region, pct) in typical_renewables {
            regions.add_row(vec![region.clone(), format_pct(*pct, 0)]);
        }
        out.push('\n');
        out.push_str(&regions.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{render_input_table, render_readiness_table, render_report};
    use crate::assessment::demo::demo_input;
    use crate::assessment::{check_readiness, run_assessment};
    use crate::reference::{Material, ReferenceTables};

    #[test]
    fn report_lists_totals_and_hotspots() {
        let report = run_assessment(ReferenceTables::builtin(), &demo_input(Material::Steel), true)
            .expect("steel is covered");
        let rendered = render_report(&report);
        assert!(rendered.contains("1,131.33"));
        assert!(rendered.contains("Electricity"));
        assert!(rendered.contains("Transport"));
        assert!(rendered.contains("Closed-loop share"));
    }

    #[test]
    fn input_table_marks_unknown_fields() {
        let mut input = demo_input(Material::Copper);
        input.route.energy.electricity_kwh_per_t = None;
        input.route.energy.fuel_mix_pct = None;
        let rendered = render_input_table(&input);
        assert!(rendered.contains("unknown"));
        assert!(rendered.contains("Transport leg 1"));
    }

    #[test]
    fn readiness_table_states_verdict() {
        let mut input = demo_input(Material::Calcium);
        assert!(render_readiness_table(&check_readiness(&input)).ends_with("Ready to run"));
        input.product_name.clear();
        assert!(render_readiness_table(&check_readiness(&input)).ends_with("Not ready"));
    }
}
