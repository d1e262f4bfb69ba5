use anyhow::Result;
use serde::Serialize;

/// Pretty JSON for reports, inputs, readiness checks and reference rows.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

#[cfg(test)]
mod tests {
    use super::render_json;
    use crate::assessment::demo::demo_input;
    use crate::assessment::{run_assessment, AssessmentReport};
    use crate::reference::{Material, ReferenceTables};

    #[test]
    fn report_json_uses_region_codes_and_reads_back() {
        let report = run_assessment(ReferenceTables::builtin(), &demo_input(Material::Steel), true)
            .expect("steel is covered");
        let json = render_json(&report).expect("json");
        assert!(json.contains("\"grid_region\": \"IN\""));
        assert!(json.contains("\"gwp_kgco2e\": 1131.33"));

        let parsed: AssessmentReport = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed.result, report.result);
        assert_eq!(parsed.filled_input, report.filled_input);
    }
}
