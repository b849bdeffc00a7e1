use crate::error::Result;
use crate::Reporter;
use mesh_doctor_analysis::ValidationResult;

/// Pretty-printed JSON. One result is an object; anything else is an array.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonReporter;

impl Reporter for JsonReporter {
    fn render(&self, results: &[ValidationResult]) -> Result<String> {
        let json = match results {
            [single] => serde_json::to_string_pretty(single)?,
            _ => serde_json::to_string_pretty(results)?,
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::fixtures::result;
    use mesh_doctor_analysis::{Level, PolicyFinding};
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn finding() -> mesh_doctor_analysis::Finding {
        PolicyFinding {
            level: Level::Alert,
            message: "Service is not covered by any traffic permission.".to_string(),
            resource: "db".to_string(),
        }
        .into()
    }

    #[test]
    fn single_result_is_an_object() {
        let out = JsonReporter
            .render(&[result("Traffic Permission Consistency", vec![finding()])])
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(
            value,
            json!({
                "title": "Traffic Permission Consistency",
                "generatedAt": "2024-05-06T07:08:09Z",
                "findings": [{
                    "kind": "policyFinding",
                    "level": "ALERT",
                    "message": "Service is not covered by any traffic permission.",
                    "resource": "db"
                }]
            })
        );
    }

    #[test]
    fn zero_or_many_results_are_an_array() {
        let empty: Value = serde_json::from_str(&JsonReporter.render(&[]).unwrap()).unwrap();
        assert_eq!(empty, json!([]));

        let out = JsonReporter
            .render(&[result("A", Vec::new()), result("B", vec![finding()])])
            .unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let titles: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }
}
