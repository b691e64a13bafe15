use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr, PickFirst};

/// The CloudFormation-facing resource model.
///
/// Every property is optional here because the host may send partial models
/// (a Read or Delete only carries the primary identifier and dataset). Each
/// operation checks for the properties it needs. CloudFormation hands
/// template values over as strings, so numeric properties also accept their
/// string form and are written back as numbers.
#[serde_as]
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ResourceModel {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "Dataset", default, skip_serializing_if = "Option::is_none")]
    pub dataset: Option<String>,
    #[serde(rename = "Name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Description", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "TimePeriod", skip_serializing_if = "Option::is_none")]
    pub time_period: Option<i64>,
    #[serde_as(as = "Option<PickFirst<(_, DisplayFromStr)>>")]
    #[serde(rename = "TargetPercentage", skip_serializing_if = "Option::is_none")]
    pub target_percentage: Option<f64>,
    #[serde(rename = "SLI", default, skip_serializing_if = "Option::is_none")]
    pub sli: Option<String>,
}

/// Reference from an SLO to the derived column acting as its SLI.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SliRef {
    pub alias: String,
}

/// An SLO as the Honeycomb API represents it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub time_period_days: i64,
    pub target_per_million: i64,
    pub sli: SliRef,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn resource_model_uses_schema_property_names() {
        let model: ResourceModel = serde_json::from_value(json!({
            "ID": "slo-1",
            "Dataset": "ds1",
            "Name": "API availability",
            "TimePeriod": 30,
            "TargetPercentage": 99.9,
            "SLI": "sli.api_ok"
        }))
        .expect("model should parse");

        assert_eq!(model.id.as_deref(), Some("slo-1"));
        assert_eq!(model.description, None);
        assert_eq!(model.target_percentage, Some(99.9));

        let value = serde_json::to_value(&model).expect("model should serialize");
        assert!(value.get("Description").is_none());
        assert_eq!(value["SLI"], "sli.api_ok");
    }

    #[test]
    fn numeric_properties_accept_host_string_form() {
        let model: ResourceModel = serde_json::from_value(json!({
            "Dataset": "ds1",
            "TimePeriod": "30",
            "TargetPercentage": "99.95"
        }))
        .expect("stringified numbers should parse");

        assert_eq!(model.time_period, Some(30));
        assert_eq!(model.target_percentage, Some(99.95));

        let value = serde_json::to_value(&model).expect("model should serialize");
        assert_eq!(value["TimePeriod"], json!(30));
        assert_eq!(value["TargetPercentage"], json!(99.95));
    }

    #[test]
    fn numeric_properties_reject_non_numeric_strings() {
        assert!(serde_json::from_value::<ResourceModel>(json!({"TimePeriod": "thirty"})).is_err());
        assert!(
            serde_json::from_value::<ResourceModel>(json!({"TargetPercentage": "high"})).is_err()
        );
    }

    #[test]
    fn create_body_omits_missing_id() {
        let slo = Slo {
            id: None,
            name: "n".to_string(),
            description: None,
            time_period_days: 7,
            target_per_million: 995_000,
            sli: SliRef {
                alias: "a".to_string(),
            },
        };

        let value = serde_json::to_value(&slo).expect("slo should serialize");
        assert_eq!(
            value,
            json!({
                "name": "n",
                "time_period_days": 7,
                "target_per_million": 995000,
                "sli": {"alias": "a"}
            })
        );
    }
}
