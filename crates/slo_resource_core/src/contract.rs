use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::ResourceModel;

pub const GENERIC_ERROR_CODE: &str = "GeneralServiceException";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
    List,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "CREATE",
            Self::Read => "READ",
            Self::Update => "UPDATE",
            Self::Delete => "DELETE",
            Self::List => "LIST",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Success,
    Failed,
}

/// Payload CloudFormation sends to the handler function.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HandlerRequest {
    pub action: Option<String>,
    #[serde(default)]
    pub bearer_token: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub aws_account_id: Option<String>,
    #[serde(default)]
    pub resource_type: Option<String>,
    #[serde(default)]
    pub stack_id: Option<String>,
    #[serde(default)]
    pub request_data: RequestData,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestData {
    #[serde(default)]
    pub logical_resource_id: Option<String>,
    #[serde(default)]
    pub resource_properties: Option<Value>,
    #[serde(default)]
    pub previous_resource_properties: Option<Value>,
    #[serde(default)]
    pub type_configuration: Option<Value>,
}

/// Payload the local contract-test harness sends instead of [`HandlerRequest`].
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestEvent {
    pub action: Option<String>,
    pub request: TestRequest,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestRequest {
    #[serde(default)]
    pub logical_resource_identifier: Option<String>,
    #[serde(default)]
    pub desired_resource_state: Option<Value>,
    #[serde(default)]
    pub previous_resource_state: Option<Value>,
    #[serde(default)]
    pub type_configuration: Option<Value>,
}

/// What a lifecycle operation gets to work with, independent of the event shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceRequest {
    pub logical_resource_id: Option<String>,
    pub bearer_token: Option<String>,
    pub type_configuration: Option<Value>,
    pub previous_model: Option<ResourceModel>,
    pub current_model: ResourceModel,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressEvent {
    pub status: OperationStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_model: Option<ResourceModel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bearer_token: Option<String>,
}

impl ProgressEvent {
    pub fn success(message: impl Into<String>, model: ResourceModel) -> Self {
        Self {
            status: OperationStatus::Success,
            message: message.into(),
            resource_model: Some(model),
            error_code: None,
            bearer_token: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: OperationStatus::Failed,
            message: message.into(),
            resource_model: None,
            error_code: Some(GENERIC_ERROR_CODE.to_string()),
            bearer_token: None,
        }
    }

    pub fn with_bearer_token(mut self, bearer_token: Option<String>) -> Self {
        self.bearer_token = bearer_token;
        self
    }

    pub fn is_success(&self) -> bool {
        self.status == OperationStatus::Success
    }
}

/// Accepts either event shape and returns the action plus a normalized request.
pub fn normalize_event(event: Value) -> Result<(Action, ResourceRequest), String> {
    let Some(object) = event.as_object() else {
        return Err("Handler event must be a JSON object".to_string());
    };
    let is_test_event = object.get("request").is_some_and(Value::is_object);

    if is_test_event {
        let test_event = serde_json::from_value::<TestEvent>(event)
            .map_err(|error| format!("Malformed test event: {error}"))?;
        let action = parse_action(test_event.action.as_deref())?;
        let request = test_event.request;
        return Ok((
            action,
            ResourceRequest {
                logical_resource_id: request.logical_resource_identifier,
                bearer_token: None,
                type_configuration: request.type_configuration,
                previous_model: parse_optional_model(request.previous_resource_state)?,
                current_model: parse_model(request.desired_resource_state)?,
            },
        ));
    }

    let handler_request = serde_json::from_value::<HandlerRequest>(event)
        .map_err(|error| format!("Malformed handler request: {error}"))?;
    let action = parse_action(handler_request.action.as_deref())?;
    let data = handler_request.request_data;
    Ok((
        action,
        ResourceRequest {
            logical_resource_id: data.logical_resource_id,
            bearer_token: handler_request.bearer_token,
            type_configuration: data.type_configuration,
            previous_model: parse_optional_model(data.previous_resource_properties)?,
            current_model: parse_model(data.resource_properties)?,
        },
    ))
}

fn parse_action(action: Option<&str>) -> Result<Action, String> {
    let Some(action) = action else {
        return Err("Handler event must include an action".to_string());
    };
    serde_json::from_value(Value::String(action.to_string()))
        .map_err(|_| format!("Unsupported action: {action}"))
}

fn parse_model(value: Option<Value>) -> Result<ResourceModel, String> {
    parse_optional_model(value).map(Option::unwrap_or_default)
}

fn parse_optional_model(value: Option<Value>) -> Result<Option<ResourceModel>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(properties)) => serde_json::from_value(Value::Object(properties))
            .map(Some)
            .map_err(|error| format!("Malformed resource model: {error}")),
        Some(_) => Err("Resource model must be a JSON object".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn normalizes_handler_request() {
        let (action, request) = normalize_event(json!({
            "action": "CREATE",
            "bearerToken": "token-1",
            "region": "us-east-1",
            "awsAccountId": "123456789012",
            "resourceType": "Honeycomb::SLO::SLO",
            "requestData": {
                "logicalResourceId": "CheckoutSlo",
                "resourceProperties": {
                    "Dataset": "ds1",
                    "Name": "n",
                    "TimePeriod": 30,
                    "TargetPercentage": 99.9,
                    "SLI": "a"
                },
                "typeConfiguration": {"HoneycombConfig": {"ApiKey": "k"}}
            },
            "callbackContext": null
        }))
        .expect("event should normalize");

        assert_eq!(action, Action::Create);
        assert_eq!(request.bearer_token.as_deref(), Some("token-1"));
        assert_eq!(request.logical_resource_id.as_deref(), Some("CheckoutSlo"));
        assert_eq!(request.current_model.dataset.as_deref(), Some("ds1"));
        assert_eq!(request.previous_model, None);
        assert!(request.type_configuration.is_some());
    }

    #[test]
    fn accepts_stringified_numeric_properties() {
        let (_, request) = normalize_event(json!({
            "action": "CREATE",
            "requestData": {
                "resourceProperties": {
                    "Dataset": "ds1",
                    "Name": "n",
                    "TimePeriod": "30",
                    "TargetPercentage": "99.95",
                    "SLI": "a"
                }
            }
        }))
        .expect("host-shaped properties should normalize");

        assert_eq!(request.current_model.time_period, Some(30));
        assert_eq!(request.current_model.target_percentage, Some(99.95));
    }

    #[test]
    fn normalizes_contract_test_event() {
        let (action, request) = normalize_event(json!({
            "action": "UPDATE",
            "credentials": {"accessKeyId": "x"},
            "request": {
                "clientRequestToken": "c0ffee",
                "desiredResourceState": {"ID": "slo-1", "Dataset": "ds1", "Name": "new"},
                "previousResourceState": {"ID": "slo-1", "Dataset": "ds1", "Name": "old"},
                "logicalResourceIdentifier": "MySlo"
            }
        }))
        .expect("test event should normalize");

        assert_eq!(action, Action::Update);
        assert_eq!(request.current_model.name.as_deref(), Some("new"));
        assert_eq!(
            request.previous_model.and_then(|model| model.name).as_deref(),
            Some("old")
        );
        assert_eq!(request.logical_resource_id.as_deref(), Some("MySlo"));
        assert_eq!(request.type_configuration, None);
    }

    #[test]
    fn missing_resource_properties_yield_empty_model() {
        let (action, request) = normalize_event(json!({"action": "LIST", "requestData": {}}))
            .expect("event should normalize");

        assert_eq!(action, Action::List);
        assert_eq!(request.current_model, ResourceModel::default());
    }

    #[test]
    fn rejects_malformed_events() {
        assert!(normalize_event(json!([1, 2, 3]))
            .expect_err("array should fail")
            .contains("JSON object"));
        assert!(normalize_event(json!({"action": "PATCH"}))
            .expect_err("unknown action should fail")
            .contains("Unsupported action: PATCH"));
        assert!(normalize_event(json!({"requestData": {}}))
            .expect_err("missing action should fail")
            .contains("must include an action"));
        assert!(normalize_event(json!({
            "action": "READ",
            "requestData": {"resourceProperties": {"TimePeriod": "thirty"}}
        }))
        .expect_err("bad property type should fail")
        .contains("Malformed resource model"));
    }

    #[test]
    fn progress_event_serializes_in_host_format() {
        let success = ProgressEvent::success(
            "Create Complete",
            ResourceModel {
                id: Some("slo-1".to_string()),
                ..ResourceModel::default()
            },
        )
        .with_bearer_token(Some("token-1".to_string()));

        assert_eq!(
            serde_json::to_value(&success).expect("event should serialize"),
            json!({
                "status": "SUCCESS",
                "message": "Create Complete",
                "resourceModel": {"ID": "slo-1"},
                "bearerToken": "token-1"
            })
        );

        let failed = ProgressEvent::failed("unable to fetch SLO: 404 not found");
        assert_eq!(
            serde_json::to_value(&failed).expect("event should serialize"),
            json!({
                "status": "FAILED",
                "message": "unable to fetch SLO: 404 not found",
                "errorCode": "GeneralServiceException"
            })
        );
    }
}
