use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form JSON object flowing through the dispatch pipeline. Both the
/// invocation payload and the stored survey config take this shape.
pub type Payload = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DispatchResponse {
    pub execution_id: String,
}

/// Terminal failure of one dispatch invocation. Each variant names the
/// pipeline stage that failed; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchError {
    MissingField {
        field: String,
    },
    ConfigNotFound {
        key: String,
    },
    StoreRead {
        key: String,
        message: String,
    },
    ConfigParse {
        key: String,
        message: String,
    },
    QueueProvision {
        queue_name: String,
        message: String,
    },
    Checkpoint {
        message: String,
    },
    IdentityResolution {
        message: String,
    },
    WorkflowInvocation {
        state_machine_arn: String,
        message: String,
    },
}

impl DispatchError {
    pub fn stage(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "extract_survey_code",
            Self::ConfigNotFound { .. } | Self::StoreRead { .. } => "load_config",
            Self::ConfigParse { .. } => "parse_config",
            Self::QueueProvision { .. } => "provision_results_queue",
            Self::Checkpoint { .. } => "set_checkpoint_start_file",
            Self::IdentityResolution { .. } => "resolve_caller_identity",
            Self::WorkflowInvocation { .. } => "start_execution",
        }
    }
}

impl std::fmt::Display for DispatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { field } => {
                write!(f, "required payload field '{field}' is missing")
            }
            Self::ConfigNotFound { key } => {
                write!(f, "no survey config object at '{key}'")
            }
            Self::StoreRead { key, message } => {
                write!(f, "failed to read survey config object '{key}': {message}")
            }
            Self::ConfigParse { key, message } => {
                write!(f, "survey config object '{key}' is not a JSON mapping: {message}")
            }
            Self::QueueProvision {
                queue_name,
                message,
            } => {
                write!(f, "failed to provision results queue '{queue_name}': {message}")
            }
            Self::Checkpoint { message } => {
                write!(f, "invalid checkpoint restart request: {message}")
            }
            Self::IdentityResolution { message } => {
                write!(f, "failed to resolve caller account id: {message}")
            }
            Self::WorkflowInvocation {
                state_machine_arn,
                message,
            } => {
                write!(
                    f,
                    "workflow '{state_machine_arn}' rejected the execution request: {message}"
                )
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// Extracts the survey code named by `reference_name` from the invocation
/// payload. The code must be present and must be a JSON string.
pub fn survey_code(payload: &Payload, reference_name: &str) -> Result<String, DispatchError> {
    payload
        .get(reference_name)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| DispatchError::MissingField {
            field: reference_name.to_string(),
        })
}

/// Overlays the invocation payload onto the stored survey config. Runtime
/// values always win on key collision; no runtime key is ever dropped.
pub fn merge_payload(config: Payload, input: &Payload) -> Payload {
    let mut merged = config;
    for (key, value) in input {
        merged.insert(key.clone(), value.clone());
    }
    merged
}
