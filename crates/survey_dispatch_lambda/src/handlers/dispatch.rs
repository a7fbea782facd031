use serde_json::{json, Value};

use crate::adapters::config_store::ConfigStore;
use crate::adapters::identity::CallerIdentity;
use crate::adapters::queue::QueueProvisioner;
use crate::adapters::workflow::WorkflowClient;
use crate::runtime::checkpoint::set_checkpoint_start_file;
use crate::runtime::config_keys::config_object_key;
use crate::runtime::contract::{
    merge_payload, survey_code, DispatchError, DispatchResponse, Payload,
};
use crate::runtime::environment::LoaderConfig;
use crate::runtime::naming::{results_queue_name, state_machine_arn};

/// Loads the survey's stored config, overlays the invocation payload,
/// resolves the target state machine ARN, and starts one execution with the
/// merged payload. A failure at any stage aborts the whole invocation; there
/// is no partial success and nothing is retried.
pub fn handle_dispatch(
    event: Value,
    config: &LoaderConfig,
    store: &impl ConfigStore,
    identity: &impl CallerIdentity,
    queues: &impl QueueProvisioner,
    workflow: &impl WorkflowClient,
) -> Result<DispatchResponse, DispatchError> {
    match dispatch_pipeline(event, config, store, identity, queues, workflow) {
        Ok(response) => {
            log_dispatch_info(
                "dispatch_completed",
                json!({"execution_id": response.execution_id.clone()}),
            );
            Ok(response)
        }
        Err(error) => {
            log_dispatch_error(
                "dispatch_failed",
                json!({"stage": error.stage(), "error": error.to_string()}),
            );
            Err(error)
        }
    }
}

fn dispatch_pipeline(
    event: Value,
    config: &LoaderConfig,
    store: &impl ConfigStore,
    identity: &impl CallerIdentity,
    queues: &impl QueueProvisioner,
    workflow: &impl WorkflowClient,
) -> Result<DispatchResponse, DispatchError> {
    let input = match event {
        Value::Object(map) => map,
        _ => {
            return Err(DispatchError::MissingField {
                field: config.payload_reference_name.clone(),
            });
        }
    };

    let survey = survey_code(&input, &config.payload_reference_name)?;
    log_dispatch_info("dispatch_started", json!({"survey": survey.clone()}));

    let object_key = config_object_key(&config.file_path, &survey, &config.config_suffix);
    let body = store
        .read_object(&object_key)
        .map_err(|message| DispatchError::StoreRead {
            key: object_key.clone(),
            message,
        })?
        .ok_or_else(|| DispatchError::ConfigNotFound {
            key: object_key.clone(),
        })?;
    let survey_config = parse_survey_config(&object_key, &body)?;
    log_dispatch_info(
        "config_loaded",
        json!({"object_key": object_key.clone(), "option_count": survey_config.len()}),
    );

    let mut merged = merge_payload(survey_config, &input);
    provision_results_queue(&input, &mut merged, queues)?;
    apply_checkpoint_restart(&input, &mut merged)?;

    let account_id = identity
        .account_id()
        .map_err(|message| DispatchError::IdentityResolution { message })?;
    let target_arn = state_machine_arn(
        &config.step_function_arn,
        &account_id,
        &config.survey_arn_prefix,
        &survey,
        &config.survey_arn_suffix,
    );

    let execution_name = random_execution_name();
    let input_json = Value::Object(merged).to_string();
    let execution_id = workflow
        .start_execution(&target_arn, &execution_name, &input_json)
        .map_err(|message| DispatchError::WorkflowInvocation {
            state_machine_arn: target_arn.clone(),
            message,
        })?;

    Ok(DispatchResponse { execution_id })
}

/// The per-run results queue is provisioned only for payloads that carry a
/// run id. A `queue_url` already in the merged payload, whether supplied at
/// runtime or by the stored survey config, suppresses provisioning.
fn provision_results_queue(
    input: &Payload,
    merged: &mut Payload,
    queues: &impl QueueProvisioner,
) -> Result<(), DispatchError> {
    if merged.contains_key("queue_url") {
        return Ok(());
    }
    let Some(run_id) = input.get("run_id").and_then(Value::as_str) else {
        return Ok(());
    };

    let queue_name = results_queue_name(run_id);
    let queue_url =
        queues
            .create_fifo_queue(&queue_name)
            .map_err(|message| DispatchError::QueueProvision {
                queue_name: queue_name.clone(),
                message,
            })?;
    merged.insert("queue_url".to_string(), Value::String(queue_url));
    Ok(())
}

/// A restart payload names the file to resume from; the checkpoint number
/// selects which stage's input file it replaces.
fn apply_checkpoint_restart(input: &Payload, merged: &mut Payload) -> Result<(), DispatchError> {
    let Some(start_file) = input.get("checkpoint_file").and_then(Value::as_str) else {
        return Ok(());
    };
    let checkpoint = input
        .get("checkpoint")
        .and_then(Value::as_u64)
        .ok_or_else(|| DispatchError::Checkpoint {
            message: "checkpoint_file requires a numeric checkpoint".to_string(),
        })?;
    set_checkpoint_start_file(merged, checkpoint, start_file)
}

fn parse_survey_config(object_key: &str, body: &[u8]) -> Result<Payload, DispatchError> {
    let parsed: Value =
        serde_json::from_slice(body).map_err(|error| DispatchError::ConfigParse {
            key: object_key.to_string(),
            message: error.to_string(),
        })?;
    match parsed {
        Value::Object(map) => Ok(map),
        other => Err(DispatchError::ConfigParse {
            key: object_key.to_string(),
            message: format!("expected a JSON object, got {other}"),
        }),
    }
}

/// Opaque 128-bit execution name, decimal-rendered; uniqueness is all the
/// workflow service requires of it.
fn random_execution_name() -> String {
    rand::random::<u128>().to_string()
}

fn log_dispatch_info(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "config_dispatcher",
            "event": event,
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}

fn log_dispatch_error(event: &str, details: Value) {
    eprintln!(
        "{}",
        json!({
            "component": "config_dispatcher",
            "event": event,
            "level": "error",
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "details": details,
        })
    );
}
