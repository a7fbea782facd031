/// Placeholder left in the deployed state machine ARN template where the
/// account id belongs; resolved at invocation time from the caller identity.
pub const ACCOUNT_ID_PLACEHOLDER: &str = "#{AWS::AccountId}";

/// Survey execution name under the pipeline naming standard, e.g. prefix
/// `ES-`, survey `BMISG`, suffix `-Results` give `ES-BMISG-Results`.
pub fn survey_execution_name(prefix: &str, survey_code: &str, suffix: &str) -> String {
    format!("{prefix}{survey_code}{suffix}")
}

/// Substitutes the caller's account id into the partial ARN template.
pub fn complete_arn_segment(partial_arn: &str, account_id: &str) -> String {
    partial_arn.replace(ACCOUNT_ID_PLACEHOLDER, account_id)
}

/// Fully-qualified state machine ARN: the completed template followed by the
/// survey execution name.
pub fn state_machine_arn(
    partial_arn: &str,
    account_id: &str,
    prefix: &str,
    survey_code: &str,
    suffix: &str,
) -> String {
    format!(
        "{}{}",
        complete_arn_segment(partial_arn, account_id),
        survey_execution_name(prefix, survey_code, suffix),
    )
}

/// Name of the per-run FIFO results queue.
pub fn results_queue_name(run_id: &str) -> String {
    format!("{run_id}-results.fifo")
}
