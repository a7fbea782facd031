/// Environment-driven configuration, resolved once at process start and
/// passed by reference into the handler. Every variable is required and must
/// be non-blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub bucket_name: String,
    pub file_path: String,
    pub payload_reference_name: String,
    pub step_function_arn: String,
    pub config_suffix: String,
    pub survey_arn_prefix: String,
    pub survey_arn_suffix: String,
}

impl LoaderConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        Ok(Self {
            bucket_name: require(&lookup, "BUCKET_NAME")?,
            file_path: require(&lookup, "FILE_PATH")?,
            payload_reference_name: require(&lookup, "PAYLOAD_REFERENCE_NAME")?,
            step_function_arn: require(&lookup, "STEP_FUNCTION_ARN")?,
            config_suffix: require(&lookup, "CONFIG_SUFFIX")?,
            survey_arn_prefix: require(&lookup, "SURVEY_ARN_PREFIX")?,
            survey_arn_suffix: require(&lookup, "SURVEY_ARN_SUFFIX")?,
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String, String> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(format!("{name} must be configured")),
    }
}
