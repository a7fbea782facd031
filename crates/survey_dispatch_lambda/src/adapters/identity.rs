/// Resolves the account id of the caller, used to complete the partial state
/// machine ARN template.
pub trait CallerIdentity {
    fn account_id(&self) -> Result<String, String>;
}
