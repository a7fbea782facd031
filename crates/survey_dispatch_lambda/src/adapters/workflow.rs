/// Narrow client for the external workflow execution service.
pub trait WorkflowClient {
    /// Starts one execution of the state machine and returns the execution
    /// identifier assigned by the service.
    fn start_execution(
        &self,
        state_machine_arn: &str,
        execution_name: &str,
        input_json: &str,
    ) -> Result<String, String>;
}
