use aws_sdk_sqs::types::QueueAttributeName;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use survey_dispatch_lambda::adapters::config_store::ConfigStore;
use survey_dispatch_lambda::adapters::identity::CallerIdentity;
use survey_dispatch_lambda::adapters::queue::QueueProvisioner;
use survey_dispatch_lambda::adapters::workflow::WorkflowClient;
use survey_dispatch_lambda::handlers::dispatch::handle_dispatch;
use survey_dispatch_lambda::runtime::contract::DispatchResponse;
use survey_dispatch_lambda::runtime::environment::LoaderConfig;

struct S3ConfigStore {
    bucket: String,
    s3_client: aws_sdk_s3::Client,
}

impl ConfigStore for S3ConfigStore {
    fn read_object(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
        let bucket = self.bucket.clone();
        let object_key = key.to_string();
        let client = self.s3_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let result = client
                    .get_object()
                    .bucket(bucket)
                    .key(object_key)
                    .send()
                    .await;

                match result {
                    Ok(output) => output
                        .body
                        .collect()
                        .await
                        .map(|data| Some(data.into_bytes().to_vec()))
                        .map_err(|error| format!("failed to read config object body: {error}")),
                    Err(error)
                        if error
                            .as_service_error()
                            .is_some_and(|service_error| service_error.is_no_such_key()) =>
                    {
                        Ok(None)
                    }
                    Err(error) => Err(format!("failed to read config object from s3: {error}")),
                }
            })
        })
    }
}

struct SfnWorkflowClient {
    sfn_client: aws_sdk_sfn::Client,
}

impl WorkflowClient for SfnWorkflowClient {
    fn start_execution(
        &self,
        state_machine_arn: &str,
        execution_name: &str,
        input_json: &str,
    ) -> Result<String, String> {
        let arn = state_machine_arn.to_string();
        let name = execution_name.to_string();
        let input = input_json.to_string();
        let client = self.sfn_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                client
                    .start_execution()
                    .state_machine_arn(arn)
                    .name(name)
                    .input(input)
                    .send()
                    .await
                    .map(|output| output.execution_arn().to_string())
                    .map_err(|error| format!("failed to start step function execution: {error}"))
            })
        })
    }
}

struct StsCallerIdentity {
    sts_client: aws_sdk_sts::Client,
}

impl CallerIdentity for StsCallerIdentity {
    fn account_id(&self) -> Result<String, String> {
        let client = self.sts_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .get_caller_identity()
                    .send()
                    .await
                    .map_err(|error| format!("failed to resolve caller identity: {error}"))?;
                output
                    .account()
                    .map(str::to_string)
                    .ok_or_else(|| "caller identity response carried no account id".to_string())
            })
        })
    }
}

struct SqsQueueProvisioner {
    sqs_client: aws_sdk_sqs::Client,
}

impl QueueProvisioner for SqsQueueProvisioner {
    fn create_fifo_queue(&self, queue_name: &str) -> Result<String, String> {
        let name = queue_name.to_string();
        let client = self.sqs_client.clone();

        tokio::task::block_in_place(|| {
            tokio::runtime::Handle::current().block_on(async move {
                let output = client
                    .create_queue()
                    .queue_name(name)
                    .attributes(QueueAttributeName::FifoQueue, "true")
                    .send()
                    .await
                    .map_err(|error| format!("failed to create results queue: {error}"))?;
                output
                    .queue_url()
                    .map(str::to_string)
                    .ok_or_else(|| "create queue response carried no queue url".to_string())
            })
        })
    }
}

async fn handle_request(event: LambdaEvent<Value>) -> Result<DispatchResponse, Error> {
    let loader_config = LoaderConfig::from_env().map_err(Error::from)?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let store = S3ConfigStore {
        bucket: loader_config.bucket_name.clone(),
        s3_client: aws_sdk_s3::Client::new(&aws_config),
    };
    let identity = StsCallerIdentity {
        sts_client: aws_sdk_sts::Client::new(&aws_config),
    };
    let queues = SqsQueueProvisioner {
        sqs_client: aws_sdk_sqs::Client::new(&aws_config),
    };
    let workflow = SfnWorkflowClient {
        sfn_client: aws_sdk_sfn::Client::new(&aws_config),
    };

    handle_dispatch(
        event.payload,
        &loader_config,
        &store,
        &identity,
        &queues,
        &workflow,
    )
    .map_err(|error| Error::from(error.to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}
