//! AWS SDK client setup (Imperative Shell).

/// AWS client configuration.
#[derive(Debug, Clone)]
pub struct AwsConfig {
    /// Custom endpoint URL (for local stacks).
    pub endpoint_url: Option<String>,
    /// AWS region.
    pub region: String,
}

impl AwsConfig {
    /// Builds the configuration for a region chosen on the command line,
    /// with the endpoint override taken from the environment.
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            endpoint_url: std::env::var("AWS_ENDPOINT_URL").ok(),
            region: region.into(),
        }
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local endpoint ({})", url),
            None => format!("AWS (region: {})", self.region),
        }
    }
}

async fn load_sdk_config(config: &AwsConfig) -> aws_config::SdkConfig {
    let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(aws_config::Region::new(config.region.clone()));

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    sdk_config_loader.load().await
}

/// Creates the DynamoDB and CloudWatch clients with the given configuration.
pub async fn create_clients(
    config: &AwsConfig,
) -> (aws_sdk_dynamodb::Client, aws_sdk_cloudwatch::Client) {
    let sdk_config = load_sdk_config(config).await;
    (
        aws_sdk_dynamodb::Client::new(&sdk_config),
        aws_sdk_cloudwatch::Client::new(&sdk_config),
    )
}
