use crate::config::StorageConfig;
use crate::services::storage::S3ObjectLister;
use aws_sdk_s3::config::{Credentials, Region};
use tracing::info;

pub async fn setup_storage(config: &StorageConfig) -> S3ObjectLister {
    info!(
        region = %config.region,
        endpoint = config.endpoint_url.as_deref().unwrap_or("aws"),
        "configuring S3 client"
    );

    let credentials = Credentials::new(
        config.credentials.access_key_id.clone(),
        config.credentials.secret_access_key.clone(),
        config.credentials.session_token.clone(),
        None,
        "static",
    );

    let mut loader = aws_config::from_env()
        .region(Region::new(config.region.clone()))
        .credentials_provider(credentials);

    if let Some(endpoint_url) = &config.endpoint_url {
        loader = loader.endpoint_url(endpoint_url);
    }

    let aws_config = loader.load().await;

    let s3_config = aws_sdk_s3::config::Builder::from(&aws_config)
        .force_path_style(config.force_path_style)
        .build();

    S3ObjectLister::new(aws_sdk_s3::Client::from_conf(s3_config))
}
