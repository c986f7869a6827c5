use crate::error::ListerError;
use crate::models::{BucketName, FileRecord, Listing};
use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use tracing::{debug, warn};

/// Error codes S3 returns when it does not accept the caller's credentials.
const REJECTED_CREDENTIAL_CODES: [&str; 5] = [
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
    "InvalidClientTokenId",
];

#[async_trait]
pub trait ObjectLister: Send + Sync {
    /// Fetch the first page of objects in `bucket`. Never requests a second page.
    async fn list_first_page(&self, bucket: &BucketName) -> Result<Listing, ListerError>;
}

pub struct S3ObjectLister {
    client: Client,
}

impl S3ObjectLister {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ObjectLister for S3ObjectLister {
    async fn list_first_page(&self, bucket: &BucketName) -> Result<Listing, ListerError> {
        let res = self
            .client
            .list_objects_v2()
            .bucket(bucket.as_str())
            .send()
            .await
            .map_err(classify_sdk_error)?;

        let truncated = res.is_truncated.unwrap_or(false);
        if truncated {
            warn!(bucket = %bucket, "listing truncated, showing first page only");
        }

        let records: Vec<FileRecord> = res
            .contents
            .unwrap_or_default()
            .into_iter()
            .filter_map(FileRecord::from_object)
            .collect();

        debug!(bucket = %bucket, count = records.len(), "listed objects");

        Ok(Listing { records, truncated })
    }
}

/// Broad category of an SDK failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request could not be built, e.g. no credentials could be resolved.
    Construction,
    /// The service answered with an error response.
    Service,
    /// Timeouts, connection failures, unreadable responses.
    Transport,
}

fn classify_sdk_error<E, R>(err: SdkError<E, R>) -> ListerError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
    R: std::fmt::Debug,
{
    let kind = match &err {
        SdkError::ConstructionFailure(_) => FailureKind::Construction,
        SdkError::ServiceError(_) => FailureKind::Service,
        _ => FailureKind::Transport,
    };
    let code = err.as_service_error().and_then(|e| e.code()).map(str::to_string);
    let detail = DisplayErrorContext(&err).to_string();

    classify_failure(kind, code.as_deref(), detail)
}

/// Map a listing failure onto the lister's error taxonomy.
pub fn classify_failure(kind: FailureKind, code: Option<&str>, detail: String) -> ListerError {
    match (kind, code) {
        (FailureKind::Service, Some(code)) if REJECTED_CREDENTIAL_CODES.contains(&code) => {
            ListerError::CredentialsRejected {
                code: code.to_string(),
                message: detail,
            }
        }
        (FailureKind::Construction, _) if mentions_credentials(&detail) => {
            ListerError::CredentialsNotFound(detail)
        }
        _ => ListerError::Provider(detail),
    }
}

fn mentions_credentials(detail: &str) -> bool {
    let lower = detail.to_lowercase();
    lower.contains("credential") || lower.contains("identity")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_credentials() {
        let err = classify_failure(
            FailureKind::Service,
            Some("InvalidAccessKeyId"),
            "InvalidAccessKeyId: The AWS Access Key Id you provided does not exist".to_string(),
        );
        match err {
            ListerError::CredentialsRejected { code, message } => {
                assert_eq!(code, "InvalidAccessKeyId");
                assert!(message.contains("does not exist"));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_missing_identity() {
        let err = classify_failure(
            FailureKind::Construction,
            None,
            "failed to construct request: no identity resolver for sigv4".to_string(),
        );
        assert!(matches!(err, ListerError::CredentialsNotFound(_)));
    }

    #[test]
    fn test_other_service_errors_surface_verbatim() {
        for code in ["NoSuchBucket", "AccessDenied", "SlowDown"] {
            let detail = format!("{}: provider said no", code);
            match classify_failure(FailureKind::Service, Some(code), detail.clone()) {
                ListerError::Provider(message) => assert_eq!(message, detail),
                other => panic!("unexpected {:?}", other),
            }
        }
    }

    #[test]
    fn test_transport_failure_is_provider_error() {
        let err = classify_failure(
            FailureKind::Transport,
            None,
            "dispatch failure: connection refused".to_string(),
        );
        assert!(matches!(err, ListerError::Provider(_)));
    }

    #[test]
    fn test_credential_code_only_counts_for_service_errors() {
        let err = classify_failure(
            FailureKind::Transport,
            Some("ExpiredToken"),
            "io error".to_string(),
        );
        assert!(matches!(err, ListerError::Provider(_)));
    }
}
