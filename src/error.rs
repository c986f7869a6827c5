use thiserror::Error;

/// Every failure the lister can hit. All of them end the process.
#[derive(Error, Debug)]
pub enum ListerError {
    #[error("{} not found in .env file or environment", .missing.join(" and "))]
    MissingCredentials { missing: Vec<&'static str> },

    #[error("Failed to read .env file: {0}")]
    InvalidConfigFile(String),

    #[error("Bucket name cannot be empty")]
    EmptyBucketName,

    #[error("AWS credentials not found: {0}")]
    CredentialsNotFound(String),

    #[error("AWS credentials were rejected ({code}): {message}")]
    CredentialsRejected { code: String, message: String },

    #[error("S3 request failed: {0}")]
    Provider(String),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ListerError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            ListerError::MissingCredentials { .. }
            | ListerError::InvalidConfigFile(_)
            | ListerError::EmptyBucketName
            | ListerError::CredentialsNotFound(_)
            | ListerError::CredentialsRejected { .. }
            | ListerError::Provider(_)
            | ListerError::Io(_) => 1,
        }
    }

    /// Remediation lines printed after the error message.
    pub fn hint(&self) -> &'static [&'static str] {
        match self {
            ListerError::MissingCredentials { .. } => &[
                "Please create a .env file with:",
                "AWS_ACCESS_KEY_ID=your_access_key",
                "AWS_SECRET_ACCESS_KEY=your_secret_key",
            ],
            ListerError::CredentialsNotFound(_) | ListerError::CredentialsRejected { .. } => &[
                "Make sure your .env file contains valid AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY",
            ],
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_exits_with_one() {
        let errors = vec![
            ListerError::MissingCredentials {
                missing: vec!["AWS_ACCESS_KEY_ID"],
            },
            ListerError::InvalidConfigFile("line 3".to_string()),
            ListerError::EmptyBucketName,
            ListerError::CredentialsNotFound("no provider".to_string()),
            ListerError::CredentialsRejected {
                code: "InvalidAccessKeyId".to_string(),
                message: "bad key".to_string(),
            },
            ListerError::Provider("NoSuchBucket".to_string()),
            ListerError::Io(std::io::Error::other("closed")),
        ];

        for err in errors {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    #[test]
    fn test_missing_credentials_message() {
        let err = ListerError::MissingCredentials {
            missing: vec!["AWS_ACCESS_KEY_ID", "AWS_SECRET_ACCESS_KEY"],
        };
        assert_eq!(
            err.to_string(),
            "AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY not found in .env file or environment"
        );
        assert_eq!(err.hint().len(), 3);
    }

    #[test]
    fn test_provider_error_has_no_hint() {
        let err = ListerError::Provider("AccessDenied: Access Denied".to_string());
        assert!(err.hint().is_empty());
        assert_eq!(
            err.to_string(),
            "S3 request failed: AccessDenied: Access Denied"
        );
    }
}
