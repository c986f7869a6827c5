use crate::error::ListerError;
use std::collections::HashMap;
use std::env;
use std::fmt;
use std::fs::File;

pub const ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
pub const SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
pub const SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";
pub const REGION: &str = "AWS_REGION";
pub const DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const ENDPOINT_URL: &str = "AWS_ENDPOINT_URL";

const KNOWN_KEYS: [&str; 6] = [
    ACCESS_KEY_ID,
    SECRET_ACCESS_KEY,
    SESSION_TOKEN,
    REGION,
    DEFAULT_REGION,
    ENDPOINT_URL,
];

/// Where a setting was read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigOrigin {
    DotEnv,
    Environment,
}

/// Key-value settings from a `.env` file overlaid by the process environment.
///
/// Nothing is written back into the environment; the values only travel
/// through the [`StorageConfig`] built from this source.
#[derive(Debug, Default, Clone)]
pub struct ConfigSource {
    file: HashMap<String, String>,
    env: HashMap<String, String>,
}

impl ConfigSource {
    /// Load the nearest `.env` file (if any) and the relevant process variables.
    pub fn load() -> Result<Self, ListerError> {
        Self::from_dotenv(dotenvy::dotenv_iter())
    }

    /// A missing file yields no file settings; an unreadable or malformed one is an error.
    fn from_dotenv(
        found: Result<dotenvy::Iter<File>, dotenvy::Error>,
    ) -> Result<Self, ListerError> {
        let file = match found {
            Ok(iter) => collect_pairs(iter)?,
            Err(e) if e.not_found() => HashMap::new(),
            Err(e) => return Err(ListerError::InvalidConfigFile(e.to_string())),
        };

        Ok(Self {
            file,
            env: process_vars(),
        })
    }

    pub fn from_pairs<F, E, K, V>(file: F, env: E) -> Self
    where
        F: IntoIterator<Item = (K, V)>,
        E: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            file: file.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            env: env.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Look up a key. A variable present in the environment wins over the file,
    /// even when it is empty.
    pub fn get(&self, key: &str) -> Option<(&str, ConfigOrigin)> {
        if let Some(v) = self.env.get(key) {
            return Some((v.as_str(), ConfigOrigin::Environment));
        }
        self.file
            .get(key)
            .map(|v| (v.as_str(), ConfigOrigin::DotEnv))
    }

    /// Trimmed, non-empty value for `key`.
    fn non_empty(&self, key: &str) -> Option<(String, ConfigOrigin)> {
        self.get(key)
            .map(|(v, origin)| (v.trim(), origin))
            .filter(|(v, _)| !v.is_empty())
            .map(|(v, origin)| (v.to_string(), origin))
    }
}

fn collect_pairs<R: std::io::Read>(
    iter: dotenvy::Iter<R>,
) -> Result<HashMap<String, String>, ListerError> {
    let mut pairs = HashMap::new();
    for item in iter {
        let (key, value) = item.map_err(|e| ListerError::InvalidConfigFile(e.to_string()))?;
        pairs.insert(key, value);
    }
    Ok(pairs)
}

fn process_vars() -> HashMap<String, String> {
    KNOWN_KEYS
        .iter()
        .filter_map(|key| env::var(key).ok().map(|v| (key.to_string(), v)))
        .collect()
}

/// Static credentials handed straight to the S3 client.
#[derive(Clone, PartialEq, Eq)]
pub struct StorageCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for StorageCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"** redacted **")
            .field(
                "session_token",
                &self.session_token.as_ref().map(|_| "** redacted **"),
            )
            .finish()
    }
}

/// Everything needed to build the S3 client.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub credentials: StorageCredentials,

    /// Region (default: "us-east-1")
    pub region: String,

    /// Custom endpoint for S3-compatible services such as MinIO
    pub endpoint_url: Option<String>,

    /// Path-style addressing, on whenever a custom endpoint is set
    pub force_path_style: bool,

    /// Where the access key pair came from
    pub loaded_from: ConfigOrigin,
}

impl StorageConfig {
    pub const DEFAULT_REGION: &'static str = "us-east-1";

    /// Build the config, failing when either secret is missing or empty.
    pub fn from_source(source: &ConfigSource) -> Result<Self, ListerError> {
        let access_key = source.non_empty(ACCESS_KEY_ID);
        let secret_key = source.non_empty(SECRET_ACCESS_KEY);

        let ((access_key_id, key_origin), (secret_access_key, secret_origin)) =
            match (access_key, secret_key) {
                (Some(a), Some(s)) => (a, s),
                (a, s) => {
                    let mut missing = Vec::new();
                    if a.is_none() {
                        missing.push(ACCESS_KEY_ID);
                    }
                    if s.is_none() {
                        missing.push(SECRET_ACCESS_KEY);
                    }
                    return Err(ListerError::MissingCredentials { missing });
                }
            };

        let loaded_from = if key_origin == ConfigOrigin::DotEnv
            && secret_origin == ConfigOrigin::DotEnv
        {
            ConfigOrigin::DotEnv
        } else {
            ConfigOrigin::Environment
        };

        let region = source
            .non_empty(REGION)
            .or_else(|| source.non_empty(DEFAULT_REGION))
            .map(|(v, _)| v)
            .unwrap_or_else(|| Self::DEFAULT_REGION.to_string());

        let endpoint_url = source.non_empty(ENDPOINT_URL).map(|(v, _)| v);

        Ok(Self {
            credentials: StorageCredentials {
                access_key_id,
                secret_access_key,
                session_token: source.non_empty(SESSION_TOKEN).map(|(v, _)| v),
            },
            region,
            force_path_style: endpoint_url.is_some(),
            endpoint_url,
            loaded_from,
        })
    }

    /// Human-readable description of where the credentials were found.
    pub fn origin_label(&self) -> &'static str {
        match self.loaded_from {
            ConfigOrigin::DotEnv => ".env file",
            ConfigOrigin::Environment => "environment",
        }
    }
}
