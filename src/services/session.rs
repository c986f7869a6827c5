use crate::config::{ConfigSource, StorageConfig};
use crate::error::ListerError;
use crate::services::storage::ObjectLister;
use crate::utils::{format, prompt};
use std::future::Future;
use std::io::{BufRead, Write};
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Rows were printed.
    Listed { total: usize },
    /// The bucket had no objects; nothing was listed.
    Empty,
}

/// Prompt for a bucket, list its first page once and print the result.
///
/// The lister is never called when the bucket name is blank.
pub async fn run_session<L, R, W>(
    lister: &L,
    input: &mut R,
    out: &mut W,
) -> Result<SessionOutcome, ListerError>
where
    L: ObjectLister + ?Sized,
    R: BufRead,
    W: Write,
{
    let bucket = prompt::read_bucket_name(input, out)?;
    format::write_header(out, &bucket)?;
    out.flush()?;

    info!(bucket = %bucket, "listing bucket");
    let listing = lister.list_first_page(&bucket).await?;

    if listing.records.is_empty() {
        format::write_no_files(out, &bucket)?;
        return Ok(SessionOutcome::Empty);
    }

    format::write_listing(out, &listing.records, listing.truncated)?;
    out.flush()?;

    Ok(SessionOutcome::Listed {
        total: listing.records.len(),
    })
}

/// Validate credentials, build the lister with `connect`, then run one session.
///
/// Missing credentials fail before `connect` is called or anything is read from `input`.
pub async fn run<F, Fut, L, R, W>(
    source: &ConfigSource,
    connect: F,
    input: &mut R,
    out: &mut W,
) -> Result<SessionOutcome, ListerError>
where
    F: FnOnce(StorageConfig) -> Fut,
    Fut: Future<Output = L>,
    L: ObjectLister,
    R: BufRead,
    W: Write,
{
    let config = StorageConfig::from_source(source)?;
    writeln!(out, "AWS credentials loaded from {}", config.origin_label())?;

    let lister = connect(config).await;
    run_session(&lister, input, out).await
}
