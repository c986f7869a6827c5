use crate::error::ListerError;
use crate::models::{BucketName, FileRecord};
use chrono::{DateTime, Utc};
use std::io::{self, Write};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Bytes shown as kibibytes with one decimal, e.g. 1536 -> "1.5 KB".
pub fn format_size_kib(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// One listing row; `index` is 1-based.
pub fn format_row(index: usize, record: &FileRecord) -> String {
    format!(
        "{:>2}. {} ({}) - Modified: {}",
        index,
        record.key,
        format_size_kib(record.size),
        format_timestamp(&record.modified)
    )
}

pub fn write_header<W: Write>(out: &mut W, bucket: &BucketName) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Listing files in S3 bucket: {}", bucket)?;
    writeln!(out, "{}", "-".repeat(50))
}

pub fn write_no_files<W: Write>(out: &mut W, bucket: &BucketName) -> io::Result<()> {
    writeln!(out, "No files found in bucket '{}'", bucket)
}

/// Numbered rows followed by the total count, which is always the last line.
pub fn write_listing<W: Write>(
    out: &mut W,
    records: &[FileRecord],
    truncated: bool,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Files in bucket:")?;
    for (i, record) in records.iter().enumerate() {
        writeln!(out, "{}", format_row(i + 1, record))?;
    }
    if truncated {
        write_truncation_note(out)?;
    }
    writeln!(out)?;
    writeln!(out, "Total files: {}", records.len())
}

pub fn write_truncation_note<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "Note: the bucket holds more objects; only the first page is shown."
    )
}

pub fn write_error<W: Write>(out: &mut W, err: &ListerError) -> io::Result<()> {
    writeln!(out, "Error: {}", err)?;
    for line in err.hint() {
        writeln!(out, "{}", line)?;
    }
    out.flush()
}
