use crate::error::ListerError;
use crate::models::BucketName;
use std::io::{BufRead, Write};

pub const BUCKET_PROMPT: &str = "Enter S3 bucket name: ";

/// Ask for a bucket name on `input`. End of input counts as an empty answer.
pub fn read_bucket_name<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<BucketName, ListerError> {
    write!(out, "{}", BUCKET_PROMPT)?;
    out.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    BucketName::parse(&line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_reads_first_line() {
        let mut input = Cursor::new("  photos-archive \nignored\n");
        let mut out = Vec::new();
        let name = read_bucket_name(&mut input, &mut out).unwrap();
        assert_eq!(name.as_str(), "photos-archive");
        assert_eq!(String::from_utf8(out).unwrap(), BUCKET_PROMPT);
    }

    #[test]
    fn test_eof_is_empty() {
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert!(matches!(
            read_bucket_name(&mut input, &mut out),
            Err(ListerError::EmptyBucketName)
        ));
    }
}
