//! Concatenation of monthly CSV exports into one file.
//!
//! Month bodies are trusted verbatim: lines are trimmed and passed through,
//! never parsed as CSV or checked against the header's column count.

use crate::constants::LINE_ENDING;
use crate::errors::{AppError, AppResult};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Splits a month body into its header line and the data lines after it.
///
/// The header is the first non-blank line. Returns `None` for a body with no
/// content at all.
pub fn split_month(body: &str) -> Option<(&str, impl Iterator<Item = &str>)> {
    let mut lines = body.lines().skip_while(|line| line.trim().is_empty());
    let header = lines.next()?.trim();
    Some((header, lines.map(str::trim_end)))
}

/// Writes the header of the first non-empty month once, then every month's
/// data rows in the order they are pushed.
///
/// The writer is flushed after each month so that a run aborted part-way
/// leaves the months already exported on disk.
#[derive(Debug)]
pub struct CsvAccumulator<W> {
    writer: W,
    header_written: bool,
    months: usize,
    rows: usize,
}

impl<W: AsyncWrite + Unpin> CsvAccumulator<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            header_written: false,
            months: 0,
            rows: 0,
        }
    }

    /// Appends one month's export body and returns the number of data rows written.
    ///
    /// An empty body is skipped without writing anything.
    pub async fn push_month(&mut self, body: &str) -> AppResult<usize> {
        self.months += 1;

        let Some((header, data)) = split_month(body) else {
            return Ok(0);
        };

        let mut chunk = String::with_capacity(body.len() + LINE_ENDING.len());
        if !self.header_written {
            chunk.push_str(header);
            chunk.push_str(LINE_ENDING);
        }

        let mut written = 0;
        for line in data {
            chunk.push_str(line);
            chunk.push_str(LINE_ENDING);
            written += 1;
        }

        self.write(&chunk).await?;
        self.header_written = true;
        self.rows += written;
        Ok(written)
    }

    async fn write(&mut self, chunk: &str) -> AppResult<()> {
        self.writer
            .write_all(chunk.as_bytes())
            .await
            .map_err(|e| AppError::IoError(format!("Failed to write CSV output: {e}")))?;
        self.writer
            .flush()
            .await
            .map_err(|e| AppError::IoError(format!("Failed to flush CSV output: {e}")))
    }

    /// Number of month bodies pushed so far, empty ones included.
    pub fn months(&self) -> usize {
        self.months
    }

    /// Number of data rows written so far, header excluded.
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn header_written(&self) -> bool {
        self.header_written
    }

    /// Flushes and shuts down the writer, handing it back.
    pub async fn finish(mut self) -> AppResult<W> {
        self.writer
            .shutdown()
            .await
            .map_err(|e| AppError::IoError(format!("Failed to close CSV output: {e}")))?;
        Ok(self.writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expected(lines: &[&str]) -> String {
        lines
            .iter()
            .map(|line| format!("{line}{LINE_ENDING}"))
            .collect()
    }

    async fn accumulate(bodies: &[&str]) -> (String, usize) {
        let mut csv = CsvAccumulator::new(Vec::new());
        for body in bodies {
            csv.push_month(body).await.unwrap();
        }
        let rows = csv.rows();
        let bytes = csv.finish().await.unwrap();
        (String::from_utf8(bytes).unwrap(), rows)
    }

    #[test]
    fn test_split_month_skips_leading_blank_lines() {
        let (header, rows) = split_month("\n  \nDate,Block \nA\n").unwrap();
        assert_eq!(header, "Date,Block");
        assert_eq!(rows.collect::<Vec<_>>(), vec!["A"]);
    }

    #[test]
    fn test_split_month_empty_body() {
        assert!(split_month("").is_none());
        assert!(split_month("\r\n \n").is_none());
    }

    #[tokio::test]
    async fn test_header_written_once_and_rows_in_order() {
        let (output, rows) = accumulate(&["Header\nA\nB", "Header\nC", "Header\n"]).await;
        assert_eq!(output, expected(&["Header", "A", "B", "C"]));
        assert_eq!(rows, 3);
    }

    #[tokio::test]
    async fn test_rows_are_right_trimmed() {
        let (output, _) = accumulate(&["Date,Block\r\n  01,1:30  \r\n02,2:00\t\r\n"]).await;
        assert_eq!(output, expected(&["Date,Block", "  01,1:30", "02,2:00"]));
    }

    #[tokio::test]
    async fn test_empty_first_month_defers_header() {
        let (output, rows) = accumulate(&["", "Header\nA", "Header\nB"]).await;
        assert_eq!(output, expected(&["Header", "A", "B"]));
        assert_eq!(rows, 2);
    }

    #[tokio::test]
    async fn test_header_only_months_write_only_the_header() {
        let (output, rows) = accumulate(&["Header", "Header\n"]).await;
        assert_eq!(output, expected(&["Header"]));
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_all_empty_months_write_nothing() {
        let mut csv = CsvAccumulator::new(Vec::new());
        csv.push_month("").await.unwrap();
        csv.push_month("\n").await.unwrap();
        assert_eq!(csv.months(), 2);
        assert!(!csv.header_written());
        assert!(csv.finish().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_push_month_returns_rows_added() {
        let mut csv = CsvAccumulator::new(Vec::new());
        assert_eq!(csv.push_month("H\n1\n2\n3").await.unwrap(), 3);
        assert_eq!(csv.push_month("H").await.unwrap(), 0);
        assert_eq!(csv.rows(), 3);
    }
}
