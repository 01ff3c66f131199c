use crate::errors::{AppError, AppResult};
use indicatif::{ProgressBar, ProgressStyle};

const MONTH_TEMPLATE: &str =
    "{spinner:.green} {msg:<16} [{bar:40.cyan/blue}] {pos}/{len} months ({elapsed})";

/// Progress bar counting exported bid months.
///
/// The message slot shows the bid month currently being downloaded; it starts
/// out as "Logged in" until the first export request goes out.
pub fn create_progress_bar(months: u64) -> AppResult<ProgressBar> {
    let style = ProgressStyle::default_bar()
        .template(MONTH_TEMPLATE)
        .map_err(|e| AppError::IoError(format!("Invalid progress bar template: {e}")))?
        .progress_chars("=> ");

    let pb = ProgressBar::new(months).with_style(style);
    pb.set_message("Logged in");
    Ok(pb)
}

#[cfg(test)]
mod tests {
    use super::create_progress_bar;

    #[test]
    fn progress_bar_counts_months() {
        let pb = create_progress_bar(5).unwrap();
        assert_eq!(pb.length(), Some(5));
        assert_eq!(pb.position(), 0);
        assert_eq!(pb.message(), "Logged in");
        pb.inc(2);
        assert_eq!(pb.position(), 2);
        pb.finish_and_clear();
    }
}
