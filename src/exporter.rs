use crate::config::ExportConfig;
use crate::csv_output::CsvAccumulator;
use crate::errors::{AppError, AppResult};
use crate::models::{BidMonth, ExportFormat, ExportRequest, ExportSummary};
use crate::period::MonthPlan;
use crate::session::{AuthenticatedSession, Session};
use crate::ui;
use indicatif::ProgressBar;
use tokio::fs::File;
use tokio::io::AsyncWrite;
use tracing::{debug, info, warn};

/// Runs a complete export: login, one CSV download per bid month, one output file.
///
/// # Behavior
///
/// - **Clamping**: ranges longer than `config.max_months` keep only the most
///   recent months; the truncation is logged.
/// - **Late file creation**: the output file is created only after login
///   succeeds, so a failed login leaves nothing on disk.
/// - **No rollback**: if an export fails part-way, the months already written
///   stay in the file and the error is returned.
///
/// # Errors
///
/// Returns the first error hit by the login, any export request, or a file
/// write. Nothing is retried.
pub async fn run_export(
    request: &ExportRequest,
    config: &ExportConfig,
) -> AppResult<ExportSummary> {
    let plan = MonthPlan::new(&request.range, config.max_months);
    report_plan(&plan);

    let session = Session::open(config)?;
    let session = session.login(&request.credentials).await?;

    let path = request.output_path();
    let file = File::create(&path).await.map_err(|e| {
        AppError::IoError(format!("Failed to create {}: {}", path.display(), e))
    })?;
    let mut csv = CsvAccumulator::new(file);

    let pb = ui::create_progress_bar(plan.len() as u64)?;
    match export_months(&session, plan.months(), request.format, &mut csv, &pb).await {
        Ok(()) => pb.finish_with_message(format!("Exported {} month(s)", plan.len())),
        Err(e) => {
            pb.abandon_with_message("Export aborted");
            return Err(e);
        }
    }

    let rows_written = csv.rows();
    csv.finish().await?;
    session.close();

    let summary = ExportSummary {
        path,
        months_exported: plan.len(),
        rows_written,
    };
    info!(
        path = %summary.path.display(),
        months = summary.months_exported,
        rows = summary.rows_written,
        "Export completed"
    );
    Ok(summary)
}

/// Downloads each bid month in order and feeds its body to `csv`.
///
/// Stops at the first failure; earlier months are already flushed.
pub async fn export_months<W: AsyncWrite + Unpin>(
    session: &AuthenticatedSession,
    months: &[BidMonth],
    format: ExportFormat,
    csv: &mut CsvAccumulator<W>,
    pb: &ProgressBar,
) -> AppResult<()> {
    for bid_month in months {
        pb.set_message(format!("BidMonth {bid_month}"));

        let body = session.fetch_export(*bid_month, format).await?;
        let rows = csv.push_month(&body).await?;

        debug!(bid_month = %bid_month, rows = rows, "Month exported");
        pb.inc(1);
    }
    Ok(())
}

fn report_plan(plan: &MonthPlan) {
    if plan.is_truncated() {
        let new_start = plan
            .effective_start()
            .map(|m| m.to_string())
            .unwrap_or_default();
        warn!(
            requested = plan.requested(),
            kept = plan.len(),
            new_start = %new_start,
            "Too many months requested, keeping only the most recent"
        );
    }
    if let (Some(first), Some(last)) = (plan.months().first(), plan.months().last()) {
        info!(from = %first, to = %last, months = plan.len(), "Exporting bid months");
    }
}
