use crate::errors::{AppError, AppResult};
use crate::export::model::{ExportRow, rows_to_table};
use crate::export::notify_export_success;
use crate::export::pdf::PdfManager;
use crate::ui::messages::info;
use std::path::Path;

/// Export PDF: one table, paginated, with an optional closing line.
pub(crate) fn export_pdf<T: ExportRow>(
    rows: &[T],
    path: &Path,
    title: &str,
    footer: Option<&str>,
) -> AppResult<()> {
    info(format!("Exporting to PDF: {}", path.display()));

    let data = rows_to_table(rows);

    let mut pdf = PdfManager::new();
    pdf.write_table(title, T::headers(), &data, footer);

    pdf.save(path)
        .map_err(|e| AppError::Export(format!("PDF export error: {e}")))?;

    notify_export_success("PDF", path);
    Ok(())
}
