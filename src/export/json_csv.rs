use crate::errors::{AppError, AppResult};
use crate::export::model::ExportRow;
use crate::export::notify_export_success;
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed. `extra` is added next to the rows when given
/// (e.g. the rollup of a report).
pub(crate) fn export_json<T: ExportRow, E: Serialize>(
    rows: &[T],
    extra: Option<(&str, &E)>,
    path: &Path,
) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let value = match extra {
        None => serde_json::to_value(rows),
        Some((key, e)) => serde_json::to_value(e).and_then(|ev| {
            let mut map = serde_json::Map::new();
            map.insert("rows".to_string(), serde_json::to_value(rows)?);
            map.insert(key.to_string(), ev);
            Ok(serde_json::Value::Object(map))
        }),
    }
    .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let json_data = serde_json::to_string_pretty(&value)
        .map_err(|e| AppError::Export(format!("JSON serialization error: {e}")))?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// Export CSV; the header line comes from the row's field names.
pub(crate) fn export_csv<T: ExportRow>(rows: &[T], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::Export(format!("CSV open error: {e}")))?;

    for item in rows {
        wtr.serialize(item)
            .map_err(|e| AppError::Export(format!("CSV write error: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::Export(format!("CSV flush error: {e}")))?;

    notify_export_success("CSV", path);
    Ok(())
}
