use crate::models::{FilePath, WorkList};
use crate::services::picker::FilePicker;
use crate::state::LogSink;
use indexmap::IndexSet;

/// Header written before the list of selected files
pub const SELECTED_HEADER: &str = "Selected files:";

/// Log line naming one file, used for both selection and processing
pub fn file_line(path: &FilePath) -> String {
    format!(" - {}", path)
}

/// Ask the picker for files and queue them.
///
/// Returns the distinct selected paths in the order the picker presented
/// them. When the picker yields nothing usable the work list and log are
/// left untouched and the result is empty.
pub fn select_files<F>(picker: &mut F, work_list: &mut WorkList, log: &mut LogSink) -> Vec<FilePath>
where
    F: FilePicker + ?Sized,
{
    let selection = picker.pick();
    if selection.is_empty() {
        tracing::debug!("Selection cancelled or empty");
        return Vec::new();
    }

    let selected: IndexSet<FilePath> = selection
        .files
        .iter()
        .filter_map(|raw| FilePath::from_native(selection.directory.as_deref(), raw))
        .collect();

    if selected.is_empty() {
        tracing::warn!("No usable paths in selection of {} files", selection.files.len());
        return Vec::new();
    }

    let added = work_list.merge(selected.iter().cloned());
    tracing::info!(
        "Selected {} files ({} new), {} pending",
        selected.len(),
        added,
        work_list.len()
    );

    log.append(SELECTED_HEADER);
    for path in &selected {
        log.append(file_line(path));
    }

    selected.into_iter().collect()
}
