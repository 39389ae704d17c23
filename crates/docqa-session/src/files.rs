//! File selection.
//!
//! Only PDFs are accepted. The filter runs before a selection reaches the
//! reducer, the way a file picker's `accept` attribute would.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// A document chosen for the next upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    /// File name sent to the service and shown in the conversation.
    pub name: String,
}

impl SelectedFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
        Self { path, name }
    }
}

/// Result of filtering a batch of paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Selection {
    pub accepted: Vec<SelectedFile>,
    pub rejected: Vec<PathBuf>,
}

pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Splits `paths` into accepted PDFs and rejected paths, preserving order.
pub fn select_pdfs<I, P>(paths: I) -> Selection
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let mut selection = Selection::default();
    for path in paths {
        let path = path.into();
        if is_pdf(&path) {
            selection.accepted.push(SelectedFile::new(path));
        } else {
            selection.rejected.push(path);
        }
    }
    selection
}

/// Comma-separated file names, in selection order.
pub fn joined_names<'a>(names: impl IntoIterator<Item = &'a str>) -> String {
    names.into_iter().collect::<Vec<_>>().join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_pdfs_filters_and_keeps_order() {
        let selection = select_pdfs(["docs/b.pdf", "notes.txt", "a.PDF", "pdf", "scan.pdf.bak"]);

        let names: Vec<_> = selection.accepted.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b.pdf", "a.PDF"]);
        assert_eq!(
            selection.rejected,
            vec![
                PathBuf::from("notes.txt"),
                PathBuf::from("pdf"),
                PathBuf::from("scan.pdf.bak")
            ]
        );
    }

    #[test]
    fn test_selected_file_name_is_last_component() {
        let file = SelectedFile::new("/tmp/reports/q3.pdf");
        assert_eq!(file.name, "q3.pdf");
        assert_eq!(file.path, PathBuf::from("/tmp/reports/q3.pdf"));
    }

    #[test]
    fn test_joined_names() {
        assert_eq!(joined_names(["a.pdf", "b.pdf"]), "a.pdf, b.pdf");
        assert_eq!(joined_names(std::iter::empty()), "");
    }
}
