//! Recursive discovery of source documents.

use lexprep_core::DocumentFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Collect every file under `root` whose extension maps to one of `formats`.
///
/// Order follows directory traversal and is not sorted. Directory symlinks
/// are not followed. Unreadable directories are logged and skipped, and a
/// missing root yields no files.
#[must_use]
pub fn collect_files(root: &Path, formats: &[DocumentFormat]) -> Vec<PathBuf> {
    let mut files = Vec::new();
    visit_dir(root, formats, &mut files);
    debug!("Found {} source files under {:?}", files.len(), root);
    files
}

fn visit_dir(dir: &Path, formats: &[DocumentFormat], files: &mut Vec<PathBuf>) {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Cannot read directory {:?}: {}", dir, e);
            return;
        }
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);

        if is_dir {
            visit_dir(&path, formats, files);
        } else if path.is_file() && is_supported(&path, formats) {
            files.push(path);
        }
    }
}

fn is_supported(path: &Path, formats: &[DocumentFormat]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(DocumentFormat::from_extension)
        .is_some_and(|format| formats.contains(&format))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"x").unwrap();
    }

    fn sorted_names(files: &[PathBuf], root: &Path) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_collects_nested_supported_files() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.pdf"));
        touch(&root.join("nested/deeper/B.DOCX"));
        touch(&root.join("nested/notes.txt"));
        touch(&root.join("nested/old.doc"));
        touch(&root.join("README"));

        let files = collect_files(root, &DocumentFormat::ALL);

        assert_eq!(sorted_names(&files, root), vec!["a.pdf", "nested/deeper/B.DOCX"]);
    }

    #[test]
    fn test_filters_by_format() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        touch(&root.join("a.pdf"));
        touch(&root.join("b.docx"));

        let files = collect_files(root, &[DocumentFormat::Docx]);

        assert_eq!(sorted_names(&files, root), vec!["b.docx"]);
    }

    #[test]
    fn test_directory_named_like_document_is_not_collected() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("archive.pdf")).unwrap();
        touch(&root.join("archive.pdf/inner.pdf"));

        let files = collect_files(root, &DocumentFormat::ALL);

        assert_eq!(sorted_names(&files, root), vec!["archive.pdf/inner.pdf"]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let files = collect_files(Path::new("/nonexistent/contracts"), &DocumentFormat::ALL);
        assert!(files.is_empty());
    }

    #[test]
    fn test_empty_directory() {
        let temp_dir = tempdir().unwrap();
        assert!(collect_files(temp_dir.path(), &DocumentFormat::ALL).is_empty());
    }
}
