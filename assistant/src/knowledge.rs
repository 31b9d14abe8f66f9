//! Knowledge base loading
//!
//! The QIIME 2 manual is a directory of Markdown pages. All pages are
//! concatenated into one blob, each preceded by a `--- {filename} ---`
//! header, in filename order so repeated loads produce identical prompts.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Extension of the documents that make up the knowledge base
const DOCUMENT_EXTENSION: &str = "md";

/// Separator placed between documents in the blob
const DOCUMENT_SEPARATOR: &str = "\n\n";

/// List matching documents in `dir`, sorted by filename
///
/// Hidden files are skipped. A missing or unreadable directory yields an
/// empty list.
pub fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("Knowledge base directory {} unavailable: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut documents: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter_map(|entry| {
            let name = entry.file_name().into_string().ok()?;
            let path = entry.path();
            let is_document = !name.starts_with('.')
                && path.extension().and_then(|e| e.to_str()) == Some(DOCUMENT_EXTENSION);
            is_document.then_some((name, path))
        })
        // Follows symlinks; dangling links and directories are dropped
        .filter(|(_, path)| std::fs::metadata(path).map(|m| m.is_file()).unwrap_or(false))
        .collect();

    documents.sort_by(|a, b| a.0.cmp(&b.0));
    documents.into_iter().map(|(_, path)| path).collect()
}

/// Read every document in `dir` into a single blob
///
/// Returns an empty string when there is nothing to load.
pub fn load_documents(dir: &Path) -> String {
    let documents = find_documents(dir);
    if documents.is_empty() {
        tracing::debug!("No documents found in {}", dir.display());
        return String::new();
    }

    let mut blocks = Vec::with_capacity(documents.len());
    for path in &documents {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match std::fs::read_to_string(path) {
            Ok(content) => blocks.push(format!("--- {} ---\n{}", filename, content)),
            Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    tracing::info!("Loaded {} documents from {}", blocks.len(), dir.display());
    blocks.join(DOCUMENT_SEPARATOR)
}

/// Lazily loaded, immutable knowledge base
///
/// The blob is read at most once until [`KnowledgeBase::reload`] is called.
#[derive(Debug)]
pub struct KnowledgeBase {
    dir: PathBuf,
    text: OnceLock<String>,
}

impl KnowledgeBase {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            text: OnceLock::new(),
        }
    }

    /// Directory the documents are read from
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The concatenated documents, loading them on first access
    pub fn text(&self) -> &str {
        self.text.get_or_init(|| load_documents(&self.dir))
    }

    /// Number of documents currently on disk
    pub fn document_count(&self) -> usize {
        find_documents(&self.dir).len()
    }

    /// Drop the cached blob so the next access reads the directory again
    pub fn reload(&mut self) {
        self.text = OnceLock::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn header_positions(blob: &str, names: &[&str]) -> Vec<usize> {
        names
            .iter()
            .map(|n| blob.find(&format!("--- {} ---", n)).expect("header missing"))
            .collect()
    }

    #[test]
    fn test_headers_in_filename_order() {
        let dir = TempDir::new().unwrap();
        // Created out of order on purpose
        fs::write(dir.path().join("03_diversity.md"), "beta").unwrap();
        fs::write(dir.path().join("01_import.md"), "import").unwrap();
        fs::write(dir.path().join("02_dada2.md"), "denoise").unwrap();

        let blob = load_documents(dir.path());

        assert_eq!(blob.matches("--- ").count(), 3);
        let positions = header_positions(&blob, &["01_import.md", "02_dada2.md", "03_diversity.md"]);
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        assert!(blob.starts_with("--- 01_import.md ---\nimport\n\n--- 02_dada2.md ---"));
    }

    #[test]
    fn test_only_markdown_files() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "A").unwrap();
        fs::write(dir.path().join("b.txt"), "B").unwrap();
        fs::write(dir.path().join(".hidden.md"), "H").unwrap();
        fs::create_dir(dir.path().join("sub.md")).unwrap();

        let blob = load_documents(dir.path());
        assert_eq!(blob, "--- a.md ---\nA");
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_documents() {
        let dir = TempDir::new().unwrap();
        let shared = TempDir::new().unwrap();
        fs::write(shared.path().join("taxonomy.md"), "classifier").unwrap();
        fs::write(dir.path().join("a.md"), "A").unwrap();
        std::os::unix::fs::symlink(shared.path().join("taxonomy.md"), dir.path().join("b.md"))
            .unwrap();
        std::os::unix::fs::symlink(shared.path().join("gone.md"), dir.path().join("c.md")).unwrap();

        assert_eq!(
            load_documents(dir.path()),
            "--- a.md ---\nA\n\n--- b.md ---\nclassifier"
        );
    }

    #[test]
    fn test_missing_directory() {
        let dir = TempDir::new().unwrap();
        let blob = load_documents(&dir.path().join("does-not-exist"));
        assert_eq!(blob, "");
    }

    #[test]
    fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert_eq!(load_documents(dir.path()), "");
    }

    #[test]
    fn test_non_utf8_document_is_skipped() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), [0xff, 0xfe, 0x00]).unwrap();
        fs::write(dir.path().join("b.md"), "B").unwrap();

        assert_eq!(load_documents(dir.path()), "--- b.md ---\nB");
    }

    #[test]
    fn test_knowledge_base_loads_once() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.md"), "first").unwrap();

        let mut kb = KnowledgeBase::new(dir.path());
        assert!(!kb.text.get().is_some());
        assert!(kb.text().contains("first"));
        assert!(kb.text.get().is_some());

        fs::write(dir.path().join("a.md"), "second").unwrap();
        assert!(kb.text().contains("first"));
        assert_eq!(kb.document_count(), 1);

        kb.reload();
        assert!(!kb.text.get().is_some());
        assert!(kb.text().contains("second"));
    }
}
