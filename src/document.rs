use std::path::{Path, PathBuf};

/// Output locations for one (course, document) pair under the output root.
///
/// In-progress page images live in a per-document directory next to where
/// the finished PDF will land; the directory is removed once the PDF is
/// written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentPaths {
    pages_dir: PathBuf,
    pdf_path: PathBuf,
}

impl DocumentPaths {
    pub fn new(root: &Path, course: &str, name: &str) -> Self {
        let course_dir = root.join(course);
        Self {
            pages_dir: course_dir.join(name),
            pdf_path: course_dir.join(format!("{name}.pdf")),
        }
    }

    /// Directory holding the in-progress page images.
    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    /// Image path for a single page index.
    pub fn page_path(&self, index: u32) -> PathBuf {
        self.pages_dir.join(format!("{index}.png"))
    }

    /// Ordered page images for indices `0..count`.
    pub fn page_paths(&self, count: u32) -> Vec<PathBuf> {
        (0..count).map(|index| self.page_path(index)).collect()
    }

    /// The finished document.
    pub fn pdf_path(&self) -> &Path {
        &self.pdf_path
    }
}
