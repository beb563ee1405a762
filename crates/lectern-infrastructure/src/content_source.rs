//! Content source backed by a local docs tree.
//!
//! Page paths mirror the published site: `/docs/module-1/ros2-nodes`
//! resolves to `<docs_root>/module-1/ros2-nodes.md` (or `.mdx`, or a
//! directory `index.md`). YAML frontmatter is stripped so transform
//! requests carry only the lesson body.

use async_trait::async_trait;
use lectern_core::{ContentSource, LecternError, PageId, Result, SourceContent};
use std::path::{Path, PathBuf};
use tracing::debug;

pub struct DirContentSource {
    root: PathBuf,
}

impl DirContentSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Candidate files for a page, in resolution order.
    fn candidates(&self, page: &PageId) -> Vec<PathBuf> {
        let rel = page
            .as_str()
            .strip_prefix("/docs/")
            .unwrap_or_else(|| page.as_str().trim_start_matches('/'));
        vec![
            self.root.join(format!("{rel}.md")),
            self.root.join(format!("{rel}.mdx")),
            self.root.join(rel).join("index.md"),
        ]
    }
}

/// Drops a leading `--- ... ---` frontmatter block, if present.
fn strip_frontmatter(raw: &str) -> &str {
    let Some(rest) = raw.strip_prefix("---") else {
        return raw;
    };
    match rest.find("\n---") {
        Some(end) => {
            let after = &rest[end + 4..];
            after.strip_prefix('\n').unwrap_or(after)
        }
        None => raw,
    }
}

#[async_trait]
impl ContentSource for DirContentSource {
    async fn load(&self, page: &PageId) -> Result<SourceContent> {
        for candidate in self.candidates(page) {
            match tokio::fs::read_to_string(&candidate).await {
                Ok(raw) => {
                    debug!(page = %page, path = %candidate.display(), "page resolved");
                    return SourceContent::new(strip_frontmatter(&raw));
                }
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => continue,
                Err(err) => return Err(err.into()),
            }
        }
        Err(LecternError::not_found("page", page.as_str()))
    }
}

impl DirContentSource {
    pub fn root(&self) -> &Path {
        &self.root
    }
}
