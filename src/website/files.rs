use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};

/// Checks that `root` looks like a checkout of the generated site before any
/// file under it is touched.
pub fn validate_site_root(root: &Path, writings_dir: &str) -> AppResult<()> {
    if !root.exists() {
        return Err(AppError::NotFound(format!(
            "site root does not exist: {}",
            root.display()
        )));
    }
    let required = [
        root.join("package.json"),
        root.join("src"),
        root.join(writings_dir),
    ];
    for path in required {
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "required site path missing: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

/// Structural sanity checks on generated page source: the top-level markers
/// every page carries plus balanced delimiter counts. This is deliberately
/// superficial; the pages are machine-generated and narrowly shaped.
pub fn component_is_well_formed(content: &str) -> bool {
    let balanced = |open: char, close: char| {
        content.matches(open).count() == content.matches(close).count()
    };
    content.contains("import React")
        && content.contains("export default")
        && balanced('{', '}')
        && balanced('(', ')')
        && balanced('[', ']')
}

pub fn validate_page_component(path: &Path) -> bool {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let valid = component_is_well_formed(&content);
            if !valid {
                tracing::error!(path = %path.display(), "page component failed structural checks");
            }
            valid
        }
        Err(error) => {
            tracing::error!(path = %path.display(), error = %error, "could not read page component");
            false
        }
    }
}

/// Generated writing pages, sorted, excluding the index itself.
pub fn writing_pages(writings_dir: &Path) -> Vec<PathBuf> {
    let Ok(reader) = std::fs::read_dir(writings_dir) else {
        tracing::warn!(path = %writings_dir.display(), "could not list writings directory");
        return Vec::new();
    };
    let mut pages: Vec<PathBuf> = reader
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "js"))
        .filter(|path| {
            path.file_name()
                .is_some_and(|name| name != "index.js")
        })
        .collect();
    pages.sort();
    pages
}
