//! Template catalog
//!
//! Templates are plain `.tex` files in the templates directory, identified
//! by filename stem. Lookup accepts names with or without the extension.

use std::path::{Path, PathBuf};

use crate::error::{VitaeError, VitaeResult};

/// File name for a template, with the `.tex` suffix exactly once
pub fn template_file_name(name: &str) -> String {
    let stem = name.strip_suffix(".tex").unwrap_or(name);
    format!("{stem}.tex")
}

/// List template stems in a directory, sorted
pub fn list_templates(dir: &Path) -> VitaeResult<Vec<String>> {
    if !dir.is_dir() {
        return Err(VitaeError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut templates = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map(|e| e == "tex").unwrap_or(false) {
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                templates.push(stem.to_string());
            }
        }
    }

    templates.sort();
    Ok(templates)
}

/// Resolve a template name to its source file, erroring with the available
/// stems when it does not exist
pub fn resolve_template(dir: &Path, name: &str) -> VitaeResult<PathBuf> {
    if !dir.is_dir() {
        return Err(VitaeError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }

    let path = dir.join(template_file_name(name));
    if path.is_file() {
        return Ok(path);
    }

    let available = list_templates(dir).unwrap_or_default();
    Err(VitaeError::TemplateNotFound {
        name: name.strip_suffix(".tex").unwrap_or(name).to_string(),
        dir: dir.to_path_buf(),
        available: if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        },
    })
}
