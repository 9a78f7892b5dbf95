use anyhow::Result;
use lazy_static::lazy_static;
use regex::Regex;
use std::fs;
use std::path::Path;

lazy_static! {
    // dependency and build output directories never hold sources we own
    static ref IGNORED_DIRS: Regex =
        Regex::new(r"^(node_modules|target|build|dist|\.git)$").unwrap();
}

/// directories the source walk never descends into, judged by their own name only
pub fn is_ignored_dir(path: &Path) -> bool {
    path.file_name()
        .map(|name| IGNORED_DIRS.is_match(&name.to_string_lossy()))
        .unwrap_or(false)
}

/// check if a file should be analysed based on its extension and size
pub fn should_analyse_file(path: &Path, max_size: usize, extensions: &[String]) -> Result<bool> {
    // skip files that don't exist
    if !path.exists() {
        return Ok(false);
    }

    // skip directories
    if path.is_dir() {
        return Ok(false);
    }

    // only configured extensions
    let matches_extension = path
        .extension()
        .map(|ext| {
            let ext = ext.to_string_lossy();
            extensions.iter().any(|wanted| wanted.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false);
    if !matches_extension {
        return Ok(false);
    }

    // check file size
    let metadata = fs::metadata(path)?;
    if metadata.len() > max_size as u64 {
        return Ok(false);
    }

    Ok(true)
}

/// truncate a string to a maximum length with ellipsis
pub fn truncate_with_ellipsis(text: &str, max_length: usize) -> String {
    if text.len() <= max_length {
        text.to_string()
    } else {
        // Use Unicode-safe truncation to avoid panics with emoji characters
        let truncate_at = std::cmp::min(max_length.saturating_sub(3), text.len());
        let mut end_pos = truncate_at;

        // Find the nearest character boundary before truncate_at
        while end_pos > 0 && !text.is_char_boundary(end_pos) {
            end_pos -= 1;
        }

        format!("{}...", &text[..end_pos])
    }
}
