use crate::config::ScanConfig;
use crate::utils::{is_ignored_dir, should_analyse_file};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// a cadence file read from disk
pub struct SourceFile {
    pub path: PathBuf,
    pub content: String,
}

/// gather cadence sources from files and directories, in a stable order
pub fn collect_sources(paths: &[PathBuf], scan: &ScanConfig) -> Result<Vec<SourceFile>> {
    let max_size = scan.max_file_size_kb * 1024;
    let mut candidates = Vec::new();

    for path in paths {
        if !path.exists() {
            return Err(anyhow::anyhow!("path does not exist: {}", path.display()));
        }
        if path.is_dir() {
            walk_directory(path, &mut candidates)
                .with_context(|| format!("failed to read directory {}", path.display()))?;
        } else {
            candidates.push(path.clone());
        }
    }

    let mut sources = Vec::new();
    for path in candidates {
        if sources.len() >= scan.max_files {
            debug!(max_files = scan.max_files, "file limit reached, ignoring the rest");
            break;
        }
        if !should_analyse_file(&path, max_size, &scan.extensions)? {
            debug!(path = %path.display(), "skipping file");
            continue;
        }

        let bytes = fs::read(&path).with_context(|| format!("failed to read {}", path.display()))?;
        sources.push(SourceFile {
            content: decode_source(&bytes),
            path,
        });
    }

    Ok(sources)
}

fn walk_directory(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if path.is_dir() {
            if is_ignored_dir(&path) {
                debug!(path = %path.display(), "skipping ignored directory");
                continue;
            }
            walk_directory(&path, out)?;
        } else {
            out.push(path);
        }
    }
    Ok(())
}

/// decode file bytes as text, honouring a byte order mark and replacing invalid sequences
pub fn decode_source(bytes: &[u8]) -> String {
    // utf-8 unless a bom says otherwise
    let (cow, _encoding_used, _had_errors) = encoding_rs::UTF_8.decode(bytes);
    cow.into_owned()
}
