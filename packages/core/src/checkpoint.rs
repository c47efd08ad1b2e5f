use std::fs;
use std::path::{Path, PathBuf};

/// Pick the trained artifact to load from a training output directory.
///
/// Preference order: the last `checkpoint-*` entry directly inside the
/// directory in ascending name order, then the directory itself when it
/// directly contains a `config.json`. Absence is a normal outcome, never an
/// error; the caller substitutes the public fallback model.
///
/// The ordering is a plain name sort, matching the glob ordering of the
/// training side: once ordinals reach two digits, "checkpoint-10" sorts
/// before "checkpoint-5".
pub fn latest_checkpoint(dir: &Path) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => {
            tracing::debug!("Checkpoint directory {} is not readable", dir.display());
            return None;
        }
    };

    let mut checkpoints: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .and_then(|name| name.to_str())
                .is_some_and(|name| name.starts_with("checkpoint-"))
        })
        .collect();

    if checkpoints.is_empty() {
        if dir.join("config.json").is_file() {
            return Some(dir.to_path_buf());
        }
        tracing::debug!("No checkpoint found in {}", dir.display());
        return None;
    }

    checkpoints.sort();
    checkpoints.pop()
}
