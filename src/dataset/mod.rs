use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Training,
    Validation,
}

/// A labeled image directory: one subdirectory per expected move, each
/// holding example images for that move.
#[derive(Debug, Clone)]
pub struct Dataset {
    pub name: String,
    pub kind: DatasetKind,
    pub resource_directory: PathBuf,
    pub moves: Vec<String>,
    pub is_new: bool,
}

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Dataset {
    pub fn new(name: &str, kind: DatasetKind, resource_directory: &Path, moves: &[String]) -> Self {
        Self {
            name: name.to_string(),
            kind,
            resource_directory: resource_directory.to_path_buf(),
            moves: moves.to_vec(),
            is_new: false,
        }
    }

    /// Lists every dataset under `root`, one per subdirectory.
    pub fn scan(root: &Path, kind: DatasetKind, moves: &[String]) -> Result<Vec<Dataset>, DatasetError> {
        let entries = std::fs::read_dir(root).map_err(|source| DatasetError::ReadDir {
            path: root.to_path_buf(),
            source,
        })?;

        let mut datasets = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let name = path
                .file_name()
                .and_then(|file_name| file_name.to_str())
                .unwrap_or_default()
                .to_string();
            datasets.push(Dataset::new(&name, kind, &path, moves));
        }
        datasets.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(datasets)
    }

    /// Example images found per expected move. A missing move directory
    /// counts as zero.
    pub fn example_counts(&self) -> BTreeMap<String, usize> {
        self.moves
            .iter()
            .map(|label| {
                let count = count_images(&self.resource_directory.join(label));
                (label.clone(), count)
            })
            .collect()
    }

    /// Trainable only when every expected move has at least the minimum
    /// number of examples.
    pub fn has_enough_examples(&self, min_per_move: usize) -> bool {
        !self.moves.is_empty()
            && self
                .example_counts()
                .values()
                .all(|count| *count >= min_per_move)
    }
}

fn count_images(dir: &Path) -> usize {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .flatten()
        .filter(|entry| {
            let path = entry.path();
            path.is_file()
                && path
                    .extension()
                    .and_then(|extension| extension.to_str())
                    .map(|extension| {
                        IMAGE_EXTENSIONS.contains(&extension.to_lowercase().as_str())
                    })
                    .unwrap_or(false)
        })
        .count()
}
