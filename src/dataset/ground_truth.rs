use crate::dataset::labels::read_labels;
use crate::evaluator::error::EvaluationError;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct GroundTruthImage {
    pub name: String,
    pub path: PathBuf,
    pub label: String,
}

// Sorted by file name; the n-th image takes the n-th label.
#[derive(Debug, Clone, Default)]
pub struct GroundTruthDataset {
    images: Vec<GroundTruthImage>,
}

impl GroundTruthDataset {
    /// `number_of_images == 0` keeps every image.
    pub fn load(
        images_path: &Path,
        labels_path: &Path,
        number_of_images: usize,
    ) -> Result<Self, EvaluationError> {
        if !images_path.is_dir() {
            return Err(EvaluationError::Config(format!(
                "ground truth images path {} is not a directory",
                images_path.display()
            )));
        }

        let image_files = sorted_image_files(images_path)?;
        let labels = read_labels(labels_path)?;

        if image_files.len() != labels.len() {
            return Err(EvaluationError::Dataset(format!(
                "found {} images in {} but {} labels in {}",
                image_files.len(),
                images_path.display(),
                labels.len(),
                labels_path.display()
            )));
        }

        let mut images: Vec<GroundTruthImage> = image_files
            .into_iter()
            .zip(labels)
            .map(|((name, path), label)| GroundTruthImage { name, path, label })
            .collect();

        if number_of_images > 0 {
            images.truncate(number_of_images);
        }

        Ok(Self { images })
    }

    pub fn images(&self) -> &[GroundTruthImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

fn sorted_image_files(images_path: &Path) -> Result<Vec<(String, PathBuf)>, EvaluationError> {
    let io_error = |source: std::io::Error| EvaluationError::Io {
        path: images_path.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(images_path).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        if !entry.path().is_file() {
            continue;
        }
        files.push((name, entry.path()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}
