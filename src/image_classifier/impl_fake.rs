use crate::image_classifier::interface::{ImageClassifier, ModelLoader};
use crate::image_classifier::models::model_info::ModelInfo;
use rand::distr::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct ImageClassifierFake {
    scores_by_image: HashMap<String, Vec<f32>>,
    failing_images: HashSet<String>,
    random: Option<(usize, Mutex<StdRng>)>,
}

impl ImageClassifierFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn random(num_classes: usize, seed: u64) -> Self {
        Self {
            random: Some((num_classes, Mutex::new(StdRng::seed_from_u64(seed)))),
            ..Self::default()
        }
    }

    pub fn with_scores(mut self, image: &str, scores: Vec<f32>) -> Self {
        self.scores_by_image.insert(image.to_string(), scores);
        self
    }

    pub fn with_failure(mut self, image: &str) -> Self {
        self.failing_images.insert(image.to_string());
        self
    }

    fn random_scores(
        &self,
        image: &str,
    ) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let (num_classes, rng) = self
            .random
            .as_ref()
            .ok_or_else(|| format!("no scores scripted for {}", image))?;
        let confidence_dist = Uniform::new(0.0f32, 1.0)?;
        let mut rng = rng.lock().map_err(|_| "fake classifier rng lock poisoned")?;
        Ok((0..*num_classes)
            .map(|_| confidence_dist.sample(&mut *rng))
            .collect())
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self, image_path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let image = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| format!("{} has no file name", image_path.display()))?;

        if self.failing_images.contains(&image) {
            return Err(format!("fake inference failure for {}", image).into());
        }

        match self.scores_by_image.get(&image) {
            Some(scores) => Ok(scores.clone()),
            None => self.random_scores(&image),
        }
    }
}

pub struct ModelLoaderFake {
    classifier: Arc<ImageClassifierFake>,
    fail_to_load: bool,
    loaded_models: Mutex<Vec<String>>,
}

impl ModelLoaderFake {
    pub fn new(classifier: ImageClassifierFake) -> Self {
        Self {
            classifier: Arc::new(classifier),
            fail_to_load: false,
            loaded_models: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_to_load: true,
            ..Self::new(ImageClassifierFake::new())
        }
    }

    pub fn loaded_models(&self) -> Vec<String> {
        self.loaded_models
            .lock()
            .map(|models| models.clone())
            .unwrap_or_default()
    }
}

impl ModelLoader for ModelLoaderFake {
    fn load(
        &self,
        model_file_path: &Path,
        _model_info: &ModelInfo,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        if self.fail_to_load {
            return Err(format!("fake model {} is unreadable", model_file_path.display()).into());
        }

        self.loaded_models
            .lock()
            .map_err(|_| "fake loader lock poisoned")?
            .push(model_file_path.display().to_string());

        Ok(self.classifier.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_scores() {
        let classifier = ImageClassifierFake::new().with_scores("cat.jpg", vec![0.1, 0.9]);

        let scores = classifier.classify(Path::new("/data/cat.jpg")).unwrap();

        assert_eq!(scores, vec![0.1, 0.9]);
    }

    #[test]
    fn test_scripted_failure() {
        let classifier = ImageClassifierFake::new()
            .with_scores("cat.jpg", vec![0.1, 0.9])
            .with_failure("cat.jpg");

        assert!(classifier.classify(Path::new("cat.jpg")).is_err());
    }

    #[test]
    fn test_unscripted_image_without_seed_fails() {
        let classifier = ImageClassifierFake::new();

        assert!(classifier.classify(Path::new("dog.jpg")).is_err());
    }

    #[test]
    fn test_random_scores_have_one_score_per_class() {
        let classifier = ImageClassifierFake::random(12, 3);

        let scores = classifier.classify(Path::new("anything.jpg")).unwrap();

        assert_eq!(scores.len(), 12);
        assert!(scores.iter().all(|score| (0.0..1.0).contains(score)));
    }

    #[test]
    fn test_loader_records_loaded_models() {
        let loader = ModelLoaderFake::new(ImageClassifierFake::new());

        loader
            .load(Path::new("mobilenet.onnx"), &ModelInfo::default())
            .unwrap();

        assert_eq!(loader.loaded_models(), vec!["mobilenet.onnx".to_string()]);
    }

    #[test]
    fn test_failing_loader() {
        let loader = ModelLoaderFake::failing();

        assert!(loader
            .load(Path::new("mobilenet.onnx"), &ModelInfo::default())
            .is_err());
    }
}
