use crate::image_classifier::models::model_info::ModelInfo;
use std::path::Path;
use std::sync::Arc;

pub trait ImageClassifier: Send + Sync {
    /// One score per model output index.
    fn classify(&self, image_path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>>;
}

pub trait ModelLoader: Send + Sync {
    fn load(
        &self,
        model_file_path: &Path,
        model_info: &ModelInfo,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>;
}
