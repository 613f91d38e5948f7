use crate::image_classifier::interface::{ImageClassifier, ModelLoader};
use crate::image_classifier::models::model_info::ModelInfo;
use crate::image_classifier::tract::image::preprocess_image;
use crate::library::logger::interface::Logger;
use std::path::Path;
use std::sync::Arc;
use tract_onnx::prelude::*;

pub struct ImageClassifierTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    model_info: ModelInfo,
}

impl ImageClassifierTractOnnx {
    pub fn new(
        model_file_path: &Path,
        model_info: ModelInfo,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        if !(model_info.central_crop_fraction > 0.0 && model_info.central_crop_fraction <= 1.0) {
            return Err(format!(
                "central crop fraction must be in (0, 1], got {}",
                model_info.central_crop_fraction
            )
            .into());
        }

        let (height, width) = model_info.input_shape;
        let model = tract_onnx::onnx()
            .model_for_path(model_file_path)?
            .with_input_fact(0, f32::fact([1, 3, height as usize, width as usize]).into())?
            .into_optimized()?
            .into_runnable()?;

        Ok(Self { model, model_info })
    }
}

impl ImageClassifier for ImageClassifierTractOnnx {
    fn classify(&self, image_path: &Path) -> Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>> {
        let image = image::open(image_path)?;
        let (height, width) = self.model_info.input_shape;
        let input = preprocess_image(
            &image,
            width,
            height,
            self.model_info.central_crop_fraction,
        );

        let outputs = self.model.run(tvec!(input.into_tvalue()))?;
        let output = outputs
            .first()
            .ok_or("model produced no outputs")?
            .cast_to::<f32>()?;

        Ok(output.as_slice::<f32>()?.to_vec())
    }
}

pub struct ModelLoaderTractOnnx {
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ModelLoaderTractOnnx {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("model_loader").with_namespace("tract_onnx"),
        }
    }
}

impl ModelLoader for ModelLoaderTractOnnx {
    fn load(
        &self,
        model_file_path: &Path,
        model_info: &ModelInfo,
    ) -> Result<Arc<dyn ImageClassifier + Send + Sync>, Box<dyn std::error::Error + Send + Sync>>
    {
        self.logger
            .info(&format!("Loading model {}...", model_file_path.display()))?;
        let classifier = ImageClassifierTractOnnx::new(model_file_path, model_info.clone())?;
        self.logger.info("Model loaded")?;
        Ok(Arc::new(classifier))
    }
}
