use crate::evaluator::imagenet_model_evaluator::ImagenetModelEvaluator;
use crate::evaluator::params::{EvaluationParams, ImageFailurePolicy};
use crate::image_classifier::impl_tract_onnx::ModelLoaderTractOnnx;
use crate::image_classifier::models::model_info::ModelInfo;
use crate::library::logger::interface::Logger;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::sync::Arc;

/// Top-K accuracy of an image classification model on an ImageNet style dataset
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "imagenet-accuracy-eval")]
#[command(version)]
pub struct Args {
    /// Path to the ONNX model file
    #[arg(long)]
    pub model_file: PathBuf,

    /// Directory with the ground truth images
    #[arg(long)]
    pub ground_truth_images_path: PathBuf,

    /// Ground truth labels, one per image in sorted file name order
    #[arg(long)]
    pub ground_truth_labels: PathBuf,

    /// Labels in the order of the model's output indices
    #[arg(long)]
    pub model_output_labels: PathBuf,

    /// Number of images to evaluate, 0 for all
    #[arg(long, default_value_t = 0)]
    pub num_images: usize,

    /// Number of ranks K for top-K accuracy
    #[arg(long, default_value_t = 10)]
    pub num_ranks: usize,

    /// Inference worker threads
    #[arg(long, default_value_t = 1)]
    pub num_threads: usize,

    /// Keep going when inference fails for an image
    #[arg(long)]
    pub skip_failed_images: bool,

    /// Write per-image cumulative accuracies to this CSV file
    #[arg(long)]
    pub output_file_path: Option<PathBuf>,

    /// Model input height
    #[arg(long, default_value_t = 224)]
    pub input_height: u32,

    /// Model input width
    #[arg(long, default_value_t = 224)]
    pub input_width: u32,

    /// Share of each image side kept by the central crop
    #[arg(long, default_value_t = 0.875)]
    pub central_crop_fraction: f32,
}

impl Args {
    pub fn to_params(&self) -> EvaluationParams {
        EvaluationParams {
            ground_truth_images_path: self.ground_truth_images_path.clone(),
            ground_truth_labels_path: self.ground_truth_labels.clone(),
            model_output_labels_path: self.model_output_labels.clone(),
            model_file_path: self.model_file.clone(),
            number_of_images: self.num_images,
            num_ranks: self.num_ranks,
            image_failure_policy: if self.skip_failed_images {
                ImageFailurePolicy::Skip
            } else {
                ImageFailurePolicy::Abort
            },
            num_threads: self.num_threads,
        }
    }

    pub fn to_model_info(&self) -> ModelInfo {
        ModelInfo {
            input_shape: (self.input_height, self.input_width),
            central_crop_fraction: self.central_crop_fraction,
        }
    }
}

pub fn parse_args<I, T>(args: I) -> Result<Args, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Args::try_parse_from(args)
}

pub fn create_evaluator<'a>(
    args: &Args,
    logger: Arc<dyn Logger + Send + Sync>,
) -> ImagenetModelEvaluator<'a> {
    ImagenetModelEvaluator::new(
        args.to_model_info(),
        args.to_params(),
        Arc::new(ModelLoaderTractOnnx::new(logger.clone())),
        logger,
    )
}

impl ImagenetModelEvaluator<'_> {
    /// Also returns the parsed args for the options that are not evaluation params.
    pub fn create<I, T>(
        args: I,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<(Self, Args), clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = parse_args(args)?;
        Ok((create_evaluator(&args, logger), args))
    }
}
