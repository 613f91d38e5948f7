use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFailurePolicy {
    #[default]
    Abort,
    /// Skipped images are not counted and observers are not told about them.
    Skip,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationParams {
    pub ground_truth_images_path: PathBuf,

    pub ground_truth_labels_path: PathBuf,

    pub model_output_labels_path: PathBuf,

    pub model_file_path: PathBuf,

    /// 0 evaluates every image, otherwise only the first `number_of_images`.
    pub number_of_images: usize,

    pub num_ranks: usize,

    pub image_failure_policy: ImageFailurePolicy,

    pub num_threads: usize,
}

impl Default for EvaluationParams {
    fn default() -> Self {
        Self {
            ground_truth_images_path: PathBuf::new(),
            ground_truth_labels_path: PathBuf::new(),
            model_output_labels_path: PathBuf::new(),
            model_file_path: PathBuf::new(),
            number_of_images: 0,
            num_ranks: 10,
            image_failure_policy: ImageFailurePolicy::Abort,
            num_threads: 1,
        }
    }
}
