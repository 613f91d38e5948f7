use crate::accuracy::accuracy_stats::AccuracyStats;
use crate::accuracy::top_k::TopKAccuracy;
use crate::dataset::ground_truth::{GroundTruthDataset, GroundTruthImage};
use crate::dataset::labels::read_labels;
use crate::evaluator::error::EvaluationError;
use crate::evaluator::observer::EvaluationObserver;
use crate::evaluator::params::{EvaluationParams, ImageFailurePolicy};
use crate::image_classifier::interface::{ImageClassifier, ModelLoader};
use crate::image_classifier::models::model_info::ModelInfo;
use crate::library::logger::interface::Logger;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc::channel;
use std::sync::Arc;

type ClassifyResult = Result<Vec<f32>, Box<dyn std::error::Error + Send + Sync>>;

pub struct ImagenetModelEvaluator<'a> {
    model_info: ModelInfo,
    params: EvaluationParams,
    model_loader: Arc<dyn ModelLoader + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
    observers: Vec<&'a mut dyn EvaluationObserver>,
}

impl<'a> ImagenetModelEvaluator<'a> {
    pub fn new(
        model_info: ModelInfo,
        params: EvaluationParams,
        model_loader: Arc<dyn ModelLoader + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            model_info,
            params,
            model_loader,
            logger: logger.with_namespace("evaluator"),
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: &'a mut dyn EvaluationObserver) {
        self.observers.push(observer);
    }

    pub fn params(&self) -> &EvaluationParams {
        &self.params
    }

    pub fn model_info(&self) -> &ModelInfo {
        &self.model_info
    }

    /// Setup failures return before any observer is notified.
    pub fn evaluate_model(&mut self) -> Result<AccuracyStats, EvaluationError> {
        if self.params.num_threads == 0 {
            return Err(EvaluationError::Config(
                "number of threads must be at least 1".to_string(),
            ));
        }

        let dataset = GroundTruthDataset::load(
            &self.params.ground_truth_images_path,
            &self.params.ground_truth_labels_path,
            self.params.number_of_images,
        )?;
        let model_output_labels = read_labels(&self.params.model_output_labels_path)?;
        let mut accuracy = TopKAccuracy::new(model_output_labels, self.params.num_ranks)?;

        if let Some(image) = dataset
            .images()
            .iter()
            .find(|image| !accuracy.has_label(&image.label))
        {
            return Err(EvaluationError::Dataset(format!(
                "ground truth label {:?} of {} is not a model output label",
                image.label, image.name
            )));
        }

        let classifier = self
            .model_loader
            .load(&self.params.model_file_path, &self.model_info)
            .map_err(|source| EvaluationError::ModelLoad {
                path: self.params.model_file_path.clone(),
                source,
            })?;

        let total = dataset.len();
        if dataset.is_empty() {
            let _ = self.logger.warn("No images to evaluate");
        }
        let _ = self.logger.info(&format!(
            "Evaluating {} images, top {} accuracy",
            total, self.params.num_ranks
        ));
        for observer in self.observers.iter_mut() {
            observer.on_evaluation_start(total);
        }

        let policy = self.params.image_failure_policy;
        let logger = self.logger.clone();
        let observers = &mut self.observers;
        let mut skipped = 0;

        classify_in_dataset_order(
            classifier.as_ref(),
            dataset.images(),
            self.params.num_threads,
            |image, result| {
                let scores = match (result, policy) {
                    (Ok(scores), _) => scores,
                    (Err(source), ImageFailurePolicy::Abort) => {
                        return Err(EvaluationError::Inference {
                            image: image.name.clone(),
                            source,
                        });
                    }
                    (Err(source), ImageFailurePolicy::Skip) => {
                        let _ = logger.warn(&format!("Skipping {}: {}", image.name, source));
                        skipped += 1;
                        return Ok(());
                    }
                };

                accuracy.compute_eval(&scores, &image.label)?;
                let stats = accuracy.accuracy_stats();
                for observer in observers.iter_mut() {
                    observer.on_single_image_evaluation_complete(&stats, &image.name);
                }
                Ok(())
            },
        )?;

        let stats = accuracy.accuracy_stats();
        for observer in self.observers.iter_mut() {
            observer.on_evaluation_complete(&stats);
        }
        let _ = self.logger.info(&format!(
            "Evaluated {} images, skipped {}",
            stats.number_of_images, skipped
        ));
        Ok(stats)
    }
}

// Results reach `on_result` in dataset order, on the calling thread.
fn classify_in_dataset_order<F>(
    classifier: &(dyn ImageClassifier + Send + Sync),
    images: &[GroundTruthImage],
    num_threads: usize,
    mut on_result: F,
) -> Result<(), EvaluationError>
where
    F: FnMut(&GroundTruthImage, ClassifyResult) -> Result<(), EvaluationError>,
{
    if num_threads <= 1 || images.len() <= 1 {
        for image in images {
            on_result(image, classifier.classify(&image.path))?;
        }
        return Ok(());
    }

    let next_index = AtomicUsize::new(0);
    let stop = AtomicBool::new(false);
    let (sender, receiver) = channel::<(usize, ClassifyResult)>();

    std::thread::scope(|scope| {
        for _ in 0..num_threads.min(images.len()) {
            let sender = sender.clone();
            let (next_index, stop) = (&next_index, &stop);
            scope.spawn(move || {
                while !stop.load(Ordering::Relaxed) {
                    let index = next_index.fetch_add(1, Ordering::Relaxed);
                    let Some(image) = images.get(index) else {
                        break;
                    };
                    if sender.send((index, classifier.classify(&image.path))).is_err() {
                        break;
                    }
                }
            });
        }
        drop(sender);

        let mut pending = BTreeMap::new();
        let mut next_to_report = 0;
        for (index, result) in receiver.iter() {
            pending.insert(index, result);
            while let Some(result) = pending.remove(&next_to_report) {
                if let Err(error) = on_result(&images[next_to_report], result) {
                    stop.store(true, Ordering::Relaxed);
                    return Err(error);
                }
                next_to_report += 1;
            }
        }
        Ok(())
    })
}
