use crate::accuracy::accuracy_stats::AccuracyStats;
use crate::evaluator::observer::EvaluationObserver;
use crate::library::logger::interface::Logger;
use std::sync::Arc;

pub struct ProgressLoggerObserver {
    logger: Arc<dyn Logger + Send + Sync>,
    log_every: usize,
    total_number_of_images: usize,
    last_logged: Option<usize>,
}

impl ProgressLoggerObserver {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>, log_every: usize) -> Self {
        Self {
            logger: logger.with_namespace("progress"),
            log_every: log_every.max(1),
            total_number_of_images: 0,
            last_logged: None,
        }
    }
}

pub fn format_accuracy(stats: &AccuracyStats) -> String {
    let top_1 = stats.accuracy_at_rank(1).unwrap_or(0.0) * 100.0;
    let k = stats.num_ranks();
    let top_k = stats.accuracy_at_rank(k).unwrap_or(0.0) * 100.0;
    format!("top-1: {:.2}%, top-{}: {:.2}%", top_1, k, top_k)
}

impl EvaluationObserver for ProgressLoggerObserver {
    fn on_evaluation_start(&mut self, total_number_of_images: usize) {
        self.total_number_of_images = total_number_of_images;
        self.last_logged = None;
        let _ = self
            .logger
            .info(&format!("Starting evaluation of {} images", total_number_of_images));
    }

    fn on_single_image_evaluation_complete(&mut self, stats: &AccuracyStats, image: &str) {
        if stats.number_of_images % self.log_every != 0 {
            return;
        }
        self.last_logged = Some(stats.number_of_images);
        let _ = self.logger.info(&format!(
            "Evaluated {}/{} images (last {}), {}",
            stats.number_of_images,
            self.total_number_of_images,
            image,
            format_accuracy(stats)
        ));
    }

    fn on_evaluation_complete(&mut self, stats: &AccuracyStats) {
        if self.last_logged == Some(stats.number_of_images) {
            return;
        }
        self.last_logged = Some(stats.number_of_images);
        let _ = self.logger.info(&format!(
            "Evaluated {}/{} images, {}",
            stats.number_of_images,
            self.total_number_of_images,
            format_accuracy(stats)
        ));
    }
}
