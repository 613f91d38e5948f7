use crate::accuracy::accuracy_stats::AccuracyStats;

/// Listener for evaluation events.
///
/// Callbacks run synchronously on the thread driving the evaluation, so a
/// slow observer stalls the run.
pub trait EvaluationObserver {
    /// Called once, before any image is evaluated.
    fn on_evaluation_start(&mut self, total_number_of_images: usize);

    /// Called after `image` was evaluated, with the stats accumulated so far.
    fn on_single_image_evaluation_complete(&mut self, stats: &AccuracyStats, image: &str);

    /// Called once after the last image of a successful run with the final
    /// stats. Not called when the run fails.
    fn on_evaluation_complete(&mut self, _stats: &AccuracyStats) {}
}
