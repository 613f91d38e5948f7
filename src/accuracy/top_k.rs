use crate::accuracy::accuracy_stats::AccuracyStats;
use crate::evaluator::error::EvaluationError;
use std::cmp::Ordering;

#[derive(Debug, Clone)]
pub struct TopKAccuracy {
    model_output_labels: Vec<String>,
    num_ranks: usize,
    accuracy_stats: AccuracyStats,
}

impl TopKAccuracy {
    pub fn new(model_output_labels: Vec<String>, num_ranks: usize) -> Result<Self, EvaluationError> {
        if num_ranks == 0 {
            return Err(EvaluationError::Config(
                "number of ranks must be at least 1".to_string(),
            ));
        }
        if num_ranks > model_output_labels.len() {
            return Err(EvaluationError::Config(format!(
                "number of ranks {} exceeds the {} model output labels",
                num_ranks,
                model_output_labels.len()
            )));
        }

        Ok(Self {
            model_output_labels,
            num_ranks,
            accuracy_stats: AccuracyStats::new(num_ranks),
        })
    }

    pub fn has_label(&self, label: &str) -> bool {
        self.model_output_labels.iter().any(|known| known == label)
    }

    // returns the stats of this image alone
    pub fn compute_eval(
        &mut self,
        scores: &[f32],
        ground_truth_label: &str,
    ) -> Result<AccuracyStats, EvaluationError> {
        if scores.len() != self.model_output_labels.len() {
            return Err(EvaluationError::ModelOutput(format!(
                "model produced {} scores but there are {} model output labels",
                scores.len(),
                self.model_output_labels.len()
            )));
        }

        let position = top_k_indices(scores, self.num_ranks)
            .into_iter()
            .position(|index| self.model_output_labels[index] == ground_truth_label);

        let mut image_stats = AccuracyStats::new(self.num_ranks);
        image_stats.record_hit_at(position);
        self.accuracy_stats.merge(&image_stats);

        Ok(image_stats)
    }

    pub fn accuracy_stats(&self) -> AccuracyStats {
        self.accuracy_stats.clone()
    }
}

// ties go to the lower index, NaN ranks last
pub fn top_k_indices(scores: &[f32], k: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..scores.len()).collect();
    indices.sort_by(|&a, &b| compare_scores_descending(scores[a], scores[b]));
    indices.truncate(k);
    indices
}

fn compare_scores_descending(a: f32, b: f32) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
