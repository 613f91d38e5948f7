/// `topk_counts[r - 1]` counts images whose label was within the top `r` predictions.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccuracyStats {
    pub number_of_images: usize,
    pub topk_counts: Vec<usize>,
}

impl AccuracyStats {
    pub fn new(num_ranks: usize) -> Self {
        Self {
            number_of_images: 0,
            topk_counts: vec![0; num_ranks],
        }
    }

    pub fn num_ranks(&self) -> usize {
        self.topk_counts.len()
    }

    pub fn count_at_rank(&self, rank: usize) -> Option<usize> {
        rank.checked_sub(1)
            .and_then(|index| self.topk_counts.get(index))
            .copied()
    }

    pub fn accuracy_at_rank(&self, rank: usize) -> Option<f64> {
        let count = self.count_at_rank(rank)?;
        if self.number_of_images == 0 {
            return Some(0.0);
        }
        Some(count as f64 / self.number_of_images as f64)
    }

    pub fn topk_accuracies(&self) -> Vec<f64> {
        (1..=self.num_ranks())
            .filter_map(|rank| self.accuracy_at_rank(rank))
            .collect()
    }

    pub(crate) fn record_hit_at(&mut self, position: Option<usize>) {
        self.number_of_images += 1;
        if let Some(position) = position {
            for count in self.topk_counts.iter_mut().skip(position) {
                *count += 1;
            }
        }
    }

    pub(crate) fn merge(&mut self, other: &AccuracyStats) {
        self.number_of_images += other.number_of_images;
        for (count, other_count) in self.topk_counts.iter_mut().zip(&other.topk_counts) {
            *count += other_count;
        }
    }
}
