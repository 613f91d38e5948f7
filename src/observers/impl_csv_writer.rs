use crate::accuracy::accuracy_stats::AccuracyStats;
use crate::evaluator::observer::EvaluationObserver;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Observer callbacks cannot fail, so the first write error is kept and
/// returned by `finish`.
pub struct CsvResultsObserver<W: Write> {
    writer: csv::Writer<W>,
    num_ranks: usize,
    error: Option<csv::Error>,
}

impl CsvResultsObserver<File> {
    pub fn create(path: &Path, num_ranks: usize) -> Result<Self, csv::Error> {
        Ok(Self::new(csv::Writer::from_path(path)?, num_ranks))
    }
}

impl<W: Write> CsvResultsObserver<W> {
    pub fn new(writer: csv::Writer<W>, num_ranks: usize) -> Self {
        Self {
            writer,
            num_ranks,
            error: None,
        }
    }

    pub fn finish(mut self) -> Result<W, Box<dyn std::error::Error + Send + Sync>> {
        if let Some(error) = self.error.take() {
            return Err(error.into());
        }
        self.writer.flush()?;
        self.writer
            .into_inner()
            .map_err(|error| error.into_error().into())
    }

    fn write_header(&mut self) -> Result<(), csv::Error> {
        let mut header = vec!["image".to_string(), "number_of_images".to_string()];
        header.extend((1..=self.num_ranks).map(|rank| format!("top_{}", rank)));
        self.writer.write_record(&header)
    }

    fn write_row(&mut self, stats: &AccuracyStats, image: &str) -> Result<(), csv::Error> {
        let mut row = vec![image.to_string(), stats.number_of_images.to_string()];
        row.extend(
            (1..=self.num_ranks)
                .map(|rank| stats.accuracy_at_rank(rank).unwrap_or(0.0))
                .map(|accuracy| format!("{:.6}", accuracy)),
        );
        self.writer.write_record(&row)
    }

    fn keep_first_error(&mut self, result: Result<(), csv::Error>) {
        if let Err(error) = result {
            self.error.get_or_insert(error);
        }
    }
}

impl<W: Write> EvaluationObserver for CsvResultsObserver<W> {
    fn on_evaluation_start(&mut self, _total_number_of_images: usize) {
        let result = self.write_header();
        self.keep_first_error(result);
    }

    fn on_single_image_evaluation_complete(&mut self, stats: &AccuracyStats, image: &str) {
        if self.error.is_some() {
            return;
        }
        let result = self.write_row(stats, image);
        self.keep_first_error(result);
    }
}
