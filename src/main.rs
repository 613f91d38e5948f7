use config::Config;
use evaluator::imagenet_model_evaluator::ImagenetModelEvaluator;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use observers::impl_csv_writer::CsvResultsObserver;
use observers::impl_progress_logger::{format_accuracy, ProgressLoggerObserver};
use std::sync::Arc;

mod accuracy;
mod cli;
mod config;
mod dataset;
mod evaluator;
mod image_classifier;
mod library;
mod observers;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone));

    let mut progress = ProgressLoggerObserver::new(logger.clone(), config.progress_log_interval);

    let (mut evaluator, args) =
        ImagenetModelEvaluator::create(std::env::args_os(), logger.clone())
            .unwrap_or_else(|error| error.exit());

    let mut csv_results = match &args.output_file_path {
        Some(path) => Some(CsvResultsObserver::create(path, args.num_ranks)?),
        None => None,
    };

    evaluator.add_observer(&mut progress);
    if let Some(csv_results) = csv_results.as_mut() {
        evaluator.add_observer(csv_results);
    }

    logger.info(&format!(
        "Model {} with input {:?}",
        evaluator.params().model_file_path.display(),
        evaluator.model_info().input_shape
    ))?;

    let stats = evaluator.evaluate_model()?;
    drop(evaluator);

    if let Some(csv_results) = csv_results {
        csv_results.finish()?;
    }

    logger.info(&format!(
        "Final accuracy over {} images, {}",
        stats.number_of_images,
        format_accuracy(&stats)
    ))?;
    for (rank, accuracy) in stats.topk_accuracies().iter().enumerate() {
        logger.info(&format!("top-{}: {:.4}", rank + 1, accuracy))?;
    }

    Ok(())
}
