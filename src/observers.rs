pub mod impl_csv_writer;
pub mod impl_progress_logger;
