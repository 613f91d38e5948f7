use chrono::Offset;

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub progress_log_interval: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: chrono::Utc.fix(),
            progress_log_interval: 1000,
        }
    }
}
