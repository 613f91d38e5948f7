use crate::evaluator::error::EvaluationError;
use std::fs;
use std::path::Path;

pub fn read_labels(path: &Path) -> Result<Vec<String>, EvaluationError> {
    let contents = fs::read_to_string(path).map_err(|source| EvaluationError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(parse_labels(&contents))
}

fn parse_labels(contents: &str) -> Vec<String> {
    let mut labels: Vec<String> = contents
        .lines()
        .map(|line| line.trim().to_string())
        .collect();

    while labels.last().is_some_and(|label| label.is_empty()) {
        labels.pop();
    }

    labels
}
