pub mod accuracy_stats;
pub mod top_k;
