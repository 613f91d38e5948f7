pub mod error;
pub mod imagenet_model_evaluator;
pub mod observer;
pub mod params;
