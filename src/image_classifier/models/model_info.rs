#[derive(Debug, Clone, PartialEq)]
pub struct ModelInfo {
    /// (height, width)
    pub input_shape: (u32, u32),
    pub central_crop_fraction: f32,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            input_shape: (224, 224),
            central_crop_fraction: 0.875,
        }
    }
}
