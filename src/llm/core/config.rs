//! Sampling settings sent with every model call

use serde::{Deserialize, Serialize};

/// Output budget and sampling temperature for one request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    pub max_tokens: u32,
    /// Provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl GenerationConfig {
    pub fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl Default for GenerationConfig {
    /// Short tutoring answers at low temperature
    fn default() -> Self {
        Self::new(500).with_temperature(0.3)
    }
}
