use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct QualityStats {
    pub original_count: usize,
    pub processed_count: usize,
    pub detected_count: usize,
    pub interpolated_count: usize,
    pub removed_count: usize,
}

impl QualityStats {
    fn percent_of_original(&self, count: usize) -> f64 {
        if self.original_count == 0 {
            0.0
        } else {
            count as f64 / self.original_count as f64 * 100.0
        }
    }

    pub fn processed_percent(&self) -> f64 {
        self.percent_of_original(self.processed_count)
    }

    pub fn detected_percent(&self) -> f64 {
        self.percent_of_original(self.detected_count)
    }

    pub fn interpolated_percent(&self) -> f64 {
        self.percent_of_original(self.interpolated_count)
    }

    pub fn removed_percent(&self) -> f64 {
        self.percent_of_original(self.removed_count)
    }
}
