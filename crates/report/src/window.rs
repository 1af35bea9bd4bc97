use serde::{Deserialize, Serialize};

use crate::ReportError;

pub const DEFAULT_START_HOUR: u32 = 7;
pub const DEFAULT_END_HOUR: u32 = 9;

/// Half-open range of whole hours to report on: `[start_hour, end_hour)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl Default for ReportWindow {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            end_hour: DEFAULT_END_HOUR,
        }
    }
}

impl ReportWindow {
    pub fn new(start_hour: u32, end_hour: u32) -> Result<Self, ReportError> {
        if start_hour > end_hour || end_hour > 24 {
            return Err(ReportError::InvalidWindow {
                start: start_hour,
                end: end_hour,
            });
        }
        Ok(Self { start_hour, end_hour })
    }

    /// `HH:00:00` for every hour in the window, earliest first.
    pub fn target_timestamps(&self) -> Vec<String> {
        (self.start_hour..self.end_hour)
            .map(|hour| format!("{hour:02}:00:00"))
            .collect()
    }
}
