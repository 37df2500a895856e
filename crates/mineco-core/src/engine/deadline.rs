use super::error::EcoError;
use std::time::{Duration, Instant};

/// Optional wall-clock budget for evaluating one structure pair.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    started: Instant,
    limit: Option<Duration>,
}

impl Deadline {
    pub fn start(limit: Option<Duration>) -> Self {
        Self {
            started: Instant::now(),
            limit,
        }
    }

    pub fn unlimited() -> Self {
        Self::start(None)
    }

    pub fn check(&self) -> Result<(), EcoError> {
        let Some(limit) = self.limit else {
            return Ok(());
        };
        let elapsed = self.started.elapsed();
        if elapsed > limit {
            Err(EcoError::Timeout { limit, elapsed })
        } else {
            Ok(())
        }
    }
}
