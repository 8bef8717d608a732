use time::PrimitiveDateTime;

use crate::time_utils::local_now;

/// Source of "now" in the API's naive local time. Shared by the dev backend
/// and the reconciliation logic so both agree on the current instant.
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now(&self) -> PrimitiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> PrimitiveDateTime {
        local_now()
    }
}

/// Clock that only moves when told to.
#[cfg(test)]
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: std::sync::Arc<std::sync::Mutex<PrimitiveDateTime>>,
}

#[cfg(test)]
impl ManualClock {
    pub fn new(start: PrimitiveDateTime) -> Self {
        Self {
            now: std::sync::Arc::new(std::sync::Mutex::new(start)),
        }
    }

    pub fn advance(&self, by: time::Duration) {
        let mut now = self.now.lock().expect("clock lock poisoned");
        *now += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> PrimitiveDateTime {
        *self.now.lock().expect("clock lock poisoned")
    }
}
