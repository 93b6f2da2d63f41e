use chrono::Utc;
use zklink_basic_types::TimeStamp;

/// Source of the `ts` field of transactions built without an explicit timestamp.
pub trait Clock {
    fn now(&self) -> TimeStamp;
}

/// Wall clock, unix seconds.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> TimeStamp {
        let secs = Utc::now().timestamp().clamp(0, u32::MAX as i64);
        TimeStamp(secs as u32)
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixedClock(pub TimeStamp);

impl Clock for FixedClock {
    fn now(&self) -> TimeStamp {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clocks() {
        assert_eq!(FixedClock(TimeStamp(7)).now(), TimeStamp(7));
        // 2023-01-01
        assert!(*SystemClock.now() > 1_672_531_200);
    }
}
