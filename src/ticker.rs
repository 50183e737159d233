use crate::config::DEFAULT_TICK_MS;
use std::time::Duration;

/// Poll timeout for the event loop. Zero is raised to the default.
pub fn tick_duration(tick_ms: u64) -> Duration {
    if tick_ms == 0 {
        Duration::from_millis(DEFAULT_TICK_MS)
    } else {
        Duration::from_millis(tick_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tick_duration() {
        assert_eq!(tick_duration(250), Duration::from_millis(250));
        assert_eq!(tick_duration(100), Duration::from_millis(100));
        assert_eq!(tick_duration(0), Duration::from_millis(DEFAULT_TICK_MS));
    }
}
