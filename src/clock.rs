//! Источник "сейчас" для парсера спецификаций.
//!
//! Часы читаются при каждом вызове (ничего не кэшируется на уровне процесса),
//! поэтому в тестах можно подставить `FixedClock`.

use chrono::{Local, NaiveDateTime};

/// Wall-clock source used when a spec is absent.
pub trait Clock {
    /// Current local wall-clock time. Sub-second precision is allowed;
    /// the parser truncates it.
    fn now(&self) -> NaiveDateTime;
}

/// Local system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a fixed instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: NaiveDateTime,
}

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        Self { at }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn fixed_clock_returns_same_instant() {
        let at = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(8, 0, 30)
            .unwrap();
        let clock = FixedClock::new(at);
        assert_eq!(clock.now(), at);
        assert_eq!(clock.now(), at);
    }

    #[test]
    fn system_clock_is_reasonable() {
        let now = SystemClock.now();
        let lo = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        let hi = NaiveDate::from_ymd_opt(2100, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert!(now > lo && now < hi);
    }

    #[test]
    fn clock_trait_object() {
        let at = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap().and_hms_opt(4, 5, 6).unwrap();
        let c: Box<dyn Clock> = Box::new(FixedClock::new(at));
        assert_eq!(c.now(), at);
    }
}
