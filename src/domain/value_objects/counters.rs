use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const COUNTER_KEY_PREFIX: &str = "prasempre_counters_";

/// Key-value entry name holding one page's counters.
pub fn storage_key(page_id: &str) -> String {
    format!("{}{}", COUNTER_KEY_PREFIX, page_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterField {
    Activities,
    Rerolls,
}

impl CounterField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CounterField::Activities => "activities",
            CounterField::Rerolls => "rerolls",
        }
    }
}

/// Per-page usage for a single calendar day. There is no midnight job:
/// counters stamped with another date are discarded on the next read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCounters {
    pub activities: u32,
    pub rerolls: u32,
    pub date: NaiveDate,
}

impl DailyCounters {
    pub fn zeroed(date: NaiveDate) -> Self {
        Self {
            activities: 0,
            rerolls: 0,
            date,
        }
    }

    /// Lazy calendar-day reset.
    pub fn for_today(self, today: NaiveDate) -> Self {
        if self.date == today {
            self
        } else {
            Self::zeroed(today)
        }
    }

    pub fn used(&self, field: CounterField) -> u32 {
        match field {
            CounterField::Activities => self.activities,
            CounterField::Rerolls => self.rerolls,
        }
    }

    pub fn bump(&mut self, field: CounterField) {
        match field {
            CounterField::Activities => self.activities += 1,
            CounterField::Rerolls => self.rerolls += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn same_day_counters_survive() {
        let today = date(2024, 1, 1);
        let counters = DailyCounters {
            activities: 3,
            rerolls: 1,
            date: today,
        };

        assert_eq!(counters.clone().for_today(today), counters);
    }

    #[test]
    fn stale_counters_reset_to_zero() {
        let counters = DailyCounters {
            activities: 3,
            rerolls: 1,
            date: date(2024, 1, 1),
        };

        let next_day = date(2024, 1, 2);
        assert_eq!(
            counters.for_today(next_day),
            DailyCounters::zeroed(next_day)
        );
    }

    #[test]
    fn bump_touches_only_the_named_field() {
        let mut counters = DailyCounters::zeroed(date(2024, 6, 1));
        counters.bump(CounterField::Activities);
        counters.bump(CounterField::Activities);
        counters.bump(CounterField::Rerolls);

        assert_eq!(counters.activities, 2);
        assert_eq!(counters.rerolls, 1);
        assert_eq!(counters.used(CounterField::Activities), 2);
        assert_eq!(counters.used(CounterField::Rerolls), 1);
    }

    #[test]
    fn counters_round_trip_through_json() {
        let counters = DailyCounters {
            activities: 2,
            rerolls: 5,
            date: date(2024, 12, 31),
        };

        let json = serde_json::to_string(&counters).unwrap();
        let parsed: DailyCounters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, counters);
    }

    #[test]
    fn storage_keys_are_namespaced_per_page() {
        assert_eq!(storage_key("abc"), "prasempre_counters_abc");
        assert_ne!(storage_key("abc"), storage_key("abd"));
    }
}
