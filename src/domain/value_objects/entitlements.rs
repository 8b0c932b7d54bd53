use crate::domain::value_objects::counters::{CounterField, DailyCounters};
use crate::domain::value_objects::plans::{PlanLimits, Quota};

/// Pure permission gate over a plan's limits and today's usage. Holds no
/// storage and performs no I/O; callers load counters first.
#[derive(Debug, Clone, Copy)]
pub struct Entitlements<'a> {
    limits: &'a PlanLimits,
    counters: &'a DailyCounters,
}

impl<'a> Entitlements<'a> {
    pub fn new(limits: &'a PlanLimits, counters: &'a DailyCounters) -> Self {
        Self { limits, counters }
    }

    pub fn can_complete_activity(&self) -> bool {
        self.limits
            .activities_per_day
            .allows(self.counters.activities)
    }

    pub fn can_reroll(&self) -> bool {
        self.limits.rerolls_per_day.allows(self.counters.rerolls)
    }

    /// Plans without the favorites feature always answer false, whatever the
    /// quota says.
    pub fn can_favorite(&self, favorites_count: u32) -> bool {
        self.limits.has_favorites && self.limits.max_favorites.allows(favorites_count)
    }

    pub fn remaining(&self, field: CounterField) -> Quota {
        match field {
            CounterField::Activities => self
                .limits
                .activities_per_day
                .remaining(self.counters.activities),
            CounterField::Rerolls => self.limits.rerolls_per_day.remaining(self.counters.rerolls),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::plans::limits_for;
    use chrono::NaiveDate;

    fn counters(activities: u32, rerolls: u32) -> DailyCounters {
        DailyCounters {
            activities,
            rerolls,
            date: NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        }
    }

    #[test]
    fn finite_activity_quota_boundary() {
        let limits = limits_for("19_90");

        for used in 0..3 {
            let current = counters(used, 0);
            assert!(Entitlements::new(limits, &current).can_complete_activity());
        }

        let exhausted = counters(3, 0);
        assert!(!Entitlements::new(limits, &exhausted).can_complete_activity());
    }

    #[test]
    fn unlimited_plan_never_blocks() {
        let limits = limits_for("29_90");
        let heavy = counters(10_000, 10_000);
        let entitlements = Entitlements::new(limits, &heavy);

        assert!(entitlements.can_complete_activity());
        assert!(entitlements.can_reroll());
        assert!(entitlements.can_favorite(10_000));
    }

    #[test]
    fn reroll_quota_is_independent_of_activities() {
        let limits = limits_for("9_90");
        let current = counters(1, 0);
        let entitlements = Entitlements::new(limits, &current);

        assert!(!entitlements.can_complete_activity());
        assert!(entitlements.can_reroll());
    }

    #[test]
    fn favorites_gated_by_feature_flag_first() {
        let no_favorites = limits_for("9_90");
        let current = counters(0, 0);
        assert!(!Entitlements::new(no_favorites, &current).can_favorite(0));

        let with_favorites = limits_for("19_90");
        let entitlements = Entitlements::new(with_favorites, &current);
        assert!(entitlements.can_favorite(2));
        assert!(!entitlements.can_favorite(3));
    }

    #[test]
    fn remaining_reports_per_field() {
        let limits = limits_for("19_90");
        let current = counters(1, 4);
        let entitlements = Entitlements::new(limits, &current);

        assert_eq!(
            entitlements.remaining(CounterField::Activities),
            Quota::Finite(2)
        );
        assert_eq!(
            entitlements.remaining(CounterField::Rerolls),
            Quota::Finite(1)
        );

        let over = counters(9, 9);
        assert_eq!(
            Entitlements::new(limits, &over).remaining(CounterField::Activities),
            Quota::Finite(0)
        );
    }
}
