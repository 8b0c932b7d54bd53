use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::repositories::client_store::KeyValueStore;
use crate::domain::value_objects::counters::{self, CounterField, DailyCounters};
use crate::domain::value_objects::entitlements::Entitlements;
use crate::domain::value_objects::plans::{self, Quota};

/// Loads and persists per-page daily counters through the key-value port.
/// The calendar-day reset is lazy: applied on load, persisted on the next
/// write.
pub struct DailyCounterStore<S>
where
    S: KeyValueStore + 'static,
{
    store: Arc<S>,
}

impl<S> DailyCounterStore<S>
where
    S: KeyValueStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn load(&self, page_id: &str, today: NaiveDate) -> DailyCounters {
        let key = counters::storage_key(page_id);
        match self.store.get(&key) {
            Some(raw) => match serde_json::from_str::<DailyCounters>(&raw) {
                Ok(stored) => stored.for_today(today),
                Err(err) => {
                    warn!(
                        page_id,
                        parse_error = %err,
                        "engagement: discarding unreadable counters"
                    );
                    DailyCounters::zeroed(today)
                }
            },
            None => DailyCounters::zeroed(today),
        }
    }

    pub fn increment(
        &self,
        page_id: &str,
        field: CounterField,
        today: NaiveDate,
    ) -> DailyCounters {
        let mut counters = self.load(page_id, today);
        counters.bump(field);
        self.save(page_id, &counters);
        counters
    }

    fn save(&self, page_id: &str, counters: &DailyCounters) {
        match serde_json::to_string(counters) {
            Ok(json) => self.store.set(&counters::storage_key(page_id), json),
            Err(err) => warn!(
                page_id,
                serialize_error = %err,
                "engagement: failed to persist counters"
            ),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngagementError {
    #[error("daily activity limit reached for plan {plan_name} ({limit}/day)")]
    ActivityLimitReached { plan_name: &'static str, limit: Quota },
    #[error("daily reroll limit reached for plan {plan_name} ({limit}/day)")]
    RerollLimitReached { plan_name: &'static str, limit: Quota },
    #[error("favorites are not included in plan {plan_name}")]
    FavoritesNotIncluded { plan_name: &'static str },
    #[error("favorites limit reached for plan {plan_name} ({limit})")]
    FavoritesLimitReached { plan_name: &'static str, limit: Quota },
}

/// Quota-gated engagement actions for one client. Enforcement is per client:
/// the counters live wherever the injected store puts them.
pub struct EngagementUseCase<S>
where
    S: KeyValueStore + 'static,
{
    counter_store: DailyCounterStore<S>,
}

impl<S> EngagementUseCase<S>
where
    S: KeyValueStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            counter_store: DailyCounterStore::new(store),
        }
    }

    pub fn counters(&self, page_id: &str, today: NaiveDate) -> DailyCounters {
        self.counter_store.load(page_id, today)
    }

    pub fn complete_activity(
        &self,
        page_id: &str,
        plan_id: &str,
        today: NaiveDate,
    ) -> Result<DailyCounters, EngagementError> {
        let limits = plans::limits_for(plan_id);
        let counters = self.counter_store.load(page_id, today);

        if !Entitlements::new(limits, &counters).can_complete_activity() {
            info!(
                page_id,
                plan = limits.id,
                "engagement: daily activity limit reached"
            );
            return Err(EngagementError::ActivityLimitReached {
                plan_name: limits.name,
                limit: limits.activities_per_day,
            });
        }

        if limits.activities_per_day.is_unlimited() {
            // Nothing to meter; stored counters stay untouched.
            return Ok(counters);
        }

        Ok(self
            .counter_store
            .increment(page_id, CounterField::Activities, today))
    }

    pub fn reroll(
        &self,
        page_id: &str,
        plan_id: &str,
        today: NaiveDate,
    ) -> Result<DailyCounters, EngagementError> {
        let limits = plans::limits_for(plan_id);
        let counters = self.counter_store.load(page_id, today);

        if !Entitlements::new(limits, &counters).can_reroll() {
            info!(
                page_id,
                plan = limits.id,
                "engagement: daily reroll limit reached"
            );
            return Err(EngagementError::RerollLimitReached {
                plan_name: limits.name,
                limit: limits.rerolls_per_day,
            });
        }

        if limits.rerolls_per_day.is_unlimited() {
            return Ok(counters);
        }

        Ok(self
            .counter_store
            .increment(page_id, CounterField::Rerolls, today))
    }

    /// Favorites are a persistent set, not a daily counter; only the current
    /// count enters the decision.
    pub fn favorite(&self, plan_id: &str, favorites_count: u32) -> Result<(), EngagementError> {
        let limits = plans::limits_for(plan_id);

        if !limits.has_favorites {
            return Err(EngagementError::FavoritesNotIncluded {
                plan_name: limits.name,
            });
        }

        if !limits.max_favorites.allows(favorites_count) {
            return Err(EngagementError::FavoritesLimitReached {
                plan_name: limits.name,
                limit: limits.max_favorites,
            });
        }

        Ok(())
    }

    pub fn remaining(
        &self,
        page_id: &str,
        plan_id: &str,
        today: NaiveDate,
        field: CounterField,
    ) -> Quota {
        let limits = plans::limits_for(plan_id);
        let counters = self.counter_store.load(page_id, today);
        Entitlements::new(limits, &counters).remaining(field)
    }
}
