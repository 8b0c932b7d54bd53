use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Allowance for one plan-gated action, either a daily cap or no cap at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quota {
    Finite(u32),
    Unlimited,
}

impl Quota {
    pub fn allows(&self, used: u32) -> bool {
        match self {
            Quota::Finite(limit) => used < *limit,
            Quota::Unlimited => true,
        }
    }

    pub fn remaining(&self, used: u32) -> Quota {
        match self {
            Quota::Finite(limit) => Quota::Finite(limit.saturating_sub(used)),
            Quota::Unlimited => Quota::Unlimited,
        }
    }

    pub fn is_unlimited(&self) -> bool {
        matches!(self, Quota::Unlimited)
    }
}

impl Display for Quota {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quota::Finite(limit) => write!(f, "{}", limit),
            Quota::Unlimited => write!(f, "unlimited"),
        }
    }
}

impl Serialize for Quota {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Quota::Finite(limit) => serializer.serialize_u32(*limit),
            Quota::Unlimited => serializer.serialize_str("unlimited"),
        }
    }
}

impl<'de> Deserialize<'de> for Quota {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawQuota {
            Number(u32),
            Text(String),
        }

        match RawQuota::deserialize(deserializer)? {
            RawQuota::Number(limit) => Ok(Quota::Finite(limit)),
            RawQuota::Text(value) if value == "unlimited" => Ok(Quota::Unlimited),
            RawQuota::Text(value) => Err(serde::de::Error::custom(format!(
                "invalid quota value: {}",
                value
            ))),
        }
    }
}

/// Entitlements for one paid tier. Prices are in centavos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanLimits {
    pub id: &'static str,
    pub name: &'static str,
    pub price_minor: i32,
    pub max_photos: u32,
    pub activities_per_day: Quota,
    pub rerolls_per_day: Quota,
    pub max_favorites: Quota,
    pub has_favorites: bool,
    pub has_history: bool,
    pub has_weekly_ritual: bool,
    pub has_pwa: bool,
}

pub const LOWEST_PLAN_ID: &str = "9_90";

const PRESENTE: PlanLimits = PlanLimits {
    id: "9_90",
    name: "Presente",
    price_minor: 990,
    max_photos: 1,
    activities_per_day: Quota::Finite(1),
    rerolls_per_day: Quota::Finite(1),
    max_favorites: Quota::Finite(0),
    has_favorites: false,
    has_history: false,
    has_weekly_ritual: false,
    has_pwa: false,
};

const INTERATIVO: PlanLimits = PlanLimits {
    id: "19_90",
    name: "Interativo",
    price_minor: 1990,
    max_photos: 1,
    activities_per_day: Quota::Finite(3),
    rerolls_per_day: Quota::Finite(5),
    max_favorites: Quota::Finite(3),
    has_favorites: true,
    has_history: true,
    has_weekly_ritual: false,
    has_pwa: false,
};

const PREMIUM: PlanLimits = PlanLimits {
    id: "29_90",
    name: "Premium",
    price_minor: 2990,
    max_photos: 3,
    activities_per_day: Quota::Unlimited,
    rerolls_per_day: Quota::Unlimited,
    max_favorites: Quota::Unlimited,
    has_favorites: true,
    has_history: true,
    has_weekly_ritual: true,
    has_pwa: true,
};

/// Resolves a stored plan identifier. Unknown identifiers fall back to the
/// lowest tier instead of failing.
pub fn limits_for(plan_id: &str) -> &'static PlanLimits {
    known_plan(plan_id).unwrap_or(&PRESENTE)
}

/// Strict lookup for flows where an unknown plan must be rejected, not
/// downgraded (checkout).
pub fn known_plan(plan_id: &str) -> Option<&'static PlanLimits> {
    match plan_id {
        "9_90" => Some(&PRESENTE),
        "19_90" => Some(&INTERATIVO),
        "29_90" => Some(&PREMIUM),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_plan_falls_back_to_lowest_tier() {
        let fallback = limits_for("no_such_plan");
        assert_eq!(fallback, limits_for(LOWEST_PLAN_ID));
        assert_eq!(fallback.id, "9_90");

        assert_eq!(limits_for(""), limits_for("9_90"));
    }

    #[test]
    fn known_plan_rejects_unknown_ids() {
        assert!(known_plan("9_90").is_some());
        assert!(known_plan("19_90").is_some());
        assert!(known_plan("29_90").is_some());
        assert!(known_plan("49_90").is_none());
        assert!(known_plan("presente").is_none());
    }

    #[test]
    fn catalog_matches_tier_table() {
        let presente = limits_for("9_90");
        assert_eq!(presente.name, "Presente");
        assert_eq!(presente.price_minor, 990);
        assert_eq!(presente.max_photos, 1);
        assert_eq!(presente.activities_per_day, Quota::Finite(1));
        assert_eq!(presente.rerolls_per_day, Quota::Finite(1));
        assert!(!presente.has_favorites);
        assert!(!presente.has_weekly_ritual);

        let interativo = limits_for("19_90");
        assert_eq!(interativo.price_minor, 1990);
        assert_eq!(interativo.activities_per_day, Quota::Finite(3));
        assert_eq!(interativo.rerolls_per_day, Quota::Finite(5));
        assert_eq!(interativo.max_favorites, Quota::Finite(3));
        assert!(interativo.has_favorites);
        assert!(interativo.has_history);
        assert!(!interativo.has_weekly_ritual);

        let premium = limits_for("29_90");
        assert_eq!(premium.price_minor, 2990);
        assert_eq!(premium.max_photos, 3);
        assert!(premium.activities_per_day.is_unlimited());
        assert!(premium.rerolls_per_day.is_unlimited());
        assert!(premium.max_favorites.is_unlimited());
        assert!(premium.has_weekly_ritual);
        assert!(premium.has_pwa);
    }

    #[test]
    fn finite_quota_boundary() {
        let quota = Quota::Finite(3);
        assert!(quota.allows(0));
        assert!(quota.allows(1));
        assert!(quota.allows(2));
        assert!(!quota.allows(3));
        assert!(!quota.allows(10));
    }

    #[test]
    fn unlimited_quota_always_allows() {
        assert!(Quota::Unlimited.allows(0));
        assert!(Quota::Unlimited.allows(u32::MAX));
    }

    #[test]
    fn remaining_saturates_at_zero() {
        assert_eq!(Quota::Finite(3).remaining(1), Quota::Finite(2));
        assert_eq!(Quota::Finite(3).remaining(3), Quota::Finite(0));
        assert_eq!(Quota::Finite(3).remaining(7), Quota::Finite(0));
        assert_eq!(Quota::Unlimited.remaining(7), Quota::Unlimited);
    }

    #[test]
    fn quota_serializes_as_number_or_sentinel() {
        assert_eq!(serde_json::to_string(&Quota::Finite(5)).unwrap(), "5");
        assert_eq!(
            serde_json::to_string(&Quota::Unlimited).unwrap(),
            "\"unlimited\""
        );

        assert_eq!(
            serde_json::from_str::<Quota>("5").unwrap(),
            Quota::Finite(5)
        );
        assert_eq!(
            serde_json::from_str::<Quota>("\"unlimited\"").unwrap(),
            Quota::Unlimited
        );
        assert!(serde_json::from_str::<Quota>("\"infinite\"").is_err());
    }
}
