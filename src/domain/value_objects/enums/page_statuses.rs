use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A page only ever moves forward: `pending_payment` -> `active`, exactly once.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PageStatus {
    #[default]
    PendingPayment,
    Active,
}

impl Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            PageStatus::PendingPayment => "pending_payment",
            PageStatus::Active => "active",
        };
        write!(f, "{}", status)
    }
}

impl PageStatus {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "pending_payment" => Some(PageStatus::PendingPayment),
            "active" => Some(PageStatus::Active),
            _ => None,
        }
    }
}
