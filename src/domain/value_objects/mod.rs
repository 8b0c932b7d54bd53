pub mod activities;
pub mod billing;
pub mod counters;
pub mod entitlements;
pub mod enums;
pub mod pages;
pub mod plans;
pub mod rituals;
pub mod slugs;
