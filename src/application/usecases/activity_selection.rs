use chrono::{Datelike, NaiveDate};
use rand::Rng;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Deterministic activity-of-the-day index: FNV-1a over
/// `"<page_id>_<yyyy-mm-dd>"` reduced modulo the pool size. Same page and day
/// always land on the same activity; the date flips it daily.
///
/// Callers guarantee a non-empty pool (the default-pool fallback exists for
/// exactly that reason).
pub fn index_for_today(page_id: &str, date: NaiveDate, pool_size: usize) -> usize {
    debug_assert!(pool_size > 0, "activity pool must not be empty");

    let seed = format!("{}_{}", page_id, date.format("%Y-%m-%d"));
    (fnv1a(seed.as_bytes()) % pool_size as u64) as usize
}

/// Picks a replacement suggestion uniformly from the pool, never repeating
/// `current` when the pool has more than one entry. Quota gating happens in
/// the entitlement layer, not here.
pub fn reroll(current: usize, pool_size: usize) -> usize {
    debug_assert!(pool_size > 0, "activity pool must not be empty");

    if pool_size <= 1 {
        return 0;
    }

    let offset = rand::thread_rng().gen_range(1..pool_size);
    (current + offset) % pool_size
}

/// Week-of-year rotation for the weekly ritual pool: days since January 1st,
/// divided by seven, modulo the pool size.
pub fn ritual_index_for_week(date: NaiveDate, pool_size: usize) -> usize {
    debug_assert!(pool_size > 0, "ritual pool must not be empty");

    let week = date.ordinal0() as usize / 7;
    week % pool_size
}
