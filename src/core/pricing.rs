//! Speculative acquisition price of an expired name.
//!
//! The premium starts at 100M at grace end and halves every day; before grace
//! end it is a large negative sentinel so callers can tell "not yet" apart.

use chrono::{DateTime, Utc};

pub const PREMIUM_START_PRICE: f64 = 100_000_000.0;
pub const PREMIUM_NOT_ACTIVE: f64 = -1_000_000.0;
pub const DEFAULT_REGISTRATION_DAYS: u32 = 30;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// 年費 (USD) 依標籤長度分級
const LONG_NAME_YEARLY: f64 = 5.0;
const FOUR_CHAR_YEARLY: f64 = 160.0;
const SHORT_NAME_YEARLY: f64 = 640.0;

pub fn premium_price(grace_end: DateTime<Utc>) -> f64 {
    premium_price_at(grace_end, Utc::now())
}

pub fn premium_price_at(grace_end: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let elapsed = now - grace_end;
    if elapsed < chrono::TimeDelta::zero() {
        return PREMIUM_NOT_ACTIVE;
    }

    let days_passed = round_to_hundredths(elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY);
    PREMIUM_START_PRICE * 0.5_f64.powf(days_passed)
}

/// Length used for bucketing: char count minus the 4 chars of `.eth`.
///
/// The 4 is subtracted whether or not the suffix is present, so callers pass
/// the full domain.
pub fn normalized_length(name: &str) -> i64 {
    name.chars().count() as i64 - 4
}

pub fn daily_rate(name: &str) -> f64 {
    let yearly = match normalized_length(name) {
        len if len >= 5 => LONG_NAME_YEARLY,
        4 => FOUR_CHAR_YEARLY,
        _ => SHORT_NAME_YEARLY,
    };
    yearly / 365.0
}

pub fn reg_price(name: &str, days: u32) -> f64 {
    daily_rate(name) * f64::from(days)
}

pub fn net_reg_price(name: &str, grace_end: DateTime<Utc>) -> f64 {
    net_reg_price_at(name, grace_end, Utc::now())
}

pub fn net_reg_price_at(name: &str, grace_end: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    premium_price_at(grace_end, now) + reg_price(name, DEFAULT_REGISTRATION_DAYS)
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
