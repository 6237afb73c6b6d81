//! Synthetic price data: daily OHLCV history, live close nudges and
//! intraday 5-minute prints.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use rand::Rng;

use crate::models::{IntradayTick, PriceBar};
use crate::utils::round2;

/// Calendar days of history generated before today.
pub const HISTORY_DAYS: i64 = 30;
/// 5-minute intervals in a 6.5 hour trading session.
pub const INTRADAY_STEPS: i64 = 78;
pub const INTRADAY_STEP_MINUTES: i64 = 5;
/// Largest move, in percent, applied by a single live update.
pub const MAX_NUDGE_PERCENT: f64 = 1.5;

const MARKET_OPEN_HOUR: u32 = 9;
const MARKET_OPEN_MINUTE: u32 = 30;

/// Build `HISTORY_DAYS + 1` daily bars ending on `today`, oldest first.
///
/// The first bar opens at `base_price`; every later bar opens near the
/// previous close and random-walks from there.
pub fn generate_history<R: Rng>(
    rng: &mut R,
    base_price: f64,
    today: NaiveDate,
) -> Vec<PriceBar> {
    let mut bars: Vec<PriceBar> = Vec::with_capacity(HISTORY_DAYS as usize + 1);

    for days_back in (0..=HISTORY_DAYS).rev() {
        let date = today - Duration::days(days_back);
        let bar = match bars.last() {
            None => first_bar(rng, base_price, date),
            Some(prev) => next_bar(rng, prev.close, date),
        };
        bars.push(bar);
    }

    bars
}

fn first_bar<R: Rng>(rng: &mut R, base_price: f64, date: NaiveDate) -> PriceBar {
    PriceBar {
        date,
        open: round2(base_price),
        high: round2(base_price * (1.0 + rng.random_range(0.0..0.02))),
        low: round2(base_price * (1.0 - rng.random_range(0.0..0.02))),
        close: round2(base_price * rng.random_range(0.98..1.02)),
        volume: daily_volume(rng),
    }
}

fn next_bar<R: Rng>(rng: &mut R, prev_close: f64, date: NaiveDate) -> PriceBar {
    let open = prev_close * rng.random_range(0.99..1.01);
    let close = open * rng.random_range(0.98..1.02);
    let high = open.max(close) * (1.0 + rng.random_range(0.0..0.015));
    let low = open.min(close) * (1.0 - rng.random_range(0.0..0.015));

    PriceBar {
        date,
        open: round2(open),
        high: round2(high),
        low: round2(low),
        close: round2(close),
        volume: daily_volume(rng),
    }
}

fn daily_volume<R: Rng>(rng: &mut R) -> u64 {
    rng.random_range(1_000_000..11_000_000)
}

/// Move a close by at most `MAX_NUDGE_PERCENT` in either direction.
pub fn nudge_close<R: Rng>(rng: &mut R, last_close: f64) -> f64 {
    let change_percent = rng.random_range(-MAX_NUDGE_PERCENT..MAX_NUDGE_PERCENT);
    round2(last_close * (1.0 + change_percent / 100.0))
}

/// Walk forward from the session open in 5-minute steps, never past `now`.
///
/// Before 09:30 the previous session's open is used as the anchor, so a
/// request made early in the morning still sees a full day of prints.
pub fn generate_intraday<R, Tz>(
    rng: &mut R,
    last_close: f64,
    now: DateTime<Tz>,
) -> Vec<IntradayTick>
where
    R: Rng,
    Tz: TimeZone,
{
    let open = session_open(&now);
    let mut price = last_close;
    let mut ticks = Vec::new();

    for step in 0..INTRADAY_STEPS {
        let timestamp = open.clone() + Duration::minutes(step * INTRADAY_STEP_MINUTES);
        if timestamp > now {
            break;
        }

        price *= rng.random_range(0.998..1.002);

        ticks.push(IntradayTick {
            timestamp: timestamp.with_timezone(&Utc),
            price: round2(price),
            volume: rng.random_range(0..100_000),
        });
    }

    ticks
}

fn session_open<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let open_time = NaiveTime::from_hms_opt(MARKET_OPEN_HOUR, MARKET_OPEN_MINUTE, 0)
        .unwrap_or(NaiveTime::MIN);

    let local = now.naive_local();
    let day = if local.time() < open_time {
        local.date() - Duration::days(1)
    } else {
        local.date()
    };

    now.timezone()
        .from_local_datetime(&day.and_time(open_time))
        .earliest()
        .unwrap_or_else(|| now.clone())
}
