//! Daily digest generation schedule.
//!
//! Computes the next wall-clock fire instant in the configured timezone,
//! sleeps until then, runs the pipeline over every category, and hands
//! each success to the delivery stub. The last fire instant is not
//! persisted: a restart shortly before the fire time can generate twice,
//! and downtime spanning it skips the day.

use std::sync::Arc;

use chrono::{DateTime, Duration, NaiveTime, Utc};
use chrono_tz::Tz;
use tidings_core::{
  category::Category, pipeline::DigestPipeline, store::NewsletterStore,
  summarizer::Summarizer,
};

use crate::delivery;

/// Fires [`DigestPipeline::generate_all`] once per day.
pub struct DigestScheduler<S, G> {
  pipeline: Arc<DigestPipeline<S, G>>,
  store:    Arc<S>,
  /// Wall-clock time of day each run starts, in `timezone`.
  time:     NaiveTime,
  timezone: Tz,
}

impl<S, G> DigestScheduler<S, G>
where
  S: NewsletterStore + 'static,
  G: Summarizer + 'static,
{
  pub fn new(
    pipeline: Arc<DigestPipeline<S, G>>,
    store: Arc<S>,
    time: NaiveTime,
    timezone: Tz,
  ) -> Self {
    Self { pipeline, store, time, timezone }
  }

  /// Spawn the schedule loop onto the runtime.
  pub fn start(self: Arc<Self>) {
    tokio::spawn(async move {
      loop {
        let next = next_fire(self.time, self.timezone, Utc::now());
        tracing::info!(fire_at = %next, "next scheduled digest generation");

        let wait = (next - Utc::now()).to_std().unwrap_or_default();
        tokio::time::sleep(wait).await;

        self.run_once().await;
      }
    });
  }

  /// One full generation pass over every category.
  async fn run_once(&self) {
    tracing::info!("running scheduled digest generation");
    let report = self.pipeline.generate_all(&Category::ALL).await;

    for digest in report.succeeded() {
      tracing::info!(category = %digest.category, "digest generated");
      if let Err(e) =
        delivery::notify_subscribers(self.store.as_ref(), digest.category)
          .await
      {
        tracing::error!(
          category = %digest.category,
          error = %e,
          "subscriber lookup failed"
        );
      }
    }

    for (category, error) in report.failed() {
      tracing::error!(
        category = %category,
        error = %error,
        "digest generation failed"
      );
    }
  }
}

/// The next instant `time` occurs in `zone`, strictly after `now`.
fn next_fire(time: NaiveTime, zone: Tz, now: DateTime<Utc>) -> DateTime<Utc> {
  let now_local = now.with_timezone(&zone);
  let mut date = now_local.date_naive();

  // A time inside a DST gap has no representation on that date; fall
  // through to the next day.
  loop {
    if let Some(candidate) =
      date.and_time(time).and_local_timezone(zone).earliest()
      && candidate > now_local
    {
      return candidate.with_timezone(&Utc);
    }
    date += Duration::days(1);
  }
}

#[cfg(test)]
mod tests {
  use chrono::TimeZone;

  use super::*;

  const KOLKATA: Tz = chrono_tz::Asia::Kolkata;

  fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
  }

  #[test]
  fn fires_today_when_the_time_is_still_ahead() {
    // 01:00 UTC is 06:30 in Kolkata, ahead of a 08:00 fire time.
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 1, 0, 0).unwrap();
    let next = next_fire(at(8, 0), KOLKATA, now);

    // 08:00 IST is 02:30 UTC the same day.
    assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 2, 2, 30, 0).unwrap());
  }

  #[test]
  fn fires_tomorrow_when_the_time_has_passed() {
    // 10:00 UTC is 15:30 in Kolkata, past a 08:00 fire time.
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
    let next = next_fire(at(8, 0), KOLKATA, now);

    assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 3, 2, 30, 0).unwrap());
  }

  #[test]
  fn exact_fire_instant_rolls_to_the_next_day() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 2, 30, 0).unwrap();
    let next = next_fire(at(8, 0), KOLKATA, now);

    assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 3, 2, 30, 0).unwrap());
  }

  #[test]
  fn respects_the_configured_timezone() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 22, 0, 0).unwrap();
    let next = next_fire(at(23, 0), chrono_tz::UTC, now);

    assert_eq!(next, Utc.with_ymd_and_hms(2026, 3, 2, 23, 0, 0).unwrap());
  }
}
