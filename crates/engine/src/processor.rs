//! Run pipeline.
//!
//! One pass per invocation:
//! 1. Load and validate the roster
//! 2. Match birth dates and name dates against today
//! 3. Post one combined message if anybody is celebrated

use chrono::NaiveDate;
use rand::Rng;

use zivijo_common::Result;
use zivijo_common::config::AppConfig;
use zivijo_common::types::WebhookPayload;
use zivijo_notifier::{WebhookNotifier, WebhookTransport};
use zivijo_roster::load_roster;

use crate::matcher::DateMatcher;

/// How a run ended when nothing went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The roster had no usable rows.
    NoRecords,
    /// Nobody has a birthday or nameday today.
    NothingToCelebrate,
    /// The message was delivered.
    Sent(WebhookPayload),
}

/// Execute one run for `today`, delivering through `transport`.
pub async fn run<T, R>(
    config: &AppConfig,
    today: NaiveDate,
    transport: T,
    rng: &mut R,
) -> Result<RunOutcome>
where
    T: WebhookTransport,
    R: Rng,
{
    let records = load_roster(&config.roster_path)?;

    if records.is_empty() {
        tracing::info!(
            path = %config.roster_path.display(),
            "No data read? {} is empty?",
            config.roster_path.display()
        );
        return Ok(RunOutcome::NoRecords);
    }

    let celebrants = DateMatcher::match_today(&records, today);

    if celebrants.birthday_ids.is_empty() {
        tracing::info!(%today, "No birthdays today :(");
    } else {
        tracing::info!(%today, ids = ?celebrants.birthday_ids, "We have some birthdays today!");
    }

    if celebrants.nameday_ids.is_empty() {
        tracing::info!(%today, "No namedays today :(");
    } else {
        tracing::info!(%today, ids = ?celebrants.nameday_ids, "We have some namedays today!");
    }

    if celebrants.is_empty() {
        return Ok(RunOutcome::NothingToCelebrate);
    }

    let notifier = WebhookNotifier::from_config(config, transport);
    let payload = notifier
        .notify(&celebrants.birthday_ids, &celebrants.nameday_ids, rng)
        .await?;

    Ok(RunOutcome::Sent(payload))
}
