//! Message composer — renders the birthday/nameday announcement.
//!
//! Every random draw goes through the caller's `Rng`, so a seeded generator
//! makes the output reproducible.

use rand::Rng;

use zivijo_common::types::IconSet;
use zivijo_common::{AppError, Result};

/// Closing wishes, one is drawn per section.
pub const POSITIVE_MESSAGES: [&str; 10] = [
    "All the best and many more years to come.",
    "Your presence brightens our workplace.",
    "We're grateful to have you as part of our team.",
    "We're truly appreciative to have you contributing to our team.",
    "Wishing you continued success and prosperity in the years ahead.",
    "Here's to your ongoing achievements and a future filled with happiness.",
    "Sending you wishes for a lifetime of joy, fulfillment, and memorable experiences.",
    "May each passing year bring you closer to your dreams and aspirations.",
    "Here's to a future brimming with excitement, prosperity, and fulfillment.",
    "May the coming years be even more fulfilling and rewarding than the ones before.",
];

/// Pick one icon from the configured set.
pub fn random_icon<'a, R: Rng>(icons: &'a IconSet, rng: &mut R) -> &'a str {
    let icons = icons.as_slice();
    &icons[rng.random_range(0..icons.len())]
}

/// Pick one closing wish.
pub fn random_positive_message<R: Rng>(rng: &mut R) -> &'static str {
    POSITIVE_MESSAGES[rng.random_range(0..POSITIVE_MESSAGES.len())]
}

fn colleague_wording(count: usize) -> &'static str {
    if count == 1 { "colleague" } else { "colleagues" }
}

fn birthday_section<R: Rng>(ids: &[String], icons: &IconSet, rng: &mut R) -> String {
    let icon = random_icon(icons, rng);
    format!(
        "### {icon} Happy Birthday! {icon} \nToday is the birthday of our beloved {} {}. {} :)",
        colleague_wording(ids.len()),
        ids.join(", "),
        random_positive_message(rng),
    )
}

fn nameday_section<R: Rng>(ids: &[String], icons: &IconSet, rng: &mut R) -> String {
    let icon = random_icon(icons, rng);
    format!(
        "### {icon} Happy Nameday! {icon} \nThe day has come to celebrate the nameday of our dearest {} {}. {} :)",
        colleague_wording(ids.len()),
        ids.join(", "),
        random_positive_message(rng),
    )
}

/// Render the message body: a birthday section, a nameday section, or both
/// separated by a blank line.
///
/// Both lists empty is a caller bug and yields [`AppError::NothingToCelebrate`].
pub fn compose_message<R: Rng>(
    birthday_ids: &[String],
    nameday_ids: &[String],
    icons: &IconSet,
    rng: &mut R,
) -> Result<String> {
    let mut sections = Vec::with_capacity(2);

    if !birthday_ids.is_empty() {
        sections.push(birthday_section(birthday_ids, icons, rng));
    }
    if !nameday_ids.is_empty() {
        sections.push(nameday_section(nameday_ids, icons, rng));
    }

    if sections.is_empty() {
        return Err(AppError::NothingToCelebrate);
    }

    Ok(sections.join("\n\n"))
}
