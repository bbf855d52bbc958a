//! Date matcher — decides who is celebrated today.
//!
//! Birthdays and namedays are matched independently on (month, day); the
//! year in the roster is ignored.

use chrono::{Datelike, NaiveDate};

use zivijo_common::types::{Celebrants, RosterRecord};

/// Matches roster dates against a calendar day.
pub struct DateMatcher;

impl DateMatcher {
    /// Collect the mention handles whose birth date or name date falls on
    /// `today`, in roster order.
    ///
    /// A record can land in both lists. Duplicate handles in the roster
    /// produce duplicate entries.
    pub fn match_today(records: &[RosterRecord], today: NaiveDate) -> Celebrants {
        let ids_where = |pick: fn(&RosterRecord) -> Option<NaiveDate>| {
            records
                .iter()
                .filter(|r| Self::falls_on(pick(r), today))
                .map(|r| r.user_id.clone())
                .collect::<Vec<_>>()
        };

        Celebrants {
            birthday_ids: ids_where(|r| r.birth_date),
            nameday_ids: ids_where(|r| r.name_date),
        }
    }

    /// Whether `date` is an anniversary of `today`. A missing date never matches.
    ///
    /// February 29 only matches on February 29.
    pub fn falls_on(date: Option<NaiveDate>, today: NaiveDate) -> bool {
        date.is_some_and(|d| d.month() == today.month() && d.day() == today.day())
    }
}
