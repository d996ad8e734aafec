// ABOUTME: Validated crontab expression for trigger schedules.
// ABOUTME: Accepts classic 5-field expressions as well as 6/7-field ones with seconds.

use chrono::{DateTime, Utc};
use cron::Schedule;
use serde::{Deserialize, Deserializer};
use snafu::{OptionExt, ResultExt};
use std::fmt;
use std::str::FromStr;

use super::error::{InvalidCrontabSnafu, NeverFiresSnafu, ScheduleError};

/// A parsed crontab expression.
///
/// Five-field expressions (`min hour dom mon dow`) fire at second zero of the
/// matching minute. Day-of-week numbers follow the classic convention where
/// 0 and 7 are Sunday. All times are evaluated in UTC.
#[derive(Clone)]
pub struct Crontab {
    expression: String,
    schedule: Schedule,
}

impl Crontab {
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let expression = expression.trim().to_string();
        let normalized = normalize(&expression);
        let schedule = Schedule::from_str(&normalized).context(InvalidCrontabSnafu {
            expression: expression.clone(),
        })?;

        schedule
            .upcoming(Utc)
            .next()
            .context(NeverFiresSnafu {
                expression: expression.clone(),
            })?;

        Ok(Self {
            expression,
            schedule,
        })
    }

    /// The expression as written in the configuration.
    pub fn as_str(&self) -> &str {
        &self.expression
    }

    /// The first firing strictly after `now`.
    pub fn next_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(&now).next()
    }
}

fn normalize(expression: &str) -> String {
    if expression.starts_with('@') {
        return expression.to_string();
    }
    let mut fields: Vec<String> = expression.split_whitespace().map(str::to_string).collect();
    if fields.len() == 5 {
        fields.insert(0, "0".to_string());
    }
    if let Some(days) = fields.get_mut(5) {
        *days = weekdays(days);
    }
    fields.join(" ")
}

/// Rewrite a day-of-week field from classic numbering (0 or 7 is Sunday,
/// 6 is Saturday) to the `cron` crate's (1 is Sunday, 7 is Saturday).
///
/// Named days and anything not understood are left for `cron` to judge.
fn weekdays(field: &str) -> String {
    if field == "*" || field == "?" {
        return field.to_string();
    }
    field
        .split(',')
        .map(|part| match classic_days(part) {
            Some(days) => {
                let mut days: Vec<u8> = days.into_iter().map(|day| day % 7 + 1).collect();
                days.sort_unstable();
                days.dedup();
                days.iter().map(u8::to_string).collect::<Vec<_>>().join(",")
            }
            None => part.to_string(),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Days selected by one list item such as `3`, `1-5`, `*/2` or `1-5/2`.
fn classic_days(part: &str) -> Option<Vec<u8>> {
    let (base, step) = match part.split_once('/') {
        Some((base, step)) => (base, step.parse::<usize>().ok().filter(|s| *s > 0)?),
        None => (part, 1),
    };
    let (first, last) = match base {
        "*" | "?" => (0, 6),
        _ => match base.split_once('-') {
            Some((first, last)) => (day_number(first)?, day_number(last)?),
            None if step > 1 => (day_number(base)?, 6),
            None => {
                let day = day_number(base)?;
                (day, day)
            }
        },
    };
    if first > last {
        return None;
    }
    Some((first..=last).step_by(step).collect())
}

fn day_number(value: &str) -> Option<u8> {
    value.parse::<u8>().ok().filter(|day| *day <= 7)
}

impl PartialEq for Crontab {
    fn eq(&self, other: &Self) -> bool {
        self.expression == other.expression
    }
}

impl Eq for Crontab {}

impl fmt::Debug for Crontab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Crontab").field(&self.expression).finish()
    }
}

impl fmt::Display for Crontab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expression)
    }
}

impl<'de> Deserialize<'de> for Crontab {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Crontab::parse(&s).map_err(serde::de::Error::custom)
    }
}
