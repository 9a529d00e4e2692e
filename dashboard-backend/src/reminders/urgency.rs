//! Urgency derivation and ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::cmp::Ordering;

use super::types::{Reminder, Urgency};

const DATE_FORMAT: &str = "%Y-%m-%d";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse a due date as written, dropping any time of day.
///
/// Offsets in RFC 3339 timestamps are not applied; the calendar date in the
/// string is the due date.
pub fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local().date());
    }
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

/// Tier for a whole-day distance between the due date and today
pub fn urgency_from_delta(delta_days: i64) -> Urgency {
    match delta_days {
        d if d < 0 => Urgency::Overdue,
        0 => Urgency::Today,
        1 => Urgency::Urgent,
        2..=7 => Urgency::Soon,
        _ => Urgency::Normal,
    }
}

/// Tier for a raw due date. Unparseable dates are `Normal`.
pub fn urgency_for(due_date: &str, today: NaiveDate) -> Urgency {
    match parse_due_date(due_date) {
        Some(due) => urgency_from_delta((due - today).num_days()),
        None => Urgency::Normal,
    }
}

/// Recompute every reminder's urgency against `today`, then sort by
/// (urgency rank, due date). Reminders without a usable date come last in
/// their tier; ties keep their stored order.
pub fn refresh_and_sort(reminders: &mut [Reminder], today: NaiveDate) {
    for reminder in reminders.iter_mut() {
        reminder.urgency = urgency_for(&reminder.due_date, today);
    }
    reminders.sort_by(compare);
}

fn compare(a: &Reminder, b: &Reminder) -> Ordering {
    a.urgency
        .rank()
        .cmp(&b.urgency.rank())
        .then_with(|| {
            match (parse_due_date(&a.due_date), parse_due_date(&b.due_date)) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reminders::types::ReminderType;
    use chrono::Duration;
    use serde_json::Map;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    fn offset(days: i64) -> String {
        (today() + Duration::days(days)).format("%Y-%m-%d").to_string()
    }

    fn reminder(id: &str, due_date: &str) -> Reminder {
        Reminder {
            id: id.to_string(),
            title: format!("Reminder {}", id),
            due_date: due_date.to_string(),
            reminder_type: ReminderType::General,
            urgency: Urgency::Normal,
            completed: false,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_urgency_boundaries() {
        assert_eq!(urgency_for(&offset(-30), today()), Urgency::Overdue);
        assert_eq!(urgency_for(&offset(-1), today()), Urgency::Overdue);
        assert_eq!(urgency_for(&offset(0), today()), Urgency::Today);
        assert_eq!(urgency_for(&offset(1), today()), Urgency::Urgent);
        assert_eq!(urgency_for(&offset(2), today()), Urgency::Soon);
        assert_eq!(urgency_for(&offset(7), today()), Urgency::Soon);
        assert_eq!(urgency_for(&offset(8), today()), Urgency::Normal);
        assert_eq!(urgency_for(&offset(365), today()), Urgency::Normal);
    }

    #[test]
    fn test_unparseable_dates_are_normal() {
        assert_eq!(urgency_for("", today()), Urgency::Normal);
        assert_eq!(urgency_for("next tuesday", today()), Urgency::Normal);
        assert_eq!(urgency_for("2025-02-30", today()), Urgency::Normal);
    }

    #[test]
    fn test_time_of_day_is_ignored() {
        assert_eq!(urgency_for("2025-03-10T23:59", today()), Urgency::Today);
        assert_eq!(urgency_for("2025-03-11T00:01:00", today()), Urgency::Urgent);
        assert_eq!(urgency_for("2025-03-09 18:30:00", today()), Urgency::Overdue);
        assert_eq!(urgency_for("2025-03-12T08:00:00+02:00", today()), Urgency::Soon);
        assert_eq!(urgency_for("2025-03-10T08:00:00.250", today()), Urgency::Today);
    }

    #[test]
    fn test_parse_due_date_trims_whitespace() {
        assert_eq!(parse_due_date(" 2025-03-10 "), Some(today()));
    }

    #[test]
    fn test_sort_by_tier_then_date() {
        let mut reminders = vec![
            reminder("far", &offset(30)),
            reminder("soon-late", &offset(6)),
            reminder("overdue", &offset(-2)),
            reminder("today", &offset(0)),
            reminder("soon-early", &offset(3)),
            reminder("tomorrow", &offset(1)),
            reminder("overdue-older", &offset(-10)),
        ];

        refresh_and_sort(&mut reminders, today());

        let ids: Vec<&str> = reminders.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "overdue-older",
                "overdue",
                "today",
                "tomorrow",
                "soon-early",
                "soon-late",
                "far"
            ]
        );
        assert_eq!(reminders[0].urgency, Urgency::Overdue);
        assert_eq!(reminders[6].urgency, Urgency::Normal);
    }

    #[test]
    fn test_undated_reminders_sort_last_in_normal_tier() {
        let mut reminders = vec![
            reminder("missing", ""),
            reminder("garbage", "someday"),
            reminder("far", &offset(20)),
            reminder("today", &offset(0)),
        ];

        refresh_and_sort(&mut reminders, today());

        let ids: Vec<&str> = reminders.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "far", "missing", "garbage"]);
    }

    #[test]
    fn test_undated_reminders_keep_stored_order() {
        let mut reminders = vec![
            reminder("zeta", "whenever"),
            reminder("alpha", ""),
            reminder("mid", "after exams"),
        ];

        refresh_and_sort(&mut reminders, today());

        let ids: Vec<&str> = reminders.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_stored_urgency_is_not_trusted() {
        let mut stale = reminder("stale", &offset(-1));
        stale.urgency = Urgency::Normal;
        let mut reminders = vec![stale];

        refresh_and_sort(&mut reminders, today());
        assert_eq!(reminders[0].urgency, Urgency::Overdue);
    }
}
