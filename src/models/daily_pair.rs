use super::clock_event::ClockEvent;
use super::day_status::DayStatus;
use chrono::NaiveDate;

/// The entry/exit pair (partial or complete) for one driver on one calendar
/// day. Derived on demand from the store, never persisted.
#[derive(Debug, Clone)]
pub struct DailyPair {
    pub driver_id: i64,
    pub date: NaiveDate,
    pub entry: Option<ClockEvent>,
    pub exit: Option<ClockEvent>,
    /// Set when the store held duplicate kinds for this day (which the
    /// uniqueness constraint should make impossible).
    pub integrity_warning: bool,
}

impl DailyPair {
    pub fn new(driver_id: i64, date: NaiveDate) -> Self {
        Self {
            driver_id,
            date,
            entry: None,
            exit: None,
            integrity_warning: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.entry.is_some() && self.exit.is_some()
    }

    /// Worked hours, rounded to 2 decimals. 0 unless both sides are present.
    /// An exit earlier than its entry yields a negative value: the source
    /// system never validated that ordering and neither do we.
    pub fn duration_hours(&self) -> f64 {
        match (&self.entry, &self.exit) {
            (Some(entry), Some(exit)) => {
                let delta = exit.timestamp() - entry.timestamp();
                round2(delta.num_minutes() as f64 / 60.0)
            }
            _ => 0.0,
        }
    }

    /// Kilometers driven in the day. 0 unless both sides are present and
    /// the exit odometer is strictly greater (guards against odometer entry
    /// errors producing negative mileage).
    pub fn km_driven(&self) -> i64 {
        match (&self.entry, &self.exit) {
            (Some(entry), Some(exit)) if exit.odometer > entry.odometer => {
                exit.odometer - entry.odometer
            }
            _ => 0,
        }
    }

    pub fn status(&self) -> DayStatus {
        match (&self.entry, &self.exit) {
            (Some(_), Some(_)) => DayStatus::Finished,
            (Some(_), None) => DayStatus::Working,
            _ => DayStatus::NotStarted,
        }
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event_kind::EventKind;
    use chrono::{NaiveDate, NaiveTime};

    fn ev(kind: EventKind, time: &str, odometer: i64) -> ClockEvent {
        ClockEvent {
            id: 0,
            driver_id: 1,
            kind,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            odometer,
            fuel_pct: 50,
            odometer_photo: String::new(),
            fuel_photo: String::new(),
            note: None,
            created_at: "2025-09-01T08:00:00-03:00".to_string(),
        }
    }

    fn pair_with(entry: Option<ClockEvent>, exit: Option<ClockEvent>) -> DailyPair {
        let mut p = DailyPair::new(1, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        p.entry = entry;
        p.exit = exit;
        p
    }

    #[test]
    fn full_day_duration_and_mileage() {
        let p = pair_with(
            Some(ev(EventKind::Entry, "08:00", 1000)),
            Some(ev(EventKind::Exit, "17:30", 1120)),
        );
        assert_eq!(p.duration_hours(), 9.5);
        assert_eq!(p.km_driven(), 120);
        assert_eq!(p.status(), DayStatus::Finished);
    }

    #[test]
    fn entry_only_yields_zero_metrics() {
        let p = pair_with(Some(ev(EventKind::Entry, "08:00", 1000)), None);
        assert_eq!(p.duration_hours(), 0.0);
        assert_eq!(p.km_driven(), 0);
        assert_eq!(p.status(), DayStatus::Working);
    }

    #[test]
    fn exit_only_yields_zero_metrics() {
        let p = pair_with(None, Some(ev(EventKind::Exit, "17:30", 1120)));
        assert_eq!(p.duration_hours(), 0.0);
        assert_eq!(p.km_driven(), 0);
        assert_eq!(p.status(), DayStatus::NotStarted);
    }

    #[test]
    fn empty_pair_is_not_started() {
        let p = pair_with(None, None);
        assert_eq!(p.status(), DayStatus::NotStarted);
    }

    #[test]
    fn odometer_regression_never_goes_negative() {
        let p = pair_with(
            Some(ev(EventKind::Entry, "08:00", 1120)),
            Some(ev(EventKind::Exit, "17:30", 1000)),
        );
        assert_eq!(p.km_driven(), 0);
    }

    #[test]
    fn duration_rounds_to_two_decimals() {
        let p = pair_with(
            Some(ev(EventKind::Entry, "08:00", 0)),
            Some(ev(EventKind::Exit, "16:20", 0)),
        );
        // 8h20m = 8.3333... → 8.33
        assert_eq!(p.duration_hours(), 8.33);
    }
}
