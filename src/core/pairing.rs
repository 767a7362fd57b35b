//! Daily-pairing engine: pure functions turning a stream of clock records
//! into per-driver-per-day entry/exit pairs.

use crate::models::clock_event::ClockEvent;
use crate::models::daily_pair::DailyPair;
use chrono::NaiveDate;

/// Group events into daily pairs, preserving the first-seen order of the
/// (driver, date) keys. Input is expected pre-sorted by driver then date,
/// the order the store's range query produces.
pub fn pair_events(events: Vec<ClockEvent>) -> Vec<DailyPair> {
    let mut pairs: Vec<DailyPair> = Vec::new();

    for ev in events {
        let key = (ev.driver_id, ev.date);
        let idx = match pairs.iter().position(|p| (p.driver_id, p.date) == key) {
            Some(i) => i,
            None => {
                pairs.push(DailyPair::new(ev.driver_id, ev.date));
                pairs.len() - 1
            }
        };
        place(&mut pairs[idx], ev);
    }

    pairs
}

/// Pair a single driver-day. Never fails: missing sides stay None.
pub fn pair_day(driver_id: i64, date: NaiveDate, events: Vec<ClockEvent>) -> DailyPair {
    let mut pair = DailyPair::new(driver_id, date);
    for ev in events {
        place(&mut pair, ev);
    }
    pair
}

/// Slot one event into its side of the pair. Duplicate kinds should be
/// impossible given the store's uniqueness constraint; if one shows up
/// anyway, keep the earliest-created event and flag the pair.
fn place(pair: &mut DailyPair, ev: ClockEvent) {
    let slot = if ev.kind.is_entry() {
        &mut pair.entry
    } else {
        &mut pair.exit
    };

    match slot {
        None => *slot = Some(ev),
        Some(existing) => {
            if ev.created_at < existing.created_at {
                *slot = Some(ev);
            }
            pair.integrity_warning = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event_kind::EventKind;
    use chrono::{NaiveDate, NaiveTime};

    fn ev(driver: i64, day: u32, kind: EventKind, time: &str, created: &str) -> ClockEvent {
        ClockEvent {
            id: 0,
            driver_id: driver,
            kind,
            date: NaiveDate::from_ymd_opt(2025, 9, day).unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            odometer: 0,
            fuel_pct: 50,
            odometer_photo: String::new(),
            fuel_photo: String::new(),
            note: None,
            created_at: created.to_string(),
        }
    }

    #[test]
    fn groups_by_driver_and_day() {
        let events = vec![
            ev(1, 1, EventKind::Entry, "08:00", "t1"),
            ev(1, 1, EventKind::Exit, "17:00", "t2"),
            ev(1, 2, EventKind::Entry, "08:10", "t3"),
            ev(2, 1, EventKind::Entry, "09:00", "t4"),
        ];

        let pairs = pair_events(events);
        assert_eq!(pairs.len(), 3);
        assert!(pairs[0].is_complete());
        assert_eq!(pairs[1].driver_id, 1);
        assert!(pairs[1].exit.is_none());
        assert_eq!(pairs[2].driver_id, 2);
    }

    #[test]
    fn preserves_input_group_order() {
        let events = vec![
            ev(1, 1, EventKind::Entry, "08:00", "t1"),
            ev(1, 2, EventKind::Entry, "08:00", "t2"),
            ev(2, 1, EventKind::Entry, "08:00", "t3"),
        ];

        let pairs = pair_events(events);
        let keys: Vec<(i64, u32)> = pairs
            .iter()
            .map(|p| (p.driver_id, chrono::Datelike::day(&p.date)))
            .collect();
        assert_eq!(keys, vec![(1, 1), (1, 2), (2, 1)]);
    }

    #[test]
    fn duplicate_kind_keeps_earliest_and_flags() {
        let events = vec![
            ev(1, 1, EventKind::Entry, "08:30", "2025-09-01T08:30:00"),
            ev(1, 1, EventKind::Entry, "08:00", "2025-09-01T08:00:00"),
        ];

        let pairs = pair_events(events);
        assert_eq!(pairs.len(), 1);
        assert!(pairs[0].integrity_warning);
        assert_eq!(
            pairs[0].entry.as_ref().unwrap().created_at,
            "2025-09-01T08:00:00"
        );
    }

    #[test]
    fn pair_day_with_no_events_is_empty() {
        let pair = pair_day(1, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), vec![]);
        assert!(pair.entry.is_none());
        assert!(pair.exit.is_none());
        assert!(!pair.integrity_warning);
    }
}
