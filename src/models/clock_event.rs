use super::event_kind::EventKind;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// One immutable clock record: an entry or exit for a driver, with the
/// photo evidence paths and the odometer/fuel readings declared with it.
#[derive(Debug, Clone, Serialize)]
pub struct ClockEvent {
    pub id: i64,
    pub driver_id: i64,       // ⇔ registros.motorista_id
    pub kind: EventKind,      // ⇔ registros.kind ('entrada' | 'saida')
    pub date: NaiveDate,      // ⇔ registros.date (TEXT "YYYY-MM-DD")
    pub time: NaiveTime,      // ⇔ registros.time (TEXT "HH:MM")
    pub odometer: i64,        // ⇔ registros.odometer (INT ≥ 0)
    pub fuel_pct: i64,        // ⇔ registros.fuel_pct (INT 0–100)
    pub odometer_photo: String,
    pub fuel_photo: String,
    pub note: Option<String>,
    pub created_at: String,   // ⇔ registros.created_at (TEXT, ISO8601)
}

impl ClockEvent {
    pub fn date_str(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn time_str(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// Date rendered the Brazilian way, as shown in reports.
    pub fn date_br(&self) -> String {
        self.date.format("%d/%m/%Y").to_string()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.date.and_time(self.time)
    }
}
