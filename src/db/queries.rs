//! Clock-record store: validation-free persistence and lookups.
//! Business checks live in core::clock; the uniqueness constraint here is
//! the storage-level backstop against concurrent duplicate submissions.

use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::event_kind::EventKind;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, Result, Row, params};

pub fn map_row(row: &Row) -> Result<ClockEvent> {
    let date_str: String = row.get("date")?;
    let time_str: String = row.get("time")?;

    let date = NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(date_str.clone())),
        )
    })?;

    let time = NaiveTime::parse_from_str(&time_str, "%H:%M").map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidDate(time_str.clone())),
        )
    })?;

    let kind_str: String = row.get("kind")?;
    let kind = EventKind::from_db_str(&kind_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidKind(kind_str.clone())),
        )
    })?;

    Ok(ClockEvent {
        id: row.get("id")?,
        driver_id: row.get("motorista_id")?,
        kind,
        date,
        time,
        odometer: row.get("odometer")?,
        fuel_pct: row.get("fuel_pct")?,
        odometer_photo: row.get("odometer_photo")?,
        fuel_photo: row.get("fuel_photo")?,
        note: row.get("note")?,
        created_at: row.get("created_at")?,
    })
}

/// True for a UNIQUE-index violation, which for registros means the
/// (driver, day, kind) slot is already taken.
fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Insert one immutable clock record. A uniqueness violation is reported as
/// AlreadyRecorded: this is the close of the concurrent-submission race.
pub fn insert_event(conn: &Connection, ev: &ClockEvent) -> AppResult<i64> {
    let res = conn.execute(
        "INSERT INTO registros
             (motorista_id, kind, date, time, odometer, fuel_pct,
              odometer_photo, fuel_photo, note, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            ev.driver_id,
            ev.kind.to_db_str(),
            ev.date_str(),
            ev.time_str(),
            ev.odometer,
            ev.fuel_pct,
            ev.odometer_photo,
            ev.fuel_photo,
            ev.note,
            ev.created_at,
        ],
    );

    match res {
        Ok(_) => Ok(conn.last_insert_rowid()),
        Err(e) if is_unique_violation(&e) => Err(AppError::AlreadyRecorded(format!(
            "{} already recorded on {} for driver {}",
            ev.kind.label(),
            ev.date_str(),
            ev.driver_id
        ))),
        Err(e) => Err(e.into()),
    }
}

/// Does an event of this kind exist for (driver, day)?
pub fn exists_event(
    conn: &Connection,
    driver_id: i64,
    date: NaiveDate,
    kind: EventKind,
) -> AppResult<bool> {
    let mut stmt = conn.prepare_cached(
        "SELECT 1 FROM registros
         WHERE motorista_id = ?1 AND date = ?2 AND kind = ?3
         LIMIT 1",
    )?;
    let exists = stmt.exists(params![
        driver_id,
        date.format("%Y-%m-%d").to_string(),
        kind.to_db_str()
    ])?;
    Ok(exists)
}

/// All events for one driver-day, ordered by creation.
pub fn load_events_for_day(
    conn: &Connection,
    driver_id: i64,
    date: NaiveDate,
) -> AppResult<Vec<ClockEvent>> {
    let mut stmt = conn.prepare_cached(
        "SELECT * FROM registros
         WHERE motorista_id = ?1 AND date = ?2
         ORDER BY created_at ASC",
    )?;

    let rows = stmt.query_map(
        params![driver_id, date.format("%Y-%m-%d").to_string()],
        map_row,
    )?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Typed range query feeding list and export: inclusive date bounds plus
/// optional driver, vehicle and kind filters. Rows come back ordered by
/// driver id then date then time, the order the report builder assumes.
pub fn load_events_range(
    conn: &Connection,
    from: NaiveDate,
    to: NaiveDate,
    driver_id: Option<i64>,
    vehicle_id: Option<i64>,
    kind: Option<EventKind>,
) -> AppResult<Vec<ClockEvent>> {
    let mut sql = String::from(
        "SELECT r.* FROM registros r
         JOIN motoristas m ON m.id = r.motorista_id
         WHERE r.date >= ?1 AND r.date <= ?2",
    );

    let from_s = from.format("%Y-%m-%d").to_string();
    let to_s = to.format("%Y-%m-%d").to_string();
    let mut args: Vec<Box<dyn rusqlite::ToSql>> = vec![Box::new(from_s), Box::new(to_s)];

    if let Some(d) = driver_id {
        args.push(Box::new(d));
        sql.push_str(&format!(" AND r.motorista_id = ?{}", args.len()));
    }
    if let Some(v) = vehicle_id {
        args.push(Box::new(v));
        sql.push_str(&format!(" AND m.veiculo_id = ?{}", args.len()));
    }
    if let Some(k) = kind {
        args.push(Box::new(k.to_db_str().to_string()));
        sql.push_str(&format!(" AND r.kind = ?{}", args.len()));
    }

    sql.push_str(" ORDER BY r.motorista_id ASC, r.date ASC, r.time ASC");

    let mut stmt = conn.prepare(&sql)?;
    let params = rusqlite::params_from_iter(args.iter().map(|b| b.as_ref()));
    let rows = stmt.query_map(params, map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}
