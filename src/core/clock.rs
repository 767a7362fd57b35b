//! High-level business logic for the entry/exit commands: field validation,
//! one-entry/one-exit-per-day ordering rules, photo processing and the
//! final insert.

use crate::config::Config;
use crate::core::{pairing, watermark};
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::{exists_event, insert_event, load_events_for_day};
use crate::db::refdata::find_driver;
use crate::errors::{AppError, AppResult};
use crate::models::clock_event::ClockEvent;
use crate::models::daily_pair::DailyPair;
use crate::models::event_kind::EventKind;
use crate::models::refdata::Driver;
use crate::ui::messages::warning;
use chrono::{Local, NaiveDate, NaiveTime, Timelike};
use std::fs;
use std::path::Path;

/// Upload cap for submitted photos. Bounds watermark processing latency.
const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Fields a driver submits with a clock action.
pub struct NewClockRecord {
    pub odometer: i64,
    pub fuel_pct: i64,
    pub odometer_photo: std::path::PathBuf,
    pub fuel_photo: std::path::PathBuf,
    pub note: Option<String>,
}

pub struct ClockLogic;

impl ClockLogic {
    pub fn record_entry(
        pool: &mut DbPool,
        cfg: &Config,
        driver_key: &str,
        rec: &NewClockRecord,
    ) -> AppResult<ClockEvent> {
        Self::record(pool, cfg, driver_key, EventKind::Entry, rec)
    }

    pub fn record_exit(
        pool: &mut DbPool,
        cfg: &Config,
        driver_key: &str,
        rec: &NewClockRecord,
    ) -> AppResult<ClockEvent> {
        Self::record(pool, cfg, driver_key, EventKind::Exit, rec)
    }

    fn record(
        pool: &mut DbPool,
        cfg: &Config,
        driver_key: &str,
        kind: EventKind,
        rec: &NewClockRecord,
    ) -> AppResult<ClockEvent> {
        let driver = find_driver(&pool.conn, driver_key)?;
        if !driver.ativo {
            return Err(AppError::Validation(format!(
                "Driver '{}' is inactive",
                driver.nome
            )));
        }

        validate_fields(rec)?;

        // Server-assigned timestamp, minute precision like the store keeps.
        let now = Local::now();
        let date = now.date_naive();
        let time = NaiveTime::from_hms_opt(now.hour(), now.minute(), 0)
            .ok_or_else(|| AppError::Other("clock read failed".into()))?;

        // Ordering pre-checks give friendly errors; the uniqueness index in
        // the store closes the race either way.
        match kind {
            EventKind::Entry => {
                if exists_event(&pool.conn, driver.id, date, EventKind::Entry)? {
                    return Err(AppError::AlreadyRecorded(format!(
                        "Entrada already recorded today for {}",
                        driver.nome
                    )));
                }
            }
            EventKind::Exit => {
                if !exists_event(&pool.conn, driver.id, date, EventKind::Entry)? {
                    return Err(AppError::MissingEntry(format!(
                        "No entrada recorded today for {}",
                        driver.nome
                    )));
                }
                if exists_event(&pool.conn, driver.id, date, EventKind::Exit)? {
                    return Err(AppError::AlreadyRecorded(format!(
                        "Saída already recorded today for {}",
                        driver.nome
                    )));
                }
            }
        }

        // Both photos are read, capped and watermarked in memory first;
        // nothing lands on disk until the record row exists, so a rejected
        // submission leaves no orphaned files behind.
        let caption = now.format("%d/%m/%Y %H:%M").to_string();
        let odo = prepare_photo(cfg, &driver, &rec.odometer_photo, &caption, date)?;
        let fuel = prepare_photo(cfg, &driver, &rec.fuel_photo, &caption, date)?;

        let ev = ClockEvent {
            id: 0,
            driver_id: driver.id,
            kind,
            date,
            time,
            odometer: rec.odometer,
            fuel_pct: rec.fuel_pct,
            odometer_photo: odo.rel.clone(),
            fuel_photo: fuel.rel.clone(),
            note: rec.note.clone(),
            created_at: now.to_rfc3339(),
        };

        let id = insert_event(&pool.conn, &ev)?;

        store_photo(pool, cfg, odo)?;
        store_photo(pool, cfg, fuel)?;

        oplog(
            &pool.conn,
            "clock",
            &driver.nome,
            &format!("{} recorded at {}", kind.label(), ev.time_str()),
        )?;

        Ok(ClockEvent { id, ..ev })
    }

    /// The daily pair for (driver, day). Never fails on missing events.
    pub fn find_pair(pool: &mut DbPool, driver_id: i64, date: NaiveDate) -> AppResult<DailyPair> {
        let events = load_events_for_day(&pool.conn, driver_id, date)?;
        Ok(pairing::pair_day(driver_id, date, events))
    }
}

fn validate_fields(rec: &NewClockRecord) -> AppResult<()> {
    if rec.odometer < 0 {
        return Err(AppError::Validation(format!(
            "Odometer reading must be non-negative, got {}",
            rec.odometer
        )));
    }
    if !(0..=100).contains(&rec.fuel_pct) {
        return Err(AppError::Validation(format!(
            "Fuel percentage must be between 0 and 100, got {}",
            rec.fuel_pct
        )));
    }
    Ok(())
}

/// One photo after in-memory processing, not yet written to disk.
struct PreparedPhoto {
    /// Path stored with the record, relative to the media directory.
    rel: String,
    bytes: Vec<u8>,
    name: String,
    degraded: Option<String>,
}

/// Read, size-check and watermark one photo entirely in memory. Watermark
/// failures degrade to the original bytes, never fail the submission.
fn prepare_photo(
    cfg: &Config,
    driver: &Driver,
    src: &Path,
    caption: &str,
    date: NaiveDate,
) -> AppResult<PreparedPhoto> {
    let bytes = fs::read(src).map_err(|e| {
        AppError::Validation(format!("Cannot read photo '{}': {e}", src.display()))
    })?;

    if bytes.len() > MAX_PHOTO_BYTES {
        return Err(AppError::Validation(format!(
            "Photo '{}' exceeds the 5 MB limit",
            src.display()
        )));
    }

    let original_name = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "foto.jpg".to_string());

    let font = cfg.font_path.as_deref().map(Path::new);
    let outcome = watermark::stamp(&bytes, caption, &original_name, font);

    // Photos land under registros/YYYY/MM/DD/, one subtree per day.
    let rel = format!(
        "registros/{}/{}_{}",
        date.format("%Y/%m/%d"),
        driver.id,
        outcome.filename
    );

    Ok(PreparedPhoto {
        rel,
        bytes: outcome.bytes,
        name: original_name,
        degraded: outcome.degraded,
    })
}

/// Write a prepared photo under the media directory and log any watermark
/// degradation. Only called once the record row is inserted.
fn store_photo(pool: &mut DbPool, cfg: &Config, photo: PreparedPhoto) -> AppResult<()> {
    if let Some(reason) = &photo.degraded {
        warning(format!(
            "Watermark skipped for '{}': {} (original stored)",
            photo.name, reason
        ));
        oplog(&pool.conn, "watermark", &photo.name, reason)?;
    }

    let dest = Path::new(&cfg.media_dir).join(&photo.rel);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&dest, &photo.bytes)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(odometer: i64, fuel: i64) -> NewClockRecord {
        NewClockRecord {
            odometer,
            fuel_pct: fuel,
            odometer_photo: "a.jpg".into(),
            fuel_photo: "b.jpg".into(),
            note: None,
        }
    }

    #[test]
    fn fuel_out_of_range_is_rejected() {
        let err = validate_fields(&rec(1000, 150)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = validate_fields(&rec(1000, -1)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn negative_odometer_is_rejected() {
        let err = validate_fields(&rec(-5, 50)).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn boundary_fuel_values_pass() {
        validate_fields(&rec(0, 0)).unwrap();
        validate_fields(&rec(0, 100)).unwrap();
    }
}
