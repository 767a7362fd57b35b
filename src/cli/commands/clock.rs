use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::{ClockLogic, NewClockRecord};
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::success;

/// Handles both the `entry` and `exit` subcommands, which share arguments.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (driver, rec, is_entry) = match cmd {
        Commands::Entry {
            driver,
            odometer,
            fuel,
            odometer_photo,
            fuel_photo,
            note,
        } => (
            driver,
            NewClockRecord {
                odometer: *odometer,
                fuel_pct: *fuel,
                odometer_photo: odometer_photo.clone(),
                fuel_photo: fuel_photo.clone(),
                note: note.clone(),
            },
            true,
        ),
        Commands::Exit {
            driver,
            odometer,
            fuel,
            odometer_photo,
            fuel_photo,
            note,
        } => (
            driver,
            NewClockRecord {
                odometer: *odometer,
                fuel_pct: *fuel,
                odometer_photo: odometer_photo.clone(),
                fuel_photo: fuel_photo.clone(),
                note: note.clone(),
            },
            false,
        ),
        _ => return Ok(()),
    };

    let mut pool = DbPool::new(&cfg.database)?;

    let ev = if is_entry {
        ClockLogic::record_entry(&mut pool, cfg, driver, &rec)?
    } else {
        ClockLogic::record_exit(&mut pool, cfg, driver, &rec)?
    };

    success(format!(
        "{} recorded at {} (odometer {} km, fuel {}%)",
        ev.kind.label(),
        ev.time_str(),
        ev.odometer,
        ev.fuel_pct
    ));

    Ok(())
}
