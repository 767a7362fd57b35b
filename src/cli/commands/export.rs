use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::pairing::pair_events;
use crate::core::report::{ReportRow, build_rows};
use crate::db::log::oplog;
use crate::db::pool::DbPool;
use crate::db::queries::load_events_range;
use crate::db::refdata::{find_driver, load_all_profiles};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, default_report_filename, ensure_writable, write_report};
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use std::io;
use std::path::PathBuf;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        from,
        to,
        driver,
        vehicle,
        format,
        file,
        force,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        let (start, end) = parse_range(from, to)?;
        let fmt = ExportFormat::from_str(format)?;

        // Explicit paths must be absolute; the default name lands in the
        // current directory.
        let path = match file {
            Some(f) => {
                let p = PathBuf::from(f);
                if !p.is_absolute() {
                    return Err(AppError::from(io::Error::other(format!(
                        "Output file path must be absolute: {f}"
                    ))));
                }
                p
            }
            None => PathBuf::from(default_report_filename(fmt)),
        };

        let driver_id = match driver {
            Some(key) => Some(find_driver(&pool.conn, key)?.id),
            None => None,
        };

        let events = load_events_range(&pool.conn, start, end, driver_id, *vehicle, None)?;
        let pairs = pair_events(events);

        if pairs.iter().any(|p| p.integrity_warning) {
            warning("Duplicate events found for a driver-day; earliest records were used.");
        }

        let profiles = load_all_profiles(&pool.conn)?;
        let rows: Vec<ReportRow> = build_rows(pairs, &profiles).collect();

        if rows.is_empty() {
            warning("No records found for selected range.");
            return Ok(());
        }

        // Only ask about overwriting once there is something to write.
        ensure_writable(&path, *force)?;
        write_report(&rows, fmt, &path)?;

        oplog(
            &pool.conn,
            "export",
            &path.to_string_lossy(),
            &format!("{} row(s) exported for {from}..{to}", rows.len()),
        )?;
    }
    Ok(())
}
