use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries::load_events_range;
use crate::db::refdata::{find_driver, load_all_profiles};
use crate::errors::{AppError, AppResult};
use crate::models::event_kind::EventKind;
use crate::ui::messages::warning;
use crate::utils::date::parse_range;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        from,
        to,
        driver,
        kind,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;
        let (start, end) = parse_range(from, to)?;

        let driver_id = match driver {
            Some(key) => Some(find_driver(&pool.conn, key)?.id),
            None => None,
        };

        let kind_filter = match kind {
            Some(code) => Some(
                EventKind::from_code(code)
                    .ok_or_else(|| AppError::InvalidKind(code.to_string()))?,
            ),
            None => None,
        };

        let events = load_events_range(&pool.conn, start, end, driver_id, None, kind_filter)?;

        if events.is_empty() {
            warning("No records found for selected range.");
            return Ok(());
        }

        let profiles = load_all_profiles(&pool.conn)?;

        let mut table = Table::new(vec![
            "ID",
            "Motorista",
            "Data",
            "Hora",
            "Tipo",
            "Odômetro",
            "Combustível",
            "Obs",
        ]);

        for ev in &events {
            let nome = profiles
                .get(&ev.driver_id)
                .map(|p| p.driver.nome.clone())
                .unwrap_or_else(|| format!("#{}", ev.driver_id));

            table.add_row(vec![
                ev.id.to_string(),
                nome,
                ev.date_br(),
                ev.time_str(),
                ev.kind.label().to_string(),
                format!("{} km", ev.odometer),
                format!("{}%", ev.fuel_pct),
                ev.note.clone().unwrap_or_default(),
            ]);
        }

        print!("{}", table.render(&cfg.separator_char));
        println!("{} record(s)", events.len());
    }
    Ok(())
}
