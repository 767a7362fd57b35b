use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::ClockLogic;
use crate::db::pool::DbPool;
use crate::db::refdata::{find_driver, load_active_profiles};
use crate::errors::{AppError, AppResult};
use crate::models::refdata::DriverProfile;
use crate::utils::date::{parse_date, today};
use crate::utils::table::Table;
use serde_json::json;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { driver, date, json } = cmd {
        let mut pool = DbPool::new(&cfg.database)?;

        let day = match date {
            Some(s) => parse_date(s)?,
            None => today(),
        };

        match driver {
            Some(key) => {
                let d = find_driver(&pool.conn, key)?;
                let pair = ClockLogic::find_pair(&mut pool, d.id, day)?;

                if *json {
                    let payload = json!({
                        "motorista": d.nome,
                        "data": day.format("%Y-%m-%d").to_string(),
                        "status": pair.status().as_code(),
                        "entrada": pair.entry.as_ref().map(|e| e.time_str()),
                        "saida": pair.exit.as_ref().map(|e| e.time_str()),
                    });
                    println!("{}", to_pretty(&payload)?);
                } else {
                    println!(
                        "{} — {} ({})",
                        d.nome,
                        pair.status().label(),
                        day.format("%d/%m/%Y")
                    );
                    if let Some(e) = &pair.entry {
                        println!("   Entrada: {}", e.time_str());
                    }
                    if let Some(e) = &pair.exit {
                        println!("   Saída:   {}", e.time_str());
                    }
                }
            }
            None => {
                let mut profiles: Vec<DriverProfile> =
                    load_active_profiles(&pool.conn)?.into_values().collect();
                profiles.sort_by(|a, b| a.driver.nome.cmp(&b.driver.nome));

                if *json {
                    let mut motoristas = Vec::new();
                    for p in &profiles {
                        let pair = ClockLogic::find_pair(&mut pool, p.driver.id, day)?;
                        motoristas.push(json!({
                            "id": p.driver.id,
                            "nome": p.driver.nome,
                            "veiculo": p.vehicle_descriptor(),
                            "mercado": p.market_name(),
                            "status": pair.status().as_code(),
                            "entrada_hoje": pair.entry.as_ref().map(|e| e.time_str()),
                            "saida_hoje": pair.exit.as_ref().map(|e| e.time_str()),
                        }));
                    }
                    let payload = json!({ "success": true, "motoristas": motoristas });
                    println!("{}", to_pretty(&payload)?);
                } else {
                    let mut table = Table::new(vec![
                        "Motorista",
                        "Veículo",
                        "Mercado",
                        "Status",
                        "Entrada",
                        "Saída",
                    ]);
                    for p in &profiles {
                        let pair = ClockLogic::find_pair(&mut pool, p.driver.id, day)?;
                        table.add_row(vec![
                            p.driver.nome.clone(),
                            p.vehicle_descriptor(),
                            p.market_name().to_string(),
                            pair.status().label().to_string(),
                            pair.entry
                                .as_ref()
                                .map(|e| e.time_str())
                                .unwrap_or_default(),
                            pair.exit.as_ref().map(|e| e.time_str()).unwrap_or_default(),
                        ]);
                    }
                    println!("Status — {}", day.format("%d/%m/%Y"));
                    print!("{}", table.render(&cfg.separator_char));
                }
            }
        }
    }
    Ok(())
}

fn to_pretty(v: &serde_json::Value) -> AppResult<String> {
    serde_json::to_string_pretty(v)
        .map_err(|e| AppError::Other(format!("JSON serialization error: {e}")))
}
