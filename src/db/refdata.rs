//! Lookups and plain add/list persistence for drivers, vehicles and markets.

use crate::errors::{AppError, AppResult};
use crate::models::refdata::{Driver, DriverProfile, Market, Vehicle};
use chrono::Local;
use rusqlite::{Connection, OptionalExtension, Result, Row, params};
use std::collections::HashMap;

fn map_market(row: &Row) -> Result<Market> {
    Ok(Market {
        id: row.get("id")?,
        nome: row.get("nome")?,
        endereco: row.get("endereco")?,
        telefone: row.get("telefone")?,
        ativo: row.get::<_, i64>("ativo")? == 1,
        created_at: row.get("created_at")?,
    })
}

fn map_vehicle(row: &Row) -> Result<Vehicle> {
    Ok(Vehicle {
        id: row.get("id")?,
        placa: row.get("placa")?,
        modelo: row.get("modelo")?,
        cor: row.get("cor")?,
        ativo: row.get::<_, i64>("ativo")? == 1,
        created_at: row.get("created_at")?,
    })
}

fn map_driver(row: &Row) -> Result<Driver> {
    Ok(Driver {
        id: row.get("id")?,
        nome: row.get("nome")?,
        cpf: row.get("cpf")?,
        telefone: row.get("telefone")?,
        valor_dia: row.get("valor_dia")?,
        veiculo_id: row.get("veiculo_id")?,
        mercado_id: row.get("mercado_id")?,
        ativo: row.get::<_, i64>("ativo")? == 1,
        created_at: row.get("created_at")?,
    })
}

pub fn insert_market(
    conn: &Connection,
    nome: &str,
    endereco: Option<&str>,
    telefone: Option<&str>,
) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO mercados (nome, endereco, telefone, ativo, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![nome, endereco, telefone, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_vehicle(conn: &Connection, placa: &str, modelo: &str, cor: &str) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO veiculos (placa, modelo, cor, ativo, created_at)
         VALUES (?1, ?2, ?3, 1, ?4)",
        params![placa, modelo, cor, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

#[allow(clippy::too_many_arguments)]
pub fn insert_driver(
    conn: &Connection,
    nome: &str,
    cpf: &str,
    telefone: &str,
    valor_dia: f64,
    veiculo_id: i64,
    mercado_id: i64,
) -> AppResult<i64> {
    if valor_dia < 0.0 {
        return Err(AppError::Validation(format!(
            "Daily pay rate must be non-negative, got {valor_dia}"
        )));
    }
    // FK targets must exist and give a friendly error when they do not.
    get_vehicle(conn, veiculo_id)?;
    get_market(conn, mercado_id)?;

    conn.execute(
        "INSERT INTO motoristas (nome, cpf, telefone, valor_dia, veiculo_id, mercado_id, ativo, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7)",
        params![nome, cpf, telefone, valor_dia, veiculo_id, mercado_id, Local::now().to_rfc3339()],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn list_markets(conn: &Connection) -> AppResult<Vec<Market>> {
    let mut stmt = conn.prepare("SELECT * FROM mercados ORDER BY nome ASC")?;
    let rows = stmt.query_map([], map_market)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_vehicles(conn: &Connection) -> AppResult<Vec<Vehicle>> {
    let mut stmt = conn.prepare("SELECT * FROM veiculos ORDER BY placa ASC")?;
    let rows = stmt.query_map([], map_vehicle)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn list_drivers(conn: &Connection) -> AppResult<Vec<Driver>> {
    let mut stmt = conn.prepare("SELECT * FROM motoristas ORDER BY nome ASC")?;
    let rows = stmt.query_map([], map_driver)?;
    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_vehicle(conn: &Connection, id: i64) -> AppResult<Vehicle> {
    let mut stmt = conn.prepare_cached("SELECT * FROM veiculos WHERE id = ?1")?;
    stmt.query_row([id], map_vehicle)
        .optional()?
        .ok_or_else(|| AppError::VehicleNotFound(id.to_string()))
}

pub fn get_market(conn: &Connection, id: i64) -> AppResult<Market> {
    let mut stmt = conn.prepare_cached("SELECT * FROM mercados WHERE id = ?1")?;
    stmt.query_row([id], map_market)
        .optional()?
        .ok_or_else(|| AppError::MarketNotFound(id.to_string()))
}

/// Resolve a driver by numeric id or CPF.
pub fn find_driver(conn: &Connection, key: &str) -> AppResult<Driver> {
    let found = if let Ok(id) = key.parse::<i64>() {
        let mut stmt = conn.prepare_cached("SELECT * FROM motoristas WHERE id = ?1")?;
        stmt.query_row([id], map_driver).optional()?
    } else {
        let mut stmt = conn.prepare_cached("SELECT * FROM motoristas WHERE cpf = ?1")?;
        stmt.query_row([key], map_driver).optional()?
    };

    found.ok_or_else(|| AppError::DriverNotFound(key.to_string()))
}

/// Driver joined with vehicle and market.
pub fn load_profile(conn: &Connection, driver: Driver) -> AppResult<DriverProfile> {
    let vehicle = get_vehicle(conn, driver.veiculo_id)?;
    let market = get_market(conn, driver.mercado_id)?;
    Ok(DriverProfile {
        driver,
        vehicle,
        market,
    })
}

/// All active drivers with their vehicle/market attributes, keyed by driver
/// id. Feeds the status table and the report builder.
pub fn load_active_profiles(conn: &Connection) -> AppResult<HashMap<i64, DriverProfile>> {
    let mut out = HashMap::new();
    for driver in list_drivers(conn)? {
        if !driver.ativo {
            continue;
        }
        let id = driver.id;
        out.insert(id, load_profile(conn, driver)?);
    }
    Ok(out)
}

/// Profiles for every driver present in the store, active or not: report
/// rows must still resolve drivers deactivated after their records were
/// taken.
pub fn load_all_profiles(conn: &Connection) -> AppResult<HashMap<i64, DriverProfile>> {
    let mut out = HashMap::new();
    for driver in list_drivers(conn)? {
        let id = driver.id;
        out.insert(id, load_profile(conn, driver)?);
    }
    Ok(out)
}
