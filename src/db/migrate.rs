//! Idempotent schema migrations. Every table is created with the modern
//! schema; older databases missing the registros uniqueness index get it
//! added on the next run.

use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Reference tables: mercados, veiculos, motoristas.
fn ensure_reference_tables(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS mercados (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            nome       TEXT NOT NULL,
            endereco   TEXT,
            telefone   TEXT,
            ativo      INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS veiculos (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            placa      TEXT NOT NULL UNIQUE,
            modelo     TEXT NOT NULL,
            cor        TEXT NOT NULL,
            ativo      INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS motoristas (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            nome       TEXT NOT NULL,
            cpf        TEXT NOT NULL UNIQUE,
            telefone   TEXT NOT NULL,
            valor_dia  REAL NOT NULL CHECK(valor_dia >= 0),
            veiculo_id INTEGER NOT NULL REFERENCES veiculos(id),
            mercado_id INTEGER NOT NULL REFERENCES mercados(id),
            ativo      INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Clock records. The UNIQUE(motorista_id, date, kind) index is the storage
/// enforcement of the one-entry/one-exit-per-day invariant: a concurrent
/// duplicate submission fails here even if it slipped past the pre-check.
fn ensure_registros_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS registros (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            motorista_id   INTEGER NOT NULL REFERENCES motoristas(id) ON DELETE CASCADE,
            kind           TEXT NOT NULL CHECK(kind IN ('entrada','saida')),
            date           TEXT NOT NULL,
            time           TEXT NOT NULL,
            odometer       INTEGER NOT NULL CHECK(odometer >= 0),
            fuel_pct       INTEGER NOT NULL CHECK(fuel_pct BETWEEN 0 AND 100),
            odometer_photo TEXT NOT NULL,
            fuel_photo     TEXT NOT NULL,
            note           TEXT,
            created_at     TEXT NOT NULL
        );

        CREATE UNIQUE INDEX IF NOT EXISTS idx_registros_unique_day
            ON registros(motorista_id, date, kind);
        CREATE INDEX IF NOT EXISTS idx_registros_date ON registros(date);
        "#,
    )?;
    Ok(())
}

/// Check if a table exists.
fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let mut stmt =
        conn.prepare("SELECT name FROM sqlite_master WHERE type='table' AND name=?1")?;
    let exists: Option<String> = stmt.query_row([name], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the registros uniqueness index exists (older databases predate it).
fn registros_has_unique_index(conn: &Connection) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='index' AND name='idx_registros_unique_day'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Run all pending migrations. Safe to call on every startup.
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;
    ensure_reference_tables(conn)?;
    ensure_registros_table(conn)?;

    if table_exists(conn, "registros")? && !registros_has_unique_index(conn)? {
        conn.execute_batch(
            "CREATE UNIQUE INDEX idx_registros_unique_day
                 ON registros(motorista_id, date, kind);",
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn migrations_are_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        run_pending_migrations(&conn).unwrap();
        run_pending_migrations(&conn).unwrap();
        assert!(table_exists(&conn, "registros").unwrap());
        assert!(table_exists(&conn, "motoristas").unwrap());
        assert!(registros_has_unique_index(&conn).unwrap());
    }
}
