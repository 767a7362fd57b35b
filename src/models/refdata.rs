//! Reference entities: drivers, vehicles and markets.
//! The clocking core treats these as read-only lookup records; the CLI
//! offers plain add/list management with an active flag.

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Market {
    pub id: i64,
    pub nome: String,
    pub endereco: Option<String>,
    pub telefone: Option<String>,
    pub ativo: bool,
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Vehicle {
    pub id: i64,
    pub placa: String,
    pub modelo: String,
    pub cor: String,
    pub ativo: bool,
    pub created_at: String,
}

impl Vehicle {
    /// Descriptor used in reports and status tables: "ABC1D23 - Uno (Branco)"
    pub fn descriptor(&self) -> String {
        format!("{} - {} ({})", self.placa, self.modelo, self.cor)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Driver {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub telefone: String,
    /// Daily pay rate in R$.
    pub valor_dia: f64,
    pub veiculo_id: i64,
    pub mercado_id: i64,
    pub ativo: bool,
    pub created_at: String,
}

/// Driver joined with their vehicle and market, as the report builder and
/// the status view consume it.
#[derive(Debug, Clone)]
pub struct DriverProfile {
    pub driver: Driver,
    pub vehicle: Vehicle,
    pub market: Market,
}

impl DriverProfile {
    pub fn vehicle_descriptor(&self) -> String {
        self.vehicle.descriptor()
    }

    pub fn market_name(&self) -> &str {
        &self.market.nome
    }
}
