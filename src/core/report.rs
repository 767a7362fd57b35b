//! Report row builder: projects daily pairs joined with driver, vehicle and
//! market attributes into the flat rows the export sinks consume.

use crate::models::daily_pair::DailyPair;
use crate::models::refdata::DriverProfile;
use std::collections::HashMap;

/// Column names, in export order.
pub const HEADERS: [&str; 10] = [
    "Motorista",
    "CPF",
    "Veículo",
    "Mercado",
    "Data",
    "Entrada",
    "Saída",
    "Horas Trabalhadas",
    "KM Rodados",
    "Valor Dia",
];

/// One export row. Metric columns stay blank unless the pair is complete.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub motorista: String,
    pub cpf: String,
    pub veiculo: String,
    pub mercado: String,
    pub data: String,
    pub entrada: String,
    pub saida: String,
    pub horas_trabalhadas: String,
    pub km_rodados: String,
    pub valor_dia: String,
}

impl ReportRow {
    pub fn cells(&self) -> [&str; 10] {
        [
            &self.motorista,
            &self.cpf,
            &self.veiculo,
            &self.mercado,
            &self.data,
            &self.entrada,
            &self.saida,
            &self.horas_trabalhadas,
            &self.km_rodados,
            &self.valor_dia,
        ]
    }
}

/// Lazily project pairs into rows. Input order is preserved (the store
/// query already sorts by driver then date); consumption is single-pass.
/// Pairs whose driver is missing from the lookup are skipped.
pub fn build_rows<'a, I>(
    pairs: I,
    profiles: &'a HashMap<i64, DriverProfile>,
) -> impl Iterator<Item = ReportRow> + 'a
where
    I: IntoIterator<Item = DailyPair> + 'a,
{
    pairs.into_iter().filter_map(|pair| {
        let profile = profiles.get(&pair.driver_id)?;
        Some(project(&pair, profile))
    })
}

fn project(pair: &DailyPair, profile: &DriverProfile) -> ReportRow {
    let complete = pair.is_complete();

    ReportRow {
        motorista: profile.driver.nome.clone(),
        cpf: profile.driver.cpf.clone(),
        veiculo: profile.vehicle_descriptor(),
        mercado: profile.market_name().to_string(),
        data: pair.date.format("%d/%m/%Y").to_string(),
        entrada: pair
            .entry
            .as_ref()
            .map(|e| e.time_str())
            .unwrap_or_default(),
        saida: pair.exit.as_ref().map(|e| e.time_str()).unwrap_or_default(),
        horas_trabalhadas: if complete {
            format!("{:.2}", pair.duration_hours())
        } else {
            String::new()
        },
        km_rodados: if complete {
            pair.km_driven().to_string()
        } else {
            String::new()
        },
        valor_dia: if complete {
            format!("{:.2}", profile.driver.valor_dia)
        } else {
            String::new()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::clock_event::ClockEvent;
    use crate::models::event_kind::EventKind;
    use crate::models::refdata::{Driver, Market, Vehicle};
    use chrono::{NaiveDate, NaiveTime};

    fn profile() -> DriverProfile {
        DriverProfile {
            driver: Driver {
                id: 1,
                nome: "João Silva".into(),
                cpf: "111.222.333-44".into(),
                telefone: "11 99999-0000".into(),
                valor_dia: 150.0,
                veiculo_id: 1,
                mercado_id: 1,
                ativo: true,
                created_at: String::new(),
            },
            vehicle: Vehicle {
                id: 1,
                placa: "ABC1D23".into(),
                modelo: "Uno".into(),
                cor: "Branco".into(),
                ativo: true,
                created_at: String::new(),
            },
            market: Market {
                id: 1,
                nome: "Mercado Sul".into(),
                endereco: None,
                telefone: None,
                ativo: true,
                created_at: String::new(),
            },
        }
    }

    fn ev(kind: EventKind, time: &str, odometer: i64) -> ClockEvent {
        ClockEvent {
            id: 0,
            driver_id: 1,
            kind,
            date: NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            time: NaiveTime::parse_from_str(time, "%H:%M").unwrap(),
            odometer,
            fuel_pct: 50,
            odometer_photo: String::new(),
            fuel_photo: String::new(),
            note: None,
            created_at: String::new(),
        }
    }

    #[test]
    fn complete_pair_fills_every_column() {
        let mut pair = DailyPair::new(1, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        pair.entry = Some(ev(EventKind::Entry, "08:00", 1000));
        pair.exit = Some(ev(EventKind::Exit, "17:30", 1120));

        let mut profiles = HashMap::new();
        profiles.insert(1, profile());

        let rows: Vec<_> = build_rows(vec![pair], &profiles).collect();
        assert_eq!(rows.len(), 1);

        let row = &rows[0];
        assert_eq!(row.motorista, "João Silva");
        assert_eq!(row.veiculo, "ABC1D23 - Uno (Branco)");
        assert_eq!(row.data, "01/09/2025");
        assert_eq!(row.entrada, "08:00");
        assert_eq!(row.saida, "17:30");
        assert_eq!(row.horas_trabalhadas, "9.50");
        assert_eq!(row.km_rodados, "120");
        assert_eq!(row.valor_dia, "150.00");
    }

    #[test]
    fn open_day_leaves_metric_columns_blank() {
        let mut pair = DailyPair::new(1, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        pair.entry = Some(ev(EventKind::Entry, "08:00", 1000));

        let mut profiles = HashMap::new();
        profiles.insert(1, profile());

        let rows: Vec<_> = build_rows(vec![pair], &profiles).collect();
        let row = &rows[0];
        assert_eq!(row.entrada, "08:00");
        assert_eq!(row.saida, "");
        assert_eq!(row.horas_trabalhadas, "");
        assert_eq!(row.km_rodados, "");
        assert_eq!(row.valor_dia, "");
    }

    #[test]
    fn unknown_driver_rows_are_skipped() {
        let pair = DailyPair::new(42, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        let profiles = HashMap::new();
        assert_eq!(build_rows(vec![pair], &profiles).count(), 0);
    }
}
