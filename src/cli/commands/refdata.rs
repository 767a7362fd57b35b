use crate::cli::parser::{Commands, DriverCmd, MarketCmd, VehicleCmd};
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::refdata::{
    insert_driver, insert_market, insert_vehicle, list_drivers, list_markets, list_vehicles,
};
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::table::Table;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let pool = DbPool::new(&cfg.database)?;

    match cmd {
        Commands::Driver { action } => match action {
            DriverCmd::Add {
                nome,
                cpf,
                telefone,
                valor_dia,
                veiculo,
                mercado,
            } => {
                let id = insert_driver(
                    &pool.conn, nome, cpf, telefone, *valor_dia, *veiculo, *mercado,
                )?;
                success(format!("Driver '{nome}' registered with id {id}."));
            }
            DriverCmd::List => {
                let mut table = Table::new(vec![
                    "ID",
                    "Nome",
                    "CPF",
                    "Telefone",
                    "Valor Dia",
                    "Veículo",
                    "Mercado",
                    "Ativo",
                ]);
                for d in list_drivers(&pool.conn)? {
                    table.add_row(vec![
                        d.id.to_string(),
                        d.nome,
                        d.cpf,
                        d.telefone,
                        format!("{:.2}", d.valor_dia),
                        d.veiculo_id.to_string(),
                        d.mercado_id.to_string(),
                        if d.ativo { "sim" } else { "não" }.to_string(),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        },

        Commands::Vehicle { action } => match action {
            VehicleCmd::Add { placa, modelo, cor } => {
                let id = insert_vehicle(&pool.conn, placa, modelo, cor)?;
                success(format!("Vehicle '{placa}' registered with id {id}."));
            }
            VehicleCmd::List => {
                let mut table = Table::new(vec!["ID", "Placa", "Modelo", "Cor", "Ativo"]);
                for v in list_vehicles(&pool.conn)? {
                    table.add_row(vec![
                        v.id.to_string(),
                        v.placa,
                        v.modelo,
                        v.cor,
                        if v.ativo { "sim" } else { "não" }.to_string(),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        },

        Commands::Market { action } => match action {
            MarketCmd::Add {
                nome,
                endereco,
                telefone,
            } => {
                let id = insert_market(
                    &pool.conn,
                    nome,
                    endereco.as_deref(),
                    telefone.as_deref(),
                )?;
                success(format!("Market '{nome}' registered with id {id}."));
            }
            MarketCmd::List => {
                let mut table = Table::new(vec!["ID", "Nome", "Endereço", "Telefone", "Ativo"]);
                for m in list_markets(&pool.conn)? {
                    table.add_row(vec![
                        m.id.to_string(),
                        m.nome,
                        m.endereco.unwrap_or_default(),
                        m.telefone.unwrap_or_default(),
                        if m.ativo { "sim" } else { "não" }.to_string(),
                    ]);
                }
                print!("{}", table.render(&cfg.separator_char));
            }
        },

        _ => {}
    }

    Ok(())
}
