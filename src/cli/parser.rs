use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Command-line interface definition for ponto
/// CLI application to track driver attendance with SQLite
#[derive(Parser)]
#[command(
    name = "ponto",
    version = env!("CARGO_PKG_VERSION"),
    about = "Driver time-and-attendance: photo-evidenced clock in/out, daily pairing and reports using SQLite",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the media directory where watermarked photos are stored
    #[arg(global = true, long = "media-dir")]
    pub media_dir: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,
    },

    /// Record a clock-in (entrada) for today with photo evidence
    Entry {
        /// Driver id or CPF
        driver: String,

        /// Odometer reading in km
        #[arg(long)]
        odometer: i64,

        /// Fuel level percentage (0-100)
        #[arg(long)]
        fuel: i64,

        /// Photo of the odometer
        #[arg(long = "odometer-photo", value_name = "FILE")]
        odometer_photo: PathBuf,

        /// Photo of the fuel gauge
        #[arg(long = "fuel-photo", value_name = "FILE")]
        fuel_photo: PathBuf,

        /// Optional free-text note
        #[arg(long)]
        note: Option<String>,
    },

    /// Record a clock-out (saída) for today with photo evidence
    Exit {
        /// Driver id or CPF
        driver: String,

        /// Odometer reading in km
        #[arg(long)]
        odometer: i64,

        /// Fuel level percentage (0-100)
        #[arg(long)]
        fuel: i64,

        /// Photo of the odometer
        #[arg(long = "odometer-photo", value_name = "FILE")]
        odometer_photo: PathBuf,

        /// Photo of the fuel gauge
        #[arg(long = "fuel-photo", value_name = "FILE")]
        fuel_photo: PathBuf,

        /// Optional free-text note
        #[arg(long)]
        note: Option<String>,
    },

    /// Day status (not started / working / finished) per driver
    Status {
        /// Driver id or CPF; omit for a table of all active drivers
        driver: Option<String>,

        /// Day to inspect (YYYY-MM-DD, default today)
        #[arg(long)]
        date: Option<String>,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List raw clock records for a date range
    List {
        /// Range start (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,

        /// Range end (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,

        /// Filter by driver id or CPF
        #[arg(long)]
        driver: Option<String>,

        /// Filter by kind: entry or exit
        #[arg(long)]
        kind: Option<String>,
    },

    /// Export the paired daily report (xlsx or csv)
    Export {
        /// Range start (YYYY-MM-DD, inclusive)
        #[arg(long)]
        from: String,

        /// Range end (YYYY-MM-DD, inclusive)
        #[arg(long)]
        to: String,

        /// Filter by driver id or CPF
        #[arg(long)]
        driver: Option<String>,

        /// Filter by vehicle id
        #[arg(long)]
        vehicle: Option<i64>,

        /// Export format: xlsx, csv
        #[arg(long, value_name = "FORMAT", default_value = "xlsx")]
        format: String,

        /// Output file path (absolute); default relatorio_ponto_<timestamp>
        #[arg(long, value_name = "FILE")]
        file: Option<String>,

        /// Overwrite output file without confirmation
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Manage drivers (motoristas)
    Driver {
        #[command(subcommand)]
        action: DriverCmd,
    },

    /// Manage vehicles (veículos)
    Vehicle {
        #[command(subcommand)]
        action: VehicleCmd,
    },

    /// Manage markets (mercados)
    Market {
        #[command(subcommand)]
        action: MarketCmd,
    },

    /// Print the internal operation log
    Log {
        /// Print rows from the internal `log` table
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}

#[derive(Subcommand)]
pub enum DriverCmd {
    /// Register a new driver
    Add {
        /// Full name
        nome: String,

        /// CPF document id (unique)
        #[arg(long)]
        cpf: String,

        /// Phone number
        #[arg(long)]
        telefone: String,

        /// Daily pay rate (R$)
        #[arg(long = "valor-dia")]
        valor_dia: f64,

        /// Assigned vehicle id
        #[arg(long)]
        veiculo: i64,

        /// Assigned market id
        #[arg(long)]
        mercado: i64,
    },
    /// List registered drivers
    List,
}

#[derive(Subcommand)]
pub enum VehicleCmd {
    /// Register a new vehicle
    Add {
        /// License plate (unique)
        placa: String,

        /// Model
        #[arg(long)]
        modelo: String,

        /// Color
        #[arg(long)]
        cor: String,
    },
    /// List registered vehicles
    List,
}

#[derive(Subcommand)]
pub enum MarketCmd {
    /// Register a new market
    Add {
        /// Market name
        nome: String,

        /// Address
        #[arg(long)]
        endereco: Option<String>,

        /// Phone number
        #[arg(long)]
        telefone: Option<String>,
    },
    /// List registered markets
    List,
}
