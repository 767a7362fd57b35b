use serde::Serialize;

/// Where a driver stands in their working day, derived purely from which
/// sides of the daily pair are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    NotStarted,
    Working,
    Finished,
}

impl DayStatus {
    /// Stable machine-readable code, kept in Portuguese for consumers of
    /// the JSON status output.
    pub fn as_code(&self) -> &'static str {
        match self {
            DayStatus::NotStarted => "nao_iniciou",
            DayStatus::Working => "trabalhando",
            DayStatus::Finished => "finalizado",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DayStatus::NotStarted => "Não iniciou",
            DayStatus::Working => "Trabalhando",
            DayStatus::Finished => "Finalizado",
        }
    }
}
