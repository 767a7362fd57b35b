use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum EventKind {
    Entry,
    Exit,
}

impl EventKind {
    /// Parse a CLI code ("entry"/"exit", Portuguese names accepted too).
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "entry" | "entrada" | "in" => Some(Self::Entry),
            "exit" | "saida" | "saída" | "out" => Some(Self::Exit),
            _ => None,
        }
    }

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            EventKind::Entry => "entrada",
            EventKind::Exit => "saida",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "entrada" => Some(EventKind::Entry),
            "saida" => Some(EventKind::Exit),
            _ => None,
        }
    }

    /// Human label used in tables and messages.
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Entry => "Entrada",
            EventKind::Exit => "Saída",
        }
    }

    pub fn is_entry(&self) -> bool {
        matches!(self, EventKind::Entry)
    }
}
