use serde::{Deserialize, Serialize};

/// Источник, из которого загружена коллекция заказов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    /// Внешний REST API заказов
    Remote,
    /// Встроенный набор образцов
    Sample,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::Remote => "remote",
            Origin::Sample => "sample",
        }
    }
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
