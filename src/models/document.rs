//! Modelo de DocumentRecord
//!
//! Este módulo contiene el registro de documento de motorista tal como vive
//! en la tabla `Gestao_documentos`. Los nombres serializados son exactamente
//! las columnas de la tabla (mayúsculas, snake case).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Nombre de la tabla remota
pub const TABLE_NAME: &str = "Gestao_documentos";

/// Columna de la clave de negocio
pub const KEY_COLUMN: &str = "BP_MOTORISTA";

/// Estado del documento
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DocumentStatus {
    #[serde(rename = "CONCLUIDO")]
    Concluido,
    #[serde(rename = "VENCIDO")]
    Vencido,
}

impl DocumentStatus {
    /// Opciones en el orden en que aparecen en la página
    pub const ALL: [DocumentStatus; 2] = [DocumentStatus::Concluido, DocumentStatus::Vencido];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentStatus::Concluido => "CONCLUIDO",
            DocumentStatus::Vencido => "VENCIDO",
        }
    }
}

impl fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CONCLUIDO" => Ok(DocumentStatus::Concluido),
            "VENCIDO" => Ok(DocumentStatus::Vencido),
            other => Err(format!("status desconhecido: '{}'", other)),
        }
    }
}

/// Registro completo de la tabla. Sólo existe como tupla completa.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DocumentRecord {
    pub bp_motorista: String,
    pub nome_motorista: String,
    pub numero_agregado: String,
    pub placa: String,
    pub operacao: String,
    /// Serializado como fecha ISO-8601 (`YYYY-MM-DD`)
    pub data_vencimento: NaiveDate,
    pub status: DocumentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_record_uses_table_column_names() {
        let record = DocumentRecord {
            bp_motorista: "55".to_string(),
            nome_motorista: "João".to_string(),
            numero_agregado: "10".to_string(),
            placa: "ABC1D23".to_string(),
            operacao: "Coleta".to_string(),
            data_vencimento: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: DocumentStatus::Concluido,
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "BP_MOTORISTA": "55",
                "NOME_MOTORISTA": "João",
                "NUMERO_AGREGADO": "10",
                "PLACA": "ABC1D23",
                "OPERACAO": "Coleta",
                "DATA_VENCIMENTO": "2025-01-01",
                "STATUS": "CONCLUIDO"
            })
        );
    }

    #[test]
    fn test_status_parsing_is_exact() {
        assert_eq!("VENCIDO".parse::<DocumentStatus>(), Ok(DocumentStatus::Vencido));
        assert!("vencido".parse::<DocumentStatus>().is_err());
        assert!("".parse::<DocumentStatus>().is_err());
    }
}
