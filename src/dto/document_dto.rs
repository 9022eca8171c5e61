use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{DocumentRecord, DocumentStatus, Page};
use crate::utils::validation::{
    parse_date, validate_aggregate_number, validate_due_date, validate_new, validate_not_blank,
    validate_status, Violation,
};

// Formulario tal como llega de la página (todo texto)
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, PartialEq, Eq)]
#[serde(default)]
pub struct DocumentForm {
    #[validate(custom = "validate_not_blank")]
    pub bp_motorista: String,

    #[validate(custom = "validate_not_blank")]
    pub nome_motorista: String,

    #[validate(custom = "validate_aggregate_number")]
    pub numero_agregado: String,

    #[validate(custom = "validate_not_blank")]
    pub placa: String,

    #[validate(custom = "validate_not_blank")]
    pub operacao: String,

    #[validate(custom = "validate_due_date")]
    pub data_vencimento: String,

    #[validate(custom = "validate_status")]
    pub status: String,
}

impl DocumentForm {
    /// Convertir a registro tipado, o devolver las violaciones
    pub fn into_record(self) -> Result<DocumentRecord, Vec<Violation>> {
        let violations = validate_new(&self);
        if !violations.is_empty() {
            return Err(violations);
        }

        let data_vencimento =
            parse_date(&self.data_vencimento).map_err(|_| vec![Violation::InvalidDate])?;
        let status = self
            .status
            .parse::<DocumentStatus>()
            .map_err(|_| vec![Violation::InvalidStatus])?;

        Ok(DocumentRecord {
            bp_motorista: self.bp_motorista,
            nome_motorista: self.nome_motorista,
            numero_agregado: self.numero_agregado,
            placa: self.placa,
            operacao: self.operacao,
            data_vencimento,
            status,
        })
    }
}

impl From<&DocumentRecord> for DocumentForm {
    fn from(record: &DocumentRecord) -> Self {
        Self {
            bp_motorista: record.bp_motorista.clone(),
            nome_motorista: record.nome_motorista.clone(),
            numero_agregado: record.numero_agregado.clone(),
            placa: record.placa.clone(),
            operacao: record.operacao.clone(),
            data_vencimento: record.data_vencimento.format("%Y-%m-%d").to_string(),
            status: record.status.to_string(),
        }
    }
}

// Request de búsqueda por BP
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub bp_motorista: String,
}

// Request de navegación de la barra lateral
#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    pub page: Page,
}
