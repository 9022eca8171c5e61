//! Utilidades de validación
//!
//! Funciones puras, sin I/O. Los validadores personalizados se enganchan al
//! derive de `validator` en `DocumentForm`; `validate_new` traduce el
//! resultado a una lista ordenada de violaciones.

use chrono::NaiveDate;
use std::collections::HashMap;
use validator::{Validate, ValidationError};

use crate::dto::document_dto::DocumentForm;
use crate::models::DocumentStatus;

/// Formato de fecha aceptado
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Campos del formulario en el orden de la página
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    BpMotorista,
    NomeMotorista,
    NumeroAgregado,
    Placa,
    Operacao,
    DataVencimento,
    Status,
}

impl FormField {
    pub const ALL: [FormField; 7] = [
        FormField::BpMotorista,
        FormField::NomeMotorista,
        FormField::NumeroAgregado,
        FormField::Placa,
        FormField::Operacao,
        FormField::DataVencimento,
        FormField::Status,
    ];

    /// Nombre del campo en `DocumentForm`
    pub fn name(&self) -> &'static str {
        match self {
            FormField::BpMotorista => "bp_motorista",
            FormField::NomeMotorista => "nome_motorista",
            FormField::NumeroAgregado => "numero_agregado",
            FormField::Placa => "placa",
            FormField::Operacao => "operacao",
            FormField::DataVencimento => "data_vencimento",
            FormField::Status => "status",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FormField::BpMotorista => "BP do Motorista",
            FormField::NomeMotorista => "Nome do Motorista",
            FormField::NumeroAgregado => "Número do Agregado",
            FormField::Placa => "Placa",
            FormField::Operacao => "Operação",
            FormField::DataVencimento => "Data de Vencimento",
            FormField::Status => "Status",
        }
    }
}

/// Violación de una regla de campo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    Missing(FormField),
    NonNumericAggregate,
    InvalidStatus,
    InvalidDate,
}

impl Violation {
    /// Mensaje mostrado al usuario
    pub fn message(&self) -> String {
        match self {
            Violation::Missing(field) => format!("⚠️ O campo '{}' é obrigatório.", field.label()),
            Violation::NonNumericAggregate => {
                "⚠️ O número do agregado deve conter apenas números.".to_string()
            }
            Violation::InvalidStatus => "⚠️ Status inválido. Use CONCLUIDO ou VENCIDO.".to_string(),
            Violation::InvalidDate => {
                "⚠️ Data de vencimento inválida. Use o formato AAAA-MM-DD.".to_string()
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Violation::Missing(_))
    }
}

const CODE_REQUIRED: &str = "required";
const CODE_DIGITS: &str = "digits";
const CODE_STATUS: &str = "status";
const CODE_DATE: &str = "date";

fn required_error() -> ValidationError {
    ValidationError::new(CODE_REQUIRED)
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Campo obligatorio: vacío o sólo espacios cuenta como ausente
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(required_error());
    }
    Ok(())
}

/// Número del agregado: obligatorio y sólo dígitos ASCII
pub fn validate_aggregate_number(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if !value.chars().all(|c| c.is_ascii_digit()) {
        let mut error = ValidationError::new(CODE_DIGITS);
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Status: obligatorio y uno de los valores reconocidos
pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    if value.parse::<DocumentStatus>().is_err() {
        let mut error = ValidationError::new(CODE_STATUS);
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar y convertir string a fecha
pub fn parse_date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        let mut error = ValidationError::new(CODE_DATE);
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"YYYY-MM-DD".to_string());
        error
    })
}

/// Fecha de vencimiento: obligatoria y con formato válido
pub fn validate_due_date(value: &str) -> Result<(), ValidationError> {
    validate_not_blank(value)?;
    parse_date(value).map(|_| ())
}

fn codes<'a>(
    field_errors: &HashMap<&'static str, &'a Vec<ValidationError>>,
    field: FormField,
) -> Vec<&'a str> {
    field_errors
        .get(field.name())
        .map(|errs| errs.iter().map(|e| &*e.code).collect())
        .unwrap_or_default()
}

/// Comprobar todos los campos de un registro nuevo o editado.
///
/// La unicidad de la clave no se comprueba aquí. Orden del resultado:
/// primero los campos ausentes en orden de página, luego agregado, status
/// y fecha.
pub fn validate_new(form: &DocumentForm) -> Vec<Violation> {
    let errors = match form.validate() {
        Ok(()) => return Vec::new(),
        Err(errors) => errors,
    };
    let field_errors = errors.field_errors();
    let codes_for = |field: FormField| codes(&field_errors, field);

    let mut violations: Vec<Violation> = FormField::ALL
        .iter()
        .filter(|field| codes_for(**field).contains(&CODE_REQUIRED))
        .map(|field| Violation::Missing(*field))
        .collect();

    if codes_for(FormField::NumeroAgregado).contains(&CODE_DIGITS) {
        violations.push(Violation::NonNumericAggregate);
    }
    if codes_for(FormField::Status).contains(&CODE_STATUS) {
        violations.push(Violation::InvalidStatus);
    }
    if codes_for(FormField::DataVencimento).contains(&CODE_DATE) {
        violations.push(Violation::InvalidDate);
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> DocumentForm {
        DocumentForm {
            bp_motorista: "55".to_string(),
            nome_motorista: "João".to_string(),
            numero_agregado: "10".to_string(),
            placa: "ABC1D23".to_string(),
            operacao: "Coleta".to_string(),
            data_vencimento: "2025-01-01".to_string(),
            status: "CONCLUIDO".to_string(),
        }
    }

    #[test]
    fn test_valid_form_has_no_violations() {
        assert!(validate_new(&form()).is_empty());
    }

    #[test]
    fn test_each_empty_field_is_reported() {
        for field in FormField::ALL {
            let mut f = form();
            match field {
                FormField::BpMotorista => f.bp_motorista.clear(),
                FormField::NomeMotorista => f.nome_motorista.clear(),
                FormField::NumeroAgregado => f.numero_agregado.clear(),
                FormField::Placa => f.placa.clear(),
                FormField::Operacao => f.operacao.clear(),
                FormField::DataVencimento => f.data_vencimento.clear(),
                FormField::Status => f.status.clear(),
            }
            assert_eq!(validate_new(&f), vec![Violation::Missing(field)], "{:?}", field);
        }
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut f = form();
        f.placa = "   ".to_string();
        assert_eq!(validate_new(&f), vec![Violation::Missing(FormField::Placa)]);
    }

    #[test]
    fn test_aggregate_must_be_digits() {
        let mut f = form();
        f.numero_agregado = "12A3".to_string();
        assert_eq!(validate_new(&f), vec![Violation::NonNumericAggregate]);

        f.numero_agregado = "1234".to_string();
        assert!(validate_new(&f).is_empty());

        f.numero_agregado = "-12".to_string();
        assert_eq!(validate_new(&f), vec![Violation::NonNumericAggregate]);
    }

    #[test]
    fn test_status_and_date_rules() {
        let mut f = form();
        f.status = "PENDENTE".to_string();
        f.data_vencimento = "2025-02-30".to_string();
        assert_eq!(
            validate_new(&f),
            vec![Violation::InvalidStatus, Violation::InvalidDate]
        );
    }

    #[test]
    fn test_missing_fields_come_before_format_errors() {
        let mut f = form();
        f.numero_agregado = "abc".to_string();
        f.nome_motorista = String::new();
        assert_eq!(
            validate_new(&f),
            vec![
                Violation::Missing(FormField::NomeMotorista),
                Violation::NonNumericAggregate
            ]
        );
    }
}
