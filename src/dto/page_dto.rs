//! Vista renderizada de una página
//!
//! Cada acción del usuario devuelve un `PageView` completo: barra lateral,
//! campos del formulario, tabla opcional y los mensajes de la acción.

use serde::Serialize;
use uuid::Uuid;

use crate::dto::document_dto::DocumentForm;
use crate::models::{DocumentRecord, DocumentStatus, NavigationState, Page};
use crate::utils::validation::FormField;

pub const APP_TITLE: &str = "Gestão de Documentos";
pub const APP_SUBTITLE: &str = "Adicione, edite ou pesquise seus documentos!";

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct UiMessage {
    pub level: MessageLevel,
    pub text: String,
}

impl UiMessage {
    pub fn success(text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Success, text: text.into() }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Warning, text: text.into() }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self { level: MessageLevel::Error, text: text.into() }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    Text,
    Date,
    Choice,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldView {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub value: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<&'static str>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ActionView {
    pub name: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SidebarView {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub actions: Vec<ActionView>,
}

impl Default for SidebarView {
    fn default() -> Self {
        Self {
            title: APP_TITLE,
            subtitle: APP_SUBTITLE,
            actions: vec![
                ActionView { name: "add", label: "➕ Adicionar" },
                ActionView { name: "edit", label: "✏️ Editar / Excluir" },
            ],
        }
    }
}

/// Tabla completa; vacía se muestra como mensaje informativo
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TableView {
    Empty { info: String },
    Rows { records: Vec<DocumentRecord> },
}

impl TableView {
    pub fn from_records(records: Vec<DocumentRecord>) -> Self {
        if records.is_empty() {
            TableView::Empty { info: "Nenhum registro encontrado no banco.".to_string() }
        } else {
            TableView::Rows { records }
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PageView {
    pub session_id: Uuid,
    pub sidebar: SidebarView,
    pub page: Page,
    pub heading: &'static str,
    pub fields: Vec<FieldView>,
    pub actions: Vec<ActionView>,
    pub show_table: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table: Option<TableView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_record: Option<DocumentRecord>,
    pub messages: Vec<UiMessage>,
}

/// Campos del formulario con sus valores iniciales
pub fn form_fields(values: &DocumentForm) -> Vec<FieldView> {
    FormField::ALL
        .iter()
        .map(|field| {
            let (kind, value, options) = match field {
                FormField::BpMotorista => (FieldKind::Text, &values.bp_motorista, vec![]),
                FormField::NomeMotorista => (FieldKind::Text, &values.nome_motorista, vec![]),
                FormField::NumeroAgregado => (FieldKind::Text, &values.numero_agregado, vec![]),
                FormField::Placa => (FieldKind::Text, &values.placa, vec![]),
                FormField::Operacao => (FieldKind::Text, &values.operacao, vec![]),
                FormField::DataVencimento => (FieldKind::Date, &values.data_vencimento, vec![]),
                FormField::Status => (
                    FieldKind::Choice,
                    &values.status,
                    DocumentStatus::ALL.iter().map(|s| s.as_str()).collect(),
                ),
            };
            FieldView {
                name: field.name(),
                label: field.label(),
                kind,
                value: value.clone(),
                options,
            }
        })
        .collect()
}

impl PageView {
    /// Vista base del estado actual, sin tabla ni mensajes
    pub fn base(session_id: Uuid, state: &NavigationState) -> Self {
        let (heading, fields, actions) = match state.page {
            Page::Add => (
                "Cadastrar novo motorista",
                form_fields(&DocumentForm {
                    status: DocumentStatus::Concluido.to_string(),
                    ..Default::default()
                }),
                vec![ActionView { name: "add", label: "Salvar" }],
            ),
            Page::Edit => {
                let mut actions = vec![
                    ActionView { name: "search", label: "Buscar" },
                    ActionView { name: "table/show", label: "📋 Exibir todos os cadastros" },
                    ActionView { name: "table/hide", label: "❌ Ocultar lista" },
                ];
                let fields = match &state.selected_record {
                    Some(record) => {
                        actions.push(ActionView { name: "save", label: "Salvar alterações" });
                        actions.push(ActionView { name: "delete", label: "Excluir registro" });
                        form_fields(&DocumentForm::from(record))
                    }
                    None => Vec::new(),
                };
                ("🔍 Buscar motorista por BP", fields, actions)
            }
        };

        Self {
            session_id,
            sidebar: SidebarView::default(),
            page: state.page,
            heading,
            fields,
            actions,
            show_table: state.show_table,
            table: None,
            selected_record: state.selected_record.clone(),
            messages: Vec::new(),
        }
    }
}
