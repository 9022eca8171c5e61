//! Acceso directo por SQL a `Gestao_documentos`
//!
//! Mismas operaciones que el cliente REST, contra la base Postgres que hay
//! detrás. Las columnas van entre comillas porque están en mayúsculas.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgRow};
use sqlx::Row;

use super::{RecordStore, StoreError};
use crate::models::document::{DocumentRecord, DocumentStatus, TABLE_NAME};
use crate::utils::validation::{parse_date, DATE_FORMAT};

const COLUMNS: &str = r#""BP_MOTORISTA", "NOME_MOTORISTA", "NUMERO_AGREGADO", "PLACA", "OPERACAO", "DATA_VENCIMENTO", "STATUS""#;

/// La fecha se lee como texto ISO: la columna puede ser `date` o `text`
const SELECT_COLUMNS: &str = r#""BP_MOTORISTA", "NOME_MOTORISTA", "NUMERO_AGREGADO", "PLACA", "OPERACAO", "DATA_VENCIMENTO"::text AS "DATA_VENCIMENTO", "STATUS""#;

pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn record_from_row(row: &PgRow) -> Result<DocumentRecord, StoreError> {
        let status: String = row.try_get("STATUS")?;
        let status = status.parse::<DocumentStatus>().map_err(StoreError::Decode)?;
        let data_vencimento: String = row.try_get("DATA_VENCIMENTO")?;
        let data_vencimento = decode_date(&data_vencimento)?;

        Ok(DocumentRecord {
            bp_motorista: row.try_get("BP_MOTORISTA")?,
            nome_motorista: row.try_get("NOME_MOTORISTA")?,
            numero_agregado: row.try_get("NUMERO_AGREGADO")?,
            placa: row.try_get("PLACA")?,
            operacao: row.try_get("OPERACAO")?,
            data_vencimento,
            status,
        })
    }
}

fn decode_date(value: &str) -> Result<chrono::NaiveDate, StoreError> {
    parse_date(value)
        .map_err(|_| StoreError::Decode(format!("DATA_VENCIMENTO inválida: '{}'", value)))
}

/// Texto ISO para escribir; `$6::date` sirve tanto para columna `date` como `text`
fn encode_date(record: &DocumentRecord) -> String {
    record.data_vencimento.format(DATE_FORMAT).to_string()
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn list_all(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        let sql = format!(r#"SELECT {} FROM "{}""#, SELECT_COLUMNS, TABLE_NAME);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        log::info!("📋 Loaded {} rows from {}", rows.len(), TABLE_NAME);
        rows.iter().map(Self::record_from_row).collect()
    }

    async fn exists(&self, bp: &str) -> Result<bool, StoreError> {
        let sql = format!(
            r#"SELECT EXISTS(SELECT 1 FROM "{}" WHERE "BP_MOTORISTA" = $1)"#,
            TABLE_NAME
        );
        let result: (bool,) = sqlx::query_as(&sql).bind(bp).fetch_one(&self.pool).await?;
        Ok(result.0)
    }

    async fn find_by_key(&self, bp: &str) -> Result<Option<DocumentRecord>, StoreError> {
        let sql = format!(
            r#"SELECT {} FROM "{}" WHERE "BP_MOTORISTA" = $1 LIMIT 1"#,
            SELECT_COLUMNS, TABLE_NAME
        );
        let row = sqlx::query(&sql).bind(bp).fetch_optional(&self.pool).await?;
        row.as_ref().map(Self::record_from_row).transpose()
    }

    async fn insert(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        log::info!("➕ Inserting BP_MOTORISTA = '{}'", record.bp_motorista);
        let sql = format!(
            r#"INSERT INTO "{}" ({}) VALUES ($1, $2, $3, $4, $5, $6::date, $7)"#,
            TABLE_NAME, COLUMNS
        );
        sqlx::query(&sql)
            .bind(&record.bp_motorista)
            .bind(&record.nome_motorista)
            .bind(&record.numero_agregado)
            .bind(&record.placa)
            .bind(&record.operacao)
            .bind(encode_date(record))
            .bind(record.status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn update(&self, old_key: &str, record: &DocumentRecord) -> Result<(), StoreError> {
        log::info!(
            "✏️ Updating BP_MOTORISTA = '{}' (new key '{}')",
            old_key,
            record.bp_motorista
        );
        let sql = format!(
            r#"
            UPDATE "{}" SET
                "BP_MOTORISTA" = $1,
                "NOME_MOTORISTA" = $2,
                "NUMERO_AGREGADO" = $3,
                "PLACA" = $4,
                "OPERACAO" = $5,
                "DATA_VENCIMENTO" = $6::date,
                "STATUS" = $7
            WHERE "BP_MOTORISTA" = $8
            "#,
            TABLE_NAME
        );
        sqlx::query(&sql)
            .bind(&record.bp_motorista)
            .bind(&record.nome_motorista)
            .bind(&record.numero_agregado)
            .bind(&record.placa)
            .bind(&record.operacao)
            .bind(encode_date(record))
            .bind(record.status.as_str())
            .bind(old_key)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        log::info!("🗑️ Deleting BP_MOTORISTA = '{}'", key);
        let sql = format!(r#"DELETE FROM "{}" WHERE "BP_MOTORISTA" = $1"#, TABLE_NAME);
        sqlx::query(&sql).bind(key).execute(&self.pool).await?;
        Ok(())
    }
}
