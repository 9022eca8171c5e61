//! Cliente REST (PostgREST / Supabase) para `Gestao_documentos`

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use std::time::Duration;

use super::{RecordStore, StoreError};
use crate::models::document::{DocumentRecord, KEY_COLUMN, TABLE_NAME};

pub struct SupabaseRecordStore {
    client: Client,
    base_url: String,
    api_key: String,
}

impl SupabaseRecordStore {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("GestaoDocumentos/1.0")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, TABLE_NAME)
    }

    /// URL filtrada por clave: `?BP_MOTORISTA=eq.<bp>`
    fn keyed_url(&self, bp: &str, select: Option<&str>) -> String {
        let mut url = format!(
            "{}?{}=eq.{}",
            self.table_url(),
            KEY_COLUMN,
            urlencoding::encode(bp)
        );
        if let Some(columns) = select {
            url.push_str("&select=");
            url.push_str(columns);
        }
        url
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        log::debug!("📡 Record store response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::error!("❌ Record store rejected request with status {}: {}", status, body);
            return Err(StoreError::Remote {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    async fn fetch_rows<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<Vec<T>, StoreError> {
        let response = self.send(self.request(Method::GET, url)).await?;
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| StoreError::Decode(format!("Failed to parse rows from {}: {}", TABLE_NAME, e)))
    }
}

#[async_trait]
impl RecordStore for SupabaseRecordStore {
    async fn list_all(&self) -> Result<Vec<DocumentRecord>, StoreError> {
        let url = format!("{}?select=*", self.table_url());
        let rows: Vec<DocumentRecord> = self.fetch_rows(&url).await?;
        log::info!("📋 Loaded {} rows from {}", rows.len(), TABLE_NAME);
        Ok(rows)
    }

    async fn exists(&self, bp: &str) -> Result<bool, StoreError> {
        let url = self.keyed_url(bp, Some(KEY_COLUMN));
        let rows: Vec<serde_json::Value> = self.fetch_rows(&url).await?;
        Ok(!rows.is_empty())
    }

    async fn find_by_key(&self, bp: &str) -> Result<Option<DocumentRecord>, StoreError> {
        let url = self.keyed_url(bp, Some("*"));
        let rows: Vec<DocumentRecord> = self.fetch_rows(&url).await?;
        Ok(rows.into_iter().next())
    }

    async fn insert(&self, record: &DocumentRecord) -> Result<(), StoreError> {
        log::info!("➕ Inserting {} = '{}'", KEY_COLUMN, record.bp_motorista);
        let request = self
            .request(Method::POST, &self.table_url())
            .header("Prefer", "return=minimal")
            .json(record);
        self.send(request).await?;
        Ok(())
    }

    async fn update(&self, old_key: &str, record: &DocumentRecord) -> Result<(), StoreError> {
        log::info!(
            "✏️ Updating {} = '{}' (new key '{}')",
            KEY_COLUMN,
            old_key,
            record.bp_motorista
        );
        let request = self
            .request(Method::PATCH, &self.keyed_url(old_key, None))
            .header("Prefer", "return=minimal")
            .json(record);
        self.send(request).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), StoreError> {
        log::info!("🗑️ Deleting {} = '{}'", KEY_COLUMN, key);
        self.send(self.request(Method::DELETE, &self.keyed_url(key, None)))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::document::DocumentStatus;
    use axum::{
        extract::State,
        http::{HeaderMap, Method as HttpMethod, StatusCode, Uri},
        Router,
    };
    use std::sync::{Arc, Mutex};

    /// Petición tal como la vio el servidor falso
    #[derive(Debug, Clone)]
    struct Captured {
        method: String,
        uri: String,
        apikey: Option<String>,
        authorization: Option<String>,
        prefer: Option<String>,
        body: String,
    }

    #[derive(Clone)]
    struct FakeRest {
        captured: Arc<Mutex<Vec<Captured>>>,
        status: StatusCode,
        reply: &'static str,
    }

    async fn capture(
        State(fake): State<FakeRest>,
        method: HttpMethod,
        uri: Uri,
        headers: HeaderMap,
        body: String,
    ) -> (StatusCode, String) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        fake.captured.lock().unwrap().push(Captured {
            method: method.to_string(),
            uri: uri.to_string(),
            apikey: header("apikey"),
            authorization: header("authorization"),
            prefer: header("prefer"),
            body,
        });
        (fake.status, fake.reply.to_string())
    }

    /// Levanta un PostgREST falso en 127.0.0.1:0 que responde siempre lo mismo
    async fn fake_rest(
        status: StatusCode,
        reply: &'static str,
    ) -> (SupabaseRecordStore, Arc<Mutex<Vec<Captured>>>) {
        let captured = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new().fallback(capture).with_state(FakeRest {
            captured: captured.clone(),
            status,
            reply,
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let store =
            SupabaseRecordStore::new(&format!("http://{}", addr), "anon", Duration::from_secs(5)).unwrap();
        (store, captured)
    }

    fn record(bp: &str) -> DocumentRecord {
        DocumentRecord {
            bp_motorista: bp.to_string(),
            nome_motorista: "João".to_string(),
            numero_agregado: "10".to_string(),
            placa: "ABC1D23".to_string(),
            operacao: "Coleta".to_string(),
            data_vencimento: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            status: DocumentStatus::Concluido,
        }
    }

    fn store() -> SupabaseRecordStore {
        SupabaseRecordStore::new("https://example.supabase.co/", "anon", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_table_url_strips_trailing_slash() {
        assert_eq!(
            store().table_url(),
            "https://example.supabase.co/rest/v1/Gestao_documentos"
        );
    }

    #[test]
    fn test_keyed_url_encodes_key() {
        let url = store().keyed_url("55 & 1", Some("*"));
        assert_eq!(
            url,
            "https://example.supabase.co/rest/v1/Gestao_documentos?BP_MOTORISTA=eq.55%20%26%201&select=*"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let store = SupabaseRecordStore::new("http://127.0.0.1:9", "anon", Duration::from_secs(2)).unwrap();
        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Transport(_)));
    }

    #[tokio::test]
    async fn test_update_patches_old_key_with_new_row() {
        let (store, captured) = fake_rest(StatusCode::NO_CONTENT, "").await;

        store.update("100", &record("200")).await.unwrap();

        let calls = captured.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.method, "PATCH");
        assert_eq!(call.uri, "/rest/v1/Gestao_documentos?BP_MOTORISTA=eq.100");
        assert_eq!(call.prefer.as_deref(), Some("return=minimal"));

        let body: serde_json::Value = serde_json::from_str(&call.body).unwrap();
        assert_eq!(body["BP_MOTORISTA"], "200");
        assert_eq!(body["DATA_VENCIMENTO"], "2025-01-01");
        assert_eq!(body["STATUS"], "CONCLUIDO");
    }

    #[tokio::test]
    async fn test_delete_filters_on_key_and_sends_credentials() {
        let (store, captured) = fake_rest(StatusCode::NO_CONTENT, "").await;

        store.delete("55 & 1").await.unwrap();

        let calls = captured.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.method, "DELETE");
        assert_eq!(call.uri, "/rest/v1/Gestao_documentos?BP_MOTORISTA=eq.55%20%26%201");
        assert_eq!(call.apikey.as_deref(), Some("anon"));
        assert_eq!(call.authorization.as_deref(), Some("Bearer anon"));
    }

    #[tokio::test]
    async fn test_insert_posts_to_table() {
        let (store, captured) = fake_rest(StatusCode::CREATED, "").await;

        store.insert(&record("55")).await.unwrap();

        let calls = captured.lock().unwrap().clone();
        assert_eq!(calls[0].method, "POST");
        assert_eq!(calls[0].uri, "/rest/v1/Gestao_documentos");
        assert_eq!(calls[0].prefer.as_deref(), Some("return=minimal"));
        assert_eq!(calls[0].apikey.as_deref(), Some("anon"));
    }

    #[tokio::test]
    async fn test_non_success_status_is_remote_error() {
        let (store, _) = fake_rest(StatusCode::CONFLICT, r#"{"code":"23505"}"#).await;

        let err = store.insert(&record("55")).await.unwrap_err();
        match err {
            StoreError::Remote { status, body } => {
                assert_eq!(status, 409);
                assert_eq!(body, r#"{"code":"23505"}"#);
            }
            other => panic!("expected Remote, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_rows_are_decode_error() {
        let (store, captured) = fake_rest(StatusCode::OK, "not json").await;

        let err = store.list_all().await.unwrap_err();
        assert!(matches!(err, StoreError::Decode(_)));
        assert_eq!(
            captured.lock().unwrap()[0].uri,
            "/rest/v1/Gestao_documentos?select=*"
        );
    }

    #[tokio::test]
    async fn test_find_by_key_reads_first_row() {
        let row = r#"[{"BP_MOTORISTA":"100","NOME_MOTORISTA":"João","NUMERO_AGREGADO":"10","PLACA":"ABC1D23","OPERACAO":"Coleta","DATA_VENCIMENTO":"2025-01-01","STATUS":"CONCLUIDO"}]"#;
        let (store, captured) = fake_rest(StatusCode::OK, row).await;

        let found = store.find_by_key("100").await.unwrap();
        assert_eq!(found, Some(record("100")));
        assert_eq!(
            captured.lock().unwrap()[0].uri,
            "/rest/v1/Gestao_documentos?BP_MOTORISTA=eq.100&select=*"
        );
    }
}
