//! Configuración de variables de entorno
//!
//! Este módulo lee la configuración del servicio. Las credenciales del
//! almacén se inyectan por entorno (o `.env`); nada está fijado en código.

use std::env;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value '{value}'")]
    Invalid { name: &'static str, value: String },
}

/// Backend del cliente de la tabla
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// API REST de Supabase (PostgREST)
    Rest,
    /// Conexión SQL directa
    Postgres,
    /// Tabla en memoria, para desarrollo local
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rest" | "supabase" => Ok(StoreBackend::Rest),
            "postgres" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Qué hacer cuando dos sesiones editan la misma clave
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConcurrencyPolicy {
    /// La última escritura gana, sin detección
    #[default]
    LastWriteWins,
    /// Guardar/eliminar sólo si la fila sigue igual a la cargada
    RejectStale,
}

impl FromStr for ConcurrencyPolicy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "last_write_wins" => Ok(ConcurrencyPolicy::LastWriteWins),
            "reject_stale" => Ok(ConcurrencyPolicy::RejectStale),
            _ => Err(()),
        }
    }
}

/// Políticas de las páginas de edición
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditPolicy {
    /// Rechazar un cambio de clave si la nueva clave ya existe
    pub check_key_uniqueness: bool,
    pub concurrency: ConcurrencyPolicy,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub store_backend: StoreBackend,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub database_url: Option<String>,
    pub request_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub session_ttl: Duration,
    pub edit_policy: EditPolicy,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            port: 3000,
            host: "0.0.0.0".to_string(),
            store_backend: StoreBackend::Memory,
            supabase_url: None,
            supabase_key: None,
            database_url: None,
            request_timeout: Duration::from_secs(30),
            cors_origins: Vec::new(),
            session_ttl: Duration::from_secs(120 * 60),
            edit_policy: EditPolicy::default(),
        }
    }
}

fn parse_var<T: FromStr>(name: &'static str, value: Option<String>) -> Result<Option<T>, ConfigError> {
    match value {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}

impl EnvironmentConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Construir la configuración a partir de cualquier fuente clave/valor
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let store_backend = parse_var::<StoreBackend>("STORE_BACKEND", get("STORE_BACKEND"))?
            .unwrap_or(StoreBackend::Rest);
        let supabase_url = get("SUPABASE_URL");
        let supabase_key = get("SUPABASE_KEY");
        let database_url = get("DATABASE_URL");

        match store_backend {
            StoreBackend::Rest => {
                if supabase_url.is_none() {
                    return Err(ConfigError::Missing("SUPABASE_URL"));
                }
                if supabase_key.is_none() {
                    return Err(ConfigError::Missing("SUPABASE_KEY"));
                }
            }
            StoreBackend::Postgres => {
                if database_url.is_none() {
                    return Err(ConfigError::Missing("DATABASE_URL"));
                }
            }
            StoreBackend::Memory => {}
        }

        let timeout_secs = parse_var::<u64>("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"))?;
        let session_ttl = match get("SESSION_TTL_MINUTES") {
            None => defaults.session_ttl,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .and_then(|minutes| minutes.checked_mul(60))
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid {
                    name: "SESSION_TTL_MINUTES",
                    value: raw,
                })?,
        };

        Ok(Self {
            environment: get("ENVIRONMENT").unwrap_or(defaults.environment),
            port: parse_var::<u16>("PORT", get("PORT"))?.unwrap_or(defaults.port),
            host: get("HOST").unwrap_or(defaults.host),
            store_backend,
            supabase_url,
            supabase_key,
            database_url,
            request_timeout: timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.request_timeout),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            session_ttl,
            edit_policy: EditPolicy {
                check_key_uniqueness: parse_var::<bool>(
                    "EDIT_CHECK_KEY_UNIQUENESS",
                    get("EDIT_CHECK_KEY_UNIQUENESS"),
                )?
                .unwrap_or(false),
                concurrency: parse_var::<ConcurrencyPolicy>(
                    "CONCURRENCY_POLICY",
                    get("CONCURRENCY_POLICY"),
                )?
                .unwrap_or_default(),
            },
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<EnvironmentConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnvironmentConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn test_rest_backend_requires_credentials() {
        assert_eq!(config(&[]).unwrap_err(), ConfigError::Missing("SUPABASE_URL"));
        assert_eq!(
            config(&[("SUPABASE_URL", "https://x.supabase.co")]).unwrap_err(),
            ConfigError::Missing("SUPABASE_KEY")
        );
    }

    #[test]
    fn test_memory_backend_with_defaults() {
        let cfg = config(&[("STORE_BACKEND", "memory")]).unwrap();
        assert_eq!(cfg.store_backend, StoreBackend::Memory);
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.request_timeout, Duration::from_secs(30));
        assert_eq!(cfg.edit_policy, EditPolicy::default());
        assert!(cfg.cors_origins.is_empty());
    }

    #[test]
    fn test_policies_and_numbers_are_parsed() {
        let cfg = config(&[
            ("STORE_BACKEND", "postgres"),
            ("DATABASE_URL", "postgres://localhost/docs"),
            ("PORT", "8080"),
            ("SESSION_TTL_MINUTES", "5"),
            ("EDIT_CHECK_KEY_UNIQUENESS", "true"),
            ("CONCURRENCY_POLICY", "reject_stale"),
            ("CORS_ORIGINS", "http://a.test, http://b.test"),
        ])
        .unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.session_ttl, Duration::from_secs(300));
        assert!(cfg.edit_policy.check_key_uniqueness);
        assert_eq!(cfg.edit_policy.concurrency, ConcurrencyPolicy::RejectStale);
        assert_eq!(cfg.cors_origins, vec!["http://a.test", "http://b.test"]);
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = config(&[("STORE_BACKEND", "memory"), ("PORT", "abc")]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid { name: "PORT", value: "abc".to_string() }
        );
    }

    #[test]
    fn test_session_ttl_overflow_is_an_error() {
        let err = config(&[
            ("STORE_BACKEND", "memory"),
            ("SESSION_TTL_MINUTES", "400000000000000000"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                name: "SESSION_TTL_MINUTES",
                value: "400000000000000000".to_string()
            }
        );
    }
}
