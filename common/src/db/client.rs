// Database client abstraction used by the repositories

use crate::errors::DatabaseError;
use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// One result row, keyed by column name (or alias)
pub type Record = serde_json::Map<String, Value>;

/// A positional statement parameter
///
/// Every variant carries its SQL type so that NULLs are bound with the
/// type PostgreSQL expects for the target column.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(Option<i32>),
    Text(Option<String>),
    Numeric(Option<Decimal>),
    Bool(Option<bool>),
}

impl From<i32> for SqlValue {
    fn from(value: i32) -> Self {
        SqlValue::Int(Some(value))
    }
}

impl From<Option<i32>> for SqlValue {
    fn from(value: Option<i32>) -> Self {
        SqlValue::Int(value)
    }
}

impl From<String> for SqlValue {
    fn from(value: String) -> Self {
        SqlValue::Text(Some(value))
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(Some(value.to_string()))
    }
}

impl From<Option<String>> for SqlValue {
    fn from(value: Option<String>) -> Self {
        SqlValue::Text(value)
    }
}

impl From<Decimal> for SqlValue {
    fn from(value: Decimal) -> Self {
        SqlValue::Numeric(Some(value))
    }
}

impl From<Option<Decimal>> for SqlValue {
    fn from(value: Option<Decimal>) -> Self {
        SqlValue::Numeric(value)
    }
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(Some(value))
    }
}

/// Parameterized-query capable database client
///
/// Implementations accept SQL text with `$1, $2, ...` placeholders and a
/// positional value list, and return the produced rows in order. Values
/// are never interpolated into the statement text.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DbClient: Send + Sync {
    /// Execute a statement and return every row it produced
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Record>, DatabaseError>;

    /// Check that the database answers
    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.execute("SELECT 1", &[])
            .await
            .map(|_| ())
            .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
    }
}

/// Map a record onto a typed value through its JSON representation
pub fn from_record<T: DeserializeOwned>(record: Record) -> Result<T, DatabaseError> {
    Ok(serde_json::from_value(Value::Object(record))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Sample {
        id: i32,
        company_handle: String,
    }

    #[test]
    fn test_sql_value_conversions_keep_type() {
        assert_eq!(SqlValue::from(5), SqlValue::Int(Some(5)));
        assert_eq!(SqlValue::from(None::<i32>), SqlValue::Int(None));
        assert_eq!(SqlValue::from("x"), SqlValue::Text(Some("x".to_string())));
        assert_eq!(SqlValue::from(None::<Decimal>), SqlValue::Numeric(None));
        assert_eq!(SqlValue::from(true), SqlValue::Bool(Some(true)));
    }

    #[test]
    fn test_from_record_uses_aliases() {
        let record = json!({"id": 3, "companyHandle": "c1"})
            .as_object()
            .cloned()
            .unwrap();
        let sample: Sample = from_record(record).unwrap();
        assert_eq!(
            sample,
            Sample {
                id: 3,
                company_handle: "c1".to_string()
            }
        );
    }

    #[test]
    fn test_from_record_reports_decode_error() {
        let record = json!({"id": "three"}).as_object().cloned().unwrap();
        let result: Result<Sample, _> = from_record(record);
        assert!(matches!(result, Err(DatabaseError::Decode(_))));
    }

    struct Unreachable;

    #[async_trait]
    impl DbClient for Unreachable {
        async fn execute(
            &self,
            _sql: &str,
            _params: &[SqlValue],
        ) -> Result<Vec<Record>, DatabaseError> {
            Err(DatabaseError::ConnectionFailed("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_default_health_check_reports_failure() {
        let result = Unreachable.health_check().await;
        assert!(matches!(result, Err(DatabaseError::HealthCheckFailed(_))));
    }
}
