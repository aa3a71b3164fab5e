// Data models for jobs and companies

use crate::db::client::SqlValue;
use crate::db::sql::WhereClause;
use crate::errors::ValidationError;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Job Models
// ============================================================================

/// Job as stored in the `jobs` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Job row enriched with the owning company's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
    /// `None` when no company row joins
    pub company_name: Option<String>,
}

/// Job with its company nested in place of the handle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    /// `None` if the company vanished between the two reads
    pub company: Option<Company>,
}

impl JobDetail {
    pub fn new(job: Job, company: Option<Company>) -> Self {
        Self {
            id: job.id,
            title: job.title,
            salary: job.salary,
            equity: job.equity,
            company,
        }
    }
}

/// Request to create a new job
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl NewJob {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_title(&self.title)?;
        if self.company_handle.trim().is_empty() {
            return Err(ValidationError::InvalidFieldValue {
                field: "companyHandle".to_string(),
                reason: "must not be blank".to_string(),
            });
        }
        validate_salary(self.salary)?;
        validate_equity(self.equity)
    }
}

/// Partial update of a job
///
/// Only the mutable fields exist here: `id` and `companyHandle` are
/// rejected as unknown fields when deserializing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateJob {
    /// `Some(None)` is an explicit null, which `validate` rejects
    #[serde(default, deserialize_with = "nullable")]
    pub title: Option<Option<String>>,
    /// `Some(None)` clears the column
    #[serde(default, deserialize_with = "nullable")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "nullable")]
    pub equity: Option<Option<Decimal>>,
}

impl UpdateJob {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match &self.title {
            Some(Some(title)) => validate_title(title)?,
            Some(None) => {
                return Err(ValidationError::InvalidFieldValue {
                    field: "title".to_string(),
                    reason: "must not be null".to_string(),
                })
            }
            None => {}
        }
        if let Some(salary) = self.salary {
            validate_salary(salary)?;
        }
        if let Some(equity) = self.equity {
            validate_equity(equity)?;
        }
        Ok(())
    }

    /// Provided fields, keyed by logical field name
    pub fn changes(&self) -> Vec<(&'static str, SqlValue)> {
        let mut changes = Vec::new();
        if let Some(title) = &self.title {
            changes.push(("title", SqlValue::from(title.clone())));
        }
        if let Some(salary) = self.salary {
            changes.push(("salary", SqlValue::from(salary)));
        }
        if let Some(equity) = self.equity {
            changes.push(("equity", SqlValue::from(equity)));
        }
        changes
    }
}

/// Recognized filters for listing jobs
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobFilter {
    pub min_salary: Option<i32>,
    pub has_equity: Option<bool>,
    /// Case-insensitive substring of the title
    pub title: Option<String>,
}

impl JobFilter {
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.min_salary {
            Some(min) if min < 0 => Err(ValidationError::InvalidFieldValue {
                field: "minSalary".to_string(),
                reason: "must be zero or greater".to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Add one predicate per provided filter; absent filters add nothing
    pub fn apply(&self, clause: &mut WhereClause) {
        if let Some(min_salary) = self.min_salary {
            clause.and_param("j.salary >= $", min_salary);
        }
        if self.has_equity == Some(true) {
            clause.and_raw("j.equity > 0");
        }
        if let Some(title) = &self.title {
            clause.and_param("j.title ILIKE $", format!("%{}%", title));
        }
    }
}

fn validate_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::InvalidFieldValue {
            field: "title".to_string(),
            reason: "must not be blank".to_string(),
        });
    }
    Ok(())
}

fn validate_salary(salary: Option<i32>) -> Result<(), ValidationError> {
    match salary {
        Some(s) if s < 0 => Err(ValidationError::InvalidFieldValue {
            field: "salary".to_string(),
            reason: "must be zero or greater".to_string(),
        }),
        _ => Ok(()),
    }
}

fn validate_equity(equity: Option<Decimal>) -> Result<(), ValidationError> {
    match equity {
        Some(e) if e < Decimal::ZERO || e > Decimal::ONE => {
            Err(ValidationError::InvalidFieldValue {
                field: "equity".to_string(),
                reason: "must be between 0 and 1".to_string(),
            })
        }
        _ => Ok(()),
    }
}

/// Distinguish an explicit `null` from an absent field
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Company Models
// ============================================================================

/// Company record, read only from the job side
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: Option<String>,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

// ============================================================================
// Authentication Models
// ============================================================================

/// Claims carried by the bearer token
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserClaims {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    pub exp: i64, // Expiration time (Unix timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn test_job_serializes_equity_as_string() {
        let job = Job {
            id: 1,
            title: "J1".to_string(),
            salary: Some(10),
            equity: Some(Decimal::from_str("0.1").unwrap()),
            company_handle: "c1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&job).unwrap(),
            json!({"id": 1, "title": "J1", "salary": 10, "equity": "0.1", "companyHandle": "c1"})
        );
    }

    #[test]
    fn test_job_detail_has_no_company_handle() {
        let job = Job {
            id: 1,
            title: "J1".to_string(),
            salary: None,
            equity: None,
            company_handle: "c1".to_string(),
        };
        let company = Company {
            handle: "c1".to_string(),
            name: "C1".to_string(),
            description: Some("Desc1".to_string()),
            num_employees: Some(1),
            logo_url: Some("http://c1.img".to_string()),
        };

        let value = serde_json::to_value(JobDetail::new(job, Some(company))).unwrap();
        assert!(value.get("companyHandle").is_none());
        assert_eq!(value["company"]["numEmployees"], json!(1));
        assert_eq!(value["company"]["logoUrl"], json!("http://c1.img"));
    }

    #[test]
    fn test_update_job_rejects_company_handle() {
        let result: Result<UpdateJob, _> =
            serde_json::from_value(json!({"title": "x", "companyHandle": "c2"}));
        assert!(result.is_err());

        let result: Result<UpdateJob, _> = serde_json::from_value(json!({"id": 4}));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_job_distinguishes_null_from_absent() {
        let update: UpdateJob = serde_json::from_value(json!({"salary": null})).unwrap();
        assert_eq!(update.salary, Some(None));
        assert_eq!(update.equity, None);
        assert_eq!(update.changes(), vec![("salary", SqlValue::Int(None))]);
    }

    #[test]
    fn test_update_job_changes_in_field_order() {
        let update: UpdateJob =
            serde_json::from_value(json!({"equity": "0.5", "title": "New"})).unwrap();
        assert_eq!(
            update.changes(),
            vec![
                ("title", SqlValue::from("New")),
                ("equity", SqlValue::from(Decimal::from_str("0.5").unwrap())),
            ]
        );
    }

    #[test]
    fn test_update_job_validation() {
        let update = UpdateJob {
            equity: Some(Some(Decimal::from(2))),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateJob {
            salary: Some(Some(-1)),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UpdateJob {
            salary: Some(None),
            equity: Some(None),
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_update_job_rejects_null_title() {
        let update: UpdateJob =
            serde_json::from_value(json!({"title": null, "salary": 5})).unwrap();
        assert_eq!(update.title, Some(None));
        assert_eq!(
            update.validate(),
            Err(ValidationError::InvalidFieldValue {
                field: "title".to_string(),
                reason: "must not be null".to_string(),
            })
        );
    }

    #[test]
    fn test_new_job_validation() {
        let job: NewJob = serde_json::from_value(
            json!({"title": "new", "salary": 25, "equity": "0.3", "companyHandle": "c1"}),
        )
        .unwrap();
        assert!(job.validate().is_ok());

        let blank = NewJob {
            title: "  ".to_string(),
            ..job.clone()
        };
        assert!(blank.validate().is_err());

        let missing_title: Result<NewJob, _> =
            serde_json::from_value(json!({"companyHandle": "c1"}));
        assert!(missing_title.is_err());
    }

    #[test]
    fn test_filter_without_options_adds_nothing() {
        let mut clause = WhereClause::new();
        JobFilter::default().apply(&mut clause);
        assert!(clause.is_empty());
    }

    #[test]
    fn test_filter_has_equity_false_adds_nothing() {
        let mut clause = WhereClause::new();
        JobFilter {
            has_equity: Some(false),
            ..Default::default()
        }
        .apply(&mut clause);
        assert_eq!(clause.to_sql(), "");
    }

    #[test]
    fn test_filter_all_options() {
        let mut clause = WhereClause::new();
        JobFilter {
            min_salary: Some(1),
            has_equity: Some(true),
            title: Some("J1".to_string()),
        }
        .apply(&mut clause);

        assert_eq!(
            clause.to_sql(),
            " WHERE j.salary >= $1 AND j.equity > 0 AND j.title ILIKE $2"
        );
        assert_eq!(
            clause.values(),
            &[SqlValue::from(1), SqlValue::from("%J1%")]
        );
    }

    #[test]
    fn test_filter_rejects_unknown_keys() {
        let result: Result<JobFilter, _> = serde_json::from_value(json!({"wrong": "error"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_filter_rejects_negative_min_salary() {
        let filter = JobFilter {
            min_salary: Some(-5),
            ..Default::default()
        };
        assert!(filter.validate().is_err());
    }
}
