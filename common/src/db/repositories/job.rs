// Job repository implementation

use super::queries::{company_queries, job_queries};
use crate::db::client::{from_record, DbClient, Record, SqlValue};
use crate::db::sql::{sql_for_partial_update, WhereClause};
use crate::errors::{DatabaseError, RepositoryError};
use crate::models::{Company, Job, JobDetail, JobFilter, JobListing, NewJob, UpdateJob};
use std::sync::Arc;
use tracing::instrument;

/// Repository for job-related database operations
#[derive(Clone)]
pub struct JobRepository {
    client: Arc<dyn DbClient>,
}

impl JobRepository {
    /// Create a new JobRepository on top of the given client
    pub fn new(client: Arc<dyn DbClient>) -> Self {
        Self { client }
    }

    /// Create a job and return the stored row
    ///
    /// No conflict checking beyond the database constraints.
    #[instrument(skip(self, data), fields(company_handle = %data.company_handle))]
    pub async fn create(&self, data: &NewJob) -> Result<Job, RepositoryError> {
        let sql = format!(
            "INSERT INTO jobs (title, salary, equity, company_handle)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            job_queries::RETURNING_COLUMNS
        );
        let params = [
            SqlValue::from(data.title.clone()),
            SqlValue::from(data.salary),
            SqlValue::from(data.equity),
            SqlValue::from(data.company_handle.clone()),
        ];

        let record = first_row(self.client.execute(&sql, &params).await?).ok_or_else(|| {
            RepositoryError::Database(DatabaseError::QueryFailed(
                "INSERT returned no row".to_string(),
            ))
        })?;
        let job: Job = from_record(record)?;

        tracing::info!(job_id = job.id, title = %job.title, "Job created");
        Ok(job)
    }

    /// Find all jobs matching the filter, ordered by title
    ///
    /// Every row carries the joined company's name when one exists.
    #[instrument(skip(self))]
    pub async fn find_all(&self, filter: &JobFilter) -> Result<Vec<JobListing>, RepositoryError> {
        let mut clause = WhereClause::new();
        filter.apply(&mut clause);

        let sql = format!(
            "SELECT {}
             FROM jobs j
             LEFT JOIN companies AS c ON c.handle = j.company_handle{}
             ORDER BY j.title",
            job_queries::LISTING_COLUMNS,
            clause.to_sql()
        );

        let records = self.client.execute(&sql, clause.values()).await?;
        let jobs = records
            .into_iter()
            .map(from_record)
            .collect::<Result<Vec<JobListing>, _>>()?;

        tracing::debug!(count = jobs.len(), "Found jobs");
        Ok(jobs)
    }

    /// Get a job by id with its company nested
    ///
    /// The job and company are read by two separate statements.
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no job has this id
    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<JobDetail, RepositoryError> {
        let sql = format!(
            "SELECT {} FROM jobs WHERE id = $1",
            job_queries::RETURNING_COLUMNS
        );
        let record = first_row(self.client.execute(&sql, &[SqlValue::from(id)]).await?)
            .ok_or_else(|| RepositoryError::not_found(format!("No job: {}", id)))?;
        let job: Job = from_record(record)?;

        let sql = format!(
            "SELECT {} FROM companies WHERE handle = $1",
            company_queries::SELECT_ALL_COLUMNS
        );
        let company = first_row(
            self.client
                .execute(&sql, &[SqlValue::from(job.company_handle.clone())])
                .await?,
        )
        .map(from_record::<Company>)
        .transpose()?;

        if company.is_none() {
            tracing::warn!(job_id = id, company_handle = %job.company_handle, "Company missing for job");
        }

        Ok(JobDetail::new(job, company))
    }

    /// Apply a partial update and return the updated row
    ///
    /// # Errors
    /// - `RepositoryError::Validation` if `data` carries no field
    /// - `RepositoryError::NotFound` if no job has this id
    #[instrument(skip(self, data))]
    pub async fn update(&self, id: i32, data: &UpdateJob) -> Result<Job, RepositoryError> {
        let set = sql_for_partial_update(data.changes(), &job_queries::UPDATE_FIELDS)?;

        let sql = format!(
            "UPDATE jobs
             SET {}
             WHERE id = ${}
             RETURNING {}",
            set.set_cols,
            set.next_placeholder(),
            job_queries::RETURNING_COLUMNS
        );
        let mut params = set.values;
        params.push(SqlValue::from(id));

        let record = first_row(self.client.execute(&sql, &params).await?)
            .ok_or_else(|| RepositoryError::not_found(format!("No job: {}", id)))?;
        let job: Job = from_record(record)?;

        tracing::info!(job_id = id, "Job updated");
        Ok(job)
    }

    /// Delete a job
    ///
    /// # Errors
    /// `RepositoryError::NotFound` if no job has this id
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i32) -> Result<(), RepositoryError> {
        let records = self
            .client
            .execute(
                "DELETE FROM jobs WHERE id = $1 RETURNING id",
                &[SqlValue::from(id)],
            )
            .await?;

        if records.is_empty() {
            return Err(RepositoryError::not_found(format!("No job: {}", id)));
        }

        tracing::info!(job_id = id, "Job deleted");
        Ok(())
    }
}

fn first_row(records: Vec<Record>) -> Option<Record> {
    records.into_iter().next()
}
