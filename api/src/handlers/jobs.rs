use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use serde::Serialize;

use crate::handlers::ErrorResponse;
use crate::state::AppState;
use common::models::{Job, JobDetail, JobFilter, JobListing, NewJob, UpdateJob};

/// `{ "job": ... }`
#[derive(Debug, Serialize)]
pub struct JobResponse<T: Serialize> {
    pub job: T,
}

/// `{ "jobs": [...] }`
#[derive(Debug, Serialize)]
pub struct JobsResponse {
    pub jobs: Vec<JobListing>,
}

/// `{ "deleted": id }`
#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub deleted: i32,
}

/// Create a new job (admin only)
#[tracing::instrument(skip(state, payload))]
pub async fn create_job(
    State(state): State<AppState>,
    payload: Result<Json<NewJob>, JsonRejection>,
) -> Result<(StatusCode, Json<JobResponse<Job>>), ErrorResponse> {
    let Json(req) = payload?;
    req.validate()?;

    let job = state.jobs().create(&req).await?;

    tracing::info!(job_id = job.id, "Job created successfully");
    Ok((StatusCode::CREATED, Json(JobResponse { job })))
}

/// List jobs, optionally filtered by `minSalary`, `hasEquity` and `title`
///
/// Unknown query parameters are rejected.
#[tracing::instrument(skip(state, query))]
pub async fn list_jobs(
    State(state): State<AppState>,
    query: Result<Query<JobFilter>, QueryRejection>,
) -> Result<Json<JobsResponse>, ErrorResponse> {
    let Query(filter) = query?;
    filter.validate()?;

    let jobs = state.jobs().find_all(&filter).await?;

    tracing::debug!(count = jobs.len(), "Listed jobs");
    Ok(Json(JobsResponse { jobs }))
}

/// Get job details with the company nested
#[tracing::instrument(skip(state, id))]
pub async fn get_job(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<JobResponse<JobDetail>>, ErrorResponse> {
    let Path(id) = id?;

    let job = state.jobs().get(id).await?;

    Ok(Json(JobResponse { job }))
}

/// Partially update a job (admin only)
///
/// `id` and `companyHandle` cannot change; the request type rejects them.
#[tracing::instrument(skip(state, id, payload))]
pub async fn update_job(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
    payload: Result<Json<UpdateJob>, JsonRejection>,
) -> Result<Json<JobResponse<Job>>, ErrorResponse> {
    let Path(id) = id?;
    let Json(req) = payload?;
    req.validate()?;

    let job = state.jobs().update(id, &req).await?;

    tracing::info!(job_id = id, "Job updated successfully");
    Ok(Json(JobResponse { job }))
}

/// Delete a job (admin only)
#[tracing::instrument(skip(state, id))]
pub async fn delete_job(
    State(state): State<AppState>,
    id: Result<Path<i32>, PathRejection>,
) -> Result<Json<DeletedResponse>, ErrorResponse> {
    let Path(id) = id?;

    state.jobs().remove(id).await?;

    tracing::info!(job_id = id, "Job deleted successfully");
    Ok(Json(DeletedResponse { deleted: id }))
}
