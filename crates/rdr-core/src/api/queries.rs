//! Data source, query and query-result operations

use crate::api::client::RedashClient;
use crate::api::models::{
    CreateDataSourceRequest, CreateQueryParams, CreateQueryRequest, CreatedQuery, Job,
    JobEnvelope, QueryList, QueryResultsParams, QueryResultsRequest, job_status,
};
use crate::error::{ApiError, ResourceNotFound};
use crate::utils::error_helpers::{convert_json_error, missing_field_error};
use crate::utils::poll::{PollConfig, poll_until};
use serde_json::{Map, Value, json};

impl RedashClient {
    pub async fn create_data_source(
        &self,
        data_source_type: &str,
        name: &str,
        options: Map<String, Value>,
    ) -> crate::Result<Value> {
        let request = CreateDataSourceRequest {
            data_source_type: data_source_type.to_string(),
            name: name.to_string(),
            options,
        };

        Ok(self.post("data_sources", &request).await?)
    }

    /// Create a query, then run it right away when `with_results` is set.
    ///
    /// A failure of the follow-up execution is returned as the error of this call,
    /// even though the query itself has been created.
    pub async fn create_query(&self, params: CreateQueryParams) -> crate::Result<CreatedQuery> {
        let request = CreateQueryRequest {
            data_source_id: params.data_source_id,
            name: params.name,
            query: params.query,
            description: params.description,
            options: params.options,
        };

        let query: Value = self.post("queries", &request).await?;

        if !params.with_results {
            return Ok(CreatedQuery {
                query,
                results: None,
            });
        }

        let query_id = query
            .get("id")
            .and_then(Value::as_u64)
            .ok_or_else(|| missing_field_error("queries", "id"))?;

        let mut results_params = QueryResultsParams::new(request.data_source_id, request.query);
        results_params.query_id = Some(query_id);
        let results = self.generate_query_results(results_params).await?;

        Ok(CreatedQuery {
            query,
            results: Some(results),
        })
    }

    pub async fn refresh_query(&self, query_id: u64) -> crate::Result<Value> {
        Ok(self
            .post(&format!("queries/{}/refresh", query_id), &json!({}))
            .await?)
    }

    /// Execute query text. With `return_results` the job is read exactly once;
    /// a job that has not finished yet fails with [`ResourceNotFound`].
    pub async fn generate_query_results(&self, params: QueryResultsParams) -> crate::Result<Value> {
        let return_results = params.return_results;
        let response = self.submit_query_results(params).await?;

        if !return_results {
            return Ok(response);
        }

        let job_id = match Submission::from_response(response)? {
            Submission::Cached(result) => return Ok(result),
            Submission::Pending(job_id) => job_id,
        };

        let job = self.get_job(&job_id).await?;
        let result_id = job
            .query_result_id
            .ok_or_else(|| ResourceNotFound::new("query result", &job_id))?;

        self.get_query_result(result_id).await
    }

    /// Execute query text and wait for the job with bounded exponential backoff.
    pub async fn generate_query_results_and_wait(
        &self,
        params: QueryResultsParams,
        poll: &PollConfig,
    ) -> crate::Result<Value> {
        let response = self.submit_query_results(params).await?;
        let job_id = match Submission::from_response(response)? {
            Submission::Cached(result) => return Ok(result),
            Submission::Pending(job_id) => job_id,
        };

        let finished = poll_until(poll, |attempt| {
            let job_id = job_id.clone();
            async move {
                log::debug!("Reading job {} (attempt {})", job_id, attempt);
                let job = self.get_job(&job_id).await?;
                settled_job(job)
            }
        })
        .await?;

        match finished {
            Some(result_id) => self.get_query_result(result_id).await,
            None => Err(ApiError::JobTimeout {
                job_id,
                attempts: poll.max_attempts,
            }
            .into()),
        }
    }

    /// Execute a saved query, looking up its data source and text in the query listing.
    /// Only the matching row has to carry a data source and query text.
    pub async fn run_query(&self, query_id: u64) -> crate::Result<Value> {
        let queries: QueryList = self.get("queries").await?;

        let query = queries
            .results
            .into_iter()
            .find(|q| q.id == query_id)
            .ok_or_else(|| ResourceNotFound::new("query", query_id))?;

        let field = |name: &str| format!("results[id={}].{}", query_id, name);
        let data_source_id = query
            .data_source_id
            .ok_or_else(|| missing_field_error("queries", &field("data_source_id")))?;
        let text = query
            .query
            .ok_or_else(|| missing_field_error("queries", &field("query")))?;

        let mut params = QueryResultsParams::new(data_source_id, text);
        params.query_id = Some(query_id);
        self.generate_query_results(params).await
    }

    pub async fn get_job(&self, job_id: &str) -> Result<Job, ApiError> {
        let endpoint = format!("jobs/{}", job_id);
        let envelope: JobEnvelope = self.get(&endpoint).await?;
        envelope
            .job
            .ok_or_else(|| missing_field_error(&endpoint, "job"))
    }

    pub async fn get_query_result(&self, result_id: u64) -> crate::Result<Value> {
        Ok(self.get(&format!("query_results/{}", result_id)).await?)
    }

    async fn submit_query_results(&self, params: QueryResultsParams) -> Result<Value, ApiError> {
        let request = QueryResultsRequest {
            data_source_id: params.data_source_id,
            query: params.query,
            max_age: params.max_age,
            parameters: params.parameters,
            query_id: params.query_id,
        };

        self.post("query_results", &request).await
    }
}

/// What `query_results` answered: a result served from cache, or a job to follow.
enum Submission {
    Cached(Value),
    Pending(String),
}

impl Submission {
    fn from_response(response: Value) -> Result<Self, ApiError> {
        let envelope: JobEnvelope =
            serde_json::from_value(response).map_err(|e| convert_json_error(e, "query_results"))?;

        if let Some(cached) = envelope.query_result {
            return Ok(Submission::Cached(json!({ "query_result": cached })));
        }

        envelope
            .job
            .map(|job| Submission::Pending(job.id))
            .ok_or_else(|| missing_field_error("query_results", "job.id"))
    }
}

/// Result id of a finished job, `None` while it is still running.
fn settled_job(job: Job) -> Result<Option<u64>, ApiError> {
    match job.status {
        job_status::FAILURE | job_status::CANCELLED => {
            log::warn!("Job {} ended with status {}", job.id, job.status);
            Err(ApiError::JobFailed {
                message: job.error.unwrap_or_default(),
                job_id: job.id,
                status: job.status,
            })
        }
        _ => Ok(job.query_result_id),
    }
}
