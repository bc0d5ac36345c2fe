use std::{sync::Arc, time::Duration};

use reqwest::{Client, Response, StatusCode, header::RETRY_AFTER};
use tokio::time::sleep;

use crate::{error::PipelineError, management::Metrics, warning};

/// Retry parameters for a single logical request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_base: Duration,
    pub timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_base: Duration::from_millis(500),
            timeout: Duration::from_secs(10),
        }
    }
}

/// HTTP client that retries transient upstream failures with exponential
/// backoff.
///
/// One logical request is attempted up to `max_retries` times:
///
/// - transport errors (connection refused, timeout) back off and retry
/// - 429 honors a numeric `Retry-After` header, otherwise backs off
/// - 5xx backs off and retries
/// - any other 4xx is returned immediately - not a transient condition
///
/// When the budget is spent the *last received* response is returned even
/// if it carries an error status; only when no response was ever received
/// does the client fail with `PipelineError::Connectivity`. Callers must
/// therefore inspect the status of an `Ok` response. Successful responses
/// (status < 400) increment the shared `api_calls` metric.
pub struct RetryClient {
    client: Client,
    policy: RetryPolicy,
    metrics: Arc<Metrics>,
}

impl RetryClient {
    pub fn new(metrics: Arc<Metrics>) -> Result<Self, PipelineError> {
        Self::with_policy(metrics, RetryPolicy::default())
    }

    pub fn with_policy(metrics: Arc<Metrics>, policy: RetryPolicy) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(policy.timeout)
            .build()
            .map_err(PipelineError::ClientBuild)?;

        Ok(Self {
            client,
            policy,
            metrics,
        })
    }

    /// Issues a GET request, optionally with a bearer token.
    pub async fn get(&self, url: &str, bearer: Option<&str>) -> Result<Response, PipelineError> {
        self.execute(|| {
            let mut req = self.client.get(url);
            if let Some(token) = bearer {
                req = req.bearer_auth(token);
            }
            req
        })
        .await
    }

    /// Issues a form-encoded POST request, optionally with basic auth.
    pub async fn post_form(
        &self,
        url: &str,
        form: &[(&str, &str)],
        basic: Option<(&str, &str)>,
    ) -> Result<Response, PipelineError> {
        self.execute(|| {
            let mut req = self.client.post(url).form(form);
            if let Some((user, password)) = basic {
                req = req.basic_auth(user, Some(password));
            }
            req
        })
        .await
    }

    async fn execute<F>(&self, build: F) -> Result<Response, PipelineError>
    where
        F: Fn() -> reqwest::RequestBuilder,
    {
        let max_attempts = self.policy.max_retries.max(1);
        let mut last_response: Option<Response> = None;
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            match build().send().await {
                Ok(resp) => {
                    let status = resp.status();

                    if status.as_u16() < 400 {
                        self.metrics.incr_api_calls(1);
                        return Ok(resp);
                    }

                    if status == StatusCode::TOO_MANY_REQUESTS {
                        if attempt >= max_attempts {
                            warning!("Rate limited (429) and retry budget exhausted");
                            return Ok(resp);
                        }
                        let wait = retry_after(&resp).unwrap_or_else(|| self.backoff(attempt));
                        warning!(
                            "Rate limited (429). Waiting {:?} before retry (attempt {}/{})",
                            wait,
                            attempt,
                            max_attempts
                        );
                        last_response = Some(resp);
                        sleep(wait).await;
                        continue;
                    }

                    if status.is_server_error() {
                        if attempt >= max_attempts {
                            warning!("Server error {} and retry budget exhausted", status);
                            return Ok(resp);
                        }
                        let wait = self.backoff(attempt);
                        warning!(
                            "Server error {}. Waiting {:?} before retry (attempt {}/{})",
                            status,
                            wait,
                            attempt,
                            max_attempts
                        );
                        last_response = Some(resp);
                        sleep(wait).await;
                        continue;
                    }

                    // non-transient client error, caller inspects the status
                    return Ok(resp);
                }
                Err(err) => {
                    if attempt >= max_attempts {
                        warning!("Exhausted retries: {}", err);
                        return match last_response {
                            Some(resp) => Ok(resp),
                            None => Err(PipelineError::Connectivity(err)),
                        };
                    }
                    let wait = self.backoff(attempt);
                    warning!(
                        "Request failed: {}. Waiting {:?} before retry (attempt {}/{})",
                        err,
                        wait,
                        attempt,
                        max_attempts
                    );
                    sleep(wait).await;
                }
            }
        }
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.policy.backoff_base * 2u32.pow(attempt.saturating_sub(1))
    }
}

fn retry_after(resp: &Response) -> Option<Duration> {
    resp.headers()
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}
