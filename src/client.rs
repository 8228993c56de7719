// src/client.rs

use crate::{config::AppConfig, error::*, utils};
use log::{debug, warn};
use reqwest::{
    IntoUrl, Response, StatusCode,
    header::{self, HeaderMap, HeaderValue},
};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware, RequestBuilder};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::{sync::Arc, time::Duration};

/// Authenticated session shared read-only by every API call of a run.
///
/// Transient failures (408/429/5xx and connection errors) are retried with
/// exponential backoff by the middleware before a response surfaces.
///
/// Timeouts are idle limits between reads, not deadlines for a whole
/// request: a large body keeps streaming as long as data keeps arriving.
/// Listing/metadata calls and file bodies use separate sessions because
/// their read timeouts differ.
#[derive(Clone)]
pub struct RobustClient {
    pub client: ClientWithMiddleware,
    download_client: ClientWithMiddleware,
    config: Arc<AppConfig>,
}

impl RobustClient {
    pub fn new(config: Arc<AppConfig>, token: &str) -> AppResult<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| {
            AppError::UserInputError("API token contains invalid characters".to_string())
        })?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, auth);

        let client = build_session(&config, headers.clone(), config.api_timeout)?;
        let download_client = build_session(&config, headers, config.download_timeout)?;

        Ok(Self {
            client,
            download_client,
            config,
        })
    }

    /// GET on the listing/metadata session. The status is not checked.
    pub fn api_request<T: IntoUrl>(&self, url: T) -> RequestBuilder {
        self.client.get(url)
    }

    /// GET on the download session. The status is not checked.
    pub fn download_request<T: IntoUrl>(&self, url: T) -> RequestBuilder {
        self.download_client.get(url)
    }

    /// GET that maps 401/403/404 to typed errors before failing on other statuses.
    pub async fn get_checked<T: IntoUrl>(&self, url: T) -> AppResult<Response> {
        let res = self.api_request(url).send().await?;
        check_status(res)
    }

    /// Fetches one JSON document, treating 403 as "not accessible".
    pub async fn fetch_json_unless_forbidden<T: DeserializeOwned>(
        &self,
        url: &str,
    ) -> AppResult<Option<T>> {
        let res = self.api_request(url).send().await?;
        if res.status() == StatusCode::FORBIDDEN {
            debug!("403 for {}, treating as inaccessible", url);
            return Ok(None);
        }
        let res = res.error_for_status()?;
        Ok(Some(parse_body(url, res).await?))
    }

    /// Walks a paginated collection by following `Link: rel="next"` until exhausted.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> AppResult<Vec<T>> {
        self.paginate(url, params, false).await
    }

    /// Like [`fetch_all`](Self::fetch_all) but 401/403/404 surface as
    /// `Unauthorized`/`Forbidden`/`NotFound`.
    pub async fn fetch_all_checked<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
    ) -> AppResult<Vec<T>> {
        self.paginate(url, params, true).await
    }

    async fn paginate<T: DeserializeOwned>(
        &self,
        url: &str,
        params: &[(&str, &str)],
        typed_errors: bool,
    ) -> AppResult<Vec<T>> {
        let mut results = Vec::new();
        let mut next_url = Some(url.to_string());
        let mut params = params;
        let mut pages = 0usize;

        while let Some(current) = next_url.take() {
            if pages >= self.config.max_pages {
                warn!("Pagination of {} exceeded {} pages, aborting", url, self.config.max_pages);
                return Err(AppError::PaginationLimit {
                    url: url.to_string(),
                    max_pages: self.config.max_pages,
                });
            }
            pages += 1;

            let res = self.api_request(&current).query(params).send().await?;
            let res = if typed_errors {
                check_status(res)?
            } else {
                res.error_for_status()?
            };

            next_url = res
                .headers()
                .get(header::LINK)
                .and_then(|v| v.to_str().ok())
                .and_then(utils::parse_next_link);

            let page: Value = parse_body(&current, res).await?;
            let records = match page {
                Value::Array(list) => list,
                Value::Object(mut map) => match map.remove("items") {
                    Some(Value::Array(list)) => list,
                    _ => Vec::new(),
                },
                _ => Vec::new(),
            };
            debug!("Page {} of {}: {} records", pages, url, records.len());
            for record in records {
                results.push(
                    serde_json::from_value(record).map_err(|source| AppError::ApiParseFailed {
                        url: current.clone(),
                        source,
                    })?,
                );
            }
            // continuation URLs already carry the query
            params = &[];
        }
        Ok(results)
    }
}

fn build_session(
    config: &AppConfig,
    headers: HeaderMap,
    read_timeout: Duration,
) -> AppResult<ClientWithMiddleware> {
    let retry_policy = ExponentialBackoff::builder()
        .retry_bounds(config.retry_min_backoff, config.retry_max_backoff)
        .build_with_max_retries(config.max_retries);
    let client = reqwest::Client::builder()
        .user_agent(config.user_agent.clone())
        .default_headers(headers)
        .connect_timeout(config.connect_timeout)
        .read_timeout(read_timeout)
        .build()?;
    Ok(ClientBuilder::new(client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build())
}

fn check_status(res: Response) -> AppResult<Response> {
    match res.status() {
        StatusCode::UNAUTHORIZED => Err(AppError::Unauthorized),
        StatusCode::FORBIDDEN => Err(AppError::Forbidden),
        StatusCode::NOT_FOUND => Err(AppError::NotFound),
        _ => Ok(res.error_for_status()?),
    }
}

pub(crate) async fn parse_body<T: DeserializeOwned>(url: &str, res: Response) -> AppResult<T> {
    let bytes = res.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|source| AppError::ApiParseFailed {
        url: url.to_string(),
        source,
    })
}
