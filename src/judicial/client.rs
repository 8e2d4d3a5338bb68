use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use reqwest::{Client, header::ACCEPT};
use serde_json::{Value, json};
use tracing::{debug, error};

use super::error::SearchError;
use super::models::RawEnvelope;
use super::normalize::error_message;
use super::orchestrator::SearchRequest;
use crate::util::config::{ApiConfig, ApiMode};

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const UNPARSEABLE_BODY: &str = "Could not parse the response as JSON";

/// Fetches one envelope per search request.
pub trait Transport {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<RawEnvelope, SearchError>> + Send;
}

fn check_url(url: &str) -> Result<()> {
    if !url.starts_with("https://") && !url.starts_with("http://") {
        bail!("API URL must use http or https: {}", url);
    }
    Ok(())
}

fn build_http(user_agent: &str, timeout_secs: u64) -> Result<Client> {
    let mut builder = Client::builder().user_agent(user_agent);
    if timeout_secs > 0 {
        builder = builder.timeout(Duration::from_secs(timeout_secs));
    }
    builder.build().context("Failed to create HTTP client")
}

/// Client for the aggregator endpoint that queries all three upstream
/// APIs server-side.
#[derive(Clone)]
pub struct BackendClient {
    client: Client,
    search_url: String,
}

impl BackendClient {
    pub fn new(search_url: &str, timeout_secs: u64) -> Result<Self> {
        check_url(search_url)?;
        Ok(Self {
            client: build_http("lexdash", timeout_secs)?,
            search_url: search_url.to_string(),
        })
    }
}

impl Transport for BackendClient {
    async fn search(&self, request: &SearchRequest) -> Result<RawEnvelope, SearchError> {
        let resp = self
            .client
            .post(&self.search_url)
            .json(request)
            .send()
            .await?;

        let status = resp.status().as_u16();
        let body = resp.text().await?;
        let envelope = read_envelope(status, &body)?;
        debug!(nuc = %request.nuc, pagina = request.pagina, "Fetched envelope");
        Ok(envelope)
    }
}

/// Maps a backend reply to an envelope. A non-success status becomes
/// `SearchError::Server`, carrying the body's `error` when it has one.
pub fn read_envelope(status: u16, body: &str) -> Result<RawEnvelope, SearchError> {
    if !(200..300).contains(&status) {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| error_message(&v))
            .unwrap_or_else(|| "Server error".to_string());
        return Err(SearchError::Server { status, message });
    }

    serde_json::from_str(body)
        .map_err(|e| SearchError::Transport(format!("unreadable response: {e}")))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamUrls {
    pub decisions: String,
    pub cases: String,
    pub hearings: String,
}

/// Outcome of one upstream call, before it is folded into the envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub data: Option<Value>,
    pub error: Option<String>,
}

/// Client that calls the three judicial APIs itself and builds the
/// envelope locally.
#[derive(Clone)]
pub struct DirectClient {
    client: Client,
    urls: UpstreamUrls,
}

impl DirectClient {
    pub fn new(urls: UpstreamUrls, timeout_secs: u64) -> Result<Self> {
        check_url(&urls.decisions)?;
        check_url(&urls.cases)?;
        check_url(&urls.hearings)?;
        Ok(Self {
            client: build_http(BROWSER_USER_AGENT, timeout_secs)?,
            urls,
        })
    }

    async fn fetch(&self, url: &str, request: &SearchRequest) -> UpstreamResponse {
        let params = [
            ("Nuc", request.nuc.clone()),
            ("PaginaActual", request.pagina.to_string()),
            ("RegistrosPorPagina", request.registros.to_string()),
        ];

        let resp = match self
            .client
            .get(url)
            .query(&params[..])
            .header(ACCEPT, "application/json")
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                error!(url = url, error = %e, "Upstream request failed");
                return UpstreamResponse {
                    status: 500,
                    data: None,
                    error: Some(e.to_string()),
                };
            }
        };

        let status = resp.status().as_u16();
        let body = resp.text().await.map_err(|e| {
            error!(url = url, status, error = %e, "Failed to read upstream body");
            e.to_string()
        });
        debug!(url = url, status, "Upstream responded");
        upstream_response(status, body)
    }
}

/// Folds one upstream reply into an `UpstreamResponse`. A body that could
/// not be read is carried as the section error.
pub fn upstream_response(status: u16, body: Result<String, String>) -> UpstreamResponse {
    match body {
        Ok(text) => {
            let data = serde_json::from_str(&text)
                .unwrap_or_else(|_| json!({ "error": UNPARSEABLE_BODY, "content": text }));
            UpstreamResponse {
                status,
                data: Some(data),
                error: None,
            }
        }
        Err(e) => UpstreamResponse {
            status,
            data: None,
            error: Some(format!("Could not read the response: {e}")),
        },
    }
}

impl Transport for DirectClient {
    async fn search(&self, request: &SearchRequest) -> Result<RawEnvelope, SearchError> {
        let (decisions, cases, hearings) = tokio::join!(
            self.fetch(&self.urls.decisions, request),
            self.fetch(&self.urls.cases, request),
            self.fetch(&self.urls.hearings, request),
        );
        Ok(compose_envelope(&request.nuc, decisions, cases, hearings))
    }
}

/// Builds the combined envelope. A failed upstream still contributes a
/// section, carrying its error.
pub fn compose_envelope(
    nuc: &str,
    decisions: UpstreamResponse,
    cases: UpstreamResponse,
    hearings: UpstreamResponse,
) -> RawEnvelope {
    let debug = json!({
        "decisiones_status": decisions.status,
        "casos_status": cases.status,
        "audiencias_status": hearings.status,
    });

    RawEnvelope {
        success: Some(true),
        nuc: Some(nuc.to_string()),
        decisiones: Some(section_payload(decisions)),
        casos: Some(section_payload(cases)),
        audiencias: Some(section_payload(hearings)),
        debug: Some(debug),
        error: None,
    }
}

fn section_payload(upstream: UpstreamResponse) -> Value {
    if upstream.status == 200 && upstream.error.is_none() {
        return upstream.data.unwrap_or(Value::Null);
    }
    let message = upstream
        .error
        .unwrap_or_else(|| format!("Status {}", upstream.status));
    json!({ "error": message, "datos": [] })
}

/// The transport selected by configuration.
#[derive(Clone)]
pub enum JudicialClient {
    Backend(BackendClient),
    Direct(DirectClient),
}

impl JudicialClient {
    pub fn from_config(api: &ApiConfig, force_direct: bool) -> Result<Self> {
        let mode = if force_direct { ApiMode::Direct } else { api.mode };
        match mode {
            ApiMode::Backend => Ok(JudicialClient::Backend(BackendClient::new(
                &api.search_url,
                api.timeout_secs,
            )?)),
            ApiMode::Direct => Ok(JudicialClient::Direct(DirectClient::new(
                UpstreamUrls {
                    decisions: api.decisions_url.clone(),
                    cases: api.cases_url.clone(),
                    hearings: api.hearings_url.clone(),
                },
                api.timeout_secs,
            )?)),
        }
    }
}

impl Transport for JudicialClient {
    async fn search(&self, request: &SearchRequest) -> Result<RawEnvelope, SearchError> {
        match self {
            JudicialClient::Backend(client) => client.search(request).await,
            JudicialClient::Direct(client) => client.search(request).await,
        }
    }
}
