//! Blocking JIRA REST client

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::core::config::Config;
use crate::core::item::{Item, ItemKind};
use crate::core::provider::{ItemProvider, ItemQuery, ProviderError};
use crate::jira::auth::{candidate_strategies, AuthStrategy};
use crate::jira::models::{Board, ErrorBody, Filter, Page, ServerInfo, User};

const API: &str = "/rest/api/2";
const AGILE: &str = "/rest/agile/1.0";

/// Page size requested from paginated endpoints
const PAGE_SIZE: u64 = 50;

/// Upper bound on pages fetched for one collection
const MAX_PAGES: usize = 200;

/// Authenticated JIRA session
pub struct JiraClient {
    http: Client,
    base_url: String,
    username: Option<String>,
    token: String,
    strategy: AuthStrategy,
}

impl JiraClient {
    /// Build a client that uses `strategy` without probing the server
    pub fn new(config: &Config, strategy: AuthStrategy) -> Result<Self, ProviderError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .user_agent(concat!("jcl/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::Transport {
                url: config.url.clone(),
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            token: config.token.clone(),
            strategy,
        })
    }

    /// Build a client and find an authentication strategy the server accepts
    ///
    /// Candidates are probed in order against `/myself`. A 401/403 moves on to
    /// the next one; any other failure is returned immediately.
    pub fn connect(config: &Config) -> Result<(Self, User), ProviderError> {
        let candidates = candidate_strategies(config);
        let first = candidates.first().copied().unwrap_or(AuthStrategy::Bearer);
        let mut client = Self::new(config, first)?;
        let mut tried = Vec::new();

        for strategy in candidates {
            client.strategy = strategy;
            tried.push(strategy.to_string());
            debug!(strategy = %strategy, url = %client.base_url, "probing authentication");

            match client.myself() {
                Ok(user) => {
                    info!(strategy = %strategy, user = ?user.display_name, "authenticated");
                    return Ok((client, user));
                }
                Err(e) if e.is_auth_rejection() => {
                    debug!(strategy = %strategy, error = %e, "authentication rejected");
                }
                Err(e) => return Err(e),
            }
        }

        Err(ProviderError::AuthenticationFailed {
            url: config.url.clone(),
            tried,
        })
    }

    pub fn strategy(&self) -> AuthStrategy {
        self.strategy
    }

    /// The authenticated user
    pub fn myself(&self) -> Result<User, ProviderError> {
        self.get_json(&format!("{}/myself", API), &[])
    }

    /// Server title and version
    pub fn server_info(&self) -> Result<ServerInfo, ProviderError> {
        self.get_json(&format!("{}/serverInfo", API), &[])
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, request: RequestBuilder) -> RequestBuilder {
        self.strategy
            .apply(request, self.username.as_deref(), &self.token)
    }

    fn send(&self, request: RequestBuilder, url: &str) -> Result<Response, ProviderError> {
        let response = self
            .authed(request)
            .send()
            .map_err(|e| ProviderError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status();
        debug!(status = status.as_u16(), url = %url, "response");
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(ProviderError::Http {
            status: status.as_u16(),
            url: url.to_string(),
            message: error_message(status, &body),
        })
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ProviderError> {
        let url = self.url(path);
        debug!(url = %url, params = ?params, "GET");
        let response = self.send(self.http.get(&url).query(params), &url)?;
        response.json::<T>().map_err(|e| ProviderError::Decode {
            url,
            message: e.to_string(),
        })
    }

    fn delete(&self, path: &str) -> Result<(), ProviderError> {
        let url = self.url(path);
        debug!(url = %url, "DELETE");
        self.send(self.http.delete(&url), &url).map(|_| ())
    }

    /// Fetch every page of a `{values, isLast}` collection
    fn get_all_pages<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, ProviderError> {
        let (all, complete) = collect_pages(MAX_PAGES, |start_at| {
            let mut page_params = params.to_vec();
            page_params.push(("startAt", start_at.to_string()));
            page_params.push(("maxResults", PAGE_SIZE.to_string()));
            self.get_json(path, &page_params)
        })?;

        if !complete {
            warn!(
                path,
                pages = MAX_PAGES,
                fetched = all.len(),
                "page limit reached, collection truncated"
            );
        }
        Ok(all)
    }

    fn fetch_filters(&self, name: Option<&str>) -> Result<Vec<Item>, ProviderError> {
        let filters: Vec<Filter> = match name {
            None => self.get_json(&format!("{}/filter/favourite", API), &[])?,
            Some(name) => self.get_all_pages(
                &format!("{}/filter/search", API),
                &[
                    ("filterName", name.to_string()),
                    ("expand", "description,owner,jql,favourite".to_string()),
                ],
            )?,
        };
        Ok(filters.into_iter().map(Item::from).collect())
    }

    fn fetch_boards(&self, query: &ItemQuery) -> Result<Vec<Item>, ProviderError> {
        let mut params = Vec::new();
        if let Some(name) = &query.name {
            params.push(("name", name.to_lowercase()));
        }
        if let Some(board_type) = query.board_type {
            params.push(("type", board_type.to_string()));
        }
        if let Some(project) = &query.project {
            params.push(("projectKeyOrId", project.clone()));
        }

        let boards: Vec<Board> = self.get_all_pages(&format!("{}/board", AGILE), &params)?;
        Ok(boards.into_iter().map(Item::from).collect())
    }
}

impl ItemProvider for JiraClient {
    fn fetch_collection(&self, query: &ItemQuery) -> Result<Vec<Item>, ProviderError> {
        match query.kind {
            ItemKind::Filter => self.fetch_filters(query.name.as_deref()),
            ItemKind::Board => self.fetch_boards(query),
        }
    }

    fn fetch_item(&self, kind: ItemKind, id: &str) -> Result<Item, ProviderError> {
        let path = item_path(kind, id);
        let result = match kind {
            ItemKind::Filter => self.get_json::<Filter>(&path, &[]).map(Item::from),
            ItemKind::Board => self.get_json::<Board>(&path, &[]).map(Item::from),
        };
        result.map_err(|e| not_found(e, kind, id))
    }

    fn delete_item(&self, kind: ItemKind, id: &str) -> Result<(), ProviderError> {
        self.delete(&item_path(kind, id))
            .map_err(|e| not_found(e, kind, id))
    }
}

/// REST path of a single filter or board
pub fn item_path(kind: ItemKind, id: &str) -> String {
    let id: String = url::form_urlencoded::byte_serialize(id.as_bytes()).collect();
    match kind {
        ItemKind::Filter => format!("{}/filter/{}", API, id),
        ItemKind::Board => format!("{}/board/{}", AGILE, id),
    }
}

fn not_found(error: ProviderError, kind: ItemKind, id: &str) -> ProviderError {
    match error {
        ProviderError::Http { status: 404, .. } => ProviderError::NotFound {
            kind,
            id: id.to_string(),
        },
        other => other,
    }
}

/// Turn an error response body into a one-line message
pub fn error_message(status: StatusCode, body: &str) -> String {
    if let Some(summary) = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.summary())
    {
        return summary;
    }

    let reason = status.canonical_reason().unwrap_or("Unknown status");
    let text = body.trim();
    if text.is_empty() || text.starts_with('<') {
        return reason.to_string();
    }

    let snippet: String = text.chars().take(200).collect();
    if snippet.len() < text.len() {
        format!("{}: {}...", reason, snippet)
    } else {
        format!("{}: {}", reason, snippet)
    }
}

/// Request pages from offset 0 until one is final or `max_pages` were read
///
/// Returns the collected values and whether the final page was reached.
fn collect_pages<T, E>(
    max_pages: usize,
    mut fetch: impl FnMut(u64) -> Result<Page<T>, E>,
) -> Result<(Vec<T>, bool), E> {
    let mut all = Vec::new();
    let mut start_at: u64 = 0;

    for _ in 0..max_pages {
        let page = fetch(start_at)?;
        let done = page.is_final(start_at);
        start_at += page.values.len() as u64;
        all.extend(page.values);
        if done {
            return Ok((all, true));
        }
    }

    Ok((all, false))
}
