//! REST client for the external document store.
//!
//! Two operations: query the task database for pages dated today, and
//! append a session annotation to a task page. The base URL is injected
//! through config so tests can point the client at a local mock server.

use std::time::Duration;

use chrono_tz::Tz;
use focusboard_core::task::{TaskId, TaskRecord};
use serde::Deserialize;

use crate::config::GatewayConfig;

/// Version header the store API requires on every call.
const STORE_API_VERSION: &str = "2022-06-28";

/// Database property holding the page's scheduled date.
const DATE_PROPERTY: &str = "日期";

/// Title shown for pages with an empty or missing title property.
const DEFAULT_NAME: &str = "無標題";

/// Category assumed for pages with an empty or missing select property.
const DEFAULT_CATEGORY: &str = "個人";

/// Errors from document-store calls.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request could not be sent or the response body read.
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status.
    #[error("store returned {status}: {body}")]
    Status {
        /// HTTP status of the response.
        status: reqwest::StatusCode,
        /// Response body, for the error log.
        body: String,
    },
}

/// Client for the document store's REST API.
#[derive(Debug, Clone)]
pub struct DocumentStore {
    client: reqwest::Client,
    base_url: String,
    token: String,
    database_id: String,
    timezone: Tz,
}

impl DocumentStore {
    /// Builds a client from the resolved gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Request` if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(config: &GatewayConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            client,
            base_url: config.store_base_url.trim_end_matches('/').to_string(),
            token: config.store_token.clone(),
            database_id: config.database_id.clone(),
            timezone: config.timezone,
        })
    }

    /// Queries the task database for pages whose date property equals today
    /// in the configured timezone, mapped to task records.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the request fails, the store answers with a
    /// non-success status, or the response body is not the expected shape.
    pub async fn fetch_today_tasks(&self) -> Result<Vec<TaskRecord>, StoreError> {
        let today = self.today();
        tracing::debug!(database_id = %self.database_id, date = %today, "querying task database");

        let url = format!("{}/v1/databases/{}/query", self.base_url, self.database_id);
        let body = serde_json::json!({
            "filter": {
                "property": DATE_PROPERTY,
                "date": { "equals": today },
            },
        });

        let response = self
            .request(reqwest::Method::POST, &url)
            .json(&body)
            .send()
            .await?;
        let response = check(response).await?;
        let query: QueryResponse = response.json().await?;
        Ok(query.results.into_iter().map(map_page).collect())
    }

    /// Appends a timestamped session annotation to a task page as a
    /// bulleted list item.
    ///
    /// When the page already has content, the note is inserted after the
    /// first block so repeated sessions stack newest-first right under the
    /// page's first line.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if listing the page's blocks or appending the
    /// annotation fails.
    pub async fn append_session_note(&self, task_id: &TaskId) -> Result<(), StoreError> {
        let note = self.session_note();
        let url = format!("{}/v1/blocks/{}/children", self.base_url, task_id);

        let response = self
            .request(reqwest::Method::GET, &url)
            .query(&[("page_size", "1")])
            .send()
            .await?;
        let response = check(response).await?;
        let children: ChildrenResponse = response.json().await?;
        let after = children.results.first().map(|block| block.id.clone());

        tracing::debug!(task_id = %task_id, after = ?after, "appending session note");

        let mut body = serde_json::json!({
            "children": [{
                "object": "block",
                "type": "bulleted_list_item",
                "bulleted_list_item": {
                    "rich_text": [{
                        "type": "text",
                        "text": { "content": note },
                    }],
                },
            }],
        });
        if let Some(first_block) = after {
            body["after"] = serde_json::Value::String(first_block);
        }

        let response = self
            .request(reqwest::Method::PATCH, &url)
            .json(&body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// Request builder with the store's auth and version headers attached.
    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", STORE_API_VERSION)
    }

    /// Today's date in the configured timezone, `YYYY-MM-DD`.
    fn today(&self) -> String {
        chrono::Utc::now()
            .with_timezone(&self.timezone)
            .format("%Y-%m-%d")
            .to_string()
    }

    /// Annotation text for one finished focus session, stamped in the
    /// configured timezone.
    fn session_note(&self) -> String {
        let now = chrono::Utc::now().with_timezone(&self.timezone);
        format!("🍅 {} 成功完成 1 個番茄鐘", now.format("%Y-%m-%d %H:%M:%S"))
    }
}

/// Passes through success responses, turning any other status into
/// [`StoreError::Status`] with the body preserved for the log.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StoreError::Status { status, body })
}

// ---------------------------------------------------------------------------
// Store response shapes (only the fields the gateway reads)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Page>,
}

#[derive(Debug, Deserialize)]
struct Page {
    id: String,
    #[serde(default)]
    url: String,
    #[serde(default)]
    properties: PageProperties,
}

#[derive(Debug, Default, Deserialize)]
struct PageProperties {
    #[serde(rename = "名稱")]
    name: Option<TitleProperty>,
    #[serde(rename = "分類")]
    category: Option<SelectProperty>,
    #[serde(rename = "達成")]
    completed: Option<CheckboxProperty>,
}

#[derive(Debug, Deserialize)]
struct TitleProperty {
    #[serde(default)]
    title: Vec<RichTextFragment>,
}

#[derive(Debug, Deserialize)]
struct RichTextFragment {
    #[serde(default)]
    plain_text: String,
}

#[derive(Debug, Deserialize)]
struct SelectProperty {
    select: Option<SelectValue>,
}

#[derive(Debug, Deserialize)]
struct SelectValue {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct CheckboxProperty {
    #[serde(default)]
    checkbox: bool,
}

#[derive(Debug, Deserialize)]
struct ChildrenResponse {
    #[serde(default)]
    results: Vec<BlockStub>,
}

#[derive(Debug, Deserialize)]
struct BlockStub {
    id: String,
}

/// Maps a store page to a task record, applying the display defaults for
/// empty or missing title and category properties.
fn map_page(page: Page) -> TaskRecord {
    let props = page.properties;
    let name = props
        .name
        .map(|property| property.title)
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|fragment| fragment.plain_text)
        .filter(|text| !text.is_empty())
        .unwrap_or_else(|| DEFAULT_NAME.to_string());
    let category = props
        .category
        .and_then(|property| property.select)
        .map(|value| value.name)
        .filter(|label| !label.is_empty())
        .unwrap_or_else(|| DEFAULT_CATEGORY.to_string());
    let completed = props.completed.is_some_and(|property| property.checkbox);

    TaskRecord {
        id: TaskId::new(page.id),
        url: page.url,
        name,
        category,
        completed,
    }
}
