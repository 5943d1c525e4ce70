use crate::domain::{
    errors::{HistoryError, HistoryResult, IndicatorError, IndicatorResult},
    history::{HistoryPage, HistoryQuery, HistoryRecord, HistoryRepository},
    indicators::{IndicatorRepository, IndicatorRequest, IndicatorResponse},
    logging::{LogComponent, get_logger},
};
use gloo_net::http::{Request, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Error body returned by the API on non-2xx responses
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Browser `fetch` client for the market-data and prompt-history endpoints
#[derive(Debug, Clone, Default)]
pub struct DashboardHttpClient {
    base_url: String,
}

impl DashboardHttpClient {
    pub fn new(base_url: &str) -> Self {
        Self { base_url: base_url.trim_end_matches('/').to_string() }
    }

    pub fn indicator_url(&self, request: &IndicatorRequest) -> String {
        let mut url = format!(
            "{}/api/market/indicators/{}/{}?",
            self.base_url,
            request.kind.endpoint(),
            urlencoding::encode(request.symbol.value())
        );
        if let Some(period) = request.effective_period() {
            url.push_str(&format!("timePeriod={}&", period));
        }
        url.push_str(&format!(
            "interval={}&seriesType={}",
            urlencoding::encode(&request.interval),
            urlencoding::encode(&request.series_type)
        ));
        url
    }

    pub fn history_page_url(&self, query: &HistoryQuery) -> String {
        let mut url = format!(
            "{}/api/prompts/history/paginated?page={}&size={}&sort={}",
            self.base_url,
            query.page,
            query.size,
            query.sort.as_ref()
        );
        if let Some(prompt_type) = &query.prompt_type {
            url.push_str(&format!("&promptType={}", urlencoding::encode(prompt_type)));
        }
        url
    }

    pub fn history_record_url(&self, id: i64) -> String {
        format!("{}/api/prompts/history/{}", self.base_url, id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, String> {
        get_logger().debug(LogComponent::Infrastructure("HttpClient"), &format!("GET {}", url));

        let response = Request::get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| format!("Failed to send request: {}", e))?;

        if !response.ok() {
            return Err(Self::read_error(response).await);
        }

        response.json::<T>().await.map_err(|e| format!("Failed to parse JSON: {}", e))
    }

    /// Same fallback chain as the server's web client: `message` from the JSON
    /// body, then the status text, then `HTTP <code>: <text>`
    async fn read_error(response: Response) -> String {
        let status = response.status();
        let status_text = response.status_text();
        let body = response.json::<ErrorBody>().await.ok();
        error_message(status, &status_text, body.and_then(|b| b.message).as_deref())
    }
}

/// Message shown for a failed request
pub fn error_message(status: u16, status_text: &str, message: Option<&str>) -> String {
    match message.filter(|m| !m.is_empty()) {
        Some(message) => message.to_string(),
        None if !status_text.is_empty() => status_text.to_string(),
        None => format!("HTTP {}: {}", status, status_text),
    }
}

impl IndicatorRepository for DashboardHttpClient {
    async fn fetch_indicator(&self, request: &IndicatorRequest) -> IndicatorResult<IndicatorResponse> {
        let url = self.indicator_url(request);
        self.get_json::<IndicatorResponse>(&url).await.map_err(|e| {
            get_logger().error(
                LogComponent::Infrastructure("HttpClient"),
                &format!("indicator {} for {} failed: {}", request.kind, request.symbol, e),
            );
            IndicatorError::FetchFailed(e)
        })
    }
}

impl HistoryRepository for DashboardHttpClient {
    async fn fetch_page(&self, query: &HistoryQuery) -> HistoryResult<HistoryPage> {
        let url = self.history_page_url(query);
        self.get_json::<HistoryPage>(&url).await.map_err(HistoryError::FetchFailed)
    }

    async fn fetch_record(&self, id: i64) -> HistoryResult<HistoryRecord> {
        let url = self.history_record_url(id);
        self.get_json::<HistoryRecord>(&url).await.map_err(HistoryError::FetchFailed)
    }

    /// 204 No Content and any other 2xx count as success
    async fn delete_record(&self, id: i64) -> HistoryResult<()> {
        let url = self.history_record_url(id);
        get_logger().info(LogComponent::Infrastructure("HttpClient"), &format!("DELETE {}", url));

        let response = Request::delete(&url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(|e| HistoryError::FetchFailed(format!("Failed to send request: {}", e)))?;

        if !response.ok() {
            return Err(HistoryError::FetchFailed(Self::read_error(response).await));
        }
        Ok(())
    }
}
