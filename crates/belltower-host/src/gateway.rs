use belltower_bridge::{
    config::Config,
    gateway::{GatewayError, NotificationGateway},
    record::{MarkReadResponse, NotificationRecord},
};
use futures_util::{FutureExt, future::BoxFuture};
use reqwest::Url;
use serde::{Deserialize, de::DeserializeOwned};

/// Resource that stores notification records on the host platform.
const NOTIFICATION_RESOURCE: &str = "Notification Log";

const RECORD_FIELDS: [&str; 5] = [
    "name",
    "subject",
    "document_type",
    "document_name",
    "creation",
];

/// Envelope of resource list responses.
#[derive(Debug, Deserialize)]
struct ResourceList<T> {
    data: Vec<T>,
}

/// Envelope of whitelisted method responses.
#[derive(Debug, Deserialize)]
struct MethodResponse<T> {
    message: T,
}

fn to_request_error(error: reqwest::Error) -> GatewayError {
    GatewayError::Request(error.without_url().to_string())
}

/// [`NotificationGateway`] backed by the host platform's REST API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: reqwest::Client,
    resource_url: Url,
    mark_read_url: Url,
}

impl HttpGateway {
    pub fn new(client: reqwest::Client, config: &Config) -> Result<Self, GatewayError> {
        let mut site = config.site_url.trim().to_string();
        if !site.ends_with('/') {
            site.push('/');
        }
        let site = Url::parse(&site).map_err(|error| GatewayError::InvalidUrl(error.to_string()))?;

        let join = |path: String| {
            site.join(&path)
                .map_err(|error| GatewayError::InvalidUrl(error.to_string()))
        };
        Ok(Self {
            client,
            resource_url: join(format!("api/resource/{NOTIFICATION_RESOURCE}"))?,
            mark_read_url: join(format!("api/method/{}", config.mark_read_method))?,
        })
    }

    pub fn resource_url(&self) -> &Url {
        &self.resource_url
    }

    pub fn mark_read_url(&self) -> &Url {
        &self.mark_read_url
    }

    /// Query parameters selecting the unread records of `principal`, newest first.
    pub fn unread_query(principal: &str, limit: usize) -> Vec<(&'static str, String)> {
        let filters = serde_json::json!([
            ["for_user", "=", principal],
            ["read", "=", 0],
        ]);
        vec![
            ("fields", serde_json::json!(RECORD_FIELDS).to_string()),
            ("filters", filters.to_string()),
            ("order_by", "creation desc".to_string()),
            ("limit_page_length", limit.to_string()),
        ]
    }

    async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, GatewayError> {
        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }
        let body = response.text().await.map_err(to_request_error)?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn fetch(&self, principal: &str, limit: usize) -> Result<Vec<NotificationRecord>, GatewayError> {
        let response = self
            .client
            .get(self.resource_url.clone())
            .query(&Self::unread_query(principal, limit))
            .send()
            .await
            .map_err(to_request_error)?;

        let list: ResourceList<NotificationRecord> = Self::read_body(response).await?;
        log::debug!("Fetched {} unread notification(s) for {principal}", list.data.len());
        Ok(list.data)
    }

    async fn mark(&self, id: &str) -> Result<MarkReadResponse, GatewayError> {
        let response = self
            .client
            .post(self.mark_read_url.clone())
            .form(&[("log_name", id)])
            .send()
            .await
            .map_err(to_request_error)?;

        let reply: MethodResponse<MarkReadResponse> = Self::read_body(response).await?;
        Ok(reply.message)
    }
}

impl NotificationGateway for HttpGateway {
    fn fetch_unread<'a>(
        &'a self,
        principal: &'a str,
        limit: usize,
    ) -> BoxFuture<'a, Result<Vec<NotificationRecord>, GatewayError>> {
        self.fetch(principal, limit).boxed()
    }

    fn mark_as_read<'a>(
        &'a self,
        id: &'a str,
    ) -> BoxFuture<'a, Result<MarkReadResponse, GatewayError>> {
        self.mark(id).boxed()
    }
}
