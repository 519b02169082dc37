use crate::domain::entities::Session;
use crate::shared::config::ApiConfig;
use crate::shared::error::AppError;
use chrono::Utc;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// バックエンドの起点 URL と共有 `reqwest::Client` の組。
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    origin: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let origin = api_origin(&config.base_url)?;
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| AppError::ConfigurationError(err.to_string()))?;
        Ok(Self { client, origin })
    }

    pub fn base_url(&self) -> &str {
        &self.origin
    }

    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.endpoint(path);
        debug!(method = %method, url = %url, "sending request");
        self.client.request(method, url)
    }

    /// セッションのトークンを付けたリクエスト。
    ///
    /// トークンが無い・期限切れの場合は何も送らずに失敗する。
    pub fn authorized_request(
        &self,
        method: Method,
        path: &str,
        session: &Session,
    ) -> Result<RequestBuilder, AppError> {
        let token = session.bearer_token(Utc::now())?;
        Ok(self.request(method, path).bearer_auth(token.as_str()))
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.origin, path.trim_start_matches('/'))
    }
}

/// http(s) の URL だけを受け付け、末尾のスラッシュを落として返す。
fn api_origin(raw: &str) -> Result<String, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| AppError::ConfigurationError(format!("Invalid API URL: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::ConfigurationError(format!(
            "Unsupported API URL scheme: {}",
            url.scheme()
        )));
    }
    Ok(url.as_str().trim_end_matches('/').to_owned())
}

/// 送信して 2xx の本文を `T` として読む。それ以外は `AppError::from_http_response`。
pub(crate) async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, AppError> {
    let response = builder
        .send()
        .await
        .map_err(|err| AppError::Network(err.to_string()))?;
    let status = response.status().as_u16();
    let bytes = response
        .bytes()
        .await
        .map_err(|err| AppError::Network(err.to_string()))?;
    if !(200..300).contains(&status) {
        debug!(status, "backend returned an error status");
        return Err(AppError::from_http_response(
            status,
            &String::from_utf8_lossy(&bytes),
        ));
    }
    serde_json::from_slice(&bytes).map_err(|err| AppError::DeserializationError(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.into(),
            user_agent: "stage-explorer-tests".into(),
        })
        .unwrap()
    }

    #[test]
    fn origin_drops_trailing_slash() {
        assert_eq!(
            client(" http://127.0.0.1:8000/ ").base_url(),
            "http://127.0.0.1:8000"
        );
        assert_eq!(
            client("https://api.example.com/v1/").base_url(),
            "https://api.example.com/v1"
        );
    }

    #[test]
    fn non_http_urls_are_configuration_errors() {
        assert!(matches!(
            api_origin("ftp://example.com"),
            Err(AppError::ConfigurationError(_))
        ));
        assert!(api_origin("not a url").is_err());
    }

    #[test]
    fn endpoint_has_exactly_one_separator() {
        let api = client("http://localhost:8000/");
        assert_eq!(
            api.endpoint("/recommendations/3/view"),
            "http://localhost:8000/recommendations/3/view"
        );
        assert_eq!(api.endpoint("token"), "http://localhost:8000/token");
    }

    #[test]
    fn authorized_request_needs_a_token() {
        let api = client("http://localhost:8000");

        let err = api
            .authorized_request(Method::GET, "/preferences", &Session::anonymous())
            .unwrap_err();

        assert!(matches!(err, AppError::MissingToken));
    }
}
