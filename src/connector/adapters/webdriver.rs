//! W3C WebDriver client speaking JSON over HTTP.

use crate::connector::{
    domain::Locator,
    ports::{BrowserDriver, BrowserError, BrowserResult, BrowserSession},
};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::{Value, json};

/// Key under which WebDriver returns element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Error code returned when a lookup matches nothing.
const NO_SUCH_ELEMENT: &str = "no such element";

/// Browser driver talking to a WebDriver endpoint such as `chromedriver`.
#[derive(Debug, Clone)]
pub struct WebDriverClient {
    http: Client,
    endpoint: String,
    capabilities: Value,
}

impl WebDriverClient {
    /// Creates a client for the WebDriver server at `endpoint`, requesting a
    /// Chrome session.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into().trim_end_matches('/').to_owned(),
            capabilities: json!({ "browserName": "chrome" }),
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> BrowserResult<Value> {
        let url = format!("{}{path}", self.endpoint);
        let mut request = self.http.request(method, &url);
        if let Some(payload) = body {
            request = request.json(&payload);
        }
        let response = request.send().await.map_err(BrowserError::transport)?;
        let status = response.status();
        let document: Value = response.json().await.map_err(BrowserError::transport)?;
        decode_response(status.is_success(), document)
    }

    async fn find(&self, session: &BrowserSession, locator: &Locator) -> BrowserResult<String> {
        let path = format!("/session/{session}/element");
        let value = self
            .send(Method::POST, &path, Some(locator_body(locator)))
            .await
            .map_err(|err| not_found_as(err, locator))?;
        element_id(&value).ok_or_else(|| BrowserError::ElementNotFound(locator.clone()))
    }
}

fn locator_body(locator: &Locator) -> Value {
    json!({ "using": locator.strategy(), "value": locator.expression() })
}

fn not_found_as(err: BrowserError, locator: &Locator) -> BrowserError {
    match err {
        BrowserError::Protocol { ref code, .. } if code == NO_SUCH_ELEMENT => {
            BrowserError::ElementNotFound(locator.clone())
        }
        other => other,
    }
}

/// Unwraps the `value` member of a WebDriver response.
fn decode_response(success: bool, document: Value) -> BrowserResult<Value> {
    let mut object = match document {
        Value::Object(map) => map,
        other => {
            return Err(BrowserError::Protocol {
                code: "invalid response".to_owned(),
                message: other.to_string(),
            });
        }
    };
    let value = object.remove("value").unwrap_or(Value::Null);
    let error_code = value.get("error").and_then(Value::as_str);
    match (success, error_code) {
        (true, None) => Ok(value),
        (_, code) => Err(BrowserError::Protocol {
            code: code.unwrap_or("unknown error").to_owned(),
            message: value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_owned(),
        }),
    }
}

fn element_id(value: &Value) -> Option<String> {
    value.get(ELEMENT_KEY).and_then(Value::as_str).map(str::to_owned)
}

#[async_trait]
impl BrowserDriver for WebDriverClient {
    async fn open_session(&self) -> BrowserResult<BrowserSession> {
        let body = json!({ "capabilities": { "alwaysMatch": self.capabilities } });
        let value = self.send(Method::POST, "/session", Some(body)).await?;
        value
            .get("sessionId")
            .and_then(Value::as_str)
            .map(BrowserSession::new)
            .ok_or_else(|| BrowserError::Protocol {
                code: "invalid response".to_owned(),
                message: "new session response carries no sessionId".to_owned(),
            })
    }

    async fn navigate(&self, session: &BrowserSession, url: &str) -> BrowserResult<()> {
        let path = format!("/session/{session}/url");
        self.send(Method::POST, &path, Some(json!({ "url": url })))
            .await
            .map(drop)
    }

    async fn add_cookie(
        &self,
        session: &BrowserSession,
        name: &str,
        value: &str,
    ) -> BrowserResult<()> {
        let path = format!("/session/{session}/cookie");
        let body = json!({ "cookie": { "name": name, "value": value } });
        self.send(Method::POST, &path, Some(body)).await.map(drop)
    }

    async fn click(&self, session: &BrowserSession, locator: &Locator) -> BrowserResult<()> {
        let element = self.find(session, locator).await?;
        let path = format!("/session/{session}/element/{element}/click");
        self.send(Method::POST, &path, Some(json!({}))).await.map(drop)
    }

    async fn fill(&self, session: &BrowserSession, locator: &Locator, text: &str) -> BrowserResult<()> {
        let element = self.find(session, locator).await?;
        let clear = format!("/session/{session}/element/{element}/clear");
        self.send(Method::POST, &clear, Some(json!({}))).await?;
        let value = format!("/session/{session}/element/{element}/value");
        self.send(Method::POST, &value, Some(json!({ "text": text })))
            .await
            .map(drop)
    }

    async fn is_present(&self, session: &BrowserSession, locator: &Locator) -> BrowserResult<bool> {
        let path = format!("/session/{session}/elements");
        let value = self
            .send(Method::POST, &path, Some(locator_body(locator)))
            .await?;
        Ok(value.as_array().is_some_and(|elements| !elements.is_empty()))
    }

    async fn attribute(
        &self,
        session: &BrowserSession,
        locator: &Locator,
        name: &str,
    ) -> BrowserResult<Option<String>> {
        let element = self.find(session, locator).await?;
        let path = format!("/session/{session}/element/{element}/attribute/{name}");
        let value = self.send(Method::GET, &path, None).await?;
        Ok(value.as_str().map(str::to_owned))
    }

    async fn close_session(&self, session: &BrowserSession) -> BrowserResult<()> {
        let path = format!("/session/{session}");
        self.send(Method::DELETE, &path, None).await.map(drop)
    }
}
