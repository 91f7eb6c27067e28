//! Browser `fetch` transport

use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{NetError, SaveScore, ScoreService, endpoint};
use crate::highscores::HighScoreEntry;

fn js_error(value: JsValue) -> NetError {
    NetError::Transport(
        value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value)),
    )
}

/// Issue a request, treating non-2xx responses as errors
async fn send(request: &Request) -> Result<Response, NetError> {
    let window = web_sys::window().ok_or_else(|| NetError::Transport("no window".into()))?;
    let value = JsFuture::from(window.fetch_with_request(request))
        .await
        .map_err(js_error)?;
    let response: Response = value.dyn_into().map_err(js_error)?;
    if !response.ok() {
        return Err(NetError::Status(response.status()));
    }
    Ok(response)
}

/// GET a URL and return the body bytes
pub async fn fetch_bytes(url: &str) -> Result<Vec<u8>, NetError> {
    let request = Request::new_with_str(url).map_err(js_error)?;
    let response = send(&request).await?;
    let buffer = JsFuture::from(response.array_buffer().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    Ok(js_sys::Uint8Array::new(&buffer).to_vec())
}

/// GET a URL and return the body text
async fn fetch_text(url: &str) -> Result<String, NetError> {
    let request = Request::new_with_str(url).map_err(js_error)?;
    let response = send(&request).await?;
    let text = JsFuture::from(response.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    text.as_string()
        .ok_or_else(|| NetError::Payload("response body is not text".into()))
}

/// Score service reached through `window.fetch`
#[derive(Debug, Clone)]
pub struct FetchScoreService {
    base: String,
}

impl FetchScoreService {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl ScoreService for FetchScoreService {
    async fn save_score(&self, body: &SaveScore) -> Result<(), NetError> {
        let json = serde_json::to_string(body)?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_mode(RequestMode::Cors);
        init.set_body(&JsValue::from_str(&json));

        let request = Request::new_with_str_and_init(&endpoint(&self.base, "save_score"), &init)
            .map_err(js_error)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_error)?;

        send(&request).await?;
        Ok(())
    }

    async fn fetch_highscores(&self) -> Result<Vec<HighScoreEntry>, NetError> {
        let text = fetch_text(&endpoint(&self.base, "highscores")).await?;
        Ok(serde_json::from_str(&text)?)
    }
}
