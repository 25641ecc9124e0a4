//! HTTP implementation of [`Backend`] over a blocking `reqwest` client.

use crate::api::endpoint::Endpoint;
use crate::api::reply::{decode_ack, decode_reply};
use crate::api::Backend;
use crate::domain::error::{MailfeedError, Result};
use crate::domain::{
    ComposeDraft, EditReceipt, Email, EmailId, EmailPatch, FollowSummary, FollowToggle,
    LikeSummary, LikeToggle, Mailbox, PostFields, PostId, PostRecord, SendReceipt,
};
use reqwest::blocking::{Client, Request};
use reqwest::header::{HeaderValue, COOKIE};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

/// Backend reached over HTTP.
///
/// Bodies are sent and received as UTF-8 JSON. The optional session cookie is
/// attached to every request so the backend can identify the viewer; the client
/// itself never logs in.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    cookie: Option<HeaderValue>,
    client: Client,
}

impl HttpBackend {
    /// Creates a backend rooted at `base_url`.
    ///
    /// # Parameters
    ///
    /// * `base_url` - Scheme and host (plus optional prefix) of the web application
    /// * `session_cookie` - Raw `Cookie` header value forwarded with each request
    /// * `timeout_secs` - Per-request timeout
    ///
    /// # Errors
    ///
    /// Returns [`MailfeedError::Config`] if the base URL does not parse, the
    /// cookie is not a valid header value, or the client cannot be built.
    pub fn new(base_url: &str, session_cookie: Option<&str>, timeout_secs: u64) -> Result<Self> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| MailfeedError::Config(format!("invalid base_url {base_url}: {e}")))?;

        let cookie = session_cookie
            .map(|cookie| {
                HeaderValue::from_str(cookie)
                    .map_err(|e| MailfeedError::Config(format!("invalid session cookie: {e}")))
            })
            .transpose()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| MailfeedError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base_url,
            cookie,
            client,
        })
    }

    /// Base URL every endpoint is joined onto.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Builds the request for `endpoint`, with `body` serialized as JSON.
    fn request<B: Serialize + ?Sized>(&self, endpoint: &Endpoint, body: Option<&B>) -> Result<Request> {
        let mut request = self
            .client
            .request(endpoint.method.clone(), endpoint.url(&self.base_url)?);
        if let Some(cookie) = &self.cookie {
            request = request.header(COOKIE, cookie.clone());
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        Ok(request.build()?)
    }

    fn call<B: Serialize + ?Sized>(&self, endpoint: &Endpoint, body: Option<&B>) -> Result<(u16, String)> {
        let path = endpoint.path();
        let _span = tracing::debug_span!(
            "http_call",
            method = %endpoint.method,
            path = %path
        )
        .entered();

        let request = self.request(endpoint, body)?;
        let response = self.client.execute(request).map_err(|e| {
            tracing::warn!(error = %e, "request failed before a response arrived");
            MailfeedError::from(e)
        })?;

        let status = response.status().as_u16();
        let text = response.text()?;
        tracing::debug!(status, body_len = text.len(), "response received");

        Ok((status, text))
    }

    fn fetch<T: DeserializeOwned>(&self, endpoint: &Endpoint) -> Result<T> {
        let (status, text) = self.call::<()>(endpoint, None)?;
        decode_reply(&endpoint.path(), status, &text)
    }

    fn submit<B: Serialize + ?Sized, T: DeserializeOwned>(&self, endpoint: &Endpoint, body: &B) -> Result<T> {
        let (status, text) = self.call(endpoint, Some(body))?;
        decode_reply(&endpoint.path(), status, &text)
    }
}

impl Backend for HttpBackend {
    fn list_mailbox(&self, mailbox: Mailbox) -> Result<Vec<Email>> {
        self.fetch(&Endpoint::mailbox(mailbox))
    }

    fn get_email(&self, id: EmailId) -> Result<Email> {
        self.fetch(&Endpoint::email(id))
    }

    fn update_email(&self, id: EmailId, patch: EmailPatch) -> Result<()> {
        let endpoint = Endpoint::update_email(id);
        let (status, text) = self.call(&endpoint, Some(&patch))?;
        decode_ack(&endpoint.path(), status, &text)
    }

    fn send_email(&self, draft: &ComposeDraft) -> Result<SendReceipt> {
        self.submit(&Endpoint::send_email(), draft)
    }

    fn get_post(&self, id: PostId) -> Result<PostRecord> {
        self.fetch(&Endpoint::post_fields(id))
    }

    fn edit_post(&self, id: PostId, fields: &PostFields) -> Result<PostRecord> {
        let receipt: EditReceipt = self.submit(&Endpoint::edit_post(id), fields)?;
        Ok(receipt.post)
    }

    fn get_likes(&self, id: PostId) -> Result<LikeSummary> {
        self.fetch(&Endpoint::likes(id))
    }

    fn toggle_like(&self, id: PostId) -> Result<LikeToggle> {
        self.fetch(&Endpoint::toggle_like(id))
    }

    fn get_follow(&self, username: &str) -> Result<FollowSummary> {
        self.fetch(&Endpoint::follow(username))
    }

    fn toggle_follow(&self, username: &str) -> Result<FollowToggle> {
        self.fetch(&Endpoint::toggle_follow(username))
    }
}
