//! REST endpoints consumed by the client.
//!
//! Every call the two applications make is listed here once, as a method plus
//! path segments relative to the configured base URL. Segments are
//! percent-encoded when the URL is built, so a username can never change the
//! route.

use crate::domain::error::{MailfeedError, Result};
use crate::domain::{EmailId, Mailbox, PostId};
use reqwest::{Method, Url};

/// A backend endpoint: HTTP method and path segments relative to the base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    segments: Vec<String>,
}

impl Endpoint {
    fn new<const N: usize>(method: Method, segments: [&str; N]) -> Self {
        Self {
            method,
            segments: segments.iter().map(ToString::to_string).collect(),
        }
    }

    /// `GET emails/{mailbox}`
    #[must_use]
    pub fn mailbox(mailbox: Mailbox) -> Self {
        Self::new(Method::GET, ["emails", mailbox.as_str()])
    }

    /// `GET emails/{id}`
    #[must_use]
    pub fn email(id: EmailId) -> Self {
        Self::new(Method::GET, ["emails", &id.to_string()])
    }

    /// `PUT emails/{id}`
    #[must_use]
    pub fn update_email(id: EmailId) -> Self {
        Self::new(Method::PUT, ["emails", &id.to_string()])
    }

    /// `POST emails`
    #[must_use]
    pub fn send_email() -> Self {
        Self::new(Method::POST, ["emails"])
    }

    /// `GET posts/edit/{id}`
    #[must_use]
    pub fn post_fields(id: PostId) -> Self {
        Self::new(Method::GET, ["posts", "edit", &id.to_string()])
    }

    /// `POST posts/edit/{id}`
    #[must_use]
    pub fn edit_post(id: PostId) -> Self {
        Self::new(Method::POST, ["posts", "edit", &id.to_string()])
    }

    /// `GET posts/like/{id}`
    #[must_use]
    pub fn likes(id: PostId) -> Self {
        Self::new(Method::GET, ["posts", "like", &id.to_string()])
    }

    /// `PUT posts/like/{id}`
    #[must_use]
    pub fn toggle_like(id: PostId) -> Self {
        Self::new(Method::PUT, ["posts", "like", &id.to_string()])
    }

    /// `GET profile/{username}/follow`
    #[must_use]
    pub fn follow(username: &str) -> Self {
        Self::new(Method::GET, ["profile", username, "follow"])
    }

    /// `PUT profile/{username}/follow`
    #[must_use]
    pub fn toggle_follow(username: &str) -> Self {
        Self::new(Method::PUT, ["profile", username, "follow"])
    }

    /// Unencoded path, used in logs and error messages.
    #[must_use]
    pub fn path(&self) -> String {
        self.segments.join("/")
    }

    /// Appends the endpoint's segments to the path of `base`.
    ///
    /// # Example
    ///
    /// ```
    /// use mailfeed::api::Endpoint;
    /// use reqwest::Url;
    ///
    /// let base = Url::parse("http://localhost:8000/app")?;
    /// let url = Endpoint::follow("ann/lee").url(&base)?;
    /// assert_eq!(url.as_str(), "http://localhost:8000/app/profile/ann%2Flee/follow");
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`MailfeedError::Config`] if `base` cannot carry a path
    /// (e.g. `mailto:` URLs).
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| MailfeedError::Config(format!("base_url cannot carry a path: {base}")))?
            .pop_if_empty()
            .extend(&self.segments);
        Ok(url)
    }
}
