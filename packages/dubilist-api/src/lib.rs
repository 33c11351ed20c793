//! Pure Dubilist REST API client.
//!
//! A minimal client for the Dubilist marketplace backend. Supports auth,
//! listing CRUD, media upload, and attaching uploaded images to listings.
//! Every endpoint wraps its payload in a `{ success, data, ... }` envelope;
//! this client unwraps it and surfaces failures as [`ApiError`].
//!
//! # Example
//!
//! ```rust,ignore
//! use dubilist_api::DubilistClient;
//!
//! let client = DubilistClient::from_env();
//! let auth = client.login("seller@example.com", "hunter2").await?;
//! let client = client.with_token(auth.tokens.access_token);
//!
//! let listing = client.get_listing(42).await?;
//! println!("{}: {} images", listing.title, listing.images.len());
//! ```

pub mod error;
pub mod types;

pub use error::{ApiError, Result};
pub use types::*;

use bytes::Bytes;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "http://localhost:4000/api";

/// HTTP client for the Dubilist backend.
///
/// Cheap to clone; authenticated calls require a bearer token set via
/// [`DubilistClient::with_token`].
#[derive(Clone)]
pub struct DubilistClient {
    http_client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl DubilistClient {
    /// Create a client against the default local backend.
    pub fn new() -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
        }
    }

    /// Create from environment: `DUBILIST_API_URL` (optional, defaults to the
    /// local backend) and `DUBILIST_API_TOKEN` (optional).
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("DUBILIST_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let token = std::env::var("DUBILIST_API_TOKEN").ok();
        Self {
            http_client: reqwest::Client::new(),
            base_url,
            token,
        }
    }

    /// Set a custom base URL (staging, local port overrides, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the bearer token used for authenticated endpoints.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a bearer token is set.
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // ------------------------------------------------------------------
    // Auth
    // ------------------------------------------------------------------

    /// `POST /auth/login`. Returns the user and their token pair.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthData> {
        debug!(email, "Logging in");
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let resp = self
            .http_client
            .post(format!("{}/auth/login", self.base_url))
            .json(&body)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// `POST /auth/register`. Creates an account and returns it logged in.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthData> {
        debug!(email = %req.email, "Registering account");
        let resp = self
            .http_client
            .post(format!("{}/auth/register", self.base_url))
            .json(req)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// `GET /auth/me`. Requires a token.
    pub async fn me(&self) -> Result<User> {
        let resp = self
            .authed(self.http_client.get(format!("{}/auth/me", self.base_url)))?
            .send()
            .await?;
        self.decode(resp).await
    }

    // ------------------------------------------------------------------
    // Listings
    // ------------------------------------------------------------------

    /// `POST /listings`. Creates the listing row and returns its id.
    /// Images are attached separately via [`DubilistClient::add_listing_image`].
    pub async fn create_listing(&self, req: &CreateListingRequest) -> Result<CreatedListing> {
        debug!(title = %req.title, category_id = req.category_id, "Creating listing");
        let resp = self
            .authed(self.http_client.post(format!("{}/listings", self.base_url)))?
            .json(req)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// `GET /listings/{id}`.
    pub async fn get_listing(&self, id: ListingId) -> Result<ListingData> {
        let resp = self
            .http_client
            .get(format!("{}/listings/{}", self.base_url, id))
            .send()
            .await?;
        self.decode(resp).await
    }

    /// `GET /listings` with optional category/page filters.
    pub async fn list_listings(&self, query: &ListingsQuery) -> Result<Vec<ListingData>> {
        let resp = self
            .http_client
            .get(format!("{}/listings", self.base_url))
            .query(query)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// `PUT /listings/{id}`. Absent fields are left untouched.
    pub async fn update_listing(
        &self,
        id: ListingId,
        req: &UpdateListingRequest,
    ) -> Result<ListingData> {
        debug!(listing_id = id, "Updating listing");
        let resp = self
            .authed(
                self.http_client
                    .put(format!("{}/listings/{}", self.base_url, id)),
            )?
            .json(req)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// `DELETE /listings/{id}` (soft delete).
    pub async fn delete_listing(&self, id: ListingId) -> Result<()> {
        debug!(listing_id = id, "Deleting listing");
        let resp = self
            .authed(
                self.http_client
                    .delete(format!("{}/listings/{}", self.base_url, id)),
            )?
            .send()
            .await?;
        self.decode_ack(resp).await
    }

    /// `PATCH /listings/{id}/sold`.
    pub async fn mark_listing_sold(&self, id: ListingId) -> Result<()> {
        debug!(listing_id = id, "Marking listing sold");
        let resp = self
            .authed(
                self.http_client
                    .patch(format!("{}/listings/{}/sold", self.base_url, id)),
            )?
            .send()
            .await?;
        self.decode_ack(resp).await
    }

    // ------------------------------------------------------------------
    // Media
    // ------------------------------------------------------------------

    /// `POST /upload/image`. Multipart upload of one image; `folder` is a
    /// storage path hint ("listings", "logos"). Returns the public URL and
    /// storage key of the stored object.
    pub async fn upload_image(
        &self,
        file_name: &str,
        content_type: &str,
        data: Bytes,
        folder: &str,
    ) -> Result<UploadData> {
        debug!(file_name, content_type, folder, size = data.len(), "Uploading image");
        let part = multipart::Part::stream(data)
            .file_name(file_name.to_string())
            .mime_str(content_type)
            .map_err(|e| ApiError::Config(format!("invalid content type {content_type:?}: {e}")))?;
        let form = multipart::Form::new()
            .part("file", part)
            .text("folder", folder.to_string());

        let resp = self
            .authed(
                self.http_client
                    .post(format!("{}/upload/image", self.base_url)),
            )?
            .multipart(form)
            .send()
            .await?;
        self.decode(resp).await
    }

    /// `POST /listings/{id}/images`. Records an already-uploaded image
    /// against a listing at a given gallery position.
    pub async fn add_listing_image(
        &self,
        listing_id: ListingId,
        req: &AttachImageRequest,
    ) -> Result<()> {
        debug!(
            listing_id,
            order_index = req.order_index,
            is_primary = req.is_primary,
            "Attaching image to listing"
        );
        let resp = self
            .authed(
                self.http_client
                    .post(format!("{}/listings/{}/images", self.base_url, listing_id)),
            )?
            .json(req)
            .send()
            .await?;
        self.decode_ack(resp).await
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn authed(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::RequestBuilder> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| ApiError::Config("no bearer token set; call with_token first".into()))?;
        Ok(builder.bearer_auth(token))
    }

    /// Unwrap an envelope response, requiring a `data` payload.
    async fn decode<T: DeserializeOwned>(&self, resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            // Prefer the envelope's message; non-JSON error pages fall back to raw text.
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .map(|env| env.error_message())
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("invalid response body: {e}")))?;
        if !envelope.success {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: envelope.error_message(),
            });
        }
        envelope
            .data
            .ok_or_else(|| ApiError::Parse("successful envelope missing data".into()))
    }

    /// Unwrap an envelope response where only the success flag matters.
    async fn decode_ack(&self, resp: reqwest::Response) -> Result<()> {
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .map(|env| env.error_message())
                .unwrap_or(body);
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(&body)
            .map_err(|e| ApiError::Parse(format!("invalid response body: {e}")))?;
        if !envelope.success {
            return Err(ApiError::Api {
                status: status.as_u16(),
                message: envelope.error_message(),
            });
        }
        Ok(())
    }
}

impl Default for DubilistClient {
    fn default() -> Self {
        Self::new()
    }
}
