use crate::config::ClientConfig;
use crate::errors::{DeckApiError, Result};
use crate::models::brand_kit::BrandKit;
use crate::models::generation::{GenerateContentRequest, GeneratedContent};
use crate::models::slide::{ReorderRequest, Slide, SlideOrder};
use crate::models::template::Template;
use log::{debug, warn};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Helper struct to attempt parsing the backend's error responses.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
struct ApiErrorBody {
    message: Option<String>,
    error: Option<String>,
    code: Option<String>,
    upgrade_required: bool,
}

impl ApiErrorBody {
    fn is_upgrade(&self) -> bool {
        self.upgrade_required
            || self
                .code
                .as_deref()
                .is_some_and(|c| c.eq_ignore_ascii_case("UPGRADE_REQUIRED"))
    }
}

/// Async client of the pitch-deck backend.
#[derive(Debug, Clone)]
pub struct DeckApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl DeckApiClient {
    /// Builds a client with its own `reqwest::Client`, honouring the configured timeout.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.timeout);
        let http = builder.build()?;
        Ok(Self::with_http_client(config, http))
    }

    /// Builds a client around an existing `reqwest::Client`.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Self {
        DeckApiClient { http, config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| DeckApiError::Config(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| {
                DeckApiError::Config(format!("Base URL cannot take a path: {}", self.config.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let builder = self
            .http
            .request(method, self.url(segments)?)
            .header(ACCEPT, "application/json");
        Ok(match &self.config.api_token {
            Some(token) => builder.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => builder,
        })
    }

    /// Sends the request and deserializes a JSON body on success.
    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(DeckApiError::Network)?;
        let status = response.status();
        if !status.is_success() {
            return Err(error_from_response(status, response).await);
        }

        let bytes = response.bytes().await.map_err(DeckApiError::Network)?;
        serde_json::from_slice::<T>(&bytes).map_err(|e| {
            let snippet = String::from_utf8_lossy(&bytes[..bytes.len().min(500)]);
            warn!(
                "[send_json] Failed to deserialize response: {}. Body starts with: {}",
                e, snippet
            );
            DeckApiError::JsonDeserialization(e)
        })
    }

    /// Sends the request and ignores the body on success.
    async fn send_empty(&self, builder: RequestBuilder) -> Result<()> {
        let response = builder.send().await.map_err(DeckApiError::Network)?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_response(status, response).await)
        }
    }

    /// Lists every template visible to the current user.
    pub async fn list_templates(&self) -> Result<Vec<Template>> {
        self.send_json(self.request(Method::GET, &["api", "templates"])?)
            .await
    }

    /// Fetches one template.
    ///
    /// # Errors
    ///
    /// Returns `DeckApiError::InvalidInput` for an empty id, and the usual API errors.
    pub async fn get_template(&self, template_id: &str) -> Result<Template> {
        require_id("Template ID", template_id)?;
        self.send_json(self.request(Method::GET, &["api", "templates", template_id])?)
            .await
    }

    /// Asks the backend to generate slide content for a template and business profile.
    ///
    /// # Arguments
    ///
    /// * `request` - Template identity, business profile and the template's field layout.
    ///
    /// # Returns
    ///
    /// The generated content; every part of it may be missing.
    pub async fn generate_template_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GeneratedContent> {
        debug!(
            "[generate_template_content] Requesting content for template '{}'",
            request.template_name
        );
        self.send_json(
            self.request(Method::POST, &["api", "generate-template-content"])?
                .json(request),
        )
        .await
    }

    /// Replaces a slide. The body carries the whole slide; the backend keeps the last write.
    pub async fn update_slide(&self, deck_id: &str, slide: &Slide) -> Result<Slide> {
        require_id("Deck ID", deck_id)?;
        require_id("Slide ID", &slide.id)?;
        self.send_json(
            self.request(
                Method::POST,
                &["api", "decks", deck_id, "slides", slide.id.as_str()],
            )?
            .json(slide),
        )
        .await
    }

    /// Stores a new slide order for a deck.
    pub async fn reorder_slides(&self, deck_id: &str, slide_orders: &[SlideOrder]) -> Result<()> {
        require_id("Deck ID", deck_id)?;
        let body = ReorderRequest {
            slide_orders: slide_orders.to_vec(),
        };
        self.send_empty(
            self.request(Method::POST, &["api", "decks", deck_id, "slides", "reorder"])?
                .json(&body),
        )
        .await
    }

    /// Lists brand kits, optionally only those of one project.
    pub async fn list_brand_kits(&self, project_id: Option<&str>) -> Result<Vec<BrandKit>> {
        let mut builder = self.request(Method::GET, &["api", "brand-kits"])?;
        if let Some(project_id) = project_id {
            builder = builder.query(&[("projectId", project_id)]);
        }
        self.send_json(builder).await
    }

    pub async fn get_brand_kit(&self, brand_kit_id: &str) -> Result<BrandKit> {
        require_id("Brand kit ID", brand_kit_id)?;
        self.send_json(self.request(Method::GET, &["api", "brand-kits", brand_kit_id])?)
            .await
    }

    pub async fn create_brand_kit(&self, brand_kit: &BrandKit) -> Result<BrandKit> {
        self.send_json(self.request(Method::POST, &["api", "brand-kits"])?.json(brand_kit))
            .await
    }

    /// Updates a brand kit; `brand_kit.id` selects the record.
    pub async fn update_brand_kit(&self, brand_kit: &BrandKit) -> Result<BrandKit> {
        let id = brand_kit.id.as_deref().unwrap_or_default();
        require_id("Brand kit ID", id)?;
        self.send_json(
            self.request(Method::PUT, &["api", "brand-kits", id])?
                .json(brand_kit),
        )
        .await
    }

    pub async fn delete_brand_kit(&self, brand_kit_id: &str) -> Result<()> {
        require_id("Brand kit ID", brand_kit_id)?;
        self.send_empty(self.request(Method::DELETE, &["api", "brand-kits", brand_kit_id])?)
            .await
    }
}

fn require_id(what: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(DeckApiError::InvalidInput(format!("{} cannot be empty", what)));
    }
    Ok(())
}

/// Maps a non-2xx response onto the error taxonomy.
async fn error_from_response(status: StatusCode, response: reqwest::Response) -> DeckApiError {
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) => return DeckApiError::Network(e),
    };
    api_error(status, &text)
}

fn api_error(status: StatusCode, text: &str) -> DeckApiError {
    let body = serde_json::from_str::<ApiErrorBody>(text).ok();
    let message = body
        .as_ref()
        .and_then(|b| b.message.clone().or_else(|| b.error.clone()))
        .unwrap_or_else(|| format!("API request failed with status {}: {}", status, text));

    let upgrade = body.as_ref().is_some_and(ApiErrorBody::is_upgrade);
    match status {
        StatusCode::UNAUTHORIZED => DeckApiError::Unauthorized(message),
        StatusCode::PAYMENT_REQUIRED => DeckApiError::UpgradeRequired(message),
        StatusCode::FORBIDDEN if upgrade => DeckApiError::UpgradeRequired(message),
        _ => DeckApiError::ApiError { status, message },
    }
}
