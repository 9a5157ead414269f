//! Editing state of one slide: the selected template, the live form, and the
//! one-shot content generation that pre-fills it.

use log::{debug, warn};

use crate::client::DeckApiClient;
use crate::errors::Result;
use crate::models::brand_kit::BrandKit;
use crate::models::form::{FieldValue, FormState};
use crate::models::generation::{BusinessProfile, GenerateContentRequest, GeneratedContent};
use crate::models::slide::Slide;
use crate::models::template::Template;
use crate::resolver::{initialize, merge_generated, resolve_template, template_defaults, Resolution};

/// Source of AI-generated slide content.
#[allow(async_fn_in_trait)]
pub trait ContentGenerator {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<GeneratedContent>;
}

impl ContentGenerator for DeckApiClient {
    async fn generate(&self, request: &GenerateContentRequest) -> Result<GeneratedContent> {
        self.generate_template_content(request).await
    }
}

/// Remembers whether content was already requested for the current template.
///
/// The flag is keyed by template id, so switching templates re-arms generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationGuard {
    template_id: Option<String>,
    generated: bool,
}

impl GenerationGuard {
    /// Points the guard at `template_id`, resetting it when the template changed.
    pub fn observe_template(&mut self, template_id: &str) {
        if self.template_id.as_deref() != Some(template_id) {
            self.template_id = Some(template_id.to_string());
            self.generated = false;
        }
    }

    /// Marks generation as started. Returns false if it already was.
    pub fn try_claim(&mut self) -> bool {
        !std::mem::replace(&mut self.generated, true)
    }

    pub fn has_generated(&self) -> bool {
        self.generated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NoBusinessProfile,
    AlreadyGenerated,
    FormHasContent,
}

/// Result of [`EditingSession::generate_content`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Generated content was merged; `fields` form keys were written.
    Merged { fields: usize },
    Skipped(SkipReason),
    /// The generator failed. The form is unchanged and the guard stays claimed.
    Failed,
}

/// Owns the editing state behind the content-customization form.
#[derive(Debug, Clone)]
pub struct EditingSession {
    template: Template,
    form: FormState,
    defaults: FormState,
    brand_kit: Option<BrandKit>,
    project_id: Option<String>,
    guard: GenerationGuard,
    baseline: FormState,
}

impl EditingSession {
    /// Starts editing a fresh application of `template`.
    pub fn new(template: Template, brand_kit: Option<BrandKit>) -> Self {
        let defaults = template_defaults(&template);
        let mut guard = GenerationGuard::default();
        guard.observe_template(&template.id);
        EditingSession {
            form: defaults.clone(),
            baseline: defaults.clone(),
            defaults,
            template,
            brand_kit,
            project_id: None,
            guard,
        }
    }

    /// Reopens a saved slide for editing.
    pub fn reopen(template: Template, slide: &Slide, brand_kit: Option<BrandKit>) -> Self {
        let mut session = Self::new(template, brand_kit);
        session.form = initialize(&session.template, Some(slide));
        session.baseline = session.form.clone();
        session
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn brand_kit(&self) -> Option<&BrandKit> {
        self.brand_kit.as_ref()
    }

    pub fn set_brand_kit(&mut self, brand_kit: Option<BrandKit>) {
        self.brand_kit = brand_kit;
    }

    /// Switches to another template. The form is reseeded from its defaults.
    pub fn set_template(&mut self, template: Template) {
        debug!(
            "[set_template] '{}' -> '{}'",
            self.template.id, template.id
        );
        self.guard.observe_template(&template.id);
        self.defaults = template_defaults(&template);
        self.form = self.defaults.clone();
        self.template = template;
    }

    pub fn form_state(&self) -> &FormState {
        &self.form
    }

    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) {
        self.form.insert(key, value);
    }

    /// Current preview of the slide.
    pub fn resolve(&self) -> Resolution {
        resolve_template(&self.template, &self.form, self.brand_kit.as_ref())
    }

    /// True when the form differs from what was loaded or last saved.
    pub fn has_unsaved_changes(&self) -> bool {
        self.form != self.baseline
    }

    /// The slide to persist: `slide` with this session's template, content and positions.
    pub fn slide_update(&self, slide: &Slide) -> Slide {
        let Resolution {
            content,
            positioned_elements,
        } = self.resolve();
        let mut updated = slide.clone();
        updated.template_id = Some(self.template.id.clone());
        updated.content = content;
        updated.positioned_elements = positioned_elements;
        if updated.styling.logo_url.is_none() {
            updated.styling.logo_url = self
                .brand_kit
                .as_ref()
                .and_then(BrandKit::logo)
                .map(str::to_string);
        }
        updated
    }

    /// Requests generated content once per template and merges it into the form.
    ///
    /// Skipped without a business profile, after an earlier attempt for the same
    /// template, or once the user has typed anything. Failures are logged, never
    /// returned.
    pub async fn generate_content<G: ContentGenerator>(
        &mut self,
        generator: &G,
        business_profile: Option<&BusinessProfile>,
    ) -> GenerationOutcome {
        let Some(profile) = business_profile else {
            return GenerationOutcome::Skipped(SkipReason::NoBusinessProfile);
        };
        if self.guard.has_generated() {
            return GenerationOutcome::Skipped(SkipReason::AlreadyGenerated);
        }
        if self.form.has_meaningful_values(&self.defaults) {
            return GenerationOutcome::Skipped(SkipReason::FormHasContent);
        }
        // Claimed before the first await.
        if !self.guard.try_claim() {
            return GenerationOutcome::Skipped(SkipReason::AlreadyGenerated);
        }

        let request = GenerateContentRequest::for_template(
            &self.template,
            profile.clone(),
            self.project_id.clone(),
        );
        match generator.generate(&request).await {
            Ok(generated) => {
                let fields = merge_generated(&self.template, &mut self.form, &generated);
                debug!(
                    "[generate_content] Merged {} fields into template '{}'",
                    fields, self.template.id
                );
                GenerationOutcome::Merged { fields }
            }
            Err(e) => {
                warn!(
                    "[generate_content] Generation failed for template '{}': {}",
                    self.template.id, e
                );
                GenerationOutcome::Failed
            }
        }
    }

    /// Persists the current state onto `slide` and returns the stored slide.
    pub async fn save(&mut self, client: &DeckApiClient, deck_id: &str, slide: &Slide) -> Result<Slide> {
        let update = self.slide_update(slide);
        let saved = client.update_slide(deck_id, &update).await?;
        self.baseline = self.form.clone();
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DeckApiError;
    use serde_json::json;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct FakeGenerator {
        calls: Cell<usize>,
        fail: bool,
        last_request: RefCell<Option<GenerateContentRequest>>,
    }

    impl ContentGenerator for FakeGenerator {
        async fn generate(&self, request: &GenerateContentRequest) -> Result<GeneratedContent> {
            self.calls.set(self.calls.get() + 1);
            *self.last_request.borrow_mut() = Some(request.clone());
            if self.fail {
                return Err(DeckApiError::InvalidInput("generator offline".to_string()));
            }
            Ok(GeneratedContent {
                title: Some("Acme Rockets".to_string()),
                bullets: vec!["Reusable".to_string()],
                ..Default::default()
            })
        }
    }

    fn template(id: &str) -> Template {
        serde_json::from_value(json!({
            "id": id,
            "name": "Cover",
            "category": "cover",
            "layout": { "elements": [
                { "id": "t1", "type": "text", "config": { "label": "Title", "defaultValue": "Your title" },
                  "zone": { "x": 10, "y": 10, "width": 80, "height": 20 } },
                { "id": "b1", "type": "text", "config": { "label": "Bullet" } }
            ]}
        }))
        .unwrap()
    }

    fn profile() -> BusinessProfile {
        BusinessProfile {
            company_name: Some("Acme".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_guard_resets_on_template_change() {
        let mut guard = GenerationGuard::default();
        guard.observe_template("a");
        assert!(guard.try_claim());
        assert!(!guard.try_claim());
        guard.observe_template("a");
        assert!(guard.has_generated());
        guard.observe_template("b");
        assert!(!guard.has_generated());
    }

    #[tokio::test]
    async fn test_generates_at_most_once_per_template() {
        let generator = FakeGenerator::default();
        let mut session = EditingSession::new(template("cover"), None).with_project_id("p1");

        let first = session.generate_content(&generator, Some(&profile())).await;
        let second = session.generate_content(&generator, Some(&profile())).await;

        assert_eq!(first, GenerationOutcome::Merged { fields: 2 });
        assert_eq!(second, GenerationOutcome::Skipped(SkipReason::AlreadyGenerated));
        assert_eq!(generator.calls.get(), 1);
        assert_eq!(session.form_state().get_text("t1"), Some("Acme Rockets"));
        assert_eq!(session.form_state().get_text("b1"), Some("Reusable"));
        let request = generator.last_request.borrow().clone().unwrap();
        assert_eq!(request.project_id.as_deref(), Some("p1"));
        assert_eq!(request.template_category, "cover");

        session.set_template(template("other"));
        let third = session.generate_content(&generator, Some(&profile())).await;
        assert_eq!(third, GenerationOutcome::Merged { fields: 2 });
        assert_eq!(generator.calls.get(), 2);
    }

    #[tokio::test]
    async fn test_skips_without_profile_or_with_user_content() {
        let generator = FakeGenerator::default();
        let mut session = EditingSession::new(template("cover"), None);

        assert_eq!(
            session.generate_content(&generator, None).await,
            GenerationOutcome::Skipped(SkipReason::NoBusinessProfile)
        );

        session.set_field("b1", "Typed by hand");
        assert_eq!(
            session.generate_content(&generator, Some(&profile())).await,
            GenerationOutcome::Skipped(SkipReason::FormHasContent)
        );
        assert_eq!(generator.calls.get(), 0);
    }

    #[tokio::test]
    async fn test_failure_is_swallowed() {
        let generator = FakeGenerator {
            fail: true,
            ..Default::default()
        };
        let mut session = EditingSession::new(template("cover"), None);

        let outcome = session.generate_content(&generator, Some(&profile())).await;

        assert_eq!(outcome, GenerationOutcome::Failed);
        assert_eq!(session.form_state().get_text("t1"), Some("Your title"));
        assert!(!session.has_unsaved_changes());
        assert_eq!(
            session.generate_content(&generator, Some(&profile())).await,
            GenerationOutcome::Skipped(SkipReason::AlreadyGenerated)
        );
    }

    #[test]
    fn test_slide_update() {
        let brand_kit = BrandKit {
            name: "Acme".to_string(),
            logo_url: Some("https://cdn/logo.png".to_string()),
            ..Default::default()
        };
        let mut session = EditingSession::new(template("cover"), Some(brand_kit));
        session.set_field("t1", "Hello");
        assert!(session.has_unsaved_changes());

        let slide = Slide {
            id: "s1".to_string(),
            order: 3,
            ..Default::default()
        };
        let updated = session.slide_update(&slide);

        assert_eq!(updated.id, "s1");
        assert_eq!(updated.order, 3);
        assert_eq!(updated.template_id.as_deref(), Some("cover"));
        assert_eq!(updated.content.titles, vec!["Hello"]);
        assert!(updated.positioned_elements.contains_key("title"));
        assert_eq!(updated.styling.logo_url.as_deref(), Some("https://cdn/logo.png"));
        assert_eq!(slide.content.titles, Vec::<String>::new());
    }

    #[test]
    fn test_reopen_keeps_saved_content() {
        let saved = Slide {
            id: "s1".to_string(),
            content: serde_json::from_value(json!({ "titles": ["Saved"], "title": "Saved" }))
                .unwrap(),
            ..Default::default()
        };
        let session = EditingSession::reopen(template("cover"), &saved, None);

        assert_eq!(session.form_state().get_text("t1"), Some("Saved"));
        assert!(!session.has_unsaved_changes());
    }
}
