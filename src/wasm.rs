//! JavaScript bindings. Every export takes and returns JSON strings.

use serde_json::json;
use wasm_bindgen::prelude::*;

use crate::errors::{DeckApiError, Result};
use crate::models::brand_kit::BrandKit;
use crate::models::elements::LayoutElement;
use crate::models::form::FormState;
use crate::models::slide::Slide;
use crate::models::template::Template;
use crate::resolver::{initialize, resolve_template, DEFAULT_RULES};

fn to_js_error(err: DeckApiError) -> JsError {
    JsError::new(&err.to_string())
}

/// Installs the logger (browser console on wasm) and the panic hook.
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    let _ = console_log::init_with_level(log::Level::Debug);
    #[cfg(not(target_arch = "wasm32"))]
    let _ = env_logger::try_init();
}

/// Resolves a template against a form state; returns `{content, positionedElements}`.
#[wasm_bindgen(js_name = resolveSlide)]
pub fn resolve_slide(
    template_json: &str,
    form_json: &str,
    brand_kit_json: Option<String>,
) -> std::result::Result<String, JsError> {
    resolve_slide_json(template_json, form_json, brand_kit_json.as_deref()).map_err(to_js_error)
}

/// Initial form state for a template, optionally rebuilt from a saved slide.
#[wasm_bindgen(js_name = initializeForm)]
pub fn initialize_form(
    template_json: &str,
    slide_json: Option<String>,
) -> std::result::Result<String, JsError> {
    initialize_form_json(template_json, slide_json.as_deref()).map_err(to_js_error)
}

/// Classifies one layout element; returns `{category, role, ruleVersion}`.
#[wasm_bindgen(js_name = classifyElement)]
pub fn classify_element(element_json: &str) -> std::result::Result<String, JsError> {
    classify_element_json(element_json).map_err(to_js_error)
}

pub(crate) fn resolve_slide_json(
    template_json: &str,
    form_json: &str,
    brand_kit_json: Option<&str>,
) -> Result<String> {
    let template: Template = serde_json::from_str(template_json)?;
    let form: FormState = serde_json::from_str(form_json)?;
    let brand_kit: Option<BrandKit> = brand_kit_json
        .filter(|s| !s.trim().is_empty())
        .map(serde_json::from_str)
        .transpose()?;

    let resolution = resolve_template(&template, &form, brand_kit.as_ref());
    let mut out = serde_json::Map::new();
    out.insert("content".to_string(), serde_json::to_value(&resolution.content)?);
    out.insert(
        "positionedElements".to_string(),
        serde_json::to_value(&resolution.positioned_elements)?,
    );
    Ok(serde_json::to_string(&out)?)
}

pub(crate) fn initialize_form_json(template_json: &str, slide_json: Option<&str>) -> Result<String> {
    let template: Template = serde_json::from_str(template_json)?;
    let slide: Option<Slide> = slide_json
        .filter(|s| !s.trim().is_empty())
        .map(serde_json::from_str)
        .transpose()?;
    Ok(serde_json::to_string(&initialize(&template, slide.as_ref()))?)
}

pub(crate) fn classify_element_json(element_json: &str) -> Result<String> {
    let element: LayoutElement = serde_json::from_str(element_json)?;
    let role = DEFAULT_RULES.classify_role(&element);
    Ok(json!({
        "category": DEFAULT_RULES.classify(&element).as_str(),
        "role": role.map(|r| r.as_str()),
        "ruleVersion": DEFAULT_RULES.version,
    })
    .to_string())
}
