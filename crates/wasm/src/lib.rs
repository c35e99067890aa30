//! Bridge for hosts that drive the page from JavaScript and paint the
//! command stream onto their own canvas.
//!
//! The host owns the clock, the scroll position, and all I/O: it feeds
//! scroll offsets in, pulls render commands out as JSON, and performs the
//! store write itself (the bridge hands it a ready-made request body).

use std::sync::Mutex;

use folio_core::form::ContactForm;
use folio_core::model::{PageContent, PageLayout};
use folio_core::observe::reveal::{RevealController, RevealFrame};
use folio_core::observe::scroll::ScrollTracker;
use folio_core::views::{render_nav, render_page};
use folio_protocol::{SectionId, Viewport};
use folio_store::StoreConfig;
use wasm_bindgen::prelude::*;

struct PageState {
    content: PageContent,
    tracker: ScrollTracker,
    reveals: Vec<RevealController>,
    form: ContactForm,
}

impl PageState {
    fn new(content: PageContent) -> Self {
        Self {
            content,
            tracker: ScrollTracker::new(),
            reveals: SectionId::ALL.iter().map(|_| RevealController::new()).collect(),
            form: ContactForm::new(),
        }
    }
}

static STATE: Mutex<Option<PageState>> = Mutex::new(None);

fn with_state<T>(f: impl FnOnce(&mut PageState) -> Result<T, JsError>) -> Result<T, JsError> {
    let mut guard = STATE.lock().unwrap_or_else(|e| e.into_inner());
    let state = guard
        .as_mut()
        .ok_or_else(|| JsError::new("no content loaded; call set_content first"))?;
    f(state)
}

/// Load page content from JSON bytes, resetting all page state.
#[wasm_bindgen]
pub fn set_content(data: &[u8]) -> Result<(), JsError> {
    let content = PageContent::from_json(data).map_err(|e| JsError::new(&e.to_string()))?;
    *STATE.lock().unwrap_or_else(|e| e.into_inner()) = Some(PageState::new(content));
    Ok(())
}

/// Load the built-in sample content.
#[wasm_bindgen]
pub fn set_sample_content() {
    *STATE.lock().unwrap_or_else(|e| e.into_inner()) =
        Some(PageState::new(PageContent::sample()));
}

/// Feed one scroll notification. `now` is the host clock in seconds; it
/// anchors any reveal animations this observation triggers. Returns the
/// slug of the active section after the update.
#[wasm_bindgen]
pub fn on_scroll(offset: f64, width: f64, height: f64, now: f64) -> Result<String, JsError> {
    with_state(|state| {
        let layout = PageLayout::compute(&state.content, width, height);
        let active = state.tracker.on_scroll(&layout, offset);

        let viewport = Viewport::new(offset, width, height);
        for (band, latch) in layout.bands().iter().zip(&mut state.reveals) {
            let ratio = viewport.intersection_ratio(&band.rect(width));
            latch.observe(ratio, now);
        }
        Ok(active.slug().to_owned())
    })
}

/// Render the nav bar, returning render commands as JSON.
#[wasm_bindgen]
pub fn render_nav_commands(width: f64) -> Result<String, JsError> {
    with_state(|state| {
        let commands = render_nav(state.tracker.active(), width);
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Render the page in page-space coordinates, returning render commands
/// as JSON. The host translates by its scroll offset when painting.
#[wasm_bindgen]
pub fn render_page_commands(width: f64, height: f64, now: f64) -> Result<String, JsError> {
    with_state(|state| {
        let layout = PageLayout::compute(&state.content, width, height);
        let reveals = RevealFrame::capture(&state.reveals, now);
        let commands = render_page(&state.content, &layout, &reveals, &state.form);
        serde_json::to_string(&commands).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// The scroll offset a nav click on `slug` jumps to.
#[wasm_bindgen]
pub fn section_anchor(slug: &str, width: f64, height: f64) -> Result<f64, JsError> {
    with_state(|state| {
        let id = SectionId::from_slug(slug)
            .ok_or_else(|| JsError::new(&format!("unknown section: {slug}")))?;
        let layout = PageLayout::compute(&state.content, width, height);
        Ok(layout.anchor(id))
    })
}

/// Total page height at the given viewport size, for host scrollbars.
#[wasm_bindgen]
pub fn page_height(width: f64, height: f64) -> Result<f64, JsError> {
    with_state(|state| Ok(PageLayout::compute(&state.content, width, height).total_height()))
}

/// Update one form field from a host input event. Fields are "name",
/// "email", and "message".
#[wasm_bindgen]
pub fn set_form_field(field: &str, value: &str) -> Result<(), JsError> {
    with_state(|state| {
        match field {
            "name" => state.form.set_name(value),
            "email" => state.form.set_email(value),
            "message" => state.form.set_message(value),
            _ => return Err(JsError::new(&format!("unknown form field: {field}"))),
        }
        Ok(())
    })
}

/// Begin a form submission.
///
/// On success returns the store commit request body as JSON, ready to
/// POST to `store_commit_url`; the host reports the outcome through
/// [`resolve_submission`]. Returns `None` when the draft is incomplete
/// or a submission is already in flight.
#[wasm_bindgen]
pub fn submit_form(
    project_id: &str,
    api_key: &str,
    doc_id: &str,
) -> Result<Option<String>, JsError> {
    with_state(|state| {
        let Some(message) = state.form.submit() else {
            return Ok(None);
        };
        let config = store_config(project_id, api_key);
        let body = folio_store::firestore::commit_body(&config, &message, doc_id);
        Ok(Some(body.to_string()))
    })
}

/// The URL the commit body must be POSTed to.
#[wasm_bindgen]
pub fn store_commit_url(project_id: &str, api_key: &str) -> String {
    store_config(project_id, api_key).commit_url()
}

/// Report the outcome of the in-flight store write.
#[wasm_bindgen]
pub fn resolve_submission(ok: bool) -> Result<(), JsError> {
    with_state(|state| {
        if ok {
            state.form.resolve::<()>(Ok(()));
        } else {
            state.form.resolve(Err(()));
        }
        Ok(())
    })
}

/// The status line currently shown under the form, empty when idle.
#[wasm_bindgen]
pub fn form_status() -> Result<String, JsError> {
    with_state(|state| Ok(state.form.status_line().unwrap_or_default().to_owned()))
}

fn store_config(project_id: &str, api_key: &str) -> StoreConfig {
    StoreConfig {
        project_id: project_id.to_owned(),
        api_key: api_key.to_owned(),
        database: "(default)".into(),
        collection: "messages".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // JsError has no Debug impl, so unwrap the bridge results by hand.
    fn ok<T>(result: Result<T, JsError>) -> T {
        match result {
            Ok(value) => value,
            Err(_) => panic!("bridge call failed"),
        }
    }

    // The bridge shares one global state; run its checks as one sequence.
    #[test]
    fn bridge_round_trip() {
        set_sample_content();

        assert_eq!(ok(on_scroll(0.0, 1280.0, 800.0, 0.0)), "home");

        let nav = ok(render_nav_commands(1280.0));
        assert!(nav.contains("DrawGradientText"));

        let page = ok(render_page_commands(1280.0, 800.0, 0.5));
        let parsed: Vec<folio_protocol::RenderCommand> =
            serde_json::from_str(&page).unwrap();
        assert!(!parsed.is_empty());

        let anchor = ok(section_anchor("about", 1280.0, 800.0));
        assert!(anchor >= 800.0);
        assert_eq!(ok(on_scroll(anchor + 10.0, 1280.0, 800.0, 1.0)), "about");
        assert!(ok(page_height(1280.0, 800.0)) >= 5.0 * 800.0);

        ok(set_form_field("name", "A"));
        ok(set_form_field("email", "a@b.com"));
        ok(set_form_field("message", "hi"));
        let body = ok(submit_form("p", "k", "doc123")).expect("complete draft submits");
        assert!(body.contains("REQUEST_TIME"));
        assert_eq!(ok(form_status()), "Sending...");

        ok(resolve_submission(true));
        assert_eq!(ok(form_status()), "Message sent successfully!");

        assert!(section_anchor("nope", 1280.0, 800.0).is_err());
        assert!(store_commit_url("p", "k").contains("documents:commit"));
    }
}
