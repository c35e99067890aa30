pub mod app;
pub mod renderer;
pub mod theme;

pub use app::PortfolioApp;

#[cfg(target_arch = "wasm32")]
mod web {
    use folio_core::model::PageContent;
    use folio_store::StoreConfig;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    use crate::PortfolioApp;

    const CANVAS_ID: &str = "folio_canvas";

    /// Browser entry point: mounts the page on the `folio_canvas` element.
    ///
    /// Content and store parameters are fetched from `assets/`; either may
    /// be absent, in which case the built-in sample content renders and
    /// submissions run dry.
    #[wasm_bindgen(start)]
    pub async fn start() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| JsValue::from_str("missing canvas element #folio_canvas"))?
            .dyn_into::<web_sys::HtmlCanvasElement>()?;

        let content = match fetch_text("assets/content.json").await {
            Some(text) => PageContent::from_json(text.as_bytes())
                .map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => PageContent::sample(),
        };
        let store: Option<StoreConfig> = match fetch_text("assets/store.json").await {
            Some(text) => serde_json::from_str(&text).ok(),
            None => None,
        };

        eframe::WebRunner::new()
            .start(
                canvas,
                eframe::WebOptions::default(),
                Box::new(move |cc| Ok(Box::new(PortfolioApp::new(cc, content, store)))),
            )
            .await
    }

    /// Fetch a same-origin asset as text; `None` when missing or unreadable.
    async fn fetch_text(url: &str) -> Option<String> {
        let window = web_sys::window()?;
        let response = JsFuture::from(window.fetch_with_str(url)).await.ok()?;
        let response: web_sys::Response = response.dyn_into().ok()?;
        if !response.ok() {
            return None;
        }
        let text = JsFuture::from(response.text().ok()?).await.ok()?;
        text.as_string()
    }
}
