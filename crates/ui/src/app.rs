use std::sync::{Arc, Mutex};

use egui::Vec2;
use folio_core::form::ContactForm;
use folio_core::model::{PageContent, PageLayout};
use folio_core::observe::reveal::{RevealController, RevealFrame, REVEAL_RISE};
use folio_core::observe::scroll::ScrollTracker;
use folio_core::views::{contact_form_rects, render_nav, render_page, NAV_HEIGHT};
use folio_protocol::{SectionId, Viewport};

use crate::renderer::{self, LinkRegion};
use crate::theme::{self, ThemeMode};

/// Fraction of the remaining distance covered per frame while gliding to
/// a nav anchor.
const SMOOTH_FACTOR: f32 = 0.18;
const SCROLL_EPSILON: f32 = 0.5;

#[cfg(not(target_arch = "wasm32"))]
type StoreHandle = Arc<folio_store::Firestore>;
#[cfg(target_arch = "wasm32")]
type StoreHandle = folio_store::StoreConfig;

/// The whole page as one `eframe` application.
///
/// Every frame recomputes the layout for the current window size, feeds
/// the scroll offset to the tracker and the reveal latches, and repaints
/// the command stream. Form fields are real egui widgets placed on the
/// exact rects the command stream reserves for them.
pub struct PortfolioApp {
    content: PageContent,
    store: Option<StoreHandle>,
    mode: ThemeMode,

    scroll_y: f32,
    scroll_target: f32,

    tracker: ScrollTracker,
    reveals: Vec<RevealController>,
    form: ContactForm,

    /// Outcome slot filled by the background store write and drained on
    /// the next frame.
    pending: Arc<Mutex<Option<Result<(), String>>>>,
}

impl PortfolioApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        content: PageContent,
        store: Option<StoreHandle>,
    ) -> Self {
        let mode = ThemeMode::Dark;
        theme::apply_visuals(&cc.egui_ctx, mode);
        Self {
            content,
            store,
            mode,
            scroll_y: 0.0,
            scroll_target: 0.0,
            tracker: ScrollTracker::new(),
            reveals: SectionId::ALL.iter().map(|_| RevealController::new()).collect(),
            form: ContactForm::new(),
            pending: Arc::new(Mutex::new(None)),
        }
    }

    fn poll_pending(&mut self) {
        let outcome = self
            .pending
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        if let Some(result) = outcome {
            self.form.resolve(result);
        }
    }

    /// Feed the current viewport to the tracker and the reveal latches.
    fn observe(&mut self, layout: &PageLayout, height: f32, now: f64) {
        self.tracker.on_scroll(layout, f64::from(self.scroll_y));
        let viewport = Viewport::new(
            f64::from(self.scroll_y),
            layout.width(),
            f64::from(height),
        );
        for (band, latch) in layout.bands().iter().zip(&mut self.reveals) {
            let ratio = viewport.intersection_ratio(&band.rect(layout.width()));
            latch.observe(ratio, now);
        }
    }

    fn submit(&mut self, ctx: &egui::Context) {
        let Some(message) = self.form.submit() else {
            return;
        };
        let Some(store) = self.store.clone() else {
            // Dry run: no store configured.
            self.form.resolve::<()>(Ok(()));
            return;
        };

        let slot = Arc::clone(&self.pending);
        let ctx = ctx.clone();

        #[cfg(not(target_arch = "wasm32"))]
        std::thread::spawn(move || {
            let result = store.send_message(&message).map_err(|e| e.to_string());
            *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(result);
            ctx.request_repaint();
        });

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(async move {
            let result = post_commit(&store, &message).await;
            *slot.lock().unwrap_or_else(|e| e.into_inner()) = Some(result);
            ctx.request_repaint();
        });
    }

    /// Overlay real input widgets on the rects the command stream draws
    /// for the contact form, shifted by the section's reveal rise.
    fn contact_widgets(&mut self, ui: &mut egui::Ui, layout: &PageLayout, reveals: &RevealFrame) {
        let progress = reveals.get(SectionId::Contact);
        if progress <= 0.0 {
            return;
        }
        let band = layout.band(SectionId::Contact);
        let rects = contact_form_rects(&band, layout.width());
        let shift = Vec2::new(0.0, ((1.0 - progress) * REVEAL_RISE) as f32 - self.scroll_y);
        let place = |r: folio_protocol::Rect| {
            egui::Rect::from_min_size(
                egui::Pos2::new(r.x as f32, r.y as f32) + shift,
                Vec2::new(r.w as f32, r.h as f32),
            )
        };

        let mut name = self.form.name().to_owned();
        if ui
            .put(
                place(rects.name),
                egui::TextEdit::singleline(&mut name).hint_text("Your Name"),
            )
            .changed()
        {
            self.form.set_name(name);
        }

        let mut email = self.form.email().to_owned();
        if ui
            .put(
                place(rects.email),
                egui::TextEdit::singleline(&mut email).hint_text("Your Email"),
            )
            .changed()
        {
            self.form.set_email(email);
        }

        let mut message = self.form.message().to_owned();
        if ui
            .put(
                place(rects.message),
                egui::TextEdit::multiline(&mut message).hint_text("Your Message"),
            )
            .changed()
        {
            self.form.set_message(message);
        }

        if ui
            .put(place(rects.button), egui::Button::new("Send Message"))
            .clicked()
        {
            self.submit(ui.ctx());
        }
    }

    fn handle_links(&mut self, response: &egui::Response, links: &[LinkRegion], layout: &PageLayout) {
        if !response.clicked() {
            return;
        }
        let Some(pos) = response.interact_pointer_pos() else {
            return;
        };
        // Later regions sit on top, so scan back to front.
        if let Some(region) = links.iter().rev().find(|r| r.rect.contains(pos)) {
            self.scroll_target = layout.anchor(region.target) as f32;
        }
    }

    fn settle_scroll(&mut self, max_scroll: f32) {
        self.scroll_target = self.scroll_target.clamp(0.0, max_scroll);
        let delta = self.scroll_target - self.scroll_y;
        if delta.abs() <= SCROLL_EPSILON {
            self.scroll_y = self.scroll_target;
        } else {
            self.scroll_y += delta * SMOOTH_FACTOR;
        }
    }

    fn animating(&self, now: f64) -> bool {
        (self.scroll_target - self.scroll_y).abs() > SCROLL_EPSILON
            || self
                .reveals
                .iter()
                .any(|latch| latch.is_visible() && latch.progress(now) < 1.0)
    }
}

impl eframe::App for PortfolioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);
        self.poll_pending();

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(theme::resolve(
                folio_protocol::ThemeToken::Background,
                self.mode,
            )))
            .show(ctx, |ui| {
                let screen = ui.max_rect();
                let layout = PageLayout::compute(
                    &self.content,
                    f64::from(screen.width()),
                    f64::from(screen.height()),
                );
                let max_scroll = (layout.total_height() as f32 - screen.height()).max(0.0);

                self.scroll_target -= ctx.input(|i| i.raw_scroll_delta.y);
                self.settle_scroll(max_scroll);
                self.observe(&layout, screen.height(), now);
                let reveals = RevealFrame::capture(&self.reveals, now);

                let response =
                    ui.interact(screen, ui.id().with("page"), egui::Sense::click());
                let painter = ui.painter_at(screen);

                let page = render_page(&self.content, &layout, &reveals, &self.form);
                renderer::paint(
                    &painter,
                    &page,
                    Vec2::new(0.0, -self.scroll_y),
                    self.mode,
                );

                let nav = render_nav(self.tracker.active(), layout.width());
                let links = renderer::paint(&painter, &nav, Vec2::ZERO, self.mode);
                self.handle_links(&response, &links, &layout);

                self.contact_widgets(ui, &layout, &reveals);

                let toggle = egui::Rect::from_min_size(
                    egui::Pos2::new(screen.right() - 44.0, (NAV_HEIGHT as f32 - 28.0) / 2.0),
                    Vec2::new(32.0, 28.0),
                );
                let label = match self.mode {
                    ThemeMode::Dark => "☀",
                    ThemeMode::Light => "🌙",
                };
                if ui.put(toggle, egui::Button::new(label)).clicked() {
                    self.mode = match self.mode {
                        ThemeMode::Dark => ThemeMode::Light,
                        ThemeMode::Light => ThemeMode::Dark,
                    };
                    theme::apply_visuals(ctx, self.mode);
                }
            });

        if self.animating(now) {
            ctx.request_repaint();
        }
    }
}

#[cfg(target_arch = "wasm32")]
async fn post_commit(
    config: &folio_store::StoreConfig,
    message: &folio_protocol::ContactMessage,
) -> Result<(), String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let body = folio_store::firestore::commit_body(config, message, &browser_auto_id());

    let init = web_sys::RequestInit::new();
    init.set_method("POST");
    init.set_body(&wasm_bindgen::JsValue::from_str(&body.to_string()));
    let request = web_sys::Request::new_with_str_and_init(&config.commit_url(), &init)
        .map_err(|_| "building store request failed".to_owned())?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(|_| "setting request headers failed".to_owned())?;

    let window = web_sys::window().ok_or_else(|| "no window".to_owned())?;
    let response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| "store request failed".to_owned())?;
    let response: web_sys::Response = response
        .dyn_into()
        .map_err(|_| "unexpected fetch result".to_owned())?;
    if response.ok() {
        Ok(())
    } else {
        Err(format!("store returned {}", response.status()))
    }
}

/// Browser-side document ids come from `Math.random`, same alphabet and
/// length as the native generator.
#[cfg(target_arch = "wasm32")]
fn browser_auto_id() -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
    (0..20)
        .map(|_| {
            let i = (js_sys::Math::random() * ALPHABET.len() as f64) as usize;
            ALPHABET[i.min(ALPHABET.len() - 1)] as char
        })
        .collect()
}
