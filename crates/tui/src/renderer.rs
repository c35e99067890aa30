use std::io::stdout;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseButton, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use folio_core::form::ContactForm;
use folio_core::model::{PageContent, PageLayout};
use folio_core::observe::{RevealController, RevealFrame, ScrollTracker};
use folio_core::views::{self, NAV_HEIGHT};
use folio_protocol::{GradientKey, RenderCommand, SectionId, ThemeToken, Viewport};
use folio_store::Firestore;
use ratatui::{Terminal, backend::CrosstermBackend, style::Color};

/// Page units per terminal cell. The core lays the page out in abstract
/// units; the terminal maps them onto its cell grid.
const CELL_W: f64 = 8.0;
const CELL_H: f64 = 16.0;

const SCROLL_STEP: f64 = 3.0 * CELL_H;
const SMOOTH_FACTOR: f64 = 0.35;

fn theme_color(token: ThemeToken) -> Color {
    match token {
        ThemeToken::Background => Color::Black,
        ThemeToken::Surface => Color::Rgb(24, 24, 37),
        ThemeToken::Border => Color::DarkGray,
        ThemeToken::TextPrimary => Color::White,
        ThemeToken::TextSecondary => Color::Gray,
        ThemeToken::TextMuted => Color::DarkGray,
        ThemeToken::NavBackground => Color::Rgb(230, 230, 235),
        ThemeToken::NavText => Color::Rgb(31, 41, 55),
        ThemeToken::NavHover => Color::Rgb(210, 210, 220),
        ThemeToken::CardBackground => Color::Rgb(17, 17, 27),
        ThemeToken::CardBorder => Color::Rgb(69, 71, 90),
        ThemeToken::FieldBackground => Color::Rgb(31, 41, 55),
        ThemeToken::FieldBorder => Color::Rgb(55, 65, 81),
        ThemeToken::FieldText => Color::White,
        ThemeToken::ButtonBackground => Color::Rgb(67, 56, 202),
        ThemeToken::ButtonHover => Color::Rgb(49, 46, 129),
        ThemeToken::ButtonText => Color::White,
        ThemeToken::StatusInfo => Color::Gray,
        ThemeToken::StatusOk => Color::Green,
        ThemeToken::StatusError => Color::Red,
        ThemeToken::LinkIcon => Color::Rgb(129, 140, 248),
        ThemeToken::LinkIconHover => Color::Rgb(99, 102, 241),
        ThemeToken::GradientStart(key) => gradient_colors(key).0,
        ThemeToken::GradientEnd(key) => gradient_colors(key).1,
    }
}

/// Tailwind endpoint colors for each section gradient.
fn gradient_colors(key: GradientKey) -> (Color, Color) {
    match key {
        GradientKey::BlueToPurple => (Color::Rgb(59, 130, 246), Color::Rgb(147, 51, 234)),
        GradientKey::GreenToBlue => (Color::Rgb(74, 222, 128), Color::Rgb(59, 130, 246)),
        GradientKey::YellowToRed => (Color::Rgb(250, 204, 21), Color::Rgb(239, 68, 68)),
        GradientKey::PinkToPurple => (Color::Rgb(236, 72, 153), Color::Rgb(168, 85, 247)),
        GradientKey::IndigoToPurple => (Color::Rgb(99, 102, 241), Color::Rgb(147, 51, 234)),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormFocus {
    None,
    Name,
    Email,
    Message,
    Button,
}

impl FormFocus {
    fn next(self) -> Self {
        match self {
            FormFocus::None => FormFocus::Name,
            FormFocus::Name => FormFocus::Email,
            FormFocus::Email => FormFocus::Message,
            FormFocus::Message => FormFocus::Button,
            FormFocus::Button => FormFocus::None,
        }
    }
}

type PendingSubmit = Arc<Mutex<Option<Result<(), String>>>>;

struct App {
    scroll_y: f64,
    scroll_target: Option<f64>,
    tracker: ScrollTracker,
    reveals: Vec<RevealController>,
    form: ContactForm,
    focus: FormFocus,
    pending: PendingSubmit,
    started: Instant,
}

impl App {
    fn new() -> Self {
        Self {
            scroll_y: 0.0,
            scroll_target: None,
            tracker: ScrollTracker::new(),
            reveals: vec![RevealController::new(); SectionId::ALL.len()],
            form: ContactForm::new(),
            focus: FormFocus::None,
            pending: Arc::new(Mutex::new(None)),
            started: Instant::now(),
        }
    }

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Feed the current viewport to the tracker and every reveal latch.
    fn observe(&mut self, layout: &PageLayout, viewport: Viewport) {
        self.tracker.on_scroll(layout, viewport.y);
        let now = self.now();
        for (band, ctl) in layout.bands().iter().zip(self.reveals.iter_mut()) {
            let ratio = viewport.intersection_ratio(&band.rect(layout.width()));
            ctl.observe(ratio, now);
        }
    }

    fn jump_to(&mut self, layout: &PageLayout, id: SectionId) {
        self.scroll_target = Some(layout.anchor(id));
    }

    /// One animation step toward the smooth-scroll target, if any.
    fn settle_scroll(&mut self, max_scroll: f64) {
        if let Some(target) = self.scroll_target {
            let delta = target - self.scroll_y;
            if delta.abs() < 1.0 {
                self.scroll_y = target;
                self.scroll_target = None;
            } else {
                self.scroll_y += delta * SMOOTH_FACTOR;
            }
        }
        self.scroll_y = self.scroll_y.clamp(0.0, max_scroll);
    }

    fn submit(&mut self, store: Option<&Arc<Firestore>>) {
        let Some(message) = self.form.submit() else {
            return;
        };
        match store {
            Some(store) => {
                let store = Arc::clone(store);
                let pending = Arc::clone(&self.pending);
                // Fire-and-forget write off the event loop; the result
                // lands in the pending slot and is picked up next frame.
                std::thread::spawn(move || {
                    let result = store.send_message(&message).map_err(|e| e.to_string());
                    if let Ok(mut slot) = pending.lock() {
                        *slot = Some(result);
                    }
                });
            }
            None => {
                tracing::info!(name = %message.name, "dry run, message not persisted");
                if let Ok(mut slot) = self.pending.lock() {
                    *slot = Some(Ok(()));
                }
            }
        }
    }

    fn poll_pending(&mut self) {
        let outcome = self.pending.lock().ok().and_then(|mut slot| slot.take());
        if let Some(result) = outcome {
            self.form.resolve(result);
        }
    }

    fn type_char(&mut self, c: char) {
        match self.focus {
            FormFocus::Name => self.form.set_name(format!("{}{}", self.form.name(), c)),
            FormFocus::Email => self.form.set_email(format!("{}{}", self.form.email(), c)),
            FormFocus::Message => self.form.set_message(format!("{}{}", self.form.message(), c)),
            _ => {}
        }
    }

    fn backspace(&mut self) {
        let pop = |s: &str| {
            let mut s = s.to_string();
            s.pop();
            s
        };
        match self.focus {
            FormFocus::Name => self.form.set_name(pop(self.form.name())),
            FormFocus::Email => self.form.set_email(pop(self.form.email())),
            FormFocus::Message => self.form.set_message(pop(self.form.message())),
            _ => {}
        }
    }
}

pub fn run(content: &PageContent, store: Option<Arc<Firestore>>) -> Result<()> {
    enable_raw_mode()?;
    let mut out = stdout();
    execute!(out, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(out);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, content, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    content: &PageContent,
    store: Option<Arc<Firestore>>,
) -> Result<()> {
    let mut app = App::new();

    loop {
        let size = terminal.size()?;
        let width_units = f64::from(size.width) * CELL_W;
        let nav_rows = (NAV_HEIGHT / CELL_H).ceil() as u16;
        let content_rows = size.height.saturating_sub(nav_rows + 1);
        let screen_units = f64::from(content_rows) * CELL_H;

        let layout = PageLayout::compute(content, width_units, screen_units);
        let max_scroll = (layout.total_height() - screen_units).max(0.0);

        app.poll_pending();
        app.settle_scroll(max_scroll);
        let viewport = Viewport::new(app.scroll_y, width_units, screen_units);
        app.observe(&layout, viewport);

        let reveals = RevealFrame::capture(&app.reveals, app.now());
        let nav_cmds = views::render_nav(app.tracker.active(), width_units);
        let page_cmds = views::render_page(content, &layout, &reveals, &app.form);

        terminal.draw(|frame| {
            let area = frame.area();
            let nav_area = ratatui::layout::Rect::new(0, 0, area.width, nav_rows.min(area.height));
            draw_commands(frame, nav_area, &nav_cmds, 0.0);

            let content_area = ratatui::layout::Rect::new(
                0,
                nav_rows,
                area.width,
                area.height.saturating_sub(nav_rows + 1),
            );
            draw_commands(frame, content_area, &page_cmds, app.scroll_y);

            // Status footer.
            let footer_y = area.height.saturating_sub(1);
            let hint = match app.focus {
                FormFocus::None => {
                    " ↑↓ scroll | 1-5 jump | Tab form | q quit ".to_string()
                }
                FormFocus::Button => " Enter send | Tab next | Esc leave form ".to_string(),
                _ => format!(" typing: {:?} | Tab next | Esc leave form ", app.focus),
            };
            let buf = frame.buffer_mut();
            for (i, ch) in hint.chars().enumerate() {
                let x = i as u16;
                if x < area.width {
                    buf[(x, footer_y)]
                        .set_char(ch)
                        .set_fg(Color::White)
                        .set_bg(Color::DarkGray);
                }
            }
        })?;

        if !event::poll(std::time::Duration::from_millis(33))? {
            continue;
        }
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                // Form editing captures printable keys.
                if app.focus != FormFocus::None {
                    match key.code {
                        KeyCode::Esc => app.focus = FormFocus::None,
                        KeyCode::Tab => app.focus = app.focus.next(),
                        KeyCode::Backspace => app.backspace(),
                        KeyCode::Enter if app.focus == FormFocus::Button => {
                            app.submit(store.as_ref())
                        }
                        KeyCode::Enter if app.focus == FormFocus::Message => app.type_char(' '),
                        KeyCode::Char(c) => app.type_char(c),
                        _ => {}
                    }
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => break,
                    KeyCode::Up => app.scroll_y -= SCROLL_STEP,
                    KeyCode::Down => app.scroll_y += SCROLL_STEP,
                    KeyCode::PageUp => app.scroll_y -= screen_units,
                    KeyCode::PageDown => app.scroll_y += screen_units,
                    KeyCode::Home => app.scroll_target = Some(0.0),
                    KeyCode::End => app.scroll_target = Some(max_scroll),
                    KeyCode::Tab => {
                        app.jump_to(&layout, SectionId::Contact);
                        app.focus = FormFocus::Name;
                    }
                    KeyCode::Char(c @ '1'..='5') => {
                        let index = c as usize - '1' as usize;
                        app.jump_to(&layout, SectionId::ALL[index]);
                    }
                    _ => {}
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => app.scroll_y += SCROLL_STEP,
                MouseEventKind::ScrollUp => app.scroll_y -= SCROLL_STEP,
                MouseEventKind::Down(MouseButton::Left) => {
                    if mouse.row < nav_rows
                        && let Some(id) = nav_hit(&nav_cmds, f64::from(mouse.column) * CELL_W)
                    {
                        app.jump_to(&layout, id);
                    }
                }
                _ => {}
            },
            _ => {}
        }
        app.scroll_y = app.scroll_y.clamp(0.0, max_scroll);
    }
    Ok(())
}

/// Find the nav link whose hit rect contains the given page-space x.
fn nav_hit(commands: &[RenderCommand], x: f64) -> Option<SectionId> {
    commands.iter().find_map(|c| match c {
        RenderCommand::DrawRect {
            rect,
            link: Some(id),
            ..
        } if x >= rect.x && x < rect.x + rect.w => Some(*id),
        _ => None,
    })
}

/// Map render commands onto the cell grid.
///
/// The terminal cannot alpha-blend, so opacity below one half hides the
/// element entirely and values above it draw at full strength; the
/// slide-in translate still applies, which keeps the reveal readable.
fn draw_commands(
    frame: &mut ratatui::Frame<'_>,
    area: ratatui::layout::Rect,
    commands: &[RenderCommand],
    scroll_y: f64,
) {
    let mut translate_stack: Vec<(f64, f64)> = vec![(0.0, 0.0)];
    let mut opacity_stack: Vec<f64> = vec![1.0];

    let buf = frame.buffer_mut();
    let to_cell = |x: f64, y: f64, tf: (f64, f64)| -> (i32, i32) {
        (
            ((x + tf.0) / CELL_W).round() as i32,
            ((y + tf.1 - scroll_y) / CELL_H).round() as i32,
        )
    };

    for cmd in commands {
        let tf = *translate_stack.last().unwrap_or(&(0.0, 0.0));
        let alpha = *opacity_stack.last().unwrap_or(&1.0);
        let visible = alpha >= 0.5;

        match cmd {
            RenderCommand::PushTransform { translate } => {
                translate_stack.push((tf.0 + translate.x, tf.1 + translate.y));
            }
            RenderCommand::PopTransform => {
                if translate_stack.len() > 1 {
                    translate_stack.pop();
                }
            }
            RenderCommand::PushOpacity { alpha: a } => opacity_stack.push(alpha * a),
            RenderCommand::PopOpacity => {
                if opacity_stack.len() > 1 {
                    opacity_stack.pop();
                }
            }
            RenderCommand::DrawRect { rect, color, .. } if visible => {
                let (x0, y0) = to_cell(rect.x, rect.y, tf);
                let (x1, y1) = to_cell(rect.x + rect.w, rect.y + rect.h, tf);
                let bg = theme_color(*color);
                for y in y0.max(0)..y1.max(y0 + 1) {
                    for x in x0.max(0)..x1 {
                        if x < i32::from(area.width) && y < i32::from(area.height) {
                            buf[(area.x + x as u16, area.y + y as u16)].set_bg(bg);
                        }
                    }
                }
            }
            RenderCommand::DrawText {
                position,
                text,
                color,
                align,
                ..
            } if visible => {
                draw_string(buf, area, to_cell(position.x, position.y, tf), text, *align, |_| {
                    theme_color(*color)
                });
            }
            RenderCommand::DrawGradientText {
                position,
                text,
                section,
                align,
                ..
            } if visible => {
                let (start, end) = gradient_colors(section.gradient());
                let half = text.chars().count() / 2;
                draw_string(buf, area, to_cell(position.x, position.y, tf), text, *align, |i| {
                    if i < half { start } else { end }
                });
            }
            RenderCommand::DrawLine { from, to, color, .. } if visible => {
                let (x0, y0) = to_cell(from.x, from.y, tf);
                let (x1, _) = to_cell(to.x, to.y, tf);
                if y0 >= 0 && y0 < i32::from(area.height) {
                    let fg = theme_color(*color);
                    for x in x0.max(0)..x1.min(i32::from(area.width)) {
                        buf[(area.x + x as u16, area.y + y0 as u16)]
                            .set_char('─')
                            .set_fg(fg);
                    }
                }
            }
            _ => {}
        }
    }
}

fn draw_string(
    buf: &mut ratatui::buffer::Buffer,
    area: ratatui::layout::Rect,
    (cx, cy): (i32, i32),
    text: &str,
    align: folio_protocol::TextAlign,
    color_at: impl Fn(usize) -> Color,
) {
    if cy < 0 || cy >= i32::from(area.height) {
        return;
    }
    let len = text.chars().count() as i32;
    let x0 = match align {
        folio_protocol::TextAlign::Left => cx,
        folio_protocol::TextAlign::Center => cx - len / 2,
        folio_protocol::TextAlign::Right => cx - len,
    };
    for (i, ch) in text.chars().enumerate() {
        let x = x0 + i as i32;
        if x >= 0 && x < i32::from(area.width) {
            buf[(area.x + x as u16, area.y + cy as u16)]
                .set_char(ch)
                .set_fg(color_at(i));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_hit_resolves_entry_rects() {
        let cmds = views::render_nav(SectionId::Home, 1280.0);
        let mut hits = Vec::new();
        for c in &cmds {
            if let RenderCommand::DrawRect {
                rect,
                link: Some(id),
                ..
            } = c
            {
                assert_eq!(nav_hit(&cmds, rect.x + rect.w / 2.0), Some(*id));
                hits.push(*id);
            }
        }
        assert_eq!(hits, SectionId::ALL);
        assert_eq!(nav_hit(&cmds, -10.0), None);
    }

    #[test]
    fn form_focus_cycles_through_all_fields() {
        let mut focus = FormFocus::None;
        let mut seen = Vec::new();
        for _ in 0..5 {
            focus = focus.next();
            seen.push(focus);
        }
        assert_eq!(
            seen,
            vec![
                FormFocus::Name,
                FormFocus::Email,
                FormFocus::Message,
                FormFocus::Button,
                FormFocus::None
            ]
        );
    }

    #[test]
    fn dry_run_submission_resolves_through_the_pending_slot() {
        let mut app = App::new();
        app.form.set_name("A");
        app.form.set_email("a@b.com");
        app.form.set_message("hi");
        app.submit(None);
        app.poll_pending();
        assert_eq!(
            app.form.status_line(),
            Some(folio_core::form::STATUS_SENT)
        );
    }
}
