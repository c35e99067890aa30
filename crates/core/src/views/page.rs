use folio_protocol::{Point, Rect, RenderCommand, SectionId, TextAlign, ThemeToken};

use crate::form::{ContactForm, FormStatus};
use crate::model::content::PageContent;
use crate::model::layout::{PageLayout, SectionBand};
use crate::observe::reveal::{REVEAL_RISE, RevealFrame};

const HEADING_FONT: f64 = 44.0;
const TITLE_FONT: f64 = 22.0;
const BODY_FONT: f64 = 14.0;
const CAPTION_FONT: f64 = 12.0;
const HEADING_OFFSET: f64 = 80.0;
const CONTENT_MAX_WIDTH: f64 = 960.0;
const CARD_PADDING: f64 = 24.0;
const PROJECT_COLS: usize = 3;
const PROJECT_CARD_H: f64 = 200.0;
const SKILL_COLS: usize = 4;
const SKILL_CELL_H: f64 = 90.0;
const FIELD_H: f64 = 40.0;
const FIELD_GAP: f64 = 14.0;
const MESSAGE_FIELD_H: f64 = 96.0;

/// Render the whole page in page-space coordinates (the renderer
/// translates by the scroll offset). Each section is wrapped in an
/// opacity level and an upward translate derived from its reveal
/// progress, so a block at progress 0 sits 64 units low and invisible
/// and glides into place as the latch animation plays.
pub fn render_page(
    content: &PageContent,
    layout: &PageLayout,
    reveals: &RevealFrame,
    form: &ContactForm,
) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(256);
    let width = layout.width();

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, layout.total_height()),
        color: ThemeToken::Background,
        border_color: None,
        link: None,
    });

    for band in layout.bands() {
        let progress = reveals.get(band.id);
        commands.push(RenderCommand::BeginGroup {
            id: band.id.slug().into(),
        });
        commands.push(RenderCommand::PushOpacity { alpha: progress });
        commands.push(RenderCommand::PushTransform {
            translate: Point::new(0.0, (1.0 - progress) * REVEAL_RISE),
        });

        match band.id {
            SectionId::Home => render_home(&mut commands, content, band, width),
            SectionId::About => render_about(&mut commands, content, band, width),
            SectionId::Projects => render_projects(&mut commands, content, band, width),
            SectionId::Skills => render_skills(&mut commands, content, band, width),
            SectionId::Contact => render_contact(&mut commands, content, band, width, form),
        }

        commands.push(RenderCommand::PopTransform);
        commands.push(RenderCommand::PopOpacity);
        commands.push(RenderCommand::EndGroup);
    }

    commands
}

fn heading(commands: &mut Vec<RenderCommand>, band: &SectionBand, text: &str, width: f64) {
    commands.push(RenderCommand::DrawGradientText {
        position: Point::new(width / 2.0, band.top + HEADING_OFFSET),
        text: text.into(),
        section: band.id,
        font_size: HEADING_FONT,
        align: TextAlign::Center,
    });
}

fn centered_text(
    commands: &mut Vec<RenderCommand>,
    x: f64,
    y: f64,
    text: &str,
    color: ThemeToken,
    font_size: f64,
) {
    commands.push(RenderCommand::DrawText {
        position: Point::new(x, y),
        text: text.into(),
        color,
        font_size,
        align: TextAlign::Center,
    });
}

fn content_left(width: f64) -> f64 {
    (width - CONTENT_MAX_WIDTH.min(width)) / 2.0
}

fn render_home(commands: &mut Vec<RenderCommand>, content: &PageContent, band: &SectionBand, width: f64) {
    let cx = width / 2.0;
    let mut y = band.top + band.height / 2.0 - 120.0;

    // Photo placeholder; renderers that can load images swap it out.
    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(cx - 64.0, y - 64.0, 128.0, 128.0),
        color: ThemeToken::Surface,
        border_color: Some(ThemeToken::Border),
        link: None,
    });
    y += 110.0;

    commands.push(RenderCommand::DrawGradientText {
        position: Point::new(cx, y),
        text: content.profile.name.clone(),
        section: SectionId::Home,
        font_size: HEADING_FONT,
        align: TextAlign::Center,
    });
    y += 48.0;
    centered_text(commands, cx, y, &content.profile.tagline, ThemeToken::TextPrimary, BODY_FONT);

    if content.profile.resume_url.is_some() {
        y += 48.0;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(cx - 70.0, y - 18.0, 140.0, 36.0),
            color: ThemeToken::ButtonBackground,
            border_color: None,
            link: None,
        });
        centered_text(commands, cx, y, "View Resume", ThemeToken::ButtonText, BODY_FONT);
    }
}

fn render_about(commands: &mut Vec<RenderCommand>, content: &PageContent, band: &SectionBand, width: f64) {
    heading(commands, band, "About Me", width);

    let left = content_left(width);
    let usable = CONTENT_MAX_WIDTH.min(width);
    let col_w = (usable - CARD_PADDING) / 2.0;
    let card_top = band.top + HEADING_OFFSET + 60.0;
    let card_h = band.height - HEADING_OFFSET - 120.0;

    // Background & interests card.
    let bg_card = Rect::new(left, card_top, col_w, card_h);
    commands.push(RenderCommand::DrawRect {
        rect: bg_card,
        color: ThemeToken::CardBackground,
        border_color: Some(ThemeToken::CardBorder),
        link: None,
    });
    let cx = bg_card.x + bg_card.w / 2.0;
    let mut y = card_top + CARD_PADDING + 10.0;
    centered_text(commands, cx, y, "Background & Interests", ThemeToken::TextPrimary, TITLE_FONT);
    y += 44.0;
    for paragraph in &content.about {
        centered_text(commands, cx, y, paragraph, ThemeToken::TextSecondary, BODY_FONT);
        y += 60.0;
    }

    // Education card.
    let edu_card = Rect::new(left + col_w + CARD_PADDING, card_top, col_w, card_h);
    commands.push(RenderCommand::DrawRect {
        rect: edu_card,
        color: ThemeToken::CardBackground,
        border_color: Some(ThemeToken::CardBorder),
        link: None,
    });
    let cx = edu_card.x + edu_card.w / 2.0;
    let mut y = card_top + CARD_PADDING + 10.0;
    centered_text(commands, cx, y, "Education", ThemeToken::TextPrimary, TITLE_FONT);
    y += 44.0;
    for entry in &content.education {
        centered_text(commands, cx, y, &entry.years, ThemeToken::TextMuted, CAPTION_FONT);
        y += 18.0;
        centered_text(commands, cx, y, &entry.title, ThemeToken::TextPrimary, BODY_FONT);
        y += 18.0;
        centered_text(commands, cx, y, &entry.institution, ThemeToken::TextSecondary, CAPTION_FONT);
        y += 18.0;
        if let Some(detail) = &entry.detail {
            centered_text(commands, cx, y, detail, ThemeToken::TextMuted, CAPTION_FONT);
            y += 18.0;
        }
        y += 10.0;
    }
}

fn render_projects(commands: &mut Vec<RenderCommand>, content: &PageContent, band: &SectionBand, width: f64) {
    heading(commands, band, "View my Projects", width);

    let left = content_left(width);
    let usable = CONTENT_MAX_WIDTH.min(width);
    let gap = 16.0;
    let card_w = (usable - gap * (PROJECT_COLS as f64 - 1.0)) / PROJECT_COLS as f64;
    let grid_top = band.top + HEADING_OFFSET + 60.0;

    for (i, project) in content.projects.iter().enumerate() {
        let col = i % PROJECT_COLS;
        let row = i / PROJECT_COLS;
        let rect = Rect::new(
            left + col as f64 * (card_w + gap),
            grid_top + row as f64 * (PROJECT_CARD_H + gap),
            card_w,
            PROJECT_CARD_H,
        );
        commands.push(RenderCommand::DrawRect {
            rect,
            color: ThemeToken::CardBackground,
            border_color: Some(ThemeToken::CardBorder),
            link: None,
        });
        let cx = rect.x + rect.w / 2.0;
        centered_text(
            commands,
            cx,
            rect.y + rect.h - 52.0,
            &project.title,
            ThemeToken::TextPrimary,
            TITLE_FONT,
        );
        centered_text(
            commands,
            cx,
            rect.y + rect.h - 24.0,
            &project.blurb,
            ThemeToken::TextSecondary,
            CAPTION_FONT,
        );
    }
}

fn render_skills(commands: &mut Vec<RenderCommand>, content: &PageContent, band: &SectionBand, width: f64) {
    heading(commands, band, "Skills", width);

    let left = content_left(width);
    let usable = CONTENT_MAX_WIDTH.min(width);
    let cell_w = usable / SKILL_COLS as f64;
    let grid_top = band.top + HEADING_OFFSET + 60.0;

    for (i, skill) in content.skills.iter().enumerate() {
        let col = i % SKILL_COLS;
        let row = i / SKILL_COLS;
        let cx = left + col as f64 * cell_w + cell_w / 2.0;
        let cy = grid_top + row as f64 * SKILL_CELL_H + SKILL_CELL_H / 2.0;
        centered_text(commands, cx, cy, skill, ThemeToken::TextPrimary, TITLE_FONT);
    }
}

/// Geometry of the contact form's interactive pieces, in page space.
///
/// Front ends with native input widgets (egui) place them on exactly the
/// rects the command stream draws, so every renderer agrees on layout.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactFormRects {
    pub name: Rect,
    pub email: Rect,
    pub message: Rect,
    pub button: Rect,
    pub status_y: f64,
}

pub fn contact_form_rects(band: &SectionBand, width: f64) -> ContactFormRects {
    let cx = width / 2.0;
    let field_w = 420.0_f64.min(width - 40.0);
    let field_x = cx - field_w / 2.0;
    let top = band.top + HEADING_OFFSET + 50.0 + 32.0 + 40.0;

    let name = Rect::new(field_x, top, field_w, FIELD_H);
    let email = Rect::new(field_x, name.bottom() + FIELD_GAP, field_w, FIELD_H);
    let message = Rect::new(field_x, email.bottom() + FIELD_GAP, field_w, MESSAGE_FIELD_H);
    let button = Rect::new(field_x, message.bottom() + FIELD_GAP, field_w, FIELD_H);
    ContactFormRects {
        name,
        email,
        message,
        button,
        status_y: button.bottom() + FIELD_GAP + 8.0,
    }
}

fn render_contact(
    commands: &mut Vec<RenderCommand>,
    content: &PageContent,
    band: &SectionBand,
    width: f64,
    form: &ContactForm,
) {
    heading(commands, band, "Contact", width);
    let cx = width / 2.0;
    let mut y = band.top + HEADING_OFFSET + 50.0;

    centered_text(commands, cx, y, &content.contact_blurb, ThemeToken::TextPrimary, BODY_FONT);
    y += 32.0;

    let links: Vec<&str> = [
        content.links.email.as_deref(),
        content.links.linkedin.as_deref(),
        content.links.github.as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect();
    if !links.is_empty() {
        let gap = 32.0;
        let mut x = cx - gap * (links.len() as f64 - 1.0) / 2.0;
        for link in links {
            commands.push(RenderCommand::DrawText {
                position: Point::new(x, y),
                text: link.into(),
                color: ThemeToken::LinkIcon,
                font_size: CAPTION_FONT,
                align: TextAlign::Center,
            });
            x += gap;
        }
    }

    let rects = contact_form_rects(band, width);
    let fields: [(&str, &str, Rect); 3] = [
        ("Your Name", form.name(), rects.name),
        ("Your Email", form.email(), rects.email),
        ("Your Message", form.message(), rects.message),
    ];
    for (placeholder, value, rect) in fields {
        commands.push(RenderCommand::DrawRect {
            rect,
            color: ThemeToken::FieldBackground,
            border_color: Some(ThemeToken::FieldBorder),
            link: None,
        });
        let (text, color) = if value.is_empty() {
            (placeholder, ThemeToken::TextMuted)
        } else {
            (value, ThemeToken::FieldText)
        };
        commands.push(RenderCommand::DrawText {
            position: Point::new(rect.x + 10.0, rect.y + FIELD_H / 2.0),
            text: text.into(),
            color,
            font_size: BODY_FONT,
            align: TextAlign::Left,
        });
    }

    commands.push(RenderCommand::DrawRect {
        rect: rects.button,
        color: ThemeToken::ButtonBackground,
        border_color: None,
        link: None,
    });
    centered_text(
        commands,
        cx,
        rects.button.y + FIELD_H / 2.0,
        "Send Message",
        ThemeToken::ButtonText,
        BODY_FONT,
    );
    let y = rects.status_y;

    if let Some(line) = form.status_line() {
        let color = match form.status() {
            FormStatus::Sent => ThemeToken::StatusOk,
            FormStatus::Failed => ThemeToken::StatusError,
            _ => ThemeToken::StatusInfo,
        };
        centered_text(commands, cx, y, line, color, BODY_FONT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::STATUS_SENT;
    use folio_protocol::SectionId;

    fn setup() -> (PageContent, PageLayout) {
        let content = PageContent::sample();
        let layout = PageLayout::compute(&content, 1280.0, 800.0);
        (content, layout)
    }

    fn group_ids(cmds: &[RenderCommand]) -> Vec<String> {
        cmds.iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { id } => Some(id.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn emits_one_group_per_section_in_order() {
        let (content, layout) = setup();
        let cmds = render_page(
            &content,
            &layout,
            &RevealFrame::all_visible(),
            &ContactForm::new(),
        );
        let ids = group_ids(&cmds);
        let expected: Vec<String> =
            SectionId::ALL.iter().map(|s| s.slug().to_string()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn opacity_and_transform_are_balanced() {
        let (content, layout) = setup();
        let cmds = render_page(
            &content,
            &layout,
            &RevealFrame::hidden(),
            &ContactForm::new(),
        );
        let pushes = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::PushOpacity { .. }))
            .count();
        let pops = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::PopOpacity))
            .count();
        assert_eq!(pushes, SectionId::ALL.len());
        assert_eq!(pushes, pops);
    }

    #[test]
    fn hidden_sections_render_at_zero_alpha_with_rise() {
        let (content, layout) = setup();
        let mut reveals = RevealFrame::hidden();
        reveals.set(SectionId::Home, 1.0);
        let cmds = render_page(&content, &layout, &reveals, &ContactForm::new());

        let alphas: Vec<f64> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::PushOpacity { alpha } => Some(*alpha),
                _ => None,
            })
            .collect();
        assert_eq!(alphas[0], 1.0);
        assert!(alphas[1..].iter().all(|&a| a == 0.0));

        let rises: Vec<f64> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::PushTransform { translate } => Some(translate.y),
                _ => None,
            })
            .collect();
        assert_eq!(rises[0], 0.0);
        assert!(rises[1..].iter().all(|&r| r == REVEAL_RISE));
    }

    #[test]
    fn form_values_replace_placeholders() {
        let (content, layout) = setup();
        let mut form = ContactForm::new();
        form.set_name("Ada");
        let cmds = render_page(&content, &layout, &RevealFrame::all_visible(), &form);

        let texts: Vec<&str> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawText { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert!(texts.contains(&"Ada"));
        assert!(!texts.contains(&"Your Name"));
        assert!(texts.contains(&"Your Email"));
    }

    #[test]
    fn contact_field_rects_stack_without_overlap() {
        let (_, layout) = setup();
        let band = layout.band(SectionId::Contact);
        let rects = contact_form_rects(&band, layout.width());
        assert!(rects.email.y >= rects.name.bottom());
        assert!(rects.message.y >= rects.email.bottom());
        assert!(rects.button.y >= rects.message.bottom());
        assert!(rects.status_y >= rects.button.bottom());
        assert!(rects.button.bottom() <= band.top + band.height);
    }

    #[test]
    fn status_line_appears_after_resolution() {
        let (content, layout) = setup();
        let mut form = ContactForm::new();
        form.set_name("A");
        form.set_email("a@b.com");
        form.set_message("hi");
        form.submit();
        form.resolve::<()>(Ok(()));

        let cmds = render_page(&content, &layout, &RevealFrame::all_visible(), &form);
        let has_status = cmds.iter().any(|c| {
            matches!(c, RenderCommand::DrawText { text, color, .. }
                if text == STATUS_SENT && *color == ThemeToken::StatusOk)
        });
        assert!(has_status);
    }
}
