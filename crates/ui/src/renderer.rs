//! Interprets the core's command stream onto an [`egui::Painter`].
//!
//! The interpreter is stateful only within a single call: a translate
//! stack for reveal slide-ins, an opacity stack for fades, and a clip
//! stack. Page-space coordinates land on screen via `origin`, which the
//! app sets to `(0, -scroll_y)` for the page and zero for the nav.

use egui::{Color32, CornerRadius, FontId, Pos2, Stroke, StrokeKind, Vec2};
use folio_protocol::{Point, Rect, RenderCommand, SectionId, TextAlign};

use crate::theme::{self, ThemeMode};

const CARD_ROUNDING: u8 = 8;

/// A clickable region produced by a `link`-carrying rect, in screen space.
#[derive(Debug, Clone, Copy)]
pub struct LinkRegion {
    pub rect: egui::Rect,
    pub target: SectionId,
}

pub fn paint(
    painter: &egui::Painter,
    commands: &[RenderCommand],
    origin: Vec2,
    mode: ThemeMode,
) -> Vec<LinkRegion> {
    let mut links = Vec::new();
    let mut offsets: Vec<Vec2> = vec![origin];
    let mut alphas: Vec<f32> = vec![1.0];
    let mut clips: Vec<egui::Rect> = Vec::new();

    for command in commands {
        let offset = *offsets.last().unwrap_or(&origin);
        let alpha = *alphas.last().unwrap_or(&1.0);
        let scoped = match clips.last() {
            Some(clip) => painter.with_clip_rect(*clip),
            None => painter.clone(),
        };

        match command {
            RenderCommand::DrawRect {
                rect,
                color,
                border_color,
                link,
            } => {
                let screen = to_screen(rect, offset);
                if let Some(target) = link {
                    links.push(LinkRegion {
                        rect: screen,
                        target: *target,
                    });
                }
                if alpha <= 0.0 {
                    continue;
                }
                let rounding = if border_color.is_some() {
                    CornerRadius::same(CARD_ROUNDING)
                } else {
                    CornerRadius::ZERO
                };
                scoped.rect_filled(screen, rounding, fade(theme::resolve(*color, mode), alpha));
                if let Some(border) = border_color {
                    scoped.rect_stroke(
                        screen,
                        rounding,
                        Stroke::new(1.0, fade(theme::resolve(*border, mode), alpha)),
                        StrokeKind::Inside,
                    );
                }
            }

            RenderCommand::DrawText {
                position,
                text,
                color,
                font_size,
                align,
            } => {
                if alpha <= 0.0 {
                    continue;
                }
                let fill = fade(theme::resolve(*color, mode), alpha);
                let galley = scoped.layout_no_wrap(
                    text.clone(),
                    FontId::proportional(*font_size as f32),
                    fill,
                );
                let top_left = anchor(position, offset, *align, galley.size());
                scoped.galley(top_left, galley, fill);
            }

            RenderCommand::DrawGradientText {
                position,
                text,
                section,
                font_size,
                align,
            } => {
                if alpha <= 0.0 {
                    continue;
                }
                let (start, end) = theme::gradient(section.gradient(), mode);
                let (start, end) = (fade(start, alpha), fade(end, alpha));

                let galley = scoped.layout_no_wrap(
                    text.clone(),
                    FontId::proportional(*font_size as f32),
                    start,
                );
                let size = galley.size();
                let top_left = anchor(position, offset, *align, size);
                let bounds = egui::Rect::from_min_size(top_left, size);

                // Two clipped passes approximate the horizontal gradient:
                // left half in the start color, right half in the end color.
                let mid = bounds.center().x;
                let left = bounds.with_max_x(mid);
                let right = bounds.with_min_x(mid);
                scoped
                    .with_clip_rect(left)
                    .galley_with_override_text_color(top_left, galley.clone(), start);
                scoped
                    .with_clip_rect(right)
                    .galley_with_override_text_color(top_left, galley, end);
            }

            RenderCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => {
                if alpha <= 0.0 {
                    continue;
                }
                scoped.line_segment(
                    [to_pos(from, offset), to_pos(to, offset)],
                    Stroke::new(*width as f32, fade(theme::resolve(*color, mode), alpha)),
                );
            }

            RenderCommand::SetClip { rect } => clips.push(to_screen(rect, offset)),
            RenderCommand::ClearClip => {
                clips.pop();
            }

            RenderCommand::PushTransform { translate } => {
                offsets.push(offset + Vec2::new(translate.x as f32, translate.y as f32));
            }
            RenderCommand::PopTransform => {
                if offsets.len() > 1 {
                    offsets.pop();
                }
            }

            RenderCommand::PushOpacity { alpha: level } => {
                alphas.push(alpha * (*level).clamp(0.0, 1.0) as f32);
            }
            RenderCommand::PopOpacity => {
                if alphas.len() > 1 {
                    alphas.pop();
                }
            }

            RenderCommand::BeginGroup { .. } | RenderCommand::EndGroup => {}
        }
    }

    links
}

fn fade(color: Color32, alpha: f32) -> Color32 {
    if alpha >= 1.0 {
        color
    } else {
        color.gamma_multiply(alpha)
    }
}

fn to_pos(p: &Point, offset: Vec2) -> Pos2 {
    Pos2::new(p.x as f32, p.y as f32) + offset
}

fn to_screen(r: &Rect, offset: Vec2) -> egui::Rect {
    egui::Rect::from_min_size(
        to_pos(&Point::new(r.x, r.y), offset),
        Vec2::new(r.w as f32, r.h as f32),
    )
}

/// Text positions are horizontal anchors at the vertical center of the
/// line, matching how the emitter lays text out.
fn anchor(position: &Point, offset: Vec2, align: TextAlign, size: Vec2) -> Pos2 {
    let p = to_pos(position, offset);
    let x = match align {
        TextAlign::Left => p.x,
        TextAlign::Center => p.x - size.x / 2.0,
        TextAlign::Right => p.x - size.x,
    };
    Pos2::new(x, p.y - size.y / 2.0)
}
