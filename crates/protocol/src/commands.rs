use serde::{Deserialize, Serialize};

use crate::section::SectionId;
use crate::theme::ThemeToken;
use crate::types::{Point, Rect};

/// A single, stateless render instruction.
///
/// The core emits a `Vec<RenderCommand>` per frame. Renderers consume the
/// list sequentially — each command carries all the data it needs, so the
/// same list drives the terminal, egui, and canvas front ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum RenderCommand {
    /// Draw a filled rectangle, optionally bordered. `link` marks the rect
    /// as a nav hit target that scrolls to the named section on click.
    DrawRect {
        rect: Rect,
        color: ThemeToken,
        border_color: Option<ThemeToken>,
        link: Option<SectionId>,
    },

    /// Draw a text string at a position.
    DrawText {
        position: Point,
        text: String,
        color: ThemeToken,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a text string filled with a horizontal gradient between the two
    /// endpoint tokens of its section's gradient key. Used for headings and
    /// the active nav entry.
    DrawGradientText {
        position: Point,
        text: String,
        section: SectionId,
        font_size: f64,
        align: TextAlign,
    },

    /// Draw a line segment.
    DrawLine {
        from: Point,
        to: Point,
        color: ThemeToken,
        width: f64,
    },

    /// Restrict subsequent drawing to a rectangular region.
    SetClip { rect: Rect },

    /// Remove the active clip region.
    ClearClip,

    /// Push a translation (applied to all subsequent commands until the
    /// matching `PopTransform`). Reveal slide-in is expressed this way.
    PushTransform { translate: Point },

    /// Pop the most recent transform.
    PopTransform,

    /// Multiply subsequent drawing by `alpha` in `0.0..=1.0` until the
    /// matching `PopOpacity`. Reveal fade-in is expressed this way.
    PushOpacity { alpha: f64 },

    /// Pop the most recent opacity level.
    PopOpacity,

    /// Begin a logical group (a section, the nav bar). Renderers may use
    /// this for batching or accessibility.
    BeginGroup { id: String },

    /// End the current group.
    EndGroup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_serialize_to_json() {
        let cmds = vec![
            RenderCommand::PushOpacity { alpha: 0.5 },
            RenderCommand::DrawGradientText {
                position: Point::new(10.0, 20.0),
                text: "About Me".into(),
                section: SectionId::About,
                font_size: 40.0,
                align: TextAlign::Center,
            },
            RenderCommand::PopOpacity,
        ];
        let json = serde_json::to_string(&cmds).unwrap();
        let back: Vec<RenderCommand> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 3);
        assert!(matches!(
            back[1],
            RenderCommand::DrawGradientText { section: SectionId::About, .. }
        ));
    }
}
