use folio_protocol::{Point, Rect, RenderCommand, SectionId, TextAlign, ThemeToken};

/// Height of the fixed navigation bar, in page units.
pub const NAV_HEIGHT: f64 = 56.0;

const FONT_SIZE: f64 = 16.0;
const ENTRY_PADDING: f64 = 16.0;
const ENTRY_GAP: f64 = 8.0;

/// Approximate rendered width of a label at the nav font size. Exact
/// metrics belong to the renderer; this only has to keep entries from
/// overlapping.
fn label_width(label: &str) -> f64 {
    label.chars().count() as f64 * FONT_SIZE * 0.55
}

/// Render the fixed nav bar with one entry per section, centered as a row.
///
/// The active section's entry is drawn with its gradient; every entry's
/// backing rect carries a `link` so renderers can hit-test clicks and
/// smooth-scroll to the section anchor. Emitted in screen space — the nav
/// does not scroll with the page.
pub fn render_nav(active: SectionId, width: f64) -> Vec<RenderCommand> {
    let mut commands = Vec::with_capacity(SectionId::ALL.len() * 2 + 4);
    commands.push(RenderCommand::BeginGroup { id: "nav".into() });

    commands.push(RenderCommand::DrawRect {
        rect: Rect::new(0.0, 0.0, width, NAV_HEIGHT),
        color: ThemeToken::NavBackground,
        border_color: None,
        link: None,
    });
    commands.push(RenderCommand::DrawLine {
        from: Point::new(0.0, NAV_HEIGHT),
        to: Point::new(width, NAV_HEIGHT),
        color: ThemeToken::Border,
        width: 1.0,
    });

    let total: f64 = SectionId::ALL
        .iter()
        .map(|id| label_width(id.label()) + 2.0 * ENTRY_PADDING)
        .sum::<f64>()
        + ENTRY_GAP * (SectionId::ALL.len() as f64 - 1.0);
    let mut x = ((width - total) / 2.0).max(0.0);

    for id in SectionId::ALL {
        let entry_width = label_width(id.label()) + 2.0 * ENTRY_PADDING;
        commands.push(RenderCommand::DrawRect {
            rect: Rect::new(x, 0.0, entry_width, NAV_HEIGHT),
            color: ThemeToken::NavBackground,
            border_color: None,
            link: Some(id),
        });

        let center = Point::new(x + entry_width / 2.0, NAV_HEIGHT / 2.0);
        if id == active {
            commands.push(RenderCommand::DrawGradientText {
                position: center,
                text: id.label().into(),
                section: id,
                font_size: FONT_SIZE,
                align: TextAlign::Center,
            });
        } else {
            commands.push(RenderCommand::DrawText {
                position: center,
                text: id.label().into(),
                color: ThemeToken::NavText,
                font_size: FONT_SIZE,
                align: TextAlign::Center,
            });
        }
        x += entry_width + ENTRY_GAP;
    }

    commands.push(RenderCommand::EndGroup);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_link_target_per_section() {
        let cmds = render_nav(SectionId::Home, 1280.0);
        let links: Vec<SectionId> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawRect { link: Some(id), .. } => Some(*id),
                _ => None,
            })
            .collect();
        assert_eq!(links, SectionId::ALL);
    }

    #[test]
    fn only_the_active_entry_gets_the_gradient() {
        let cmds = render_nav(SectionId::Skills, 1280.0);
        let gradient: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::DrawGradientText { section, text, .. } => {
                    Some((*section, text.clone()))
                }
                _ => None,
            })
            .collect();
        assert_eq!(gradient, vec![(SectionId::Skills, "Skills".to_string())]);

        let plain = cmds
            .iter()
            .filter(|c| matches!(c, RenderCommand::DrawText { .. }))
            .count();
        assert_eq!(plain, SectionId::ALL.len() - 1);
    }

    #[test]
    fn entries_do_not_overlap() {
        let cmds = render_nav(SectionId::Home, 1280.0);
        let mut last_right = f64::NEG_INFINITY;
        for c in &cmds {
            if let RenderCommand::DrawRect { rect, link: Some(_), .. } = c {
                assert!(rect.x >= last_right);
                last_right = rect.x + rect.w;
            }
        }
    }
}
