use folio_protocol::{GradientKey, ThemeToken};

/// Resolved RGBA color for egui rendering.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl ResolvedColor {
    const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_color32(self) -> egui::Color32 {
        egui::Color32::from_rgba_unmultiplied(self.r, self.g, self.b, self.a)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

pub fn resolve(token: ThemeToken, mode: ThemeMode) -> egui::Color32 {
    match mode {
        ThemeMode::Dark => resolve_dark(token),
        ThemeMode::Light => resolve_light(token),
    }
    .to_color32()
}

/// Both endpoint colors of a section gradient.
pub fn gradient(key: GradientKey, mode: ThemeMode) -> (egui::Color32, egui::Color32) {
    (
        resolve(ThemeToken::GradientStart(key), mode),
        resolve(ThemeToken::GradientEnd(key), mode),
    )
}

/// Tailwind endpoint pairs the original page used for its headings.
const fn gradient_endpoints(key: GradientKey) -> (ResolvedColor, ResolvedColor) {
    match key {
        // blue-500 → purple-600
        GradientKey::BlueToPurple => {
            (ResolvedColor::rgb(0x3b, 0x82, 0xf6), ResolvedColor::rgb(0x93, 0x33, 0xea))
        }
        // green-400 → blue-500
        GradientKey::GreenToBlue => {
            (ResolvedColor::rgb(0x4a, 0xde, 0x80), ResolvedColor::rgb(0x3b, 0x82, 0xf6))
        }
        // yellow-400 → red-500
        GradientKey::YellowToRed => {
            (ResolvedColor::rgb(0xfa, 0xcc, 0x15), ResolvedColor::rgb(0xef, 0x44, 0x44))
        }
        // pink-500 → purple-500
        GradientKey::PinkToPurple => {
            (ResolvedColor::rgb(0xec, 0x48, 0x99), ResolvedColor::rgb(0xa8, 0x55, 0xf7))
        }
        // indigo-500 → purple-600
        GradientKey::IndigoToPurple => {
            (ResolvedColor::rgb(0x63, 0x66, 0xf1), ResolvedColor::rgb(0x93, 0x33, 0xea))
        }
    }
}

fn resolve_dark(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0x00, 0x00, 0x00),
        Surface => ResolvedColor::rgb(0x18, 0x18, 0x25),
        Border => ResolvedColor::rgb(0x37, 0x41, 0x51),

        TextPrimary => ResolvedColor::rgb(0xff, 0xff, 0xff),
        TextSecondary => ResolvedColor::rgb(0xd1, 0xd5, 0xdb),
        TextMuted => ResolvedColor::rgb(0x9c, 0xa3, 0xaf),

        // The nav bar stays light over the dark page, as the original did.
        NavBackground => ResolvedColor::rgba(0xff, 0xff, 0xff, 230),
        NavText => ResolvedColor::rgb(0x1f, 0x29, 0x37),
        NavHover => ResolvedColor::rgba(0x1f, 0x29, 0x37, 20),

        CardBackground => ResolvedColor::rgb(0x0a, 0x0a, 0x12),
        CardBorder => ResolvedColor::rgb(0x45, 0x47, 0x5a),

        FieldBackground => ResolvedColor::rgb(0x1f, 0x29, 0x37),
        FieldBorder => ResolvedColor::rgb(0x37, 0x41, 0x51),
        FieldText => ResolvedColor::rgb(0xff, 0xff, 0xff),

        ButtonBackground => ResolvedColor::rgb(0x43, 0x38, 0xca),
        ButtonHover => ResolvedColor::rgb(0x31, 0x2e, 0x81),
        ButtonText => ResolvedColor::rgb(0xff, 0xff, 0xff),

        StatusInfo => ResolvedColor::rgb(0xd1, 0xd5, 0xdb),
        StatusOk => ResolvedColor::rgb(0x4a, 0xde, 0x80),
        StatusError => ResolvedColor::rgb(0xf8, 0x71, 0x71),

        LinkIcon => ResolvedColor::rgb(0xc7, 0xd2, 0xfe),
        LinkIconHover => ResolvedColor::rgb(0x63, 0x66, 0xf1),

        GradientStart(key) => gradient_endpoints(key).0,
        GradientEnd(key) => gradient_endpoints(key).1,
    }
}

fn resolve_light(token: ThemeToken) -> ResolvedColor {
    use ThemeToken::*;
    match token {
        Background => ResolvedColor::rgb(0xfa, 0xfa, 0xfc),
        Surface => ResolvedColor::rgb(0xf0, 0xf0, 0xf5),
        Border => ResolvedColor::rgb(0xd2, 0xd2, 0xdc),

        TextPrimary => ResolvedColor::rgb(0x14, 0x14, 0x1e),
        TextSecondary => ResolvedColor::rgb(0x50, 0x50, 0x64),
        TextMuted => ResolvedColor::rgb(0x64, 0x64, 0x6e),

        NavBackground => ResolvedColor::rgba(0xff, 0xff, 0xff, 240),
        NavText => ResolvedColor::rgb(0x28, 0x28, 0x32),
        NavHover => ResolvedColor::rgba(0x00, 0x00, 0x00, 10),

        CardBackground => ResolvedColor::rgb(0xff, 0xff, 0xff),
        CardBorder => ResolvedColor::rgb(0xd2, 0xd2, 0xdc),

        FieldBackground => ResolvedColor::rgb(0xf5, 0xf5, 0xf8),
        FieldBorder => ResolvedColor::rgb(0xc8, 0xc8, 0xd2),
        FieldText => ResolvedColor::rgb(0x14, 0x14, 0x1e),

        ButtonBackground => ResolvedColor::rgb(0x43, 0x38, 0xca),
        ButtonHover => ResolvedColor::rgb(0x37, 0x2f, 0xa6),
        ButtonText => ResolvedColor::rgb(0xff, 0xff, 0xff),

        StatusInfo => ResolvedColor::rgb(0x50, 0x50, 0x64),
        StatusOk => ResolvedColor::rgb(0x16, 0xa3, 0x4a),
        StatusError => ResolvedColor::rgb(0xd3, 0x2f, 0x2f),

        LinkIcon => ResolvedColor::rgb(0x43, 0x38, 0xca),
        LinkIconHover => ResolvedColor::rgb(0x31, 0x2e, 0x81),

        GradientStart(key) => gradient_endpoints(key).0,
        GradientEnd(key) => gradient_endpoints(key).1,
    }
}

/// egui widget visuals matching the page theme.
pub fn apply_visuals(ctx: &egui::Context, mode: ThemeMode) {
    let mut v = match mode {
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::Light => egui::Visuals::light(),
    };
    v.panel_fill = resolve(ThemeToken::Background, mode);
    v.extreme_bg_color = resolve(ThemeToken::FieldBackground, mode);
    v.widgets.inactive.bg_fill = resolve(ThemeToken::FieldBackground, mode);
    v.widgets.active.bg_fill = resolve(ThemeToken::ButtonBackground, mode);
    v.hyperlink_color = resolve(ThemeToken::LinkIconHover, mode);
    v.error_fg_color = resolve(ThemeToken::StatusError, mode);
    ctx.set_visuals(v);
}
