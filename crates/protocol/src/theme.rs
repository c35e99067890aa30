use serde::{Deserialize, Serialize};

use crate::section::GradientKey;

/// Semantic color tokens resolved by the renderer's active theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    Background,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,

    NavBackground,
    NavText,
    NavHover,

    CardBackground,
    CardBorder,

    FieldBackground,
    FieldBorder,
    FieldText,

    ButtonBackground,
    ButtonHover,
    ButtonText,

    StatusInfo,
    StatusOk,
    StatusError,

    LinkIcon,
    LinkIconHover,

    /// First stop of a section gradient.
    GradientStart(GradientKey),
    /// Second stop of a section gradient.
    GradientEnd(GradientKey),
}
