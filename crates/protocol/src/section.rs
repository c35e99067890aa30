use serde::{Deserialize, Serialize};

/// The fixed, ordered set of page sections.
///
/// Declaration order is load-bearing: the scroll tracker iterates it in
/// full and the last section whose band contains the offset wins, so
/// reordering variants changes observable behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Projects,
    Skills,
    Contact,
}

impl SectionId {
    /// All sections in page order.
    pub const ALL: [SectionId; 5] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Projects,
        SectionId::Skills,
        SectionId::Contact,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Projects => "projects",
            SectionId::Skills => "skills",
            SectionId::Contact => "contact",
        }
    }

    /// Nav label: capitalized slug.
    pub fn label(self) -> &'static str {
        match self {
            SectionId::Home => "Home",
            SectionId::About => "About",
            SectionId::Projects => "Projects",
            SectionId::Skills => "Skills",
            SectionId::Contact => "Contact",
        }
    }

    pub fn from_slug(s: &str) -> Option<SectionId> {
        SectionId::ALL.into_iter().find(|id| id.slug() == s)
    }

    /// The display gradient assigned to this section's headings and its
    /// active nav entry.
    pub fn gradient(self) -> GradientKey {
        match self {
            SectionId::Home => GradientKey::BlueToPurple,
            SectionId::About => GradientKey::GreenToBlue,
            SectionId::Projects => GradientKey::YellowToRed,
            SectionId::Skills => GradientKey::PinkToPurple,
            SectionId::Contact => GradientKey::IndigoToPurple,
        }
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Named gradient styles, one per section. Renderers resolve the two
/// endpoint colors through their theme tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientKey {
    BlueToPurple,
    GreenToBlue,
    YellowToRed,
    PinkToPurple,
    IndigoToPurple,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_is_page_order() {
        assert_eq!(SectionId::ALL[0], SectionId::Home);
        assert_eq!(SectionId::ALL[4], SectionId::Contact);
    }

    #[test]
    fn slug_roundtrip() {
        for id in SectionId::ALL {
            assert_eq!(SectionId::from_slug(id.slug()), Some(id));
        }
        assert_eq!(SectionId::from_slug("blog"), None);
    }

    #[test]
    fn serde_uses_slug() {
        let json = serde_json::to_string(&SectionId::Projects).unwrap();
        assert_eq!(json, "\"projects\"");
    }

    #[test]
    fn every_section_has_a_distinct_gradient() {
        let mut keys: Vec<_> = SectionId::ALL.iter().map(|s| s.gradient()).collect();
        keys.dedup();
        assert_eq!(keys.len(), SectionId::ALL.len());
    }
}
