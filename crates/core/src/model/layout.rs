use folio_protocol::{Rect, SectionId};

use crate::model::content::PageContent;

/// Estimated row heights used when sizing sections beyond one screen.
const HEADING_BLOCK: f64 = 120.0;
const PROJECT_ROW: f64 = 220.0;
const SKILL_ROW: f64 = 110.0;
const EDUCATION_ROW: f64 = 90.0;
const PARAGRAPH_ROW: f64 = 70.0;
const FORM_BLOCK: f64 = 320.0;
const PROJECT_COLS: usize = 3;
const SKILL_COLS: usize = 4;

/// One section's vertical band on the page: `[top, top + height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectionBand {
    pub id: SectionId,
    pub top: f64,
    pub height: f64,
}

impl SectionBand {
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.top && offset < self.top + self.height
    }

    pub fn rect(&self, width: f64) -> Rect {
        Rect::new(0.0, self.top, width, self.height)
    }
}

/// Fixed page geometry for one viewport size.
///
/// Sections are laid out once per resize and never created or destroyed;
/// every band covers at least one screen height, mirroring the original
/// full-screen section layout.
#[derive(Debug, Clone)]
pub struct PageLayout {
    bands: Vec<SectionBand>,
    width: f64,
    screen_height: f64,
}

impl PageLayout {
    pub fn compute(content: &PageContent, width: f64, screen_height: f64) -> Self {
        let mut bands = Vec::with_capacity(SectionId::ALL.len());
        let mut top = 0.0;
        for id in SectionId::ALL {
            let height = content_height(content, id).max(screen_height);
            bands.push(SectionBand { id, top, height });
            top += height;
        }
        Self {
            bands,
            width,
            screen_height,
        }
    }

    pub fn bands(&self) -> &[SectionBand] {
        &self.bands
    }

    pub fn band(&self, id: SectionId) -> SectionBand {
        // Every SectionId has a band by construction.
        self.bands[SectionId::ALL.iter().position(|&s| s == id).unwrap_or(0)]
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn screen_height(&self) -> f64 {
        self.screen_height
    }

    pub fn total_height(&self) -> f64 {
        self.bands.last().map(|b| b.top + b.height).unwrap_or(0.0)
    }

    /// The scroll offset a nav click jumps to.
    pub fn anchor(&self, id: SectionId) -> f64 {
        self.band(id).top
    }

    /// The section whose band contains `offset`, or `None` when no band
    /// does (past the end of the page).
    ///
    /// Iterates every band without stopping early, so when bands overlap
    /// the last match in declaration order wins. The original scroll
    /// handler behaves exactly this way and the tie-break is observable,
    /// so it stays.
    pub fn section_at(&self, offset: f64) -> Option<SectionId> {
        let mut found = None;
        for band in &self.bands {
            if band.contains(offset) {
                found = Some(band.id);
            }
        }
        found
    }
}

fn content_height(content: &PageContent, id: SectionId) -> f64 {
    match id {
        SectionId::Home => HEADING_BLOCK + 300.0,
        SectionId::About => {
            let rows = content
                .about
                .len()
                .max(content.education.len()) as f64;
            HEADING_BLOCK + rows * PARAGRAPH_ROW.max(EDUCATION_ROW)
        }
        SectionId::Projects => {
            let rows = content.projects.len().div_ceil(PROJECT_COLS) as f64;
            HEADING_BLOCK + rows * PROJECT_ROW
        }
        SectionId::Skills => {
            let rows = content.skills.len().div_ceil(SKILL_COLS) as f64;
            HEADING_BLOCK + rows * SKILL_ROW
        }
        SectionId::Contact => HEADING_BLOCK + FORM_BLOCK,
    }
}
