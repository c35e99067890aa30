use folio_protocol::SectionId;

use crate::model::PageLayout;

/// Maps the scroll offset to exactly one active section.
///
/// Recomputes on every scroll notification — no debouncing or throttling,
/// so tests see one state update per event. When no band contains the
/// offset the previous value stays; the only default is the first section
/// before any event has fired.
#[derive(Debug, Clone)]
pub struct ScrollTracker {
    active: SectionId,
}

impl ScrollTracker {
    pub fn new() -> Self {
        Self {
            active: SectionId::ALL[0],
        }
    }

    /// Feed one scroll offset; returns the active section afterwards.
    pub fn on_scroll(&mut self, layout: &PageLayout, offset: f64) -> SectionId {
        if let Some(id) = layout.section_at(offset) {
            self.active = id;
        }
        self.active
    }

    pub fn active(&self) -> SectionId {
        self.active
    }
}

impl Default for ScrollTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageContent;

    fn layout() -> PageLayout {
        PageLayout::compute(&PageContent::sample(), 1280.0, 800.0)
    }

    #[test]
    fn defaults_to_first_section() {
        assert_eq!(ScrollTracker::new().active(), SectionId::Home);
    }

    #[test]
    fn follows_band_boundaries() {
        let layout = layout();
        let mut tracker = ScrollTracker::new();

        assert_eq!(tracker.on_scroll(&layout, 0.0), SectionId::Home);

        let about = layout.band(SectionId::About);
        assert_eq!(tracker.on_scroll(&layout, about.top + 50.0), SectionId::About);

        let contact = layout.band(SectionId::Contact);
        assert_eq!(tracker.on_scroll(&layout, contact.top), SectionId::Contact);
    }

    #[test]
    fn active_is_always_a_member_of_the_fixed_set() {
        let layout = layout();
        let mut tracker = ScrollTracker::new();
        let mut offset = -500.0;
        while offset < layout.total_height() + 2000.0 {
            let active = tracker.on_scroll(&layout, offset);
            assert!(SectionId::ALL.contains(&active));
            offset += 137.0;
        }
    }

    #[test]
    fn unmatched_offset_keeps_previous_value() {
        let layout = layout();
        let mut tracker = ScrollTracker::new();
        tracker.on_scroll(&layout, layout.band(SectionId::Skills).top);
        assert_eq!(tracker.active(), SectionId::Skills);

        // Past the end of the page: no band matches, no fallback to Home.
        tracker.on_scroll(&layout, layout.total_height() + 500.0);
        assert_eq!(tracker.active(), SectionId::Skills);
    }
}
