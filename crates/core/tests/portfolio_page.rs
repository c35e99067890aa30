//! Integration test: drive a full synthetic scroll session through the
//! viewport hub and verify nav tracking, one-shot reveals, and the contact
//! form lifecycle against the page layout.

use std::sync::{Arc, Mutex};

use folio_core::form::{ContactForm, STATUS_FAILED, STATUS_SENT};
use folio_core::model::{PageContent, PageLayout};
use folio_core::observe::{RevealController, ScrollTracker, ViewportHub};
use folio_protocol::{SectionId, Viewport};

const WIDTH: f64 = 1280.0;
const SCREEN: f64 = 800.0;

#[test]
fn scroll_session_tracks_nav_and_reveals_each_section_once() {
    let content = PageContent::sample();
    let layout = Arc::new(PageLayout::compute(&content, WIDTH, SCREEN));

    let hub = ViewportHub::new();
    let tracker = Arc::new(Mutex::new(ScrollTracker::new()));
    let reveals = Arc::new(Mutex::new(vec![RevealController::new(); SectionId::ALL.len()]));
    let fire_log = Arc::new(Mutex::new(Vec::new()));

    let tr = tracker.clone();
    let lo = layout.clone();
    let _nav_sub = hub.subscribe(move |vp: Viewport| {
        tr.lock().unwrap().on_scroll(&lo, vp.y);
    });

    let rv = reveals.clone();
    let lo = layout.clone();
    let log = fire_log.clone();
    let _reveal_sub = hub.subscribe(move |vp: Viewport| {
        let mut controllers = rv.lock().unwrap();
        for (band, ctl) in lo.bands().iter().zip(controllers.iter_mut()) {
            let ratio = vp.intersection_ratio(&band.rect(WIDTH));
            if ctl.observe(ratio, vp.y / 1000.0) {
                log.lock().unwrap().push(band.id);
            }
        }
    });

    // Scroll from top to bottom and back up in small steps.
    let total = layout.total_height();
    let mut offsets: Vec<f64> = (0..)
        .map(|i| i as f64 * 120.0)
        .take_while(|&y| y < total)
        .collect();
    offsets.extend(offsets.clone().into_iter().rev());

    for y in offsets {
        hub.emit(Viewport::new(y, WIDTH, SCREEN));
        let active = tracker.lock().unwrap().active();
        assert!(SectionId::ALL.contains(&active));
    }

    // Every section revealed exactly once, in page order, and scrolling
    // back up replayed nothing.
    assert_eq!(*fire_log.lock().unwrap(), SectionId::ALL.to_vec());
    assert!(reveals.lock().unwrap().iter().all(|c| c.is_visible()));

    // Back at the top the tracker is on Home again.
    assert_eq!(tracker.lock().unwrap().active(), SectionId::Home);
}

#[test]
fn band_boundaries_map_offsets() {
    // With an 800-unit screen: home [0, 800), about [800, 1600).
    let content = PageContent::sample();
    let layout = PageLayout::compute(&content, WIDTH, SCREEN);
    let about_top = layout.band(SectionId::About).top;
    assert_eq!(about_top, 800.0);

    let mut tracker = ScrollTracker::new();
    assert_eq!(tracker.on_scroll(&layout, 850.0), SectionId::About);
    assert_eq!(tracker.on_scroll(&layout, 0.0), SectionId::Home);
}

#[test]
fn unmounted_block_ignores_pending_notifications() {
    let hub = ViewportHub::new();
    let controller = Arc::new(Mutex::new(RevealController::new()));

    let ctl = controller.clone();
    let sub = hub.subscribe(move |vp: Viewport| {
        ctl.lock().unwrap().observe(1.0, vp.y);
    });

    // Block removed before any geometry arrives.
    drop(sub);
    hub.emit(Viewport::new(0.0, WIDTH, SCREEN));

    // No late transition, no panic.
    assert!(!controller.lock().unwrap().is_visible());
    assert_eq!(hub.subscriber_count(), 0);
}

#[test]
fn contact_form_round_trip_against_the_store_boundary() {
    let mut form = ContactForm::new();
    form.set_name("A");
    form.set_email("a@b.com");
    form.set_message("hi");

    // Failure leaves the draft for manual resubmission.
    let msg = form.submit().expect("draft is complete");
    assert_eq!((msg.name.as_str(), msg.email.as_str()), ("A", "a@b.com"));
    form.resolve(Err("permission denied"));
    assert_eq!(form.status_line(), Some(STATUS_FAILED));
    assert_eq!(form.message(), "hi");

    // Success clears it.
    form.submit().expect("failed submission can be retried");
    form.resolve::<()>(Ok(()));
    assert_eq!(form.status_line(), Some(STATUS_SENT));
    assert!(form.draft().name.is_empty() && form.draft().message.is_empty());
}
