pub mod nav;
pub mod page;

pub use nav::{NAV_HEIGHT, render_nav};
pub use page::{ContactFormRects, contact_form_rects, render_page};
