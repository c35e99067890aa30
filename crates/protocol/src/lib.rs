pub mod commands;
pub mod message;
pub mod section;
pub mod theme;
pub mod types;

pub use commands::{RenderCommand, TextAlign};
pub use message::ContactMessage;
pub use section::{GradientKey, SectionId};
pub use theme::ThemeToken;
pub use types::{Point, Rect, Viewport};
