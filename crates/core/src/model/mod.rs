pub mod content;
pub mod layout;

pub use content::{ContentError, Education, PageContent, Profile, Project, SocialLinks};
pub use layout::{PageLayout, SectionBand};
