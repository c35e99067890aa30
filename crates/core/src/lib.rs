pub mod form;
pub mod model;
pub mod observe;
pub mod views;
