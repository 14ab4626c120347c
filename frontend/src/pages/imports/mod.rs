pub mod panel;
pub mod preview;
pub mod repository;
pub mod view_model;

pub use panel::ImportPage;
