pub mod delete_dialog;
pub mod empty_state;
pub mod error;
pub mod feedback;
pub mod guard;
pub mod layout;
pub mod pagination;
pub mod status_badge;
