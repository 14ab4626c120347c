pub mod approval_panel;
pub mod currency;
pub mod filter;
pub mod form;
pub mod history;
pub mod list;
pub mod receipt;
pub mod transition_selector;

pub use approval_panel::ApprovalPanel;
pub use filter::ExpenseFilters;
pub use form::ExpenseForm;
pub use history::StatusHistory;
pub use list::ExpenseTable;
pub use transition_selector::TransitionSelector;
