pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod home;
pub mod imports;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod register;
pub mod reports;
pub mod vendors;
