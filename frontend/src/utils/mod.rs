pub mod download;
pub mod poll;
pub mod storage;
pub mod time;
