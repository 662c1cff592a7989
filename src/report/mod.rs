pub mod aggregate;
pub mod daily;
pub mod ranking;
