pub mod amount;
pub mod calendar;
pub mod counterparty;
pub mod currency;
pub mod instruction;
pub mod side;
