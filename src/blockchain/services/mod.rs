pub mod safe;
pub mod transactions;
