pub mod filter;
pub mod fixture;
