pub mod error;
pub mod issuance;
