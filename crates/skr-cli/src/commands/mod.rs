pub mod account;
pub mod sign_in;
