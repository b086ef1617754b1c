pub mod audit;
pub mod cipher;
pub mod settings_store;
pub mod verifier;
