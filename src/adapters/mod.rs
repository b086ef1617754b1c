pub mod audit;
pub mod cipher;
pub mod json_file;
pub mod settings;
pub mod verifier;
