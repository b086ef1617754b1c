pub mod audit;
pub mod check;
pub mod record;
pub mod set_key;
pub mod settings;
pub mod stats;
pub mod verify;
