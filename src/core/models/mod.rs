pub mod audit_entry;
pub mod settings;
pub mod usage;
