pub mod json_audit_store;
