pub mod json_settings_store;
