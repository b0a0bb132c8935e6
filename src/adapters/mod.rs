pub mod console_notifier;
pub mod csv_export;
pub mod file_config_adapter;
pub mod rand_adapter;
