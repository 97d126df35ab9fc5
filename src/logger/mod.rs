//! Logger module
//!
//! Provides logging utilities for the site server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use crate::config::Config;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    if writer::is_initialized() {
        writer::get().write_info(message);
    } else {
        println!("{message}");
    }
}

/// Write to error log
fn write_error(message: &str) {
    if writer::is_initialized() {
        writer::get().write_error(message);
    } else {
        eprintln!("{message}");
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    if writer::is_initialized() {
        writer::get().write_access(message);
    } else {
        println!("{message}");
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Site server started successfully");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!(
        "Environment: {}",
        config.server.environment.as_str()
    ));
    write_info(&format!("Log level: {}", config.logging.level));
    write_info(&format!("Templates: {}/", config.site.template_root));
    write_info(&format!(
        "Static assets: {}/ mounted at {}",
        config.site.static_root, config.site.static_route
    ));
    for blueprint in &config.blueprints {
        write_info(&format!(
            "Blueprint '{}': {} page(s) under '{}'",
            blueprint.name,
            blueprint.pages.len(),
            if blueprint.url_prefix.is_empty() {
                "/"
            } else {
                &blueprint.url_prefix
            }
        ));
    }
    if let Some(workers) = config.server.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        write_info(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

/// Log which source the startup secret came from
pub fn log_secret_source(source: &str) {
    write_info(&format!("[CONFIG] Secret key resolved from {source}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&entry.format(format));
}

pub fn log_connection_error(err: &hyper::Error) {
    // Client disconnects during keep-alive are noise, not errors
    if !err.is_incomplete_message() {
        log_error(&format!("Connection error: {err}"));
    }
}
