//! Request handler module
//!
//! Responsible for request dispatch: page routes rendered from templates,
//! static asset serving, favicon, and the 404/405 fallbacks.

pub mod pages;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
