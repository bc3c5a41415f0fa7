//! Signal handling for graceful shutdown.
//!
//! Centralized Ctrl+C handling built around an `AtomicBool` flag shared
//! across threads. The walker checks the flag per entry and the hasher
//! checks it at every chunk-read boundary, so a long scan over a large
//! tree aborts promptly.
//!
//! When a signal is received the flag is set, a short message goes to
//! stderr, and the application exits with code 130 (128 + SIGINT).

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shutdown coordinator shared between the signal handler and workers.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    /// Set to `true` once shutdown has been requested
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a handler with shutdown not requested.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the flag for passing to worker threads.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the flag to `false`. Useful when a handler is reused
    /// across tests.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the Ctrl+C handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// Call once, early in startup. If a handler is already installed (for
/// instance by a previous call in the same test process), the existing
/// one is reset and reused; if the OS hook cannot be registered at all,
/// an unhooked handler is returned so manual shutdown requests still
/// work and parallel tests do not fail.
///
/// # Errors
///
/// Currently always succeeds; the error type is kept for API stability.
pub fn install_handler() -> Result<ShutdownHandler, SignalError> {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return Ok(handler.clone());
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = writeln!(std::io::stderr(), "\nInterrupted. Cleaning up...");
        let _ = std::io::stderr().flush();
        log::info!("Shutdown signal received");
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler.clone());
            Ok(handler)
        }
        Err(_) => {
            if let Some(existing) = GLOBAL_HANDLER.get() {
                existing.reset();
                return Ok(existing.clone());
            }
            // Hook registered elsewhere; fall back to an unhooked handler
            log::debug!("Ctrl+C handler already registered, using unhooked handler");
            let fallback = ShutdownHandler::new();
            let _ = GLOBAL_HANDLER.set(fallback.clone());
            Ok(fallback)
        }
    }
}

/// Create a handler without installing any signal hooks.
///
/// Useful for tests or for managing the shutdown flag manually.
#[must_use]
pub fn create_handler() -> ShutdownHandler {
    ShutdownHandler::new()
}
