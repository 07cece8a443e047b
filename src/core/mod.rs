// Core types
pub mod types;
pub use types::*;

// Trace channel and event log
pub mod trace;

// Holder instrumentation
pub mod registry;

// Shared lock resource
pub mod resource;
pub use resource::{LockGuard, LockResource};

// Worker execution model
pub mod worker;
pub use worker::{ReleasePolicy, Step, Worker, WorkerHandle, wait_for_all};

use anyhow::{Context, Result};

/// Gridlock configuration struct
pub struct Gridlock {
    trace_log: Option<String>,
    hold: HoldStrategy,
}

impl Default for Gridlock {
    fn default() -> Self {
        Self::new()
    }
}

impl Gridlock {
    /// Create a new Gridlock with default settings
    ///
    /// By default:
    /// - The JSON trace log is disabled
    /// - Never-releasing workers hold by spinning
    pub fn new() -> Self {
        Gridlock {
            trace_log: None,
            hold: HoldStrategy::Spin,
        }
    }

    /// Activate the JSON trace log and set the path for the log file
    ///
    /// # Arguments
    /// * `path` - Path to the log file; one JSON object is appended per lock
    ///   event.
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn with_trace_log<P: AsRef<std::path::Path>>(mut self, path: P) -> Self {
        self.trace_log = Some(path.as_ref().to_string_lossy().into_owned());
        self
    }

    /// Choose how never-releasing workers occupy their threads
    ///
    /// # Arguments
    /// * `hold` - [`HoldStrategy::Spin`] (faithful busy loop, default) or
    ///   [`HoldStrategy::Park`] (equivalent indefinite block)
    ///
    /// # Returns
    /// The builder for method chaining
    pub fn hold_strategy(mut self, hold: HoldStrategy) -> Self {
        self.hold = hold;
        self
    }

    /// Apply the configured settings and hand back the scenario options
    ///
    /// # Returns
    /// A Result with the [`ScenarioOpts`] every scenario function takes
    ///
    /// # Errors
    /// Returns an error if the trace log file cannot be opened
    pub fn start(self) -> Result<ScenarioOpts> {
        if let Some(trace_log) = self.trace_log {
            trace::init_trace_log(Some(trace_log))
                .context("Failed to initialize trace log")?;
        }

        // Print header
        println!("{}", crate::BANNER);

        Ok(ScenarioOpts { hold: self.hold })
    }
}
