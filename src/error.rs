//! Error types for mcsim.
//!
//! Control operations on the engine are total functions over its state
//! machine and never fail; errors arise only at construction time
//! (configuration, graph loading) and from state audits.

use thiserror::Error;

/// Result type alias for mcsim operations.
pub type SimResult<T> = Result<T, SimError>;

/// Unified error type for all mcsim operations.
#[derive(Debug, Error)]
pub enum SimError {
    // ===== Configuration Errors =====
    /// Invalid configuration parameter.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    /// YAML parsing error.
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// Schema validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    // ===== Graph Errors =====
    /// Structural problem in a walk graph.
    #[error("Graph error: {message}")]
    Graph {
        /// Description of the structural problem.
        message: String,
    },

    // ===== State Audits =====
    /// A running counter diverged from a full recount of the sample buffer.
    #[error("Counter drift in '{counter}': recount gives {counted}, recorded {recorded}")]
    CounterDrift {
        /// Name of the drifting counter.
        counter: String,
        /// Value obtained by recounting the buffer.
        counted: u64,
        /// Value the running counter held.
        recorded: u64,
    },

    // ===== I/O Errors =====
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SimError {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a graph error with a message.
    #[must_use]
    pub fn graph(message: impl Into<String>) -> Self {
        Self::Graph {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = SimError::config("batch size out of range");
        let msg = err.to_string();
        assert!(msg.contains("Configuration error"));
        assert!(msg.contains("batch size out of range"));
    }

    #[test]
    fn test_graph_error_display() {
        let err = SimError::graph("edge references unknown node 'zed'");
        let msg = err.to_string();
        assert!(msg.contains("Graph error"));
        assert!(msg.contains("zed"));
    }

    #[test]
    fn test_counter_drift_display() {
        let err = SimError::CounterDrift {
            counter: "inside_count".to_string(),
            counted: 10,
            recorded: 11,
        };
        let msg = err.to_string();
        assert!(msg.contains("inside_count"));
        assert!(msg.contains("10"));
        assert!(msg.contains("11"));
    }

    #[test]
    fn test_error_debug() {
        let err = SimError::config("test");
        let debug = format!("{err:?}");
        assert!(debug.contains("Config"));
    }
}
