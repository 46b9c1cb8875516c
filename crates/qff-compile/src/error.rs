//! Error types for the compilation crate.

use thiserror::Error;

/// Errors that can occur during compilation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Error from the IR crate.
    #[error("IR error: {0}")]
    Ir(#[from] qff_ir::IrError),

    /// A gate was found after a measurement on the same qubit.
    #[error("Gate '{gate_name}' acts on qubit {qubit} after measurement: {detail}")]
    MeasurementViolation {
        /// Name of the offending gate.
        gate_name: String,
        /// Qubit index.
        qubit: u32,
        /// Position information.
        detail: String,
    },

    /// No pipeline exists for the requested optimization level.
    #[error("Invalid optimization level {level} (maximum is {max})")]
    InvalidOptimizationLevel {
        /// Requested level.
        level: u8,
        /// Highest supported level.
        max: u8,
    },
}

/// Result type for compilation operations.
pub type CompileResult<T> = Result<T, CompileError>;
