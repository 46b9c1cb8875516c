//! Verification passes for ensuring compilation correctness.

use rustc_hash::FxHashMap;
use tracing::debug;

use qff_ir::{Circuit, QubitId};

use crate::error::{CompileError, CompileResult};
use crate::pass::{Pass, PassKind};
use crate::property::PropertySet;

/// Result of measurement verification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VerificationResult {
    /// Whether the verification passed.
    pub passed: bool,
    /// Number of distinct qubits measured.
    pub qubits_measured: usize,
    /// Number of measurement operations found.
    pub measurements_found: usize,
}

/// Analysis pass that rejects any gate acting on a qubit after it has been
/// measured.
///
/// The simulator samples once at the end of the circuit, so measurements
/// must be terminal on every wire they touch. Added last so that rewriting
/// passes cannot slip a gate past a measurement unnoticed.
pub struct MeasurementVerification;

impl Pass for MeasurementVerification {
    fn name(&self) -> &'static str {
        "measurement_verification"
    }

    fn kind(&self) -> PassKind {
        PassKind::Analysis
    }

    fn run(&self, circuit: &mut Circuit, properties: &mut PropertySet) -> CompileResult<()> {
        let mut measured_at: FxHashMap<QubitId, usize> = FxHashMap::default();
        let mut measurements_found = 0;

        for (position, inst) in circuit.instructions().iter().enumerate() {
            if inst.is_measure() {
                measurements_found += 1;
                for &q in &inst.qubits {
                    measured_at.entry(q).or_insert(position);
                }
            } else if inst.is_gate() {
                if let Some((&qubit, &meas_pos)) = inst
                    .qubits
                    .iter()
                    .find_map(|q| measured_at.get_key_value(q))
                {
                    return Err(CompileError::MeasurementViolation {
                        gate_name: inst.name().to_string(),
                        qubit: qubit.0,
                        detail: format!(
                            "gate at position {position}, measurement at position {meas_pos}"
                        ),
                    });
                }
            }
        }

        debug!(
            "Measurement verification passed: {} measurements on {} qubits",
            measurements_found,
            measured_at.len()
        );
        properties.insert(VerificationResult {
            passed: true,
            qubits_measured: measured_at.len(),
            measurements_found,
        });

        Ok(())
    }
}
