//! Backend capability descriptions.

use serde::{Deserialize, Serialize};

/// Gates a backend can execute, by IR gate name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateSet {
    /// Supported gate names.
    pub gates: Vec<String>,
}

impl GateSet {
    /// Gate set of the local statevector simulator.
    pub fn simulator() -> Self {
        let gates = ["x", "z", "h", "cx", "cz", "mcx", "mcz"];
        Self {
            gates: gates.iter().map(|g| (*g).to_string()).collect(),
        }
    }

    /// Check whether a gate name is supported.
    pub fn contains(&self, gate: &str) -> bool {
        self.gates.iter().any(|g| g == gate)
    }
}

/// Capabilities of a backend, cached at construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Capabilities {
    /// Name of the backend.
    pub name: String,
    /// Number of qubits available.
    pub num_qubits: u32,
    /// Supported gate set.
    pub gate_set: GateSet,
    /// Maximum number of shots per job.
    pub max_shots: u32,
    /// Whether this is a simulator.
    pub is_simulator: bool,
    /// Additional capability flags.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
}

impl Capabilities {
    /// Create capabilities for a simulator.
    pub fn simulator(num_qubits: u32) -> Self {
        Self {
            name: "simulator".into(),
            num_qubits,
            gate_set: GateSet::simulator(),
            max_shots: 100_000,
            is_simulator: true,
            features: vec!["statevector".into(), "seeded_sampling".into()],
        }
    }

    /// Override the shot limit.
    pub fn with_max_shots(mut self, max_shots: u32) -> Self {
        self.max_shots = max_shots;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulator_capabilities() {
        let caps = Capabilities::simulator(10);
        assert_eq!(caps.num_qubits, 10);
        assert!(caps.is_simulator);
        assert!(caps.gate_set.contains("mcx"));
        assert!(caps.gate_set.contains("mcz"));
        assert!(!caps.gate_set.contains("rzz"));
        assert!(!caps.gate_set.contains("ccx"));
    }
}
