//! Simulator backend implementation.

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qff_hal::{
    Backend, BackendConfig, Capabilities, Counts, ExecutionResult, HalError, HalResult, Job, JobId,
    JobStatus, ValidationResult,
};
use qff_ir::Circuit;

use crate::statevector::Statevector;

/// Default qubit limit of the simulator.
const DEFAULT_MAX_QUBITS: u32 = 20;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    result: Option<ExecutionResult>,
}

/// Local simulator backend.
///
/// Each submitted circuit is evolved once as a statevector and then sampled
/// `shots` times. With a seed every submission draws from a fresh
/// `StdRng::seed_from_u64(seed)`, so identical circuits produce identical
/// counts.
///
/// A job is held only until its result is collected: a successful
/// [`Backend::result`] hands the counts over and forgets the job.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Capabilities, fixed at construction.
    capabilities: Capabilities,
    /// Jobs whose results have not been collected yet.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self::from_config(BackendConfig::new("simulator"))
    }

    /// Create a simulator with custom max qubits.
    pub fn with_max_qubits(max_qubits: u32) -> Self {
        let mut backend = Self::new();
        backend.capabilities = Capabilities::simulator(max_qubits);
        backend
    }

    /// Build a simulator from configuration.
    pub fn from_config(config: BackendConfig) -> Self {
        let mut capabilities = Capabilities::simulator(DEFAULT_MAX_QUBITS);
        if let Some(max_shots) = config.max_shots {
            capabilities = capabilities.with_max_shots(max_shots);
        }
        Self {
            config,
            capabilities,
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
        }
    }

    /// Fix the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Collect every reason the circuit cannot run here.
    fn check_circuit(&self, circuit: &Circuit) -> Vec<String> {
        let mut reasons = vec![];

        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            reasons.push(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            ));
        }

        let mut measured = FxHashSet::default();
        for inst in circuit.instructions() {
            if let Some(gate) = inst.as_gate() {
                if !self.capabilities.gate_set.contains(gate.name()) {
                    reasons.push(format!("Unsupported gate '{}'", gate.name()));
                }
                if let Some(q) = inst.qubits.iter().find(|q| measured.contains(*q)) {
                    reasons.push(format!(
                        "Gate '{}' acts on {q} after it was measured",
                        gate.name()
                    ));
                }
            } else if inst.is_measure() {
                measured.extend(inst.qubits.iter().copied());
            }
        }

        reasons
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> ExecutionResult {
        let start = Instant::now();

        debug!(
            "Starting simulation: {} qubits, {} instructions, {} shots",
            circuit.num_qubits(),
            circuit.instructions().len(),
            shots
        );

        let sv = Statevector::from_circuit(circuit);

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let layout = MeasurementLayout::from_circuit(circuit);
        let mut counts = Counts::new();
        for outcome in sv.sample_many(&mut rng, shots) {
            counts.increment(layout.bitstring(outcome));
        }

        let elapsed = start.elapsed();
        debug!(
            "Simulation completed in {:?}, {} distinct outcomes",
            elapsed,
            counts.len()
        );

        ExecutionResult::new(counts, shots)
            .with_execution_time(elapsed.as_millis() as u64)
            .with_metadata("seed", self.config.seed.into())
    }

    /// Number of jobs still held by the backend.
    pub fn pending_jobs(&self) -> usize {
        self.lock_jobs().len()
    }

    fn lock_jobs(&self) -> std::sync::MutexGuard<'_, FxHashMap<String, SimJob>> {
        self.jobs.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps measured qubits onto classical bit positions.
struct MeasurementLayout {
    /// (qubit index, clbit index) pairs.
    pairs: Vec<(usize, usize)>,
    /// Bitstring width.
    width: usize,
}

impl MeasurementLayout {
    /// Circuits without measurements report every qubit, qubit `i` as bit `i`.
    fn from_circuit(circuit: &Circuit) -> Self {
        let pairs: Vec<_> = circuit
            .instructions()
            .iter()
            .filter(|i| i.is_measure())
            .flat_map(|i| {
                i.qubits
                    .iter()
                    .zip(&i.clbits)
                    .map(|(q, c)| (q.index(), c.index()))
            })
            .collect();

        if pairs.is_empty() {
            let n = circuit.num_qubits();
            return Self {
                pairs: (0..n).map(|q| (q, q)).collect(),
                width: n,
            };
        }

        Self {
            pairs,
            width: circuit.num_clbits(),
        }
    }

    /// Render a basis-state index, highest classical bit first.
    fn bitstring(&self, outcome: usize) -> String {
        let mut bits = vec![b'0'; self.width];
        for &(qubit, clbit) in &self.pairs {
            bits[self.width - 1 - clbit] = if (outcome >> qubit) & 1 == 1 {
                b'1'
            } else {
                b'0'
            };
        }
        String::from_utf8_lossy(&bits).into_owned()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    async fn validate(&self, circuit: &Circuit) -> HalResult<ValidationResult> {
        let reasons = self.check_circuit(circuit);
        if reasons.is_empty() {
            Ok(ValidationResult::Valid)
        } else {
            Ok(ValidationResult::Invalid { reasons })
        }
    }

    #[instrument(skip(self, circuit), fields(circuit = circuit.name()))]
    async fn submit(&self, circuit: &Circuit, shots: u32) -> HalResult<JobId> {
        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be at least 1".into()));
        }
        if shots > self.capabilities.max_shots {
            return Err(HalError::InvalidShots(format!(
                "{shots} shots requested but simulator allows at most {}",
                self.capabilities.max_shots
            )));
        }
        if circuit.num_qubits() > self.capabilities.num_qubits as usize {
            return Err(HalError::CircuitTooLarge(format!(
                "Circuit has {} qubits but simulator only supports {}",
                circuit.num_qubits(),
                self.capabilities.num_qubits
            )));
        }
        let reasons = self.check_circuit(circuit);
        if !reasons.is_empty() {
            return Err(HalError::InvalidCircuit(reasons.join("; ")));
        }

        let job_id = JobId::new(Uuid::new_v4().to_string());
        let job = Job::new(job_id.clone(), shots).with_backend(self.name());
        self.lock_jobs()
            .insert(job_id.0.clone(), SimJob { job, result: None });

        debug!("Submitted job: {}", job_id);

        let result = self.run_simulation(circuit, shots);

        if let Some(sim_job) = self.lock_jobs().get_mut(&job_id.0) {
            sim_job.job.transition(JobStatus::Running);
            sim_job.job.transition(JobStatus::Completed);
            sim_job.result = Some(result);
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        self.lock_jobs()
            .get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn result(&self, job_id: &JobId) -> HalResult<ExecutionResult> {
        let mut jobs = self.lock_jobs();
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if sim_job.job.status != JobStatus::Completed || sim_job.result.is_none() {
            return Err(HalError::JobFailed(format!(
                "job {job_id} has no result in state {}",
                sim_job.job.status
            )));
        }

        debug!("Collected job: {}", job_id);
        jobs.remove(&job_id.0)
            .and_then(|j| j.result)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }
}
