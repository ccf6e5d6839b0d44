//! Candidate ordering and fidelity ladders.
//!
//! Policy lives here as plain data; the resolver consumes it with one
//! generic algorithm. A candidate pairs a model identifier with the ordered
//! fidelity rungs to try for it, highest quality first.

use crate::config::RuntimeConfig;
use crate::provider::{Accelerator, Fidelity};

/// A model identifier plus the fidelity rungs to try for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCandidate {
    pub id: String,
    pub ladder: Vec<Fidelity>,
}

impl ModelCandidate {
    pub fn new(id: impl Into<String>, ladder: Vec<Fidelity>) -> Self {
        Self {
            id: id.into(),
            ladder,
        }
    }
}

/// The ordered candidate list for one process, fixed at construction from
/// the hardware probe and the configuration.
#[derive(Debug, Clone)]
pub struct CandidatePlan {
    candidates: Vec<ModelCandidate>,
    default_ladder: Vec<Fidelity>,
}

impl CandidatePlan {
    /// Build the plan for the probed accelerator. GPU hosts prefer
    /// half-precision with a quantized rung below it; CPU hosts load full
    /// weights with the same quantized escape hatch.
    pub fn from_config(config: &RuntimeConfig, accelerator: Accelerator) -> Self {
        let (ids, ladder) = match accelerator {
            Accelerator::Gpu => (
                &config.gpu_candidates,
                vec![Fidelity::Half, Fidelity::Quantized],
            ),
            Accelerator::Cpu => (
                &config.cpu_candidates,
                vec![Fidelity::Full, Fidelity::Quantized],
            ),
        };

        let mut candidates: Vec<ModelCandidate> = Vec::with_capacity(ids.len() + 1);
        if let Some(ref name) = config.model_override {
            let name = name.trim();
            if !name.is_empty() {
                candidates.push(ModelCandidate::new(name, ladder.clone()));
            }
        }
        candidates.extend(
            ids.iter()
                .map(|id| ModelCandidate::new(id.clone(), ladder.clone())),
        );

        Self {
            candidates,
            default_ladder: ladder,
        }
    }

    /// Candidate order for one resolution pass. A non-empty request override
    /// is prepended with the plan's default ladder; an empty or whitespace
    /// override means "no override", not a candidate.
    pub fn ordered(&self, override_id: Option<&str>) -> Vec<ModelCandidate> {
        let mut order = Vec::with_capacity(self.candidates.len() + 1);
        if let Some(name) = override_id.map(str::trim).filter(|s| !s.is_empty()) {
            order.push(ModelCandidate::new(name, self.default_ladder.clone()));
        }
        order.extend(self.candidates.iter().cloned());
        order
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }
}
