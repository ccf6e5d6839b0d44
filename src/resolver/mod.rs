//! 模型解析模块：按序尝试候选模型并缓存首个成功加载。
//!
//! # Model Resolver
//!
//! Walks an ordered candidate list, applying a fidelity ladder per candidate,
//! and caches the first successful load for the rest of the process.
//!
//! ## Resolution algorithm
//!
//! 1. Candidate order: `[request override if present] ++ configured list`.
//! 2. Each candidate is tried at its ladder's top rung.
//! 3. `ResourceExhausted` retries the SAME candidate one rung down
//!    (degraded/quantized) before giving up on it.
//! 4. Any other load error advances to the next candidate with no retry.
//! 5. The first success is cached process-wide; later calls return it
//!    regardless of the override argument, until [`ModelResolver::reset`].
//! 6. Total failure is NOT negatively cached; the next call retries the full
//!    ladder, since transient network issues may have cleared.
//!
//! Resolution is single-flight: the cache is guarded by an async mutex held
//! across the load, so concurrent first callers await one load instead of
//! racing.

mod plan;

pub use plan::{CandidatePlan, ModelCandidate};

use crate::config::RuntimeConfig;
use crate::provider::{Fidelity, InferenceProvider, LoadError, ProviderHandle};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Resolution failure: every candidate in the ordered list failed to load.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no model available: all {tried} candidate(s) failed to load")]
    NoModelAvailable { tried: usize },
}

/// The outcome of a successful resolution.
#[derive(Debug, Clone)]
pub struct ResolvedModel {
    pub id: String,
    pub fidelity: Fidelity,
    pub handle: ProviderHandle,
}

impl ResolvedModel {
    /// Active identifier, annotated when the model was loaded degraded,
    /// e.g. `"distilgpt2 (reduced-precision)"`.
    pub fn label(&self) -> String {
        if self.fidelity.is_degraded() {
            format!("{} ({})", self.id, self.fidelity)
        } else {
            self.id.clone()
        }
    }
}

/// Lazily resolves and caches one model handle per process.
pub struct ModelResolver {
    provider: Arc<dyn InferenceProvider>,
    plan: CandidatePlan,
    // Held across the load so concurrent first callers share one attempt.
    cached: Mutex<Option<Arc<ResolvedModel>>>,
}

impl ModelResolver {
    /// Probes the provider's accelerator once and fixes the candidate plan
    /// for the lifetime of this resolver.
    pub fn new(provider: Arc<dyn InferenceProvider>, config: &RuntimeConfig) -> Self {
        let accelerator = provider.accelerator();
        let plan = CandidatePlan::from_config(config, accelerator);
        info!(
            provider = provider.name(),
            ?accelerator,
            candidates = plan.len(),
            "model resolver initialized"
        );
        Self {
            provider,
            plan,
            cached: Mutex::new(None),
        }
    }

    /// Get-or-load a model handle.
    ///
    /// Once a handle is cached, it is returned for every later call even if
    /// `override_id` differs; call [`reset`](Self::reset) first to force a
    /// re-resolution.
    pub async fn resolve(
        &self,
        override_id: Option<&str>,
    ) -> Result<Arc<ResolvedModel>, ResolveError> {
        let mut cached = self.cached.lock().await;
        if let Some(model) = cached.as_ref() {
            return Ok(Arc::clone(model));
        }

        let order = self.plan.ordered(override_id);
        let tried = order.len();
        for candidate in order {
            if let Some(resolved) = self.try_candidate(&candidate).await {
                let resolved = Arc::new(resolved);
                info!(model = %resolved.label(), "model resolved");
                *cached = Some(Arc::clone(&resolved));
                return Ok(resolved);
            }
        }

        Err(ResolveError::NoModelAvailable { tried })
    }

    /// Walk one candidate's fidelity ladder. Only `ResourceExhausted`
    /// descends a rung; any other failure abandons the candidate.
    async fn try_candidate(&self, candidate: &ModelCandidate) -> Option<ResolvedModel> {
        let mut rungs = candidate.ladder.iter().copied();
        let mut fidelity = rungs.next()?;
        loop {
            match self.provider.load(&candidate.id, fidelity).await {
                Ok(handle) => {
                    return Some(ResolvedModel {
                        id: candidate.id.clone(),
                        fidelity,
                        handle,
                    })
                }
                Err(LoadError::ResourceExhausted { .. }) => match rungs.next() {
                    Some(next) => {
                        warn!(
                            model = %candidate.id,
                            from = %fidelity,
                            to = %next,
                            "resource exhausted, retrying degraded"
                        );
                        fidelity = next;
                    }
                    None => {
                        warn!(model = %candidate.id, "fidelity ladder exhausted");
                        return None;
                    }
                },
                Err(err) => {
                    warn!(model = %candidate.id, error = %err, "load failed, advancing");
                    return None;
                }
            }
        }
    }

    /// The currently cached model, if any.
    pub async fn active(&self) -> Option<Arc<ResolvedModel>> {
        self.cached.lock().await.clone()
    }

    /// Release the cached handle back to "unloaded". The next `resolve`
    /// walks the full ladder again.
    pub async fn reset(&self) {
        let mut cached = self.cached.lock().await;
        if cached.take().is_some() {
            info!("model handle released");
        }
    }
}
