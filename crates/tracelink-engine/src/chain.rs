// Whole-pipeline composition of per-stage correspondences
//
// The capture layer reports one snapshot pair per stage; adjacent stages
// share elements (one stage's after side is the next stage's before
// side). Chain resolution runs every stage through the registry and
// assembles the results into a traversable read-only view.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use tracelink_error::StructuralViolation;
use tracelink_types::{Correspondence, TraceElement, TraceInfo};
use tracing::debug;

use crate::resolver::registry::ResolverRegistry;

/// One pipeline stage as reported by the capture layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Stage-kind identifier, the registry lookup key
    pub kind: String,
    /// Human-readable rendering of the call, e.g. `filter(x -> x > 0)`
    pub label: String,
}

impl Stage {
    pub fn new(kind: impl Into<String>, label: impl Into<String>) -> Self {
        Stage { kind: kind.into(), label: label.into() }
    }
}

/// A stage together with the snapshot pair captured around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageCapture {
    /// The stage descriptor
    pub stage: Stage,
    /// The before/after snapshots observed around it
    pub info: TraceInfo,
}

impl StageCapture {
    pub fn new(stage: Stage, info: TraceInfo) -> Self {
        StageCapture { stage, info }
    }
}

/// Outcome of resolving one stage.
#[derive(Debug, Clone)]
pub enum CallOutcome {
    /// The stage's correspondence was reconstructed.
    Resolved(Correspondence),
    /// The snapshot pair violated the resolver's structural precondition;
    /// neighboring stages are unaffected.
    Unresolved(StructuralViolation),
}

impl CallOutcome {
    pub fn is_resolved(&self) -> bool {
        matches!(self, CallOutcome::Resolved(_))
    }

    /// The correspondence, when the stage resolved.
    pub fn correspondence(&self) -> Option<&Correspondence> {
        match self {
            CallOutcome::Resolved(correspondence) => Some(correspondence),
            CallOutcome::Unresolved(_) => None,
        }
    }

    /// The violation, when the stage did not resolve.
    pub fn violation(&self) -> Option<&StructuralViolation> {
        match self {
            CallOutcome::Resolved(_) => None,
            CallOutcome::Unresolved(violation) => Some(violation),
        }
    }
}

/// One resolved stage: its descriptor, its outcome, and the two adjacent
/// snapshot states the consumer renders around it.
#[derive(Debug, Clone)]
pub struct ResolvedCall {
    stage: Stage,
    info: TraceInfo,
    outcome: CallOutcome,
}

impl ResolvedCall {
    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn info(&self) -> &TraceInfo {
        &self.info
    }

    pub fn outcome(&self) -> &CallOutcome {
        &self.outcome
    }
}

/// The stage-ordered resolution of one whole pipeline capture:
/// the intermediate calls followed by the terminal call.
#[derive(Debug, Clone)]
pub struct ResolvedChain {
    intermediate: Vec<ResolvedCall>,
    terminal: ResolvedCall,
}

impl ResolvedChain {
    /// Number of chain links: the source endpoint, every intermediate
    /// call, and the terminal call.
    pub fn len(&self) -> usize {
        self.intermediate.len() + 2
    }

    /// A chain always has at least its source endpoint and terminal call.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The intermediate calls, in pipeline order.
    pub fn intermediate(&self) -> &[ResolvedCall] {
        &self.intermediate
    }

    /// The terminal call.
    pub fn terminal(&self) -> &ResolvedCall {
        &self.terminal
    }

    /// Every call in pipeline order, terminal last.
    pub fn calls(&self) -> impl Iterator<Item = &ResolvedCall> {
        self.intermediate.iter().chain(std::iter::once(&self.terminal))
    }

    /// The call at `index` (intermediates first, terminal last).
    pub fn call(&self, index: usize) -> Option<&ResolvedCall> {
        if index == self.intermediate.len() {
            Some(&self.terminal)
        } else {
            self.intermediate.get(index)
        }
    }

    /// The elements that entered the pipeline: the before side of the
    /// first call.
    pub fn source_elements(&self) -> Vec<&TraceElement> {
        self.calls()
            .next()
            .map(|call| call.info().before().collect())
            .unwrap_or_default()
    }

    /// Follow a value downstream: starting from a before element of the
    /// call at `stage_index`, walk forward correspondences stage by stage
    /// and return the elements reached at the furthest resolvable point.
    ///
    /// An unresolved stage truncates the walk there; a value dropped by a
    /// stage yields an empty result.
    pub fn trace_forward(&self, stage_index: usize, element: &TraceElement) -> Vec<TraceElement> {
        let mut frontier: IndexSet<TraceElement> = IndexSet::new();
        frontier.insert(element.clone());

        for call in self.calls().skip(stage_index) {
            let Some(correspondence) = call.outcome().correspondence() else {
                break;
            };
            let mut next: IndexSet<TraceElement> = IndexSet::new();
            for e in &frontier {
                if let Some(produced) = correspondence.produced_by(e) {
                    next.extend(produced.iter().cloned());
                }
            }
            if next.is_empty() {
                return Vec::new();
            }
            frontier = next;
        }

        frontier.into_iter().collect()
    }

    /// Follow a value upstream: starting from an after element of the
    /// call at `stage_index`, walk backward correspondences toward the
    /// source and return the elements reached at the furthest resolvable
    /// point.
    pub fn trace_backward(&self, stage_index: usize, element: &TraceElement) -> Vec<TraceElement> {
        let mut frontier: IndexSet<TraceElement> = IndexSet::new();
        frontier.insert(element.clone());

        for index in (0..=stage_index).rev() {
            let Some(call) = self.call(index) else {
                break;
            };
            let Some(correspondence) = call.outcome().correspondence() else {
                break;
            };
            let mut next: IndexSet<TraceElement> = IndexSet::new();
            for e in &frontier {
                if let Some(origins) = correspondence.origin_of(e) {
                    next.extend(origins.iter().cloned());
                }
            }
            if next.is_empty() {
                return Vec::new();
            }
            frontier = next;
        }

        frontier.into_iter().collect()
    }
}

/// Resolves a whole pipeline capture, stage by stage, into a chain.
///
/// The registry is passed in explicitly; stages resolve independently of
/// each other, and one stage's structural violation never aborts its
/// neighbors.
pub struct ChainResolver<'a> {
    registry: &'a ResolverRegistry,
}

impl<'a> ChainResolver<'a> {
    pub fn new(registry: &'a ResolverRegistry) -> Self {
        ChainResolver { registry }
    }

    /// Resolve every captured stage and assemble the chain, the last
    /// capture being the terminal call. Returns `None` when the capture
    /// list is empty.
    pub fn resolve_chain(&self, captures: Vec<StageCapture>) -> Option<ResolvedChain> {
        if captures.is_empty() {
            return None;
        }

        let mut calls: Vec<ResolvedCall> = captures
            .into_iter()
            .map(|capture| {
                let outcome = match self.registry.resolve(&capture.stage.kind, &capture.info) {
                    Ok(correspondence) => CallOutcome::Resolved(correspondence),
                    Err(violation) => {
                        debug!(kind = %capture.stage.kind, %violation, "stage left unresolved");
                        CallOutcome::Unresolved(violation)
                    }
                };
                ResolvedCall { stage: capture.stage, info: capture.info, outcome }
            })
            .collect();

        let terminal = calls.pop()?;
        Some(ResolvedChain { intermediate: calls, terminal })
    }
}
