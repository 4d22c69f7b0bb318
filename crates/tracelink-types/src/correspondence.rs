// Bidirectional correspondence between the two sides of a snapshot pair
//
// A correspondence is what a resolver produces: for every before element
// the after elements it produced, and for every after element the before
// elements that contributed to it. Both maps preserve capture order.

use indexmap::IndexMap;
use tracelink_error::Diagnostic;

use crate::element::TraceElement;
use crate::snapshot::TraceInfo;

/// Order-preserving element-to-element-list mapping.
pub type ElementMap = IndexMap<TraceElement, Vec<TraceElement>>;

/// The resolved bidirectional correspondence for one stage.
///
/// Invariants (upheld by [`CorrespondenceBuilder`]):
/// - mutual consistency: `forward[b]` contains `a` exactly when
///   `backward[a]` contains `b`;
/// - lists preserve capture-time order;
/// - every covered before element is a `forward` key, every covered after
///   element a `backward` key, with an empty list when nothing matched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Correspondence {
    forward: ElementMap,
    backward: ElementMap,
    diagnostics: Vec<Diagnostic>,
}

impl Correspondence {
    /// A correspondence with no entries at all.
    pub fn empty() -> Self {
        Correspondence::default()
    }

    /// Assemble a correspondence from already-built maps.
    ///
    /// Used where the mapping was recorded by the capture mechanism rather
    /// than inferred; the caller vouches for the maps' contents.
    pub fn from_parts(
        forward: ElementMap,
        backward: ElementMap,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Correspondence { forward, backward, diagnostics }
    }

    /// Before element to the after elements it produced.
    pub fn forward(&self) -> &ElementMap {
        &self.forward
    }

    /// After element to the before elements that contributed to it.
    pub fn backward(&self) -> &ElementMap {
        &self.backward
    }

    /// Informational findings about the capture, if any.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// The after elements this before element produced.
    pub fn produced_by(&self, before: &TraceElement) -> Option<&[TraceElement]> {
        self.forward.get(before).map(Vec::as_slice)
    }

    /// The before elements this after element came from.
    pub fn origin_of(&self, after: &TraceElement) -> Option<&[TraceElement]> {
        self.backward.get(after).map(Vec::as_slice)
    }

    /// True when neither side has any entry.
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty() && self.backward.is_empty()
    }

    /// Verify the mutual-consistency invariant in both directions.
    pub fn is_mutually_consistent(&self) -> bool {
        let forward_ok = self.forward.iter().all(|(b, afters)| {
            afters.iter().all(|a| {
                self.backward.get(a).is_some_and(|befores| befores.contains(b))
            })
        });
        let backward_ok = self.backward.iter().all(|(a, befores)| {
            befores.iter().all(|b| {
                self.forward.get(b).is_some_and(|afters| afters.contains(a))
            })
        });
        forward_ok && backward_ok
    }
}

/// Builds a [`Correspondence`] with its invariants holding by construction.
#[derive(Debug, Default)]
pub struct CorrespondenceBuilder {
    forward: ElementMap,
    backward: ElementMap,
    diagnostics: Vec<Diagnostic>,
}

impl CorrespondenceBuilder {
    /// Builder with no coverage; keys appear only as links are added.
    pub fn new() -> Self {
        CorrespondenceBuilder::default()
    }

    /// Builder covering both sides of the pair: every before element keys
    /// `forward` and every after element keys `backward`, initially empty.
    pub fn covering(pair: &TraceInfo) -> Self {
        let mut builder = Self::covering_before(pair);
        for a in pair.after() {
            builder.backward.entry(a.clone()).or_default();
        }
        builder
    }

    /// Builder covering only the before side, for strategies whose
    /// contract ignores the after snapshot entirely.
    pub fn covering_before(pair: &TraceInfo) -> Self {
        let mut builder = CorrespondenceBuilder::new();
        for b in pair.before() {
            builder.forward.entry(b.clone()).or_default();
        }
        builder
    }

    /// Record that `before` produced `after`, in both directions at once.
    pub fn link(&mut self, before: &TraceElement, after: &TraceElement) {
        self.forward.entry(before.clone()).or_default().push(after.clone());
        self.backward.entry(after.clone()).or_default().push(before.clone());
    }

    /// Attach an informational capture diagnostic.
    pub fn diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn build(self) -> Correspondence {
        Correspondence {
            forward: self.forward,
            backward: self.backward,
            diagnostics: self.diagnostics,
        }
    }
}
