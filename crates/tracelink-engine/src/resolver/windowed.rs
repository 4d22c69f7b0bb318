// Partial-reduction windowing shared by the collapse-family resolvers
//
// Successive after timestamps partition the before sequence into
// contiguous windows, one per after element. The two concrete resolvers
// run the same scan and differ only in which window members they keep.

use tracelink_error::ResolveResult;
use tracelink_types::{Correspondence, CorrespondenceBuilder, TraceElement, TraceInfo};

use super::TraceResolver;

/// One window: the after element and the before elements attributed to it.
struct Window<'a> {
    target: &'a TraceElement,
    members: Vec<&'a TraceElement>,
}

/// Partition the before side into one contiguous window per after element.
///
/// Walks the after side in time order with a cursor into the before side;
/// each after element's window takes the not-yet-consumed before elements
/// captured ahead of it. Once every after element is placed, trailing
/// before elements join the final window.
fn partition_windows(pair: &TraceInfo) -> Vec<Window<'_>> {
    let mut windows: Vec<Window<'_>> = Vec::with_capacity(pair.after_len());
    let mut before = pair.before().peekable();

    for target in pair.after() {
        let mut members = Vec::new();
        while let Some(&b) = before.peek() {
            if b.time >= target.time {
                break;
            }
            members.push(b);
            before.next();
        }
        windows.push(Window { target, members });
    }

    if let Some(last) = windows.last_mut() {
        last.members.extend(before);
    }

    windows
}

/// Which members of a window represent it in the correspondence.
enum WindowKeep {
    AllMembers,
    Endpoints,
}

fn resolve_windowed(pair: &TraceInfo, keep: WindowKeep) -> Correspondence {
    let mut builder = CorrespondenceBuilder::covering(pair);

    for window in partition_windows(pair) {
        match keep {
            WindowKeep::AllMembers => {
                for b in &window.members {
                    builder.link(b, window.target);
                }
            }
            WindowKeep::Endpoints => match window.members.as_slice() {
                [] => {}
                [only] => builder.link(only, window.target),
                [first, .., last] => {
                    builder.link(first, window.target);
                    builder.link(last, window.target);
                }
            },
        }
    }

    builder.build()
}

/// Resolver for windowed reductions where every element of a window
/// contributes to the window's result (collapse).
pub struct CollapseResolver;

impl TraceResolver for CollapseResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        Ok(resolve_windowed(pair, WindowKeep::AllMembers))
    }
}

/// Resolver for windowed reductions where only each window's first and
/// last element are representative (intervalMap).
pub struct IntervalMapResolver;

impl TraceResolver for IntervalMapResolver {
    fn resolve(&self, pair: &TraceInfo) -> ResolveResult<Correspondence> {
        Ok(resolve_windowed(pair, WindowKeep::Endpoints))
    }
}
