//! Endpoint index used to chain open curves into closed loops.
//!
//! Nodes are unique end positions, merged within the closure tolerance and
//! numbered in first-seen order. Each node lists the curve ends touching it,
//! so every walk visits candidates in input order.
use crate::geometry::BoundaryCurve;
use kurbo::Point;

/// Which end of a curve touches a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum End {
    Start,
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CurveEnd {
    pub curve: usize,
    pub end: End,
}

#[derive(Debug, Default)]
pub(crate) struct EndpointIndex {
    nodes: Vec<Point>,
    incident: Vec<Vec<CurveEnd>>,
    /// `(start node, end node)` per curve.
    curve_nodes: Vec<(usize, usize)>,
}

impl EndpointIndex {
    pub fn build(curves: &[BoundaryCurve], tolerance: f64) -> Self {
        let mut index = Self::default();
        for (i, curve) in curves.iter().enumerate() {
            let s = index.node_for(curve.start(), tolerance);
            index.incident[s].push(CurveEnd {
                curve: i,
                end: End::Start,
            });
            let e = index.node_for(curve.end(), tolerance);
            index.incident[e].push(CurveEnd {
                curve: i,
                end: End::End,
            });
            index.curve_nodes.push((s, e));
        }
        index
    }

    fn node_for(&mut self, p: Point, tolerance: f64) -> usize {
        if let Some(i) = self.nodes.iter().position(|n| n.distance(p) < tolerance) {
            return i;
        }
        self.nodes.push(p);
        self.incident.push(Vec::new());
        self.nodes.len() - 1
    }

    pub fn position(&self, node: usize) -> Point {
        self.nodes[node]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes_of(&self, curve: usize) -> (usize, usize) {
        self.curve_nodes[curve]
    }

    pub fn incident(&self, node: usize) -> &[CurveEnd] {
        &self.incident[node]
    }
}

/// One step of a closed walk: a curve and whether it is traversed backwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Step {
    pub curve: usize,
    pub reversed: bool,
}

/// Finds closed walks that use each curve at most once.
///
/// Curves are tried as walk seeds in input order; from each node the
/// lowest-indexed unused curve is followed first, backtracking on dead ends.
pub(crate) fn find_cycles(index: &EndpointIndex, curve_count: usize) -> Vec<Vec<Step>> {
    let mut used = vec![false; curve_count];
    let mut cycles = Vec::new();
    for seed in 0..curve_count {
        if used[seed] {
            continue;
        }
        let (start, end) = index.nodes_of(seed);
        let mut walk = vec![Step {
            curve: seed,
            reversed: false,
        }];
        used[seed] = true;
        if start == end || extend(index, start, end, &mut used, &mut walk) {
            cycles.push(walk);
        } else {
            used[seed] = false;
        }
    }
    cycles
}

fn extend(
    index: &EndpointIndex,
    target: usize,
    at: usize,
    used: &mut [bool],
    walk: &mut Vec<Step>,
) -> bool {
    for ce in index.incident(at) {
        if used[ce.curve] {
            continue;
        }
        let (s, e) = index.nodes_of(ce.curve);
        let (reversed, next) = match ce.end {
            End::Start => (false, e),
            End::End => (true, s),
        };
        used[ce.curve] = true;
        walk.push(Step {
            curve: ce.curve,
            reversed,
        });
        if next == target || extend(index, target, next, used, walk) {
            return true;
        }
        walk.pop();
        used[ce.curve] = false;
    }
    false
}
