//! Wire assembly and hole resolution.
//!
//! Overview
//! - [`WireGrouper::assemble`] turns boundary curves into closed wires. Curves
//!   that already close form single-curve wires; open curves of the same
//!   category are chained through an explicit endpoint index (`endpoints`)
//!   whose nodes are merged within the closure tolerance. Curves that cannot
//!   be chained into a loop are handed back as `unchained`.
//! - [`WireGrouper::resolve_containment`] builds the same-category containment
//!   hierarchy (`containment`): wires at even depth start a new region, wires
//!   at odd depth become holes of their parent. Outer wires are oriented with
//!   positive area, holes negative.
//!
//! Mixed categories are never chained or nested together. Iteration follows
//! input order everywhere so output is reproducible.

mod containment;
mod endpoints;

use crate::geometry::{BoundaryCurve, Outline, Wire};
use crate::types::{Category, PhysicalGroup, PhysicalTag};
use endpoints::{find_cycles, EndpointIndex};
use log::{debug, warn};

/// Wires built from a set of curves plus the curves left over.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Assembly {
    pub wires: Vec<Wire>,
    pub unchained: Vec<BoundaryCurve>,
}

#[derive(Clone, Copy, Debug)]
pub struct WireGrouper {
    tolerance: f64,
}

impl WireGrouper {
    /// `tolerance` merges curve end points; use the closure tolerance.
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Assembles closed wires from `curves`, category by category.
    pub fn assemble(&self, curves: Vec<BoundaryCurve>) -> Assembly {
        let mut placed: Vec<(usize, Wire)> = Vec::new();
        let mut unchained: Vec<(usize, BoundaryCurve)> = Vec::new();

        let mut categories: Vec<Category> = Vec::new();
        for c in &curves {
            if !categories.contains(&c.category) {
                categories.push(c.category);
            }
        }

        let mut open: Vec<Vec<(usize, BoundaryCurve)>> = vec![Vec::new(); categories.len()];
        for (i, curve) in curves.into_iter().enumerate() {
            if curve.is_closed() {
                match Wire::single(curve.clone()) {
                    Ok(wire) => placed.push((i, wire)),
                    Err(err) => {
                        warn!("{err}");
                        unchained.push((i, curve));
                    }
                }
            } else if let Some(k) = categories.iter().position(|&c| c == curve.category) {
                open[k].push((i, curve));
            }
        }

        for (category, group) in categories.iter().zip(open) {
            if group.is_empty() {
                continue;
            }
            let (wires, rest) = self.chain(*category, group);
            placed.extend(wires);
            unchained.extend(rest);
        }

        placed.sort_by_key(|(i, _)| *i);
        unchained.sort_by_key(|(i, _)| *i);
        debug!(
            "assembled {} wires, {} curves left unchained",
            placed.len(),
            unchained.len()
        );
        Assembly {
            wires: placed.into_iter().map(|(_, w)| w).collect(),
            unchained: unchained.into_iter().map(|(_, c)| c).collect(),
        }
    }

    /// Chains open curves of one category. Wires are keyed by the input index
    /// of their seed curve.
    fn chain(
        &self,
        category: Category,
        group: Vec<(usize, BoundaryCurve)>,
    ) -> (Vec<(usize, Wire)>, Vec<(usize, BoundaryCurve)>) {
        let curves: Vec<BoundaryCurve> = group.iter().map(|(_, c)| c.clone()).collect();
        let index = EndpointIndex::build(&curves, self.tolerance);
        debug!(
            "chaining {} open {category} curves over {} nodes",
            curves.len(),
            index.node_count()
        );
        let mut used = vec![false; curves.len()];
        let mut wires = Vec::new();
        for cycle in find_cycles(&index, curves.len()) {
            let mut chain = Vec::with_capacity(cycle.len());
            for step in &cycle {
                let (s, e) = index.nodes_of(step.curve);
                let curve = &curves[step.curve];
                let (oriented, from, to) = if step.reversed {
                    (curve.reversed(), e, s)
                } else {
                    (curve.clone(), s, e)
                };
                chain.push(oriented.snapped(index.position(from), index.position(to)));
            }
            match Wire::new(category, chain) {
                Ok(wire) if wire.area() > 1e-9 => {
                    for step in &cycle {
                        used[step.curve] = true;
                    }
                    wires.push((group[cycle[0].curve].0, wire));
                }
                Ok(_) => debug!("dropping zero-area chain of {} curves", cycle.len()),
                Err(err) => warn!("chain rejected: {err}"),
            }
        }
        let rest = group
            .into_iter()
            .zip(used)
            .filter(|(_, u)| !u)
            .map(|(entry, _)| entry)
            .collect();
        (wires, rest)
    }

    /// Nests same-category wires into physical groups.
    ///
    /// Groups are ordered by the position of their outer wire in `wires` and
    /// tagged from `first_tag` upward. The group whose outer wire is not
    /// contained by any wire of any category and has the largest bounding box
    /// is flagged `outermost`.
    pub fn resolve_containment(&self, wires: Vec<Wire>, first_tag: u32) -> Vec<PhysicalGroup> {
        let outlines: Vec<Outline> = wires.iter().map(Wire::outline).collect();
        let areas: Vec<f64> = wires.iter().map(Wire::area).collect();

        let mut parent: Vec<Option<usize>> = vec![None; wires.len()];
        let mut depth: Vec<usize> = vec![0; wires.len()];
        for category in Category::ACTIVE.into_iter().chain([Category::Ignore]) {
            let members: Vec<usize> = (0..wires.len())
                .filter(|&i| wires[i].category == category)
                .collect();
            if members.is_empty() {
                continue;
            }
            let sub_outlines: Vec<&Outline> = members.iter().map(|&i| &outlines[i]).collect();
            let sub_areas: Vec<f64> = members.iter().map(|&i| areas[i]).collect();
            let sub_parents = containment::immediate_parents(&sub_outlines, &sub_areas);
            let sub_depths = containment::depths(&sub_parents);
            for (k, &i) in members.iter().enumerate() {
                parent[i] = sub_parents[k].map(|p| members[p]);
                depth[i] = sub_depths[k];
            }
        }

        let all: Vec<&Outline> = outlines.iter().collect();
        let outermost = containment::outermost(&all, &areas);

        let mut group_of: Vec<Option<usize>> = vec![None; wires.len()];
        let mut groups: Vec<PhysicalGroup> = Vec::new();
        let mut holes: Vec<(usize, Wire)> = Vec::new();
        for (i, wire) in wires.into_iter().enumerate() {
            if depth[i] % 2 == 0 {
                group_of[i] = Some(groups.len());
                groups.push(PhysicalGroup {
                    tag: PhysicalTag(first_tag + groups.len() as u32),
                    category: wire.category,
                    outer: wire.oriented(true),
                    holes: Vec::new(),
                    outermost: outermost == Some(i),
                });
            } else {
                holes.push((i, wire));
            }
        }
        for (i, wire) in holes {
            match parent[i].and_then(|p| group_of[p]) {
                Some(g) => groups[g].holes.push(wire.oriented(false)),
                None => warn!("hole without enclosing region dropped"),
            }
        }
        debug!(
            "resolved {} groups with {} holes",
            groups.len(),
            groups.iter().map(|g| g.holes.len()).sum::<usize>()
        );
        groups
    }
}
