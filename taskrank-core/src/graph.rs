//! Dependency graph validation: cycles and dangling edges.
//!
//! Edges point from a task to each task it depends on. Cycle detection runs
//! first; dangling edges are only reported for acyclic sets.

use std::collections::{HashMap, HashSet};

use crate::error::GraphError;
use crate::task::{Task, TaskId};

/// Adjacency list restricted to ids present in the task set.
#[derive(Debug, Default)]
struct DependencyGraph {
    edges: HashMap<TaskId, Vec<TaskId>>,
}

impl DependencyGraph {
    fn build(tasks: &[Task]) -> Self {
        let known: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
        let edges = tasks
            .iter()
            .map(|t| {
                let deps = t
                    .dependencies
                    .iter()
                    .copied()
                    .filter(|d| known.contains(d))
                    .collect();
                (t.id, deps)
            })
            .collect();
        Self { edges }
    }

    fn dependencies_of(&self, id: TaskId) -> &[TaskId] {
        self.edges.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    OnStack,
    Done,
}

/// Depth-first search state shared across start nodes, so every node is
/// fully explored at most once.
struct CycleSearch<'g> {
    graph: &'g DependencyGraph,
    marks: HashMap<TaskId, Mark>,
}

impl<'g> CycleSearch<'g> {
    fn new(graph: &'g DependencyGraph) -> Self {
        Self {
            graph,
            marks: HashMap::new(),
        }
    }

    /// Explore from `start`; returns the active path from the revisited node
    /// onward when a back edge is found.
    fn visit(&mut self, start: TaskId) -> Option<Vec<TaskId>> {
        if self.marks.contains_key(&start) {
            return None;
        }

        // (node, index of the next edge to follow)
        let mut stack: Vec<(TaskId, usize)> = vec![(start, 0)];
        self.marks.insert(start, Mark::OnStack);

        while let Some(frame) = stack.last_mut() {
            let node = frame.0;
            let next = self.graph.dependencies_of(node).get(frame.1).copied();
            frame.1 += 1;

            match next {
                None => {
                    stack.pop();
                    self.marks.insert(node, Mark::Done);
                }
                Some(dep) => match self.marks.get(&dep).copied() {
                    Some(Mark::OnStack) => {
                        let from = stack.iter().position(|(id, _)| *id == dep).unwrap_or(0);
                        return Some(stack[from..].iter().map(|(id, _)| *id).collect());
                    }
                    Some(Mark::Done) => {}
                    None => {
                        self.marks.insert(dep, Mark::OnStack);
                        stack.push((dep, 0));
                    }
                },
            }
        }

        None
    }
}

/// First cycle found when starting searches in input order, or `None`.
///
/// The returned ids are in discovery order starting at the node that was
/// revisited. Not necessarily the only or the shortest cycle.
pub fn find_cycle(tasks: &[Task]) -> Option<Vec<TaskId>> {
    let graph = DependencyGraph::build(tasks);
    let mut search = CycleSearch::new(&graph);
    tasks.iter().find_map(|t| search.visit(t.id))
}

/// Every task referencing ids absent from the set, with those ids, in input order.
pub fn find_invalid_dependencies(tasks: &[Task]) -> Vec<(&Task, Vec<TaskId>)> {
    let known: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    tasks
        .iter()
        .filter_map(|t| {
            let missing: Vec<TaskId> = t
                .dependencies
                .iter()
                .copied()
                .filter(|d| !known.contains(d))
                .collect();
            (!missing.is_empty()).then_some((t, missing))
        })
        .collect()
}

/// Structural check run before any scoring. A cycle short-circuits the
/// dangling-edge check.
pub fn validate(tasks: &[Task]) -> Result<(), Vec<GraphError>> {
    if let Some(cycle) = find_cycle(tasks) {
        return Err(vec![GraphError::Cycle(cycle)]);
    }

    let invalid: Vec<GraphError> = find_invalid_dependencies(tasks)
        .into_iter()
        .map(|(t, missing)| GraphError::InvalidDependencies {
            task_id: t.id,
            title: t.title.clone(),
            missing,
        })
        .collect();

    if invalid.is_empty() { Ok(()) } else { Err(invalid) }
}
