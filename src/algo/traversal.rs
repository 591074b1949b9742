//! Time-respecting traversal.
//!
//! Both searches run over any [`TemporalNeighbors`] graph. On an
//! [`EvolvingGraph`](crate::EvolvingGraph) they range over the
//! time-expanded vertex set, so `A@1` and `A@2` are distinct entries.
//!
//! | Search | Answers | Guarantee |
//! |--------|---------|-----------|
//! | [`bfs`] | hop level of every reachable vertex | minimum hops |
//! | [`dfs_path`] | does a path exist? | first path found |
//! | [`shortest_path`] | minimum-hop path | minimum hops |
//!
//! Forward neighbors never move back in time, so on an evolving graph the
//! search space is acyclic along the time axis. Both searches still track
//! visited vertices, which keeps them linear and makes them terminate on
//! cyclic static graphs too.

use crate::neighbors::TemporalNeighbors;
use crate::node::TimeNode;
use crate::Result;
use std::collections::{HashMap, HashSet, VecDeque};
use std::hash::Hash;
use tracing::debug;

/// An ordered walk through consecutive forward neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<V> {
    vertices: Vec<V>,
}

/// A path through `TimeNode`s; timestamps never decrease along it.
pub type TemporalPath<K, T> = Path<TimeNode<K, T>>;

impl<V> Path<V> {
    pub fn new(vertices: Vec<V>) -> Self {
        Self { vertices }
    }

    pub fn nodes(&self) -> &[V] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of steps (vertices minus one).
    pub fn hops(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn first(&self) -> Option<&V> {
        self.vertices.first()
    }

    pub fn last(&self) -> Option<&V> {
        self.vertices.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.vertices.iter()
    }

    pub fn into_vec(self) -> Vec<V> {
        self.vertices
    }
}

impl<K, T: Ord> Path<TimeNode<K, T>> {
    /// Whether timestamps are non-decreasing along the path.
    pub fn is_time_respecting(&self) -> bool {
        self.vertices
            .windows(2)
            .all(|w| w[0].timestamp <= w[1].timestamp)
    }
}

impl<V> IntoIterator for Path<V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.vertices.into_iter()
    }
}

/// Breadth-first level assignment from `start`.
///
/// `start` gets level 0; every reachable vertex gets the minimum number of
/// forward hops needed to reach it. Returns an empty map if `start` is not
/// a vertex of the graph.
///
/// # Complexity
///
/// - Time: O(V + E) over the time-expanded graph
/// - Space: O(V)
///
/// # Example
///
/// ```
/// use lattix_evolving::{EvolvingGraph, TimeNode};
/// use lattix_evolving::algo::traversal::bfs;
///
/// let mut g = EvolvingGraph::new();
/// g.add_edge("A", "B", 1);
/// g.add_edge("B", "C", 2);
///
/// let levels = bfs(&g, &TimeNode::new("A", 1))?;
/// assert_eq!(levels[&TimeNode::new("B", 1)], 1);
/// assert_eq!(levels[&TimeNode::new("C", 2)], 3); // A@1 -> B@1 -> B@2 -> C@2
/// # Ok::<(), lattix_evolving::Error>(())
/// ```
pub fn bfs<G: TemporalNeighbors>(g: &G, start: &G::Vertex) -> Result<HashMap<G::Vertex, usize>> {
    let mut levels = HashMap::new();
    if !g.contains_vertex(start) {
        return Ok(levels);
    }

    levels.insert(start.clone(), 0);
    let mut frontier = vec![start.clone()];
    let mut level = 0;

    while !frontier.is_empty() {
        level += 1;
        let mut next = Vec::new();
        for v in &frontier {
            for w in g.forward_neighbors(v)? {
                if !levels.contains_key(&w) {
                    levels.insert(w.clone(), level);
                    next.push(w);
                }
            }
        }
        frontier = next;
    }

    debug!(reached = levels.len(), depth = level - 1, "bfs finished");
    Ok(levels)
}

/// Depth-first search for a path from `start` to `goal`.
///
/// Returns the first path found, which need not be the shortest (see
/// [`shortest_path`]). `None` if either endpoint is not a vertex of the
/// graph or `goal` is unreachable.
///
/// ```
/// use lattix_evolving::{EvolvingGraph, TimeNode};
/// use lattix_evolving::algo::traversal::dfs_path;
///
/// let mut g = EvolvingGraph::new();
/// g.add_edge("A", "B", 1);
/// g.add_edge("B", "C", 2);
///
/// let path = dfs_path(&g, &TimeNode::new("A", 1), &TimeNode::new("C", 2))?.unwrap();
/// assert!(path.is_time_respecting());
/// assert_eq!(path.first(), Some(&TimeNode::new("A", 1)));
///
/// // C@2 cannot reach back to A@1
/// assert!(dfs_path(&g, &TimeNode::new("C", 2), &TimeNode::new("A", 1))?.is_none());
/// # Ok::<(), lattix_evolving::Error>(())
/// ```
pub fn dfs_path<G: TemporalNeighbors>(
    g: &G,
    start: &G::Vertex,
    goal: &G::Vertex,
) -> Result<Option<Path<G::Vertex>>> {
    if !g.contains_vertex(start) || !g.contains_vertex(goal) {
        return Ok(None);
    }
    if start == goal {
        return Ok(Some(Path::new(vec![start.clone()])));
    }

    // path[i] is the vertex whose remaining successors are stack[i]
    let mut visited = HashSet::from([start.clone()]);
    let mut path = vec![start.clone()];
    let mut stack = vec![g.forward_neighbors(start)?.into_iter()];

    loop {
        let next = match stack.last_mut() {
            Some(successors) => successors.next(),
            None => break,
        };
        match next {
            Some(v) => {
                if !visited.insert(v.clone()) {
                    continue;
                }
                path.push(v.clone());
                if v == *goal {
                    debug!(hops = path.len() - 1, visited = visited.len(), "dfs found path");
                    return Ok(Some(Path::new(path)));
                }
                stack.push(g.forward_neighbors(&v)?.into_iter());
            }
            None => {
                stack.pop();
                path.pop();
            }
        }
    }

    debug!(visited = visited.len(), "dfs exhausted without reaching goal");
    Ok(None)
}

/// Minimum-hop path from `start` to `goal`, via breadth-first search.
pub fn shortest_path<G: TemporalNeighbors>(
    g: &G,
    start: &G::Vertex,
    goal: &G::Vertex,
) -> Result<Option<Path<G::Vertex>>> {
    if !g.contains_vertex(start) || !g.contains_vertex(goal) {
        return Ok(None);
    }

    let mut parent: HashMap<G::Vertex, Option<G::Vertex>> = HashMap::from([(start.clone(), None)]);
    let mut queue = VecDeque::from([start.clone()]);

    while let Some(v) = queue.pop_front() {
        if v == *goal {
            return Ok(Some(unwind(&parent, v)));
        }
        for w in g.forward_neighbors(&v)? {
            if !parent.contains_key(&w) {
                parent.insert(w.clone(), Some(v.clone()));
                queue.push_back(w);
            }
        }
    }
    Ok(None)
}

fn unwind<V: Clone + Eq + Hash>(parent: &HashMap<V, Option<V>>, goal: V) -> Path<V> {
    let mut vertices = vec![goal];
    while let Some(Some(prev)) = vertices.last().and_then(|v| parent.get(v)) {
        vertices.push(prev.clone());
    }
    vertices.reverse();
    Path::new(vertices)
}
