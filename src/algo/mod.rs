//! Algorithms over evolving graphs.
//!
//! - **Traversal**: time-respecting BFS and path search ([`traversal`])
//! - **Centrality**: static and temporal Katz ([`centrality`])
//!
//! | Algorithm | Question | Complexity |
//! |-----------|----------|------------|
//! | BFS | How many hops to each reachable vertex? | O(V + E) |
//! | DFS path | Is there a time-respecting path? | O(V + E) |
//! | Katz | Reachable via damped walks? | O(V³) |
//! | Temporal Katz | Reachable via damped walks that respect time? | O(T × V³) |

/// Centrality algorithms for measuring node importance.
pub mod centrality;

/// Breadth- and depth-first search over the time-respecting neighbor relation.
pub mod traversal;
