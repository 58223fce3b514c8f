pub mod graph;
pub mod path;
pub mod path_stream;
pub mod simple_paths;
pub mod solver;
pub mod traits;

pub use graph::{DirectedGraph, NodeId};
pub use path::start_from;
pub use path_stream::PathStream;
pub use simple_paths::{SimplePaths, Step, all_simple_paths};
pub use solver::{Certificate, NegativeCycleWitness, RelaxStats, Relaxation, SpfaSolver, find_negative_cycle};
pub use traits::CycleFinder;
