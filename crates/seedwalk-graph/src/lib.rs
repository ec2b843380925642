pub mod graph;
pub mod parse;
pub mod types;

pub use graph::{GraphError, GraphProvider, TransitionGraph};
pub use parse::{parse_graph, GraphDocument, ParseError};
pub use types::{EventId, EventRecord, NamedEvent, StateId, Transition};
