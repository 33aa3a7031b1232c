mod component;
mod handle;
mod render;
mod state;
mod types;

pub use component::ForceGraphCanvas;
pub use handle::GraphHandle;
pub use types::{GraphData, GraphLink, GraphNode};
