//! Rendering module
//!
//! `scene` builds the triangles for a frame from the game state; `pipeline`
//! draws them with WebGPU.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{START_PROMPT, Scene, draw};
pub use vertex::Vertex;
