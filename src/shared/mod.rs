pub mod window_state;

pub use window_state::{Geometry, SnapEdge, Viewport, WindowId, WindowKind, WindowState};
