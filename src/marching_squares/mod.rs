// Marching squares contouring kernel: case table, classification, edge interpolation.
mod cases;
mod grid_square;
mod types;
mod validator;
mod vertex;

pub use cases::*;
pub use grid_square::*;
pub use types::*;
pub use validator::*;
pub use vertex::*;
