pub mod camera;
pub mod constants;
pub mod device;
pub mod engine;
pub mod scroll;
pub mod setup;
pub mod timeline;
pub mod tween;
pub mod viewer;

pub use camera::*;
pub use constants::*;
pub use device::*;
pub use engine::*;
pub use scroll::*;
pub use setup::*;
pub use timeline::*;
pub use tween::*;
pub use viewer::*;
