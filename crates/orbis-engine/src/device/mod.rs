//! GPU device + surface management.
//!
//! Owns the wgpu adapter/device/queue, the window surface and the depth
//! attachment that follows its size. Frames are acquired here and handed to
//! the line renderer as an encoder plus color/depth views.

mod depth;
mod error;
mod frame;
mod gpu;
mod init;
mod surface;

pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use gpu::Gpu;
pub use init::GpuInit;
