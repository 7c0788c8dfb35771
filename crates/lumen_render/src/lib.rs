//! Rendering for the lumen ray tracer.
//!
//! The [`Tracer`] trait turns rays into colors; [`RayTracer`] is the
//! Whitted-style recursive implementation. [`Camera`] maps pixels to rays,
//! applies the configured sampling strategy (anti-aliasing, adaptive
//! supersampling, depth of field) and drives the threaded render pass that
//! writes through an [`ImageSink`].

mod camera;
mod sampler;
mod sink;
mod tracer;

pub use camera::{Camera, CameraBuildError, CameraBuilder};
pub use sampler::{Antialiasing, AperturePattern, DepthOfField};
pub use sink::{ImageSink, ImageWriter};
pub use tracer::{RayTracer, Tracer};

use thiserror::Error;

/// Errors raised by a render pass.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to build the worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to encode the output image: {0}")]
    Encode(#[from] image::ImageError),

    #[error("image buffer lock poisoned by a panicked worker")]
    PoisonedSink,
}
