//! Camera, sampling dispatch, and the threaded render pass.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::ThreadPoolBuilder;
use thiserror::Error;

use lumen_math::{align_zero, gen_f64, is_zero, Color, Point, Ray, Vector};

use crate::sampler::{adaptive_sample, offset, Antialiasing, AperturePattern, DepthOfField};
use crate::{ImageSink, RenderError, Tracer};

/// Errors raised while assembling a [`Camera`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CameraBuildError {
    #[error("forward and up directions must be orthogonal")]
    AxesNotOrthogonal,

    #[error("forward and up directions must not be parallel")]
    DegenerateAxes,

    #[error("{field} must be positive")]
    InvalidViewPlane { field: &'static str },

    #[error("missing required component: {field}")]
    MissingField { field: &'static str },

    #[error("cannot aim the camera at its own position")]
    TargetAtPosition,
}

/// Staged camera configuration; [`build`](CameraBuilder::build) validates
/// everything at once and produces an immutable [`Camera`].
pub struct CameraBuilder {
    position: Point,
    vto: Vector,
    vup: Vector,
    width: f64,
    height: f64,
    distance: f64,
    antialiasing: Antialiasing,
    depth_of_field: Option<DepthOfField>,
    threads: usize,
    tracer: Option<Box<dyn Tracer>>,
    sink: Option<Box<dyn ImageSink>>,
}

impl CameraBuilder {
    pub fn new(position: Point, vto: Vector, vup: Vector) -> Self {
        Self {
            position,
            vto,
            vup,
            width: 0.0,
            height: 0.0,
            distance: 0.0,
            antialiasing: Antialiasing::Off,
            depth_of_field: None,
            threads: 0,
            tracer: None,
            sink: None,
        }
    }

    /// Place the camera at `position` aimed at `target`, deriving an up
    /// direction and applying an optional roll (degrees) about the view axis.
    pub fn look_at(
        position: Point,
        target: &Point,
        roll_degrees: f64,
    ) -> Result<Self, CameraBuildError> {
        let vto = target
            .subtract(&position)
            .map_err(|_| CameraBuildError::TargetAtPosition)?
            .normalize();
        // Derive up from the world Y axis, falling back to Z when the view
        // axis is vertical.
        let mut vup = vto
            .cross(&Vector::Y)
            .and_then(|vright| vto.cross(&vright.normalize()))
            .map(|v| v.normalize())
            .unwrap_or(Vector::Z);
        if !is_zero(roll_degrees) {
            vup = vup.rotate_about(&vto, roll_degrees.to_radians());
        }
        Ok(Self::new(position, vto, vup))
    }

    /// View-plane size in world units.
    pub fn with_view_plane(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Distance from the camera position to the view plane.
    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = distance;
        self
    }

    pub fn with_antialiasing(mut self, antialiasing: Antialiasing) -> Self {
        self.antialiasing = antialiasing;
        self
    }

    pub fn with_depth_of_field(mut self, depth_of_field: DepthOfField) -> Self {
        self.depth_of_field = Some(depth_of_field);
        self
    }

    /// Worker thread count; 0 renders synchronously in row-major order.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_tracer(mut self, tracer: impl Tracer + 'static) -> Self {
        self.tracer = Some(Box::new(tracer));
        self
    }

    pub fn with_sink(mut self, sink: impl ImageSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    pub fn build(self) -> Result<Camera, CameraBuildError> {
        if !is_zero(self.vto.dot(&self.vup)) {
            return Err(CameraBuildError::AxesNotOrthogonal);
        }
        let vto = self.vto.normalize();
        let vup = self.vup.normalize();
        let vright = vto
            .cross(&vup)
            .map_err(|_| CameraBuildError::DegenerateAxes)?
            .normalize();

        if align_zero(self.width) <= 0.0 {
            return Err(CameraBuildError::InvalidViewPlane {
                field: "view-plane width",
            });
        }
        if align_zero(self.height) <= 0.0 {
            return Err(CameraBuildError::InvalidViewPlane {
                field: "view-plane height",
            });
        }
        if align_zero(self.distance) <= 0.0 {
            return Err(CameraBuildError::InvalidViewPlane {
                field: "view-plane distance",
            });
        }

        let tracer = self
            .tracer
            .ok_or(CameraBuildError::MissingField { field: "tracer" })?;
        let sink = self
            .sink
            .ok_or(CameraBuildError::MissingField { field: "image sink" })?;

        Ok(Camera {
            position: self.position,
            vto,
            vup,
            vright,
            width: self.width,
            height: self.height,
            distance: self.distance,
            antialiasing: self.antialiasing,
            depth_of_field: self.depth_of_field,
            threads: self.threads,
            tracer,
            sink,
        })
    }
}

/// A validated camera: position, orthonormal basis, view plane, sampling
/// configuration, and the tracer and sink it renders through.
pub struct Camera {
    position: Point,
    vto: Vector,
    vup: Vector,
    vright: Vector,
    width: f64,
    height: f64,
    distance: f64,
    antialiasing: Antialiasing,
    depth_of_field: Option<DepthOfField>,
    threads: usize,
    tracer: Box<dyn Tracer>,
    sink: Box<dyn ImageSink>,
}

impl Camera {
    pub fn position(&self) -> &Point {
        &self.position
    }

    pub fn vto(&self) -> &Vector {
        &self.vto
    }

    pub fn vup(&self) -> &Vector {
        &self.vup
    }

    pub fn vright(&self) -> &Vector {
        &self.vright
    }

    /// Center of pixel (`col`, `row`) on the view plane, for a raster of
    /// `nx` columns by `ny` rows.
    fn pixel_center(&self, nx: usize, ny: usize, col: usize, row: usize) -> Point {
        let center = match self.vto.scale(self.distance) {
            Ok(step) => self.position.add(&step),
            Err(_) => self.position,
        };
        let rx = self.width / nx as f64;
        let ry = self.height / ny as f64;
        let dx = (col as f64 - (nx as f64 - 1.0) / 2.0) * rx;
        let dy = -(row as f64 - (ny as f64 - 1.0) / 2.0) * ry;
        offset(&center, &self.vright, &self.vup, dx, dy)
    }

    /// Ray from the camera through the center of pixel (`col`, `row`).
    pub fn construct_ray(&self, nx: usize, ny: usize, col: usize, row: usize) -> Ray {
        self.ray_through(&self.pixel_center(nx, ny, col, row))
    }

    fn ray_through(&self, point: &Point) -> Ray {
        match point.subtract(&self.position) {
            Ok(direction) => Ray::new(self.position, direction),
            // The view plane sits at a positive distance, so a sample point
            // cannot coincide with the camera; fall through to the view axis.
            Err(_) => Ray::new(self.position, self.vto),
        }
    }

    fn aperture_radius(&self, nx: usize, ny: usize) -> f64 {
        match &self.depth_of_field {
            Some(dof) => {
                (dof.aperture * (self.width / nx as f64) * (self.height / ny as f64)).sqrt() / 2.0
            }
            None => 0.0,
        }
    }

    /// Trace one ray, or its whole aperture beam when depth of field is on,
    /// and average.
    fn beam_color(&self, ray: &Ray, aperture_radius: f64, rng: &mut dyn RngCore) -> Color {
        let dof = match &self.depth_of_field {
            Some(dof) => dof,
            None => return self.tracer.trace_ray(ray),
        };
        let beam = match dof.pattern {
            AperturePattern::Grid => ray.grid_beam(
                &self.vup,
                &self.vright,
                aperture_radius,
                dof.rays,
                dof.focal_distance,
            ),
            AperturePattern::Jittered => ray.jittered_beam(
                &self.vup,
                &self.vright,
                aperture_radius,
                dof.rays,
                dof.focal_distance,
                rng,
            ),
        };
        let mut color = Color::BLACK;
        for sample in &beam {
            color = color + self.tracer.trace_ray(sample);
        }
        color.reduce(beam.len())
    }

    fn render_pixel(
        &self,
        nx: usize,
        ny: usize,
        col: usize,
        row: usize,
        rng: &mut dyn RngCore,
    ) -> Color {
        let aperture_radius = self.aperture_radius(nx, ny);
        match self.antialiasing {
            Antialiasing::Off => {
                self.beam_color(&self.construct_ray(nx, ny, col, row), aperture_radius, rng)
            }
            Antialiasing::Grid { size } => {
                let center = self.pixel_center(nx, ny, col, row);
                let rx = self.width / nx as f64;
                let ry = self.height / ny as f64;

                let mut color = self.beam_color(&self.ray_through(&center), aperture_radius, rng);
                let mut count = 1;
                for i in 0..size {
                    for j in 0..size {
                        // One random sample per grid cell.
                        let dx = rx * ((j as f64 + gen_f64(rng)) / size as f64 - 0.5);
                        let dy = ry * (0.5 - (i as f64 + gen_f64(rng)) / size as f64);
                        let point = offset(&center, &self.vright, &self.vup, dx, dy);
                        color =
                            color + self.beam_color(&self.ray_through(&point), aperture_radius, rng);
                        count += 1;
                    }
                }
                color.reduce(count)
            }
            Antialiasing::Adaptive { depth } => {
                let center = self.pixel_center(nx, ny, col, row);
                let rx = self.width / nx as f64 / 2.0;
                let ry = self.height / ny as f64 / 2.0;
                adaptive_sample(
                    &center,
                    rx,
                    ry,
                    &self.vright,
                    &self.vup,
                    depth,
                    &mut |point| self.beam_color(&self.ray_through(point), aperture_radius, rng),
                )
            }
        }
    }

    /// Render every pixel of the sink's raster and finalize the image.
    ///
    /// With a nonzero thread count, a fixed pool of workers claims pixels
    /// through a shared atomic cursor; each pixel is rendered by exactly one
    /// worker, sub-sampling included. With zero threads the pass runs
    /// synchronously in row-major order.
    pub fn render(&self) -> Result<(), RenderError> {
        let (nx, ny) = self.sink.dimensions();
        let total = nx * ny;
        info!(
            "rendering {nx}x{ny} pixels ({} threads)",
            self.threads.max(1)
        );

        if self.threads == 0 {
            let mut rng = StdRng::from_entropy();
            for row in 0..ny {
                for col in 0..nx {
                    let color = self.render_pixel(nx, ny, col, row, &mut rng);
                    self.sink.write_pixel(col, row, color);
                }
            }
        } else {
            let pool = ThreadPoolBuilder::new().num_threads(self.threads).build()?;
            let cursor = AtomicUsize::new(0);
            let completed = AtomicUsize::new(0);
            let progress_step = (total / 20).max(1);
            pool.broadcast(|_| {
                let mut rng = StdRng::from_entropy();
                loop {
                    let index = cursor.fetch_add(1, Ordering::Relaxed);
                    if index >= total {
                        break;
                    }
                    let (col, row) = (index % nx, index / nx);
                    let color = self.render_pixel(nx, ny, col, row, &mut rng);
                    self.sink.write_pixel(col, row, color);
                    let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                    if done % progress_step == 0 {
                        debug!("rendered {done}/{total} pixels");
                    }
                }
            });
        }

        info!("render finished, finalizing image");
        self.sink.finalize()
    }
}
