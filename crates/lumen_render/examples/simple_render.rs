//! Renders a small demo scene to `demo.png`.
//!
//! Run with `RUST_LOG=debug` to watch render progress.

use anyhow::Result;

use lumen_math::{Color, Point, Vector};
use lumen_render::{Antialiasing, CameraBuilder, ImageWriter, RayTracer};
use lumen_scene::{
    AmbientLight, DirectionalLight, Geometry, Material, Plane, PointLight, Scene, Sphere,
    SpotLight, Triangle,
};

fn main() -> Result<()> {
    env_logger::init();

    let scene = Scene::new("demo")
        .with_background(Color::new(0.02, 0.02, 0.05))
        .with_ambient(AmbientLight::new(Color::WHITE, 0.1))
        .with_geometry(
            Geometry::new(Sphere::new(Point::new(-30.0, 0.0, -120.0), 35.0))
                .with_emission(Color::new(0.0, 0.0, 0.1))
                .with_material(
                    Material::new()
                        .with_kd(0.4)
                        .with_ks(0.3)
                        .with_shininess(60)
                        .with_kt(0.3),
                ),
        )
        .with_geometry(
            Geometry::new(Sphere::new(Point::new(45.0, -10.0, -160.0), 25.0)).with_material(
                Material::new()
                    .with_kd(0.2)
                    .with_ks(0.4)
                    .with_shininess(100)
                    .with_kr(0.6),
            ),
        )
        .with_geometry(
            Geometry::new(Plane::new(Point::new(0.0, -40.0, 0.0), Vector::Y)).with_material(
                Material::new().with_kd(0.5).with_ks(0.2).with_shininess(30),
            ),
        )
        .with_geometry(
            Geometry::new(Triangle::new(
                Point::new(-80.0, -40.0, -200.0),
                Point::new(0.0, 60.0, -220.0),
                Point::new(80.0, -40.0, -200.0),
            )?)
            .with_emission(Color::new(0.05, 0.0, 0.0))
            .with_material(Material::new().with_kd(0.4).with_kr(0.2)),
        )
        .with_light(DirectionalLight::new(
            Color::new(0.3, 0.3, 0.3),
            Vector::new(1.0, -1.0, -1.0)?,
        ))
        .with_light(
            PointLight::new(Color::new(0.7, 0.7, 0.6), Point::new(-60.0, 60.0, -60.0))
                .with_kl(0.0004)
                .with_kq(0.0000006),
        )
        .with_light(
            SpotLight::new(
                Color::new(0.6, 0.6, 0.9),
                Point::new(60.0, 80.0, -80.0),
                Vector::new(-0.5, -1.0, -0.7)?,
            )
            .with_kl(0.0001)
            .with_narrow_beam(6.0),
        );

    let camera = CameraBuilder::new(Point::new(0.0, 0.0, 40.0), -Vector::Z, Vector::Y)
        .with_view_plane(200.0, 200.0)
        .with_distance(120.0)
        .with_antialiasing(Antialiasing::Adaptive { depth: 3 })
        .with_threads(4)
        .with_tracer(RayTracer::new(scene))
        .with_sink(ImageWriter::new("demo.png", 600, 600))
        .build()?;

    camera.render()?;
    Ok(())
}
