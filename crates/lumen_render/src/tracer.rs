//! Recursive Whitted-style ray tracing.

use lumen_math::{align_zero, Color, Ray, Vector};
use lumen_scene::{closest_intersection, GeoPoint, Intersectable, LightSource, Scene};

/// Turns a ray into the color seen along it.
///
/// The seam between the camera's sampling machinery and the shading model;
/// tests substitute counting or constant-color doubles here.
pub trait Tracer: Send + Sync {
    fn trace_ray(&self, ray: &Ray) -> Color;
}

/// Recursion depth for the global-effects computation.
const MAX_LEVEL: u32 = 10;

/// Energy threshold below which a recursive branch contributes nothing.
const MIN_K: f64 = 0.001;

/// The recursive ray tracer: local Phong shading with
/// transparency-attenuated shadows, plus reflected and refracted secondary
/// rays bounded by recursion level and accumulated energy.
pub struct RayTracer {
    scene: Scene,
    max_level: u32,
    min_k: f64,
}

impl RayTracer {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            max_level: MAX_LEVEL,
            min_k: MIN_K,
        }
    }

    /// Override the recursion depth.
    pub fn with_max_level(mut self, max_level: u32) -> Self {
        self.max_level = max_level;
        self
    }

    /// Override the minimum-contribution threshold.
    pub fn with_min_k(mut self, min_k: f64) -> Self {
        self.min_k = min_k;
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    fn closest(&self, ray: &Ray) -> Option<GeoPoint<'_>> {
        let hits = self.scene.geometries().intersect_unbounded(ray)?;
        closest_intersection(ray, hits)
    }

    fn color_at(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Color) -> Color {
        let color = self.local_effects(gp, ray, k);
        if level <= 1 {
            color
        } else {
            color + self.global_effects(gp, ray, level, k)
        }
    }

    /// Emission plus per-light diffuse and specular terms.
    ///
    /// A light contributes only when it and the viewer are on the same side
    /// of the surface (sign agreement of `n.l` and `n.v`) and its shadow ray
    /// carries enough energy through any transparent blockers.
    fn local_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, k: Color) -> Color {
        let mut color = gp.geometry.emission();
        let v = ray.direction();
        let n = match gp.geometry.normal(&gp.point) {
            Ok(n) => n,
            Err(_) => return color,
        };
        let nv = align_zero(n.dot(v));
        if nv == 0.0 {
            return color;
        }

        let material = gp.geometry.material();
        for light in self.scene.lights() {
            let l = match light.direction_at(&gp.point) {
                Some(l) => l,
                None => continue,
            };
            let nl = align_zero(n.dot(&l));
            if nl * nv <= 0.0 {
                continue;
            }
            let ktr = self.transparency(gp, light, &l, &n);
            if !(ktr * k).higher_than(self.min_k) {
                continue;
            }
            let il = light.intensity_at(&gp.point) * ktr;
            color = color
                + il * material.kd().scale(nl.abs())
                + il * specular(material.ks(), material.shininess(), &n, &l, nl, v);
        }
        color
    }

    /// Running transmittance toward a light: 1 when unobstructed, the
    /// product of blocker `kT`s otherwise, clamped to zero once it falls
    /// below the minimum threshold.
    fn transparency(
        &self,
        gp: &GeoPoint<'_>,
        light: &LightSource,
        l: &Vector,
        n: &Vector,
    ) -> Color {
        let shadow_ray = Ray::with_offset(gp.point, -*l, n);
        let light_distance = light.distance(&gp.point);
        let hits = match self.scene.geometries().intersect(&shadow_ray, light_distance) {
            Some(hits) => hits,
            None => return Color::WHITE,
        };

        let mut ktr = Color::WHITE;
        for hit in hits {
            if align_zero(hit.point.distance(&gp.point) - light_distance) <= 0.0 {
                ktr = ktr * hit.geometry.material().kt();
                if ktr.lower_than(self.min_k) {
                    return Color::BLACK;
                }
            }
        }
        ktr
    }

    /// Reflection and refraction, each traced independently and summed.
    fn global_effects(&self, gp: &GeoPoint<'_>, ray: &Ray, level: u32, k: Color) -> Color {
        let n = match gp.geometry.normal(&gp.point) {
            Ok(n) => n,
            Err(_) => return Color::BLACK,
        };
        let v = ray.direction();
        let material = gp.geometry.material();

        // Mirror direction v - n*2(v.n); degenerates (grazing ray) carry no
        // reflected energy.
        let reflected = n
            .scale(2.0 * v.dot(&n))
            .and_then(|s| v.subtract(&s))
            .ok()
            .map(|dir| Ray::with_offset(gp.point, dir, &n));
        let reflection = match reflected {
            Some(r) => self.global_effect(&r, level, k, material.kr()),
            None => Color::BLACK,
        };

        // Transparency continues straight through, origin biased to the far
        // side of the surface.
        let refracted = Ray::with_offset(gp.point, *v, &n);
        reflection + self.global_effect(&refracted, level, k, material.kt())
    }

    fn global_effect(&self, ray: &Ray, level: u32, k: Color, kx: Color) -> Color {
        let kkx = kx * k;
        if kkx.lower_than(self.min_k) {
            return Color::BLACK;
        }
        match self.closest(ray) {
            None => self.scene.background() * kx,
            Some(gp) => self.color_at(&gp, ray, level - 1, kkx) * kx,
        }
    }
}

impl Tracer for RayTracer {
    fn trace_ray(&self, ray: &Ray) -> Color {
        match self.closest(ray) {
            None => self.scene.background(),
            Some(gp) => {
                // Ambient is added once, outside the recursive attenuation.
                self.color_at(&gp, ray, self.max_level, Color::WHITE)
                    + self.scene.ambient().intensity()
            }
        }
    }
}

fn specular(ks: Color, shininess: i32, n: &Vector, l: &Vector, nl: f64, v: &Vector) -> Color {
    let r = match n.scale(2.0 * nl).and_then(|s| l.subtract(&s)) {
        Ok(r) => r.normalize(),
        Err(_) => return Color::BLACK,
    };
    let factor = -v.dot(&r);
    if align_zero(factor) <= 0.0 {
        Color::BLACK
    } else {
        ks.scale(factor.powi(shininess))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{Point, Vector};
    use lumen_scene::{
        AmbientLight, DirectionalLight, Geometry, Material, Plane, PointLight, Sphere, Triangle,
    };

    const BACKGROUND: Color = Color::new(0.1, 0.2, 0.3);

    fn diffuse_sphere_scene() -> Scene {
        Scene::new("diffuse sphere")
            .with_background(BACKGROUND)
            .with_geometry(
                Geometry::new(Sphere::new(Point::new(0.0, 0.0, -50.0), 50.0))
                    .with_material(Material::new().with_kd(0.5)),
            )
            .with_light(DirectionalLight::new(Color::WHITE, -Vector::Z))
    }

    #[test]
    fn test_miss_returns_background() {
        let tracer = RayTracer::new(diffuse_sphere_scene());
        let ray = Ray::new(Point::new(500.0, 0.0, 50.0), -Vector::Z);
        assert_eq!(tracer.trace_ray(&ray), BACKGROUND);
    }

    #[test]
    fn test_diffuse_sphere_under_directional_light() {
        let tracer = RayTracer::new(diffuse_sphere_scene());
        let ray = Ray::new(Point::new(0.0, 0.0, 50.0), -Vector::Z);
        let color = tracer.trace_ray(&ray);
        assert_ne!(color, BACKGROUND);
        // Head-on hit: |n.l| = 1, so the color is exactly kD * intensity.
        assert!((color.r - 0.5).abs() < 1e-12);
        assert!((color.g - 0.5).abs() < 1e-12);
        assert!((color.b - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_ambient_added_once() {
        let scene = diffuse_sphere_scene().with_ambient(AmbientLight::new(Color::WHITE, 0.1));
        let tracer = RayTracer::new(scene);
        let ray = Ray::new(Point::new(0.0, 0.0, 50.0), -Vector::Z);
        let color = tracer.trace_ray(&ray);
        assert!((color.r - 0.6).abs() < 1e-12);
    }

    // Mirror plane at z = 0 facing an emissive sphere behind the ray origin.
    fn mirror_scene(kr: f64) -> Scene {
        Scene::new("mirror")
            .with_background(Color::BLACK)
            .with_geometry(
                Geometry::new(Plane::new(Point::ORIGIN, Vector::Z))
                    .with_material(Material::new().with_kr(kr)),
            )
            .with_geometry(
                Geometry::new(Sphere::new(Point::new(0.0, 0.0, 30.0), 5.0))
                    .with_emission(Color::new(0.8, 0.0, 0.0)),
            )
    }

    #[test]
    fn test_level_one_skips_global_effects() {
        let ray = Ray::new(Point::new(0.0, 1.0, 15.0), Vector::new(0.0, -1.0, -15.0).unwrap());

        let local_only = RayTracer::new(mirror_scene(1.0)).with_max_level(1);
        assert_eq!(local_only.trace_ray(&ray), Color::BLACK);

        let recursive = RayTracer::new(mirror_scene(1.0));
        let color = recursive.trace_ray(&ray);
        assert!(color.r > 0.0, "mirror should pick up the emissive sphere");
    }

    #[test]
    fn test_zero_coefficients_contribute_black() {
        let ray = Ray::new(Point::new(0.0, 1.0, 15.0), Vector::new(0.0, -1.0, -15.0).unwrap());
        let tracer = RayTracer::new(mirror_scene(0.0));
        assert_eq!(tracer.trace_ray(&ray), Color::BLACK);
    }

    fn shadow_scene(blocker_kt: f64, with_blocker: bool) -> Scene {
        let mut scene = Scene::new("shadow")
            .with_background(Color::BLACK)
            .with_geometry(
                Geometry::new(Sphere::new(Point::ORIGIN, 1.0))
                    .with_emission(Color::new(0.2, 0.0, 0.0))
                    .with_material(Material::new().with_kd(0.5)),
            )
            .with_light(PointLight::new(Color::WHITE, Point::new(0.0, 0.0, 3.0)));
        if with_blocker {
            scene = scene.with_geometry(
                Geometry::new(
                    Triangle::new(
                        Point::new(-5.0, -5.0, 2.0),
                        Point::new(5.0, -5.0, 2.0),
                        Point::new(0.0, 5.0, 2.0),
                    )
                    .unwrap(),
                )
                .with_material(Material::new().with_kt(blocker_kt)),
            );
        }
        scene
    }

    #[test]
    fn test_opaque_blocker_gives_full_shadow() {
        let ray = Ray::new(Point::new(0.0, 0.0, 1.5), -Vector::Z);
        let lit = RayTracer::new(shadow_scene(0.0, false)).trace_ray(&ray);
        let shadowed = RayTracer::new(shadow_scene(0.0, true)).trace_ray(&ray);
        // Fully shadowed: only the emission survives.
        assert_eq!(shadowed, Color::new(0.2, 0.0, 0.0));
        assert!(lit.r > shadowed.r);
    }

    #[test]
    fn test_transparent_blocker_attenuates() {
        let ray = Ray::new(Point::new(0.0, 0.0, 1.5), -Vector::Z);
        let lit = RayTracer::new(shadow_scene(0.0, false)).trace_ray(&ray);
        let half = RayTracer::new(shadow_scene(0.5, true)).trace_ray(&ray);
        assert!(half.r > 0.2, "some light passes a half-transparent blocker");
        assert!(half.r < lit.r);
    }
}
