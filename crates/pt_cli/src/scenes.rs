//! Built-in demo scenes.

use pt_renderer::{
    Camera, Color, Dielectric, Lambertian, Material, Point3, Result, SceneBuilder, Sphere, Vec3,
};

use crate::cli::SceneChoice;

/// Build the chosen scene together with a camera framing it.
pub fn build(choice: SceneChoice) -> Result<Camera> {
    match choice {
        SceneChoice::Single => single(),
        SceneChoice::Debug => debug(),
        SceneChoice::Spheres => spheres(),
    }
}

fn look_at(scene: SceneBuilder, from: Point3, at: Point3) -> Result<Camera> {
    Camera::new(scene.build(), from, Vec3::Y, at - from)
}

fn single() -> Result<Camera> {
    let scene = SceneBuilder::new().with(Sphere::new(
        Point3::ZERO,
        1.0,
        Lambertian::new(Color::splat(0.5))?,
    )?);
    look_at(scene, Point3::new(0.0, 0.0, -5.0), Point3::ZERO)
}

fn debug() -> Result<Camera> {
    let scene = SceneBuilder::new()
        .with(Sphere::new(Point3::ZERO, 1.0, Material::Debugon)?)
        .with(Sphere::new(Point3::new(0.0, -101.0, 0.0), 100.0, Material::Debugon)?);
    look_at(scene, Point3::new(0.0, 1.0, -5.0), Point3::ZERO)
}

fn spheres() -> Result<Camera> {
    let mut scene = SceneBuilder::new();

    // Ground
    scene.add(Sphere::new(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        Lambertian::new(Color::new(0.5, 0.5, 0.5))?,
    )?);

    // Three main spheres
    scene.add(Sphere::new(Point3::new(0.0, 1.0, 0.0), 1.0, Dielectric::new(1.5)?)?);
    scene.add(Sphere::new(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        Lambertian::new(Color::new(0.4, 0.2, 0.1))?,
    )?);
    scene.add(Sphere::new(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Lambertian::glossy(Color::new(0.7, 0.6, 0.5), 0.05)?,
    )?);

    // A ring of small spheres around the main ones
    for i in 0..12 {
        let angle = i as f64 * std::f64::consts::TAU / 12.0;
        let center = Point3::new(6.0 * angle.cos(), 0.3, 6.0 * angle.sin());
        let shade = i as f64 / 12.0;
        let material: Material = match i % 3 {
            0 => Lambertian::new(Color::new(shade, 0.3, 1.0 - shade))?.into(),
            1 => Lambertian::glossy(Color::new(0.8, 0.8, shade), 0.3 * shade)?.into(),
            _ => Dielectric::new(1.5)?.into(),
        };
        scene.add(Sphere::new(center, 0.3, material)?);
    }

    look_at(scene, Point3::new(13.0, 2.0, 3.0), Point3::ZERO)
}
