//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that can be rendered
//! independently and in parallel using rayon. Each bucket goes through the
//! same [`Camera::render`] entry point an external caller would use.

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::{Camera, Image, RenderConfig};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// The bucket covering a whole `width` x `height` image.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height, 0)
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// True for the all-zero bucket, which callers use to mean "everything".
    pub fn is_full_image_sentinel(&self) -> bool {
        self.x == 0 && self.y == 0 && self.width == 0 && self.height == 0
    }

    /// Turn an optional request into a concrete, in-bounds bucket.
    pub(crate) fn resolve(region: Option<Bucket>, width: u32, height: u32) -> Result<Bucket> {
        let region = match region {
            Some(region) if !region.is_full_image_sentinel() => region,
            _ => return Ok(Self::full(width, height)),
        };

        let fits = |start: u32, len: u32, total: u32| {
            len > 0 && start.checked_add(len).is_some_and(|end| end <= total)
        };
        if fits(region.x, region.width, width) && fits(region.y, region.height, height) {
            Ok(region)
        } else {
            Err(Error::InvalidRegion {
                region,
                width,
                height,
            })
        }
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets for an image, sorted in spiral order from center.
///
/// Buckets at the right and bottom edges are cropped to the image.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();
    let mut index = 0;

    // Generate grid of buckets
    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, index));
            index += 1;
            x = x.saturating_add(bucket_size);
        }
        y = y.saturating_add(bucket_size);
    }

    // Sort by distance from center (spiral order)
    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from image center (spiral order).
///
/// Buckets closer to the center are rendered first, so the most
/// visually important part of the image is finished early.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;

    let distance = |b: &Bucket| {
        let bx = b.x as f64 + b.width as f64 / 2.0;
        let by = b.y as f64 + b.height as f64 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance(a).total_cmp(&distance(b)));
}

/// Render the full image as independent buckets in parallel and stitch them together.
///
/// The result is identical to `camera.render(config, None)`. A zero
/// `bucket_size` is rejected.
pub fn render_buckets(camera: &Camera, config: &RenderConfig, bucket_size: u32) -> Result<Image> {
    config.validate()?;
    if bucket_size == 0 {
        return Err(Error::invalid("bucket size must be at least 1"));
    }
    let buckets = generate_buckets(config.width, config.height, bucket_size);
    log::debug!("Rendering {} buckets of up to {}px", buckets.len(), bucket_size);

    let tiles = buckets
        .into_par_iter()
        .map(|bucket| {
            let tile = camera.render(config, Some(bucket))?;
            log::trace!("Bucket {} done at ({}, {})", bucket.index, bucket.x, bucket.y);
            Ok((bucket, tile))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut image = Image::new(config.width, config.height);
    for (bucket, tile) in &tiles {
        image.blit(tile, bucket.x, bucket.y);
    }
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u64 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        // Total pixels should equal image size
        let total_pixels: u64 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 70));
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!(first.x, 64);
        assert_eq!(first.y, 64);
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_render_buckets_rejects_zero_size() {
        let scene = crate::SceneBuilder::new().build();
        let camera = Camera::new(scene, pt_math::Point3::ZERO, pt_math::Vec3::Y, pt_math::Vec3::Z)
            .unwrap();
        let config = RenderConfig {
            width: 4,
            height: 4,
            samples_per_pixel: 1,
            ..Default::default()
        };

        assert!(matches!(
            render_buckets(&camera, &config, 0),
            Err(Error::InvalidParameter(_))
        ));
        assert_eq!(render_buckets(&camera, &config, 1).unwrap().width(), 4);
    }

    #[test]
    fn test_resolve_sentinel_and_none_mean_full_image() {
        assert_eq!(Bucket::resolve(None, 20, 10).unwrap(), Bucket::full(20, 10));
        assert_eq!(
            Bucket::resolve(Some(Bucket::default()), 20, 10).unwrap(),
            Bucket::full(20, 10)
        );
    }

    #[test]
    fn test_resolve_rejects_out_of_bounds_regions() {
        let inside = Bucket::new(10, 5, 10, 5, 0);
        assert_eq!(Bucket::resolve(Some(inside), 20, 10).unwrap(), inside);

        for region in [
            Bucket::new(15, 0, 10, 5, 0),
            Bucket::new(0, 8, 5, 5, 0),
            Bucket::new(5, 5, 0, 2, 0),
            Bucket::new(u32::MAX, 0, 2, 2, 0),
        ] {
            assert!(matches!(
                Bucket::resolve(Some(region), 20, 10),
                Err(Error::InvalidRegion { .. })
            ));
        }
    }
}
