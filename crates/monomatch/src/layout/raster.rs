//! Pixel operations on RGBA rasters used while composing a card.
use image::imageops::{self, FilterType};
use image::{Rgb, Rgba, RgbaImage};

const EXTENT_EPSILON: f32 = 1e-3;

/// Pixel rectangle `(x, y, width, height)`.
pub type PixelRect = (u32, u32, u32, u32);

/// Bounding box of pixels with nonzero alpha, or `None` when fully transparent.
pub fn opaque_bounds(image: &RgbaImage) -> Option<PixelRect> {
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);
    let mut any = false;

    for (x, y, px) in image.enumerate_pixels() {
        if px[3] != 0 {
            any = true;
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
    }

    any.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Crops to the opaque bounding box; fully transparent images are returned as-is.
pub fn crop_to_opaque(image: &RgbaImage) -> RgbaImage {
    match opaque_bounds(image) {
        Some((x, y, w, h)) => imageops::crop_imm(image, x, y, w, h).to_image(),
        None => image.clone(),
    }
}

/// Crops a `size`×`size` square whose top-left corner is `(x, y)`.
///
/// Regions outside the source are transparent.
pub fn crop_square_padded(image: &RgbaImage, x: i64, y: i64, size: u32) -> RgbaImage {
    let mut out = RgbaImage::new(size.max(1), size.max(1));
    imageops::replace(&mut out, image, -x, -y);
    out
}

/// Sets the RGB of every pixel with nonzero alpha to `color`, leaving alpha unchanged.
pub fn recolor(image: &mut RgbaImage, color: Rgb<u8>) {
    for px in image.pixels_mut() {
        if px[3] != 0 {
            px[0] = color[0];
            px[1] = color[1];
            px[2] = color[2];
        }
    }
}

/// Rotates counter-clockwise by `degrees`, growing the canvas to fit the result.
///
/// Uses bilinear sampling; uncovered pixels are transparent.
pub fn rotate_expand(image: &RgbaImage, degrees: f32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return image.clone();
    }

    let (sin, cos) = degrees.to_radians().sin_cos();
    // Snap near-integral extents so quarter turns keep exact sizes.
    let extent = |v: f32| ((v - EXTENT_EPSILON).ceil() as u32).max(1);
    let out_w = extent(w as f32 * cos.abs() + h as f32 * sin.abs());
    let out_h = extent(w as f32 * sin.abs() + h as f32 * cos.abs());

    let src_cx = w as f32 / 2.0;
    let src_cy = h as f32 / 2.0;
    let dst_cx = out_w as f32 / 2.0;
    let dst_cy = out_h as f32 / 2.0;

    RgbaImage::from_fn(out_w, out_h, |x, y| {
        // Inverse mapping; y grows downward so counter-clockwise flips the sin sign.
        let dx = x as f32 + 0.5 - dst_cx;
        let dy = y as f32 + 0.5 - dst_cy;
        let sx = cos * dx - sin * dy + src_cx - 0.5;
        let sy = sin * dx + cos * dy + src_cy - 0.5;
        sample_bilinear(image, sx, sy)
    })
}

fn sample_bilinear(image: &RgbaImage, x: f32, y: f32) -> Rgba<u8> {
    let (w, h) = image.dimensions();
    if x <= -1.0 || y <= -1.0 || x >= w as f32 || y >= h as f32 {
        return Rgba([0, 0, 0, 0]);
    }

    let x0 = x.floor();
    let y0 = y.floor();
    let fx = x - x0;
    let fy = y - y0;
    let fetch = |xi: f32, yi: f32| -> [f32; 4] {
        if xi < 0.0 || yi < 0.0 || xi >= w as f32 || yi >= h as f32 {
            [0.0; 4]
        } else {
            image.get_pixel(xi as u32, yi as u32).0.map(f32::from)
        }
    };

    let p00 = fetch(x0, y0);
    let p10 = fetch(x0 + 1.0, y0);
    let p01 = fetch(x0, y0 + 1.0);
    let p11 = fetch(x0 + 1.0, y0 + 1.0);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let top = p00[c] + (p10[c] - p00[c]) * fx;
        let bottom = p01[c] + (p11[c] - p01[c]) * fx;
        out[c] = (top + (bottom - top) * fy).round().clamp(0.0, 255.0) as u8;
    }
    Rgba(out)
}

/// Scales `image` to fit inside a `size`×`size` square, preserving aspect ratio, and
/// centers it on a transparent square tile.
pub fn fit_to_square(image: &RgbaImage, size: u32) -> RgbaImage {
    let size = size.max(1);
    let mut tile = RgbaImage::new(size, size);
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 {
        return tile;
    }

    let scale = size as f32 / w.max(h) as f32;
    let fw = ((w as f32 * scale).round() as u32).clamp(1, size);
    let fh = ((h as f32 * scale).round() as u32).clamp(1, size);
    let scaled = resize_rgba(image, fw, fh);
    imageops::replace(
        &mut tile,
        &scaled,
        ((size - fw) / 2) as i64,
        ((size - fh) / 2) as i64,
    );
    tile
}

/// Scales `image` so its height is `height`, keeping aspect ratio.
pub fn resize_to_height(image: &RgbaImage, height: u32) -> RgbaImage {
    let (w, h) = image.dimensions();
    if w == 0 || h == 0 || h == height {
        return image.clone();
    }
    let height = height.max(1);
    let width = ((w as f64 * height as f64 / h as f64).round() as u32).max(1);
    resize_rgba(image, width, height)
}

/// Lanczos resize on premultiplied alpha, so transparent pixels do not bleed color.
pub fn resize_rgba(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let mut premultiplied = image.clone();
    for px in premultiplied.pixels_mut() {
        let a = px[3] as u32;
        for c in 0..3 {
            px[c] = ((px[c] as u32 * a + 127) / 255) as u8;
        }
    }

    let mut out = imageops::resize(&premultiplied, width.max(1), height.max(1), FilterType::Lanczos3);
    for px in out.pixels_mut() {
        let a = px[3] as u32;
        if a == 0 {
            px.0 = [0, 0, 0, 0];
            continue;
        }
        for c in 0..3 {
            px[c] = ((px[c] as u32 * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

/// Draws a filled disk of diameter `size` with an outline ring of `outline_width` pixels.
///
/// The outer edge is anti-aliased; everything outside the disk is transparent.
pub fn draw_ringed_disk(size: u32, fill: Rgb<u8>, outline: Rgb<u8>, outline_width: u32) -> RgbaImage {
    let radius = size as f32 / 2.0;
    let inner = radius - outline_width as f32;

    RgbaImage::from_fn(size, size, |x, y| {
        let dx = x as f32 + 0.5 - radius;
        let dy = y as f32 + 0.5 - radius;
        let d = (dx * dx + dy * dy).sqrt();
        let coverage = (radius - d + 0.5).clamp(0.0, 1.0);
        if coverage <= 0.0 {
            return Rgba([0, 0, 0, 0]);
        }
        let rgb = if outline_width > 0 && d > inner { outline } else { fill };
        Rgba([rgb[0], rgb[1], rgb[2], (coverage * 255.0).round() as u8])
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_block(w: u32, h: u32, x0: u32, y0: u32, bw: u32, bh: u32) -> RgbaImage {
        RgbaImage::from_fn(w, h, |x, y| {
            if x >= x0 && x < x0 + bw && y >= y0 && y < y0 + bh {
                Rgba([10, 20, 30, 200])
            } else {
                Rgba([99, 99, 99, 0])
            }
        })
    }

    #[test]
    fn opaque_bounds_finds_block() {
        let img = with_block(10, 8, 2, 3, 4, 2);
        assert_eq!(opaque_bounds(&img), Some((2, 3, 4, 2)));
        assert_eq!(opaque_bounds(&RgbaImage::new(4, 4)), None);
    }

    #[test]
    fn crop_to_opaque_trims_margins() {
        let img = with_block(10, 8, 2, 3, 4, 2);
        let cropped = crop_to_opaque(&img);
        assert_eq!(cropped.dimensions(), (4, 2));
        assert!(cropped.pixels().all(|p| p[3] == 200));
    }

    #[test]
    fn recolor_touches_only_visible_pixels() {
        let mut img = with_block(6, 6, 1, 1, 2, 2);
        img.put_pixel(5, 5, Rgba([1, 2, 3, 1]));
        let before = img.clone();
        recolor(&mut img, Rgb([255, 0, 128]));

        for (x, y, px) in img.enumerate_pixels() {
            let old = before.get_pixel(x, y);
            assert_eq!(px[3], old[3]);
            if old[3] != 0 {
                assert_eq!(&px.0[..3], &[255, 0, 128]);
            } else {
                assert_eq!(*px, *old);
            }
        }
    }

    #[test]
    fn rotate_quarter_turn_swaps_dimensions() {
        let img = with_block(20, 10, 0, 0, 20, 10);
        let rotated = rotate_expand(&img, 90.0);
        assert_eq!(rotated.dimensions(), (10, 20));
        assert_eq!(rotated.get_pixel(5, 10)[3], 200);
    }

    #[test]
    fn rotate_diagonal_grows_canvas() {
        let img = with_block(10, 10, 0, 0, 10, 10);
        let rotated = rotate_expand(&img, 45.0);
        assert_eq!(rotated.dimensions(), (15, 15));
        assert_eq!(rotated.get_pixel(0, 0)[3], 0);
        assert_eq!(rotated.get_pixel(7, 7)[3], 200);
    }

    #[test]
    fn fit_to_square_centers_wide_image() {
        let img = with_block(40, 20, 0, 0, 40, 20);
        let tile = fit_to_square(&img, 20);
        assert_eq!(tile.dimensions(), (20, 20));
        assert_eq!(opaque_bounds(&tile).map(|(_, y, w, h)| (y, w, h)), Some((5, 20, 10)));
    }

    #[test]
    fn crop_square_padded_fills_outside_with_transparency() {
        let img = with_block(4, 4, 0, 0, 4, 4);
        let out = crop_square_padded(&img, -2, -2, 8);
        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(out.get_pixel(0, 0)[3], 0);
        assert_eq!(out.get_pixel(2, 2)[3], 200);
        assert_eq!(opaque_bounds(&out), Some((2, 2, 4, 4)));
    }

    #[test]
    fn resize_rgba_keeps_solid_color_at_edges() {
        let mut img = RgbaImage::new(16, 16);
        for y in 4..12 {
            for x in 4..12 {
                img.put_pixel(x, y, Rgba([200, 100, 50, 255]));
            }
        }
        let out = resize_rgba(&img, 8, 8);
        for px in out.pixels().filter(|p| p[3] > 64) {
            assert!(px[0].abs_diff(200) <= 24, "{px:?}");
            assert!(px[1].abs_diff(100) <= 24, "{px:?}");
        }
    }

    #[test]
    fn resize_to_height_keeps_aspect() {
        let img = with_block(30, 10, 0, 0, 30, 10);
        assert_eq!(resize_to_height(&img, 20).dimensions(), (60, 20));
    }

    #[test]
    fn ringed_disk_has_outline_and_fill() {
        let disk = draw_ringed_disk(64, Rgb([40, 42, 54]), Rgb([30, 32, 44]), 4);
        assert_eq!(disk.get_pixel(0, 0)[3], 0);
        assert_eq!(disk.get_pixel(32, 32).0, [40, 42, 54, 255]);
        assert_eq!(disk.get_pixel(32, 1).0, [30, 32, 44, 255]);
    }
}
