//! RGBA8 conversion of a [`TrailCanvas`].
//!
//! Always available so hosts without the `png` feature can still blit the
//! buffer themselves.

use crate::canvas::TrailCanvas;
use crate::style::TrailStyle;

/// Maps the canvas to an RGBA8 buffer of `width * height * 4` bytes.
///
/// Each pixel mixes the style's backdrop (sampled at the row center), its
/// background and its stroke color by the canvas weights. Alpha is always
/// 255.
pub fn canvas_to_rgba(canvas: &TrailCanvas, style: &TrailStyle) -> Vec<u8> {
    let width = canvas.width();
    let height = canvas.height() as f64;
    let (bg, ink) = (style.background, style.stroke);
    let mut out = Vec::with_capacity(canvas.data().len() * 4);
    let rows = canvas
        .data()
        .chunks_exact(width)
        .zip(canvas.ground().chunks_exact(width));
    for (y, (intensity, ground)) in rows.enumerate() {
        let base = style.backdrop_at((y as f64 + 0.5) / height);
        for (&i, &g) in intensity.iter().zip(ground) {
            let rest = (1.0 - g - i).max(0.0);
            let mix = |b: u8, k: u8, s: u8| {
                (b as f64 * g + k as f64 * rest + s as f64 * i)
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            out.extend_from_slice(&[
                mix(base.r, bg.r, ink.r),
                mix(base.g, bg.g, ink.g),
                mix(base.b, bg.b, ink.b),
                255,
            ]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Rgb8;
    use glam::DVec2;

    #[test]
    fn canvas_to_rgba_correct_length() {
        let canvas = TrailCanvas::new(8, 4).unwrap();
        let buf = canvas_to_rgba(&canvas, &TrailStyle::default());
        assert_eq!(buf.len(), 8 * 4 * 4);
    }

    #[test]
    fn canvas_to_rgba_alpha_always_255() {
        let mut canvas = TrailCanvas::new(4, 4).unwrap();
        canvas.stroke(DVec2::new(0.0, 0.0), DVec2::new(3.0, 3.0), 0.6);
        let buf = canvas_to_rgba(&canvas, &TrailStyle::default());
        for (i, &byte) in buf.iter().enumerate() {
            if i % 4 == 3 {
                assert_eq!(byte, 255, "alpha at pixel {} should be 255", i / 4);
            }
        }
    }

    #[test]
    fn fresh_canvas_shows_vertical_backdrop() {
        let style = TrailStyle::default();
        let canvas = TrailCanvas::new(2, 3).unwrap();
        let buf = canvas_to_rgba(&canvas, &style);
        let row = |y: usize| &buf[y * 8..y * 8 + 4];
        let middle = style.backdrop[1];
        assert_eq!(row(1), &[middle.r, middle.g, middle.b, 255]);
        let top = style.backdrop_at(0.5 / 3.0);
        assert_eq!(row(0), &[top.r, top.g, top.b, 255]);
        assert_ne!(row(0), row(2));
    }

    #[test]
    fn long_fade_settles_on_background() {
        let style = TrailStyle::default();
        let mut canvas = TrailCanvas::new(3, 3).unwrap();
        for _ in 0..400 {
            canvas.fade(style.fade);
        }
        let buf = canvas_to_rgba(&canvas, &style);
        let bg = style.background;
        for px in buf.chunks_exact(4) {
            assert_eq!(px, &[bg.r, bg.g, bg.b, 255]);
        }
    }

    #[test]
    fn full_stroke_is_stroke_color_over_any_backdrop() {
        let style = TrailStyle {
            background: Rgb8::new(0, 0, 0),
            stroke: Rgb8::new(255, 255, 255),
            ..TrailStyle::default()
        };
        let mut canvas = TrailCanvas::new(2, 1).unwrap();
        canvas.stroke(DVec2::new(1.2, 0.5), DVec2::new(1.2, 0.5), 1.0);
        let buf = canvas_to_rgba(&canvas, &style.flat());
        assert_eq!(&buf[0..4], &[0, 0, 0, 255]);
        assert_eq!(&buf[4..8], &[255, 255, 255, 255]);
        let over_gradient = canvas_to_rgba(&canvas, &style);
        assert_eq!(&over_gradient[4..8], &[255, 255, 255, 255]);
    }
}
