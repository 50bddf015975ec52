//! Shape generation for 2D primitives
//!
//! Everything here works in screen pixels (origin top-left, y down) and is
//! mapped to NDC at the end with [`screen_to_ndc`].

use glam::Vec2;

use super::vertex::Vertex;
use crate::assets::SpriteImage;
use crate::sim::Viewport;

/// Screen pixels to normalized device coordinates
pub fn screen_to_ndc(viewport: Viewport, p: Vec2) -> [f32; 2] {
    [
        p.x / viewport.width * 2.0 - 1.0,
        1.0 - p.y / viewport.height * 2.0,
    ]
}

/// Two triangles covering the quad a-b-c-d (in order around the edge)
fn quad(out: &mut Vec<Vertex>, viewport: Viewport, corners: [Vec2; 4], color: [f32; 4]) {
    let [a, b, c, d] = corners.map(|p| screen_to_ndc(viewport, p));
    for p in [a, b, c, a, c, d] {
        out.push(Vertex { position: p, color });
    }
}

/// Filled axis-aligned rectangle
pub fn rect(
    out: &mut Vec<Vertex>,
    viewport: Viewport,
    origin: Vec2,
    size: Vec2,
    color: [f32; 4],
) {
    quad(
        out,
        viewport,
        [
            origin,
            origin + Vec2::new(size.x, 0.0),
            origin + size,
            origin + Vec2::new(0.0, size.y),
        ],
        color,
    );
}

/// Straight line of the given stroke width
pub fn line(
    out: &mut Vec<Vertex>,
    viewport: Viewport,
    from: Vec2,
    to: Vec2,
    width: f32,
    color: [f32; 4],
) {
    let dir = (to - from).normalize_or_zero();
    // Perpendicular for width
    let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
    quad(
        out,
        viewport,
        [from + perp, to + perp, to - perp, from - perp],
        color,
    );
}

/// Sprite drawn as one quad per visible texel, centered on `center`
/// and rotated clockwise (screen space) by `rotation` radians.
pub fn sprite(
    out: &mut Vec<Vertex>,
    viewport: Viewport,
    image: &SpriteImage,
    center: Vec2,
    scale: f32,
    rotation: f32,
) {
    let half = image.size() / 2.0;
    let (sin, cos) = rotation.sin_cos();
    let transform = |local: Vec2| {
        let p = local * scale;
        center + Vec2::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos)
    };

    for y in 0..image.height {
        for x in 0..image.width {
            let [r, g, b, a] = image.pixel(x, y);
            if a == 0 {
                continue;
            }
            let color = [
                r as f32 / 255.0,
                g as f32 / 255.0,
                b as f32 / 255.0,
                a as f32 / 255.0,
            ];
            let tl = Vec2::new(x as f32, y as f32) - half;
            quad(
                out,
                viewport,
                [
                    transform(tl),
                    transform(tl + Vec2::X),
                    transform(tl + Vec2::ONE),
                    transform(tl + Vec2::Y),
                ],
                color,
            );
        }
    }
}
