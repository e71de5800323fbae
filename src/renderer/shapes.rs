//! Shape generation for 2D primitives
//!
//! Everything is a plain triangle list in local space, centered on the
//! entity's origin and facing +X.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::Rgba8;
use crate::palette::{
    BULLET_HEAD_COLOR, BULLET_TAIL_COLOR_END, BULLET_TAIL_COLOR_START, PLAYER_SHIP_COLOR_1,
    PLAYER_SHIP_COLOR_2, PLAYER_SHIP_EXHAUST_1, PLAYER_SHIP_EXHAUST_2,
};

/// Flat-colored triangles from a list of corner triples
fn triangles(corners: &[[f32; 2]], color: Rgba8) -> Vec<Vertex> {
    corners
        .iter()
        .map(|&[x, y]| Vertex::at(Vec2::new(x, y), color))
        .collect()
}

fn quad(min: Vec2, max: Vec2, color: Rgba8) -> [Vertex; 6] {
    let a = Vertex::at(min, color);
    let b = Vertex::at(Vec2::new(max.x, min.y), color);
    let c = Vertex::at(max, color);
    let d = Vertex::at(Vec2::new(min.x, max.y), color);
    [a, b, c, a, c, d]
}

/// Triangle fan around the origin through `corners`, closed back to the first
pub fn fan(corners: &[Vec2], color: Rgba8) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(corners.len() * 3);
    for (i, &corner) in corners.iter().enumerate() {
        let next = corners[(i + 1) % corners.len()];
        vertices.push(Vertex::at(Vec2::ZERO, color));
        vertices.push(Vertex::at(corner, color));
        vertices.push(Vertex::at(next, color));
    }
    vertices
}

/// Hull and exhaust flame; the flame's far tip sits at `exhaust`
pub fn player_ship(exhaust: Vec2) -> Vec<Vertex> {
    let mut vertices = ship_hull();

    let flame = PLAYER_SHIP_EXHAUST_1;
    vertices.push(Vertex::at(Vec2::new(-2.0, 0.0), flame));
    vertices.push(Vertex::at(Vec2::new(-1.7, 1.0), flame));
    vertices.push(Vertex::at(exhaust, PLAYER_SHIP_EXHAUST_2));

    vertices.push(Vertex::at(Vec2::new(-1.7, -1.0), flame));
    vertices.push(Vertex::at(Vec2::new(-2.0, 0.0), flame));
    vertices.push(Vertex::at(exhaust, PLAYER_SHIP_EXHAUST_2));

    vertices
}

/// Ship body without the flame (also used for the lives HUD)
pub fn ship_hull() -> Vec<Vertex> {
    let mut vertices = triangles(&[[-2.5, 2.0], [-1.5, 1.0], [-1.5, 2.0]], PLAYER_SHIP_COLOR_1);
    vertices.extend(triangles(
        &[[-1.5, 2.0], [-1.5, 0.0], [1.5, 1.0]],
        PLAYER_SHIP_COLOR_2,
    ));
    vertices.extend(triangles(
        &[[-1.5, 0.0], [1.5, -1.0], [1.5, 1.0]],
        PLAYER_SHIP_COLOR_1,
    ));
    vertices.extend(triangles(
        &[[-1.5, 0.0], [-1.5, -2.0], [1.5, -1.0]],
        PLAYER_SHIP_COLOR_2,
    ));
    vertices.extend(triangles(
        &[
            // Nose
            [1.5, 1.0],
            [1.5, -1.0],
            [2.5, 0.0],
            // Lower wing
            [-1.5, -1.0],
            [-2.5, -2.0],
            [-1.5, -2.0],
        ],
        PLAYER_SHIP_COLOR_1,
    ));
    vertices
}

/// Diamond head with a tail fading out behind it
pub fn bullet() -> Vec<Vertex> {
    let mut vertices = triangles(&[[0.0, -0.5], [0.5, 0.0], [0.0, 0.5]], BULLET_HEAD_COLOR);
    vertices.push(Vertex::at(Vec2::new(-2.0, 0.0), BULLET_TAIL_COLOR_END));
    vertices.push(Vertex::at(Vec2::new(0.0, -0.5), BULLET_TAIL_COLOR_START));
    vertices.push(Vertex::at(Vec2::new(0.0, 0.5), BULLET_TAIL_COLOR_START));
    vertices
}

pub fn beetle(color: Rgba8) -> Vec<Vertex> {
    triangles(
        &[
            [-2.0, 0.0],
            [1.0, 0.0],
            [2.0, 1.0],
            [-2.0, 0.0],
            [2.0, -1.0],
            [1.0, 0.0],
            [-3.0, 1.5],
            [-2.0, 0.0],
            [2.0, 1.0],
            [-3.0, -1.5],
            [2.0, -1.0],
            [-2.0, 0.0],
        ],
        color,
    )
}

pub fn wasp(color: Rgba8) -> Vec<Vertex> {
    triangles(
        &[
            [-1.0, 1.0],
            [3.0, 1.0],
            [0.0, 2.0],
            [-1.0, 1.0],
            [-1.0, 0.0],
            [0.0, 1.0],
            [-2.0, 0.0],
            [-1.0, -1.0],
            [-1.0, 1.0],
            [-1.0, 0.0],
            [-1.0, -1.0],
            [0.0, -1.0],
            [-1.0, -1.0],
            [0.0, -2.0],
            [1.0, -1.0],
        ],
        color,
    )
}

/// 3x5 block glyphs for the title, top row first
fn glyph(letter: char) -> [&'static str; 5] {
    match letter {
        'S' => ["###", "#..", "###", "..#", "###"],
        'T' => ["###", ".#.", ".#.", ".#.", ".#."],
        'A' => ["###", "#.#", "###", "#.#", "#.#"],
        'R' => ["##.", "#.#", "##.", "#.#", "#.#"],
        'H' => ["#.#", "#.#", "###", "#.#", "#.#"],
        'I' => ["###", ".#.", ".#.", ".#.", "###"],
        'P' => ["###", "#.#", "###", "#..", "#.."],
        _ => ["...", "...", "...", "...", "..."],
    }
}

const TITLE: &str = "STARSHIP";
const TITLE_CELL: f32 = 0.6;
const TITLE_LETTER_PITCH: f32 = 2.4;

/// Block-letter "STARSHIP", centered on the origin
pub fn title(color: Rgba8) -> Vec<Vertex> {
    let letters = TITLE.chars().count() as f32;
    let width = (letters - 1.0) * TITLE_LETTER_PITCH + 3.0 * TITLE_CELL;
    let height = 5.0 * TITLE_CELL;
    let origin = Vec2::new(-width / 2.0, height / 2.0);

    let mut vertices = Vec::new();
    for (i, letter) in TITLE.chars().enumerate() {
        let left = origin.x + i as f32 * TITLE_LETTER_PITCH;
        for (row, cells) in glyph(letter).iter().enumerate() {
            for (col, cell) in cells.chars().enumerate() {
                if cell != '#' {
                    continue;
                }
                let min = Vec2::new(
                    left + col as f32 * TITLE_CELL,
                    origin.y - (row + 1) as f32 * TITLE_CELL,
                );
                vertices.extend(quad(min, min + Vec2::splat(TITLE_CELL), color));
            }
        }
    }
    vertices
}

/// Thick segment from `start` to `end`
pub fn line(start: Vec2, end: Vec2, thickness: f32, color: Rgba8) -> Vec<Vertex> {
    let dir = (end - start).normalize_or_zero();
    if dir == Vec2::ZERO {
        return Vec::new();
    }
    let half = dir.perp() * thickness * 0.5;

    let a = Vertex::at(start + half, color);
    let b = Vertex::at(start - half, color);
    let c = Vertex::at(end + half, color);
    let d = Vertex::at(end - half, color);
    vec![a, b, c, c, b, d]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: Rgba8, segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        vertices.push(Vertex::at(center, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta1) * radius, color));
        vertices.push(Vertex::at(center + Vec2::from_angle(theta2) * radius, color));
    }

    vertices
}

const OUTLINE_SEGMENTS: u32 = 32;

/// Hollow circle whose band is centered on `radius`
pub fn circle_outline(center: Vec2, radius: f32, thickness: f32, color: Rgba8) -> Vec<Vertex> {
    let inner_radius = (radius - thickness * 0.5).max(0.0);
    let outer_radius = radius + thickness * 0.5;
    let segments = OUTLINE_SEGMENTS;
    let mut vertices = Vec::with_capacity((segments * 6) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        let inner1 = center + Vec2::from_angle(theta1) * inner_radius;
        let outer1 = center + Vec2::from_angle(theta1) * outer_radius;
        let inner2 = center + Vec2::from_angle(theta2) * inner_radius;
        let outer2 = center + Vec2::from_angle(theta2) * outer_radius;

        // Two triangles per segment
        vertices.push(Vertex::at(inner1, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(inner2, color));

        vertices.push(Vertex::at(inner2, color));
        vertices.push(Vertex::at(outer1, color));
        vertices.push(Vertex::at(outer2, color));
    }

    vertices
}
