type PolygonList = Vec<[f32; 4]>;
type Vector = [f32; 3];

use std::f32::consts::PI;

use crate::{
    constants::{CUBE, ENABLE_BACK_FACE_CULLING, PARAMETRIC_STEPS},
    matrix::add_point,
    vector::{cross_product, subtract_vectors},
};
use super::{
    scan_line,
    Picture, LightingConfig, ReflectionConstants, get_illumination,
};

pub fn add_polygon(m: &mut PolygonList, p0: Vector, p1: Vector, p2: Vector) {
    add_point(m, p0[0], p0[1], p0[2], 1.0);
    add_point(m, p1[0], p1[1], p1[2], 1.0);
    add_point(m, p2[0], p2[1], p2[2], 1.0);
}

pub fn surface_normal(polygon: &[[f32; 4]]) -> Vector {
    cross_product(&subtract_vectors(&polygon[1], &polygon[0]), &subtract_vectors(&polygon[2], &polygon[0]))
}

pub fn render_polygons(m: &[[f32; 4]], picture: &mut Picture, lighting_config: &LightingConfig, reflection_constants: &ReflectionConstants) {
    for polygon in m.chunks_exact(3) {
        let normal = surface_normal(polygon);

        // the viewer is <0, 0, 1> so n . v is just the z component of the normal
        if ENABLE_BACK_FACE_CULLING && normal[2] <= 0.0 {
            continue;
        }

        let color = get_illumination(&normal, lighting_config, reflection_constants);
        scan_line::flat(picture, polygon, &color);
    }
}

pub fn add_box(m: &mut PolygonList, x: f32, y: f32, z: f32, w: f32, h: f32, d: f32) {
    /*
        4 ---- 5
      / |    / |
    0 ---- 1   | h
    |   |  |   |
    |   7 -|-- 6
    | /    | /  d
    3 ---- 2
       w
    */

    let vertices = [
        [x, y, z],
        [x + w, y, z],
        [x + w, y - h, z],
        [x, y - h, z],
        [x, y, z - d],
        [x + w, y, z - d],
        [x + w, y - h, z - d],
        [x, y - h, z - d],
    ];

    for (a, b, c) in CUBE {
        add_polygon(m, vertices[a], vertices[b], vertices[c]);
    }
}

// (PARAMETRIC_STEPS + 1) x (PARAMETRIC_STEPS + 1) grid, outer index first
fn generate_points(point: impl Fn(f32, f32) -> Vector) -> Vec<Vector> {
    let steps = PARAMETRIC_STEPS as f32;

    (0..=PARAMETRIC_STEPS)
        .flat_map(|i| (0..=PARAMETRIC_STEPS).map(move |j| (i as f32 / steps, j as f32 / steps)))
        .map(|(outer, inner)| point(outer, inner))
        .collect()
}

fn grid_index(outer: i32, inner: i32) -> usize {
    (outer * (PARAMETRIC_STEPS + 1) + inner) as usize
}

pub fn add_sphere(m: &mut PolygonList, cx: f32, cy: f32, cz: f32, r: f32) {
    // outer: rotation of the semicircle, inner: position along it
    let points = generate_points(|rot, cir| [
        r * (PI * cir).cos() + cx,
        r * (PI * cir).sin() * (2.0 * PI * rot).cos() + cy,
        r * (PI * cir).sin() * (2.0 * PI * rot).sin() + cz,
    ]);
    let get = |longitude: i32, latitude: i32| points[grid_index(longitude, latitude)];

    for longitude in 0..PARAMETRIC_STEPS {
        let next = longitude + 1;

        for latitude in 1..PARAMETRIC_STEPS - 1 {
            let p1 = get(longitude, latitude);
            let p2 = get(longitude, latitude + 1);
            let p1_across = get(next, latitude);
            let p2_across = get(next, latitude + 1);

            add_polygon(m, p1, p2, p2_across);
            add_polygon(m, p1, p2_across, p1_across);
        }

        // one triangle at each pole
        add_polygon(m, get(longitude, 0), get(longitude, 1), get(next, 1));
        add_polygon(
            m,
            get(longitude, PARAMETRIC_STEPS),
            get(next, PARAMETRIC_STEPS - 1),
            get(longitude, PARAMETRIC_STEPS - 1),
        );
    }
}

pub fn add_torus(m: &mut PolygonList, cx: f32, cy: f32, cz: f32, r1: f32, r2: f32) {
    // r1 is the radius of the tube, r2 the distance from the center to the tube
    let points = generate_points(|rot, cir| [
        (2.0 * PI * rot).cos() * (r1 * (2.0 * PI * cir).cos() + r2) + cx,
        r1 * (2.0 * PI * cir).sin() + cy,
        -(2.0 * PI * rot).sin() * (r1 * (2.0 * PI * cir).cos() + r2) + cz,
    ]);
    let get = |around: i32, on: i32| points[grid_index(around, on)];

    for around in 0..PARAMETRIC_STEPS {
        let next = around + 1;

        for on in 0..PARAMETRIC_STEPS {
            let p1 = get(around, on);
            let p2 = get(around, on + 1);
            let p1_across = get(next, on);
            let p2_across = get(next, on + 1);

            add_polygon(m, p1, p2_across, p2);
            add_polygon(m, p1, p1_across, p2_across);
        }
    }
}
