//! 4x4 transforms and point lists.
//!
//! Matrices are stored column-major: `m[column][row]`. A point list is a
//! sequence of `[x, y, z, w]` columns, so `multiply(&t, &mut points)`
//! transforms every point in place.

/// Composite transform kept on the coordinate stack.
pub type Matrix = [[f32; 4]; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    X,
    Y,
    Z,
}

pub fn new() -> Vec<[f32; 4]> {
    Vec::new()
}

pub fn identity() -> Matrix {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn add_point(m: &mut Vec<[f32; 4]>, x: f32, y: f32, z: f32, w: f32) {
    m.push([x, y, z, w]);
}

/// Replaces every column of `b` with `a * column`.
pub fn multiply(a: &Matrix, b: &mut [[f32; 4]]) {
    for column in b.iter_mut() {
        let original = *column;
        for (row, value) in column.iter_mut().enumerate() {
            *value = (0..4).map(|k| a[k][row] * original[k]).sum();
        }
    }
}

/// `a * b`: `b` is applied to a point first.
pub fn compose(a: &Matrix, b: &Matrix) -> Matrix {
    let mut product = *b;
    multiply(a, &mut product);
    product
}

pub fn translation(x: f32, y: f32, z: f32) -> Matrix {
    [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [x, y, z, 1.0],
    ]
}

pub fn dilation(x: f32, y: f32, z: f32) -> Matrix {
    [
        [x, 0.0, 0.0, 0.0],
        [0.0, y, 0.0, 0.0],
        [0.0, 0.0, z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]
}

pub fn rotation(axis: Rotation, degrees: f32) -> Matrix {
    let (sin, cos) = degrees.to_radians().sin_cos();

    match axis {
        Rotation::X => [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, cos, sin, 0.0],
            [0.0, -sin, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Rotation::Y => [
            [cos, 0.0, -sin, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [sin, 0.0, cos, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
        Rotation::Z => [
            [cos, sin, 0.0, 0.0],
            [-sin, cos, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    }
}
