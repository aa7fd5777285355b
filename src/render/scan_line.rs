use super::Picture;

/// Fills one triangle with a single color, interpolating depth along each scanline.
/// Only the rows and columns inside the picture are visited.
pub fn flat(picture: &mut Picture, polygon: &[[f32; 4]], color: &(usize, usize, usize)) {
    if polygon.iter().flat_map(|point| &point[..3]).any(|value| !value.is_finite()) {
        return;
    }

    // sort three points by their y values so we have a bottom top and middle
    let mut b = polygon[0];
    let mut m = polygon[1];
    let mut t = polygon[2];

    if b[1] > m[1] {
        std::mem::swap(&mut b, &mut m);
    }
    if m[1] > t[1] {
        std::mem::swap(&mut m, &mut t);
    }
    if b[1] > m[1] {
        std::mem::swap(&mut b, &mut m);
    }

    let y_start = b[1].trunc();
    let y_mid = m[1].trunc();
    let y_end = t[1].trunc();

    let distance0 = y_end - y_start + 1.0;
    let distance1 = y_mid - y_start + 1.0;
    let distance2 = y_end - y_mid + 1.0;

    // edge 0 runs bottom -> top, edge 1 runs bottom -> middle then middle -> top
    let first_row = y_start.max(0.0);
    let last_row = y_end.min(picture.yres as f32 - 1.0);
    if first_row > last_row {
        return;
    }

    for y in first_row as isize..=last_row as isize {
        let row = y as f32;

        let progress0 = (row - y_start) / distance0;
        let x0 = b[0] + (t[0] - b[0]) * progress0;
        let z0 = b[2] + (t[2] - b[2]) * progress0;

        let (x1, z1) = if row < y_mid {
            let progress1 = (row - y_start) / distance1;
            (b[0] + (m[0] - b[0]) * progress1, b[2] + (m[2] - b[2]) * progress1)
        } else {
            let progress2 = (row - y_mid) / distance2;
            (m[0] + (t[0] - m[0]) * progress2, m[2] + (t[2] - m[2]) * progress2)
        };

        draw_scanline(picture, (x0.trunc(), z0), (x1.trunc(), z1), y, color);
    }
}

fn draw_scanline(picture: &mut Picture, start: (f32, f32), end: (f32, f32), y: isize, color: &(usize, usize, usize)) {
    let ((x0, z0), (x1, z1)) = if start.0 <= end.0 { (start, end) } else { (end, start) };
    let step_z = (z1 - z0) / (x1 - x0 + 1.0);

    let first_column = x0.max(0.0);
    let last_column = x1.min(picture.xres as f32 - 1.0);
    if first_column > last_column {
        return;
    }

    for x in first_column as isize..=last_column as isize {
        picture.plot(x, y, z0 + step_z * (x as f32 - x0), color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BLACK, WHITE};

    #[test]
    fn fills_the_inside_of_a_triangle() {
        let mut picture = Picture::new(20, 20, 255, &WHITE);
        let triangle = [[2.0, 2.0, 0.0, 1.0], [17.0, 2.0, 0.0, 1.0], [2.0, 17.0, 0.0, 1.0]];

        flat(&mut picture, &triangle, &BLACK);

        assert_eq!(picture.get_pixel(5, 5), Some((0, 0, 0)));
        assert_eq!(picture.get_pixel(2, 2), Some((0, 0, 0)));
        assert_eq!(picture.get_pixel(16, 16), Some((255, 255, 255)));
    }

    #[test]
    fn huge_triangles_only_touch_the_picture() {
        let mut picture = Picture::new(6, 6, 255, &WHITE);
        let triangle = [[-1e30, -1e30, 0.0, 1.0], [1e30, -1e30, 0.0, 1.0], [0.0, 1e30, 0.0, 1.0]];

        flat(&mut picture, &triangle, &BLACK);

        assert_eq!(picture.get_pixel(0, 0), Some((0, 0, 0)));
        assert_eq!(picture.get_pixel(5, 5), Some((0, 0, 0)));
    }

    #[test]
    fn triangles_outside_the_picture_are_skipped() {
        let mut picture = Picture::new(6, 6, 255, &WHITE);
        flat(&mut picture, &[[0.0, 20.0, 0.0, 1.0], [5.0, 20.0, 0.0, 1.0], [0.0, 30.0, 0.0, 1.0]], &BLACK);
        flat(&mut picture, &[[0.0, 0.0, 0.0, 1.0], [f32::NAN, 3.0, 0.0, 1.0], [0.0, 5.0, 0.0, 1.0]], &BLACK);

        assert!(picture.data.iter().all(|&byte| byte == 255));
    }

    #[test]
    fn nearer_triangle_wins_the_depth_test() {
        let mut picture = Picture::new(10, 10, 255, &WHITE);
        let near = [[0.0, 0.0, 5.0, 1.0], [9.0, 0.0, 5.0, 1.0], [0.0, 9.0, 5.0, 1.0]];
        let far = [[0.0, 0.0, -5.0, 1.0], [9.0, 0.0, -5.0, 1.0], [0.0, 9.0, -5.0, 1.0]];

        flat(&mut picture, &near, &(255, 0, 0));
        flat(&mut picture, &far, &(0, 0, 255));

        assert_eq!(picture.get_pixel(1, 1), Some((255, 0, 0)));
    }
}
