type EdgeList = Vec<[f32; 4]>;

use crate::matrix::add_point;
use super::Picture;

pub fn add_edge(m: &mut EdgeList, x0: f32, y0: f32, z0: f32, x1: f32, y1: f32, z1: f32) {
    add_point(m, x0, y0, z0, 1.0);
    add_point(m, x1, y1, z1, 1.0);
}

pub fn render_edges(m: &[[f32; 4]], picture: &mut Picture, color: &(usize, usize, usize)) {
    for edge in m.chunks_exact(2) {
        picture.draw_segment(&edge[0], &edge[1], color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{BLACK, WHITE};

    #[test]
    fn edges_are_point_pairs() {
        let mut edges = vec![];
        add_edge(&mut edges, 0.0, 0.0, 0.0, 4.0, 4.0, 4.0);
        assert_eq!(edges, vec![[0.0, 0.0, 0.0, 1.0], [4.0, 4.0, 4.0, 1.0]]);
    }

    #[test]
    fn renders_both_endpoints() {
        let mut picture = Picture::new(8, 8, 255, &WHITE);
        let mut edges = vec![];
        add_edge(&mut edges, 1.0, 1.0, 0.0, 6.0, 3.0, 0.0);

        render_edges(&edges, &mut picture, &BLACK);

        assert_eq!(picture.get_pixel(1, 1), Some((0, 0, 0)));
        assert_eq!(picture.get_pixel(6, 3), Some((0, 0, 0)));
        assert_eq!(picture.get_pixel(1, 6), Some((255, 255, 255)));
    }

    #[test]
    fn extreme_coordinates_do_not_overflow() {
        let mut picture = Picture::new(8, 8, 255, &WHITE);
        let edges = vec![[-1e30, 0.0, 0.0, 1.0], [1e30, 0.0, 0.0, 1.0], [0.0, -1e30, 0.0, 1.0], [0.0, 1e30, 0.0, 1.0]];

        render_edges(&edges, &mut picture, &BLACK);

        assert_eq!(picture.get_pixel(7, 0), Some((0, 0, 0)));
        assert_eq!(picture.get_pixel(0, 7), Some((0, 0, 0)));
    }
}
