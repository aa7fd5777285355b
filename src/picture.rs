use image::ExtendedColorType;
use log::debug;
use show_image::{ImageInfo, ImageView, create_window};

use crate::{
    constants::ENABLE_Z_BUFFER,
    error::{EngineError, EngineResult},
    render::{Canvas, LightingConfig, ReflectionConstants, edge_list::render_edges, polygon_list::render_polygons},
};

const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

/// RGB pixel buffer with a depth buffer. The origin is the bottom left corner.
pub struct Picture {
    pub xres: usize,
    pub yres: usize,
    pub max_color: usize,
    pub data: Vec<u8>,
    z_buffer: Vec<f32>,
    background: (usize, usize, usize),
}

impl Picture {
    pub fn new(xres: usize, yres: usize, max_color: usize, background: &(usize, usize, usize)) -> Self {
        let mut picture = Self {
            xres,
            yres,
            max_color,
            data: vec![0; xres * yres * 3],
            z_buffer: vec![f32::NEG_INFINITY; xres * yres],
            background: *background,
        };
        picture.clear();
        picture
    }

    pub fn clear(&mut self) {
        let background = self.channel_bytes(&self.background);
        for pixel in self.data.chunks_exact_mut(3) {
            pixel.copy_from_slice(&background);
        }
        self.z_buffer.fill(f32::NEG_INFINITY);
    }

    fn channel_bytes(&self, color: &(usize, usize, usize)) -> [u8; 3] {
        let max = self.max_color.min(255);
        [color.0.min(max) as u8, color.1.min(max) as u8, color.2.min(max) as u8]
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.xres || y as usize >= self.yres {
            return None;
        }

        // flip so y grows upwards
        let row = self.yres - 1 - y as usize;
        Some(row * self.xres + x as usize)
    }

    pub fn plot(&mut self, x: isize, y: isize, z: f32, color: &(usize, usize, usize)) {
        let Some(index) = self.index(x, y) else { return };

        if ENABLE_Z_BUFFER && z < self.z_buffer[index] {
            return;
        }

        self.z_buffer[index] = z;
        let bytes = self.channel_bytes(color);
        self.data[index * 3..index * 3 + 3].copy_from_slice(&bytes);
    }

    #[cfg(test)]
    pub fn get_pixel(&self, x: isize, y: isize) -> Option<(u8, u8, u8)> {
        self.index(x, y).map(|index| (self.data[index * 3], self.data[index * 3 + 1], self.data[index * 3 + 2]))
    }

    /// Draws a world-space segment, clipped to the picture first.
    pub fn draw_segment(&mut self, p0: &[f32; 4], p1: &[f32; 4], color: &(usize, usize, usize)) {
        let Some((p0, p1)) = self.clip_segment(p0, p1) else { return };

        self.draw_line(p0[0] as isize, p0[1] as isize, p0[2] as f32, p1[0] as isize, p1[1] as isize, p1[2] as f32, color);
    }

    fn outcode(&self, point: &[f64; 3]) -> u8 {
        let mut code = 0;
        if point[0] < 0.0 { code |= LEFT; }
        if point[0] > self.xres as f64 - 1.0 { code |= RIGHT; }
        if point[1] < 0.0 { code |= BOTTOM; }
        if point[1] > self.yres as f64 - 1.0 { code |= TOP; }
        code
    }

    // cohen-sutherland against [0, xres - 1] x [0, yres - 1]; clipped ends land exactly on the border
    fn clip_segment(&self, p0: &[f32; 4], p1: &[f32; 4]) -> Option<([f64; 3], [f64; 3])> {
        if p0[..3].iter().chain(&p1[..3]).any(|value| !value.is_finite()) {
            return None;
        }

        let mut a = [p0[0] as f64, p0[1] as f64, p0[2] as f64];
        let mut b = [p1[0] as f64, p1[1] as f64, p1[2] as f64];
        let (max_x, max_y) = (self.xres as f64 - 1.0, self.yres as f64 - 1.0);

        // each pass moves one end onto a border, so both ends settle within four passes each
        for _ in 0..8 {
            let (code_a, code_b) = (self.outcode(&a), self.outcode(&b));
            if code_a | code_b == 0 {
                return Some((a, b));
            }
            if code_a & code_b != 0 {
                return None;
            }

            let (outside, inside, code) = if code_a != 0 { (&mut a, b, code_a) } else { (&mut b, a, code_b) };
            let (axis, border) = if code & LEFT != 0 {
                (0, 0.0)
            } else if code & RIGHT != 0 {
                (0, max_x)
            } else if code & BOTTOM != 0 {
                (1, 0.0)
            } else {
                (1, max_y)
            };

            let t = (border - outside[axis]) / (inside[axis] - outside[axis]);
            for coordinate in 0..3 {
                outside[coordinate] += (inside[coordinate] - outside[coordinate]) * t;
            }
            outside[axis] = border;
        }

        None
    }

    // bresenham in every octant, depth interpolated across the major axis
    pub fn draw_line(&mut self, x0: isize, y0: isize, z0: f32, x1: isize, y1: isize, z1: f32, color: &(usize, usize, usize)) {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let step_x = if x0 < x1 { 1 } else { -1 };
        let step_y = if y0 < y1 { 1 } else { -1 };
        let step_z = (z1 - z0) / dx.max(-dy).max(1) as f32;

        let (mut x, mut y, mut z) = (x0, y0, z0);
        let mut error = dx + dy;

        loop {
            self.plot(x, y, z, color);

            if x == x1 && y == y1 { break; }

            let doubled = 2 * error;
            if doubled >= dy {
                error += dy;
                x += step_x;
            }
            if doubled <= dx {
                error += dx;
                y += step_y;
            }
            z += step_z;
        }
    }

    pub fn save_as_file(&self, path: &str) -> EngineResult<()> {
        image::save_buffer(path, &self.data, self.xres as u32, self.yres as u32, ExtendedColorType::Rgb8)?;
        debug!("{} saved.", path);
        Ok(())
    }

    pub fn display(&self) -> EngineResult<()> {
        let image = ImageView::new(ImageInfo::rgb8(self.xres as u32, self.yres as u32), &self.data);
        let window = create_window("mdl-engine", Default::default()).map_err(EngineError::display)?;
        window.set_image("picture", image).map_err(EngineError::display)?;
        window.wait_until_destroyed().map_err(EngineError::display)?;
        Ok(())
    }
}

impl Canvas for Picture {
    fn clear(&mut self) {
        Picture::clear(self);
    }

    fn draw_polygons(&mut self, polygons: &[[f32; 4]], lighting: &LightingConfig, constants: &ReflectionConstants) {
        render_polygons(polygons, self, lighting, constants);
    }

    fn draw_lines(&mut self, edges: &[[f32; 4]], color: &(usize, usize, usize)) {
        render_edges(edges, self, color);
    }

    fn display(&self) -> EngineResult<()> {
        Picture::display(self)
    }

    fn save_as_file(&self, path: &str) -> EngineResult<()> {
        Picture::save_as_file(self, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{DEFAULT_LINE_COLOR, WHITE};

    #[test]
    fn new_picture_is_background() {
        let picture = Picture::new(4, 4, 255, &WHITE);
        assert!(picture.data.iter().all(|&byte| byte == 255));
    }

    #[test]
    fn plot_flips_the_y_axis() {
        let mut picture = Picture::new(4, 4, 255, &WHITE);
        picture.plot(0, 0, 0.0, &DEFAULT_LINE_COLOR);
        // bottom left pixel lives in the last row of the buffer
        assert_eq!(&picture.data[12 * 3..12 * 3 + 3], &[0, 0, 0]);
        assert_eq!(picture.get_pixel(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn out_of_bounds_plots_are_dropped() {
        let mut picture = Picture::new(4, 4, 255, &WHITE);
        picture.plot(-1, 2, 0.0, &DEFAULT_LINE_COLOR);
        picture.plot(2, 4, 0.0, &DEFAULT_LINE_COLOR);
        assert!(picture.data.iter().all(|&byte| byte == 255));
    }

    #[test]
    fn clear_resets_pixels_and_depth() {
        let mut picture = Picture::new(4, 4, 255, &WHITE);
        picture.plot(1, 1, 100.0, &(10, 20, 30));
        picture.clear();
        picture.plot(1, 1, -100.0, &(1, 2, 3));
        assert_eq!(picture.get_pixel(1, 1), Some((1, 2, 3)));
    }

    #[test]
    fn huge_segments_are_clipped_to_the_picture() {
        let mut picture = Picture::new(8, 8, 255, &WHITE);
        picture.draw_segment(&[-1e30, 0.0, 0.0, 1.0], &[1e30, 0.0, 0.0, 1.0], &DEFAULT_LINE_COLOR);

        assert!((0..8).all(|x| picture.get_pixel(x, 0) == Some((0, 0, 0))));
        assert_eq!(picture.get_pixel(0, 1), Some((255, 255, 255)));
    }

    #[test]
    fn off_screen_and_non_finite_segments_draw_nothing() {
        let mut picture = Picture::new(8, 8, 255, &WHITE);
        picture.draw_segment(&[-50.0, -50.0, 0.0, 1.0], &[-10.0, 100.0, 0.0, 1.0], &DEFAULT_LINE_COLOR);
        picture.draw_segment(&[0.0, 0.0, 0.0, 1.0], &[f32::INFINITY, 3.0, 0.0, 1.0], &DEFAULT_LINE_COLOR);
        picture.draw_segment(&[f32::NAN, 0.0, 0.0, 1.0], &[3.0, 3.0, 0.0, 1.0], &DEFAULT_LINE_COLOR);

        assert!(picture.data.iter().all(|&byte| byte == 255));
    }

    #[test]
    fn steep_lines_are_continuous() {
        let mut picture = Picture::new(10, 10, 255, &WHITE);
        picture.draw_line(2, 0, 0.0, 4, 9, 0.0, &DEFAULT_LINE_COLOR);
        for y in 0..10 {
            let row_has_pixel = (0..10).any(|x| picture.get_pixel(x, y) == Some((0, 0, 0)));
            assert!(row_has_pixel, "row {} is empty", y);
        }
    }
}
