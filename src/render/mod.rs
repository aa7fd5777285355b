pub mod lighting;
pub mod scan_line;
pub mod edge_list;
pub mod polygon_list;

pub use crate::picture::Picture;
pub use lighting::{LightingConfig, PointLight, ReflectionConstants, get_illumination};

use crate::error::EngineResult;

/// Rendering surface the interpreter draws into for one frame.
///
/// `Picture` is the real implementation; anything else (tests, previews)
/// only has to honor the same calls.
pub trait Canvas {
    /// Resets the pixels and the depth buffer for a new frame.
    fn clear(&mut self);

    /// Rasterizes world-space triangles (three points per polygon).
    fn draw_polygons(&mut self, polygons: &[[f32; 4]], lighting: &LightingConfig, constants: &ReflectionConstants);

    /// Rasterizes world-space segments (two points per edge) in a single color.
    fn draw_lines(&mut self, edges: &[[f32; 4]], color: &(usize, usize, usize));

    fn display(&self) -> EngineResult<()>;

    fn save_as_file(&self, path: &str) -> EngineResult<()>;
}
