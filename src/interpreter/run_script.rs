use log::{info, trace, warn};

use crate::{
    config::RenderConfig,
    constants::DEFAULT_LINE_COLOR,
    error::EngineResult,
    matrix,
    render::{
        Canvas,
        LightingConfig,
        edge_list::add_edge,
        polygon_list::{add_box, add_sphere, add_torus},
    },
};
use super::{
    animation::{self, FramePolicy, FrameSink, KnobValues},
    coordinate_stack::CoordinateStack,
    parser::{Command, Script},
    symbols::SymbolTable,
};

type Matrix = Vec<[f32; 4]>;

/// State of one frame's replay. Built fresh for every frame.
struct ScriptContext<'a, C: Canvas> {
    canvas: &'a mut C,
    // values `vary`/`tween` resolved for this frame
    frame_knobs: &'a KnobValues,
    coordinate_stack: CoordinateStack,
    symbols: SymbolTable,
    lighting_config: LightingConfig,
}

impl<'a, C: Canvas> ScriptContext<'a, C> {
    fn new(canvas: &'a mut C, symbols: SymbolTable, frame_knobs: &'a KnobValues) -> Self {
        let lighting_config = symbols.lighting_config();

        Self {
            canvas,
            frame_knobs,
            coordinate_stack: CoordinateStack::new(),
            symbols,
            lighting_config,
        }
    }

    fn render_edges(&mut self, mut edges: Matrix) {
        matrix::multiply(self.coordinate_stack.peek(), &mut edges);
        self.canvas.draw_lines(&edges, &DEFAULT_LINE_COLOR);
    }

    fn render_polygons(&mut self, mut polygons: Matrix, constants: &Option<String>, coord_system: &Option<String>) -> EngineResult<()> {
        let reflection_constants = self.symbols.reflection_constants(constants.as_deref())?;

        if let Some(name) = coord_system {
            trace!("Coordinate system '{}' requested; using the current stack top.", name);
        }

        matrix::multiply(self.coordinate_stack.peek(), &mut polygons);
        self.canvas.draw_polygons(&polygons, &self.lighting_config, &reflection_constants);

        Ok(())
    }

    // `set` and `setknobs` never override a knob this frame animates
    fn set_knob(&mut self, name: &str, value: f32) {
        if !self.frame_knobs.contains_key(name) {
            self.symbols.set_knob(name.to_string(), value);
        }
    }

    fn set_all_knobs(&mut self, value: f32) {
        self.symbols.set_all_knobs(value);
        self.symbols.apply_knobs(self.frame_knobs);
    }

    fn get_knob_value(&self, knob_name: &Option<String>) -> EngineResult<f32> {
        match knob_name {
            Some(name) => self.symbols.knob(name),
            // if no knob is provided use 1.0 as a default value
            None => Ok(1.0),
        }
    }
}

/// Resolves the animation, then replays every command once per frame.
pub fn evaluate_script<C: Canvas, S: FrameSink>(
    script: &Script,
    canvas: &mut C,
    sink: &mut S,
    config: &RenderConfig,
) -> EngineResult<FramePolicy> {
    let policy = animation::first_pass(&script.commands)?;
    let frame_knob_list = animation::second_pass(&script.commands, policy.num_frames, &script.symbols.knob_values())?;

    for (frame, knobs) in frame_knob_list.iter().enumerate() {
        if policy.is_animated() {
            for (name, value) in knobs {
                info!("knob: {}\tvalue: {}", name, value);
            }
        }

        render_frame(&script.commands, &script.symbols, knobs, canvas)?;

        if policy.is_animated() {
            let path = policy.frame_path(&config.frame_directory, frame);
            info!("Saving frame: {}", path);
            sink.save_frame(&*canvas, &path)?;
        }
    }

    if policy.is_animated() {
        sink.assemble(&policy.basename)?;
    }

    Ok(policy)
}

fn render_frame<C: Canvas>(commands: &[Command], symbols: &SymbolTable, knobs: &KnobValues, canvas: &mut C) -> EngineResult<()> {
    canvas.clear();

    let mut frame_symbols = symbols.clone();
    frame_symbols.apply_knobs(knobs);

    let mut context = ScriptContext::new(canvas, frame_symbols, knobs);

    for command in commands {
        execute_command(command, &mut context)?;
    }

    if context.coordinate_stack.depth() > 1 {
        warn!("Frame ended with {} unmatched push(es).", context.coordinate_stack.depth() - 1);
    }

    Ok(())
}

fn execute_command<C: Canvas>(command: &Command, context: &mut ScriptContext<C>) -> EngineResult<()> {
    match command {
        Command::Display => {
            context.canvas.display()?;
        }

        Command::Save { file_path } => {
            context.canvas.save_as_file(file_path)?;
        }

        Command::Push => {
            context.coordinate_stack.push();
        }

        Command::Pop => {
            context.coordinate_stack.pop()?;
        }

        Command::Move { a, b, c, knob } => {
            let multiplier = context.get_knob_value(knob)?;
            context.coordinate_stack.apply_transformation(matrix::translation(a * multiplier, b * multiplier, c * multiplier));
        }

        Command::Scale { a, b, c, knob } => {
            let multiplier = context.get_knob_value(knob)?;
            context.coordinate_stack.apply_transformation(matrix::dilation(a * multiplier, b * multiplier, c * multiplier));
        }

        Command::Rotate { axis, degrees, knob } => {
            let multiplier = context.get_knob_value(knob)?;
            context.coordinate_stack.apply_transformation(matrix::rotation(*axis, degrees * multiplier));
        }

        Command::Line { x0, y0, z0, x1, y1, z1, .. } => {
            let mut edges = matrix::new();
            add_edge(&mut edges, *x0, *y0, *z0, *x1, *y1, *z1);
            context.render_edges(edges);
        }

        Command::Box { constants, x, y, z, w, h, d, coord_system } => {
            let mut polygons = matrix::new();
            add_box(&mut polygons, *x, *y, *z, *w, *h, *d);
            context.render_polygons(polygons, constants, coord_system)?;
        }

        Command::Sphere { constants, x, y, z, r, coord_system } => {
            let mut polygons = matrix::new();
            add_sphere(&mut polygons, *x, *y, *z, *r);
            context.render_polygons(polygons, constants, coord_system)?;
        }

        Command::Torus { constants, x, y, z, r0, r1, coord_system } => {
            let mut polygons = matrix::new();
            add_torus(&mut polygons, *x, *y, *z, *r0, *r1);
            context.render_polygons(polygons, constants, coord_system)?;
        }

        Command::SetKnob { name, value } => {
            context.set_knob(name, *value);
        }

        Command::SetAllKnobs { value } => {
            context.set_all_knobs(*value);
        }

        // consumed by the animation passes
        Command::SetBaseName { .. }
        | Command::SetFrames { .. }
        | Command::VaryKnob { .. }
        | Command::SaveKnobList { .. }
        | Command::Tween { .. } => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use crate::{
        error::EngineError,
        interpreter::parse_source,
        render::ReflectionConstants,
    };

    #[derive(Default)]
    struct RecordingCanvas {
        clears: usize,
        polygon_batches: Vec<Vec<[f32; 4]>>,
        constants: Vec<ReflectionConstants>,
        line_batches: Vec<Vec<[f32; 4]>>,
        displays: Cell<usize>,
        saves: std::cell::RefCell<Vec<String>>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self) {
            self.clears += 1;
        }

        fn draw_polygons(&mut self, polygons: &[[f32; 4]], _lighting: &LightingConfig, constants: &ReflectionConstants) {
            self.polygon_batches.push(polygons.to_vec());
            self.constants.push(*constants);
        }

        fn draw_lines(&mut self, edges: &[[f32; 4]], _color: &(usize, usize, usize)) {
            self.line_batches.push(edges.to_vec());
        }

        fn display(&self) -> EngineResult<()> {
            self.displays.set(self.displays.get() + 1);
            Ok(())
        }

        fn save_as_file(&self, path: &str) -> EngineResult<()> {
            self.saves.borrow_mut().push(path.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        frames: Vec<String>,
        assembled: Vec<String>,
    }

    impl FrameSink for RecordingSink {
        fn save_frame(&mut self, _canvas: &dyn Canvas, path: &str) -> EngineResult<()> {
            self.frames.push(path.to_string());
            Ok(())
        }

        fn assemble(&mut self, basename: &str) -> EngineResult<()> {
            self.assembled.push(basename.to_string());
            Ok(())
        }
    }

    fn run(source: &str) -> (EngineResult<FramePolicy>, RecordingCanvas, RecordingSink) {
        let script = parse_source(source).unwrap();
        let mut canvas = RecordingCanvas::default();
        let mut sink = RecordingSink::default();
        let result = evaluate_script(&script, &mut canvas, &mut sink, &RenderConfig::default());
        (result, canvas, sink)
    }

    #[test]
    fn single_frame_box_renders_once_without_the_sink() {
        let (result, canvas, sink) = run("box 0 0 0 10 10 10\ndisplay");

        assert_eq!(result.unwrap().num_frames, 1);
        assert_eq!(canvas.polygon_batches.len(), 1);
        assert_eq!(canvas.displays.get(), 1);
        assert!(sink.frames.is_empty());
        assert!(sink.assembled.is_empty());
    }

    #[test]
    fn three_frame_animation_saves_and_assembles() {
        let (result, canvas, sink) = run("frames 3\nbasename t\nvary knob 0 2 0.0 1.0\nmove 10 0 0 knob\nbox 0 0 0 1 1 1");

        assert_eq!(result.unwrap().num_frames, 3);
        assert_eq!(sink.frames, vec!["anim/t000.png", "anim/t001.png", "anim/t002.png"]);
        assert_eq!(sink.assembled, vec!["t"]);
        assert_eq!(canvas.clears, 3);
        assert_eq!(canvas.polygon_batches.len(), 3);
    }

    #[test]
    fn knob_values_scale_each_frame() {
        let (_, canvas, _) = run("frames 3\nbasename t\nvary knob 0 2 0.0 1.0\nmove 10 0 0 knob\nbox 0 0 0 1 1 1");

        // first vertex of the box is its origin corner
        let xs: Vec<f32> = canvas.polygon_batches.iter().map(|batch| batch[0][0]).collect();
        assert_eq!(xs, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn save_commands_go_to_the_canvas() {
        let (_, canvas, sink) = run("box 0 0 0 1 1 1\nsave out.png");
        assert_eq!(*canvas.saves.borrow(), vec!["out.png"]);
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn rotate_without_knob_matches_knob_of_one() {
        let (_, plain, _) = run("rotate x 90\nbox 0 0 0 10 10 10");
        let (_, knobbed, _) = run("set k 1\nrotate x 90 k\nbox 0 0 0 10 10 10");

        assert_eq!(plain.polygon_batches, knobbed.polygon_batches);
    }

    #[test]
    fn push_copies_the_moved_top() {
        let (_, canvas, _) = run("move 10 0 0\npush\nmove 0 5 0\nbox 0 0 0 1 1 1\npop\nbox 0 0 0 1 1 1");

        assert_eq!(canvas.polygon_batches[0][0], [10.0, 5.0, 0.0, 1.0]);
        assert_eq!(canvas.polygon_batches[1][0], [10.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn scale_multiplies_by_the_knob() {
        let (_, canvas, _) = run("set grow 0.5\nscale 4 2 2 grow\nline 1 1 1 3 3 3");

        assert_eq!(canvas.line_batches[0], vec![[2.0, 1.0, 1.0, 1.0], [6.0, 3.0, 3.0, 1.0]]);
    }

    #[test]
    fn named_constants_reach_the_rasterizer() {
        let (_, canvas, _) = run("constants red 1 1 0 0 0 0 0 0 0\nsphere red 0 0 0 10\ntorus 0 0 0 1 5");

        assert_eq!(canvas.constants[0].ambient, [1.0, 0.0, 0.0]);
        assert_eq!(canvas.constants[1], crate::constants::DEFAULT_REFLECTION_CONSTANTS);
    }

    #[test]
    fn unknown_constants_are_errors() {
        let (result, _, _) = run("box missing 0 0 0 1 1 1");
        assert!(matches!(result, Err(EngineError::UndefinedSymbol(_))));
    }

    #[test]
    fn popping_past_the_bottom_fails_fast() {
        let (result, canvas, _) = run("push\npop\npop\nbox 0 0 0 1 1 1");

        assert!(matches!(result, Err(EngineError::StackUnderflow)));
        assert!(canvas.polygon_batches.is_empty());
    }

    #[test]
    fn vary_without_frames_renders_nothing() {
        let (result, canvas, sink) = run("vary k 0 2 0 1\nbox 0 0 0 1 1 1");

        assert!(matches!(result, Err(EngineError::Configuration(_))));
        assert_eq!(canvas.clears, 0);
        assert!(sink.frames.is_empty());
    }

    #[test]
    fn bad_vary_range_renders_nothing() {
        let (result, canvas, sink) = run("frames 3\nvary k 1 3 0 1\nbox 0 0 0 1 1 1");

        assert!(matches!(result, Err(EngineError::FrameRange { .. })));
        assert_eq!(canvas.clears, 0);
        assert!(sink.assembled.is_empty());
    }

    #[test]
    fn knobs_outside_a_range_keep_their_default() {
        let (_, canvas, _) = run("frames 3\nset k 2\nvary k 0 1 0 1\nmove 1 0 0 k\nbox 0 0 0 1 1 1");

        let xs: Vec<f32> = canvas.polygon_batches.iter().map(|batch| batch[0][0]).collect();
        assert_eq!(xs, vec![0.0, 1.0, 2.0]);
    }

    fn box_xs(source: &str) -> Vec<f32> {
        let (result, canvas, _) = run(source);
        result.unwrap();
        canvas.polygon_batches.iter().map(|batch| batch[0][0]).collect()
    }

    #[test]
    fn unknown_statement_after_a_transform_is_ignored() {
        assert_eq!(box_xs("move 10 0 0\nclear\nbox 0 0 0 1 1 1"), vec![10.0]);
        assert_eq!(box_xs("move 10 0 0\nbox 0 0 0 1 1 1"), vec![10.0]);
    }

    #[test]
    fn set_applies_in_stream_order() {
        assert_eq!(box_xs("set k 1\nmove 10 0 0 k\nbox 0 0 0 1 1 1\nset k 3"), vec![10.0]);
        assert_eq!(box_xs("set k 1\nsetknobs 2\nmove 10 0 0 k\nbox 0 0 0 1 1 1\nsetknobs 5"), vec![20.0]);
    }

    #[test]
    fn set_does_not_override_a_varied_frame() {
        let xs = box_xs("frames 2\nvary k 0 1 0 1\nset k 7\nsetknobs 9\nmove 1 0 0 k\nbox 0 0 0 1 1 1");
        assert_eq!(xs, vec![0.0, 1.0]);
    }

    #[test]
    fn tween_reaches_knobs_only_referenced_by_transforms() {
        let xs = box_xs(
            "frames 3\nmove 1 0 0 b\nset a 0\nsave_knobs s0\nsetknobs 10\nsave_knobs s1\ntween 0 2 s0 s1\nbox 0 0 0 1 1 1",
        );
        assert_eq!(xs, vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn stack_resets_between_frames() {
        let (_, canvas, _) = run("frames 2\nmove 3 0 0\nbox 0 0 0 1 1 1");

        assert_eq!(canvas.polygon_batches[0][0], [3.0, 0.0, 0.0, 1.0]);
        assert_eq!(canvas.polygon_batches[1][0], [3.0, 0.0, 0.0, 1.0]);
    }
}
