use super::parser::Command;
use std::{
    collections::{BTreeMap, BTreeSet, HashMap},
    fs::{self, File},
    path::{Path, PathBuf},
};
use image::{Frame, Delay, codecs::gif::{GifEncoder, Repeat}};
use log::{info, warn};
use crate::{
    constants::{BEZIER, DEFAULT_BASENAME, EASING_NEWTON_ITERATIONS, FRAME_IMAGE_EXTENSION},
    error::{EngineError, EngineResult},
    matrix::multiply,
    render::Canvas,
};

/// Knob name -> value for a single frame.
pub type KnobValues = BTreeMap<String, f32>;

struct CubicBezierEasing {
    cx: [f32; 4],
    cy: [f32; 4],
}

impl CubicBezierEasing {
    fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        let mut g = [
            [0.0, x1, x2, 1.0],
            [0.0, y1, y2, 1.0],
        ];

        multiply(&BEZIER, &mut g);

        Self {
            cx: g[0],
            cy: g[1],
        }
    }

    fn plug(c: &[f32; 4], t: f32) -> f32 {
        ((c[0] * t + c[1]) * t + c[2]) * t + c[3]
    }

    fn eval(&self, x: f32) -> f32 {
        // find t such that bezier_x(t) = x with newton's method, then return bezier_y(t)
        let mut t = x.clamp(0.0, 1.0);

        for _ in 0..EASING_NEWTON_ITERATIONS {
            let x_t = Self::plug(&self.cx, t);
            let dx = (3.0 * self.cx[0] * t + 2.0 * self.cx[1]) * t + self.cx[2];

            if dx.abs() < f32::EPSILON {
                break;
            }

            t = (t - (x_t - x) / dx).clamp(0.0, 1.0);
        }

        Self::plug(&self.cy, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Easing {
    InCubic,
    OutCubic,
    InExpo,
    OutExpo,
}

impl Easing {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "easeInCubic" => Some(Self::InCubic),
            "easeOutCubic" => Some(Self::OutCubic),
            "easeInExpo" => Some(Self::InExpo),
            "easeOutExpo" => Some(Self::OutExpo),
            _ => None,
        }
    }

    fn curve(self) -> CubicBezierEasing {
        match self {
            Self::InCubic => CubicBezierEasing::new(0.33, 0.0, 0.68, 1.0),
            Self::OutCubic => CubicBezierEasing::new(0.33, 1.0, 0.68, 1.0),
            Self::InExpo => CubicBezierEasing::new(0.7, 0.0, 0.84, 0.0),
            Self::OutExpo => CubicBezierEasing::new(0.16, 1.0, 0.3, 1.0),
        }
    }

    /// Maps progress in [0, 1] to eased progress. The endpoints map to themselves.
    pub fn apply(self, progress: f32) -> f32 {
        if progress <= 0.0 {
            0.0
        } else if progress >= 1.0 {
            1.0
        } else {
            self.curve().eval(progress)
        }
    }
}

/// Frame count and output naming derived from the command stream.
#[derive(Clone, Debug, PartialEq)]
pub struct FramePolicy {
    pub basename: String,
    pub num_frames: usize,
    pub basename_defaulted: bool,
}

impl FramePolicy {
    pub fn is_animated(&self) -> bool {
        self.num_frames > 1
    }

    pub fn frame_path(&self, directory: &str, frame: usize) -> String {
        format!("{}/{}{:03}.{}", directory, self.basename, frame, FRAME_IMAGE_EXTENSION)
    }
}

pub fn first_pass(commands: &[Command]) -> EngineResult<FramePolicy> {
    let mut frames: Option<i64> = None;
    let mut basename: Option<String> = None;

    let mut contains_vary = false;
    let mut contains_tween = false;

    for command in commands {
        match command {
            Command::SetBaseName { name } => { basename = Some(name.clone()); }
            Command::SetFrames { num_frames } => { frames = Some(*num_frames); }
            Command::VaryKnob { .. } => { contains_vary = true; }
            Command::Tween { .. } => { contains_tween = true; }
            _ => {}
        }
    }

    let Some(frames) = frames else {
        if contains_vary || contains_tween {
            return Err(EngineError::configuration("Animation was detected but the number of frames wasn't set."));
        }

        return Ok(FramePolicy {
            basename: basename.unwrap_or_else(|| DEFAULT_BASENAME.to_string()),
            num_frames: 1,
            basename_defaulted: false,
        });
    };

    let num_frames = frames.max(1) as usize;

    match basename {
        Some(basename) => Ok(FramePolicy { basename, num_frames, basename_defaulted: false }),
        None => {
            warn!("Number of frames was set but basename wasn't. '{}' was chosen by default.", DEFAULT_BASENAME);
            Ok(FramePolicy { basename: DEFAULT_BASENAME.to_string(), num_frames, basename_defaulted: true })
        }
    }
}

fn check_range(name: &str, start_frame: i64, end_frame: i64, num_frames: usize) -> EngineResult<()> {
    if start_frame < 0 || end_frame >= num_frames as i64 || end_frame <= start_frame {
        return Err(EngineError::FrameRange {
            name: name.to_string(),
            start_frame,
            end_frame,
            num_frames,
        });
    }

    Ok(())
}

// writes start_val..=end_val over start_frame..=end_frame, both ends exact
fn interpolate(
    frame_knobs: &mut [KnobValues],
    knob: &str,
    (start_frame, end_frame): (i64, i64),
    (start_val, end_val): (f32, f32),
    easing: Option<Easing>,
) {
    let span = (end_frame - start_frame) as f32;
    let delta = (end_val - start_val) / span;

    for frame in start_frame..=end_frame {
        let offset = (frame - start_frame) as f32;
        let value = match easing {
            Some(easing) => start_val + (end_val - start_val) * easing.apply(offset / span),
            None => start_val + delta * offset,
        };

        frame_knobs[frame as usize].insert(knob.to_string(), value);
    }
}

/// Per-frame knob values. `declared_knobs` seeds the running values that
/// `set`/`setknobs` edit and `save_knobs` snapshots.
pub fn second_pass(commands: &[Command], num_frames: usize, declared_knobs: &KnobValues) -> EngineResult<Vec<KnobValues>> {
    let mut frame_knobs: Vec<KnobValues> = vec![KnobValues::new(); num_frames];
    // knob values as `set`/`setknobs` leave them at this point in the script
    let mut current_knobs = declared_knobs.clone();
    let mut saved_knobs: HashMap<String, KnobValues> = HashMap::new();

    for command in commands {
        match command {
            Command::VaryKnob { knob, start_frame, end_frame, start_val, end_val, easing } => {
                check_range(knob, *start_frame, *end_frame, num_frames)?;
                interpolate(&mut frame_knobs, knob, (*start_frame, *end_frame), (*start_val, *end_val), *easing);
            }

            Command::SetKnob { name, value } => {
                current_knobs.insert(name.clone(), *value);
            }

            Command::SetAllKnobs { value } => {
                current_knobs.values_mut().for_each(|knob| *knob = *value);
            }

            Command::SaveKnobList { name } => {
                saved_knobs.insert(name.clone(), current_knobs.clone());
            }

            Command::Tween { start_frame, end_frame, knoblist0, knoblist1, easing } => {
                check_range(&format!("{} -> {}", knoblist0, knoblist1), *start_frame, *end_frame, num_frames)?;

                let knobs0 = saved_knobs.get(knoblist0)
                    .ok_or_else(|| EngineError::configuration(format!("Knoblist '{}' not found", knoblist0)))?;
                let knobs1 = saved_knobs.get(knoblist1)
                    .ok_or_else(|| EngineError::configuration(format!("Knoblist '{}' not found", knoblist1)))?;

                let all_knobs: BTreeSet<&String> = knobs0.keys().chain(knobs1.keys()).collect();

                for knob in all_knobs {
                    let start_val = knobs0.get(knob).copied().unwrap_or(0.0);
                    let end_val = knobs1.get(knob).copied().unwrap_or(0.0);
                    interpolate(&mut frame_knobs, knob, (*start_frame, *end_frame), (start_val, end_val), *easing);
                }
            }

            _ => {}
        }
    }

    Ok(frame_knobs)
}

/// Receives finished frames of an animated run and turns them into one artifact.
pub trait FrameSink {
    fn save_frame(&mut self, canvas: &dyn Canvas, path: &str) -> EngineResult<()>;

    fn assemble(&mut self, basename: &str) -> EngineResult<()>;
}

/// Saves every frame as an image, then stitches the saved images into `<basename>.gif`.
pub struct GifAssembler {
    frames: Vec<PathBuf>,
    delay: u32,
    output_directory: PathBuf,
}

impl GifAssembler {
    pub fn new(delay: u32) -> Self {
        Self::with_output_directory(delay, PathBuf::from("."))
    }

    pub fn with_output_directory(delay: u32, output_directory: PathBuf) -> Self {
        Self {
            frames: Vec::new(),
            delay,
            output_directory,
        }
    }
}

impl FrameSink for GifAssembler {
    fn save_frame(&mut self, canvas: &dyn Canvas, path: &str) -> EngineResult<()> {
        if let Some(directory) = Path::new(path).parent() && !directory.as_os_str().is_empty() {
            fs::create_dir_all(directory)?;
        }

        canvas.save_as_file(path)?;
        self.frames.push(PathBuf::from(path));

        Ok(())
    }

    fn assemble(&mut self, basename: &str) -> EngineResult<()> {
        let filename = self.output_directory.join(format!("{}.gif", basename));
        let file = File::create(&filename)?;
        let mut encoder = GifEncoder::new(file);
        encoder.set_repeat(Repeat::Infinite)?;

        for path in self.frames.drain(..) {
            let rgba = image::open(&path)?.to_rgba8();
            let frame = Frame::from_parts(rgba, 0, 0, Delay::from_numer_denom_ms(self.delay, 1));
            encoder.encode_frame(frame)?;
        }

        info!("{} created.", filename.display());

        Ok(())
    }
}
