mod lexer;
mod tokens;
mod parser;
mod symbols;
mod run_script;
mod animation;
mod coordinate_stack;

use std::{
    collections::HashMap,
    sync::LazyLock,
};

use log::info;

use crate::{
    config::RenderConfig,
    constants::{DEFAULT_BACKGROUND_COLOR, MAX_COLOR},
    error::EngineResult,
    picture::Picture,
};
use animation::GifAssembler;
use parser::{Parser, Script};
use run_script::evaluate_script;
use tokens::{TokenType, Function};

pub(crate) static KEYWORDS: LazyLock<HashMap<&str, TokenType>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    map.insert("display", TokenType::Command(Function::Display));
    map.insert("save", TokenType::Command(Function::Save));

    map.insert("push", TokenType::Command(Function::Push));
    map.insert("pop", TokenType::Command(Function::Pop));

    map.insert("move", TokenType::Command(Function::Move));
    map.insert("scale", TokenType::Command(Function::Scale));
    map.insert("rotate", TokenType::Command(Function::Rotate));
    map.insert("x", TokenType::AxisOfRotation);
    map.insert("y", TokenType::AxisOfRotation);
    map.insert("z", TokenType::AxisOfRotation);

    map.insert("line", TokenType::Command(Function::Line));

    map.insert("box", TokenType::Command(Function::Box));
    map.insert("sphere", TokenType::Command(Function::Sphere));
    map.insert("torus", TokenType::Command(Function::Torus));

    map.insert("light", TokenType::Command(Function::AddLight));
    map.insert("ambient", TokenType::Command(Function::SetAmbient));
    map.insert("constants", TokenType::Command(Function::DefineConstants));

    map.insert("basename", TokenType::Command(Function::SetBaseName));
    map.insert("set", TokenType::Command(Function::SetKnob));
    map.insert("save_knobs", TokenType::Command(Function::SaveKnobList));
    map.insert("tween", TokenType::Command(Function::Tween));
    map.insert("frames", TokenType::Command(Function::SetFrames));
    map.insert("vary", TokenType::Command(Function::VaryKnob));
    map.insert("setknobs", TokenType::Command(Function::SetAllKnobs));

    map.insert("easeInCubic", TokenType::EasingFunction);
    map.insert("easeOutCubic", TokenType::EasingFunction);
    map.insert("easeInExpo", TokenType::EasingFunction);
    map.insert("easeOutExpo", TokenType::EasingFunction);

    map
});

pub fn run_script(path: &str, config: &RenderConfig) -> EngineResult<()> {
    let tokens = lexer::tokenize(path, &KEYWORDS)?;
    let script = Parser::new().generate_script(tokens)?;

    let mut picture = Picture::new(config.dimensions.0, config.dimensions.1, MAX_COLOR, &DEFAULT_BACKGROUND_COLOR);
    let mut sink = GifAssembler::new(config.animation_delay_ms);

    let policy = evaluate_script(&script, &mut picture, &mut sink, config)?;
    if policy.is_animated() {
        let origin = if policy.basename_defaulted { "default" } else { "script" };
        info!("Finished '{}' ({} frames, {} basename '{}').", path, policy.num_frames, origin, policy.basename);
    } else {
        info!("Finished '{}' (1 frame).", path);
    }

    Ok(())
}

/// Lexes and parses MDL source that isn't backed by a file.
#[cfg(test)]
pub(crate) fn parse_source(source: &str) -> EngineResult<Script> {
    let tokens = lexer::tokenize_source(source, "<inline>", &KEYWORDS)?;
    Parser::new().generate_script(tokens)
}
