use std::collections::VecDeque;

use log::warn;

use crate::{
    error::{EngineError, EngineResult},
    matrix::Rotation,
    render::ReflectionConstants,
};
use super::{
    animation::Easing,
    symbols::SymbolTable,
    tokens::{Token, TokenType, Function},
};

// file paths + identifiers stored as String
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Display,
    Save { file_path: String },
    Push,
    Pop,
    Move { a: f32, b: f32, c: f32, knob: Option<String> },
    Scale { a: f32, b: f32, c: f32, knob: Option<String> },
    Rotate { axis: Rotation, degrees: f32, knob: Option<String> },
    Line { constants: Option<String>, x0: f32, y0: f32, z0: f32, coord_system0: Option<String>, x1: f32, y1: f32, z1: f32, coord_system1: Option<String> },
    Box { constants: Option<String>, x: f32, y: f32, z: f32, w: f32, h: f32, d: f32, coord_system: Option<String> },
    Sphere { constants: Option<String>, x: f32, y: f32, z: f32, r: f32, coord_system: Option<String> },
    Torus { constants: Option<String>, x: f32, y: f32, z: f32, r0: f32, r1: f32, coord_system: Option<String> },
    SetBaseName { name: String },
    SetFrames { num_frames: i64 },
    VaryKnob { knob: String, start_frame: i64, end_frame: i64, start_val: f32, end_val: f32, easing: Option<Easing> },
    SetKnob { name: String, value: f32 },
    SetAllKnobs { value: f32 },
    SaveKnobList { name: String },
    Tween { start_frame: i64, end_frame: i64, knoblist0: String, knoblist1: String, easing: Option<Easing> },
}

/// Output of the parser: the command stream plus everything it defined by name.
#[derive(Clone, Debug, Default)]
pub struct Script {
    pub commands: Vec<Command>,
    pub symbols: SymbolTable,
}

pub struct Parser {
    stack: VecDeque<Token>,
    symbols: SymbolTable,
    unnamed_lights: usize,
    // file:line of the command being parsed
    statement_line: String,
}

impl Parser {
    pub fn new() -> Self {
        Self { stack: VecDeque::new(), symbols: SymbolTable::new(), unnamed_lights: 0, statement_line: String::new() }
    }

    // optional arguments never reach past the end of their command's line
    fn pop_optional_type(&mut self, token_type: TokenType) -> Option<String> {
        if self.stack.front().is_some_and(|token| token.token_type == token_type && token.info == self.statement_line) {
            return self.stack.pop_front().map(|token| token.value);
        }

        None
    }

    fn pop(&mut self) -> EngineResult<Token> {
        self.stack
            .pop_front()
            .ok_or_else(|| EngineError::parse("Expected token but the script ended."))
    }

    fn number(&mut self) -> EngineResult<f32> {
        let token = self.pop()?;
        if token.token_type != TokenType::Number {
            return Err(EngineError::parse(format!("{} -> Expected a number but found '{}'", token.info, token.value)));
        }

        token.value
            .parse::<f32>()
            .map_err(|_| EngineError::parse(format!("{} -> Error parsing f32: {}", token.info, token.value)))
    }

    // frame numbers may be written as 3 or 3.0; the fraction is dropped
    fn integer(&mut self) -> EngineResult<i64> {
        Ok(self.number()?.trunc() as i64)
    }

    fn name(&mut self) -> EngineResult<String> {
        let token = self.pop()?;
        match token.token_type {
            TokenType::Identifier | TokenType::FilePath => Ok(token.value),
            _ => Err(EngineError::parse(format!("{} -> Expected a name but found '{}'", token.info, token.value))),
        }
    }

    fn optional_knob(&mut self) -> EngineResult<Option<String>> {
        self.pop_optional_type(TokenType::Identifier)
            .map(|knob| self.symbols.declare_knob(&knob).map(|_| knob))
            .transpose()
    }

    fn optional_easing(&mut self) -> EngineResult<Option<Easing>> {
        self.pop_optional_type(TokenType::EasingFunction)
            .map(|name| Easing::from_name(&name).ok_or_else(|| EngineError::parse(format!("Easing function {} not recognized.", name))))
            .transpose()
    }

    fn skip_statement(&mut self) {
        while self.stack.front().is_some_and(|token| !matches!(token.token_type, TokenType::Command(_))) {
            self.stack.pop_front();
        }
    }

    pub fn generate_script(mut self, tokens: VecDeque<Token>) -> EngineResult<Script> {
        let mut commands: Vec<Command> = vec![];

        self.stack = tokens;

        while !self.stack.is_empty() {
            let token = self.pop()?;

            let TokenType::Command(function) = token.token_type else {
                warn!("{} -> Ignoring unrecognized statement '{}'", token.info, token.value);
                self.skip_statement();
                continue;
            };

            self.statement_line = token.info;

            let command = match function {
                Function::Display => Some(Command::Display),
                Function::Save => Some(Command::Save { file_path: self.name()? }),
                Function::Push => Some(Command::Push),
                Function::Pop => Some(Command::Pop),
                Function::Move => Some(self.handle_move()?),
                Function::Scale => Some(self.handle_scale()?),
                Function::Rotate => Some(self.handle_rotate()?),
                Function::Line => Some(self.handle_line()?),
                Function::Box => Some(self.handle_box()?),
                Function::Sphere => Some(self.handle_sphere()?),
                Function::Torus => Some(self.handle_torus()?),
                Function::AddLight => { self.handle_add_light()?; None }
                Function::SetAmbient => { self.handle_set_ambient()?; None }
                Function::DefineConstants => { self.handle_define_constants()?; None }
                Function::SetBaseName => Some(Command::SetBaseName { name: self.name()? }),
                Function::SetKnob => Some(self.handle_set_knob()?),
                Function::SaveKnobList => Some(Command::SaveKnobList { name: self.name()? }),
                Function::Tween => Some(self.handle_tween()?),
                Function::SetFrames => Some(Command::SetFrames { num_frames: self.integer()? }),
                Function::VaryKnob => Some(self.handle_vary_knob()?),
                Function::SetAllKnobs => Some(self.handle_set_all_knobs()?),
            };

            commands.extend(command);
        }

        Ok(Script { commands, symbols: self.symbols })
    }

    fn handle_move(&mut self) -> EngineResult<Command> {
        let (a, b, c) = (self.number()?, self.number()?, self.number()?);
        let knob = self.optional_knob()?;

        Ok(Command::Move { a, b, c, knob })
    }

    fn handle_scale(&mut self) -> EngineResult<Command> {
        let (a, b, c) = (self.number()?, self.number()?, self.number()?);
        let knob = self.optional_knob()?;

        Ok(Command::Scale { a, b, c, knob })
    }

    fn handle_rotate(&mut self) -> EngineResult<Command> {
        let token = self.pop()?;
        let axis = match token.token_type {
            TokenType::AxisOfRotation | TokenType::Identifier => match token.value.to_lowercase().as_str() {
                "x" => Rotation::X,
                "y" => Rotation::Y,
                "z" => Rotation::Z,
                other => {
                    warn!("{} -> Unknown rotation axis '{}', rotating about z.", token.info, other);
                    Rotation::Z
                }
            },
            _ => return Err(EngineError::parse(format!("{} -> Invalid rotation axis: {}", token.info, token.value))),
        };
        let degrees = self.number()?;
        let knob = self.optional_knob()?;

        Ok(Command::Rotate { axis, degrees, knob })
    }

    fn handle_line(&mut self) -> EngineResult<Command> {
        let constants = self.pop_optional_type(TokenType::Identifier);
        let (x0, y0, z0) = (self.number()?, self.number()?, self.number()?);
        let coord_system0 = self.pop_optional_type(TokenType::Identifier);
        let (x1, y1, z1) = (self.number()?, self.number()?, self.number()?);
        let coord_system1 = self.pop_optional_type(TokenType::Identifier);

        Ok(Command::Line { constants, x0, y0, z0, coord_system0, x1, y1, z1, coord_system1 })
    }

    fn handle_box(&mut self) -> EngineResult<Command> {
        let constants = self.pop_optional_type(TokenType::Identifier);
        let (x, y, z) = (self.number()?, self.number()?, self.number()?);
        let (w, h, d) = (self.number()?, self.number()?, self.number()?);
        let coord_system = self.pop_optional_type(TokenType::Identifier);

        Ok(Command::Box { constants, x, y, z, w, h, d, coord_system })
    }

    fn handle_sphere(&mut self) -> EngineResult<Command> {
        let constants = self.pop_optional_type(TokenType::Identifier);
        let (x, y, z) = (self.number()?, self.number()?, self.number()?);
        let r = self.number()?;
        let coord_system = self.pop_optional_type(TokenType::Identifier);

        Ok(Command::Sphere { constants, x, y, z, r, coord_system })
    }

    fn handle_torus(&mut self) -> EngineResult<Command> {
        let constants = self.pop_optional_type(TokenType::Identifier);
        let (x, y, z) = (self.number()?, self.number()?, self.number()?);
        let (r0, r1) = (self.number()?, self.number()?);
        let coord_system = self.pop_optional_type(TokenType::Identifier);

        Ok(Command::Torus { constants, x, y, z, r0, r1, coord_system })
    }

    fn handle_add_light(&mut self) -> EngineResult<()> {
        let name = match self.pop_optional_type(TokenType::Identifier) {
            Some(name) => name,
            None => {
                self.unnamed_lights += 1;
                format!("light_{}", self.unnamed_lights)
            }
        };
        let color = [self.number()?, self.number()?, self.number()?];
        let position = [self.number()?, self.number()?, self.number()?];

        self.symbols.define_light(name, color, position);
        Ok(())
    }

    fn handle_set_ambient(&mut self) -> EngineResult<()> {
        let color = [self.number()?, self.number()?, self.number()?];

        self.symbols.set_ambient(color);
        Ok(())
    }

    fn handle_define_constants(&mut self) -> EngineResult<()> {
        let name = self.name()?;
        let (kar, kdr, ksr) = (self.number()?, self.number()?, self.number()?);
        let (kag, kdg, ksg) = (self.number()?, self.number()?, self.number()?);
        let (kab, kdb, ksb) = (self.number()?, self.number()?, self.number()?);
        // optional r g b intensities aren't used by flat shading
        for _ in 0..3 {
            let _ = self.pop_optional_type(TokenType::Number);
        }

        self.symbols.define_constants(name, ReflectionConstants {
            ambient: [kar, kag, kab],
            diffuse: [kdr, kdg, kdb],
            specular: [ksr, ksg, ksb],
        });
        Ok(())
    }

    fn handle_set_knob(&mut self) -> EngineResult<Command> {
        let name = self.name()?;
        let value = self.number()?;

        self.symbols.declare_knob(&name)?;
        Ok(Command::SetKnob { name, value })
    }

    fn handle_set_all_knobs(&mut self) -> EngineResult<Command> {
        Ok(Command::SetAllKnobs { value: self.number()? })
    }

    fn handle_tween(&mut self) -> EngineResult<Command> {
        let start_frame = self.integer()?;
        let end_frame = self.integer()?;
        let knoblist0 = self.name()?;
        let knoblist1 = self.name()?;
        let easing = self.optional_easing()?;

        Ok(Command::Tween { start_frame, end_frame, knoblist0, knoblist1, easing })
    }

    fn handle_vary_knob(&mut self) -> EngineResult<Command> {
        let knob = self.name()?;
        let start_frame = self.integer()?;
        let end_frame = self.integer()?;
        let start_val = self.number()?;
        let end_val = self.number()?;
        let easing = self.optional_easing()?;

        self.symbols.declare_knob(&knob)?;
        Ok(Command::VaryKnob { knob, start_frame, end_frame, start_val, end_val, easing })
    }
}
