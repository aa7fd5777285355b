use std::collections::BTreeMap;

use crate::{
    constants::{DEFAULT_AMBIENT_LIGHT, DEFAULT_POINT_LIGHT, DEFAULT_REFLECTION_CONSTANTS},
    error::{EngineError, EngineResult},
    render::{LightingConfig, PointLight, ReflectionConstants},
};
use super::animation::KnobValues;

type Vector = [f32; 3];

const AMBIENT_SYMBOL: &str = "ambient";

#[derive(Clone, Debug, PartialEq)]
pub enum Symbol {
    Constants(ReflectionConstants),
    Light { color: Vector, position: Vector },
    Knob(f32),
    Ambient(Vector),
}

/// Named values produced by the parser. Every frame renders from its own clone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SymbolTable {
    symbols: BTreeMap<String, Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define_constants(&mut self, name: String, constants: ReflectionConstants) {
        self.symbols.insert(name, Symbol::Constants(constants));
    }

    pub fn define_light(&mut self, name: String, color: Vector, position: Vector) {
        self.symbols.insert(name, Symbol::Light { color, position });
    }

    pub fn set_ambient(&mut self, color: Vector) {
        self.symbols.insert(AMBIENT_SYMBOL.to_string(), Symbol::Ambient(color));
    }

    /// Registers a knob at 0.0. A name already bound to something else is rejected.
    pub fn declare_knob(&mut self, name: &str) -> EngineResult<()> {
        match self.symbols.entry(name.to_string()).or_insert(Symbol::Knob(0.0)) {
            Symbol::Knob(_) => Ok(()),
            _ => Err(EngineError::SymbolKind { name: name.to_string(), expected: "a knob" }),
        }
    }

    pub fn set_knob(&mut self, name: String, value: f32) {
        self.symbols.insert(name, Symbol::Knob(value));
    }

    pub fn set_all_knobs(&mut self, value: f32) {
        for symbol in self.symbols.values_mut() {
            if let Symbol::Knob(old_value) = symbol {
                *old_value = value;
            }
        }
    }

    /// Overwrites knob values with one frame's resolved values.
    pub fn apply_knobs(&mut self, knobs: &KnobValues) {
        for (name, value) in knobs {
            self.set_knob(name.clone(), *value);
        }
    }

    /// Every declared knob with its current value.
    pub fn knob_values(&self) -> KnobValues {
        self.symbols
            .iter()
            .filter_map(|(name, symbol)| match symbol {
                Symbol::Knob(value) => Some((name.clone(), *value)),
                _ => None,
            })
            .collect()
    }

    pub fn knob(&self, name: &str) -> EngineResult<f32> {
        match self.symbols.get(name) {
            Some(Symbol::Knob(value)) => Ok(*value),
            Some(_) => Err(EngineError::SymbolKind { name: name.to_string(), expected: "a knob" }),
            None => Err(EngineError::UndefinedSymbol(name.to_string())),
        }
    }

    /// Material for a primitive; no reference means the default constants.
    pub fn reflection_constants(&self, name: Option<&str>) -> EngineResult<ReflectionConstants> {
        let Some(name) = name else {
            return Ok(DEFAULT_REFLECTION_CONSTANTS);
        };

        match self.symbols.get(name) {
            Some(Symbol::Constants(constants)) => Ok(*constants),
            Some(_) => Err(EngineError::SymbolKind { name: name.to_string(), expected: "lighting constants" }),
            None => Err(EngineError::UndefinedSymbol(name.to_string())),
        }
    }

    /// Ambient color plus every light; falls back to the defaults when the script defines none.
    pub fn lighting_config(&self) -> LightingConfig {
        let mut ambient_light_color = DEFAULT_AMBIENT_LIGHT;
        let mut point_lights = vec![];

        for symbol in self.symbols.values() {
            match symbol {
                Symbol::Ambient(color) => ambient_light_color = *color,
                Symbol::Light { color, position } => point_lights.push(PointLight::new(*color, *position)),
                _ => {}
            }
        }

        if point_lights.is_empty() {
            let [color, position] = DEFAULT_POINT_LIGHT;
            point_lights.push(PointLight::new(color, position));
        }

        LightingConfig { ambient_light_color, point_lights }
    }
}
