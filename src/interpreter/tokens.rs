#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub value: String,
    pub token_type: TokenType,
    // file:line of the token, used in parse errors
    pub info: String,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TokenType {
    Command(Function),
    AxisOfRotation,
    Number,
    FilePath,
    Identifier,
    EasingFunction,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Function {
    // GENERAL
    Display,
    Save,

    // TRANSFORMATIONS
    Push,
    Pop,
    Move,
    Scale,
    Rotate,

    // EDGES
    Line,

    // POLYGONS
    Box,
    Sphere,
    Torus,

    // LIGHTING
    AddLight,
    SetAmbient,
    DefineConstants,

    // ANIMATION
    SetBaseName,
    SetKnob,
    SaveKnobList,
    Tween,
    SetFrames,
    VaryKnob,
    SetAllKnobs,
}
