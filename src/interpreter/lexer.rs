use std::{
    collections::{HashMap, VecDeque},
    fs,
};

use regex::Regex;
use crate::error::{EngineError, EngineResult};
use super::tokens::{Token, TokenType};

pub fn tokenize(path: &str, keywords: &HashMap<&str, TokenType>) -> EngineResult<VecDeque<Token>> {
    let source = fs::read_to_string(path)
        .map_err(|err| EngineError::parse(format!("Script '{}' could not be read: {}", path, err)))?;

    tokenize_source(&source, path, keywords)
}

pub fn tokenize_source(source: &str, origin: &str, keywords: &HashMap<&str, TokenType>) -> EngineResult<VecDeque<Token>> {
    let token_regex = Regex::new(r"(?x)
        (?P<Comment>//) |
        (?P<WhiteSpace> \s+) |
        (?P<Number> -?(\d+\.?\d*|\.\d+)) |
        (?P<FilePath>(?:\./|\../|[A-Za-z0-9_\-]+/)*[A-Za-z0-9_\-]+\.[A-Za-z0-9]+) |
        (?P<Identifier> [a-zA-Z_][a-zA-Z0-9_]*) |
        (?P<Unknown> \S)"
    )?;

    let mut tokens: VecDeque<Token> = VecDeque::new();

    for (line_number, line) in source.lines().enumerate() {
        let info = format!("{}:{}", origin, line_number + 1);

        for captures in token_regex.captures_iter(line.trim()) {
            let (value, token_type) = if captures.name("Comment").is_some() {
                break;
            } else if captures.name("WhiteSpace").is_some() {
                continue;
            } else if let Some(number) = captures.name("Number") {
                (number.as_str(), TokenType::Number)
            } else if let Some(file_path) = captures.name("FilePath") {
                (file_path.as_str(), TokenType::FilePath)
            } else if let Some(identifier) = captures.name("Identifier") {
                let identifier = identifier.as_str();
                (identifier, keywords.get(identifier).copied().unwrap_or(TokenType::Identifier))
            } else {
                let unknown = captures.name("Unknown").map_or("", |m| m.as_str());
                return Err(EngineError::Lex { location: info, token: unknown.to_string() });
            };

            tokens.push_back(Token {
                value: value.to_string(),
                token_type,
                info: info.clone(),
            });
        }
    }

    Ok(tokens)
}
