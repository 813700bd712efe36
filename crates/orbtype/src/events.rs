use crate::layout::PathId;
use std::str::FromStr;
use thiserror::Error;
use typekit::{Alternate, LanguageCode, TesterId, Weight};

/// One control change. Group and centre-line numbers are 1-based.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    SetWeight { path: PathId, value: i64 },
    SetText { path: PathId, group: usize, text: String },
    SetRadius { path: PathId, group: usize, radius: f64 },
    SetStartAngle { path: PathId, group: usize, degrees: f64 },
    SetEndAngle { path: PathId, group: usize, degrees: f64 },
    SetGuide { path: PathId, group: usize, visible: bool },
    SetCenterLine { line: usize, text: String },
    SetTesterWeight { tester: TesterId, position: i64 },
    ToggleAlternate { element: TesterId, alternate: Alternate, active: bool },
    SetLanguage { tester: TesterId, language: LanguageCode },
    SetCharsetWeight(Weight),
    /// `None` restores the preset width.
    SetStrokeWidth { weight: Weight, width: Option<f64> },
    ConfigReload,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseEventError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("Missing argument <{0}>")]
    MissingArgument(&'static str),
    #[error("Invalid {name} '{value}'")]
    InvalidArgument { name: &'static str, value: String },
    #[error("Unexpected trailing input '{0}'")]
    Trailing(String),
}

/// Splits off the next whitespace-delimited word.
fn next_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(i) => (&input[..i], input[i..].trim_start()),
        None => (input, ""),
    }
}

struct Args<'a> {
    rest: &'a str,
}

impl<'a> Args<'a> {
    fn word(&mut self, name: &'static str) -> Result<&'a str, ParseEventError> {
        let (word, rest) = next_word(self.rest);
        if word.is_empty() {
            return Err(ParseEventError::MissingArgument(name));
        }
        self.rest = rest;
        Ok(word)
    }

    fn parse<T: FromStr>(&mut self, name: &'static str) -> Result<T, ParseEventError> {
        let word = self.word(name)?;
        word.parse().map_err(|_| ParseEventError::InvalidArgument {
            name,
            value: word.to_string(),
        })
    }

    fn toggle(&mut self, name: &'static str) -> Result<bool, ParseEventError> {
        let word = self.word(name)?;
        match word.to_ascii_lowercase().as_str() {
            "on" | "true" | "1" => Ok(true),
            "off" | "false" | "0" => Ok(false),
            _ => Err(ParseEventError::InvalidArgument {
                name,
                value: word.to_string(),
            }),
        }
    }

    /// A positive width, or `default` for none.
    fn stroke_width(&mut self, name: &'static str) -> Result<Option<f64>, ParseEventError> {
        let word = self.word(name)?;
        if word.eq_ignore_ascii_case("default") {
            return Ok(None);
        }
        match word.parse::<f64>() {
            Ok(width) if width.is_finite() && width > 0.0 => Ok(Some(width)),
            _ => Err(ParseEventError::InvalidArgument {
                name,
                value: word.to_string(),
            }),
        }
    }

    /// Everything left on the line, spaces included. May be empty.
    fn text(&mut self) -> String {
        std::mem::take(&mut self.rest).to_string()
    }

    fn finish(self) -> Result<(), ParseEventError> {
        match self.rest.trim() {
            "" => Ok(()),
            rest => Err(ParseEventError::Trailing(rest.to_string())),
        }
    }
}

impl FromStr for AppEvent {
    type Err = ParseEventError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (command, rest) = next_word(line);
        let mut args = Args { rest };

        let event = match command.to_ascii_lowercase().as_str() {
            "" => return Err(ParseEventError::Empty),
            "weight" => AppEvent::SetWeight {
                path: args.parse("path")?,
                value: args.parse("value")?,
            },
            "text" => AppEvent::SetText {
                path: args.parse("path")?,
                group: args.parse("group")?,
                text: args.text(),
            },
            "radius" => AppEvent::SetRadius {
                path: args.parse("path")?,
                group: args.parse("group")?,
                radius: args.parse("radius")?,
            },
            "start" => AppEvent::SetStartAngle {
                path: args.parse("path")?,
                group: args.parse("group")?,
                degrees: args.parse("degrees")?,
            },
            "end" => AppEvent::SetEndAngle {
                path: args.parse("path")?,
                group: args.parse("group")?,
                degrees: args.parse("degrees")?,
            },
            "guide" => AppEvent::SetGuide {
                path: args.parse("path")?,
                group: args.parse("group")?,
                visible: args.toggle("on|off")?,
            },
            "center" => AppEvent::SetCenterLine {
                line: args.parse("line")?,
                text: args.text(),
            },
            "tester-weight" => AppEvent::SetTesterWeight {
                tester: args.parse("tester")?,
                position: args.parse("position")?,
            },
            "alt" => AppEvent::ToggleAlternate {
                element: args.parse("element")?,
                alternate: args.parse("alternate")?,
                active: args.toggle("on|off")?,
            },
            "lang" => AppEvent::SetLanguage {
                tester: args.parse("tester")?,
                language: args.parse("language")?,
            },
            "charset" => AppEvent::SetCharsetWeight(args.parse("weight")?),
            "stroke" => AppEvent::SetStrokeWidth {
                weight: args.parse("weight")?,
                width: args.stroke_width("width|default")?,
            },
            "reload" => AppEvent::ConfigReload,
            other => return Err(ParseEventError::UnknownCommand(other.to_string())),
        };

        args.finish()?;
        Ok(event)
    }
}
