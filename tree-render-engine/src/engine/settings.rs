//! Settings file loading.
//!
//! The settings file is ten labeled lines in a fixed order. Each line is a
//! short label followed by one value; booleans are textual, colors are packed
//! 24-bit hexadecimal integers, everything else is decimal. The schema below
//! drives the whole parse: one `FieldSpec` per line, dispatched on a closed
//! `FieldKind` enum.

use bevy::prelude::*;
use std::fmt;
use std::fs;

/// Parsed contents of the settings file, immutable after load.
#[derive(Resource, Debug, Clone)]
pub struct TreeSettings {
    /// Perspective orbit navigation when set, orthographic pan otherwise.
    pub is_3d: bool,
    /// Recursion depth of the tree, in generations.
    pub iterations: u32,
    /// Edge length of the generation-1 panel.
    pub side: f32,
    /// Extrusion thickness of every panel.
    pub depth: f32,
    /// Asymmetric split angle, degrees.
    pub angle: f32,
    pub first_color: Vec3,
    pub last_color: Vec3,
    /// Swap the children's angle roles every generation after the first.
    pub reversing: bool,
    pub directed_light: bool,
    pub dynamic_light: bool,
}

#[derive(Debug)]
pub enum SettingsError {
    Io(std::io::Error),
    MissingField { name: &'static str },
    BadValue { name: &'static str, value: String },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Io(err) => write!(f, "cannot read settings file: {err}"),
            SettingsError::MissingField { name } => {
                write!(f, "settings field '{name}' is missing")
            }
            SettingsError::BadValue { name, value } => {
                write!(f, "settings field '{name}' has unparsable value '{value}'")
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SettingsError {
    fn from(err: std::io::Error) -> Self {
        SettingsError::Io(err)
    }
}

/// Value representation of one settings line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldKind {
    Flag,
    Count,
    Scalar,
    PackedColor,
}

struct FieldSpec {
    name: &'static str,
    /// Words of label preceding the value on the line.
    label_words: usize,
    kind: FieldKind,
}

const SCHEMA: [FieldSpec; 10] = [
    FieldSpec { name: "3d mode", label_words: 2, kind: FieldKind::Flag },
    FieldSpec { name: "iterations", label_words: 1, kind: FieldKind::Count },
    FieldSpec { name: "side length", label_words: 2, kind: FieldKind::Scalar },
    FieldSpec { name: "panel depth", label_words: 2, kind: FieldKind::Scalar },
    FieldSpec { name: "branch angle", label_words: 2, kind: FieldKind::Scalar },
    FieldSpec { name: "first gradient color", label_words: 3, kind: FieldKind::PackedColor },
    FieldSpec { name: "last gradient color", label_words: 3, kind: FieldKind::PackedColor },
    FieldSpec { name: "reversing split order", label_words: 3, kind: FieldKind::Flag },
    FieldSpec { name: "directed light enabled", label_words: 3, kind: FieldKind::Flag },
    FieldSpec { name: "dynamic light enabled", label_words: 3, kind: FieldKind::Flag },
];

#[derive(Debug, Clone, Copy)]
enum FieldValue {
    Flag(bool),
    Count(u32),
    Scalar(f32),
    PackedColor(u32),
}

fn parse_value(kind: FieldKind, raw: &str) -> Option<FieldValue> {
    match kind {
        FieldKind::Flag => match raw {
            "true" => Some(FieldValue::Flag(true)),
            "false" => Some(FieldValue::Flag(false)),
            _ => None,
        },
        FieldKind::Count => raw.parse().ok().map(FieldValue::Count),
        FieldKind::Scalar => raw.parse().ok().map(FieldValue::Scalar),
        FieldKind::PackedColor => {
            let digits = raw.strip_prefix("0x").unwrap_or(raw);
            u32::from_str_radix(digits, 16).ok().map(FieldValue::PackedColor)
        }
    }
}

/// Splits a packed 24-bit color into normalized RGB channels.
///
/// The original renderer divided the red and green bytes by 255^3 and 255^2
/// without shifting them down first, collapsing both channels to nearly zero.
/// That was a byte-decoding mistake; here every channel is shifted into the
/// low byte and divided by 255.
pub fn decode_color(packed: u32) -> Vec3 {
    Vec3::new(
        ((packed >> 16) & 0xff) as f32 / 255.0,
        ((packed >> 8) & 0xff) as f32 / 255.0,
        (packed & 0xff) as f32 / 255.0,
    )
}

pub fn load_settings(path: &str) -> Result<TreeSettings, SettingsError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<TreeSettings, SettingsError> {
    let mut lines = content.lines();
    let mut values = Vec::with_capacity(SCHEMA.len());

    for spec in &SCHEMA {
        let line = lines
            .next()
            .ok_or(SettingsError::MissingField { name: spec.name })?;
        let raw = line
            .split_whitespace()
            .nth(spec.label_words)
            .ok_or(SettingsError::MissingField { name: spec.name })?;
        let value = parse_value(spec.kind, raw).ok_or_else(|| SettingsError::BadValue {
            name: spec.name,
            value: raw.to_string(),
        })?;
        values.push(value);
    }

    let Ok(
        [
            FieldValue::Flag(is_3d),
            FieldValue::Count(iterations),
            FieldValue::Scalar(side),
            FieldValue::Scalar(depth),
            FieldValue::Scalar(angle),
            FieldValue::PackedColor(first_color),
            FieldValue::PackedColor(last_color),
            FieldValue::Flag(reversing),
            FieldValue::Flag(directed_light),
            FieldValue::Flag(dynamic_light),
        ],
    ) = <[FieldValue; 10]>::try_from(values)
    else {
        unreachable!("field kinds are fixed by the schema");
    };

    Ok(TreeSettings {
        is_3d,
        iterations,
        side,
        depth,
        angle,
        first_color: decode_color(first_color),
        last_color: decode_color(last_color),
        reversing,
        directed_light,
        dynamic_light,
    })
}
