/*
    This module reads stroke lists: one stroke per line as `x1 y1 x2 y2`
*/

use std::fs::File;
use std::io::BufRead;
use std::path::Path;

use itertools::Itertools;

use crate::error_handling::*;
use crate::geometry::Line;

#[derive(Debug, thiserror::Error)]
pub enum StrokeErrorType {
    // A stroke needs exactly two points
    #[error("Expected 4 coordinates, found {0}")]
    WrongFieldCount(usize),
    // A coordinate is not a finite number
    #[error("`{0}` is not a valid coordinate")]
    InvalidNumber(String),
    // There was an issue with reading a file
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
}

impl ErrorType for StrokeErrorType {}

impl PartialEq for StrokeErrorType {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (StrokeErrorType::WrongFieldCount(a), StrokeErrorType::WrongFieldCount(b)) => a == b,
            (StrokeErrorType::InvalidNumber(a), StrokeErrorType::InvalidNumber(b)) => a == b,
            (StrokeErrorType::FileError(a), StrokeErrorType::FileError(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

pub type StrokeError = Error<StrokeErrorType>;
pub type StrokeErrors = Errors<StrokeErrorType>;

pub type Result<T> = std::result::Result<T, StrokeErrorType>;
pub type LineResult<T> = std::result::Result<T, StrokeError>;
pub type FileResult<T> = std::result::Result<T, StrokeErrors>;

fn parse_coordinate(field: &str) -> Result<f64> {
    field.parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| StrokeErrorType::InvalidNumber(field.to_string()))
}

// Coordinates may be separated by whitespace, commas or both
pub fn parse_stroke(line: &str) -> Result<Line> {
    let fields = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|field| !field.is_empty())
        .collect_vec();

    if fields.len() != 4 {
        return Err(StrokeErrorType::WrongFieldCount(fields.len()));
    }

    let coords = fields.into_iter().map(parse_coordinate).collect::<Result<Vec<f64>>>()?;
    return Ok(Line::from_coords(coords[0], coords[1], coords[2], coords[3]));
}

fn is_stroke_line(line: &str) -> bool {
    let trimmed = line.trim();
    !trimmed.is_empty() && !trimmed.starts_with(';')
}

// Parses numbered lines, keeping every error instead of stopping at the first
fn collect_strokes(lines: impl Iterator<Item = (usize, LineResult<String>)>, path: &Path) -> FileResult<Vec<Line>> {
    let parsed = lines
        .filter(|(_, line)| line.as_ref().map_or(true, |text| is_stroke_line(text)))
        .map(|(num, line)| {
            line.and_then(|text| parse_stroke(&text).map_err(|error| Error::at(Location::line(path, num), error)))
        });

    let (strokes, errors): (Vec<_>, Vec<_>) = parsed.partition_result();
    if errors.len() > 0 {
        return Err(errors);
    }

    return Ok(strokes);
}

// Parses an in-memory stroke list. `path` is only used to label errors
pub fn parse_str(text: &str, path: &Path) -> FileResult<Vec<Line>> {
    let lines = text.lines().enumerate().map(|(num, line)| (num + 1, Ok(line.to_string())));
    collect_strokes(lines, path)
}

pub fn parse_file(path: &Path) -> FileResult<Vec<Line>> {
    let file = File::open(path)
        .map_err(|e| vec![Error::at(Location::file(path), StrokeErrorType::FileError(e))])?;
    let lines = std::io::BufReader::new(file)
        .lines()
        .map(|line| line.map_err(|e| Error::at(Location::file(path), StrokeErrorType::FileError(e))))
        .enumerate()
        .map(|(num, line)| (num + 1, line));

    collect_strokes(lines, path)
}

// Writes strokes in the format `parse_str` reads back
pub fn format_strokes<'a>(lines: impl IntoIterator<Item = &'a Line>) -> String {
    lines.into_iter().map(|line| format!("{}\n", line)).collect()
}
