/*
    This module holds shape nodes: instances of a grammar symbol together with
    the strokes that make them up
*/

use thiserror::Error;

use crate::geometry::*;

// A ratio needed the node's length or height, but that side is empty
#[derive(Debug, Error, PartialEq, Clone)]
#[error("`{symbol}` has degenerate geometry (length {length}, height {height})")]
pub struct DegenerateGeometry {
    pub symbol: String,
    pub length: f64,
    pub height: f64,
}

// An instance of a symbol. `start` is the (min x, max y) corner of the
// bounding box and `end` the (max x, min y) corner
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeNode {
    pub symbol: String,
    pub start: Point,
    pub end: Point,
    pub lines: Vec<Line>,
}

fn usable(side: f64) -> bool {
    side.is_finite() && side != 0.0
}

impl ShapeNode {
    // A node for a single stroke, boxed tightly around it
    pub fn from_line(symbol: &str, line: Line) -> Self {
        let start = Point::new(line.from.x.min(line.to.x), line.from.y.max(line.to.y));
        let end = Point::new(line.from.x.max(line.to.x), line.from.y.min(line.to.y));

        ShapeNode {
            symbol: symbol.to_string(),
            start,
            end,
            lines: vec![line],
        }
    }

    pub fn with_bounds(symbol: &str, lines: Vec<Line>, start: Point, end: Point) -> Self {
        ShapeNode {
            symbol: symbol.to_string(),
            start,
            end,
            lines,
        }
    }

    pub fn length(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }

    pub fn height(&self) -> f64 {
        (self.start.y - self.end.y).abs()
    }

    fn degenerate(&self) -> DegenerateGeometry {
        DegenerateGeometry {
            symbol: self.symbol.clone(),
            length: self.length(),
            height: self.height(),
        }
    }

    // Fails when a side the caller is about to divide by is zero or not finite
    pub fn check_extent(&self, length: bool, height: bool) -> Result<(), DegenerateGeometry> {
        if (length && !usable(self.length())) || (height && !usable(self.height())) {
            return Err(self.degenerate());
        }

        Ok(())
    }

    // Rescales the box about `start` and drags every line along with it
    pub fn scale(&mut self, x_scale: f64, y_scale: f64) {
        if !x_scale.is_finite() || !y_scale.is_finite() {
            return;
        }

        let pivot = self.start;
        self.end = self.end.scaled(x_scale, y_scale, pivot);
        for line in self.lines.iter_mut() {
            line.scale(x_scale, y_scale, pivot);
        }
    }

    pub fn shift(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }

        self.start = self.start.shifted(dx, dy);
        self.end = self.end.shifted(dx, dy);
        for line in self.lines.iter_mut() {
            line.shift(dx, dy);
        }
    }

    // Stretches the node so its box is exactly `width` by `height`
    pub fn fit_to(&mut self, width: f64, height: f64) -> Result<(), DegenerateGeometry> {
        self.check_extent(true, true)?;
        self.scale(width / self.length(), height / self.height());
        Ok(())
    }

    // The strokes in a y-down frame whose origin is the top of the box, the
    // way a screen expects them
    pub fn screen_lines(&self) -> Vec<Line> {
        self.lines.iter().map(|line| line.flipped(self.start.y)).collect()
    }
}
