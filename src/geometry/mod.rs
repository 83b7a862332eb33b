/*
    This module holds the 2D primitives every shape is built from
*/

use std::fmt::Display;

// A point in a y-up frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    pub fn shifted(self, dx: f64, dy: f64) -> Self {
        Point::new(self.x + dx, self.y + dy)
    }

    // Moves the point away from (or towards) the pivot, separately per axis
    pub fn scaled(self, x_scale: f64, y_scale: f64, pivot: Point) -> Self {
        Point::new(
            pivot.x + (self.x - pivot.x) * x_scale,
            pivot.y + (self.y - pivot.y) * y_scale,
        )
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.x, self.y)
    }
}

// A single stroke. `from` and `to` keep the order the stroke was drawn in
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub from: Point,
    pub to: Point,
}

impl Line {
    pub fn new(from: Point, to: Point) -> Self {
        Line { from, to }
    }

    pub fn from_coords(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Line::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    // (from - to) on both axes
    pub fn delta(&self) -> (f64, f64) {
        (self.from.x - self.to.x, self.from.y - self.to.y)
    }

    // The endpoint with the greater y. Ties go to `from`
    pub fn high_point(&self) -> Point {
        if self.to.y > self.from.y { self.to } else { self.from }
    }

    // The endpoint with the lesser y. Ties go to `from`
    pub fn low_point(&self) -> Point {
        if self.to.y < self.from.y { self.to } else { self.from }
    }

    // Scales both endpoints relative to `pivot`. The direction of the line is
    // kept, only its magnitude changes. Non-finite factors leave it untouched
    pub fn scale(&mut self, x_scale: f64, y_scale: f64, pivot: Point) {
        if !x_scale.is_finite() || !y_scale.is_finite() {
            return;
        }

        self.from = self.from.scaled(x_scale, y_scale, pivot);
        self.to = self.to.scaled(x_scale, y_scale, pivot);
    }

    pub fn shift(&mut self, dx: f64, dy: f64) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }

        self.from = self.from.shifted(dx, dy);
        self.to = self.to.shifted(dx, dy);
    }

    // Mirrors the line into a y-down frame whose origin sits at height `top`
    pub fn flipped(&self, top: f64) -> Line {
        Line::new(
            Point::new(self.from.x, top - self.from.y),
            Point::new(self.to.x, top - self.to.y),
        )
    }
}

impl Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.from, self.to)
    }
}
