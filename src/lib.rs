pub mod error_handling;
pub mod generator;
pub mod geometry;
pub mod grammar;
pub mod parser;
pub mod recognizer;
pub mod shape;
