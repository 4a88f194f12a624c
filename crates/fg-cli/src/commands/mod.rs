//! Command implementations for the fixturegen CLI

pub mod generate;

pub use generate::{generate_command, render_fixture, GenerateArgs};
