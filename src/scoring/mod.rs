// Bot-likelihood scoring engine — pure computation, no I/O.
//
// Data flows strictly downward: record -> features -> score -> verdict.
// Each submodule owns one stage, so every stage is testable on its own.

pub mod classify;
pub mod features;
pub mod profile;
pub mod record;
pub mod score;
pub mod text;
