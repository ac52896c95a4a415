// Multi-account orchestration.
//
// One submodule: batch fans the scoring engine out over many usernames
// with bounded concurrency and aggregates the outcomes.

pub mod batch;
