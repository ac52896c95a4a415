// Redflag: heuristic bot-likelihood scoring for Reddit accounts
//
// This is the library root. The scoring engine (scoring/) is pure
// computation; the Reddit layer (reddit/) feeds it; pipeline/ fans the
// engine out over many accounts; output/ renders the results.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod reddit;
pub mod scoring;
