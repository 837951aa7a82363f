// Moodpulse: what's unique, how it feels, and what's trending in a news stream
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline or to the configuration and output around it.

pub mod config;
pub mod dedup;
pub mod delta;
pub mod items;
pub mod output;
pub mod pipeline;
pub mod scoring;
pub mod topics;
