//! Subembed - Subtitle Embedding for MP4 and MKV
//!
//! Inspects a movie with ffprobe, picks audio and subtitle handling for its
//! container, and remuxes an external subtitle file into a copy of the movie
//! with ffmpeg.

pub mod cli;
pub mod config;
pub mod workflow;
pub mod paths;
pub mod probe;
pub mod strategy;
pub mod media;
pub mod prompt;
pub mod tools;
pub mod error;
