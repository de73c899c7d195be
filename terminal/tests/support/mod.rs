#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::{
    food_payload, index_line, log_line, match_key, segment_payload, LogFixture, EPOCH, MARKER,
};
