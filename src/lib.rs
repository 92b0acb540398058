// Copyright 2017-2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `boardrules` decides whether a chess move may be played.
//!
//! Given a [`Board`] and a candidate [`Move`], [`rules::check`] returns a [`Verdict`]: either the move is legal, or
//! the first rule it breaks. On top of that sit a move enumerator and a perft counter in [`movegen`], which exercise
//! the rules against well-known move counts.

pub mod board;
pub mod config;
pub mod core;
pub mod movegen;
pub mod rules;

pub use crate::board::{Board, BoardError, FenParseError};
pub use crate::config::{ConfigError, RuleOptions};
pub use crate::core::{Move, MoveParseError};
pub use crate::rules::{IllegalReason, LegalityError, MoveLegalityChecker, Verdict};
