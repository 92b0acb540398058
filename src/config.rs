// Copyright 2022 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tunable details of the legality rules.

use std::{fs, io, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read rule options: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse rule options: {0}")]
    Json(#[from] serde_json::Error),
}

/// Options controlling the parts of the rules that are a matter of interpretation. Missing fields in a JSON document
/// take their default values.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleOptions {
    /// If set, an en-passant capture is only legal onto the board's recorded en-passant target square, i.e. only
    /// immediately after the victim's double push. If unset, any enemy pawn standing beside the capturing pawn,
    /// behind the (empty) destination, may be taken.
    pub require_en_passant_target: bool,
}

impl Default for RuleOptions {
    fn default() -> Self {
        RuleOptions {
            require_en_passant_target: true,
        }
    }
}

impl RuleOptions {
    pub fn from_json(json: &str) -> Result<RuleOptions, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<RuleOptions, ConfigError> {
        let contents = fs::read_to_string(path)?;
        RuleOptions::from_json(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::RuleOptions;

    #[test]
    fn default_is_strict() {
        assert!(RuleOptions::default().require_en_passant_target);
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(RuleOptions::default(), RuleOptions::from_json("{}").unwrap());
    }

    #[test]
    fn relaxed_en_passant() {
        let options = RuleOptions::from_json(r#"{ "require_en_passant_target": false }"#).unwrap();
        assert!(!options.require_en_passant_target);
    }

    #[test]
    fn bad_json() {
        assert!(RuleOptions::from_json("{ nope").is_err());
    }

    #[test]
    fn missing_file() {
        assert!(RuleOptions::from_json_file("/nonexistent/boardrules.json").is_err());
    }
}
