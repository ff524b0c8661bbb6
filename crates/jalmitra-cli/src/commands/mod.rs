pub mod data;
pub mod profile;
pub mod session;

use anyhow::Result;
use serde::Serialize;

/// How command results are printed.
pub struct Output {
    pub json: bool,
}

impl Output {
    /// Prints `value` as JSON when requested, otherwise runs `human`.
    pub fn emit<T: Serialize>(&self, value: &T, human: impl FnOnce()) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        } else {
            human();
        }
        Ok(())
    }
}
