//! Fuzz target for statdist.toml parsing.
//!
//! Malformed config files must be reported as errors, never panic.

#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use sd_cli::config::Settings;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = Settings::from_toml_str(Path::new("fuzz.toml"), text);
    }
});
