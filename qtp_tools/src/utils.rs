use std::path::Path;

use anyhow::{bail, Result};

pub fn threshold(s: &str) -> Result<u64, String> {
    s.trim()
        .parse()
        .map_err(|_| format!("Invalid threshold {s}, expected a non-negative integer"))
}

pub fn ensure_exists<P: AsRef<Path>>(place: &str, path: P) -> Result<()> {
    let path = path.as_ref();
    if !path.try_exists()? {
        bail!("{place} file {path:?} does not exist");
    }

    Ok(())
}
