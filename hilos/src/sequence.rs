use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use serde::Serialize;

use crate::error::Error;

/// Paths to the two finished artifacts of one invocation.
#[derive(Clone, Debug, Serialize)]
pub struct Artifacts {
    /// The rendered PNG, `{stem}_output.png`.
    pub image: PathBuf,
    /// The pin sequence JSON, `{stem}.json`.
    pub sequence: PathBuf,
}

/// Serializes the pin sequence as a flat JSON array of integers. This file
/// is the whole contract for downstream replay or visualization.
pub fn write_sequence(path: &Path, sequence: &[usize]) -> Result<(), Error> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer(&mut writer, sequence).map_err(std::io::Error::other)?;
    // Flush explicitly: an error on the drop-time flush would be discarded
    // and leave a truncated artifact behind an Ok.
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::write_sequence;

    #[test]
    fn writes_a_flat_integer_array() {
        let path = std::env::temp_dir().join(format!("hilos-seq-{}.json", std::process::id()));
        write_sequence(&path, &[0, 21, 57, 3]).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        assert_eq!(raw, "[0,21,57,3]");
        let parsed: Vec<usize> = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed, vec![0, 21, 57, 3]);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn full_device_surfaces_a_write_error() {
        // /dev/full accepts the open but fails every flush with ENOSPC.
        let err = write_sequence(std::path::Path::new("/dev/full"), &[0, 21, 57, 3]);
        assert!(err.is_err());
    }
}
