// src/output/writer.rs
//! Performs the actual output I/O.

use super::DeliveryTarget;
use crate::error::AppError;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Writes `content` to `target`, returning the number of bytes written.
pub fn deliver(target: &DeliveryTarget, content: &str) -> Result<usize, AppError> {
    let result = match target {
        DeliveryTarget::File(path) => write_file(path, content),
        DeliveryTarget::Stdout => print_to_stdout(content),
    };
    result.map_err(|source| {
        log::error!("Delivery to {} failed: {}", target, source);
        AppError::DeliveryFailed {
            target: target.to_string(),
            source,
        }
    })
}

fn write_file(path: &Path, content: &str) -> io::Result<usize> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> io::Result<usize> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    let mut written = content.len();
    if !content.ends_with('\n') {
        stdout.write_all(b"\n")?;
        written += 1;
    }
    stdout.flush()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_file_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pages").join("home.json");

        let written = deliver(&DeliveryTarget::File(path.clone()), "[]").unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(path).unwrap(), "[]");
    }

    #[test]
    fn test_failures_name_the_target() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let path = blocker.join("out.json");

        let err = deliver(&DeliveryTarget::File(path.clone()), "[]").unwrap_err();

        match &err {
            AppError::DeliveryFailed { target, .. } => {
                assert_eq!(target, &path.display().to_string())
            }
            other => panic!("expected DeliveryFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_targets_display_their_destination() {
        assert_eq!(DeliveryTarget::Stdout.to_string(), "stdout");
        assert_eq!(DeliveryTarget::from_output_file(None), DeliveryTarget::Stdout);
        let path = Path::new("out/page.json");
        assert_eq!(
            DeliveryTarget::from_output_file(Some(path)),
            DeliveryTarget::File(path.to_path_buf())
        );
    }
}
