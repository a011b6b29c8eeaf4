use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use log::trace;
use sha2::{Digest, Sha256};
use super::Error;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Persist {
    Empty,
    Unchanged,
    Written,
}

pub fn persist(path: &Path, bytes: &[u8], template: &str, checksum: bool) -> Result<Persist, Error> {
    if bytes.is_empty() {
        return Ok(Persist::Empty);
    }

    let bytes = merge(bytes, template);

    if checksum {
        let next = fingerprint(&bytes);
        let prev = match fs::read(path) {
            Ok(prev)                                  => Some(fingerprint(&prev)),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e)                                    => return Err(Error::Io(path.to_owned(), e)),
        };

        let was = prev.map(hex::encode).unwrap_or_else(|| "none".to_owned());
        trace!("{}: fingerprint {} previous {}", path.display(), hex::encode(next), was);

        if prev == Some(next) {
            return Ok(Persist::Unchanged);
        }
    }

    write(path, &bytes)?;

    Ok(Persist::Written)
}

pub fn merge(bytes: &[u8], template: &str) -> Vec<u8> {
    let mut merged = bytes.to_vec();
    if !template.is_empty() {
        merged.push(b'\n');
        merged.extend_from_slice(template.as_bytes());
    }
    merged
}

pub fn fingerprint(bytes: &[u8]) -> [u8; 32] {
    Sha256::digest(bytes).into()
}

fn write(path: &Path, bytes: &[u8]) -> Result<(), Error> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|e| Error::Io(dir.to_owned(), e))?;
    }
    fs::write(path, bytes).map_err(|e| Error::Io(path.to_owned(), e))
}
