use std::{fs::File, io::Read, path::Path};

use sha2::{Digest, Sha256};

use crate::error::Result;

const CHUNK_SIZE: usize = 4096;

/// Compute the SHA-256 digest of a file as a lowercase hex string.
///
/// The file is folded into the hasher in fixed-size chunks, so memory use
/// stays bounded regardless of file size. Identical byte streams always
/// produce identical digests; any single-byte change produces a different
/// one.
pub fn digest_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = File::open(&path)?;
    let mut hasher = Sha256::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        hasher.update(&chunk[..read]);
    }

    let digest = format!("{:x}", hasher.finalize());
    log::debug!("digest of {}: {}", path.as_ref().display(), digest);

    Ok(digest)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).unwrap();
        file.write_all(bytes).unwrap();
        path
    }

    #[test]
    fn test_digest_is_deterministic() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "a.bin", b"some image bytes");

        let first = digest_file(&path).unwrap();
        let second = digest_file(&path).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_single_byte_change_alters_digest() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_fixture(&dir, "a.bin", b"some image bytes");
        let b = write_fixture(&dir, "b.bin", b"some image bytez");

        assert_ne!(digest_file(&a).unwrap(), digest_file(&b).unwrap());
    }

    #[test]
    fn test_known_empty_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "empty.bin", b"");

        assert_eq!(
            digest_file(&path).unwrap(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_file_larger_than_one_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let bytes = vec![0xabu8; CHUNK_SIZE * 3 + 17];
        let path = write_fixture(&dir, "big.bin", &bytes);

        let streamed = digest_file(&path).unwrap();
        let whole = format!("{:x}", Sha256::digest(&bytes));

        assert_eq!(streamed, whole);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = digest_file(dir.path().join("nope.bin"));

        assert!(matches!(result, Err(crate::error::IntegrityError::Io(_))));
    }
}
