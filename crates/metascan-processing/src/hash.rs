//! File digests for the report's integrity section.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use metascan_core::FileHashes;
use sha2::{Digest, Sha256};

const CHUNK_SIZE: usize = 64 * 1024;

/// Compute MD5 and SHA-256 of a file in one streaming pass.
///
/// Memory use is bounded by the chunk size regardless of file size.
pub fn hash_file(path: impl AsRef<Path>) -> std::io::Result<FileHashes> {
    let file = File::open(path.as_ref())?;
    let mut reader = BufReader::with_capacity(CHUNK_SIZE, file);

    let mut md5_ctx = md5::Context::new();
    let mut sha256 = Sha256::new();
    let mut buffer = vec![0u8; CHUNK_SIZE];

    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        md5_ctx.consume(&buffer[..n]);
        sha256.update(&buffer[..n]);
    }

    Ok(FileHashes {
        md5: format!("{:x}", md5_ctx.compute()),
        sha256: hex::encode(sha256.finalize()),
    })
}
