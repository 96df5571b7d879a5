//! Test fixture creation utilities

use std::fs;
use std::path::{Path, PathBuf};

/// Byte buffer that trips the string-decryption, unreachable-code,
/// switch-dispatch, and identifier-renaming detectors.
#[allow(dead_code)]
pub fn obfuscated_jar_bytes() -> Vec<u8> {
    let mut bytes = vec![0u8; 8192];
    // invokestatic-style decryption call
    bytes[16] = 0x12;
    bytes[17] = 0xB8;
    // athrow followed by goto
    bytes[64] = 0xBF;
    bytes[65] = 0xA7;
    // enough switch opcodes for the dispatcher heuristic
    for i in 0..4 {
        bytes[128 + i * 9] = 0xAA;
    }
    bytes
}

/// Plain buffer below every detector threshold
#[allow(dead_code)]
pub fn plain_jar_bytes() -> Vec<u8> {
    vec![0u8; 1024]
}

/// Write a JAR fixture into `dir` and return its path
#[allow(dead_code)]
pub fn write_jar(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, bytes).expect("Failed to write JAR fixture");
    path
}

/// Write a small ProGuard mapping fixture into `dir`
#[allow(dead_code)]
pub fn write_mapping(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(
        &path,
        "com.example.Main -> a.a:\n    run() -> a\n    counter -> b\ncom.example.Util -> a.b:\n",
    )
    .expect("Failed to write mapping fixture");
    path
}
