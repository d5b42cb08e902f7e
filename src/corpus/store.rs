//! Binary corpus files
//!
//! A corpus is persisted as a small header (magic + format version) followed
//! by the bitcode-encoded document collection. The version byte guards
//! against silently decoding a file written by an incompatible build.

use crate::models::Corpus;
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

const MAGIC: &[u8; 4] = b"SPCB";
const VERSION: u8 = 1;

/// Write a corpus to `path`, overwriting any existing file.
pub fn save(corpus: &Corpus, path: &Path) -> Result<()> {
    let payload = bitcode::serialize(corpus).context("encode corpus")?;
    let mut bytes = Vec::with_capacity(MAGIC.len() + 1 + payload.len());
    bytes.extend_from_slice(MAGIC);
    bytes.push(VERSION);
    bytes.extend_from_slice(&payload);
    fs::write(path, &bytes).with_context(|| format!("write corpus file {}", path.display()))?;
    debug!(
        documents = corpus.len(),
        bytes = bytes.len(),
        path = %path.display(),
        "corpus saved"
    );
    Ok(())
}

/// Read a corpus back from `path`.
pub fn load(path: &Path) -> Result<Corpus> {
    let bytes =
        fs::read(path).with_context(|| format!("read corpus file {}", path.display()))?;
    if bytes.len() < MAGIC.len() + 1 || &bytes[..MAGIC.len()] != MAGIC {
        bail!("{} is not a spanprobe corpus file", path.display());
    }
    let version = bytes[MAGIC.len()];
    if version != VERSION {
        bail!(
            "{} uses corpus format v{}, this build reads v{}",
            path.display(),
            version,
            VERSION
        );
    }
    let corpus: Corpus = bitcode::deserialize(&bytes[MAGIC.len() + 1..])
        .with_context(|| format!("decode corpus file {}", path.display()))?;
    debug!(documents = corpus.len(), path = %path.display(), "corpus loaded");
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Document, Span};

    fn sample() -> Corpus {
        let doc = Document::from_words(&["The", "drug", "aspirin", "reduces", "pain", "."])
            .with_layer("sc", vec![Span::new("DRUG", 2, 3), Span::unlabeled(0, 2)]);
        Corpus::new(vec![doc])
    }

    #[test]
    fn round_trip_preserves_the_corpus() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sample.corpus");
        let corpus = sample();
        save(&corpus, &path).expect("save");
        let loaded = load(&path).expect("load");
        assert_eq!(loaded, corpus);
    }

    #[test]
    fn rejects_foreign_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("not-a-corpus");
        std::fs::write(&path, b"plain text, definitely not a corpus").expect("write");
        assert!(load(&path).is_err());
    }

    #[test]
    fn rejects_unknown_versions() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("future.corpus");
        let mut bytes = Vec::new();
        bytes.extend_from_slice(MAGIC);
        bytes.push(VERSION + 1);
        std::fs::write(&path, &bytes).expect("write");
        assert!(load(&path).is_err());
    }
}
