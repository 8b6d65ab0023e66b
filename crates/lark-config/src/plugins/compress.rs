//! Output compression into sibling `.gz` / `.br` assets.
//!
//! One plugin instance per selected algorithm; the codecs themselves are
//! third-party (flate2, brotli), this plugin owns the threshold and naming
//! policy only. Originals are always kept.

use std::borrow::Cow;
use std::io::Write;

use async_trait::async_trait;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::env::CompressType;
use crate::error::Result;
use crate::plugin::{Bundle, Plugin};

/// Outputs below this many bytes are left uncompressed.
pub const COMPRESS_THRESHOLD: u64 = 50 * 1024;

/// Compresses qualifying bundle outputs with one algorithm.
#[derive(Debug)]
pub struct CompressPlugin {
    algorithm: CompressType,
    threshold: u64,
}

impl CompressPlugin {
    pub fn new(algorithm: CompressType) -> Self {
        Self {
            algorithm,
            threshold: COMPRESS_THRESHOLD,
        }
    }

    pub fn with_threshold(mut self, threshold: u64) -> Self {
        self.threshold = threshold;
        self
    }

    fn compress(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        match self.algorithm {
            CompressType::Gzip => {
                let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
            CompressType::Brotli => {
                let mut out = Vec::new();
                {
                    let mut writer = brotli::CompressorWriter::new(&mut out, 4096, 11, 22);
                    writer.write_all(data)?;
                }
                Ok(out)
            }
        }
    }
}

#[async_trait]
impl Plugin for CompressPlugin {
    fn name(&self) -> Cow<'static, str> {
        format!("lark:compress-{}", self.algorithm.extension()).into()
    }

    async fn generate_bundle(&self, bundle: &mut Bundle) -> Result<()> {
        let mut siblings = Vec::new();
        for output in bundle.outputs() {
            if output.size() < self.threshold {
                continue;
            }
            let data = match output {
                crate::plugin::Output::Chunk(chunk) => chunk.code.as_bytes(),
                crate::plugin::Output::Asset(asset) => asset.source.as_bytes(),
            };
            let compressed = self.compress(data)?;
            siblings.push((
                format!("{}.{}", output.file_name(), self.algorithm.extension()),
                compressed,
            ));
        }
        for (file_name, data) in siblings {
            bundle.emit_asset(file_name, data)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{Output, OutputChunk};

    fn bundle_with_chunk(size: usize) -> Bundle {
        let mut bundle = Bundle::new();
        bundle.push(Output::Chunk(OutputChunk {
            file_name: "js/app-abc.js".to_string(),
            code: "a".repeat(size),
            is_entry: false,
        }));
        bundle
    }

    #[tokio::test]
    async fn large_outputs_gain_gzip_siblings() {
        let plugin = CompressPlugin::new(CompressType::Gzip);
        let mut bundle = bundle_with_chunk(COMPRESS_THRESHOLD as usize);

        plugin.generate_bundle(&mut bundle).await.unwrap();

        assert_eq!(bundle.len(), 2);
        let sibling = bundle.get("js/app-abc.js.gz").unwrap();
        assert!(sibling.size() > 0);
        // Repetitive input compresses well below the original.
        assert!(sibling.size() < COMPRESS_THRESHOLD);
    }

    #[tokio::test]
    async fn small_outputs_are_skipped() {
        let plugin = CompressPlugin::new(CompressType::Gzip);
        let mut bundle = bundle_with_chunk((COMPRESS_THRESHOLD - 1) as usize);

        plugin.generate_bundle(&mut bundle).await.unwrap();

        assert_eq!(bundle.len(), 1);
        assert!(bundle.get("js/app-abc.js.gz").is_none());
    }

    #[tokio::test]
    async fn brotli_uses_br_extension() {
        let plugin = CompressPlugin::new(CompressType::Brotli).with_threshold(16);
        let mut bundle = bundle_with_chunk(64);

        plugin.generate_bundle(&mut bundle).await.unwrap();

        assert!(bundle.contains("js/app-abc.js.br"));
    }

    #[tokio::test]
    async fn originals_are_kept() {
        let plugin = CompressPlugin::new(CompressType::Gzip).with_threshold(16);
        let mut bundle = bundle_with_chunk(64);

        plugin.generate_bundle(&mut bundle).await.unwrap();

        assert!(bundle.contains("js/app-abc.js"));
        assert!(bundle.contains("js/app-abc.js.gz"));
    }
}
