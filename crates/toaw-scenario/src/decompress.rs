//! The decompression capability injected into both readers.

use std::io::Read;

use flate2::read::MultiGzDecoder;
use toaw_blast::Blast;

use crate::error::BoxError;

/// Decompresses the compressed parts of a scenario file.
///
/// Segmented files compress each block separately with the legacy
/// PKWare scheme; stream files are gzip. The default
/// [`decompress_stream`](BlockDecompressor::decompress_stream) reads every
/// gzip member in the file, so an implementation usually only provides the
/// block codec.
pub trait BlockDecompressor {
    /// Decompress one length-prefixed block.
    fn decompress_block(&self, block: &[u8]) -> Result<Vec<u8>, BoxError>;

    /// Decompress a whole stream-layout file.
    fn decompress_stream(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        let mut output = Vec::new();
        MultiGzDecoder::new(data).read_to_end(&mut output)?;
        Ok(output)
    }
}

impl BlockDecompressor for Blast {
    fn decompress_block(&self, block: &[u8]) -> Result<Vec<u8>, BoxError> {
        Ok(self.decompress(block)?)
    }
}

impl<D: BlockDecompressor + ?Sized> BlockDecompressor for &D {
    fn decompress_block(&self, block: &[u8]) -> Result<Vec<u8>, BoxError> {
        (**self).decompress_block(block)
    }

    fn decompress_stream(&self, data: &[u8]) -> Result<Vec<u8>, BoxError> {
        (**self).decompress_stream(data)
    }
}
