use std::error::Error;
use std::io;
use std::path::{Path, PathBuf};

use bytes::BytesMut;
use futures::TryStreamExt;
use indicatif::ProgressBar;
use reqwest::Body;
use tokio::fs::File;
use tokio_util::codec::{BytesCodec, FramedRead};

/// A local file prepared for transfer to a dataset.
///
/// The file content is not read eagerly; `create_body` opens it and
/// streams it chunk-wise into the request, advancing the attached
/// progress bar as bytes go out.
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// The name the file is registered under on the remote side.
    pub name: String,
    /// Where the file content lives on disk.
    pub path: PathBuf,
    /// The size of the file in bytes.
    pub size: u64,
}

impl UploadFile {
    /// Creates an `UploadFile` from a local path, using the basename as
    /// the remote name.
    ///
    /// # Arguments
    /// * `path` - The path to the local file.
    ///
    /// # Returns
    /// A `Result` containing the `UploadFile` or the I/O error raised
    /// while reading the file metadata.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(UploadFile {
            name,
            path: path.to_path_buf(),
            size,
        })
    }

    /// Creates an `UploadFile` with an explicit remote name.
    pub fn with_name(path: impl AsRef<Path>, name: impl Into<String>) -> io::Result<Self> {
        let mut file = Self::from_path(path)?;
        file.name = name.into();
        Ok(file)
    }

    /// Creates a streaming request `Body` from the file.
    ///
    /// # Arguments
    /// * `pb` - A progress bar to track the transfer.
    ///
    /// # Returns
    /// A `Result` containing the `Body` or an error.
    pub async fn create_body(self, pb: ProgressBar) -> Result<Body, Box<dyn Error>> {
        let file = File::open(&self.path).await?;
        let stream = FramedRead::new(file, BytesCodec::new())
            .inspect_ok(move |chunk: &BytesMut| pb.inc(chunk.len() as u64))
            .map_ok(BytesMut::freeze);

        Ok(Body::wrap_stream(stream))
    }
}
