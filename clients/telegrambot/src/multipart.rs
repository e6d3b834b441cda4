//! Streaming `multipart/form-data` bodies.
//!
//! Text fields go into a `reqwest` form directly. Each attachment becomes a
//! streamed part fed through a bounded in-process pipe by one background task,
//! so attachment size does not matter. A read error inside the task is pushed
//! into the pipe and fails the request instead of the process.

use std::fmt;
use std::io;

use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Body;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

use crate::form::FormField;

/// Chunks buffered between the background task and each file part.
const PIPE_CAPACITY: usize = 4;
const CHUNK_SIZE: usize = 8 * 1024;
const DEFAULT_MIME: &str = "application/octet-stream";

type BodyChunk = io::Result<Bytes>;

/// A file attached to a multipart command.
pub struct SendFile {
    field: String,
    filename: String,
    mime: String,
    reader: Box<dyn AsyncRead + Send + Unpin>,
}

impl SendFile {
    /// Attaches the contents of `reader` as form field `field`.
    pub fn new(
        field: impl Into<String>,
        filename: impl Into<String>,
        reader: impl AsyncRead + Send + Unpin + 'static,
    ) -> Self {
        Self {
            field: field.into(),
            filename: filename.into(),
            mime: DEFAULT_MIME.to_string(),
            reader: Box::new(reader),
        }
    }

    /// Attaches an in-memory buffer.
    pub fn from_bytes(
        field: impl Into<String>,
        filename: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self::new(field, filename, io::Cursor::new(bytes.into()))
    }

    /// Content type of the part, `application/octet-stream` unless set.
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = mime.into();
        self
    }
}

impl fmt::Debug for SendFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SendFile")
            .field("field", &self.field)
            .field("filename", &self.filename)
            .field("mime", &self.mime)
            .finish_non_exhaustive()
    }
}

/// Sending half of a file part's pipe, with the reader that fills it.
struct FilePipe {
    field: String,
    reader: Box<dyn AsyncRead + Send + Unpin>,
    tx: mpsc::Sender<BodyChunk>,
}

/// Builds the form: text fields in order, then one streamed part per file.
///
/// The background task feeding the file parts is started here; it waits on
/// the pipes until the request body is read.
pub(crate) fn build_form(
    fields: Vec<FormField>,
    files: Vec<SendFile>,
) -> Result<Form, reqwest::Error> {
    let mut form = fields
        .into_iter()
        .fold(Form::new(), |form, (name, value)| {
            form.text(name, value.to_string())
        });

    let mut pipes = Vec::with_capacity(files.len());
    for file in files {
        let (tx, rx) = mpsc::channel(PIPE_CAPACITY);
        let part = Part::stream(Body::wrap_stream(ReceiverStream::new(rx)))
            .file_name(file.filename)
            .mime_str(&file.mime)?;
        form = form.part(file.field.clone(), part);
        pipes.push(FilePipe {
            field: file.field,
            reader: file.reader,
            tx,
        });
    }

    if !pipes.is_empty() {
        tokio::spawn(feed_files(pipes));
    }
    Ok(form)
}

/// Copies every file into its pipe in form order. Dropping a sender ends its part.
async fn feed_files(pipes: Vec<FilePipe>) {
    for mut pipe in pipes {
        match copy_into_pipe(&mut pipe.reader, &pipe.tx).await {
            Ok(copied) => {
                tracing::trace!(field = %pipe.field, bytes = copied, "encoded form file");
            }
            Err(err) if err.kind() == io::ErrorKind::BrokenPipe => {
                tracing::debug!(field = %pipe.field, "request body dropped before the form was complete");
                return;
            }
            Err(err) => {
                tracing::warn!(field = %pipe.field, error = %err, "reading attachment failed, aborting request body");
                // Nothing to report to if the reader is already gone.
                let _ = pipe.tx.send(Err(err)).await;
                return;
            }
        }
    }
}

async fn copy_into_pipe<R>(reader: &mut R, tx: &mpsc::Sender<BodyChunk>) -> io::Result<u64>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut copied = 0u64;
    let mut buf = vec![0u8; CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            return Ok(copied);
        }
        tx.send(Ok(Bytes::copy_from_slice(&buf[..n])))
            .await
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "request body reader closed"))?;
        copied += n as u64;
    }
}
