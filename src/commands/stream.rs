use std::io::{self, Write};

use rapt::{Operation, OutputSource};

/// Copy an operation's output to the terminal until it completes, then
/// return its terminal result.
pub(crate) async fn pump<T>(mut op: Operation<T>) -> rapt::Result<T> {
    while let Some(chunk) = op.next_chunk().await {
        match chunk.source {
            OutputSource::Stdout => {
                let mut out = io::stdout();
                let _ = out.write_all(&chunk.data);
                let _ = out.flush();
            }
            OutputSource::Stderr => {
                let mut err = io::stderr();
                let _ = err.write_all(&chunk.data);
                let _ = err.flush();
            }
        }
    }
    op.wait().await
}
