//! Bounded reading of HTTP response bodies.
//!
//! Tile servers are not always honest about body sizes, so reads are bounded
//! in both directions: an advertised length is enforced exactly, and an
//! unadvertised one is drained only up to a hard cap.

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};

use crate::fetch::FetchError;

/// Reads a response body under the advertised-length contract.
///
/// When `advertised_len` is positive, exactly that many bytes are returned:
/// surplus stream data is discarded and an early end of stream is a
/// [`FetchError::Truncated`]. When it is absent or zero the stream is
/// drained to EOF, capped at `max_body_bytes`. An advertised length above
/// the cap is rejected before the stream is polled at all.
///
/// `url` is only used for error context.
pub(crate) async fn read_body<S>(
    mut stream: S,
    advertised_len: Option<u64>,
    max_body_bytes: usize,
    url: &str,
) -> Result<Bytes, FetchError>
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Unpin,
{
    match advertised_len {
        Some(len) if len > 0 => {
            if len > max_body_bytes as u64 {
                return Err(FetchError::BodyTooLarge {
                    limit: max_body_bytes,
                });
            }
            read_exact_len(&mut stream, len as usize, url).await
        }
        // Absent or zero means the server did not commit to a length.
        _ => read_to_end(&mut stream, max_body_bytes, url).await,
    }
}

/// Reads exactly `expected` bytes, discarding anything past them.
async fn read_exact_len<S>(stream: &mut S, expected: usize, url: &str) -> Result<Bytes, FetchError>
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Unpin,
{
    let mut buf = BytesMut::with_capacity(expected);

    while buf.len() < expected {
        match stream.next().await {
            Some(Ok(chunk)) => {
                let need = expected - buf.len();
                if chunk.len() > need {
                    buf.extend_from_slice(&chunk[..need]);
                } else {
                    buf.extend_from_slice(&chunk);
                }
            }
            Some(Err(e)) => {
                return Err(FetchError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
            }
            None => {
                return Err(FetchError::Truncated {
                    expected,
                    read: buf.len(),
                })
            }
        }
    }

    Ok(buf.freeze())
}

/// Drains the stream to EOF, erroring past `max_body_bytes`.
async fn read_to_end<S>(
    stream: &mut S,
    max_body_bytes: usize,
    url: &str,
) -> Result<Bytes, FetchError>
where
    S: Stream<Item = Result<Bytes, std::io::Error>> + Unpin,
{
    let mut buf = BytesMut::new();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if buf.len() + chunk.len() > max_body_bytes {
            return Err(FetchError::BodyTooLarge {
                limit: max_body_bytes,
            });
        }
        buf.extend_from_slice(&chunk);
    }

    Ok(buf.freeze())
}
