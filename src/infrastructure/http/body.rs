//! Bounded request body reading
//!
//! The body is never buffered past `server.max_request_size`: a declared
//! `Content-Length` above the limit is refused without reading, and a
//! streamed body stops being read as soon as it crosses the limit.

use bytes::{Buf, BufMut, Bytes, BytesMut};
use futures::{Stream, StreamExt};
use tracing::warn;
use warp::Filter;

/// Request body as seen by the request handler
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Complete(Bytes),
    /// Reading stopped once `received` bytes exceeded the limit
    Oversized { received: usize },
}

/// The body stream failed before it was complete
#[derive(Debug)]
pub struct BodyReadFailed;

impl warp::reject::Reject for BodyReadFailed {}

/// Filter extracting at most `limit` body bytes
pub fn bounded_body(
    limit: usize,
) -> impl Filter<Extract = (RequestBody,), Error = warp::Rejection> + Clone {
    warp::header::optional::<u64>("content-length")
        .and(warp::body::stream())
        .and(warp::any().map(move || limit))
        .and_then(read_bounded)
}

async fn read_bounded<S, B>(
    declared: Option<u64>,
    stream: S,
    limit: usize,
) -> Result<RequestBody, warp::Rejection>
where
    S: Stream<Item = Result<B, warp::Error>>,
    B: Buf,
{
    if let Some(declared) = declared {
        if declared > limit as u64 {
            return Ok(RequestBody::Oversized {
                received: usize::try_from(declared).unwrap_or(usize::MAX),
            });
        }
    }

    futures::pin_mut!(stream);
    let mut buffer = BytesMut::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            warn!("Failed to read request body: {}", e);
            warp::reject::custom(BodyReadFailed)
        })?;
        let received = buffer.len() + chunk.remaining();
        if received > limit {
            return Ok(RequestBody::Oversized { received });
        }
        buffer.put(chunk);
    }
    Ok(RequestBody::Complete(buffer.freeze()))
}
