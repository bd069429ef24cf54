//! Adapts a [`Connection`] into a lazy stream of frames.

use futures_util::stream::{self, Stream};
use turnwire_transport::Connection;

use crate::{Frame, FrameAssembler};

struct State<'a, C> {
    conn: &'a C,
    assembler: FrameAssembler,
    failed: bool,
}

/// Returns a stream of complete frames read from `conn`.
///
/// The stream pulls bytes from the connection only when no buffered frame
/// is ready. It ends when the peer closes the connection; a transport
/// error is yielded once as `Err` and then the stream ends too. Bytes of
/// a frame left incomplete at end of stream are discarded.
pub fn frame_stream<C: Connection>(
    conn: &C,
) -> impl Stream<Item = Result<Frame, C::Error>> + '_ {
    let state = State {
        conn,
        assembler: FrameAssembler::new(),
        failed: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(frame) = state.assembler.next_frame() {
                return Some((Ok(frame), state));
            }
            if state.failed {
                return None;
            }
            match state.conn.recv().await {
                Ok(Some(bytes)) => state.assembler.push(&bytes),
                Ok(None) => {
                    let leftover = state.assembler.buffered_len();
                    if leftover > 0 {
                        tracing::debug!(
                            conn = %state.conn.id(),
                            leftover,
                            "stream ended inside a frame"
                        );
                    }
                    return None;
                }
                Err(e) => {
                    state.failed = true;
                    return Some((Err(e), state));
                }
            }
        }
    })
}
