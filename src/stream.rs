//! Asynchronous event decoding.
//!
//! [`EventStream`] adapts the same [`crate::event::DecoderCore`] state
//! machine as the synchronous iterator to an asynchronous line source, so
//! the two interfaces emit identical event sequences for identical input.
//! The stream suspends at each upstream read and holds nothing but the
//! driver stack; dropping it releases everything.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_core::Stream;

use crate::event::{DecoderCore, Event};
use crate::{Error, Result};

/// Asynchronous event stream returned by [`crate::decode_stream`].
///
/// Yields `Result<Event>` items; after the first error the stream ends.
///
/// # Examples
///
/// ```rust
/// use futures::{executor::block_on, stream, StreamExt};
/// use toon_codec::{decode_stream, DecodeOptions, Event};
///
/// let lines = stream::iter(vec!["a: 1".to_string()]);
/// let events: Vec<_> = block_on(
///     decode_stream(lines, &DecodeOptions::new())
///         .unwrap()
///         .collect::<Vec<_>>(),
/// );
/// assert_eq!(events.len(), 4); // StartObject, Key, Primitive, EndObject
/// ```
pub struct EventStream<S> {
    core: DecoderCore,
    lines: S,
    pending_error: Option<Error>,
    done: bool,
}

impl<S> EventStream<S> {
    pub(crate) fn new(core: DecoderCore, lines: S) -> Self {
        EventStream {
            core,
            lines,
            pending_error: None,
            done: false,
        }
    }
}

impl<S, T> Stream for EventStream<S>
where
    S: Stream<Item = T> + Unpin,
    T: AsRef<str>,
{
    type Item = Result<Event>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            if let Some(event) = this.core.pop_event() {
                return Poll::Ready(Some(Ok(event)));
            }
            if let Some(err) = this.pending_error.take() {
                this.done = true;
                return Poll::Ready(Some(Err(err)));
            }
            if this.done {
                return Poll::Ready(None);
            }
            match Pin::new(&mut this.lines).poll_next(cx) {
                Poll::Pending => return Poll::Pending,
                Poll::Ready(Some(line)) => {
                    if let Err(err) = this.core.feed_line(line.as_ref()) {
                        this.pending_error = Some(err);
                    }
                }
                Poll::Ready(None) => {
                    if let Err(err) = this.core.finish() {
                        this.pending_error = Some(err);
                    } else {
                        this.done = true;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{decode_stream, decode_stream_sync, DecodeOptions, PathExpansion};
    use futures::executor::block_on;
    use futures::stream;
    use futures::StreamExt;

    fn sync_events(lines: &[&str]) -> Vec<Result<Event>> {
        decode_stream_sync(lines.iter(), &DecodeOptions::new())
            .unwrap()
            .collect()
    }

    fn async_events(lines: &[&str]) -> Vec<Result<Event>> {
        let source = stream::iter(lines.iter().map(|l| l.to_string()).collect::<Vec<_>>());
        block_on(
            decode_stream(source, &DecodeOptions::new())
                .unwrap()
                .collect::<Vec<_>>(),
        )
    }

    #[test]
    fn async_matches_sync() {
        let inputs: Vec<Vec<&str>> = vec![
            vec![],
            vec!["42"],
            vec!["name: Alice", "age: 30"],
            vec!["users[2]{id,name}:", "  1,Alice", "  2,Bob"],
            vec!["items[2]:", "  - Apple", "  - Banana"],
            vec!["user:", "  profile:", "    theme: dark"],
        ];
        for lines in inputs {
            assert_eq!(sync_events(&lines), async_events(&lines), "{:?}", lines);
        }
    }

    #[test]
    fn async_halts_on_error() {
        let events = async_events(&["items[3]: a,b"]);
        let errors: Vec<_> = events.iter().filter(|e| e.is_err()).collect();
        assert_eq!(errors.len(), 1);
        assert!(matches!(
            events.last().unwrap(),
            Err(Error::LengthMismatch { .. })
        ));
    }

    #[test]
    fn expand_paths_is_rejected() {
        let source = stream::iter(Vec::<String>::new());
        let options = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
        assert!(matches!(
            decode_stream(source, &options),
            Err(Error::UnsupportedOption(_))
        ));
    }
}
