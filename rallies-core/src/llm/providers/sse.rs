//! Minimal server-sent-events framing shared by the streaming providers

/// Accumulates raw body chunks and hands back complete `data:` payloads
#[derive(Debug, Default)]
pub(crate) struct SseBuffer {
    buffer: Vec<u8>,
}

impl SseBuffer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and drain every complete event's data payloads.
    ///
    /// Bytes are only decoded once a whole event has arrived, so a
    /// multi-byte character split across chunks survives intact.
    pub(crate) fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer
            .extend(chunk.iter().copied().filter(|byte| *byte != b'\r'));

        let mut payloads = Vec::new();
        while let Some(split_idx) = find_event_end(&self.buffer) {
            let event: Vec<u8> = self.buffer.drain(..split_idx + 2).collect();
            payloads.extend(data_lines(&decode(event)));
        }
        payloads
    }

    /// Payloads left over once the body ends without a trailing blank line
    pub(crate) fn finish(&mut self) -> Vec<String> {
        let rest = std::mem::take(&mut self.buffer);
        data_lines(&decode(rest))
    }
}

fn find_event_end(buffer: &[u8]) -> Option<usize> {
    buffer.windows(2).position(|pair| pair == b"\n\n")
}

fn decode(event: Vec<u8>) -> String {
    String::from_utf8(event).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "invalid UTF-8 in event stream");
        String::from_utf8_lossy(e.as_bytes()).into_owned()
    })
}

fn data_lines(event: &str) -> Vec<String> {
    event
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(str::trim)
        .filter(|data| !data.is_empty() && *data != "[DONE]")
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_split_across_chunks_are_reassembled() {
        let mut sse = SseBuffer::new();
        assert!(sse.push(b"event: delta\ndata: {\"a\":").is_empty());
        let payloads = sse.push(b"1}\n\ndata: {\"b\":2}\n\n");
        assert_eq!(payloads, vec!["{\"a\":1}", "{\"b\":2}"]);
    }

    #[test]
    fn done_marker_and_comments_are_skipped() {
        let mut sse = SseBuffer::new();
        let payloads = sse.push(b": keep-alive\n\ndata: [DONE]\n\n");
        assert!(payloads.is_empty());
    }

    #[test]
    fn multibyte_characters_split_across_chunks_survive() {
        let event = "data: {\"delta\":\"café €5\"}\n\n".as_bytes();
        let split = event.iter().position(|byte| *byte == 0xC3).unwrap() + 1;

        let mut sse = SseBuffer::new();
        assert!(sse.push(&event[..split]).is_empty());
        let payloads = sse.push(&event[split..]);
        assert_eq!(payloads, vec!["{\"delta\":\"café €5\"}"]);
    }

    #[test]
    fn crlf_framing_is_accepted() {
        let mut sse = SseBuffer::new();
        assert!(sse.push(b"data: {\"d\":4}\r").is_empty());
        assert_eq!(sse.push(b"\n\r\n"), vec!["{\"d\":4}"]);
    }

    #[test]
    fn trailing_event_is_flushed_on_finish() {
        let mut sse = SseBuffer::new();
        assert!(sse.push(b"data: {\"c\":3}").is_empty());
        assert_eq!(sse.finish(), vec!["{\"c\":3}"]);
    }
}
