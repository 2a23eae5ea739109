use std::mem;

// Concatenates folded header lines
#[derive(Default)]
pub(crate) struct HeaderBuffer {
    has_value: bool,
    line: Vec<u8>,
}

impl HeaderBuffer {
    // Add an incoming line, without its line ending, and retrieve the previous
    // line once it is known to be complete.
    // Returns Err(()) for a continuation line that has nothing to continue.
    pub(crate) fn next_line(&mut self, line: &[u8]) -> Result<Option<Vec<u8>>, ()> {
        let is_continuation = line.starts_with(b" ") || line.starts_with(b"\t");
        if is_continuation {
            if !self.has_value {
                return Err(());
            }
            self.line.extend_from_slice(line);
            Ok(None)
        } else if !self.has_value {
            self.line = line.to_vec();
            self.has_value = true;
            Ok(None)
        } else {
            Ok(Some(mem::replace(&mut self.line, line.to_vec())))
        }
    }

    // Get the remaining contents of the buffer and clear the buffer
    pub(crate) fn take(&mut self) -> Option<Vec<u8>> {
        if self.has_value {
            self.has_value = false;
            Some(mem::take(&mut self.line))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfolds_continuations() {
        let mut buffer = HeaderBuffer::default();
        assert_eq!(buffer.next_line(b"Content-Type: multipart/mixed;"), Ok(None));
        assert_eq!(buffer.next_line(b"  boundary=\"b1\""), Ok(None));
        assert_eq!(
            buffer.next_line(b"Subject: hi"),
            Ok(Some(b"Content-Type: multipart/mixed;  boundary=\"b1\"".to_vec()))
        );
        assert_eq!(buffer.take(), Some(b"Subject: hi".to_vec()));
        assert_eq!(buffer.take(), None);
    }

    #[test]
    fn leading_continuation() {
        let mut buffer = HeaderBuffer::default();
        assert_eq!(buffer.next_line(b"\tdangling"), Err(()));
    }
}
