//! Progress notifications.
//!
//! The codec reports human-readable status strings at fixed milestones
//! (frequencies counted, tree built, table built, header written or read,
//! content written or decoded). Sinks are purely observational: nothing they
//! do affects control flow or output.
//!
//! Any `FnMut(&str)` closure is a sink:
//! ```
//! use huffpack_core::progress::ProgressSink;
//!
//! let mut lines = Vec::new();
//! let mut sink = |msg: &str| lines.push(msg.to_string());
//! sink.update("Finished building Huffman tree");
//! assert_eq!(lines, ["Finished building Huffman tree"]);
//! ```

/// Receiver for status strings.
pub trait ProgressSink {
    fn update(&mut self, message: &str);
}

impl<F: FnMut(&str)> ProgressSink for F {
    fn update(&mut self, message: &str) {
        self(message)
    }
}

/// Discards every message.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl ProgressSink for Silent {
    fn update(&mut self, _message: &str) {}
}

/// Keeps every message, in order.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub messages: Vec<String>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any recorded message starts with `prefix`.
    pub fn saw(&self, prefix: &str) -> bool {
        self.messages.iter().any(|m| m.starts_with(prefix))
    }
}

impl ProgressSink for Recorder {
    fn update(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn notify(sink: &mut dyn ProgressSink) {
        sink.update("one");
        sink.update("two");
    }

    #[test]
    fn test_recorder_keeps_order() {
        let mut recorder = Recorder::new();
        notify(&mut recorder);

        assert_eq!(recorder.messages, vec!["one", "two"]);
        assert!(recorder.saw("tw"));
        assert!(!recorder.saw("three"));
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        notify(&mut |_: &str| count += 1);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_silent() {
        notify(&mut Silent);
    }
}
