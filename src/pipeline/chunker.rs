use crate::config::EXTRACTION_CHUNK_CHARS;

/// Line-bounded chunker for completion requests.
///
/// Whole lines are packed into a chunk while the chunk, including the `\n`
/// that joins two lines, stays within `max_chars` characters. A line that is
/// longer than the budget on its own is never split; it becomes its own
/// oversized chunk. Joining the output with `\n` gives back the input exactly.
#[derive(Debug, Clone, Copy)]
pub struct LineChunker {
    max_chars: usize,
}

impl LineChunker {
    pub fn new(max_chars: usize) -> Self {
        Self { max_chars }
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    pub fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        // (content, length in chars)
        let mut current: Option<(String, usize)> = None;

        for line in text.split('\n') {
            let line_chars = line.chars().count();
            current = match current.take() {
                None => Some((line.to_string(), line_chars)),
                Some((mut acc, acc_chars)) if acc_chars + 1 + line_chars <= self.max_chars => {
                    acc.push('\n');
                    acc.push_str(line);
                    Some((acc, acc_chars + 1 + line_chars))
                }
                Some((acc, _)) => {
                    chunks.push(acc);
                    Some((line.to_string(), line_chars))
                }
            };
        }

        if let Some((acc, _)) = current {
            chunks.push(acc);
        }

        chunks
    }
}

impl Default for LineChunker {
    fn default() -> Self {
        Self::new(EXTRACTION_CHUNK_CHARS)
    }
}
