use memchr::memchr_iter;

/// Size, line and word counts shown before processing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub size_bytes: u64,
    pub lines: usize,
    pub words: usize,
}

impl SourceStats {
    pub fn measure(size_bytes: u64, text: &str) -> Self {
        Self {
            size_bytes,
            lines: count_lines(text),
            words: count_words(text),
        }
    }

    pub fn human_size(&self) -> String {
        human_size(self.size_bytes)
    }
}

/// Number of `\n` characters, like `wc -l`.
pub fn count_lines(text: &str) -> usize {
    memchr_iter(b'\n', text.as_bytes()).count()
}

/// Number of whitespace-separated segments, like `wc -w`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `1536` → `1.50 Kbytes`.
pub fn human_size(size: u64) -> String {
    const UNITS: [&str; 8] = ["", "K", "M", "G", "T", "P", "E", "Z"];
    let mut size = size as f64;
    for unit in UNITS {
        if size.abs() < 1024.0 {
            return format!("{size:.2} {unit}bytes");
        }
        size /= 1024.0;
    }
    format!("{size:.2} Ybytes")
}
