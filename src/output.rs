use crate::format::OutputFormat;
use std::{
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot open `{path}` for writing: {source}")]
    Unwritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// How an output file is opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Keep existing content, add after it.
    Append,
    /// Create, or truncate an existing file.
    Overwrite,
}

/// Write `content` to `path`.
///
/// When appending to a non-empty file that does not already end with the
/// format's separator, the separator is written first so the old and new word
/// lists join cleanly. Empty content writes nothing. Returns the number of
/// bytes written.
pub fn write_output(
    path: &Path,
    content: &str,
    mode: WriteMode,
    format: OutputFormat,
) -> Result<usize, OutputError> {
    let unwritable = |source| OutputError::Unwritable {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Append => options.append(true).create(true),
        WriteMode::Overwrite => options.write(true).create(true).truncate(true),
    };
    let mut file = options.open(path).map_err(unwritable)?;

    if content.is_empty() {
        debug!(path = %path.display(), ?mode, "nothing to write");
        return Ok(0);
    }

    let sep = format.separator();
    let needs_sep = mode == WriteMode::Append && needs_separator(path, sep).map_err(unwritable)?;
    let mut written = 0;
    if needs_sep {
        file.write_all(sep.as_bytes()).map_err(unwritable)?;
        written += sep.len();
    }
    file.write_all(content.as_bytes()).map_err(unwritable)?;
    written += content.len();
    debug!(path = %path.display(), ?mode, bytes = written, "wrote output");
    Ok(written)
}

/// Whether the file is non-empty and does not end with `sep`.
fn needs_separator(path: &Path, sep: &str) -> io::Result<bool> {
    let mut file = File::open(path)?;
    let len = file.metadata()?.len();
    if len == 0 {
        return Ok(false);
    }
    let n = (sep.len() as u64).min(len);
    file.seek(SeekFrom::End(-(n as i64)))?;
    let mut tail = Vec::with_capacity(n as usize);
    file.take(n).read_to_end(&mut tail)?;
    Ok(tail != sep.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("textproc-output-{}-{name}", std::process::id()))
    }

    #[test]
    fn overwrite_truncates() {
        let path = temp_path("overwrite.csv");
        fs::write(&path, "old, content, that, is, long").unwrap();
        write_output(&path, "new", WriteMode::Overwrite, OutputFormat::Csv).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn append_adds_one_separator() {
        let path = temp_path("append.csv");
        fs::write(&path, "alpha, beta").unwrap();
        let n = write_output(&path, "gamma", WriteMode::Append, OutputFormat::Csv).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alpha, beta, gamma");
        assert_eq!(n, ", gamma".len());
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn append_after_trailing_separator_adds_none() {
        let path = temp_path("append.txt");
        fs::write(&path, "alpha\n").unwrap();
        write_output(&path, "beta", WriteMode::Append, OutputFormat::Txt).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "alpha\nbeta");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn append_to_missing_file_creates_it() {
        let path = temp_path("fresh.txt");
        let _ = fs::remove_file(&path);
        write_output(&path, "a\nb", WriteMode::Append, OutputFormat::Txt).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn empty_content_appends_nothing() {
        let path = temp_path("empty.csv");
        fs::write(&path, "kept").unwrap();
        assert_eq!(
            write_output(&path, "", WriteMode::Append, OutputFormat::Csv).unwrap(),
            0
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "kept");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unwritable_destination() {
        let path = temp_path("no-such-dir").join("out.csv");
        let err = write_output(&path, "x", WriteMode::Overwrite, OutputFormat::Csv).unwrap_err();
        assert!(matches!(err, OutputError::Unwritable { .. }));
    }
}
