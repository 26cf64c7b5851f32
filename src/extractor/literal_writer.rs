use crate::error::{Result, SeqRipError};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Writes values as `"VALUE",` lines, one per entry.
///
/// Values are inserted verbatim. A value containing `"` or `\` produces a line
/// that is not a valid escaped literal; see [`needs_escaping`].
pub struct LiteralWriter {
    buffer_size: usize,
}

impl LiteralWriter {
    pub fn new() -> Self {
        Self {
            buffer_size: 64 * 1024, // 64KB buffer
        }
    }

    /// Creates or truncates `path` and writes every value to it.
    ///
    /// Returns the number of bytes written.
    pub fn write_file(&self, values: &[String], path: &Path) -> Result<u64> {
        let to_output_error = |source: io::Error| SeqRipError::OutputNotWritable {
            path: path.display().to_string(),
            source,
        };

        let file = fs::File::create(path).map_err(to_output_error)?;
        let mut writer = BufWriter::with_capacity(self.buffer_size, file);

        let written = self.write_to(values, &mut writer).map_err(to_output_error)?;
        writer.flush().map_err(to_output_error)?;

        Ok(written)
    }

    pub fn write_to<W: Write>(&self, values: &[String], writer: &mut W) -> io::Result<u64> {
        let mut written = 0u64;
        for value in values {
            writeln!(writer, "\"{}\",", value)?;
            written += value.len() as u64 + 4;
        }
        Ok(written)
    }
}

impl Default for LiteralWriter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn render_literals(values: &[String]) -> String {
    values.iter().map(|v| format!("\"{}\",\n", v)).collect()
}

/// True when writing `value` verbatim would not form a valid quoted literal.
pub fn needs_escaping(value: &str) -> bool {
    value.contains('"') || value.contains('\\')
}
