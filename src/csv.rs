// src/csv.rs
use std::io::{self, Write};

fn needs_quotes(field: &str, sep: char) -> bool {
    field.contains(sep) || field.contains('"') || field.contains('\n') || field.contains('\r')
}

/// Write a single CSV/TSV row to any writer.
pub fn write_row<W: Write, S: AsRef<str>>(mut w: W, row: &[S], sep: char) -> io::Result<()> {
    for (i, cell) in row.iter().enumerate() {
        if i > 0 {
            write!(w, "{sep}")?;
        }
        let cell = cell.as_ref();
        if needs_quotes(cell, sep) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(row: &[&str]) -> String {
        let mut buf = Vec::new();
        write_row(&mut buf, row, ',').unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_and_quoted_fields() {
        assert_eq!(line(&["a", "b"]), "a,b\n");
        assert_eq!(line(&["Editor: A, B", "say \"hi\""]), "\"Editor: A, B\",\"say \"\"hi\"\"\"\n");
        assert_eq!(line(&[]), "\n");
    }
}
