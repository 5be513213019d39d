// src/core/sanitize.rs

/// Replace every whitespace run that contains a line break with one space,
/// then trim. Runs without a line break are left alone.
pub fn flatten_lines(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut run = String::new();

    fn flush(run: &mut String, out: &mut String) {
        if run.contains(['\n', '\r']) {
            out.push(' ');
        } else {
            out.push_str(run);
        }
        run.clear();
    }

    for ch in s.chars() {
        if ch.is_whitespace() {
            run.push(ch);
        } else {
            if !run.is_empty() {
                flush(&mut run, &mut out);
            }
            out.push(ch);
        }
    }
    if !run.is_empty() {
        flush(&mut run, &mut out);
    }
    out.trim().to_string()
}

/// Final `/`-delimited segment of a URL or path; empty for a trailing slash.
pub fn last_path_segment(s: &str) -> &str {
    s.rsplit('/').next().unwrap_or("")
}
