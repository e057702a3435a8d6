const INDENT: &str = "  ";

/// Start a new line at the given depth. Depth 0 is the first line and gets no line break.
pub(crate) fn new_line_and_indent(s: &mut String, indent_num: usize) {
    if indent_num > 0 {
        s.push('\n');
    }
    for _ in 0..indent_num {
        s.push_str(INDENT);
    }
}
