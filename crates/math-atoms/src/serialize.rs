use crate::atom::Atom;

/// Options for turning atoms back into LaTeX.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Leave out style switches like `\scriptstyle`.
    pub skip_styles: bool,
}

/// Serialize a list of atoms to LaTeX.
pub fn serialize_list(atoms: &[Atom], options: SerializeOptions) -> String {
    let mut out = String::new();
    for atom in atoms {
        append_latex(&mut out, &atom.serialize(options));
    }
    out
}

/// Append `atoms` as a braced command argument.
///
/// An argument holding nothing but a styled group is written as that group, since its braces
/// already delimit the argument.
pub(crate) fn append_argument(out: &mut String, atoms: &[Atom], options: SerializeOptions) {
    let mut content = atoms.iter().filter(|atom| !atom.is_first());
    if let (Some(Atom::Group(group)), None) = (content.next(), content.next())
        && group.style_command(options).is_some()
    {
        out.push_str(&group.serialize(options));
        return;
    }
    out.push('{');
    out.push_str(&serialize_list(atoms, options));
    out.push('}');
}

/// Append `fragment` to `out`, separating a trailing control word from a following letter.
pub(crate) fn append_latex(out: &mut String, fragment: &str) {
    if fragment.starts_with(|ch: char| ch.is_ascii_alphabetic()) && ends_with_control_word(out) {
        out.push(' ');
    }
    out.push_str(fragment);
}

fn ends_with_control_word(s: &str) -> bool {
    let letters = s.trim_end_matches(|ch: char| ch.is_ascii_alphabetic());
    letters.len() < s.len() && letters.ends_with('\\') && !ends_with_escaped_backslash(letters)
}

/// Whether `s` ends in `\\`, i.e. an escaped backslash rather than the start of a command.
fn ends_with_escaped_backslash(s: &str) -> bool {
    let count = s.bytes().rev().take_while(|&b| b == b'\\').count();
    count % 2 == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_words_are_separated() {
        let cases = [
            (r"\alpha", "x", r"\alpha x"),
            (r"\alpha", "2", r"\alpha2"),
            (r"\alpha", r"\beta", r"\alpha\beta"),
            ("x", "y", "xy"),
            (r"\,", "x", r"\,x"),
            (r"a\\", "x", r"a\\x"),
            ("", "x", "x"),
        ];
        for (head, fragment, expected) in cases {
            let mut out = head.to_string();
            append_latex(&mut out, fragment);
            assert_eq!(out, expected, "{head:?} + {fragment:?}");
        }
    }
}
