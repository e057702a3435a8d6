use math_atoms::{Context, parse_latex};

#[test]
fn main() {
    let problems = [
        ("unclosed_brace", r"{", "Expected token \"}\", but not found."),
        ("curly_close_without_open", r"x}", "Unmatched closing token: \"}\"."),
        ("unsupported_command", r"\asdf", "Unknown command \"\\asdf\"."),
        ("lone_backslash", r"x\", "Disallowed character: '\\'."),
        ("ampersand", r"x & y", "Disallowed character: '&'."),
        ("incomplete_sup", r"x^", "Expected argument but reached end of input."),
        ("sup_closed", r"{x^}", "Expected argument but got closing token \"}\"."),
        ("invalid_sup", r"x^^", "'^' or '_' directly followed by '^' or '_'."),
        ("invalid_sub_sup", r"x^_", "'^' or '_' directly followed by '^' or '_'."),
        ("sup_sup", r"x^2^3 y", "Duplicate subscript or superscript."),
        ("sub_sub", r"x_2_3 y", "Duplicate subscript or superscript."),
        (
            "style_switch_in_subscript",
            r"x_\scriptstyle y",
            "A style switch cannot be used as an argument on its own; wrap it in braces.",
        ),
        (
            "mathchoice_missing_variant",
            r"\mathchoice{A}{B}{C}",
            "Expected argument but reached end of input.",
        ),
        (
            "mathchoice_closed_early",
            r"{\mathchoice{A}{B}}",
            "Expected argument but got closing token \"}\".",
        ),
        (
            "mathchoice_unclosed_variant",
            r"\mathchoice{A}{B}{C}{D",
            "Expected token \"}\", but not found.",
        ),
    ];

    for (name, problem, message) in problems {
        let mut context = Context::default();
        let Err(error) = parse_latex(problem, &mut context) else {
            panic!("problem `{name}` did not return an error");
        };
        assert_eq!(error.error_message(), message, "{name}");

        let report = error.to_report("<input>", false);
        let mut buf = Vec::new();
        report
            .write(("<input>", ariadne::Source::from(problem)), &mut buf)
            .expect("failed to write report");
        let output = String::from_utf8(buf).expect("report should be valid UTF-8");
        assert!(output.contains(message), "{name}: {output}");
    }
}
