use crate::atom::AtomKind;
use crate::context::MathStyle;
use crate::token::Token;

/// Symbol commands: the atom kind and the glyph they are drawn with.
static SYMBOLS: phf::Map<&'static str, (AtomKind, &'static str)> = phf::phf_map! {
    "alpha" => (AtomKind::Mord, "α"),
    "beta" => (AtomKind::Mord, "β"),
    "gamma" => (AtomKind::Mord, "γ"),
    "delta" => (AtomKind::Mord, "δ"),
    "epsilon" => (AtomKind::Mord, "ϵ"),
    "theta" => (AtomKind::Mord, "θ"),
    "lambda" => (AtomKind::Mord, "λ"),
    "mu" => (AtomKind::Mord, "μ"),
    "pi" => (AtomKind::Mord, "π"),
    "rho" => (AtomKind::Mord, "ρ"),
    "sigma" => (AtomKind::Mord, "σ"),
    "phi" => (AtomKind::Mord, "ϕ"),
    "chi" => (AtomKind::Mord, "χ"),
    "psi" => (AtomKind::Mord, "ψ"),
    "omega" => (AtomKind::Mord, "ω"),
    "Gamma" => (AtomKind::Mord, "Γ"),
    "Delta" => (AtomKind::Mord, "Δ"),
    "Sigma" => (AtomKind::Mord, "Σ"),
    "Omega" => (AtomKind::Mord, "Ω"),
    "infty" => (AtomKind::Mord, "∞"),
    "partial" => (AtomKind::Mord, "∂"),
    "nabla" => (AtomKind::Mord, "∇"),
    "{" => (AtomKind::Mord, "{"),
    "}" => (AtomKind::Mord, "}"),
    "|" => (AtomKind::Mord, "‖"),
    "times" => (AtomKind::Mbin, "×"),
    "cdot" => (AtomKind::Mbin, "⋅"),
    "pm" => (AtomKind::Mbin, "±"),
    "mp" => (AtomKind::Mbin, "∓"),
    "div" => (AtomKind::Mbin, "÷"),
    "cup" => (AtomKind::Mbin, "∪"),
    "cap" => (AtomKind::Mbin, "∩"),
    "leq" => (AtomKind::Mrel, "≤"),
    "le" => (AtomKind::Mrel, "≤"),
    "geq" => (AtomKind::Mrel, "≥"),
    "ge" => (AtomKind::Mrel, "≥"),
    "neq" => (AtomKind::Mrel, "≠"),
    "ne" => (AtomKind::Mrel, "≠"),
    "approx" => (AtomKind::Mrel, "≈"),
    "equiv" => (AtomKind::Mrel, "≡"),
    "in" => (AtomKind::Mrel, "∈"),
    "to" => (AtomKind::Mrel, "→"),
    "rightarrow" => (AtomKind::Mrel, "→"),
    "leftarrow" => (AtomKind::Mrel, "←"),
};

static STYLES: phf::Map<&'static str, MathStyle> = phf::phf_map! {
    "displaystyle" => MathStyle::Display,
    "textstyle" => MathStyle::Text,
    "scriptstyle" => MathStyle::Script,
    "scriptscriptstyle" => MathStyle::ScriptScript,
};

/// Look up a command by its name (without the backslash).
///
/// `source` is the command as written, including the backslash; symbol tokens keep it as their
/// value so that serialization reproduces it.
pub(crate) fn get_command<'source>(name: &str, source: &'source str) -> Option<Token<'source>> {
    if name == "mathchoice" {
        return Some(Token::MathChoice);
    }
    if let Some(style) = STYLES.get(name) {
        return Some(Token::StyleSwitch(*style));
    }
    let (kind, _) = SYMBOLS.get(name)?;
    Some(Token::Symbol(source, *kind))
}

/// The atom kind of a plain character in math mode, or `None` if the character is not allowed.
pub(crate) fn char_kind(ch: char) -> Option<AtomKind> {
    match ch {
        '+' | '-' | '*' => Some(AtomKind::Mbin),
        '=' | '<' | '>' | ':' => Some(AtomKind::Mrel),
        '#' | '$' | '&' | '~' | '\\' | '%' => None,
        ch if ch.is_control() => None,
        _ => Some(AtomKind::Mord),
    }
}

/// The glyph a symbol value is drawn with: the command's glyph, or the value itself.
pub(crate) fn glyph_for(value: &str) -> &str {
    value
        .strip_prefix('\\')
        .and_then(|name| SYMBOLS.get(name))
        .map_or(value, |&(_, glyph)| glyph)
}
