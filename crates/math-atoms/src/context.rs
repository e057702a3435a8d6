use rustc_hash::FxHashMap;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

use crate::atom::{AtomBase, AtomId, AtomKind};
use crate::layout::{Dimension, LayoutBox};

/// The eight TeX math styles.
///
/// The discriminant is the style id used by `\mathchoice`: consecutive pairs (a style and its
/// cramped variant) share one id bucket, so `id() / 2` is 0 for display, 1 for text, 2 for
/// script and 3 for scriptscript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[strum(serialize_all = "kebab-case")]
#[repr(u8)]
pub enum MathStyle {
    Display = 0,
    DisplayCramped,
    #[default]
    Text,
    TextCramped,
    Script,
    ScriptCramped,
    ScriptScript,
    ScriptScriptCramped,
}

static_assertions::assert_eq_size!(MathStyle, u8);

impl MathStyle {
    const ALL: [MathStyle; 8] = [
        MathStyle::Display,
        MathStyle::DisplayCramped,
        MathStyle::Text,
        MathStyle::TextCramped,
        MathStyle::Script,
        MathStyle::ScriptCramped,
        MathStyle::ScriptScript,
        MathStyle::ScriptScriptCramped,
    ];

    /// The numeric style id, always in `0..=7`.
    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<MathStyle> {
        Self::ALL.get(usize::from(id)).copied()
    }

    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }

    #[inline]
    pub fn is_cramped(self) -> bool {
        self.id() % 2 == 1
    }

    /// The style of a superscript set in this style.
    pub fn sup(self) -> MathStyle {
        match self {
            MathStyle::Display | MathStyle::Text => MathStyle::Script,
            MathStyle::DisplayCramped | MathStyle::TextCramped => MathStyle::ScriptCramped,
            MathStyle::Script | MathStyle::ScriptScript => MathStyle::ScriptScript,
            MathStyle::ScriptCramped | MathStyle::ScriptScriptCramped => {
                MathStyle::ScriptScriptCramped
            }
        }
    }

    /// The style of a subscript set in this style. Subscripts are always cramped.
    pub fn sub(self) -> MathStyle {
        match self {
            MathStyle::Display
            | MathStyle::DisplayCramped
            | MathStyle::Text
            | MathStyle::TextCramped => MathStyle::ScriptCramped,
            MathStyle::Script
            | MathStyle::ScriptCramped
            | MathStyle::ScriptScript
            | MathStyle::ScriptScriptCramped => MathStyle::ScriptScriptCramped,
        }
    }

    pub fn cramp(self) -> MathStyle {
        // Every uncramped style has an even id and its cramped variant directly follows it.
        Self::ALL[usize::from(self.id() | 1)]
    }

    /// Font size relative to text size, in thousandths.
    pub fn size_factor(self) -> Dimension {
        match self.id() / 2 {
            0 | 1 => 1000,
            2 => 700,
            _ => 500,
        }
    }

    /// The LaTeX command that switches to this style, if there is one.
    ///
    /// Cramped styles cannot be selected explicitly in LaTeX.
    pub fn command(self) -> Option<&'static str> {
        match self {
            MathStyle::Display => Some(r"\displaystyle"),
            MathStyle::Text => Some(r"\textstyle"),
            MathStyle::Script => Some(r"\scriptstyle"),
            MathStyle::ScriptScript => Some(r"\scriptscriptstyle"),
            _ => None,
        }
    }
}

/// State shared by everything that builds or renders atoms.
///
/// The context hands out atom ids, carries the current math style and remembers which atoms
/// have been bound to a rendered box.
#[derive(Debug, Default)]
pub struct Context {
    mathstyle: MathStyle,
    next_id: u32,
    bindings: FxHashMap<AtomId, AtomKind>,
}

impl Context {
    pub fn new(mathstyle: MathStyle) -> Self {
        Context {
            mathstyle,
            next_id: 0,
            bindings: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn mathstyle(&self) -> MathStyle {
        self.mathstyle
    }

    pub fn set_mathstyle(&mut self, mathstyle: MathStyle) {
        self.mathstyle = mathstyle;
    }

    /// Run `f` with the math style temporarily switched to `mathstyle`.
    pub fn with_mathstyle<R>(&mut self, mathstyle: MathStyle, f: impl FnOnce(&mut Self) -> R) -> R {
        let old = std::mem::replace(&mut self.mathstyle, mathstyle);
        let result = f(self);
        self.mathstyle = old;
        result
    }

    pub(crate) fn next_atom_id(&mut self) -> AtomId {
        let id = AtomId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Associate `layout_box` with the atom described by `base`.
    pub fn bind(&mut self, base: &AtomBase, mut layout_box: LayoutBox) -> LayoutBox {
        layout_box.atom_id = Some(base.id());
        self.bindings.insert(base.id(), base.kind());
        layout_box
    }

    #[inline]
    pub fn is_bound(&self, id: AtomId) -> bool {
        self.bindings.contains_key(&id)
    }

    /// The kind of the atom that was bound under `id`, if any.
    pub fn bound_kind(&self, id: AtomId) -> Option<AtomKind> {
        self.bindings.get(&id).copied()
    }

    /// Forget all bindings, e.g. before rendering the tree again.
    pub fn clear_bindings(&mut self) {
        self.bindings.clear();
    }
}
