//! Layout boxes and the list box-building primitive.
//!
//! Metrics are simple: every glyph has the same advance width and height, scaled by
//! the size of the current math style. What matters to callers is the box tree itself and the
//! atoms bound to it.

use std::fmt::Write;

use crate::atom::{Atom, AtomId, Caret};
use crate::context::{Context, MathStyle};
use crate::fmt::new_line_and_indent;

/// A length in thousandths of an em.
pub type Dimension = i32;

const GLYPH_WIDTH: Dimension = 500;
const GLYPH_HEIGHT: Dimension = 700;
const GLYPH_DEPTH: Dimension = 200;
const SUP_SHIFT: Dimension = 350;
const SUB_SHIFT: Dimension = 150;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoxContent {
    /// Zero-width box, used where an atom has no ink but the caret must still be placeable.
    Strut,
    /// A run of text set in one font.
    Glyph(String),
    /// Children placed left to right.
    Row(Vec<LayoutBox>),
    /// Children stacked on top of each other, each at its own vertical shift.
    Stack(Vec<LayoutBox>),
}

/// The positioned rendering primitive produced from one or more atoms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutBox {
    pub content: BoxContent,
    pub width: Dimension,
    pub height: Dimension,
    pub depth: Dimension,
    /// Vertical offset relative to the parent's baseline; positive values move the box down.
    pub shift: Dimension,
    pub caret: Option<Caret>,
    /// The atom this box was rendered from.
    pub atom_id: Option<AtomId>,
}

impl LayoutBox {
    fn new(content: BoxContent, width: Dimension, height: Dimension, depth: Dimension) -> Self {
        LayoutBox {
            content,
            width,
            height,
            depth,
            shift: 0,
            caret: None,
            atom_id: None,
        }
    }

    pub fn strut() -> Self {
        Self::new(BoxContent::Strut, 0, 0, 0)
    }

    pub fn glyph(text: &str, mathstyle: MathStyle) -> Self {
        let size = mathstyle.size_factor();
        let count = Dimension::try_from(text.chars().count()).unwrap_or(Dimension::MAX);
        let depth = if text.chars().any(has_descender) {
            scale(GLYPH_DEPTH, size)
        } else {
            0
        };
        Self::new(
            BoxContent::Glyph(text.to_string()),
            scale(GLYPH_WIDTH.saturating_mul(count), size),
            scale(GLYPH_HEIGHT, size),
            depth,
        )
    }

    pub fn row(children: Vec<LayoutBox>) -> Self {
        let width = children
            .iter()
            .fold(0, |width: Dimension, child| width.saturating_add(child.width));
        let (height, depth) = vertical_extent(&children);
        Self::new(BoxContent::Row(children), width, height, depth)
    }

    /// Stack a superscript and a subscript, shifted relative to a base set in `mathstyle`.
    pub fn scripts(sup: Option<LayoutBox>, sub: Option<LayoutBox>, mathstyle: MathStyle) -> Self {
        let size = mathstyle.size_factor();
        let mut children = Vec::with_capacity(2);
        if let Some(mut sup) = sup {
            sup.shift = -scale(SUP_SHIFT, size);
            children.push(sup);
        }
        if let Some(mut sub) = sub {
            sub.shift = scale(SUB_SHIFT, size);
            children.push(sub);
        }
        let width = children.iter().map(|child| child.width).max().unwrap_or(0);
        let (height, depth) = vertical_extent(&children);
        Self::new(BoxContent::Stack(children), width, height, depth)
    }

    pub fn children(&self) -> &[LayoutBox] {
        match &self.content {
            BoxContent::Row(children) | BoxContent::Stack(children) => children,
            BoxContent::Strut | BoxContent::Glyph(_) => &[],
        }
    }

    /// Ids of the atoms bound to this box and its descendants, in depth-first order.
    pub fn atom_ids(&self) -> Vec<AtomId> {
        let mut ids = Vec::new();
        self.collect_atom_ids(&mut ids);
        ids
    }

    fn collect_atom_ids(&self, ids: &mut Vec<AtomId>) {
        if let Some(id) = self.atom_id {
            ids.push(id);
        }
        for child in self.children() {
            child.collect_atom_ids(ids);
        }
    }

    /// The first box (in depth-first order) that carries a caret.
    pub fn find_caret(&self) -> Option<&LayoutBox> {
        if self.caret.is_some() {
            return Some(self);
        }
        self.children().iter().find_map(LayoutBox::find_caret)
    }

    /// Write an indented, human-readable description of the box tree.
    pub fn emit(&self, s: &mut String, indent: usize) -> std::fmt::Result {
        new_line_and_indent(s, indent);
        match &self.content {
            BoxContent::Strut => write!(s, "strut")?,
            BoxContent::Glyph(text) => write!(s, "glyph {text:?}")?,
            BoxContent::Row(_) => write!(s, "row")?,
            BoxContent::Stack(_) => write!(s, "stack")?,
        }
        write!(s, " w={} h={} d={}", self.width, self.height, self.depth)?;
        if self.shift != 0 {
            write!(s, " shift={}", self.shift)?;
        }
        if let Some(caret) = self.caret {
            write!(s, " caret={}", <&str>::from(caret))?;
        }
        if let Some(id) = self.atom_id {
            write!(s, " atom={id}")?;
        }
        for child in self.children() {
            child.emit(s, indent + 1)?;
        }
        Ok(())
    }
}

/// Build one box from a list of atoms.
///
/// Returns `None` if no atom in the list produced a box, in particular for an empty list.
pub fn build_box(context: &mut Context, atoms: &[Atom]) -> Option<LayoutBox> {
    let children: Vec<LayoutBox> = atoms.iter().filter_map(|atom| atom.render(context)).collect();
    if children.is_empty() {
        return None;
    }
    Some(LayoutBox::row(children))
}

#[inline]
fn scale(value: Dimension, size_factor: Dimension) -> Dimension {
    let scaled = i64::from(value) * i64::from(size_factor) / 1000;
    Dimension::try_from(scaled).unwrap_or(if scaled < 0 { Dimension::MIN } else { Dimension::MAX })
}

fn has_descender(ch: char) -> bool {
    matches!(ch, 'g' | 'j' | 'p' | 'q' | 'y' | ',' | ';' | 'β' | 'γ' | 'μ' | 'ρ' | 'φ' | 'χ' | 'ψ')
}

fn vertical_extent(children: &[LayoutBox]) -> (Dimension, Dimension) {
    let height = children
        .iter()
        .map(|child| child.height.saturating_sub(child.shift))
        .max()
        .unwrap_or(0);
    let depth = children
        .iter()
        .map(|child| child.depth.saturating_add(child.shift))
        .max()
        .unwrap_or(0);
    (height.max(0), depth.max(0))
}

#[cfg(test)]
mod tests {
    use insta::assert_snapshot;

    use super::*;

    #[test]
    fn glyph_metrics_follow_style() {
        let text = LayoutBox::glyph("x", MathStyle::Text);
        assert_eq!((text.width, text.height, text.depth), (500, 700, 0));
        let script = LayoutBox::glyph("y", MathStyle::ScriptCramped);
        assert_eq!((script.width, script.height, script.depth), (350, 490, 140));
        let tiny = LayoutBox::glyph("ab", MathStyle::ScriptScript);
        assert_eq!(tiny.width, 500);
    }

    #[test]
    fn long_glyph_runs_do_not_overflow() {
        let text = "x".repeat(5000);
        let display = LayoutBox::glyph(&text, MathStyle::Display);
        assert_eq!(display.width, 2_500_000);
        let script = LayoutBox::glyph(&text, MathStyle::Script);
        assert_eq!(script.width, 1_750_000);

        let mut wide = LayoutBox::strut();
        wide.width = Dimension::MAX;
        let row = LayoutBox::row(vec![wide.clone(), wide, display]);
        assert_eq!(row.width, Dimension::MAX);
        assert_eq!(scale(Dimension::MAX, 1000), Dimension::MAX);
    }

    #[test]
    fn build_box_of_empty_list() {
        let mut context = Context::default();
        assert!(build_box(&mut context, &[]).is_none());
    }

    #[test]
    fn emit_scripts() {
        let sup = LayoutBox::glyph("2", MathStyle::Script);
        let sub = LayoutBox::glyph("i", MathStyle::ScriptCramped);
        let scripts = LayoutBox::scripts(Some(sup), Some(sub), MathStyle::Text);
        let row = LayoutBox::row(vec![LayoutBox::glyph("x", MathStyle::Text), scripts]);
        let mut out = String::new();
        row.emit(&mut out, 0).unwrap();
        assert_snapshot!(out, @r#"
        row w=850 h=840 d=150
          glyph "x" w=500 h=700 d=0
          stack w=350 h=840 d=150
            glyph "2" w=350 h=490 d=0 shift=-350
            glyph "i" w=350 h=490 d=0 shift=150
        "#);
    }
}
