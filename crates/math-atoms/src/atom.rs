use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum_macros::{EnumString, IntoStaticStr};

use crate::choice::ChoiceAtom;
use crate::context::{Context, MathStyle};
use crate::layout::{self, LayoutBox};
use crate::record::{AtomRecord, RecordError};
use crate::serialize::{self, SerializeOptions};

/// Identifies an atom for as long as the [`Context`] that created it is alive.
///
/// Ids are not persisted; restoring a record hands out fresh ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(pub(crate) u32);

static_assertions::assert_eq_size!(AtomId, u32);

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The type tag of an atom, as it appears in records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, EnumString)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum AtomKind {
    /// Placeholder at the head of every list built by the parser. Never persisted.
    First,
    /// Ordinary symbol.
    Mord,
    /// Binary operator.
    Mbin,
    /// Relation.
    Mrel,
    /// Braced group, optionally switching the math style.
    Group,
    /// Superscript and/or subscript.
    Msubsup,
    /// `\mathchoice`
    Choice,
}

impl AtomKind {
    #[inline]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

/// The mode the caret is in while it sits on an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[strum(serialize_all = "lowercase")]
pub enum Caret {
    Math,
    Text,
    Latex,
}

/// Fields every atom carries, whatever its kind.
///
/// Equality only looks at the kind and the navigation flag: ids are identity, and the caret is
/// transient cursor state.
#[derive(Debug, Clone)]
pub struct AtomBase {
    kind: AtomKind,
    id: AtomId,
    pub caret: Option<Caret>,
    skip_boundary: bool,
}

impl AtomBase {
    pub fn new(kind: AtomKind, context: &mut Context) -> Self {
        AtomBase {
            kind,
            id: context.next_atom_id(),
            caret: None,
            skip_boundary: false,
        }
    }

    #[inline]
    pub fn kind(&self) -> AtomKind {
        self.kind
    }

    #[inline]
    pub fn id(&self) -> AtomId {
        self.id
    }

    /// If `true`, boundary-based cursor navigation passes straight through the atom.
    #[inline]
    pub fn skip_boundary(&self) -> bool {
        self.skip_boundary
    }

    pub(crate) fn with_skip_boundary(mut self) -> Self {
        self.skip_boundary = true;
        self
    }

    /// The base fields of the record form.
    pub fn to_record(&self) -> AtomRecord {
        AtomRecord::new(self.kind)
    }

    /// Copy the caret (if any) onto a freshly rendered box and bind the box to this atom.
    pub(crate) fn finish_box(&self, context: &mut Context, mut layout_box: LayoutBox) -> LayoutBox {
        if let Some(caret) = self.caret {
            layout_box.caret = Some(caret);
        }
        context.bind(self, layout_box)
    }
}

impl PartialEq for AtomBase {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.skip_boundary == other.skip_boundary
    }
}

/// A node of the math expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Atom {
    /// The list-head placeholder.
    First(AtomBase),
    Symbol(SymbolAtom),
    Group(GroupAtom),
    Subsup(SubsupAtom),
    Choice(ChoiceAtom),
}

impl Atom {
    /// A new list-head placeholder.
    pub fn first(context: &mut Context) -> Atom {
        Atom::First(AtomBase::new(AtomKind::First, context))
    }

    pub fn base(&self) -> &AtomBase {
        match self {
            Atom::First(base) => base,
            Atom::Symbol(atom) => &atom.base,
            Atom::Group(atom) => &atom.base,
            Atom::Subsup(atom) => &atom.base,
            Atom::Choice(atom) => atom.base(),
        }
    }

    pub fn base_mut(&mut self) -> &mut AtomBase {
        match self {
            Atom::First(base) => base,
            Atom::Symbol(atom) => &mut atom.base,
            Atom::Group(atom) => &mut atom.base,
            Atom::Subsup(atom) => &mut atom.base,
            Atom::Choice(atom) => atom.base_mut(),
        }
    }

    #[inline]
    pub fn kind(&self) -> AtomKind {
        self.base().kind()
    }

    #[inline]
    pub fn is_first(&self) -> bool {
        matches!(self, Atom::First(_))
    }

    pub fn render(&self, context: &mut Context) -> Option<LayoutBox> {
        match self {
            Atom::First(base) => Some(base.finish_box(context, LayoutBox::strut())),
            Atom::Symbol(atom) => Some(atom.render(context)),
            Atom::Group(atom) => atom.render(context),
            Atom::Subsup(atom) => atom.render(context),
            Atom::Choice(atom) => atom.render(context),
        }
    }

    pub fn serialize(&self, options: SerializeOptions) -> String {
        match self {
            Atom::First(_) => String::new(),
            Atom::Symbol(atom) => atom.value.clone(),
            Atom::Group(atom) => atom.serialize(options),
            Atom::Subsup(atom) => atom.serialize(options),
            Atom::Choice(atom) => atom.serialize(options),
        }
    }

    pub fn to_record(&self) -> AtomRecord {
        match self {
            Atom::First(base) => base.to_record(),
            Atom::Symbol(atom) => AtomRecord {
                value: Some(atom.value.clone()),
                ..atom.base.to_record()
            },
            Atom::Group(atom) => AtomRecord {
                body: Some(persisted(&atom.body)),
                mathstyle: atom.mathstyle,
                ..atom.base.to_record()
            },
            Atom::Subsup(atom) => AtomRecord {
                superscript: atom.superscript.as_deref().map(persisted),
                subscript: atom.subscript.as_deref().map(persisted),
                ..atom.base.to_record()
            },
            Atom::Choice(atom) => atom.to_record(),
        }
    }

    pub fn from_record(record: &AtomRecord, context: &mut Context) -> Result<Atom, RecordError> {
        let kind = record.kind;
        Ok(match kind {
            AtomKind::First => Atom::first(context),
            AtomKind::Mord | AtomKind::Mbin | AtomKind::Mrel => {
                let value = record.value.as_ref().ok_or(RecordError::MissingField {
                    kind,
                    field: "value",
                })?;
                Atom::Symbol(SymbolAtom::new(kind, value.clone(), context))
            }
            AtomKind::Group => {
                let body = record.body.as_deref().ok_or(RecordError::MissingField {
                    kind,
                    field: "body",
                })?;
                let body = crate::record::parse_list(body, context)?;
                Atom::Group(GroupAtom::new(body, record.mathstyle, context))
            }
            AtomKind::Msubsup => {
                if record.superscript.is_none() && record.subscript.is_none() {
                    return Err(RecordError::MissingField {
                        kind,
                        field: "superscript",
                    });
                }
                let superscript = record
                    .superscript
                    .as_deref()
                    .map(|list| crate::record::parse_list(list, context))
                    .transpose()?;
                let subscript = record
                    .subscript
                    .as_deref()
                    .map(|list| crate::record::parse_list(list, context))
                    .transpose()?;
                Atom::Subsup(SubsupAtom::new(superscript, subscript, context))
            }
            AtomKind::Choice => Atom::Choice(ChoiceAtom::from_record(record, context)?),
        })
    }
}

/// Records of `atoms`, leaving out list-head placeholders.
pub(crate) fn persisted(atoms: &[Atom]) -> Vec<AtomRecord> {
    atoms
        .iter()
        .filter(|atom| !atom.is_first())
        .map(Atom::to_record)
        .collect()
}

/// A single glyph: a letter, digit, operator or symbol command like `\alpha`.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolAtom {
    pub(crate) base: AtomBase,
    /// The LaTeX source of the symbol, e.g. `x` or `\alpha`.
    pub value: String,
}

impl SymbolAtom {
    pub fn new(kind: AtomKind, value: String, context: &mut Context) -> Self {
        debug_assert!(matches!(
            kind,
            AtomKind::Mord | AtomKind::Mbin | AtomKind::Mrel
        ));
        SymbolAtom {
            base: AtomBase::new(kind, context),
            value,
        }
    }

    fn render(&self, context: &mut Context) -> LayoutBox {
        let glyph = crate::predefined::glyph_for(&self.value);
        let layout_box = LayoutBox::glyph(glyph, context.mathstyle());
        self.base.finish_box(context, layout_box)
    }
}

/// A braced group. If `mathstyle` is set, the body is laid out in that style.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAtom {
    pub(crate) base: AtomBase,
    pub body: Vec<Atom>,
    pub mathstyle: Option<MathStyle>,
}

impl GroupAtom {
    pub fn new(body: Vec<Atom>, mathstyle: Option<MathStyle>, context: &mut Context) -> Self {
        GroupAtom {
            base: AtomBase::new(AtomKind::Group, context),
            body,
            mathstyle,
        }
    }

    fn render(&self, context: &mut Context) -> Option<LayoutBox> {
        let layout_box = match self.mathstyle {
            Some(style) => context.with_mathstyle(style, |ctx| layout::build_box(ctx, &self.body)),
            None => layout::build_box(context, &self.body),
        }?;
        Some(self.base.finish_box(context, layout_box))
    }

    /// The style command written at the start of the group, if any.
    pub(crate) fn style_command(&self, options: SerializeOptions) -> Option<&'static str> {
        if options.skip_styles {
            return None;
        }
        self.mathstyle.and_then(MathStyle::command)
    }

    pub(crate) fn serialize(&self, options: SerializeOptions) -> String {
        let mut out = String::from("{");
        if let Some(command) = self.style_command(options) {
            out.push_str(command);
        }
        serialize::append_latex(&mut out, &serialize::serialize_list(&self.body, options));
        out.push('}');
        out
    }
}

/// Scripts attached to whatever precedes the atom in its list.
#[derive(Debug, Clone, PartialEq)]
pub struct SubsupAtom {
    pub(crate) base: AtomBase,
    pub superscript: Option<Vec<Atom>>,
    pub subscript: Option<Vec<Atom>>,
}

impl SubsupAtom {
    pub fn new(
        superscript: Option<Vec<Atom>>,
        subscript: Option<Vec<Atom>>,
        context: &mut Context,
    ) -> Self {
        SubsupAtom {
            base: AtomBase::new(AtomKind::Msubsup, context),
            superscript,
            subscript,
        }
    }

    fn render(&self, context: &mut Context) -> Option<LayoutBox> {
        let style = context.mathstyle();
        let sup = self
            .superscript
            .as_deref()
            .and_then(|list| context.with_mathstyle(style.sup(), |ctx| layout::build_box(ctx, list)));
        let sub = self
            .subscript
            .as_deref()
            .and_then(|list| context.with_mathstyle(style.sub(), |ctx| layout::build_box(ctx, list)));
        if sup.is_none() && sub.is_none() {
            return None;
        }
        let layout_box = LayoutBox::scripts(sup, sub, style);
        Some(self.base.finish_box(context, layout_box))
    }

    fn serialize(&self, options: SerializeOptions) -> String {
        let mut out = String::new();
        if let Some(sup) = &self.superscript {
            out.push('^');
            serialize::append_argument(&mut out, sup, options);
        }
        if let Some(sub) = &self.subscript {
            out.push('_');
            serialize::append_argument(&mut out, sub, options);
        }
        out
    }
}
