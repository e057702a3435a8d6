//! `\mathchoice`: four pre-built variants, one of which is laid out depending on the math style.

use tracing::{debug, trace};

use crate::atom::{Atom, AtomBase, AtomKind, persisted};
use crate::context::Context;
use crate::layout::{self, LayoutBox};
use crate::record::{self, AtomRecord, RecordError};
use crate::serialize::{self, SerializeOptions};

/// The number of style buckets, and therefore of variants.
pub const CHOICE_COUNT: usize = 4;

/// An atom holding one variant per style bucket: display, text, script and scriptscript.
#[derive(Debug, Clone, PartialEq)]
pub struct ChoiceAtom {
    base: AtomBase,
    pub choices: [Vec<Atom>; CHOICE_COUNT],
}

impl ChoiceAtom {
    pub fn new(choices: [Vec<Atom>; CHOICE_COUNT], context: &mut Context) -> Self {
        ChoiceAtom {
            base: AtomBase::new(AtomKind::Choice, context).with_skip_boundary(),
            choices,
        }
    }

    #[inline]
    pub fn base(&self) -> &AtomBase {
        &self.base
    }

    #[inline]
    pub fn base_mut(&mut self) -> &mut AtomBase {
        &mut self.base
    }

    /// The variant that is laid out in the context's current math style.
    pub fn selected(&self, context: &Context) -> &[Atom] {
        &self.choices[bucket(context)]
    }

    /// Lay out the variant for the current style.
    ///
    /// Returns `None` if the variant produces no box; in that case nothing is bound.
    pub fn render(&self, context: &mut Context) -> Option<LayoutBox> {
        trace!(
            atom = %self.base.id(),
            style = context.mathstyle().as_str(),
            index = bucket(context),
            "rendering choice"
        );
        let variant = self.selected(context);
        let layout_box = layout::build_box(context, variant)?;
        // The box must be bound so that it can be mapped back to this atom and the variant's
        // atoms reached through it.
        Some(self.base.finish_box(context, layout_box))
    }

    /// `\mathchoice{..}{..}{..}{..}`, always with all four groups.
    pub fn serialize(&self, options: SerializeOptions) -> String {
        let mut out = String::from(r"\mathchoice");
        for choice in &self.choices {
            serialize::append_argument(&mut out, choice, options);
        }
        out
    }

    pub fn to_record(&self) -> AtomRecord {
        AtomRecord {
            choices: Some(self.choices.iter().map(|choice| persisted(choice)).collect()),
            ..self.base.to_record()
        }
    }

    /// Rebuild a choice atom from its record.
    ///
    /// The record must be a `"choice"` record holding exactly four variants.
    pub fn from_record(record: &AtomRecord, context: &mut Context) -> Result<ChoiceAtom, RecordError> {
        if record.kind != AtomKind::Choice {
            return Err(RecordError::UnexpectedKind {
                expected: AtomKind::Choice,
                found: record.kind,
            });
        }
        let lists = record.choices.as_deref().unwrap_or_default();
        let Ok(lists) = <&[Vec<AtomRecord>; CHOICE_COUNT]>::try_from(lists) else {
            debug!(found = lists.len(), "rejecting choice record");
            return Err(RecordError::ChoiceCount { found: lists.len() });
        };
        let [display, text, script, scriptscript] = lists;
        let choices = [
            record::parse_list(display, context)?,
            record::parse_list(text, context)?,
            record::parse_list(script, context)?,
            record::parse_list(scriptscript, context)?,
        ];
        Ok(ChoiceAtom::new(choices, context))
    }
}

#[inline]
fn bucket(context: &Context) -> usize {
    usize::from(context.mathstyle().id() / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atom::{Caret, SymbolAtom};
    use crate::context::MathStyle;

    fn symbol(value: &str, context: &mut Context) -> Atom {
        Atom::Symbol(SymbolAtom::new(AtomKind::Mord, value.to_string(), context))
    }

    fn abcd(context: &mut Context) -> ChoiceAtom {
        let choices = ["A", "B", "C", "D"].map(|value| vec![symbol(value, context)]);
        ChoiceAtom::new(choices, context)
    }

    fn rendered_glyph(layout_box: &LayoutBox) -> &str {
        match &layout_box.children()[0].content {
            layout::BoxContent::Glyph(text) => text,
            other => panic!("expected a glyph, got {other:?}"),
        }
    }

    #[test]
    fn style_id_selects_bucket() {
        let mut context = Context::default();
        let choice = abcd(&mut context);
        for (id, expected) in [(0, "A"), (1, "A"), (2, "B"), (3, "B"), (4, "C"), (5, "C"), (6, "D"), (7, "D")] {
            context.set_mathstyle(MathStyle::from_id(id).unwrap());
            let layout_box = choice.render(&mut context).unwrap();
            assert_eq!(rendered_glyph(&layout_box), expected, "style id {id}");
        }
    }

    #[test]
    fn selected_variant() {
        let mut context = Context::new(MathStyle::DisplayCramped);
        let choice = abcd(&mut context);
        assert_eq!(choice.selected(&context), choice.choices[0].as_slice());
        context.set_mathstyle(MathStyle::ScriptScript);
        assert_eq!(choice.selected(&context), choice.choices[3].as_slice());
    }

    #[test]
    fn skips_navigation_boundary() {
        let mut context = Context::default();
        assert!(abcd(&mut context).base().skip_boundary());
    }

    #[test]
    fn render_binds_box() {
        let mut context = Context::new(MathStyle::ScriptCramped);
        let choice = abcd(&mut context);
        let layout_box = choice.render(&mut context).unwrap();
        assert_eq!(layout_box.atom_id, Some(choice.base().id()));
        assert_eq!(context.bound_kind(choice.base().id()), Some(AtomKind::Choice));
        let inner = choice.choices[2][0].base().id();
        assert_eq!(layout_box.atom_ids(), vec![choice.base().id(), inner]);
        assert!(context.is_bound(inner));
        // Variants that were not selected are not rendered.
        assert!(!context.is_bound(choice.choices[0][0].base().id()));
    }

    #[test]
    fn caret_is_copied() {
        let mut context = Context::default();
        let mut choice = abcd(&mut context);
        let layout_box = choice.render(&mut context).unwrap();
        assert_eq!(layout_box.caret, None);

        choice.base_mut().caret = Some(Caret::Latex);
        let layout_box = choice.render(&mut context).unwrap();
        assert_eq!(layout_box.caret, Some(Caret::Latex));
    }

    #[test]
    fn empty_variant_renders_nothing() {
        let mut context = Context::new(MathStyle::Script);
        let mut choice = abcd(&mut context);
        choice.choices[2].clear();
        choice.base_mut().caret = Some(Caret::Math);
        assert_eq!(choice.render(&mut context), None);
        assert!(!context.is_bound(choice.base().id()));
    }

    #[test]
    fn serialize_all_four() {
        let mut context = Context::default();
        let mut choice = abcd(&mut context);
        assert_eq!(
            choice.serialize(SerializeOptions::default()),
            r"\mathchoice{A}{B}{C}{D}"
        );
        choice.choices[1].clear();
        assert_eq!(
            choice.serialize(SerializeOptions::default()),
            r"\mathchoice{A}{}{C}{D}"
        );
    }

    #[test]
    fn record_strips_first() {
        let mut context = Context::default();
        let mut choice = abcd(&mut context);
        for choice in &mut choice.choices {
            choice.insert(0, Atom::first(&mut context));
        }
        let record = choice.to_record();
        let lists = record.choices.as_ref().unwrap();
        assert_eq!(lists.len(), CHOICE_COUNT);
        for (list, value) in lists.iter().zip(["A", "B", "C", "D"]) {
            assert_eq!(list.len(), 1);
            assert_eq!(list[0].kind, AtomKind::Mord);
            assert_eq!(list[0].value.as_deref(), Some(value));
        }
    }

    #[test]
    fn record_with_wrong_count_is_rejected() {
        let mut context = Context::default();
        let record = abcd(&mut context).to_record();
        for count in [0, 3, 5] {
            let mut malformed = record.clone();
            malformed.choices.as_mut().unwrap().resize(count, Vec::new());
            assert_eq!(
                ChoiceAtom::from_record(&malformed, &mut context),
                Err(RecordError::ChoiceCount { found: count })
            );
        }
        let missing = AtomRecord::new(AtomKind::Choice);
        assert_eq!(
            ChoiceAtom::from_record(&missing, &mut context),
            Err(RecordError::ChoiceCount { found: 0 })
        );
    }

    #[test]
    fn record_of_other_kind_is_rejected() {
        let mut context = Context::default();
        let record = AtomRecord {
            value: Some("x".to_string()),
            choices: Some(vec![Vec::new(); CHOICE_COUNT]),
            ..AtomRecord::new(AtomKind::Mord)
        };
        assert_eq!(
            ChoiceAtom::from_record(&record, &mut context),
            Err(RecordError::UnexpectedKind {
                expected: AtomKind::Choice,
                found: AtomKind::Mord
            })
        );
    }
}
