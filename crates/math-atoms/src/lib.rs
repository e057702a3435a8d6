//! An atom tree for editable LaTeX math, with `\mathchoice` support.
//!
//! LaTeX is parsed into a tree of [`Atom`]s. The tree can be laid out into [`LayoutBox`]es for a
//! given [`MathStyle`], serialized back to LaTeX, and converted to and from a persisted record
//! form ([`AtomRecord`]).
//!
//! # Usage
//!
//! ```rust
//! use math_atoms::{Context, MathStyle, SerializeOptions, build_box, parse_latex, serialize_list};
//!
//! let mut context = Context::new(MathStyle::Script);
//! let atoms = parse_latex(r"\mathchoice{D}{T}{S}{SS}", &mut context).unwrap();
//!
//! // In script style, the third variant is laid out.
//! let layout_box = build_box(&mut context, &atoms).unwrap();
//! assert_eq!(layout_box.children().len(), 2);
//!
//! let latex = serialize_list(&atoms, SerializeOptions::default());
//! assert_eq!(latex, r"\mathchoice{D}{T}{S}{SS}");
//! ```
//!
//! # Features
//!
//! - `serde`: [`AtomRecord`] and the enums it contains implement `Serialize` and `Deserialize`.
//! - `ariadne`: [`LatexError::to_report`] builds a pretty error report.
//!
mod atom;
mod choice;
mod context;
mod error;
mod fmt;
mod layout;
mod lexer;
mod parser;
mod predefined;
mod record;
mod serialize;
mod token;

pub use self::atom::{Atom, AtomBase, AtomId, AtomKind, Caret, GroupAtom, SubsupAtom, SymbolAtom};
pub use self::choice::{CHOICE_COUNT, ChoiceAtom};
pub use self::context::{Context, MathStyle};
pub use self::error::LatexError;
pub use self::layout::{BoxContent, Dimension, LayoutBox, build_box};
pub use self::parser::parse_latex;
pub use self::record::{AtomRecord, RecordError, parse_list, to_records};
pub use self::serialize::{SerializeOptions, serialize_list};
