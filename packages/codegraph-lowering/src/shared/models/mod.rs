//! Shared models

mod error;
pub mod syntax;
pub mod triple;

pub use error::{LoweringError, LoweringResult};
pub use syntax::{Form, FormArgs, FormHead, Meta, SyntaxNode};
pub use triple::{FloatValue, Iri, Literal, Object, Triple, TripleSet};
