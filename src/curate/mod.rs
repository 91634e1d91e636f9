//! The Curator: transforms the local mirror into the Full Corpus archive and
//! the retrieval-ready record set.
//!
//! Cross-references are resolved here: a poem's owning section is recovered
//! from section membership lists, not stored on the poem. Multilingual
//! nested structures are flattened into language-keyed maps, filtered to the
//! target language for the retrieval view.

pub mod curator;
pub mod error;
pub mod flatten;
pub mod inspect;
pub mod manifest;
pub mod model;
pub mod poem;

pub use curator::{CurationOutcome, Curator};
pub use error::{CurateError, CurateResult};
pub use flatten::flatten_for_rag;
pub use inspect::{CorpusReport, load_outputs, verify};
pub use model::{Book, FullCorpus, Poem, RetrievalRecord, Section, Verse};
