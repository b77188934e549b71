//! Finds references to Russian legal acts in running text.
//!
//! Words are lemmatized with [`pravo_morph`], so `"Налогового кодекса РФ"`
//! and `"Налоговый кодекс РФ"` hit the same alias. Two outputs are offered:
//! plain law mentions ([`Engine::resolve`]) and article-level citations
//! ([`Engine::citations`]).
//!
//! ```no_run
//! let engine = pravo_linker::Engine::bundled()?;
//! for mention in engine.mentions("согласно ст. 15 Налогового кодекса РФ") {
//!     println!("{} -> {:?}", mention.text, mention.law_ids);
//! }
//! # Ok::<(), pravo_linker::ResourceError>(())
//! ```

pub mod alias;
pub mod bundled;
pub mod citation;
pub mod config;
pub mod engine;
pub mod error;
pub mod reference;
pub mod resolver;

pub use alias::{AliasEntry, AliasIndex, AliasResource, Identifiers};
pub use citation::Citation;
pub use config::EngineConfig;
pub use engine::{Engine, EngineBuilder};
pub use error::{ResourceError, Result};
pub use resolver::{Mention, Mentions, ResolutionResult};

pub use pravo_parser::token::Span;

#[cfg(test)]
pub(crate) mod test_support {
    use pravo_morph::Analyzer;

    pub fn analyzer() -> Analyzer {
        crate::bundled::analyzer().unwrap()
    }
}
