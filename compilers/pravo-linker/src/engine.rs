use std::path::{Path, PathBuf};

use pravo_morph::Analyzer;
use pravo_parser::Lexer;
use pravo_protocol::{Lexicon, NormalizedForm};

use crate::alias::{parse_resource, AliasIndex, AliasResource};
use crate::bundled;
use crate::citation::{Citation, CitationExtractor};
use crate::config::EngineConfig;
use crate::error::{ResourceError, Result};
use crate::resolver::{Mentions, PhraseMatcher, ResolutionResult};

/// Ready-to-query resolver: lexicon, alias index and settings, all frozen
/// at construction. Share it by reference or through an `Arc`.
pub struct Engine {
    analyzer: Analyzer,
    index: AliasIndex,
    config: EngineConfig,
}

impl Engine {
    /// Bundled lexicon, aliases read from `alias_path`, default settings.
    pub fn initialize(alias_path: impl AsRef<Path>) -> Result<Self> {
        Self::builder().aliases_path(alias_path).build()
    }

    /// Bundled lexicon and bundled aliases.
    pub fn bundled() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Mention scan over `text`: words are analysed eagerly, matching is lazy.
    pub fn mentions<'t>(&self, text: &'t str) -> Mentions<'_, 't> {
        let words = self.lexer().words(text);
        Mentions::new(self.matcher(), text, words)
    }

    pub fn resolve(&self, text: &str) -> ResolutionResult {
        self.mentions(text).collect()
    }

    /// Article, point and subpoint references tied to the law named after them.
    pub fn citations(&self, text: &str) -> Vec<Citation> {
        CitationExtractor {
            lexer: self.lexer(),
            index: &self.index,
            matcher: self.matcher(),
            config: &self.config,
        }
        .extract(text)
    }

    pub fn normalize(&self, word: &str) -> Vec<NormalizedForm> {
        self.analyzer.normalize(word)
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn index(&self) -> &AliasIndex {
        &self.index
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn lexer(&self) -> Lexer<'_> {
        Lexer::new(&self.analyzer)
    }

    fn matcher(&self) -> PhraseMatcher<'_> {
        PhraseMatcher::new(&self.index, self.config.max_alias_words)
    }
}

#[derive(Default)]
enum LexiconSource {
    #[default]
    Bundled,
    Path(PathBuf),
    Value(Lexicon),
}

#[derive(Default)]
enum AliasSource {
    #[default]
    Bundled,
    Path(PathBuf),
    Json(String),
    Value(AliasResource),
}

/// Collects resource sources; nothing is read before [`EngineBuilder::build`].
#[derive(Default)]
pub struct EngineBuilder {
    lexicon: LexiconSource,
    aliases: AliasSource,
    config: EngineConfig,
}

impl EngineBuilder {
    /// Lexicon file: `.json` authoring format, anything else is read as an
    /// rkyv archive.
    pub fn lexicon_path(mut self, path: impl AsRef<Path>) -> Self {
        self.lexicon = LexiconSource::Path(path.as_ref().to_path_buf());
        self
    }

    pub fn lexicon(mut self, lexicon: Lexicon) -> Self {
        self.lexicon = LexiconSource::Value(lexicon);
        self
    }

    pub fn aliases_path(mut self, path: impl AsRef<Path>) -> Self {
        self.aliases = AliasSource::Path(path.as_ref().to_path_buf());
        self
    }

    pub fn aliases_json(mut self, json: impl Into<String>) -> Self {
        self.aliases = AliasSource::Json(json.into());
        self
    }

    pub fn aliases(mut self, resource: AliasResource) -> Self {
        self.aliases = AliasSource::Value(resource);
        self
    }

    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<Engine> {
        self.config.validate()?;

        let analyzer = match self.lexicon {
            LexiconSource::Bundled => bundled::analyzer()?,
            LexiconSource::Path(path) => load_analyzer(&path)?,
            LexiconSource::Value(lexicon) => Analyzer::new(lexicon)?,
        };
        tracing::debug!(
            lemmas = analyzer.lexicon().lemmas.len(),
            paradigms = analyzer.lexicon().paradigms.len(),
            "Lexicon loaded"
        );

        let resource = match self.aliases {
            AliasSource::Bundled => bundled::aliases()?,
            AliasSource::Path(path) => {
                let json = std::fs::read_to_string(&path).map_err(|e| ResourceError::io(&path, e))?;
                parse_resource(&json, &path.display().to_string())?
            }
            AliasSource::Json(json) => parse_resource(&json, "inline aliases")?,
            AliasSource::Value(resource) => resource,
        };

        let index = AliasIndex::build(&analyzer, &resource)?;

        tracing::info!(
            aliases = resource.len(),
            keys = index.len(),
            max_words = index.max_words(),
            "Engine ready"
        );

        Ok(Engine {
            analyzer,
            index,
            config: self.config,
        })
    }
}

fn load_analyzer(path: &Path) -> Result<Analyzer> {
    let bytes = std::fs::read(path).map_err(|e| ResourceError::io(path, e))?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        let lexicon: Lexicon = serde_json::from_slice(&bytes)
            .map_err(|e| ResourceError::json(path.display().to_string(), e))?;
        Ok(Analyzer::new(lexicon)?)
    } else {
        Ok(Analyzer::from_archive(&bytes)?)
    }
}
