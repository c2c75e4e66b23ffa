use crate::error::{MetricsError, Result};
use crate::language::Language;
use tree_sitter::Parser;

/// Decides whether a program text is syntactically valid.
///
/// `Ok(false)` is a syntax error in the text; `Err` is a failure of the
/// checker itself and must not be read as "invalid".
pub trait SyntaxChecker {
    fn check(&self, source: &str) -> Result<bool>;
}

impl<F> SyntaxChecker for F
where
    F: Fn(&str) -> Result<bool>,
{
    fn check(&self, source: &str) -> Result<bool> {
        self(source)
    }
}

/// Picks a checker for a dataset file
pub trait CheckerFactory {
    fn checker_for(&self, filename: &str) -> Result<Box<dyn SyntaxChecker>>;
}

/// Tree-sitter parse check: a tree with ERROR or MISSING nodes is invalid
#[derive(Debug, Clone, Copy)]
pub struct TreeSitterChecker {
    language: Language,
}

impl TreeSitterChecker {
    /// Create a checker; fails for languages without a grammar
    pub fn new(language: Language) -> Result<Self> {
        language.tree_sitter_language()?;
        Ok(Self { language })
    }

    /// Create a checker from a file name's extension
    pub fn for_path(path: &str) -> Result<Self> {
        Self::new(Language::from_path(path))
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }
}

impl SyntaxChecker for TreeSitterChecker {
    fn check(&self, source: &str) -> Result<bool> {
        let ts_language = self.language.tree_sitter_language()?;
        let mut parser = Parser::new();
        parser
            .set_language(&ts_language)
            .map_err(|e| MetricsError::tree_sitter(format!("Failed to set language: {e}")))?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| MetricsError::tree_sitter("Parser returned no tree"))?;
        Ok(!tree.root_node().has_error())
    }
}

/// Factory that maps file extensions to tree-sitter grammars
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterFactory;

impl CheckerFactory for TreeSitterFactory {
    fn checker_for(&self, filename: &str) -> Result<Box<dyn SyntaxChecker>> {
        let checker = TreeSitterChecker::for_path(filename)?;
        log::debug!("{filename}: syntax checked as {}", checker.language().as_str());
        Ok(Box::new(checker))
    }
}
