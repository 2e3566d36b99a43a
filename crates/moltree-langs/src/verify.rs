//! Grammar load verification.
//!
//! Checks that the packaged grammar can be handed to a parsing runtime
//! without failing. Whatever goes wrong, the outcome carries the same
//! message; the underlying cause stays reachable through
//! [`std::error::Error::source`].
//!
//! ```
//! moltree_langs::verify_can_load_grammar().expect("Error loading MolViewTree grammar");
//! ```

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};

use tree_sitter_language::LanguageFn;

pub const LOAD_FAILURE_MESSAGE: &str = "Error loading MolViewTree grammar";

pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opaque handle to a compiled grammar, as returned by its entry point.
///
/// Never inspected here; only the runtime looks inside.
#[derive(Clone, Copy)]
pub struct LanguageHandle(LanguageFn);

impl LanguageHandle {
    pub const fn new(language_fn: LanguageFn) -> Self {
        Self(language_fn)
    }

    pub const fn language_fn(self) -> LanguageFn {
        self.0
    }
}

impl fmt::Debug for LanguageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LanguageHandle(..)")
    }
}

/// Supplies the handle of a compiled grammar.
pub trait GrammarModule {
    fn language(&self) -> Result<LanguageHandle, BoxError>;
}

/// Turns a handle into a usable language.
pub trait ParsingRuntime {
    type Language;

    fn construct(&self, handle: LanguageHandle) -> Result<Self::Language, BoxError>;
}

/// The grammar shipped in `tree-sitter-mol-view-tree`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MolViewTreeGrammar;

impl GrammarModule for MolViewTreeGrammar {
    fn language(&self) -> Result<LanguageHandle, BoxError> {
        Ok(LanguageHandle::new(tree_sitter_mol_view_tree::LANGUAGE))
    }
}

/// The linked tree-sitter runtime.
///
/// Registering the language on a parser is what performs the ABI
/// version check, so a successful construct means parsers will accept it.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterRuntime;

impl ParsingRuntime for TreeSitterRuntime {
    type Language = tree_sitter::Language;

    fn construct(&self, handle: LanguageHandle) -> Result<Self::Language, BoxError> {
        let language_fn = handle.language_fn();
        // SAFETY: entry points are `extern "C" fn() -> *const TSLanguage` with no arguments
        let raw = unsafe { language_fn.into_raw()() };
        if raw.is_null() {
            return Err(RuntimeError::NullLanguage.into());
        }

        let language = tree_sitter::Language::new(language_fn);
        tree_sitter::Parser::new()
            .set_language(&language)
            .map_err(RuntimeError::from)?;
        Ok(language)
    }
}

/// Why [`TreeSitterRuntime`] (or the verifier around it) failed.
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("grammar entry point returned a null language")]
    NullLanguage,
    #[error("incompatible language: {0}")]
    Incompatible(#[from] tree_sitter::LanguageError),
    #[error("panicked while loading grammar: {0}")]
    Panicked(String),
}

/// The grammar could not be loaded.
///
/// `Display` is always `Error loading MolViewTree grammar`.
#[derive(Debug, thiserror::Error)]
#[error("Error loading MolViewTree grammar")]
pub struct GrammarLoadError {
    #[source]
    cause: BoxError,
}

impl GrammarLoadError {
    fn new(cause: BoxError) -> Self {
        Self { cause }
    }

    pub fn cause(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
        self.cause.as_ref()
    }
}

/// Obtain a handle from `module` and construct it with `runtime`.
///
/// Any error from either step, and any panic inside them, becomes a
/// [`GrammarLoadError`].
pub fn verify_grammar<M, R>(module: &M, runtime: &R) -> Result<R::Language, GrammarLoadError>
where
    M: GrammarModule + ?Sized,
    R: ParsingRuntime + ?Sized,
{
    let attempt = catch_unwind(AssertUnwindSafe(|| {
        let handle = module.language()?;
        runtime.construct(handle)
    }));

    let cause = match attempt {
        Ok(Ok(language)) => {
            tracing::trace!("grammar loaded");
            return Ok(language);
        }
        Ok(Err(cause)) => cause,
        Err(payload) => RuntimeError::Panicked(panic_message(payload.as_ref())).into(),
    };

    tracing::debug!(cause = %cause, "grammar load failed");
    Err(GrammarLoadError::new(cause))
}

/// Check the packaged MolViewTree grammar against the linked tree-sitter runtime.
pub fn verify_can_load_grammar() -> Result<(), GrammarLoadError> {
    verify_grammar(&MolViewTreeGrammar, &TreeSitterRuntime).map(drop)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
