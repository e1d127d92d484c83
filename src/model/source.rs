//! Model sources
//!
//! A model source builds a model once and hands out the cached, validated
//! result afterwards.

use super::builder::ModelBuilder;
use super::conventions::ConventionSet;
use super::error::ModelBuildResult;
use crate::diagnostics::DiagnosticsLoggers;
use crate::models::Model;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Provides the finalized model for a context
pub trait ModelSource: Send + Sync {
    fn model(&self, loggers: &DiagnosticsLoggers) -> ModelBuildResult<Arc<Model>>;
}

/// Model source configured by an `on_model_creating` callback
///
/// The callback runs on first access. A build that fails is not cached, so
/// the next access reports the error again.
pub struct TestModelSource<F> {
    on_model_creating: F,
    conventions: ConventionSet,
    model: OnceCell<Arc<Model>>,
}

impl<F> TestModelSource<F>
where
    F: Fn(&mut ModelBuilder) + Send + Sync,
{
    pub fn new(on_model_creating: F, conventions: ConventionSet) -> Self {
        Self {
            on_model_creating,
            conventions,
            model: OnceCell::new(),
        }
    }

    pub fn is_built(&self) -> bool {
        self.model.get().is_some()
    }
}

impl<F> ModelSource for TestModelSource<F>
where
    F: Fn(&mut ModelBuilder) + Send + Sync,
{
    fn model(&self, loggers: &DiagnosticsLoggers) -> ModelBuildResult<Arc<Model>> {
        self.model
            .get_or_try_init(|| {
                debug!("Building model");
                let mut builder = ModelBuilder::new();
                (self.on_model_creating)(&mut builder);
                builder.finalize_model(&self.conventions, loggers)
            })
            .cloned()
    }
}

impl<F> std::fmt::Debug for TestModelSource<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestModelSource")
            .field("conventions", &self.conventions)
            .field("built", &self.model.get().is_some())
            .finish_non_exhaustive()
    }
}
