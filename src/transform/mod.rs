//! Transform pipeline
//!
//! resolve input -> invoke holehe -> classify output -> emit entities.
//! Every failure short of a broken serializer ends up as a diagnostic entity,
//! so a response is never empty.

use crate::classifier::OutputClassifier;
use crate::config::Config;
use crate::entities::{Diagnostic, EntityEmitter, TransformResponse};
use crate::error::{HoleheError, Result};
use crate::invoker::ProcessInvoker;
use crate::patterns::PatternRegistry;
use std::sync::Arc;
use std::time::Duration;

/// One configured transform, ready to run for an identifier
pub struct Transform {
    invoker: ProcessInvoker,
    classifier: OutputClassifier,
    emitter: EntityEmitter,
}

impl Transform {
    /// Build from configuration, resolving the binary location
    ///
    /// An unresolvable location is not an error here: the relative path is
    /// kept and reported as missing when the transform runs.
    pub fn from_config(config: &Config) -> Result<Self> {
        let binary = config.resolve_binary().unwrap_or_else(|e| {
            tracing::warn!("Cannot resolve holehe location: {}", e);
            config
                .tool
                .binary
                .clone()
                .unwrap_or_else(|| config.tool.relative_path.clone())
        });
        let invoker = ProcessInvoker::new(binary, Duration::from_secs(config.tool.timeout_secs));
        let patterns = Arc::new(PatternRegistry::from_config(&config.patterns)?);

        Ok(Self::new(invoker, patterns, &config.output.source))
    }

    pub fn new(invoker: ProcessInvoker, patterns: Arc<PatternRegistry>, source: &str) -> Self {
        Self {
            invoker,
            classifier: OutputClassifier::new(patterns),
            emitter: EntityEmitter::new(source),
        }
    }

    /// Run holehe for `identifier` and build the response
    pub fn run(&self, identifier: &str) -> TransformResponse {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            tracing::warn!("No email provided");
            return TransformResponse::diagnostic(Diagnostic::NoInput);
        }

        match self.invoker.invoke(identifier) {
            Ok(captured) => self.respond(identifier, &captured.stdout),
            Err(e) => {
                tracing::error!("holehe run failed: {}", e);
                TransformResponse::diagnostic(diagnostic_for(e))
            }
        }
    }

    /// Build the response from output holehe already produced
    pub fn respond(&self, identifier: &str, captured: &str) -> TransformResponse {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return TransformResponse::diagnostic(Diagnostic::NoInput);
        }

        let classification = self.classifier.classify(captured);
        tracing::info!(
            "{}: {} exists, {} not used, {} rate limited",
            identifier,
            classification.summary.counts.exists,
            classification.summary.counts.not_used,
            classification.summary.counts.rate_limited
        );

        TransformResponse::new(self.emitter.emit(identifier, &classification))
    }
}

/// Build the response for one request under a possibly failed config load
///
/// With `captured`, holehe is not run and the given output is classified. A
/// configuration problem becomes a single configuration-error entity.
pub fn response_for(
    config: std::result::Result<&Config, &HoleheError>,
    identifier: &str,
    captured: Option<&str>,
) -> TransformResponse {
    let transform = config
        .map_err(|e| e.to_string())
        .and_then(|config| Transform::from_config(config).map_err(|e| e.to_string()));

    match transform {
        Ok(transform) => match captured {
            Some(captured) => transform.respond(identifier, captured),
            None => transform.run(identifier),
        },
        Err(message) => {
            tracing::error!("{}", message);
            TransformResponse::diagnostic(Diagnostic::ConfigurationError(message))
        }
    }
}

/// Map a failed run onto the entity reported to the user
pub fn diagnostic_for(error: HoleheError) -> Diagnostic {
    match error {
        HoleheError::BinaryNotFound { path } => Diagnostic::BinaryNotFound(path),
        other => Diagnostic::ExecutionError(other.to_string()),
    }
}
