//! # Processing Round
//!
//! Runs the whole pipeline for one batch of declarations:
//!
//! 1. validate each provider class (authority, presence of handlers)
//! 2. compile each handler's URI template
//! 3. check it against the [`MatcherRegistry`] for a duplicate path
//! 4. bind its parameters
//! 5. register it and record a [`DelegateMethod`]
//!
//! Every failure is recorded in the round's [`Reporter`] and processing moves
//! on to the next handler. A handler with any error is left out of the
//! [`RouterModel`]; a provider left without handlers is not generated at all.
//!
//! A provider class may be declared only once per round. A repeated
//! declaration is an error on the class and is skipped; the first one stands.
//!
//! The round owns its registry, reporter and model. Nothing is shared between
//! rounds.

mod model;
#[cfg(test)]
mod tests;

pub use model::{BucketModel, DelegateMethod, ProviderModel, RouteModel, RouterModel};

use std::collections::HashSet;
use tracing::{debug, debug_span, info, info_span};

use crate::binder::bind_parameters;
use crate::config::GeneratorConfig;
use crate::diagnostics::{Element, Reporter};
use crate::error::ProcessingError;
use crate::manifest::{Manifest, MethodDecl, ProviderDecl};
use crate::matcher::{HandlerRef, MatcherRegistry};
use crate::template::{PathSegment, UriTemplateModel};

/// Characters that cannot appear in an authority.
const FORBIDDEN_AUTHORITY_CHARS: &[char] = &['/', '?', '#', '{', '}', '@'];

/// Result of a finished round.
#[derive(Debug)]
pub struct RoundOutput {
    pub model: RouterModel,
    pub reporter: Reporter,
    pub registry: MatcherRegistry,
}

impl RoundOutput {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.reporter.has_errors()
    }
}

#[derive(Debug)]
struct AcceptedProvider {
    qualified_name: String,
    simple_name: String,
    package: String,
    authority: String,
    delegates: Vec<DelegateMethod>,
}

/// State of one processing round.
#[derive(Debug)]
pub struct ProcessingRound<'a> {
    config: &'a GeneratorConfig,
    registry: MatcherRegistry,
    reporter: Reporter,
    declared: HashSet<String>,
    accepted: Vec<AcceptedProvider>,
}

impl<'a> ProcessingRound<'a> {
    #[must_use]
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            registry: MatcherRegistry::new(),
            reporter: Reporter::new(),
            declared: HashSet::new(),
            accepted: Vec::new(),
        }
    }

    #[must_use]
    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    #[must_use]
    pub fn registry(&self) -> &MatcherRegistry {
        &self.registry
    }

    /// Validate and register every handler of one provider class.
    pub fn process_provider(&mut self, provider: &ProviderDecl) {
        let span = info_span!("provider", class = %provider.class);
        let _guard = span.enter();
        let element = Element::class(&provider.class);

        if !self.declared.insert(provider.class.clone()) {
            let err = ProcessingError::illegal(
                &provider.class,
                "provider class is declared more than once; only the first declaration is used",
            );
            self.reporter.error(&element, &err);
            return;
        }
        if let Err(err) = validate_authority(&provider.authority, &self.config.output.uri_scheme) {
            self.reporter.error(&element, &err);
            return;
        }
        if provider.methods.is_empty() {
            self.reporter.warn(
                element,
                "NoHandlers",
                format!("provider '{}' declares no handler methods", provider.class),
            );
            return;
        }

        let delegates: Vec<DelegateMethod> = provider
            .methods
            .iter()
            .enumerate()
            .filter_map(|(ordinal, method)| self.process_method(provider, ordinal, method))
            .collect();

        if delegates.is_empty() {
            debug!("No valid handlers, provider skipped");
            return;
        }
        info!(handlers = delegates.len(), "Provider accepted");
        self.accepted.push(AcceptedProvider {
            qualified_name: provider.class.clone(),
            simple_name: provider.simple_name().to_string(),
            package: provider.package().to_string(),
            authority: provider.authority.clone(),
            delegates,
        });
    }

    fn process_method(
        &mut self,
        provider: &ProviderDecl,
        ordinal: usize,
        method: &MethodDecl,
    ) -> Option<DelegateMethod> {
        let span = debug_span!(
            "handler",
            method = %method.name,
            operation = %method.operation,
            template = %method.template
        );
        let _guard = span.enter();
        let element = Element::method(&provider.class, &method.name);
        let errors_before = self.reporter.error_count();

        let model = match UriTemplateModel::builder(&provider.authority, &method.template)
            .wildcard(self.config.output.wildcard.as_str())
            .scheme(self.config.output.uri_scheme.as_str())
            .build()
        {
            Ok(model) => model,
            Err(errors) => {
                for err in &errors {
                    self.reporter.error(&element, err);
                }
                return None;
            }
        };

        if has_empty_segment(&model) {
            self.reporter.warn(
                element.clone(),
                "EmptySegment",
                format!(
                    "template '{}' has an empty path segment; URI matching ignores it",
                    model.template()
                ),
            );
        }

        if let Some(existing) = self.registry.find_conflict(&model, method.operation) {
            let err = ProcessingError::DuplicatePath {
                template: model.template().to_string(),
                authority: model.authority().to_string(),
                existing_handler: existing.owner.to_string(),
            };
            self.reporter.error(&element, &err);
        }

        let bindings = match bind_parameters(&method.parameters, &model, &self.config.types) {
            Ok(bound) => {
                for warning in bound.warnings {
                    self.reporter.warn(element.clone(), "PlaceholderBinding", warning);
                }
                Some(bound.bindings)
            }
            Err(errors) => {
                for err in &errors {
                    self.reporter.error(&element, err);
                }
                None
            }
        };

        self.check_return_type(&element, method);

        let bindings = bindings?;
        if self.reporter.error_count() > errors_before {
            return None;
        }

        let owner = HandlerRef {
            class: provider.class.clone(),
            method: method.name.clone(),
            ordinal,
            operation: method.operation,
        };
        let matcher_id = match self.registry.register_exact(model, owner) {
            Ok(id) => id,
            Err(err) => {
                self.reporter.error(&element, &err);
                return None;
            }
        };
        debug!(matcher_id = %matcher_id, "Handler registered");

        Some(DelegateMethod {
            class: provider.class.clone(),
            name: method.name.clone(),
            ordinal,
            operation: method.operation,
            return_type: method.return_type.clone(),
            template: method.template.clone(),
            matcher_id,
            bindings,
        })
    }

    fn check_return_type(&mut self, element: &Element, method: &MethodDecl) {
        if method.return_type.is_empty() {
            return;
        }
        let expected = self.config.types.return_type_for(method.operation);
        if method.return_type != expected {
            self.reporter.warn(
                element.clone(),
                "ReturnType",
                format!(
                    "{} handler returns '{}', expected '{}'",
                    method.operation, method.return_type, expected
                ),
            );
        }
    }

    /// Assemble the per-provider model from the registry.
    #[must_use]
    pub fn finish(self) -> RoundOutput {
        let ProcessingRound {
            config,
            registry,
            reporter,
            accepted,
            ..
        } = self;

        let providers: Vec<ProviderModel> = accepted
            .into_iter()
            .map(|provider| {
                let buckets = registry
                    .buckets()
                    .filter_map(|bucket| {
                        let routes: Vec<RouteModel> = bucket
                            .entries()
                            .iter()
                            .filter(|entry| entry.owner.class == provider.qualified_name)
                            .filter_map(|entry| {
                                provider
                                    .delegates
                                    .iter()
                                    .find(|d| d.ordinal == entry.owner.ordinal)
                                    .map(|delegate| RouteModel {
                                        template: entry.template.clone(),
                                        delegate: delegate.clone(),
                                    })
                            })
                            .collect();
                        (!routes.is_empty()).then(|| BucketModel {
                            matcher_id: bucket.id(),
                            normalized_path: bucket.normalized_path().to_string(),
                            routes,
                        })
                    })
                    .collect();
                ProviderModel {
                    router_class: format!("{}{}", provider.simple_name, config.output.router_suffix),
                    qualified_name: provider.qualified_name,
                    simple_name: provider.simple_name,
                    package: provider.package,
                    authority: provider.authority,
                    buckets,
                }
            })
            .collect();

        info!(
            providers = providers.len(),
            matchers = registry.len(),
            errors = reporter.error_count(),
            warnings = reporter.warning_count(),
            "Processing round complete"
        );

        RoundOutput {
            model: RouterModel { providers },
            reporter,
            registry,
        }
    }
}

/// Process every provider of `manifest` in one round.
#[must_use]
pub fn process_manifest(manifest: &Manifest, config: &GeneratorConfig) -> RoundOutput {
    let mut round = ProcessingRound::new(config);
    for provider in &manifest.providers {
        round.process_provider(provider);
    }
    round.finish()
}

/// Interior or trailing `//` segments. The root template `/` is a single empty
/// segment and is fine.
fn has_empty_segment(model: &UriTemplateModel) -> bool {
    let segments = model.segments();
    segments.len() > 1
        && segments
            .iter()
            .any(|segment| matches!(segment, PathSegment::Literal(text) if text.is_empty()))
}

fn validate_authority(authority: &str, scheme: &str) -> Result<(), ProcessingError> {
    if authority.is_empty() {
        return Err(ProcessingError::illegal(authority, "authority is empty"));
    }
    if let Some(bad) = authority
        .chars()
        .find(|c| c.is_whitespace() || c.is_control() || FORBIDDEN_AUTHORITY_CHARS.contains(c))
    {
        return Err(ProcessingError::illegal(
            authority,
            format!("invalid character {:?} in authority", bad),
        ));
    }
    let candidate = format!("{}://{}/", scheme, authority);
    url::Url::parse(&candidate).map_err(|err| {
        ProcessingError::illegal(authority, format!("'{}' is not a valid URI: {}", candidate, err))
    })?;
    Ok(())
}
