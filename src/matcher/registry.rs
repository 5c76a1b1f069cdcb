use serde::Serialize;
use std::fmt;
use tracing::{debug, trace};

use crate::error::ProcessingError;
use crate::manifest::Operation;
use crate::template::UriTemplateModel;

/// Identifier shared by every template with the same authority and normalized path.
///
/// Ids start at 1, increase monotonically and are never reused within a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MatcherId(u32);

impl MatcherId {
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for MatcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The handler method a registered template belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct HandlerRef {
    /// Qualified class name of the provider
    pub class: String,
    /// Method name
    pub method: String,
    /// Position of the method within its class (disambiguates overloads)
    pub ordinal: usize,
    /// Operation the method serves
    pub operation: Operation,
}

impl fmt::Display for HandlerRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.class, self.method)
    }
}

/// A template accepted into a bucket together with its owning handler.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredTemplate {
    pub template: UriTemplateModel,
    pub owner: HandlerRef,
}

/// All templates sharing one matcher id.
///
/// Entries are kept in descending order of query parameter count so the most
/// query-constrained template is tried first; ties keep insertion order.
#[derive(Debug, Clone, Serialize)]
pub struct MatcherBucket {
    id: MatcherId,
    authority: String,
    normalized_path: String,
    entries: Vec<RegisteredTemplate>,
}

impl MatcherBucket {
    fn new(id: MatcherId, model: &UriTemplateModel) -> Self {
        Self {
            id,
            authority: model.authority().to_string(),
            normalized_path: model.normalized_path().to_string(),
            entries: Vec::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> MatcherId {
        self.id
    }

    #[must_use]
    pub fn authority(&self) -> &str {
        &self.authority
    }

    #[must_use]
    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    /// Registered templates, most query parameters first.
    #[must_use]
    pub fn entries(&self) -> &[RegisteredTemplate] {
        &self.entries
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn matches_structure(&self, model: &UriTemplateModel) -> bool {
        self.authority == model.authority() && self.normalized_path == model.normalized_path()
    }

    fn conflict(&self, model: &UriTemplateModel, operation: Operation) -> Option<&RegisteredTemplate> {
        self.entries
            .iter()
            .find(|entry| entry.owner.operation == operation && entry.template.fully_equals(model))
    }

    fn insert(&mut self, entry: RegisteredTemplate) {
        let count = entry.template.query_parameter_count();
        let index = self
            .entries
            .iter()
            .position(|existing| existing.template.query_parameter_count() < count)
            .unwrap_or(self.entries.len());
        self.entries.insert(index, entry);
    }
}

/// Deduplicates templates by structure and assigns matcher ids.
///
/// Owned by one processing round; there is no removal.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MatcherRegistry {
    next_id: u32,
    buckets: Vec<MatcherBucket>,
}

impl MatcherRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Find or create the bucket for `model`'s structure and stamp its id on the model.
    pub fn register(&mut self, model: &mut UriTemplateModel) -> MatcherId {
        let id = match self.buckets.iter().find(|b| b.matches_structure(model)) {
            Some(bucket) => {
                trace!(
                    matcher_id = %bucket.id,
                    template = %model.template(),
                    "Template joins existing matcher bucket"
                );
                bucket.id
            }
            None => {
                self.next_id += 1;
                let id = MatcherId(self.next_id);
                self.buckets.push(MatcherBucket::new(id, model));
                debug!(
                    matcher_id = %id,
                    authority = %model.authority(),
                    normalized_path = %model.normalized_path(),
                    "New matcher bucket"
                );
                id
            }
        };
        model.assign_matcher_id(id);
        id
    }

    /// Register `model` for `owner`, rejecting a fully-equal template already
    /// claimed by another handler of the same operation.
    pub fn register_exact(
        &mut self,
        mut model: UriTemplateModel,
        owner: HandlerRef,
    ) -> Result<MatcherId, ProcessingError> {
        let id = self.register(&mut model);
        if let Some(existing) = self.find_conflict(&model, owner.operation) {
            return Err(ProcessingError::DuplicatePath {
                template: model.template().to_string(),
                authority: model.authority().to_string(),
                existing_handler: existing.owner.to_string(),
            });
        }
        if let Some(bucket) = self.buckets.iter_mut().find(|b| b.id == id) {
            bucket.insert(RegisteredTemplate {
                template: model,
                owner,
            });
        }
        Ok(id)
    }

    /// The registration `model` would collide with, without registering anything.
    #[must_use]
    pub fn find_conflict(
        &self,
        model: &UriTemplateModel,
        operation: Operation,
    ) -> Option<&RegisteredTemplate> {
        self.buckets
            .iter()
            .find(|b| b.matches_structure(model))
            .and_then(|bucket| bucket.conflict(model, operation))
    }

    #[must_use]
    pub fn bucket(&self, id: MatcherId) -> Option<&MatcherBucket> {
        self.buckets.iter().find(|b| b.id == id)
    }

    /// Buckets in ascending id order.
    pub fn buckets(&self) -> impl Iterator<Item = &MatcherBucket> {
        self.buckets.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
