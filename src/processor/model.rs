use serde::Serialize;
use std::collections::BTreeSet;

use crate::binder::ParameterBinding;
use crate::manifest::Operation;
use crate::matcher::MatcherId;
use crate::template::UriTemplateModel;

/// A handler method with its resolved template and parameter bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DelegateMethod {
    /// Qualified name of the enclosing class
    pub class: String,
    pub name: String,
    /// Position within the class's declared methods
    pub ordinal: usize,
    pub operation: Operation,
    pub return_type: String,
    pub template: String,
    pub matcher_id: MatcherId,
    /// One binding per declared parameter, in declaration order
    pub bindings: Vec<ParameterBinding>,
}

/// One template of a bucket together with the delegate it dispatches to.
#[derive(Debug, Clone, Serialize)]
pub struct RouteModel {
    pub template: UriTemplateModel,
    pub delegate: DelegateMethod,
}

impl RouteModel {
    #[must_use]
    pub fn operation(&self) -> Operation {
        self.delegate.operation
    }
}

/// A provider's share of one matcher bucket.
#[derive(Debug, Clone, Serialize)]
pub struct BucketModel {
    pub matcher_id: MatcherId,
    pub normalized_path: String,
    /// Most query-constrained first
    pub routes: Vec<RouteModel>,
}

/// Everything the renderer needs for one provider class.
#[derive(Debug, Clone, Serialize)]
pub struct ProviderModel {
    pub qualified_name: String,
    pub simple_name: String,
    /// Empty for the default package
    pub package: String,
    /// Generated router class name
    pub router_class: String,
    pub authority: String,
    /// Ascending matcher id
    pub buckets: Vec<BucketModel>,
}

impl ProviderModel {
    /// Qualified name of the generated router class.
    #[must_use]
    pub fn router_qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.router_class.clone()
        } else {
            format!("{}.{}", self.package, self.router_class)
        }
    }

    /// Operations with at least one route, in [`Operation`] declaration order.
    #[must_use]
    pub fn operations(&self) -> BTreeSet<Operation> {
        self.routes().map(RouteModel::operation).collect()
    }

    /// Every route across all buckets, bucket by bucket.
    pub fn routes(&self) -> impl Iterator<Item = &RouteModel> {
        self.buckets.iter().flat_map(|bucket| bucket.routes.iter())
    }

    #[must_use]
    pub fn delegate_count(&self) -> usize {
        self.routes().count()
    }
}

/// Aggregate model produced by one processing round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RouterModel {
    pub providers: Vec<ProviderModel>,
}

impl RouterModel {
    #[must_use]
    pub fn provider(&self, qualified_name: &str) -> Option<&ProviderModel> {
        self.providers
            .iter()
            .find(|p| p.qualified_name == qualified_name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
