use askama::Template;
use std::fs;
use std::path::{Path, PathBuf};

use super::java;
use crate::config::TypeNames;
use crate::manifest::Operation;
use crate::processor::{ProviderModel, RouteModel, RouterModel};

/// One `UriMatcher` registration.
#[derive(Debug, Clone)]
pub struct MatcherView {
    /// Java constant holding the matcher id
    pub constant: String,
    pub id: u32,
    /// Java literal of the path passed to `addURI`
    pub path: String,
    /// Normalized path, for the comment
    pub comment: String,
}

/// One delegate call inside a `case`.
#[derive(Debug, Clone)]
pub struct RouteView {
    /// Java boolean expression over the query string, empty when unconditional
    pub condition: String,
    /// `method(arg, ...)`
    pub call: String,
    /// Declared template, for the comment
    pub template: String,
}

/// One `case` of an entry point's `switch`.
#[derive(Debug, Clone)]
pub struct CaseView {
    pub constant: String,
    pub routes: Vec<RouteView>,
    /// The last route is conditional, so the case must not fall through
    pub needs_break: bool,
}

/// One generated entry point (`query`, `insert`, ...).
#[derive(Debug, Clone)]
pub struct OperationView {
    pub signature: String,
    pub cases: Vec<CaseView>,
}

/// Template data for one generated router class
#[derive(Template)]
#[template(path = "router.java.txt", escape = "none")]
pub struct RouterTemplateData {
    /// Package of the provider, empty for the default package
    pub package: String,
    pub router_class: String,
    /// Simple name of the provider the router delegates to
    pub provider_class: String,
    /// Java literal of the authority
    pub authority: String,
    pub uri_type: String,
    pub matchers: Vec<MatcherView>,
    pub operations: Vec<OperationView>,
}

fn matcher_constant(id: u32) -> String {
    format!("MATCHER_{id}")
}

fn route_view(route: &RouteModel, types: &TypeNames) -> RouteView {
    let operation = route.operation();
    let segments = route.template.segments();
    let args = route
        .delegate
        .bindings
        .iter()
        .map(|binding| java::argument(binding, segments, operation, types))
        .collect::<Vec<_>>()
        .join(", ");
    RouteView {
        condition: java::query_condition(route.template.query_parameters()),
        call: format!("{}({})", route.delegate.name, args),
        template: java::line_comment(route.template.template()),
    }
}

fn operation_view(provider: &ProviderModel, operation: Operation, types: &TypeNames) -> OperationView {
    let cases = provider
        .buckets
        .iter()
        .filter_map(|bucket| {
            let routes: Vec<RouteView> = bucket
                .routes
                .iter()
                .filter(|route| route.operation() == operation)
                .map(|route| route_view(route, types))
                .collect();
            let last_unconditional = routes.last()?.condition.is_empty();
            Some(CaseView {
                constant: matcher_constant(bucket.matcher_id.get()),
                needs_break: !last_unconditional,
                routes,
            })
        })
        .collect();
    OperationView {
        signature: java::signature(operation, types),
        cases,
    }
}

impl RouterTemplateData {
    /// Build the view of one provider.
    pub fn new(provider: &ProviderModel, types: &TypeNames) -> Self {
        let matchers = provider
            .buckets
            .iter()
            .map(|bucket| MatcherView {
                constant: matcher_constant(bucket.matcher_id.get()),
                id: bucket.matcher_id.get(),
                path: java::string_literal(&java::matcher_path(&bucket.normalized_path)),
                comment: java::line_comment(&bucket.normalized_path),
            })
            .collect();
        let operations = provider
            .operations()
            .into_iter()
            .map(|operation| operation_view(provider, operation, types))
            .collect();
        Self {
            package: provider.package.clone(),
            router_class: provider.router_class.clone(),
            provider_class: provider.simple_name.clone(),
            authority: java::string_literal(&provider.authority),
            uri_type: types.uri.clone(),
            matchers,
            operations,
        }
    }
}

/// Render the router source for one provider.
///
/// # Errors
///
/// Returns an error if template rendering fails
pub fn render_router(provider: &ProviderModel, types: &TypeNames) -> anyhow::Result<String> {
    Ok(RouterTemplateData::new(provider, types).render()?)
}

/// Output path of a provider's router below `out_dir`, following its package.
pub fn router_source_path(out_dir: &Path, provider: &ProviderModel) -> PathBuf {
    let mut path = out_dir.to_path_buf();
    for part in provider.package.split('.').filter(|p| !p.is_empty()) {
        path.push(part);
    }
    path.push(format!("{}.java", provider.router_class));
    path
}

/// Write one router source per provider.
///
/// Existing files are skipped unless `force` is set. With `dry_run` nothing is
/// written and the paths that would be written are returned.
///
/// # Errors
///
/// Returns an error if rendering or file writing fails
pub fn write_router_sources(
    model: &RouterModel,
    types: &TypeNames,
    out_dir: &Path,
    force: bool,
    dry_run: bool,
) -> anyhow::Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(model.providers.len());
    for provider in &model.providers {
        let path = router_source_path(out_dir, provider);
        if path.exists() && !force {
            println!("⚠️  Skipping existing router file: {path:?}");
            continue;
        }
        let rendered = render_router(provider, types)?;
        if dry_run {
            println!("📝 Would write router: {path:?}");
        } else {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, rendered)?;
            println!("✅ Generated router: {path:?}");
        }
        written.push(path);
    }
    Ok(written)
}

/// Write the aggregate model as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if serialization or file writing fails
pub fn write_model_json(model: &RouterModel, path: &Path) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(model)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    println!("✅ Wrote router model: {path:?}");
    Ok(())
}
