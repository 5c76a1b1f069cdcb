//! # Generator Module
//!
//! Renders one Java router class per provider from the aggregate
//! [`RouterModel`](crate::processor::RouterModel), using Askama templates from
//! the `templates/` directory.
//!
//! ```text
//! manifest → processing round → RouterModel → router.java.txt → <package>/<Router>.java
//! ```
//!
//! A generated router:
//!
//! - declares one `int` constant per matcher id and registers every
//!   normalized path with an `android.content.UriMatcher`
//! - exposes one entry point per operation that has handlers (`query`,
//!   `insert`, `update`, `delete`, `getType`)
//! - switches on the matcher id, then tries the bucket's templates most
//!   query-constrained first, checking literal query values and the presence
//!   of query placeholders
//! - calls the delegate with one positional argument per declared parameter
//!
//! Existing files are kept unless `force` is set, as for every generated file.

mod java;
mod project;
mod templates;

pub use project::{check_manifest, generate_routers, GenerateOptions, GenerationReport};
pub use templates::{
    render_router, router_source_path, write_model_json, write_router_sources, CaseView,
    MatcherView, OperationView, RouteView, RouterTemplateData,
};
