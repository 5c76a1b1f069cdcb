//! # Manifest Module
//!
//! Structural facts about annotated provider classes, as reported by the host
//! compiler's reflection API, serialized as YAML or JSON.
//!
//! ```yaml
//! providers:
//!   - class: com.example.notes.NotesProvider
//!     authority: com.example.notes
//!     methods:
//!       - name: queryNote
//!         operation: query
//!         template: /notes/{id}
//!         return_type: android.database.Cursor
//!         parameters:
//!           - name: id
//!             type: long
//!             annotations:
//!               - path_param: id
//!           - name: projection
//!             type: java.lang.String[]
//!             annotations: [projection]
//! ```

mod load;
mod types;
#[cfg(test)]
mod tests;

pub use load::load_manifest;
pub use types::{AnnotationDecl, Manifest, MethodDecl, Operation, ParameterDecl, ProviderDecl};
