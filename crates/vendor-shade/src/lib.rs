//! Shaded artifact packaging.
//!
//! Resolves an isolated dependency set, merges it with the module's own
//! entries, strips unreferenced classes, relocates vendored packages and
//! decides which artifact the module publishes as its default.

pub mod error;
pub mod merge;
pub mod minimize;
pub mod packager;
pub mod publication;
pub mod relocate;
pub mod resolver;
pub mod types;

pub use error::{Result, ShadeError};
pub use merge::{EntryOrigin, MergedArchive, merge_entries};
pub use minimize::minimize;
pub use packager::{PackagerInput, PackagingOutcome, ShadedPackager};
pub use publication::{
    ClassifierPolicy, PublicationPlan, SigningCredential, SigningStrategy, finalize_publications,
};
pub use relocate::{RelocationRule, relocate};
pub use resolver::{ArtifactResolver, InMemoryResolver, IndexResolver, ResolvedArtifact};
pub use types::{
    ArchiveEntry, ArtifactDescriptor, ArtifactKind, Classifier, OutgoingVariant,
    ShadedConfiguration,
};
