//! Shaded artifact packaging pipeline.

use crate::error::Result;
use crate::merge::merge_entries;
use crate::minimize::minimize;
use crate::publication::{
    ClassifierPolicy, PublicationPlan, SigningCredential, SigningStrategy, finalize_publications,
};
use crate::relocate::{RelocationRule, relocate};
use crate::resolver::ArtifactResolver;
use crate::types::{ArchiveEntry, ArtifactDescriptor, ArtifactKind, OutgoingVariant, ShadedConfiguration};
use serde::Serialize;

/// Everything the packager needs for one module build.
#[derive(Debug, Clone)]
pub struct PackagerInput {
    pub shaded: ShadedConfiguration,
    /// Entries of the module's own (plain) jar.
    pub project_entries: Vec<ArchiveEntry>,
    pub relocations: Vec<RelocationRule>,
    pub minimize: bool,
    /// Dotted package or class prefixes that survive minimization.
    pub keep: Vec<String>,
    /// The module's plain jar, as currently registered.
    pub plain: ArtifactDescriptor,
    /// Outgoing variants before substitution.
    pub variants: Vec<OutgoingVariant>,
    pub classifiers: ClassifierPolicy,
    pub signing: Option<SigningCredential>,
}

impl PackagerInput {
    /// Input with the standard `apiElements`/`runtimeElements` variants each
    /// exposing the plain jar.
    pub fn new(shaded: ShadedConfiguration, plain: ArtifactDescriptor) -> Self {
        let variants = OutgoingVariant::defaults_for(&plain);
        Self {
            shaded,
            project_entries: Vec::new(),
            relocations: Vec::new(),
            minimize: true,
            keep: Vec::new(),
            plain,
            variants,
            classifiers: ClassifierPolicy::default(),
            signing: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackagingOutcome {
    pub entries: Vec<ArchiveEntry>,
    pub removed_by_minimize: usize,
    pub relocated: usize,
    pub plan: PublicationPlan,
}

impl PackagingOutcome {
    pub fn entry(&self, path: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.path == path)
    }
}

pub struct ShadedPackager<R> {
    resolver: R,
}

impl<R: ArtifactResolver> ShadedPackager<R> {
    pub fn new(resolver: R) -> Self {
        Self { resolver }
    }

    /// Builds the shaded artifact and the publication plan.
    ///
    /// # Errors
    ///
    /// - `ShadeError::InvalidRule` for a malformed relocation rule
    /// - `ShadeError::ResolutionFailed` if any shaded dependency cannot be
    ///   resolved; nothing is produced in that case
    /// - `ShadeError::PublicationConflict` if default substitution fails
    pub async fn package(&self, input: PackagerInput) -> Result<PackagingOutcome> {
        for rule in &input.relocations {
            rule.validate()?;
        }

        tracing::info!(
            "packaging {} with {} shaded dependencies from '{}'",
            input.plain.base_name,
            input.shaded.dependencies.len(),
            input.shaded.name
        );

        let mut resolved = Vec::with_capacity(input.shaded.dependencies.len());
        for coordinate in &input.shaded.dependencies {
            let artifact = self.resolver.resolve(coordinate).await.inspect_err(|e| {
                tracing::error!("shaded resolution failed: {}", e);
            })?;
            tracing::debug!("resolved {} ({} entries)", coordinate, artifact.entries.len());
            resolved.push(artifact);
        }

        let mut archive = merge_entries(input.project_entries, resolved);

        let removed_by_minimize = if input.minimize {
            minimize(&mut archive, &input.keep)
        } else {
            0
        };
        let relocated = relocate(&mut archive, &input.relocations);

        let strategy = SigningStrategy::resolve(input.signing.as_ref());
        let shaded_artifact = ArtifactDescriptor::new(
            ArtifactKind::Shaded,
            input.plain.base_name.clone(),
            input.plain.version.clone(),
        );
        let plan = finalize_publications(
            &input.variants,
            &input.plain,
            &shaded_artifact,
            strategy,
            &input.classifiers,
        )?;

        Ok(PackagingOutcome {
            entries: archive.into_entries(),
            removed_by_minimize,
            relocated,
            plan,
        })
    }
}
