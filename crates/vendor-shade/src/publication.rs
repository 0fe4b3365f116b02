//! Default-artifact substitution and signing input selection.
//!
//! Exactly one artifact per outgoing variant carries the default classifier.
//! Which one depends on the [`SigningStrategy`], chosen once from whether a
//! signing credential is configured:
//!
//! - `SignShaded`: the plain jar stays the default; the shaded jar is
//!   published under a classifier and is the input of the signing step.
//! - `SignDefault`: the shaded jar becomes the classifier-less default and
//!   the plain jar is relabeled `thin` and withdrawn from the outgoing
//!   variants.

use crate::error::{Result, ShadeError};
use crate::types::{ArtifactDescriptor, ArtifactKind, Classifier, OutgoingVariant};
use serde::{Deserialize, Serialize};

/// Signing key reference. Only its presence matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SigningCredential {
    pub key_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SigningStrategy {
    SignShaded,
    SignDefault,
}

impl SigningStrategy {
    pub fn resolve(credential: Option<&SigningCredential>) -> Self {
        match credential {
            Some(c) if !c.key_id.trim().is_empty() => Self::SignShaded,
            _ => Self::SignDefault,
        }
    }
}

/// Classifier names applied during substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ClassifierPolicy {
    /// Classifier of the shaded jar when it is not the default.
    pub shaded: String,
    /// Classifier of the plain jar once the shaded jar is the default.
    pub thin: String,
}

impl Default for ClassifierPolicy {
    fn default() -> Self {
        Self {
            shaded: "all".into(),
            thin: "thin".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationPlan {
    pub strategy: SigningStrategy,
    pub plain: ArtifactDescriptor,
    pub shaded: ArtifactDescriptor,
    pub variants: Vec<OutgoingVariant>,
    /// Artifact handed to the signing step, if signing is configured.
    pub signing_input: Option<ArtifactDescriptor>,
}

impl PublicationPlan {
    /// The artifact consumers receive without asking for a classifier.
    pub fn default_artifact(&self) -> &ArtifactDescriptor {
        match self.strategy {
            SigningStrategy::SignShaded => &self.plain,
            SigningStrategy::SignDefault => &self.shaded,
        }
    }
}

fn check_single_default(variants: &[OutgoingVariant]) -> Result<()> {
    for variant in variants {
        let count = variant.default_artifacts().count();
        if count != 1 {
            return Err(ShadeError::PublicationConflict {
                variant: variant.name.clone(),
                count,
            });
        }
    }
    Ok(())
}

/// Rewrites `variants` so that the artifact chosen by `strategy` is the only
/// default-classifier artifact in each.
///
/// Artifacts are matched by [`ArtifactKind`], never by file name. Running it
/// again on its own output yields the same plan.
///
/// # Errors
///
/// Returns `ShadeError::PublicationConflict` when a variant does not end up
/// with exactly one default-classifier artifact.
pub fn finalize_publications(
    variants: &[OutgoingVariant],
    plain: &ArtifactDescriptor,
    shaded: &ArtifactDescriptor,
    strategy: SigningStrategy,
    classifiers: &ClassifierPolicy,
) -> Result<PublicationPlan> {
    let (plain, shaded) = match strategy {
        SigningStrategy::SignShaded => (
            plain.clone().with_classifier(Classifier::DEFAULT),
            shaded.clone().with_classifier(Classifier::named(&classifiers.shaded)),
        ),
        SigningStrategy::SignDefault => (
            plain.clone().with_classifier(Classifier::named(&classifiers.thin)),
            shaded.clone().with_classifier(Classifier::DEFAULT),
        ),
    };

    let variants: Vec<OutgoingVariant> = variants
        .iter()
        .map(|variant| {
            let mut artifacts = Vec::with_capacity(variant.artifacts.len() + 1);
            for artifact in &variant.artifacts {
                match (artifact.kind, strategy) {
                    (ArtifactKind::Shaded, _) => {}
                    (ArtifactKind::Plain, SigningStrategy::SignShaded) => {
                        artifacts.push(plain.clone());
                    }
                    (ArtifactKind::Plain, SigningStrategy::SignDefault)
                        if artifact.classifier.is_default() =>
                    {
                        tracing::debug!(
                            "removing default plain artifact {} from {}",
                            artifact.file_name(),
                            variant.name
                        );
                    }
                    _ => artifacts.push(artifact.clone()),
                }
            }
            if !artifacts.contains(&shaded) {
                artifacts.push(shaded.clone());
            }
            OutgoingVariant::new(variant.name.clone(), artifacts)
        })
        .collect();

    check_single_default(&variants)?;

    let signing_input = match strategy {
        SigningStrategy::SignShaded => Some(shaded.clone()),
        SigningStrategy::SignDefault => None,
    };

    tracing::info!(
        "publishing {} as default ({:?})",
        match strategy {
            SigningStrategy::SignShaded => plain.file_name(),
            SigningStrategy::SignDefault => shaded.file_name(),
        },
        strategy
    );

    Ok(PublicationPlan {
        strategy,
        plain,
        shaded,
        variants,
        signing_input,
    })
}
