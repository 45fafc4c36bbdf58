//! Outcome of a single LLM augmentation call.

/// Which augmentation produced a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentationKind {
    /// Short summary of objectives, methodology, and findings.
    Summary,
    /// Bullet-point key insights.
    Insights,
}

impl AugmentationKind {
    /// Fixed text substituted when generation fails.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Summary => "Summary generation failed",
            Self::Insights => "Insight extraction failed",
        }
    }

    /// Name used in log fields.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Insights => "insights",
        }
    }
}

/// Generated text, or the placeholder that replaced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Augmentation {
    /// The model returned text (already trimmed).
    Generated(String),
    /// The completion call failed.
    Degraded {
        /// Which augmentation failed.
        kind: AugmentationKind,
        /// Error text, kept for logging only.
        reason: String,
    },
}

impl Augmentation {
    /// Build a successful outcome, trimming surrounding whitespace.
    #[must_use]
    pub fn generated(text: &str) -> Self {
        Self::Generated(text.trim().to_string())
    }

    /// Build a degraded outcome.
    #[must_use]
    pub fn degraded(kind: AugmentationKind, reason: impl Into<String>) -> Self {
        Self::Degraded { kind, reason: reason.into() }
    }

    /// Whether the placeholder is in use.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// Text as shown to callers.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Degraded { kind, .. } => kind.placeholder(),
        }
    }

    /// Consume into the text shown to callers.
    #[must_use]
    pub fn into_text(self) -> String {
        match self {
            Self::Generated(text) => text,
            Self::Degraded { kind, .. } => kind.placeholder().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_is_trimmed() {
        let aug = Augmentation::generated("\n  A concise summary.  \n");
        assert_eq!(aug.text(), "A concise summary.");
        assert!(!aug.is_degraded());
    }

    #[test]
    fn test_degraded_uses_placeholder() {
        let summary = Augmentation::degraded(AugmentationKind::Summary, "timeout");
        let insights = Augmentation::degraded(AugmentationKind::Insights, "500");
        assert_eq!(summary.into_text(), "Summary generation failed");
        assert_eq!(insights.text(), "Insight extraction failed");
    }
}
