use serde::{Deserialize, Serialize};

/// Verification outcome for one marketing claim. The claim text is kept
/// verbatim as extracted from the packaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimVerdict {
    pub claim: String,
    pub verdict: Verdict,
    pub reason: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    True,
    False,
    Misleading,
    Unclear,
}

impl Verdict {
    pub fn as_str(&self) -> &str {
        match self {
            Verdict::True => "True",
            Verdict::False => "False",
            Verdict::Misleading => "Misleading",
            Verdict::Unclear => "Unclear",
        }
    }

    /// Tolerant parse of model output; anything unrecognized degrades to
    /// `Unclear`.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" => Verdict::True,
            "false" => Verdict::False,
            "misleading" => Verdict::Misleading,
            _ => Verdict::Unclear,
        }
    }
}

impl ClaimVerdict {
    /// Substituted for a claim the verification stage could not cover.
    pub fn fallback(claim: String) -> Self {
        Self {
            claim,
            verdict: Verdict::Unclear,
            reason: "Unable to verify due to analysis error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_parse_degrades_to_unclear() {
        assert_eq!(Verdict::parse("True"), Verdict::True);
        assert_eq!(Verdict::parse("FALSE"), Verdict::False);
        assert_eq!(Verdict::parse("misleading"), Verdict::Misleading);
        assert_eq!(Verdict::parse("probably"), Verdict::Unclear);
    }
}
