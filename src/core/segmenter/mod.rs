//! Response segmentation for interview replies.
//!
//! A model turn that delivers a coding question arrives as one text blob:
//! a spoken lead-in followed by a `**Problem Statement:**` block with
//! optional `**Example Input and Output:**` and `**Constraints:**`
//! sub-sections, terminated by the posting announcement sentence. The
//! segmenter splits that blob into a spoken portion (displayed and
//! synthesized) and a posted portion (displayed only, never voiced).
//!
//! The decision rule is deliberately coarse: a reply is treated as carrying
//! an embedded problem if and only if it contains the case-insensitive
//! substring "problem statement" anywhere. Replies that fail the rule take
//! the default path and never touch the extraction logic.
//!
//! Extraction works over fixed case-insensitive markers with a small
//! scanner rather than a lookahead regex; the `regex` crate intentionally
//! has no lookahead, and the marker set is closed.

use once_cell::sync::Lazy;
use regex::Regex;

/// Decision rule: does this reply embed a coding problem at all?
static PROBLEM_DECISION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)problem statement").expect("static pattern compiles"));

/// Start of the extractable block.
const PROBLEM_MARKER: &str = "**problem statement:**";
/// Optional sub-section markers inside the block.
const EXAMPLE_MARKER: &str = "**example input and output:**";
const CONSTRAINTS_MARKER: &str = "**constraints:**";
/// The posting announcement that terminates the block. The leading newline
/// keeps an inline mention from truncating the block early.
const POSTED_BOUNDARY: &str = "\ni have posted the question for you";

/// Behavior when the decision rule fires but the `**Problem Statement:**`
/// marker cannot be located (e.g. prose that merely discusses "the problem
/// statement of this question").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtractionFallback {
    /// Treat the entire reply as spoken text, no posted portion. This is
    /// what the system has always done.
    #[default]
    SpeakFullResponse,
    /// Treat the entire reply as display-only text with nothing spoken.
    PostFullResponse,
}

impl std::fmt::Display for ExtractionFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionFallback::SpeakFullResponse => write!(f, "speak-full-response"),
            ExtractionFallback::PostFullResponse => write!(f, "post-full-response"),
        }
    }
}

impl std::str::FromStr for ExtractionFallback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('_', "-").as_str() {
            "speak-full-response" | "speak" => Ok(ExtractionFallback::SpeakFullResponse),
            "post-full-response" | "post" => Ok(ExtractionFallback::PostFullResponse),
            _ => Err(format!(
                "Unsupported extraction fallback: {s}. Supported: speak-full-response, post-full-response"
            )),
        }
    }
}

/// One model reply split into its spoken and posted portions.
///
/// Computed fresh from each reply; never persisted or mutated. When
/// `posted_problem` is present it contains the problem-statement marker
/// and, where the source had them, the example and constraints sections in
/// that fixed order, joined by single newlines with no surrounding
/// whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedResponse {
    /// Portion to display and synthesize. May be empty.
    pub spoken_text: String,
    /// Portion to display only. Absent when the reply carried no problem.
    pub posted_problem: Option<String>,
}

impl SegmentedResponse {
    fn spoken_only(text: &str) -> Self {
        Self {
            spoken_text: text.trim().to_string(),
            posted_problem: None,
        }
    }
}

/// True when the text still carries the case-insensitive problem marker.
///
/// Callers use this to defend against a degenerate extraction before
/// posting the problem block.
pub fn contains_problem_marker(text: &str) -> bool {
    PROBLEM_DECISION_RE.is_match(text)
}

/// Split one model reply into spoken and posted portions.
///
/// The default path (decision rule does not fire) returns the whole trimmed
/// reply as `spoken_text` without exercising any extraction logic, which
/// also makes the operation idempotent: a produced `spoken_text` no longer
/// contains the decision substring, so re-segmenting it is a no-op.
pub fn segment_response(text: &str, fallback: ExtractionFallback) -> SegmentedResponse {
    if !contains_problem_marker(text) {
        return SegmentedResponse::spoken_only(text);
    }

    // Byte offsets into the ASCII-lowercased copy are valid in the original:
    // to_ascii_lowercase is a byte-for-byte mapping and every marker is ASCII.
    let lower = text.to_ascii_lowercase();

    let Some(block_start) = lower.find(PROBLEM_MARKER) else {
        // Decision substring appeared in prose only. Never guess at a block.
        return match fallback {
            ExtractionFallback::SpeakFullResponse => SegmentedResponse::spoken_only(text),
            ExtractionFallback::PostFullResponse => SegmentedResponse {
                spoken_text: String::new(),
                posted_problem: Some(text.trim().to_string()),
            },
        };
    };

    let block_end = lower[block_start..]
        .find(POSTED_BOUNDARY)
        .map_or(text.len(), |rel| block_start + rel);

    let span = &text[block_start..block_end];
    let span_lower = &lower[block_start..block_end];

    let example_at = span_lower.find(EXAMPLE_MARKER);
    let constraints_at = span_lower.find(CONSTRAINTS_MARKER);

    // The problem statement runs from its marker to the first sub-section.
    let first_section = [example_at, constraints_at]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(span.len());

    let problem = &span[..first_section];
    let example = example_at.map(|at| {
        let end = constraints_at.filter(|&c| c > at).unwrap_or(span.len());
        &span[at..end]
    });
    let constraints = constraints_at.map(|at| {
        let end = example_at.filter(|&e| e > at).unwrap_or(span.len());
        &span[at..end]
    });

    // Reassemble in the fixed order regardless of source ordering:
    // problem statement, example, constraints.
    let posted = [Some(problem), example, constraints]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    // Everything from the marker through the posting announcement (or end
    // of text) is removed from the spoken portion, announcement included.
    let spoken = text[..block_start].trim();

    SegmentedResponse {
        spoken_text: spoken.to_string(),
        posted_problem: (!posted.is_empty()).then_some(posted),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_REPLY: &str = "Great, let's begin.\n\
        **Problem Statement:** Reverse a string.\n\
        **Example Input and Output:** in='ab' out='ba'\n\
        **Constraints:** length <= 1000\n\
        I have posted the question for you. Please review.";

    #[test]
    fn test_plain_reply_is_all_spoken() {
        let reply = "That sounds like a solid approach. What is the time complexity?";
        let result = segment_response(reply, ExtractionFallback::default());
        assert_eq!(result.spoken_text, reply);
        assert!(result.posted_problem.is_none());
    }

    #[test]
    fn test_full_block_splits_into_three_sections() {
        let result = segment_response(FULL_REPLY, ExtractionFallback::default());
        assert_eq!(result.spoken_text, "Great, let's begin.");
        assert_eq!(
            result.posted_problem.as_deref(),
            Some(
                "**Problem Statement:** Reverse a string.\n\
                 **Example Input and Output:** in='ab' out='ba'\n\
                 **Constraints:** length <= 1000"
            )
        );
    }

    #[test]
    fn test_posting_announcement_excluded_from_both_outputs() {
        let result = segment_response(FULL_REPLY, ExtractionFallback::default());
        assert!(!result.spoken_text.contains("I have posted"));
        assert!(!result.posted_problem.unwrap().contains("I have posted"));
    }

    #[test]
    fn test_segmentation_is_idempotent_on_spoken_output() {
        let first = segment_response(FULL_REPLY, ExtractionFallback::default());
        let second = segment_response(&first.spoken_text, ExtractionFallback::default());
        assert_eq!(second.spoken_text, first.spoken_text);
        assert!(second.posted_problem.is_none());
    }

    #[test]
    fn test_prose_mention_without_marker_falls_back_to_spoken() {
        let reply = "Let's discuss the problem statement of this question in more depth.";
        let result = segment_response(reply, ExtractionFallback::SpeakFullResponse);
        assert_eq!(result.spoken_text, reply);
        assert!(result.posted_problem.is_none());
    }

    #[test]
    fn test_prose_mention_without_marker_can_post_instead() {
        let reply = "Let's discuss the problem statement of this question.";
        let result = segment_response(reply, ExtractionFallback::PostFullResponse);
        assert!(result.spoken_text.is_empty());
        assert_eq!(result.posted_problem.as_deref(), Some(reply));
    }

    #[test]
    fn test_marker_case_is_insensitive() {
        let reply = "Here we go.\n**PROBLEM STATEMENT:** Find the median.\n**constraints:** n <= 10";
        let result = segment_response(reply, ExtractionFallback::default());
        assert_eq!(result.spoken_text, "Here we go.");
        assert_eq!(
            result.posted_problem.as_deref(),
            Some("**PROBLEM STATEMENT:** Find the median.\n**constraints:** n <= 10")
        );
    }

    #[test]
    fn test_block_without_subsections() {
        let reply = "Ready?\n**Problem Statement:** Sum an array of integers.";
        let result = segment_response(reply, ExtractionFallback::default());
        assert_eq!(result.spoken_text, "Ready?");
        assert_eq!(
            result.posted_problem.as_deref(),
            Some("**Problem Statement:** Sum an array of integers.")
        );
    }

    #[test]
    fn test_block_at_start_yields_empty_spoken_text() {
        let reply = "**Problem Statement:** Rotate a matrix.\n**Constraints:** n <= 500";
        let result = segment_response(reply, ExtractionFallback::default());
        assert!(result.spoken_text.is_empty());
        assert_eq!(
            result.posted_problem.as_deref(),
            Some("**Problem Statement:** Rotate a matrix.\n**Constraints:** n <= 500")
        );
    }

    #[test]
    fn test_sections_reassembled_in_fixed_order() {
        // Constraints emitted before the example still come out last.
        let reply = "Here is one.\n\
            **Problem Statement:** Merge two sorted lists.\n\
            **Constraints:** total length <= 10^5\n\
            **Example Input and Output:** [1,3]+[2] -> [1,2,3]\n\
            I have posted the question for you.";
        let result = segment_response(reply, ExtractionFallback::default());
        assert_eq!(
            result.posted_problem.as_deref(),
            Some(
                "**Problem Statement:** Merge two sorted lists.\n\
                 **Example Input and Output:** [1,3]+[2] -> [1,2,3]\n\
                 **Constraints:** total length <= 10^5"
            )
        );
    }

    #[test]
    fn test_posted_portion_retains_marker_for_caller_check() {
        let result = segment_response(FULL_REPLY, ExtractionFallback::default());
        assert!(contains_problem_marker(&result.posted_problem.unwrap()));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let reply = "  Intro line.  \n**Problem Statement:**   Count vowels.   ";
        let result = segment_response(reply, ExtractionFallback::default());
        assert_eq!(result.spoken_text, "Intro line.");
        assert_eq!(
            result.posted_problem.as_deref(),
            Some("**Problem Statement:**   Count vowels.")
        );
    }

    #[test]
    fn test_extraction_fallback_parsing() {
        assert_eq!(
            "speak-full-response".parse::<ExtractionFallback>().unwrap(),
            ExtractionFallback::SpeakFullResponse
        );
        assert_eq!(
            "POST_FULL_RESPONSE".parse::<ExtractionFallback>().unwrap(),
            ExtractionFallback::PostFullResponse
        );
        assert!("invalid".parse::<ExtractionFallback>().is_err());
    }

    #[test]
    fn test_extraction_fallback_display_round_trip() {
        for fallback in [
            ExtractionFallback::SpeakFullResponse,
            ExtractionFallback::PostFullResponse,
        ] {
            assert_eq!(
                fallback.to_string().parse::<ExtractionFallback>().unwrap(),
                fallback
            );
        }
    }
}
