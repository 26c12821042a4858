//! Response segmenter behavior tests
//!
//! These exercise the segmenter the way the session loop uses it: a full
//! model reply goes in, a spoken portion and an optional posted problem
//! come out.

use interview_gateway::core::segmenter::{
    ExtractionFallback, contains_problem_marker, segment_response,
};

const FULL_REPLY: &str = "Great, let's get started with a coding question.\n\n\
**Problem Statement:**\nGiven an array of integers, return indices of the two numbers that add up to a target.\n\n\
**Example Input and Output:**\nInput: nums = [2, 7, 11, 15], target = 9\nOutput: [0, 1]\n\n\
**Constraints:**\n- 2 <= nums.length <= 10^4\n- Only one valid answer exists.\n\
I have posted the question for you. Please take a moment to review it.";

/// A conversational reply with no problem marker passes through whole
#[test]
fn plain_reply_is_spoken_verbatim() {
    let reply = "That sounds great! Tell me a bit about your background.";
    let result = segment_response(reply, ExtractionFallback::default());

    assert_eq!(result.spoken_text, reply);
    assert!(result.posted_problem.is_none());
}

/// A reply containing a formatted question splits into intro and problem
#[test]
fn formatted_question_is_split() {
    let result = segment_response(FULL_REPLY, ExtractionFallback::default());

    assert_eq!(
        result.spoken_text,
        "Great, let's get started with a coding question."
    );

    let problem = result.posted_problem.expect("problem should be extracted");
    assert!(problem.starts_with("**Problem Statement:**"));
    assert!(problem.contains("**Example Input and Output:**"));
    assert!(problem.contains("**Constraints:**"));
    // The boundary sentence belongs to neither output
    assert!(!problem.contains("I have posted the question"));
    assert!(!result.spoken_text.contains("I have posted the question"));
}

/// The posted problem keeps its sections in canonical order
#[test]
fn posted_problem_section_order() {
    let result = segment_response(FULL_REPLY, ExtractionFallback::default());
    let problem = result.posted_problem.unwrap();

    let p = problem.find("**Problem Statement:**").unwrap();
    let e = problem.find("**Example Input and Output:**").unwrap();
    let c = problem.find("**Constraints:**").unwrap();
    assert!(p < e && e < c);
}

/// The example section is optional; problem and constraints suffice
#[test]
fn example_section_is_optional() {
    let reply = "Here is your question.\n\
**Problem Statement:**\nReverse a linked list.\n\
**Constraints:**\n- 0 <= n <= 5000";

    let result = segment_response(reply, ExtractionFallback::default());
    let problem = result.posted_problem.unwrap();
    assert!(problem.contains("**Problem Statement:**"));
    assert!(problem.contains("**Constraints:**"));
    assert!(!problem.contains("**Example Input and Output:**"));
}

/// Decision rule fires but no extractable block: speak-full-response
/// keeps everything spoken
#[test]
fn fallback_speaks_full_response() {
    let reply = "Let me describe the problem statement verbally instead of posting it.";
    let result = segment_response(reply, ExtractionFallback::SpeakFullResponse);

    assert_eq!(result.spoken_text, reply);
    assert!(result.posted_problem.is_none());
}

/// Decision rule fires but no extractable block: post-full-response
/// moves everything to the posted channel
#[test]
fn fallback_posts_full_response() {
    let reply = "Let me describe the problem statement verbally instead of posting it.";
    let result = segment_response(reply, ExtractionFallback::PostFullResponse);

    assert!(result.spoken_text.is_empty());
    assert_eq!(result.posted_problem.as_deref(), Some(reply));
}

/// Chatter after the closing sentence is dropped, not spoken and not
/// posted; the spoken portion is only what precedes the problem block
#[test]
fn trailing_text_after_closing_sentence_is_dropped() {
    let reply = "Here is your question.\n\
**Problem Statement:**\nReverse a linked list.\n\
**Constraints:**\n- 0 <= n <= 5000\n\
I have posted the question for you.\n\
By the way, feel free to think out loud while you work.";

    let result = segment_response(reply, ExtractionFallback::default());

    assert_eq!(result.spoken_text, "Here is your question.");
    let problem = result.posted_problem.unwrap();
    assert!(problem.contains("**Constraints:**"));
    assert!(!problem.contains("think out loud"));
    assert!(!result.spoken_text.contains("think out loud"));
}

/// Marker matching is case-insensitive, byte offsets are exact
#[test]
fn marker_matching_is_case_insensitive() {
    let reply = "Ready?\n**PROBLEM STATEMENT:**\nDo the thing.\n**constraints:**\nNone really.";
    let result = segment_response(reply, ExtractionFallback::default());

    assert_eq!(result.spoken_text, "Ready?");
    let problem = result.posted_problem.unwrap();
    // Original casing is preserved in the extracted text
    assert!(problem.contains("**PROBLEM STATEMENT:**"));
    assert!(problem.contains("**constraints:**"));
}

/// The decision gate itself
#[test]
fn problem_marker_detection() {
    assert!(contains_problem_marker("a **Problem Statement:** here"));
    assert!(contains_problem_marker("PROBLEM STATEMENT"));
    assert!(!contains_problem_marker("let's discuss your approach"));
}

/// Multi-byte characters around the markers must not panic the scanner
#[test]
fn unicode_text_is_handled() {
    let reply = "Très bien! 🎉\n**Problem Statement:**\nCompute the naïve solution.\n\
**Constraints:**\n- n ≤ 10⁴";
    let result = segment_response(reply, ExtractionFallback::default());

    assert_eq!(result.spoken_text, "Très bien! 🎉");
    assert!(result.posted_problem.unwrap().contains("naïve"));
}
