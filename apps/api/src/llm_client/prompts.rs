// Shared prompt fragments.
// The gateway keeps its own prompt templates in gateway/prompts.rs;
// this file holds the pieces more than one template needs.

/// Output rule for every prompt whose reply is displayed in the canvas.
pub const HTML_ONLY_OUTPUT: &str = "Return ONLY the HTML string. \
    Do not include markdown code fences like ```html. \
    Do not include explanations.";

/// How the model should treat the free-text notes field.
pub const NOTES_INSTRUCTION: &str = "If specific context is needed (e.g. the body of a warning \
    letter or the reason for a decision), use the \"custom_notes\" value from the profile.";
