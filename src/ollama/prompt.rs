//! Prompt construction for per-commit summaries.

/// Instructions sent ahead of every patch.
const INSTRUCTIONS: &str = "\
Given the following Git patch, please generate a highly detailed and descriptive Git commit message. The message should cover:
1. A summary of the changes.
2. The reasoning behind the changes (why they were made).
3. Any problems that were encountered (if apparent from the patch or commit message).
4. The intended purpose or goal of the commit.

Do not include the \"Patch:\" prefix or any introductory phrases like \"Here's a commit message:\". Output only the commit message itself.

Patch:
";

/// Build the generation prompt for one patch.
///
/// The patch is embedded verbatim; JSON encoding of the request is the only escaping.
pub fn build_prompt(patch: &str) -> String {
    let mut prompt = String::with_capacity(INSTRUCTIONS.len() + patch.len());
    prompt.push_str(INSTRUCTIONS);
    prompt.push_str(patch);
    prompt
}
