//! Prompt composition for grounded answers.
//!
//! The instruction template is fixed; only the `{context}` and `{question}`
//! placeholders are ever substituted. When retrieval is disabled the composer
//! is bypassed entirely and the raw question goes to the model instead.

use crate::models::ContextSnippet;

/// Instruction template for context-grounded answering.
///
/// The wording pins the model to the retrieved brochure text; composition
/// must never alter it beyond filling the two placeholders.
pub const PROMPT_TEMPLATE: &str = r#"Act as a California winery visit expert for visitors to California wine country who want an incredible visit and tasting experience.
You are a personal visit assistant named Databrick's CA Wine Country Visit Assistant.
Provide the most accurate information on California wineries based on brochures of different wineries provided to you in the context.
Only provide information if there is an exact match in the context.
Do not go outside of the information provided to you in the context at all.
Do not make anything up. Information should be 100 percent from that text.
Do not infer anything at all.

Context: {context}
Question: {question}
Answer:"#;

/// Joins snippet texts in retrieval order, separated by blank lines.
pub fn join_context(snippets: &[ContextSnippet]) -> String {
    snippets
        .iter()
        .map(ContextSnippet::text)
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the instruction template with the given context and question.
///
/// Pure and deterministic: same snippets and question, same prompt.
pub fn compose(snippets: &[ContextSnippet], question: &str) -> String {
    PROMPT_TEMPLATE
        .replace("{context}", &join_context(snippets))
        .replace("{question}", question)
}
