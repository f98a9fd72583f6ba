//! Prompt augmentation: deterministic assembly of the retrieved context
//! into the base instruction text. Pure string work, no I/O.

use crate::retrieval::RagContext;

/// Prepend the retrieved context to `base_prompt` in fixed order:
/// provenance line, successful-proposal block, pattern block, base prompt.
/// An empty context returns the base prompt untouched.
pub fn augment(base_prompt: &str, context: &RagContext) -> String {
    if context.is_empty() {
        return base_prompt.to_string();
    }

    let mut prompt = String::new();
    prompt.push_str(&format!(
        "[Contexto RAG: {} propuestas exitosas, {} patrones de éxito]\n\n",
        context.successful_proposals.len(),
        context.detected_patterns.len()
    ));

    if !context.successful_proposals.is_empty() {
        prompt.push_str("=== PROPUESTAS EXITOSAS ANTERIORES ===\n");
        for (i, hit) in context.successful_proposals.iter().enumerate() {
            prompt.push_str(&format!(
                "{}. (calificación {}/5) {}\n",
                i + 1,
                hit.record.rating,
                hit.record.content
            ));
        }
        prompt.push('\n');
    }

    if !context.detected_patterns.is_empty() {
        prompt.push_str("=== PATRONES DE ÉXITO DETECTADOS ===\n");
        for hit in &context.detected_patterns {
            prompt.push_str(&format!(
                "- {}: {}\n",
                hit.record.pattern_type, hit.record.description
            ));
        }
        prompt.push('\n');
    }

    prompt.push_str(base_prompt);
    prompt
}
