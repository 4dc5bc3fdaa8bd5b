use crate::application::ports::SearchResult;
use crate::domain::{Message, Prompt};

pub const FILES_PROVIDED_HEADER: &str = "\n\nThe following files were provided:\n";

const CONTEXT_SEPARATOR: &str = "---------------------";

/// Appends the list of ingested files to the query. The header is only added
/// when the request carried files, and only files that were ingested are
/// listed.
pub fn annotate_query(query: &str, files_attached: bool, ingested: &[String]) -> String {
    if !files_attached {
        return query.to_string();
    }

    let mut annotated = String::with_capacity(query.len() + FILES_PROVIDED_HEADER.len());
    annotated.push_str(query);
    annotated.push_str(FILES_PROVIDED_HEADER);
    for filename in ingested {
        annotated.push_str("- ");
        annotated.push_str(filename);
        annotated.push('\n');
    }
    annotated
}

pub fn render_context(context: &[SearchResult]) -> String {
    context
        .iter()
        .map(|r| r.chunk.text.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_user_prompt(query: &str, context: &str) -> String {
    format!(
        "{query}\n\
         \n\
         Context information is below, surrounded by {CONTEXT_SEPARATOR}\n\
         \n\
         {CONTEXT_SEPARATOR}\n\
         {context}\n\
         {CONTEXT_SEPARATOR}\n\
         \n\
         Given the context and provided history information and not prior knowledge,\n\
         reply to the user accordingly. Even if the context contains\n\
         irrelevant information, try to answer the question as best as possible.\n"
    )
}

pub fn build_prompt(query: &str, context: &[SearchResult], memory: &[Message]) -> Prompt {
    Prompt::new(
        memory.to_vec(),
        render_user_prompt(query, &render_context(context)),
    )
}
