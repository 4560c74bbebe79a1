//! Prompt building for context-aware generation
//!
//! Turns an [`McpContext`] and a natural-language request into the system and
//! user messages sent to the model.

use serde::{Deserialize, Serialize};

use crate::context::McpContext;

/// Language tag of the fenced block the model is asked to return
pub const CODE_FENCE_LANGUAGE: &str = "typescript";

/// Placeholder line the model is shown inside the fence
pub const CODE_PLACEHOLDER: &str = "// Your code here...";

const PREAMBLE: [&str; 4] = [
    "You are an expert backend developer experienced with Payload CMS 3.0 and TypeScript.",
    "Your task is to generate code based on the user's request, leveraging the provided project context.",
    "Ensure the generated code follows best practices and integrates correctly with the existing structure and types hinted at in the context.",
    "Assume standard Payload CMS types (`CollectionConfig`, `Field`, hook signatures, etc.) are available in the target project where this code will be used.",
];

const OUTPUT_INSTRUCTIONS: [&str; 6] = [
    "// Please provide ONLY the TypeScript code block relevant to the request.",
    "// Use TypeScript. Adhere to the types provided in the context if possible.",
    "// If generating hooks, use the correct signature and be mindful of the stage/operation.",
    "// If generating fields for Payload, use the standard Payload field definition format (object literal).",
    "// If modifying existing structures (conceptually), indicate where the code should be placed via comments if necessary.",
    "// Do NOT include explanations outside the code block.",
];

/// Generated prompt ready to send to a provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedPrompt {
    /// System prompt with the fixed instructions
    pub system_prompt: String,
    /// User prompt with project context and the request
    pub user_prompt: String,
}

impl GeneratedPrompt {
    /// Creates a new generated prompt
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
        }
    }
}

/// Builds prompts grounded in a project context
#[derive(Debug, Clone, Copy)]
pub struct PromptBuilder<'a> {
    context: &'a McpContext,
}

impl<'a> PromptBuilder<'a> {
    /// Creates a builder over `context`
    pub fn new(context: &'a McpContext) -> Self {
        Self { context }
    }

    /// Renders the project context as comment lines
    pub fn context_block(&self) -> String {
        let structure = &self.context.project_structure;
        let mut lines = vec![
            "// --- Project Context ---".to_string(),
            String::new(),
            "// Structure:".to_string(),
            format!("// Collections: {}", structure.collections.join(", ")),
            format!("// Globals: {}", structure.globals.join(", ")),
        ];

        if let Some(hook) = &self.context.hook_context {
            lines.push(String::new());
            lines.push("// Current Hook Context:".to_string());
            lines.push(format!("// Stage: {}", hook.stage.as_str()));
            lines.push(format!("// Operation: {}", hook.operation.as_str()));
            if let Some(slug) = &hook.collection_slug {
                lines.push(format!("// Collection: {}", slug));
            }
        }

        lines.join("\n")
    }

    /// Builds the prompt for a request
    pub fn build(&self, request: &str) -> GeneratedPrompt {
        let mut user_parts = vec![
            self.context_block(),
            String::new(),
            "// --- User Request ---".to_string(),
            request.to_string(),
            String::new(),
            "// --- Generated Code ---".to_string(),
        ];
        user_parts.extend(OUTPUT_INSTRUCTIONS.iter().map(|line| line.to_string()));
        user_parts.push(String::new());
        user_parts.push(format!("```{}", CODE_FENCE_LANGUAGE));
        user_parts.push(CODE_PLACEHOLDER.to_string());
        user_parts.push("```".to_string());

        GeneratedPrompt {
            system_prompt: PREAMBLE.join("\n"),
            user_prompt: user_parts.join("\n"),
        }
    }
}
