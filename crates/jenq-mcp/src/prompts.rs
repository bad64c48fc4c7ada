// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! Templated prompts for common Jenkins workflows.
//!
//! Each prompt renders as two user messages: a fixed persona preamble and
//! the workflow template with `{placeholder}` arguments substituted.
//! Missing optional arguments substitute as the empty string; a missing
//! required argument is a protocol-level invalid-params error.

use rmcp::model::{
    GetPromptResult, JsonObject, Prompt, PromptArgument, PromptMessage, PromptMessageRole,
};
use rmcp::ErrorData as McpError;

const PERSONA: &str = "You are a senior automation engineer with more than ten \
                       years of experience operating Jenkins build infrastructure.";

struct TemplateArg {
    name: &'static str,
    description: &'static str,
    required: bool,
}

struct PromptTemplate {
    name: &'static str,
    description: &'static str,
    arguments: &'static [TemplateArg],
    template: &'static str,
}

impl PromptTemplate {
    fn render(&self, arguments: Option<&JsonObject>) -> Result<String, McpError> {
        let mut text = self.template.to_string();
        for arg in self.arguments {
            let value = arguments.and_then(|m| m.get(arg.name));
            let substitution = match value {
                Some(v) => v
                    .as_str()
                    .map(str::to_string)
                    .unwrap_or_else(|| v.to_string()),
                None if arg.required => {
                    return Err(McpError::invalid_params(
                        format!("missing required argument: {}", arg.name),
                        None,
                    ));
                }
                None => String::new(),
            };
            text = text.replace(&format!("{{{}}}", arg.name), &substitution);
        }
        Ok(text)
    }
}

const JOB_NAME: TemplateArg = TemplateArg {
    name: "job_name",
    description: "The name of the job",
    required: true,
};

const VIEW_NAME_REQUIRED: TemplateArg = TemplateArg {
    name: "view_name",
    description: "The name of the view",
    required: true,
};

const NEW_JOB_NAME: TemplateArg = TemplateArg {
    name: "new_job_name",
    description: "The name of the new job",
    required: true,
};

const TEMPLATES: &[PromptTemplate] = &[
    // ── Job ──────────────────────────────────────────────────────────────
    PromptTemplate {
        name: "prompt_get_job_default_params",
        description: "Get default parameters for a Jenkins job.",
        arguments: &[JOB_NAME],
        template: "Using MCP, get the default parameters of the Jenkins job \
                   \"{job_name}\".\n\nReply with the results as a table.",
    },
    PromptTemplate {
        name: "prompt_get_job_baseurl",
        description: "Get base URL for a Jenkins job.",
        arguments: &[JOB_NAME],
        template: "Using MCP, get the base URL of the Jenkins job \
                   \"{job_name}\".\n\nReply with the results as a numbered list.",
    },
    PromptTemplate {
        name: "prompt_search_job",
        description: "Search for Jenkins jobs matching the given criteria.",
        arguments: &[
            TemplateArg {
                name: "search_string",
                description: "The string to search for in job names",
                required: true,
            },
            TemplateArg {
                name: "view_name",
                description: "The name of the view to search within",
                required: false,
            },
            TemplateArg {
                name: "is_case_sensitive",
                description: "Whether the search should be case sensitive",
                required: false,
            },
        ],
        template: "Using MCP, search Jenkins for all jobs matching the string \
                   \"{search_string}\".\n\nCase sensitive: {is_case_sensitive}\n\n\
                   Search within a specific view: {view_name}\n\n\
                   Reply with the results as a numbered list.",
    },
    PromptTemplate {
        name: "prompt_clone_job",
        description: "Clone a Jenkins job.",
        arguments: &[JOB_NAME, NEW_JOB_NAME],
        template: "Using MCP, clone the Jenkins job \"{job_name}\" to a new job \
                   \"{new_job_name}\".",
    },
    PromptTemplate {
        name: "prompt_rename_job",
        description: "Rename a Jenkins job.",
        arguments: &[JOB_NAME, NEW_JOB_NAME],
        template: "Using MCP, rename the Jenkins job \"{job_name}\" to \
                   \"{new_job_name}\".",
    },
    PromptTemplate {
        name: "prompt_delete_job",
        description: "Delete a Jenkins job.",
        arguments: &[JOB_NAME],
        template: "Using MCP, delete the Jenkins job \"{job_name}\".",
    },
    PromptTemplate {
        name: "prompt_build_job",
        description: "Build a Jenkins job.",
        arguments: &[
            JOB_NAME,
            TemplateArg {
                name: "params",
                description: "The parameters for the job (if any)",
                required: false,
            },
        ],
        template: "Using MCP, trigger a build of the Jenkins job \
                   \"{job_name}\".\n\nIf the job has parameters, use the \
                   following values:\n{params}",
    },
    // ── View ─────────────────────────────────────────────────────────────
    PromptTemplate {
        name: "prompt_get_views",
        description: "Get all Jenkins views.",
        arguments: &[],
        template: "Using MCP, get all Jenkins views.\n\nReply with the results \
                   as a numbered list.",
    },
    PromptTemplate {
        name: "prompt_get_view_baseurl",
        description: "Get base URL for a Jenkins view.",
        arguments: &[VIEW_NAME_REQUIRED],
        template: "Using MCP, get the base URL of the Jenkins view \
                   \"{view_name}\".\n\nReply with the results as a numbered list.",
    },
    PromptTemplate {
        name: "prompt_add_job_to_view",
        description: "Add a Jenkins job to a view.",
        arguments: &[JOB_NAME, VIEW_NAME_REQUIRED],
        template: "Using MCP, add the Jenkins job \"{job_name}\" to the view \
                   \"{view_name}\".",
    },
    PromptTemplate {
        name: "prompt_remove_job_from_view",
        description: "Remove a Jenkins job from a view.",
        arguments: &[JOB_NAME, VIEW_NAME_REQUIRED],
        template: "Using MCP, remove the Jenkins job \"{job_name}\" from the \
                   view \"{view_name}\".",
    },
    // ── Build ────────────────────────────────────────────────────────────
    PromptTemplate {
        name: "prompt_stop_last_build",
        description: "Stop the last build of a Jenkins job.",
        arguments: &[JOB_NAME],
        template: "Using MCP, stop the last build of the Jenkins job \
                   \"{job_name}\".",
    },
    PromptTemplate {
        name: "prompt_get_last_build_info",
        description: "Get last build info for a Jenkins job.",
        arguments: &[JOB_NAME],
        template: "Using MCP, get information about the last build of the \
                   Jenkins job \"{job_name}\".\n\nReply with the results as a \
                   table.",
    },
];

/// The fixed prompt set of the server.
pub struct PromptRegistry {
    templates: &'static [PromptTemplate],
}

impl PromptRegistry {
    pub fn standard() -> Self {
        Self { templates: TEMPLATES }
    }

    /// Prompt descriptors for `prompts/list`, in registration order.
    pub fn list(&self) -> Vec<Prompt> {
        self.templates
            .iter()
            .map(|t| {
                let arguments: Vec<PromptArgument> = t
                    .arguments
                    .iter()
                    .map(|a| PromptArgument {
                        name: a.name.to_string(),
                        title: None,
                        description: Some(a.description.to_string()),
                        required: Some(a.required),
                    })
                    .collect();
                Prompt::new(
                    t.name,
                    Some(t.description),
                    if arguments.is_empty() {
                        None
                    } else {
                        Some(arguments)
                    },
                )
            })
            .collect()
    }

    /// Render one prompt for `prompts/get`.
    pub fn render(
        &self,
        name: &str,
        arguments: Option<&JsonObject>,
    ) -> Result<GetPromptResult, McpError> {
        let template = self
            .templates
            .iter()
            .find(|t| t.name == name)
            .ok_or_else(|| McpError::invalid_params(format!("unknown prompt: {name}"), None))?;
        let body = template.render(arguments)?;
        Ok(GetPromptResult {
            description: Some(template.description.to_string()),
            messages: vec![
                PromptMessage::new_text(PromptMessageRole::User, PERSONA),
                PromptMessage::new_text(PromptMessageRole::User, body),
            ],
        })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.templates.iter().map(|t| t.name).collect()
    }
}

impl Default for PromptRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

// ─── Unit tests ──────────────────────────────────────────────────────────────
