//! Prompt templates for the journal and the diff digest.
//!
//! Each prompt is a Jinja2 template rendered from a typed request struct.

use devlog_core::error::{DevlogError, Result};
use minijinja::Environment;
use serde::Serialize;

/// Questions every session entry must answer.
pub const RUBRIC: [&str; 6] = [
    "What did I work on?",
    "How does this work build upon the team's previous related work?",
    "How did I do that work (tools, programs, test rigs, etc.)?",
    "What was the result and what did I learn from this work?",
    "How does this work relate to the team's project progress?",
    "What are the next steps?",
];

const RUBRIC_TEMPLATE: &str = r#"The rubric of the entire session is the following:
Level of detail: each entry must give enough detail for another engineer (for example a senior engineering student) to understand exactly what project work was performed.
Each session answers these questions:
{% for question in rubric -%}
- {{ question }}
{% endfor -%}
Do NOT include irrelevant information, puffery language or other fluff."#;

const INTRODUCTION_TEMPLATE: &str = r#"{% if previous_report -%}
This was my previous report. It ends with the goal for this session; use it as a reference and to tell what this session is meant to achieve:
{{ previous_report }}
{%- else -%}
This is my first journaling session, there is no previous report.
{%- endif %}

The message provided for this session:
{{ commit_message }}

Do not acknowledge the input, only write the report. Keep the answer short. Write it in the first person: it says what I will be doing.

{% include "rubric" %}

In this response only generate the introduction of the session: connect the previous work and the message to state this session's goal."#;

const CONCLUSION_TEMPLATE: &str = r#"The message provided at the end of this session:
{{ commit_message }}

The current progress of the session:
{{ current_report }}

Do not acknowledge the input, only write the report. Keep the answer short. Write it in the first person: it says what I have done and what the goal of the next session is.

{% include "rubric" %}

In this response only generate the conclusion of the session: connect the work done in this session and the message to state the next session's goal."#;

const DIGEST_TEMPLATE: &str = r#"Try to determine the thought process of the person based on these differences:
{{ diff }}

The files that were changed, as they are now:
{% for file in files -%}
{{ file.path }}:
{{ file.content }}
{% else -%}
(no changed file could be read)
{% endfor %}
The commit message that was used:
{{ commit_message }}

Do not acknowledge the input, only write a report explaining what was tried and what the goal of whoever changed the code was."#;

#[derive(Serialize)]
struct IntroductionRequest<'a> {
    previous_report: &'a str,
    commit_message: &'a str,
    rubric: &'a [&'a str],
}

#[derive(Serialize)]
struct ConclusionRequest<'a> {
    current_report: &'a str,
    commit_message: &'a str,
    rubric: &'a [&'a str],
}

/// One changed file folded into the digest prompt.
#[derive(Debug, Clone, Serialize)]
pub struct ChangedFile {
    pub path: String,
    pub content: String,
}

#[derive(Serialize)]
struct DigestRequest<'a> {
    diff: &'a str,
    files: &'a [ChangedFile],
    commit_message: &'a str,
}

/// Renders the three prompts devlog sends to the generator.
#[derive(Clone)]
pub struct PromptRenderer {
    env: Environment<'static>,
}

impl PromptRenderer {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for (name, source) in [
            ("rubric", RUBRIC_TEMPLATE),
            ("introduction", INTRODUCTION_TEMPLATE),
            ("conclusion", CONCLUSION_TEMPLATE),
            ("digest", DIGEST_TEMPLATE),
        ] {
            env.add_template(name, source).map_err(template_error)?;
        }
        Ok(Self { env })
    }

    /// Prompt for the opening of a session.
    ///
    /// An empty `previous_report` means there is no earlier session.
    pub fn introduction(&self, previous_report: &str, commit_message: &str) -> Result<String> {
        self.render(
            "introduction",
            IntroductionRequest {
                previous_report,
                commit_message,
                rubric: &RUBRIC,
            },
        )
    }

    pub fn conclusion(&self, current_report: &str, commit_message: &str) -> Result<String> {
        self.render(
            "conclusion",
            ConclusionRequest {
                current_report,
                commit_message,
                rubric: &RUBRIC,
            },
        )
    }

    pub fn digest(&self, diff: &str, files: &[ChangedFile], commit_message: &str) -> Result<String> {
        self.render(
            "digest",
            DigestRequest {
                diff,
                files,
                commit_message,
            },
        )
    }

    fn render<S: Serialize>(&self, name: &str, request: S) -> Result<String> {
        self.env
            .get_template(name)
            .and_then(|template| template.render(request))
            .map_err(template_error)
    }
}

fn template_error(err: minijinja::Error) -> DevlogError {
    DevlogError::internal(format!("prompt template error: {err}"))
}
