// All LLM prompt constants for the agent workflows.
// Reuses cross-cutting fragments from llm_client::prompts.

/// Company research prompt. Replace `{company}`, `{role}` and `{sources}` before sending.
pub const COMPANY_RESEARCH_PROMPT_TEMPLATE: &str = r#"Research the company "{company}" for a candidate applying to the role: {role}.

Use ONLY the web search results below. Cite the source URL after each fact.

Web search results:
{sources}

Write a concise brief with these sections:
## Overview
What the company does, size, stage, and market.
## Culture & Values
How the company describes its culture and what it values in employees.
## Recent News
Notable launches, funding, or changes from the results.
## Talking Points
3-5 bullets the candidate can use in a cover letter or interview.

If the results say nothing about a section, write "No information found." for it."#;

/// Resume rewrite prompt. Replace `{resume}`, `{job_description}`, `{missing_keywords}`,
/// `{company_brief}` and `{grounding_instruction}` before sending.
pub const RESUME_REWRITE_PROMPT_TEMPLATE: &str = r#"Rewrite the resume below so it is tailored to the job description.

{grounding_instruction}

Goals:
- Mirror the job description's terminology where the resume genuinely supports it.
- Keywords from the job description not currently in the resume: {missing_keywords}
  Include one only where the resume shows equivalent experience.
- Open with a 3-4 sentence Professional Summary tailored to the role.
- Use a bulleted Skills section grouped by category.
- Start experience bullets with strong action verbs and keep every number from the original.
- Simple formatting: headings and bullets only. No tables, columns, or images.

Company context (may be empty):
{company_brief}

Job description:
"""
{job_description}
"""

Current resume:
"""
{resume}
"""

Return the complete rewritten resume."#;
