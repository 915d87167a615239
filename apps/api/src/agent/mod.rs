//! Agent workflows — company research, job search and resume rewriting.
//!
//! Collaborators are passed in explicitly (`&dyn TextGenerator`, `&dyn WebSearch`).
//! Each workflow makes a single attempt per collaborator call. LLM output is used
//! verbatim and re-scored with the similarity scorer where a score is reported.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::classifier::classify;
use crate::analysis::ranker::{rank, DEFAULT_KEYWORD_LIMIT};
use crate::analysis::report::require_documents;
use crate::analysis::similarity;
use crate::analysis::tokenizer::tokenize;
use crate::analysis::Analyzer;
use crate::errors::AppError;
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, MARKDOWN_ONLY_SYSTEM};
use crate::llm_client::TextGenerator;
use crate::search::{SearchResult, WebSearch};
use prompts::{COMPANY_RESEARCH_PROMPT_TEMPLATE, RESUME_REWRITE_PROMPT_TEMPLATE};

/// Snippets longer than this are cut before going into a prompt.
const MAX_SNIPPET_CHARS: usize = 800;

/// A job search hit, optionally scored against the user's resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredJobLead {
    #[serde(flatten)]
    pub result: SearchResult,
    pub score: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RewriteOutcome {
    pub rewritten_resume: String,
    pub original_score: u32,
    pub rewritten_score: u32,
    pub missing_before: Vec<String>,
    pub missing_after: Vec<String>,
}

/// Searches the web for a company and asks the LLM for a research brief.
pub async fn research_company(
    company: &str,
    role: Option<&str>,
    llm: &dyn TextGenerator,
    search: &dyn WebSearch,
    max_results: usize,
) -> Result<String, AppError> {
    let company = company.trim();
    if company.is_empty() {
        return Err(AppError::Validation("company_name cannot be empty".to_string()));
    }

    let query = format!("{company} company culture values recent news");
    let results = search.search(&query, max_results).await?;
    info!("Company research for '{company}': {} sources", results.len());

    let prompt = COMPANY_RESEARCH_PROMPT_TEMPLATE
        .replace("{company}", company)
        .replace("{role}", role.map(str::trim).filter(|r| !r.is_empty()).unwrap_or("unspecified"))
        .replace("{sources}", &format_sources(&results));

    Ok(llm.generate(&prompt, MARKDOWN_ONLY_SYSTEM).await?)
}

/// Searches for job postings. With resume text, each posting's snippet is scored
/// against it and leads are ordered best match first; ties keep search order.
pub async fn search_jobs(
    query: &str,
    resume_text: Option<&str>,
    search: &dyn WebSearch,
    max_results: usize,
) -> Result<Vec<ScoredJobLead>, AppError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(AppError::Validation("query cannot be empty".to_string()));
    }

    let results = search.search(&format!("{query} job openings"), max_results).await?;

    let mut leads: Vec<ScoredJobLead> = results
        .into_iter()
        .map(|result| {
            let score = resume_text.map(|resume| similarity::score(resume, &result.content));
            ScoredJobLead { result, score }
        })
        .collect();

    if resume_text.is_some() {
        leads.sort_by(|a, b| b.score.cmp(&a.score));
    }
    info!("Job search '{query}': {} leads", leads.len());
    Ok(leads)
}

/// Asks the LLM to tailor the resume to the job description, then scores the
/// rewrite against the job description alongside the original.
pub async fn rewrite_resume(
    analyzer: &Analyzer,
    resume_text: &str,
    job_description: &str,
    company_brief: Option<&str>,
    llm: &dyn TextGenerator,
) -> Result<RewriteOutcome, AppError> {
    require_documents(resume_text, job_description)?;

    let ranking = rank(&tokenize(job_description, &analyzer.stop_words), DEFAULT_KEYWORD_LIMIT);
    let missing_before = classify(ranking.keywords(), resume_text, analyzer.match_mode).missing;

    let prompt = RESUME_REWRITE_PROMPT_TEMPLATE
        .replace("{grounding_instruction}", GROUNDING_INSTRUCTION)
        .replace("{missing_keywords}", &display_list(&missing_before))
        .replace("{company_brief}", company_brief.unwrap_or("").trim())
        .replace("{job_description}", job_description.trim())
        .replace("{resume}", resume_text.trim());

    let rewritten_resume = llm.generate(&prompt, MARKDOWN_ONLY_SYSTEM).await?;

    let original_score = similarity::score(resume_text, job_description);
    let rewritten_score = similarity::score(&rewritten_resume, job_description);
    let missing_after = classify(ranking.keywords(), &rewritten_resume, analyzer.match_mode).missing;

    info!("Resume rewrite: similarity {original_score}% -> {rewritten_score}%");

    Ok(RewriteOutcome {
        rewritten_resume,
        original_score,
        rewritten_score,
        missing_before,
        missing_after,
    })
}

fn display_list(words: &[String]) -> String {
    if words.is_empty() {
        "(none)".to_string()
    } else {
        words.join(", ")
    }
}

fn format_sources(results: &[SearchResult]) -> String {
    if results.is_empty() {
        return "(no results)".to_string();
    }
    results
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let snippet: String = r.content.chars().take(MAX_SNIPPET_CHARS).collect();
            format!("[{}] {} ({})\n{}", i + 1, r.title, r.url, snippet)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}
