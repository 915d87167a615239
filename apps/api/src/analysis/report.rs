//! Optimisation report — the full keyword analysis of a resume against a job description.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::classifier::{classify, MatchResult};
use crate::analysis::ranker::{rank, KeywordRanking, DEFAULT_KEYWORD_LIMIT};
use crate::analysis::similarity;
use crate::analysis::template::{render_template, ATS_TIPS};
use crate::analysis::tokenizer::tokenize;
use crate::analysis::Analyzer;
use crate::errors::AppError;

/// Keywords shown as "top keywords" in the report.
pub const DISPLAYED_KEYWORD_COUNT: usize = 15;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimisationReport {
    pub top_keywords: Vec<String>,
    pub ranking: KeywordRanking,
    pub matches: MatchResult,
    pub similarity_score: u32,
    pub summary: String,
    pub tips: Vec<String>,
    pub template: String,
}

/// Rejects blank resume or job description text.
pub fn require_documents(resume_text: &str, job_description: &str) -> Result<(), AppError> {
    match (resume_text.trim().is_empty(), job_description.trim().is_empty()) {
        (true, true) => Err(AppError::Validation(
            "Please provide a resume AND a job description before optimising.".to_string(),
        )),
        (true, false) => Err(AppError::Validation(
            "Resume text is empty. Upload a resume with extractable text.".to_string(),
        )),
        (false, true) => Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        )),
        (false, false) => Ok(()),
    }
}

impl Analyzer {
    /// Ranks job-description keywords, classifies them against the resume, scores
    /// overall similarity and fills the resume template.
    pub fn optimise(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<OptimisationReport, AppError> {
        require_documents(resume_text, job_description)?;

        let tokens = tokenize(job_description, &self.stop_words);
        let ranking = rank(&tokens, DEFAULT_KEYWORD_LIMIT);
        let matches = classify(ranking.keywords(), resume_text, self.match_mode);
        let similarity_score = similarity::score(resume_text, job_description);

        info!(
            "Optimisation: {} keywords, {} found, {} missing, similarity {}%",
            ranking.len(),
            matches.found.len(),
            matches.missing.len(),
            similarity_score
        );

        let summary = build_summary(&ranking, &matches);
        let template = render_template(&ranking, &matches);

        Ok(OptimisationReport {
            top_keywords: ranking.top(DISPLAYED_KEYWORD_COUNT),
            ranking,
            matches,
            similarity_score,
            summary,
            tips: ATS_TIPS.iter().map(|t| t.to_string()).collect(),
            template,
        })
    }
}

fn build_summary(ranking: &KeywordRanking, matches: &MatchResult) -> String {
    if ranking.is_empty() {
        "No keywords could be extracted from the job description.".to_string()
    } else if matches.found.is_empty() {
        "None of the top keywords were found in your resume.".to_string()
    } else if matches.missing.is_empty() {
        "Great job! Your resume contains all the top keywords.".to_string()
    } else {
        format!(
            "{} of {} top keywords found. Weave the missing ones naturally into your summary, \
             skills, and experience descriptions.",
            matches.found.len(),
            ranking.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JD: &str = "We need a Python developer with AWS and Docker experience. \
                      Experience with Python and AWS required.";
    const RESUME: &str = "Built scalable APIs using Python and deployed via Docker.";

    #[test]
    fn test_job_description_ranks_repeated_keywords_first() {
        let report = Analyzer::default().optimise(RESUME, JD).unwrap();
        let order: Vec<&str> = report.ranking.keywords().collect();
        let pos = |k: &str| order.iter().position(|w| *w == k).unwrap();
        assert_eq!(&order[..2], &["python", "aws"]);
        assert!(pos("aws") < pos("docker"));
        for filler in ["experience", "required", "with", "and"] {
            assert!(!order.contains(&filler), "{filler} should be filtered");
        }
    }

    #[test]
    fn test_report_partitions_keywords_against_resume() {
        let report = Analyzer::default().optimise(RESUME, JD).unwrap();
        assert!(report.matches.found.contains(&"python".to_string()));
        assert!(report.matches.found.contains(&"docker".to_string()));
        assert!(report.matches.missing.contains(&"aws".to_string()));
        assert_eq!(
            report.matches.found.len() + report.matches.missing.len(),
            report.ranking.len()
        );
    }

    #[test]
    fn test_report_carries_score_tips_and_template() {
        let report = Analyzer::default().optimise(RESUME, JD).unwrap();
        assert!(report.similarity_score > 0 && report.similarity_score < 100);
        assert_eq!(report.tips.len(), ATS_TIPS.len());
        assert!(report.template.contains("Professional Summary"));
        assert!(report.summary.contains("top keywords found"));
    }

    #[test]
    fn test_top_keywords_capped_for_display() {
        let jd: String = (b'a'..=b'z')
            .flat_map(|c| [format!("tool{} ", c as char), format!("lang{} ", c as char)])
            .collect();
        let report = Analyzer::default().optimise("resume body", &jd).unwrap();
        assert!(report.top_keywords.len() <= DISPLAYED_KEYWORD_COUNT);
        assert!(report.ranking.len() <= DEFAULT_KEYWORD_LIMIT);
    }

    #[test]
    fn test_empty_inputs_are_rejected() {
        let analyzer = Analyzer::default();
        assert!(matches!(analyzer.optimise("", JD), Err(AppError::Validation(_))));
        assert!(matches!(analyzer.optimise(RESUME, "  "), Err(AppError::Validation(_))));
        assert!(matches!(analyzer.optimise("", ""), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_summary_when_everything_found() {
        let report = Analyzer::default()
            .optimise("python aws docker developer", "python aws docker")
            .unwrap();
        assert!(report.matches.missing.is_empty());
        assert!(report.summary.starts_with("Great job"));
    }
}
