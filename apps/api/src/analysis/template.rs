//! Suggested resume template, filled from keyword analysis results.

use crate::analysis::classifier::MatchResult;
use crate::analysis::ranker::KeywordRanking;

/// Number of ranked keywords listed on the template's skills line.
const TEMPLATE_SKILL_COUNT: usize = 8;

/// Fixed ATS and formatting advice shown alongside every report.
pub const ATS_TIPS: &[&str] = &[
    "Professional Summary: Start with a 3-4 sentence summary tailored to the job.",
    "Skills Section: Use a clear, bulleted list of your skills. Group them by category.",
    "Action Verbs & Metrics: Begin experience bullet points with strong verbs \
     (e.g., Engineered, Managed, Led). Quantify achievements with numbers \
     (e.g., \"...increased revenue by 15%.\").",
    "Simple Formatting: Avoid tables, columns, and images which can confuse ATS software.",
];

fn pick<'a>(words: &'a [String], index: usize, fallback: &'a str) -> &'a str {
    words.get(index).map(String::as_str).unwrap_or(fallback)
}

/// Renders the resume template. Substitution is deterministic: missing values
/// fall back to fixed placeholder terms.
pub fn render_template(ranking: &KeywordRanking, matches: &MatchResult) -> String {
    let found = &matches.found;
    let missing = &matches.missing;
    let key_skills = ranking.top(TEMPLATE_SKILL_COUNT).join(", ");

    let primary_gap = pick(missing, 0, "backend development");
    let secondary_gap = pick(missing, 1, "cloud computing");
    let primary_strength = pick(found, 0, "Python");
    let secondary_strength = pick(found, 1, "Java");
    let bullet_strength = pick(found, 0, "Python");
    let bullet_gap = pick(missing, 0, "AWS");

    format!(
        r#"
*[Your Name]*
[Your Phone Number] | [Your Email] | [Your LinkedIn Profile URL]

---

*Professional Summary*
A results-oriented **[Your Role, e.g., Software Engineer]** with X years of experience, specializing in **{primary_gap}**. Proven ability to leverage **{primary_strength}** and **{secondary_strength}** to build scalable systems. Eager to apply my skills in **{secondary_gap}** to contribute to [Target Company Name].

---

*Skills*
* **Key Skills (from Job Description):** {key_skills}
* **Programming & Languages:** [List languages, e.g., Python, Java, SQL]
* **Technologies & Frameworks:** [List tech, e.g., Docker, Kubernetes, Django, AWS, GCP]
* **Soft Skills:** [e.g., Agile Methodologies, Problem-Solving, Team Collaboration]

---

**Professional Experience**

**[Your Most Recent Job Title]** | [Company Name] | [City, State] | [Dates]
* Engineered a new feature using **{bullet_strength}**, which improved system performance by 20%.
* Collaborated in an Agile team to develop and deploy microservices on **{bullet_gap}**, reducing latency by 150ms.
* Managed the full software development lifecycle (SDLC) for a critical customer-facing application, improving user retention by 10%.

**[Your Previous Job Title]** | [Company Name] | [City, State] | [Dates]
* [Start with an action verb. Weave in a keyword. Add a number.]
* [Action Verb + Keyword + Result]

---

**Education**

**[Your Degree]** | [University Name] | [City, State] | [Year of Graduation]
"#
    )
}
