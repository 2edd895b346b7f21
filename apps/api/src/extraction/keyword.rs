//! Keyword skill extractor — pattern matching against a known-skills catalog.
//!
//! Deterministic and fast; no model call. The catalog and heuristics cover
//! the skills the job-matching side of the portal understands.

use std::collections::BTreeSet;

use async_trait::async_trait;
use regex::Regex;

use crate::errors::AppError;
use crate::extraction::text::extract_text;
use crate::extraction::{DocumentKind, ExtractionOutcome, SkillExtractor};

/// Canonical skill labels the extractor can emit.
pub const KNOWN_SKILLS: &[&str] = &[
    // Programming languages
    "Python", "JavaScript", "Java", "C++", "C#", "Ruby", "PHP", "Go",
    "TypeScript", "Swift", "Kotlin", "Rust", "Scala", "R",
    // Web frameworks
    "React", "Angular", "Vue.js", "Flask", "Django", "Express.js",
    "Spring Boot", "ASP.NET", "Laravel", "Ruby on Rails",
    // Databases
    "MongoDB", "MySQL", "PostgreSQL", "SQLite", "Redis", "Oracle",
    "SQL Server", "Cassandra", "DynamoDB", "Firebase",
    // Cloud & DevOps
    "AWS", "Azure", "Google Cloud", "Docker", "Kubernetes", "Jenkins",
    "Git", "GitHub", "GitLab", "CI/CD", "Terraform",
    // AI/ML
    "Machine Learning", "Deep Learning", "TensorFlow", "PyTorch",
    "NLP", "Computer Vision", "scikit-learn", "Keras",
    // Other
    "REST API", "GraphQL", "Microservices", "Agile", "Scrum",
    "HTML", "CSS", "Bootstrap", "Tailwind CSS", "Node.js",
];

/// Alternate spellings mapped back to a canonical catalog entry.
const SKILL_VARIATIONS: &[(&str, &[&str])] = &[
    ("JavaScript", &["js", "javascript", "java script", "ecmascript"]),
    ("Node.js", &["nodejs", "node.js", "node js", "expressjs", "express.js"]),
    ("React", &["react", "reactjs", "react.js", "react native"]),
    ("Python", &["python", "python3", "python 3"]),
    ("C++", &["c++", "cpp", "c plus plus"]),
    ("C#", &["c#", "csharp", "c sharp"]),
];

pub struct KeywordSkillExtractor {
    token_re: Regex,
    variation_res: Vec<(&'static str, Vec<Regex>)>,
    context_res: Vec<Regex>,
    email_re: Regex,
    phone_res: Vec<Regex>,
    degree_res: Vec<Regex>,
    experience_res: Vec<Regex>,
}

impl Default for KeywordSkillExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl KeywordSkillExtractor {
    pub fn new() -> Self {
        let compile = |p: &str| Regex::new(p).expect("static pattern");

        let variation_res = SKILL_VARIATIONS
            .iter()
            .map(|(canonical, variants)| {
                let res = variants
                    .iter()
                    .map(|v| compile(&format!(r"\b{}\b", regex::escape(v))))
                    .collect();
                (*canonical, res)
            })
            .collect();

        Self {
            token_re: compile(r"\b[\w+#.]+\b"),
            variation_res,
            context_res: [
                r"proficient in ([a-z+#. ]+)",
                r"experience (?:with|in) ([a-z+#. ]+)",
                r"knowledge of ([a-z+#. ]+)",
                r"skilled in ([a-z+#. ]+)",
                r"expertise in ([a-z+#. ]+)",
                r"working with ([a-z+#. ]+)",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
            email_re: compile(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
            phone_res: [
                r"\+?\d{1,3}[-.\s]?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4}",
                r"\b\d{10}\b",
                r"\b\d{3}[-.\s]?\d{3}[-.\s]?\d{4}\b",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
            degree_res: [
                r"(?i)\b(B\.?Tech|Bachelor of Technology|BE|B\.E\.|Bachelor of Engineering)\b",
                r"(?i)\b(M\.?Tech|Master of Technology|ME|M\.E\.|Master of Engineering)\b",
                r"(?i)\b(MBA|Master of Business Administration)\b",
                r"(?i)\b(B\.?Sc|Bachelor of Science|M\.?Sc|Master of Science)\b",
                r"(?i)\b(BCA|Bachelor of Computer Applications|MCA|Master of Computer Applications)\b",
                r"(?i)\b(PhD|Ph\.D\.|Doctorate)\b",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
            experience_res: [
                r"(\d+)\+?\s*years?\s+(?:of\s+)?experience",
                r"(\d+)\+?\s*years?\s+(?:in|with)",
                r"experience[:\s]+(\d+)\+?\s*years?",
            ]
            .iter()
            .map(|p| compile(p))
            .collect(),
        }
    }

    /// Finds catalog skills mentioned in the text. Returns canonical labels,
    /// de-duplicated and sorted.
    pub fn extract_skills(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        let text_lower = text.to_lowercase();
        let mut found: BTreeSet<&'static str> = BTreeSet::new();

        // Single-token matches against the catalog.
        for token in self.token_re.find_iter(&text_lower) {
            if let Some(canonical) = canonical_skill(token.as_str()) {
                found.insert(canonical);
            }
        }

        // Multi-word skills ("Machine Learning", "REST API") as substrings.
        for skill in KNOWN_SKILLS.iter().copied().filter(|s| s.contains(' ')) {
            if text_lower.contains(&skill.to_lowercase()) {
                found.insert(skill);
            }
        }

        // Alternate spellings ("nodejs" → Node.js).
        for (canonical, variants) in &self.variation_res {
            if variants.iter().any(|re| re.is_match(&text_lower)) {
                found.insert(*canonical);
            }
        }

        // Phrases like "proficient in python, react and mongodb".
        for re in &self.context_res {
            for caps in re.captures_iter(&text_lower) {
                if let Some(list) = caps.get(1) {
                    for candidate in list.as_str().split([',']).flat_map(|s| s.split(" and ")) {
                        if let Some(canonical) = canonical_skill(candidate.trim()) {
                            found.insert(canonical);
                        }
                    }
                }
            }
        }

        found.into_iter().map(str::to_string).collect()
    }

    pub fn extract_email(&self, text: &str) -> Option<String> {
        self.email_re.find(text).map(|m| m.as_str().to_string())
    }

    pub fn extract_phone(&self, text: &str) -> Option<String> {
        self.phone_res
            .iter()
            .find_map(|re| re.find(text))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_education(&self, text: &str) -> Option<String> {
        self.degree_res
            .iter()
            .find_map(|re| re.captures(text))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Conservative estimate: the largest year count mentioned.
    pub fn extract_experience_years(&self, text: &str) -> i32 {
        let text_lower = text.to_lowercase();
        self.experience_res
            .iter()
            .flat_map(|re| re.captures_iter(&text_lower))
            .filter_map(|caps| caps.get(1)?.as_str().parse::<i32>().ok())
            .max()
            .unwrap_or(0)
    }

    /// Extraction confidence, 0–100. More skills and more text raise it;
    /// capped at 95 since automated extraction is never certain.
    pub fn confidence(&self, skills_found: usize, text_len: usize) -> f64 {
        let skill_score = (skills_found as f64 * 5.0).min(50.0);
        let length_score = (text_len as f64 / 100.0).min(40.0);
        (5.0 + skill_score + length_score).min(95.0)
    }
}

fn canonical_skill(candidate: &str) -> Option<&'static str> {
    KNOWN_SKILLS
        .iter()
        .find(|s| s.to_lowercase() == candidate)
        .copied()
}

#[async_trait]
impl SkillExtractor for KeywordSkillExtractor {
    async fn extract(
        &self,
        bytes: &[u8],
        kind: DocumentKind,
    ) -> Result<ExtractionOutcome, AppError> {
        let text = extract_text(bytes, kind)?;

        let skills = self.extract_skills(&text);
        let confidence = self.confidence(skills.len(), text.len());
        let email = self.extract_email(&text);
        let phone = self.extract_phone(&text);
        let education = self.extract_education(&text);
        let experience_years = self.extract_experience_years(&text);

        Ok(ExtractionOutcome {
            text,
            skills,
            confidence,
            email,
            phone,
            education,
            experience_years,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> KeywordSkillExtractor {
        KeywordSkillExtractor::new()
    }

    #[test]
    fn finds_direct_skill_mentions() {
        let skills =
            extractor().extract_skills("Built services with Python, React and MongoDB daily.");
        assert_eq!(skills, vec!["MongoDB", "Python", "React"]);
    }

    #[test]
    fn finds_multi_word_skills() {
        let skills = extractor()
            .extract_skills("Applied Machine Learning and designed a REST API for clients.");
        assert!(skills.contains(&"Machine Learning".to_string()));
        assert!(skills.contains(&"REST API".to_string()));
    }

    #[test]
    fn maps_variations_to_canonical_names() {
        let skills = extractor().extract_skills("Wrote nodejs workers and some js utilities.");
        assert!(skills.contains(&"Node.js".to_string()));
        assert!(skills.contains(&"JavaScript".to_string()));
    }

    #[test]
    fn finds_skills_in_context_phrases() {
        let skills = extractor().extract_skills("I am proficient in python, django and go.");
        assert!(skills.contains(&"Python".to_string()));
        assert!(skills.contains(&"Django".to_string()));
        assert!(skills.contains(&"Go".to_string()));
    }

    #[test]
    fn deduplicates_and_sorts() {
        let skills = extractor().extract_skills("Python python PYTHON and Docker, then Docker.");
        assert_eq!(skills, vec!["Docker", "Python"]);
    }

    #[test]
    fn empty_text_yields_no_skills() {
        assert!(extractor().extract_skills("").is_empty());
    }

    #[test]
    fn extracts_contact_details() {
        let e = extractor();
        let text = "Alice Johnson\nEmail: alice.johnson@email.com\nPhone: +1-234-567-8901";
        assert_eq!(e.extract_email(text).as_deref(), Some("alice.johnson@email.com"));
        assert_eq!(e.extract_phone(text).as_deref(), Some("+1-234-567-8901"));
    }

    #[test]
    fn extracts_education_and_experience() {
        let e = extractor();
        let text = "B.Tech in Computer Science. 3 years of experience, 5 years with Java.";
        assert_eq!(e.extract_education(text).as_deref(), Some("B.Tech"));
        assert_eq!(e.extract_experience_years(text), 5);
    }

    #[test]
    fn experience_defaults_to_zero() {
        assert_eq!(extractor().extract_experience_years("fresh graduate"), 0);
    }

    #[test]
    fn confidence_grows_with_evidence_and_caps_at_95() {
        let e = extractor();
        assert_eq!(e.confidence(0, 0), 5.0);
        assert_eq!(e.confidence(4, 1000), 5.0 + 20.0 + 10.0);
        assert_eq!(e.confidence(50, 1_000_000), 95.0);
    }

    #[tokio::test]
    async fn extract_runs_end_to_end_on_doc_bytes() {
        let text = b"SUMMARY: 3 years of experience with Python and Docker. Contact: a@b.io";
        let outcome = extractor()
            .extract(text, DocumentKind::Doc)
            .await
            .expect("extraction succeeds");
        assert!(outcome.skills.contains(&"Python".to_string()));
        assert!(outcome.skills.contains(&"Docker".to_string()));
        assert_eq!(outcome.experience_years, 3);
        assert!(outcome.confidence > 0.0 && outcome.confidence <= 95.0);
    }
}
