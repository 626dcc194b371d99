//! Prompt template and default category taxonomy.

use crate::errors::{BenchError, BenchResult};

/// Placeholder substituted with the review text.
pub const REVIEW_PLACEHOLDER: &str = "{{review}}";

const CATEGORY_LIST_MARKER: &str = "@@CATEGORIES@@";

pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Place Accessibility",
    "Place Availability",
    "Activity Level",
    "Atmosphere & Comfort",
    "Customization Options",
    "General Sentiment",
    "Hygiene & Compliance",
    "Price & Fairness",
    "Product Quality",
    "Restrictions",
    "Safety & Trust",
    "Service Quality",
    "Specialization/Customer Need or Interest",
    "Target Audience",
    "Timing",
    "Uniqueness",
    "Consistency",
];

pub fn default_categories() -> Vec<String> {
    DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect()
}

const EXTRACTION_PROMPT: &str = r#"Your task is to analyze restaurant reviews and extract relevant facts for specific predefined categories. Follow the instructions exactly as described below.

### Key Objectives:
1. **Fact Extraction**: Extract relevant facts directly from the review, ensuring they are copied exactly as they appear (verbatim).
2. **Sentiment and Intensity**: For each extracted fact, assign a sentiment score (1 for positive, -1 for negative) and an intensity score (on a scale from 1 to 5).

### Categories to Analyze:
@@CATEGORIES@@

### Response Format:
Your response must be a JSON object with the following structure:
"Category_Name": { "sntm": 1 or -1, "score": 1 to 5, "eF": "Exact extracted fact" }
- **Category_Name**: Replace with the relevant category name from the list above. Do not modify or underscore the category names.
- **sntm**: Assign a sentiment score, either 1 for positive or -1 for negative.
- **score**: Assign an intensity score on a scale from 1 to 5.
- **eF**: Extract the exact fact from the review verbatim.

### Guidelines:
1. **Inclusion**: Include only those categories where relevant facts are found in the review.
2. **Omission**: Omit any categories that are not mentioned or where no relevant facts are found. Do not include placeholders, empty categories, or any categories without relevant extracted facts.
3. **Verbatim Facts**: Extract facts exactly as they appear in the review without paraphrasing or altering them.
4. **No Example Values**: Do not use the example values given below in your response.

### Important Note:
The category names, sentiment scores, intensity scores, and extracted facts must be exactly as instructed. Categories without relevant facts must be omitted.

### Example:
Review Text:
" The food was overcooked and tasteless. The restaurant was too hot, and the staff was rude. "

Expected Output:
{
"Product Quality": { "sntm": -1, "score": 5, "eF": "The food was overcooked and tasteless." },
"Atmosphere & Comfort": { "sntm": -1, "score": 4, "eF": "The restaurant was too hot." },
"Service Quality": { "sntm": -1, "score": 3, "eF": "The staff was rude." }
}

### Review to Analyze:
"
{{review}}
"
"#;

/// Prompt with a single `{{review}}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    template: String,
}

impl PromptTemplate {
    /// Built-in extraction prompt with the category list baked in.
    pub fn for_categories(categories: &[String]) -> Self {
        let list = categories
            .iter()
            .map(|c| format!("- {}", c))
            .collect::<Vec<_>>()
            .join("\n");
        Self {
            template: EXTRACTION_PROMPT.replace(CATEGORY_LIST_MARKER, &list),
        }
    }

    /// Custom template text; must contain the review placeholder.
    pub fn from_text(text: impl Into<String>) -> BenchResult<Self> {
        let template = text.into();
        if !template.contains(REVIEW_PLACEHOLDER) {
            return Err(BenchError::config(format!(
                "prompt template has no {} placeholder",
                REVIEW_PLACEHOLDER
            )));
        }
        Ok(Self { template })
    }

    pub fn render(&self, review: &str) -> String {
        self.template.replace(REVIEW_PLACEHOLDER, review)
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prompt_lists_every_category_and_embeds_review() {
        let cats = default_categories();
        let tpl = PromptTemplate::for_categories(&cats);
        let prompt = tpl.render("Bread was stale.");

        for c in &cats {
            assert!(prompt.contains(&format!("- {}\n", c)), "missing {}", c);
        }
        assert!(prompt.contains("\nBread was stale.\n"));
        assert!(!prompt.contains(REVIEW_PLACEHOLDER));
        assert!(!prompt.contains(CATEGORY_LIST_MARKER));
    }

    #[test]
    fn custom_template_requires_placeholder() {
        assert!(PromptTemplate::from_text("no slot here").is_err());
        let tpl = PromptTemplate::from_text("Review: {{review}}").unwrap();
        assert_eq!(tpl.render("ok"), "Review: ok");
    }

    #[test]
    fn default_taxonomy_has_unique_names() {
        let mut seen = std::collections::HashSet::new();
        assert!(DEFAULT_CATEGORIES.iter().all(|c| seen.insert(*c)));
    }
}
