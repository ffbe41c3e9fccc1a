use serde::{Deserialize, Serialize};

/// One unit of retrieval work proposed by the planner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanStep {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

impl PlanStep {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Conversation line recording which step produced the next payload
    pub fn heading(&self) -> String {
        format!("{} - {}", self.title, self.description)
    }
}

/// Planner output for one round; empty means no further retrieval is needed
pub type Plan = Vec<PlanStep>;

/// JSON text of a plan as recorded in the conversation
pub fn plan_to_text(plan: &[PlanStep]) -> String {
    serde_json::to_string(plan).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn planner_output_parses_with_missing_fields() {
        let plan: Plan = serde_json::from_str(
            r#"[{"title": "Get AAPL price", "description": "I need the latest quote"}, {"title": "News"}]"#,
        )
        .unwrap();
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].description, "");
    }

    #[test]
    fn heading_joins_title_and_description() {
        let step = PlanStep::new("Get news", "Let me check today's headlines");
        assert_eq!(step.heading(), "Get news - Let me check today's headlines");
    }

    #[test]
    fn plan_text_is_json() {
        let text = plan_to_text(&[PlanStep::new("a", "b")]);
        assert_eq!(text, r#"[{"title":"a","description":"b"}]"#);
    }
}
