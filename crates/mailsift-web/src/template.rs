//! Result page

use askama_axum::Template;
use mailsift_core::Decision;

/// The classifier page.
///
/// `prediction` is empty until a text has been submitted; askama escapes it
/// when rendering.
#[derive(Template, Debug, Default)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub prediction: String,
}

impl IndexPage {
    /// Page showing a decision's message
    pub fn with_decision(decision: &Decision) -> Self {
        Self {
            prediction: decision.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_page_has_form() {
        let page = IndexPage::default().render().unwrap();
        assert!(page.contains(r#"name="email""#));
        assert!(page.contains(r#"action="/predict""#));
        assert!(page.contains(r#"<div class="result" id="prediction"></div>"#));
    }

    #[test]
    fn test_decision_message_rendered() {
        let page = IndexPage::with_decision(&Decision::Spam {
            confidence: Some(35.0),
        })
        .render()
        .unwrap();
        assert!(page.contains("⚠️ Spam (Confidence: 35.00%)"));
    }

    #[test]
    fn test_model_error_text_is_escaped() {
        let page = IndexPage::with_decision(&Decision::ModelError(
            "<script>alert(1)</script> & more".to_string(),
        ))
        .render()
        .unwrap();

        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(page.contains("&amp; more"));
    }
}
