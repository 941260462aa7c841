//! Console and JSON reports

use corpus_config::ModelRecommendation;
use corpus_core::BuildSummary;
use corpus_tokens::TokenReport;
use serde::Serialize;

/// A model's recommended encoding and its count, when that encoding succeeded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub model: String,
    pub encoding: String,
    pub tokens: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct Report<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build: Option<&'a BuildSummary>,
    pub tokens: &'a TokenReport,
    pub recommendations: Vec<Recommendation>,
}

impl<'a> Report<'a> {
    pub fn new(
        build: Option<&'a BuildSummary>,
        tokens: &'a TokenReport,
        models: &[ModelRecommendation],
    ) -> Self {
        Self {
            build,
            tokens,
            recommendations: recommendations(models, tokens),
        }
    }

    pub fn print(&self) {
        print!("{}", self.render());
    }

    /// Text report. Scheme failures are left to the estimator's log output.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(summary) = self.build {
            out.push_str(&render_build(summary));
        }

        out.push_str("\nToken count estimates for different encodings:\n");
        for (encoding, count) in self.tokens.counts() {
            out.push_str(&format!("{}: {} tokens\n", encoding, count));
        }

        out.push_str("\nRecommended encodings for specific models:\n");
        for rec in &self.recommendations {
            out.push_str(&recommendation_line(rec));
            out.push('\n');
        }
        out
    }

    pub fn print_json(&self) -> anyhow::Result<()> {
        println!("{}", serde_json::to_string_pretty(self)?);
        Ok(())
    }
}

pub fn print_build(summary: &BuildSummary) {
    print!("{}", render_build(summary));
}

fn render_build(summary: &BuildSummary) -> String {
    let mut out = format!("Combined file created: {}\n", summary.output_path.display());
    out.push_str(&format!("File size: {:.2} MB\n", summary.size_mb()));
    out.push_str(&format!(
        "  Files appended: {} (skipped after target: {})\n",
        summary.files_appended, summary.files_skipped
    ));
    out.push_str(&format!("  Digest: {}\n", summary.digest));
    out
}

pub fn recommendations(
    models: &[ModelRecommendation],
    tokens: &TokenReport,
) -> Vec<Recommendation> {
    models
        .iter()
        .map(|m| Recommendation {
            model: m.model.clone(),
            encoding: m.encoding.clone(),
            tokens: tokens.get(&m.encoding),
        })
        .collect()
}

fn recommendation_line(rec: &Recommendation) -> String {
    match rec.tokens {
        Some(count) => format!(
            "{}: Use {} encoding ({} tokens)",
            rec.model, rec.encoding, count
        ),
        None => format!(
            "{}: Recommended encoding {} not found in available encodings.",
            rec.model, rec.encoding
        ),
    }
}
