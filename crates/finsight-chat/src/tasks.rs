//! Pre-authored analytical prompts.
//!
//! These are not a separate answering path: each task is only a fixed
//! question string submitted through the ordinary ask flow, and it updates
//! conversation memory like any other question.

use serde::{Deserialize, Serialize};

/// The analyst toolbox: fixed analytical prompts over the indexed reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisTask {
    Summary,
    EarningsForecast,
    RiskFactors,
    SentimentScore,
}

impl AnalysisTask {
    pub const ALL: [AnalysisTask; 4] = [
        AnalysisTask::Summary,
        AnalysisTask::EarningsForecast,
        AnalysisTask::RiskFactors,
        AnalysisTask::SentimentScore,
    ];

    /// Short human-readable name for menus.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Summary => "Core thesis summary",
            Self::EarningsForecast => "Earnings forecast extraction",
            Self::RiskFactors => "Risk factor identification",
            Self::SentimentScore => "Market sentiment score",
        }
    }

    /// The question string submitted through the ordinary ask path.
    pub fn prompt(&self) -> &'static str {
        match self {
            Self::Summary => {
                "You are a senior securities analyst. Summarize this research report's core \
                 investment thesis, the rationale behind its recommendation, and the target \
                 price, in professional financial language. Keep it under 300 words."
            }
            Self::EarningsForecast => {
                "Extract the key financial forecasts for the next three years (revenue, net \
                 profit, EPS) from the report and present them as a Markdown table. If the \
                 report gives no concrete figures, say so."
            }
            Self::RiskFactors => {
                "List the top three investment risks mentioned in this research report and \
                 rate the potential impact of each on the share price (high/medium/low)."
            }
            Self::SentimentScore => {
                "Based on the strength of this report's language and its rating, score the \
                 market sentiment for the stock from 0 to 10 (10 = extremely bullish) and \
                 briefly justify the score."
            }
        }
    }
}

impl std::fmt::Display for AnalysisTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
