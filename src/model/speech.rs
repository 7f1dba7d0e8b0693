use super::de::{opt_f64_lenient, opt_string_or_number};
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SentimentLabel {
    Cooperative,
    NonCooperative,
    #[default]
    Neutral,
}

impl SentimentLabel {
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "협력" | "cooperative" | "coop" => SentimentLabel::Cooperative,
            "비협력" | "non-cooperative" | "non_cooperative" | "noncoop" => {
                SentimentLabel::NonCooperative
            }
            _ => SentimentLabel::Neutral,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SentimentLabel::Cooperative => "협력",
            SentimentLabel::NonCooperative => "비협력",
            SentimentLabel::Neutral => "중립",
        }
    }
}

impl<'de> Deserialize<'de> for SentimentLabel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.map(|s| SentimentLabel::parse(&s)).unwrap_or_default())
    }
}

/// 单条发言
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechRecord {
    #[serde(default, alias = "speech_id", deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(default, alias = "speech_text")]
    pub text: Option<String>,
    #[serde(default, alias = "sentiment")]
    pub sentiment_label: SentimentLabel,
    /// 约在 [-1, 1]
    #[serde(default, alias = "score", deserialize_with = "opt_f64_lenient")]
    pub score_prob: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub meeting_id: Option<String>,
}

/// `/api/legislators/{id}/bills/{billId}/speeches`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillSpeeches {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub member_id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bill_id: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default)]
    pub speeches: Vec<SpeechRecord>,
    #[serde(default, alias = "aiSummary")]
    pub ai_summary: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}
