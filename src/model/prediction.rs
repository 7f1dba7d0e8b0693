use super::de::{opt_f64_lenient, opt_string_or_number, u64_lenient};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoredLevel {
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub score: Option<f64>,
    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceBill {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bill_number: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub avg_score_prob: Option<f64>,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub n_speeches: u64,
    /// 1 = 통과, 0 = 미통과
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub label: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub similarity: Option<f64>,
    #[serde(default)]
    pub stance: Option<String>,
}

impl EvidenceBill {
    pub fn passed(&self) -> bool {
        self.label.map(|l| l >= 1.0).unwrap_or(false)
    }
}

/// `POST /api/predict/bill-pass` 的响应；没有相似法案时概率为空
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillPassPrediction {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub evidence_bills: Vec<EvidenceBill>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub predicted_pass_probability: Option<f64>,
    #[serde(default)]
    pub confidence: Option<ScoredLevel>,
    #[serde(default)]
    pub legislative_gap: Option<ScoredLevel>,
    #[serde(default)]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutlook {
    Likely,
    Uncertain,
    Unlikely,
}

impl PassOutlook {
    pub fn label(self) -> &'static str {
        match self {
            PassOutlook::Likely => "가결 유력",
            PassOutlook::Uncertain => "보류",
            PassOutlook::Unlikely => "부결 예상",
        }
    }
}

impl BillPassPrediction {
    /// 概率转为百分数
    pub fn percent(&self) -> Option<f64> {
        self.predicted_pass_probability
            .filter(|p| p.is_finite())
            .map(|p| if p <= 1.0 { p * 100.0 } else { p })
    }

    /// >= 70 看好, <= 40 不看好
    pub fn outlook(&self) -> Option<PassOutlook> {
        let pct = self.percent()?;
        Some(if pct >= 70.0 {
            PassOutlook::Likely
        } else if pct <= 40.0 {
            PassOutlook::Unlikely
        } else {
            PassOutlook::Uncertain
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_full_prediction() {
        let raw = r#"{
            "query": "인공지능",
            "predicted_pass_probability": 0.8731,
            "legislative_gap": {"score": 0.12, "level": "낮음"},
            "confidence": {"score": 0.9, "level": "높음"},
            "explanation": "유사 법안 다수 통과",
            "evidence_bills": [
                {"bill_number": "2100001", "bill_name": "AI 기본법", "avg_score_prob": 0.3,
                 "n_speeches": 12, "label": 1, "similarity": 0.91, "stance": "협력"}
            ]
        }"#;
        let p: BillPassPrediction = serde_json::from_str(raw).unwrap();
        assert_eq!(p.outlook(), Some(PassOutlook::Likely));
        assert!((p.percent().unwrap() - 87.31).abs() < 1e-9);
        assert!(p.evidence_bills[0].passed());
        assert_eq!(p.confidence.unwrap().level.as_deref(), Some("높음"));
    }

    #[test]
    fn no_similar_bills() {
        let raw = r#"{"query": "x", "predicted_pass_probability": null, "legislative_gap": null,
            "confidence": null, "explanation": "유사한 과거 법안을 찾을 수 없습니다.", "evidence_bills": []}"#;
        let p: BillPassPrediction = serde_json::from_str(raw).unwrap();
        assert_eq!(p.percent(), None);
        assert_eq!(p.outlook(), None);
    }

    #[test]
    fn outlook_thresholds() {
        let with = |p: f64| BillPassPrediction {
            predicted_pass_probability: Some(p),
            ..Default::default()
        };
        assert_eq!(with(0.25).outlook(), Some(PassOutlook::Unlikely));
        assert_eq!(with(0.5).outlook(), Some(PassOutlook::Uncertain));
        assert_eq!(with(0.75).outlook(), Some(PassOutlook::Likely));
        assert_eq!(with(87.5).percent(), Some(87.5));
    }
}
