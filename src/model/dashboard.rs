use super::de::{opt_f64_lenient, opt_string_or_number, u64_lenient};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SentimentShare {
    #[serde(default, alias = "cooperation", deserialize_with = "opt_f64_lenient")]
    pub cooperative: Option<f64>,
    #[serde(default, alias = "nonCooperation", deserialize_with = "opt_f64_lenient")]
    pub non_cooperative: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub neutral: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeaturedPrediction {
    #[serde(default, alias = "billName")]
    pub bill_name: Option<String>,
    #[serde(default, alias = "passProbability", deserialize_with = "opt_f64_lenient")]
    pub probability: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// 首页统计 `/api/dashboard-stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub sentiment: SentimentShare,
    #[serde(default)]
    pub prediction: FeaturedPrediction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UserInfo {
    /// full_name，其次 username，最后取邮箱 @ 前缀
    pub fn display_name(&self) -> String {
        if let Some(n) = self.full_name.as_deref().filter(|s| !s.trim().is_empty()) {
            return n.to_string();
        }
        if let Some(n) = self.username.as_deref().filter(|s| !s.trim().is_empty()) {
            return n.to_string();
        }
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .unwrap_or("")
            .to_string()
    }
}

/// `/api/dashboard/me`（需要登录）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserDashboard {
    #[serde(default)]
    pub user: UserInfo,
    #[serde(default)]
    pub recent_searches: Vec<String>,
    #[serde(default)]
    pub favorites: Vec<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupCooperation {
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub avg_score_prob: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub adjusted_score_prob: Option<f64>,
    #[serde(default)]
    pub adjusted_stance: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedMember {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub member_id: Option<String>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub n_speeches: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub total_speeches: u64,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub avg_score_prob: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub bayesian_score: Option<f64>,
    #[serde(default)]
    pub adjusted_stance: Option<String>,
}

impl RankedMember {
    pub fn display_name(&self) -> &str {
        self.member_name
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("-")
    }

    pub fn speeches(&self) -> u64 {
        self.n_speeches.max(self.total_speeches)
    }

    /// 有 Bayesian 分数时优先显示
    pub fn display_score(&self) -> Option<f64> {
        self.bayesian_score.or(self.avg_score_prob)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedBill {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bill_id: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub avg_score_prob: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub bayesian_score: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
}

impl RankedBill {
    pub fn display_name(&self) -> &str {
        self.bill_name
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or("-")
    }

    pub fn display_score(&self) -> Option<f64> {
        self.bayesian_score.or(self.avg_score_prob)
    }
}

/// 政党 / 委员会汇总，两个接口结构一致
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub analyzed_members: u64,
    #[serde(default)]
    pub total_cooperation: GroupCooperation,
    #[serde(default)]
    pub member_top: Vec<RankedMember>,
    #[serde(default)]
    pub member_bottom: Vec<RankedMember>,
    #[serde(default)]
    pub bill_top: Vec<RankedBill>,
    #[serde(default)]
    pub bill_bottom: Vec<RankedBill>,
}

/// `/api/unified-search`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnifiedSearchResponse {
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub total_count: u64,
    #[serde(default)]
    pub message: Option<String>,
}

impl UnifiedSearchResponse {
    /// 每条结果的一行摘要：类型 + 名称
    pub fn lines(&self) -> Vec<String> {
        self.results
            .iter()
            .map(|hit| {
                let kind = hit
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or("result");
                let title = ["name", "bill_name", "title", "party_name", "committee"]
                    .iter()
                    .find_map(|k| hit.get(*k).and_then(Value::as_str))
                    .unwrap_or("?");
                format!("[{}] {}", kind, title)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_stats_from_backend() {
        let raw = r#"{"sentiment": {"cooperative": 65, "non_cooperative": 35, "neutral": 0},
            "prediction": {"bill_name": "AI 기본법 (안)", "probability": 87, "status": "예측 완료"}}"#;
        let s: DashboardStats = serde_json::from_str(raw).unwrap();
        assert_eq!(s.sentiment.cooperative, Some(65.0));
        assert_eq!(s.prediction.probability, Some(87.0));
    }

    #[test]
    fn party_summary_rankings() {
        let raw = r#"{"analyzed_members": 12,
            "total_cooperation": {"avg_score_prob": 0.12, "adjusted_stance": "협력"},
            "member_top": [{"member_id": 1, "member_name": "정청래", "n_speeches": 3,
                            "avg_score_prob": 0.5, "bayesian_score": 0.41}],
            "bill_top": [{"bill_id": "2100001", "title": "특검법", "avg_score_prob": -0.2}]}"#;
        let s: GroupSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(s.analyzed_members, 12);
        assert_eq!(s.member_top[0].display_name(), "정청래");
        assert_eq!(s.member_top[0].display_score(), Some(0.41));
        assert_eq!(s.bill_top[0].display_name(), "특검법");
        assert_eq!(s.bill_top[0].display_score(), Some(-0.2));
        assert!(s.member_bottom.is_empty());
    }

    #[test]
    fn user_display_name_fallbacks() {
        let u = UserInfo {
            email: Some("kim@example.com".into()),
            ..Default::default()
        };
        assert_eq!(u.display_name(), "kim");
        let u = UserInfo {
            full_name: Some("김철수".into()),
            ..u
        };
        assert_eq!(u.display_name(), "김철수");
    }

    #[test]
    fn search_lines() {
        let raw = r#"{"results": [{"type": "legislator", "name": "김철수"}, {"bill_name": "법"}], "total_count": 2}"#;
        let r: UnifiedSearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(r.lines(), vec!["[legislator] 김철수", "[result] 법"]);
    }
}
