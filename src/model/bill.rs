use super::de::{opt_f64_lenient, opt_string_or_number, u64_lenient};
use serde::{Deserialize, Serialize};

/// `POST /api/bills/analysis` 请求体，全部可选
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillAnalysisRequest {
    pub bill_name: Option<String>,
    pub bill_number: Option<String>,
    pub proposer: Option<String>,
    /// 의원 / 정부
    pub submission_type: Option<String>,
}

impl BillAnalysisRequest {
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            bill_name: Some(name.into()),
            ..Default::default()
        }
    }

    /// 空字符串不发送
    pub fn normalized(self) -> Self {
        let clean = |v: Option<String>| v.filter(|s| !s.trim().is_empty());
        Self {
            bill_name: clean(self.bill_name),
            bill_number: clean(self.bill_number),
            proposer: clean(self.proposer),
            submission_type: clean(self.submission_type)
                .filter(|s| !s.eq_ignore_ascii_case("all")),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.bill_name.is_none()
            && self.bill_number.is_none()
            && self.proposer.is_none()
            && self.submission_type.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillInfo {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bill_id: Option<String>,
    #[serde(default, alias = "bill_no", deserialize_with = "opt_string_or_number")]
    pub bill_number: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default, alias = "proposer")]
    pub proposer_name: Option<String>,
    #[serde(default)]
    pub proposer_type: Option<String>,
    #[serde(default, alias = "proposer_date")]
    pub propose_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyBreakdown {
    #[serde(default)]
    pub party_name: String,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub avg_score: Option<f64>,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub member_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberStat {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub member_id: Option<String>,
    #[serde(default)]
    pub member_name: Option<String>,
    #[serde(default)]
    pub party_name: Option<String>,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub n_speeches: u64,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillStats {
    #[serde(default, deserialize_with = "u64_lenient")]
    pub total_speeches: u64,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub total_cooperation: Option<f64>,
    #[serde(default)]
    pub party_breakdown: Vec<PartyBreakdown>,
    #[serde(default)]
    pub individual_members: Vec<MemberStat>,
}

/// `POST /api/bills/analysis` / `GET /api/bills/{id}/detail` 的响应
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillAnalysis {
    #[serde(default)]
    pub bill_info: BillInfo,
    #[serde(default)]
    pub stats: BillStats,
    #[serde(default)]
    pub message: Option<String>,
}

impl BillAnalysis {
    /// 后端找不到法案时 bill_info 为空对象
    pub fn found(&self) -> bool {
        self.bill_info.bill_name.is_some() || self.bill_info.bill_number.is_some()
    }

    pub fn into_record(self) -> BillRecord {
        BillRecord {
            id: self.bill_info.bill_id,
            bill_number: self.bill_info.bill_number,
            bill_name: self.bill_info.bill_name,
            proposer_name: self.bill_info.proposer_name,
            proposer_type: self.bill_info.proposer_type,
            propose_date: self.bill_info.propose_date,
            total_speeches: self.stats.total_speeches,
            total_cooperation: self.stats.total_cooperation,
            party_breakdown: self.stats.party_breakdown,
            individual_members: self.stats.individual_members,
        }
    }
}

/// 法案及其发言统计的扁平视图
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BillRecord {
    pub id: Option<String>,
    pub bill_number: Option<String>,
    pub bill_name: Option<String>,
    pub proposer_name: Option<String>,
    pub proposer_type: Option<String>,
    pub propose_date: Option<String>,
    pub total_speeches: u64,
    pub total_cooperation: Option<f64>,
    pub party_breakdown: Vec<PartyBreakdown>,
    pub individual_members: Vec<MemberStat>,
}

impl BillRecord {
    /// 合作度最高的政党排在前面
    pub fn parties_by_score(&self) -> Vec<&PartyBreakdown> {
        let mut parties: Vec<&PartyBreakdown> = self.party_breakdown.iter().collect();
        parties.sort_by(|a, b| {
            let a = a.avg_score.unwrap_or(f64::NEG_INFINITY);
            let b = b.avg_score.unwrap_or(f64::NEG_INFINITY);
            b.total_cmp(&a)
        });
        parties
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_drops_blank_and_all() {
        let req = BillAnalysisRequest {
            bill_name: Some("AI 기본법".into()),
            bill_number: Some("  ".into()),
            proposer: None,
            submission_type: Some("all".into()),
        }
        .normalized();
        assert_eq!(req.bill_name.as_deref(), Some("AI 기본법"));
        assert_eq!(req.bill_number, None);
        assert_eq!(req.submission_type, None);
        assert!(!req.is_empty());
        assert!(BillAnalysisRequest::default().normalized().is_empty());
    }

    #[test]
    fn request_serializes_nulls() {
        let json = serde_json::to_value(BillAnalysisRequest::by_name("법")).unwrap();
        assert_eq!(json["bill_name"], "법");
        assert!(json["bill_number"].is_null());
    }

    #[test]
    fn decodes_analysis_and_flattens() {
        let raw = r#"{
            "bill_info": {"bill_no": 2214531, "bill_name": "AI 기본법", "proposer": "김철수"},
            "stats": {
                "total_speeches": 42,
                "total_cooperation": 63.5,
                "party_breakdown": [
                    {"party_name": "국민의힘", "avg_score": 55.0, "member_count": 3},
                    {"party_name": "더불어민주당", "avg_score": 71.2, "member_count": 5}
                ]
            },
            "message": "Phân tích hoàn tất."
        }"#;
        let analysis: BillAnalysis = serde_json::from_str(raw).unwrap();
        assert!(analysis.found());
        let rec = analysis.into_record();
        assert_eq!(rec.bill_number.as_deref(), Some("2214531"));
        assert_eq!(rec.proposer_name.as_deref(), Some("김철수"));
        assert_eq!(rec.total_speeches, 42);
        assert!(rec.individual_members.is_empty());
        assert_eq!(rec.parties_by_score()[0].party_name, "더불어민주당");
    }

    #[test]
    fn not_found_response() {
        let raw = r#"{"bill_info": {}, "stats": {"total_speeches": 0, "total_cooperation": 0, "party_breakdown": []}}"#;
        let analysis: BillAnalysis = serde_json::from_str(raw).unwrap();
        assert!(!analysis.found());
    }
}
