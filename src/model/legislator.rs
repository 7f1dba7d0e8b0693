use super::de::{opt_f64_lenient, opt_string_or_number, u64_lenient};
use super::display::main_committee_name;
use crate::filter::{FilterField, Filterable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `/api/legislators` 列表中的一行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegislatorRecord {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub member_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub committee: Option<String>,
    /// "시/도 구/군" 形式
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, rename = "count", deserialize_with = "opt_string_or_number")]
    pub elected_count: Option<String>,
    #[serde(default, rename = "method")]
    pub elected_method: Option<String>,
    #[serde(default, rename = "age", alias = "age_range")]
    pub age_bracket: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub score: Option<f64>,
    #[serde(default, alias = "totalBills", deserialize_with = "opt_string_or_number")]
    pub total_bills: Option<String>,
}

impl LegislatorRecord {
    /// 后端同时返回 id 和 member_id，优先 member_id
    pub fn key(&self) -> Option<&str> {
        self.member_id.as_deref().or(self.id.as_deref())
    }

    pub fn city(&self) -> Option<&str> {
        self.region.as_deref()?.split_whitespace().next()
    }

    pub fn district(&self) -> Option<&str> {
        let region = self.region.as_deref()?.trim();
        let (_, rest) = region.split_once(char::is_whitespace)?;
        let rest = rest.trim();
        if rest.is_empty() {
            None
        } else {
            Some(rest)
        }
    }

    pub fn main_committee(&self) -> Option<String> {
        self.committee.as_deref().map(main_committee_name)
    }
}

impl Filterable for LegislatorRecord {
    fn field_value(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Name => self.name.as_deref(),
            FilterField::Party => self.party.as_deref(),
            FilterField::City => self.city(),
            FilterField::District => self.district(),
            FilterField::Committee => self.committee.as_deref(),
            FilterField::Gender => self.gender.as_deref(),
            FilterField::AgeBracket => self.age_bracket.as_deref(),
            FilterField::ElectedCount => self.elected_count.as_deref(),
            FilterField::ElectedMethod => self.elected_method.as_deref(),
            FilterField::BillName => None,
        }
    }
}

/// `/api/filters` 的下拉选项
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    #[serde(default)]
    pub parties: Vec<String>,
    #[serde(default)]
    pub committees: Vec<String>,
    #[serde(default)]
    pub genders: Vec<String>,
    #[serde(default)]
    pub regions: Vec<String>,
    #[serde(default)]
    pub counts: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

impl FilterOptions {
    /// 后端给出的选项优先，缺失时退回内置列表
    pub fn options_for(&self, field: FilterField) -> Vec<String> {
        if field == FilterField::City && !self.regions.is_empty() {
            return self.cities();
        }
        let remote = match field {
            FilterField::Party => &self.parties,
            FilterField::Committee => &self.committees,
            FilterField::Gender => &self.genders,
            FilterField::ElectedCount => &self.counts,
            FilterField::ElectedMethod => &self.methods,
            _ => return field.options().iter().map(|s| s.to_string()).collect(),
        };
        if remote.is_empty() {
            field.options().iter().map(|s| s.to_string()).collect()
        } else {
            remote.clone()
        }
    }

    /// `regions` 形如 "서울 종로구"，取第一段去重，保持后端顺序
    fn cities(&self) -> Vec<String> {
        let mut cities: Vec<String> = Vec::new();
        for region in &self.regions {
            let Some(city) = region.split_whitespace().next() else {
                continue;
            };
            if !cities.iter().any(|c| c == city) {
                cities.push(city.to_string());
            }
        }
        cities
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegislatorProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub party: Option<String>,
    #[serde(default)]
    pub district: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub elected_count: Option<String>,
    #[serde(default)]
    pub elected_type: Option<String>,
    #[serde(default)]
    pub committee: Option<String>,
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub age: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommitteeTerm {
    #[serde(default)]
    pub committee: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartyTerm {
    #[serde(default, alias = "party_name")]
    pub party: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemberHistory {
    #[serde(default)]
    pub committees: Vec<CommitteeTerm>,
    #[serde(default)]
    pub parties: Vec<PartyTerm>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RepresentativeBill {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bill_id: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default)]
    pub proposer_date: Option<String>,
}

/// `/api/legislators/{id}/detail`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegislatorDetail {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub member_id: Option<String>,
    #[serde(default)]
    pub profile: LegislatorProfile,
    #[serde(default)]
    pub history: MemberHistory,
    #[serde(default)]
    pub representative_bills: Vec<RepresentativeBill>,
    #[serde(default)]
    pub message: Option<String>,
}

/// 议员参与审议的法案（`/api/legislators/{id}/bills`）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberBill {
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub bill_number: Option<String>,
    #[serde(default)]
    pub bill_name: Option<String>,
    #[serde(default)]
    pub proposer: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub n_speeches: u64,
    #[serde(default, deserialize_with = "u64_lenient")]
    pub total_speech_length: u64,
    #[serde(default)]
    pub sentiment: Option<String>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub score: Option<f64>,
    #[serde(default, deserialize_with = "opt_f64_lenient")]
    pub score_prob_mean: Option<f64>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub meeting_id: Option<String>,
}

/// 议员法案列表只按法案名筛选
impl Filterable for MemberBill {
    fn field_value(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::BillName => self.bill_name.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LegislatorBills {
    #[serde(default)]
    pub bills: Vec<MemberBill>,
    #[serde(default, alias = "aiSummary")]
    pub ai_summary: Option<String>,
}

/// 议员法案的态度分布：협력 / 비협력 / 其余
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StanceTally {
    pub cooperative: usize,
    pub non_cooperative: usize,
    pub neutral: usize,
}

impl StanceTally {
    pub fn from_bills(bills: &[MemberBill]) -> Self {
        let mut t = StanceTally::default();
        for b in bills {
            match b.sentiment.as_deref().map(str::trim) {
                Some("협력") => t.cooperative += 1,
                Some("비협력") => t.non_cooperative += 1,
                _ => t.neutral += 1,
            }
        }
        t
    }
}

/// 按政党聚合的议员统计（派生值，不是后端实体）
#[derive(Debug, Clone, PartialEq)]
pub struct PartyRollup {
    pub party: String,
    pub member_count: usize,
    pub avg_score: Option<f64>,
}

pub fn party_rollups(members: &[LegislatorRecord]) -> Vec<PartyRollup> {
    let mut groups: BTreeMap<&str, (usize, f64, usize)> = BTreeMap::new();
    for m in members {
        let Some(party) = m.party.as_deref() else {
            continue;
        };
        let entry = groups.entry(party).or_insert((0, 0.0, 0));
        entry.0 += 1;
        if let Some(s) = m.score.filter(|s| s.is_finite()) {
            entry.1 += s;
            entry.2 += 1;
        }
    }
    let mut rollups: Vec<PartyRollup> = groups
        .into_iter()
        .map(|(party, (count, sum, scored))| PartyRollup {
            party: party.to_string(),
            member_count: count,
            avg_score: (scored > 0).then(|| sum / scored as f64),
        })
        .collect();
    rollups.sort_by(|a, b| b.member_count.cmp(&a.member_count));
    rollups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_backend_list_row() {
        let raw = r#"{
            "id": 101, "member_id": 101, "name": "김철수", "party": "국민의힘",
            "region": "서울 종로구", "committee": "교육위원회", "gender": "남",
            "count": "재선", "method": "지역구", "score": 77
        }"#;
        let rec: LegislatorRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(rec.key(), Some("101"));
        assert_eq!(rec.city(), Some("서울"));
        assert_eq!(rec.district(), Some("종로구"));
        assert_eq!(rec.elected_count.as_deref(), Some("재선"));
        assert_eq!(rec.score, Some(77.0));
        assert_eq!(rec.age_bracket, None);
    }

    #[test]
    fn region_without_district() {
        let rec = LegislatorRecord {
            region: Some("비례대표".into()),
            ..Default::default()
        };
        assert_eq!(rec.city(), Some("비례대표"));
        assert_eq!(rec.district(), None);
        assert_eq!(rec.field_value(FilterField::District), None);
    }

    #[test]
    fn city_options_come_from_regions() {
        let opts = FilterOptions {
            regions: vec![
                "서울 종로구".into(),
                "부산 해운대구".into(),
                "서울 강남구".into(),
                "  ".into(),
                "세종".into(),
            ],
            ..Default::default()
        };
        assert_eq!(opts.options_for(FilterField::City), vec!["서울", "부산", "세종"]);
        assert_eq!(
            FilterOptions::default().options_for(FilterField::City).len(),
            crate::filter::field::CITIES.len()
        );
    }

    #[test]
    fn member_bills_filter_on_bill_name_only() {
        let bill = MemberBill {
            bill_name: Some("AI 기본법".into()),
            proposer: Some("김철수".into()),
            ..Default::default()
        };
        assert_eq!(bill.field_value(FilterField::BillName), Some("AI 기본법"));
        assert_eq!(bill.field_value(FilterField::Name), None);
    }

    #[test]
    fn detail_with_sparse_fields() {
        let raw = r#"{
            "member_id": 7,
            "profile": {"name": "이영희", "elected_count": 3},
            "history": {"committees": [{"committee": "정무위원회", "start_date": "2020-06-01"}]}
        }"#;
        let detail: LegislatorDetail = serde_json::from_str(raw).unwrap();
        assert_eq!(detail.profile.elected_count.as_deref(), Some("3"));
        assert_eq!(detail.history.committees.len(), 1);
        assert!(detail.history.parties.is_empty());
        assert!(detail.representative_bills.is_empty());
    }

    #[test]
    fn member_bills_are_camel_case() {
        let raw = r#"{"bills": [{"id": 0, "billNumber": "2100001", "billName": "AI 기본법",
            "nSpeeches": 4, "sentiment": "협력", "scoreProbMean": 0.412}],
            "ai_summary": "요약"}"#;
        let bills: LegislatorBills = serde_json::from_str(raw).unwrap();
        assert_eq!(bills.bills[0].bill_number.as_deref(), Some("2100001"));
        assert_eq!(bills.bills[0].n_speeches, 4);
        assert_eq!(bills.ai_summary.as_deref(), Some("요약"));
        assert_eq!(StanceTally::from_bills(&bills.bills).cooperative, 1);
    }

    #[test]
    fn rollups_group_by_party() {
        let m = |party: &str, score: Option<f64>| LegislatorRecord {
            party: Some(party.into()),
            score,
            ..Default::default()
        };
        let rollups = party_rollups(&[
            m("국민의힘", Some(80.0)),
            m("정의당", None),
            m("국민의힘", Some(60.0)),
        ]);
        assert_eq!(rollups[0].party, "국민의힘");
        assert_eq!(rollups[0].member_count, 2);
        assert_eq!(rollups[0].avg_score, Some(70.0));
        assert_eq!(rollups[1].avg_score, None);
    }

    #[test]
    fn options_fall_back_to_builtin_lists() {
        let opts = FilterOptions {
            parties: vec!["A당".into()],
            ..Default::default()
        };
        assert_eq!(opts.options_for(FilterField::Party), vec!["A당".to_string()]);
        assert_eq!(opts.options_for(FilterField::Gender), vec!["남".to_string(), "여".to_string()]);
    }
}
