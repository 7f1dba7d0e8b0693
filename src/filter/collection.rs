use super::predicate::{compile, matches_all, Filterable, Predicate};
use super::state::FilterCriteria;

/// 筛选结果统计：命中数 / 总数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultSummary {
    pub total: usize,
    pub current: usize,
}

impl ResultSummary {
    pub fn new(total: usize, current: usize) -> Self {
        Self { total, current }
    }

    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64
    }

    /// 总数为 0 时显示 "0"
    pub fn percentage_label(&self) -> String {
        if self.total == 0 {
            return "0".to_string();
        }
        format!("{:.2}%", self.ratio() * 100.0)
    }

    pub fn rounded_percent(&self) -> u16 {
        (self.ratio() * 100.0).round().clamp(0.0, 100.0) as u16
    }
}

/// 稳定过滤：保持候选原有顺序
pub fn materialize<T: Filterable + Clone>(candidates: &[T], predicates: &[Predicate]) -> Vec<T> {
    if predicates.is_empty() {
        return candidates.to_vec();
    }
    candidates
        .iter()
        .filter(|c| matches_all(*c, predicates))
        .cloned()
        .collect()
}

/// 一次拉取的全量候选快照，以及在它之上的筛选
#[derive(Debug, Clone)]
pub struct FilterableCollection<T> {
    snapshot: Vec<T>,
}

impl<T> Default for FilterableCollection<T> {
    fn default() -> Self {
        Self {
            snapshot: Vec::new(),
        }
    }
}

impl<T: Filterable + Clone> FilterableCollection<T> {
    pub fn new(snapshot: Vec<T>) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &[T] {
        &self.snapshot
    }

    pub fn len(&self) -> usize {
        self.snapshot.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.is_empty()
    }

    pub fn materialize(&self, predicates: &[Predicate]) -> Vec<T> {
        materialize(&self.snapshot, predicates)
    }

    pub fn apply(&self, criteria: &FilterCriteria) -> (Vec<T>, ResultSummary) {
        let predicates = compile(criteria);
        let result = self.materialize(&predicates);
        let summary = ResultSummary::new(self.snapshot.len(), result.len());
        (result, summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{FilterField, FilterState};

    #[derive(Debug, Clone, PartialEq)]
    struct Member {
        name: &'static str,
        party: &'static str,
        region: &'static str,
    }

    impl Filterable for Member {
        fn field_value(&self, field: FilterField) -> Option<&str> {
            match field {
                FilterField::Name => Some(self.name),
                FilterField::Party => Some(self.party),
                FilterField::City => self.region.split_whitespace().next(),
                _ => None,
            }
        }
    }

    fn sample() -> Vec<Member> {
        vec![
            Member {
                name: "김철수",
                party: "국민의힘",
                region: "서울",
            },
            Member {
                name: "이영희",
                party: "더불어민주당",
                region: "부산",
            },
            Member {
                name: "박민수",
                party: "국민의힘",
                region: "서울",
            },
        ]
    }

    #[test]
    fn empty_predicates_return_snapshot_unchanged() {
        let members = sample();
        assert_eq!(materialize(&members, &[]), members);
        let coll = FilterableCollection::new(members.clone());
        let (all, summary) = coll.apply(&FilterCriteria::new());
        assert_eq!(all, members);
        assert_eq!(summary, ResultSummary::new(3, 3));
    }

    #[test]
    fn exact_match_is_sound_and_complete() {
        let members = sample();
        let criteria = FilterCriteria::new().with(FilterField::Party, "더불어민주당");
        let (found, _) = FilterableCollection::new(members.clone()).apply(&criteria);

        assert!(found.iter().all(|m| m.party == "더불어민주당"));
        let expected = members.iter().filter(|m| m.party == "더불어민주당").count();
        assert_eq!(found.len(), expected);
    }

    #[test]
    fn partial_name_search() {
        let members = sample();
        let criteria = FilterCriteria::new().with(FilterField::Name, "철수");
        let (found, _) = FilterableCollection::new(members.clone()).apply(&criteria);
        assert_eq!(found, vec![members[0].clone()]);
    }

    #[test]
    fn party_and_region_scenario_keeps_order() {
        let members = sample();
        let mut state = FilterState::new();
        state.set_field(FilterField::Party, Some("국민의힘".into()));
        state.set_field(FilterField::City, Some("서울".into()));

        let (found, summary) =
            FilterableCollection::new(members.clone()).apply(&state.to_criteria());
        assert_eq!(found, vec![members[0].clone(), members[2].clone()]);
        assert_eq!(summary.current, 2);
        assert_eq!(summary.total, 3);
    }

    #[test]
    fn filtering_never_reorders_survivors() {
        let members: Vec<Member> = sample().into_iter().rev().collect();
        let criteria = FilterCriteria::new().with(FilterField::Party, "국민의힘");
        let (found, _) = FilterableCollection::new(members).apply(&criteria);
        let names: Vec<_> = found.iter().map(|m| m.name).collect();
        assert_eq!(names, vec!["박민수", "김철수"]);
    }

    #[test]
    fn summary_percentage_labels() {
        assert_eq!(ResultSummary::new(100, 25).percentage_label(), "25.00%");
        assert_eq!(ResultSummary::new(0, 0).percentage_label(), "0");
        assert_eq!(ResultSummary::new(3, 2).percentage_label(), "66.67%");
        assert_eq!(ResultSummary::new(3, 2).rounded_percent(), 67);
        assert_eq!(ResultSummary::new(0, 0).ratio(), 0.0);
    }
}
