use super::field::{FilterField, MatchKind};
use super::state::FilterCriteria;

/// 可被筛选的候选记录
pub trait Filterable {
    /// 返回字段对应的属性值；记录上没有该属性时返回 None
    fn field_value(&self, field: FilterField) -> Option<&str>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    pub field: FilterField,
    pub value: String,
    pub kind: MatchKind,
}

impl Predicate {
    pub fn matches<T: Filterable + ?Sized>(&self, candidate: &T) -> bool {
        let Some(actual) = candidate.field_value(self.field) else {
            return false;
        };
        match self.kind {
            MatchKind::Contains => actual.contains(self.value.as_str()),
            MatchKind::Equals => actual == self.value,
        }
    }
}

/// 把条件快照编译成互相独立的谓词列表（AND 组合）
pub fn compile(criteria: &FilterCriteria) -> Vec<Predicate> {
    criteria
        .iter()
        .filter_map(|(field, value)| {
            let value = value.trim();
            if value.is_empty() {
                return None;
            }
            Some(Predicate {
                field,
                value: value.to_string(),
                kind: field.match_kind(),
            })
        })
        .collect()
}

pub fn matches_all<T: Filterable + ?Sized>(candidate: &T, predicates: &[Predicate]) -> bool {
    predicates.iter().all(|p| p.matches(candidate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::state::FilterState;

    struct Row {
        name: Option<&'static str>,
        party: Option<&'static str>,
    }

    impl Filterable for Row {
        fn field_value(&self, field: FilterField) -> Option<&str> {
            match field {
                FilterField::Name => self.name,
                FilterField::Party => self.party,
                _ => None,
            }
        }
    }

    #[test]
    fn default_fields_compile_to_nothing() {
        let mut state = FilterState::new();
        for field in FilterField::ALL {
            state.set_field(field, Some("all".into()));
        }
        assert!(compile(&state.to_criteria()).is_empty());
    }

    #[test]
    fn text_fields_use_contains_and_others_equals() {
        let criteria = FilterCriteria::new()
            .with(FilterField::Name, "철수")
            .with(FilterField::Party, "국민의힘");
        let preds = compile(&criteria);
        assert_eq!(preds.len(), 2);
        let name = preds.iter().find(|p| p.field == FilterField::Name).unwrap();
        assert_eq!(name.kind, MatchKind::Contains);
        let party = preds.iter().find(|p| p.field == FilterField::Party).unwrap();
        assert_eq!(party.kind, MatchKind::Equals);
    }

    #[test]
    fn missing_attribute_never_matches() {
        let row = Row {
            name: None,
            party: Some("정의당"),
        };
        let pred = Predicate {
            field: FilterField::Name,
            value: "김".into(),
            kind: MatchKind::Contains,
        };
        assert!(!pred.matches(&row));

        let pred = Predicate {
            field: FilterField::Committee,
            value: "교육위원회".into(),
            kind: MatchKind::Equals,
        };
        assert!(!pred.matches(&row));
    }

    #[test]
    fn substring_match_is_case_sensitive() {
        let row = Row {
            name: Some("Kim Chulsoo"),
            party: None,
        };
        let lower = Predicate {
            field: FilterField::Name,
            value: "kim".into(),
            kind: MatchKind::Contains,
        };
        let exact = Predicate {
            field: FilterField::Name,
            value: "Kim".into(),
            kind: MatchKind::Contains,
        };
        assert!(!lower.matches(&row));
        assert!(exact.matches(&row));
    }

    #[test]
    fn equality_does_not_accept_prefixes() {
        let row = Row {
            name: None,
            party: Some("더불어민주당"),
        };
        let pred = Predicate {
            field: FilterField::Party,
            value: "더불어".into(),
            kind: MatchKind::Equals,
        };
        assert!(!pred.matches(&row));
    }
}
