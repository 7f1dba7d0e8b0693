use super::field::FilterField;
use std::collections::BTreeMap;

/// 把用户输入的原始值规范化：空白、"all"、"전체" 都表示不限制
pub fn normalize_value(raw: Option<String>) -> Option<String> {
    let value = raw?;
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("all") || trimmed == "전체" {
        return None;
    }
    Some(value)
}

/// 筛选条件快照
///
/// 不在表中的字段即“不限制”。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    values: BTreeMap<FilterField, String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: FilterField, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    pub fn set(&mut self, field: FilterField, value: Option<String>) {
        match normalize_value(value) {
            Some(v) => {
                self.values.insert(field, v);
            }
            None => {
                self.values.remove(&field);
            }
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &str)> {
        self.values.iter().map(|(f, v)| (*f, v.as_str()))
    }
}

/// 当前筛选表单的状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    current: FilterCriteria,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用传入的条件初始化（例如从议员详情页带过来的筛选）
    pub fn from_criteria(criteria: FilterCriteria) -> Self {
        Self { current: criteria }
    }

    /// 设置单个字段。切换 City 时 District 回到不限制。
    pub fn set_field(&mut self, field: FilterField, value: Option<String>) {
        self.current.set(field, value);
        if field == FilterField::City {
            self.current.set(FilterField::District, None);
        }
    }

    pub fn get(&self, field: FilterField) -> Option<&str> {
        self.current.get(field)
    }

    pub fn reset(&mut self) {
        self.current = FilterCriteria::default();
    }

    pub fn to_criteria(&self) -> FilterCriteria {
        self.current.clone()
    }

    pub fn is_default(&self) -> bool {
        self.current.is_empty()
    }

    pub fn active_fields(&self) -> Vec<FilterField> {
        self.current.iter().map(|(f, _)| f).collect()
    }

    /// 在候选列表中循环切换到下一个值，最后一个之后回到不限制
    pub fn cycle_option(&mut self, field: FilterField, options: &[String]) {
        if options.is_empty() {
            return;
        }
        let next = match self.get(field) {
            None => Some(options[0].clone()),
            Some(cur) => match options.iter().position(|o| o == cur) {
                Some(i) if i + 1 < options.len() => Some(options[i + 1].clone()),
                Some(_) => None,
                None => Some(options[0].clone()),
            },
        };
        self.set_field(field, next);
    }
}
