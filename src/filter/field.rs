use std::fmt;
use std::str::FromStr;

/// 筛选字段
///
/// 每个字段对应候选记录上的一个属性。`Name` 和 `BillName` 按子串匹配，
/// 其余字段按值精确匹配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterField {
    Name,
    Party,
    City,
    District,
    Committee,
    Gender,
    AgeBracket,
    ElectedCount,
    ElectedMethod,
    BillName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Contains,
    Equals,
}

impl FilterField {
    pub const ALL: [FilterField; 10] = [
        FilterField::Name,
        FilterField::Party,
        FilterField::City,
        FilterField::District,
        FilterField::Committee,
        FilterField::Gender,
        FilterField::AgeBracket,
        FilterField::ElectedCount,
        FilterField::ElectedMethod,
        FilterField::BillName,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FilterField::Name => "name",
            FilterField::Party => "party",
            FilterField::City => "city",
            FilterField::District => "district",
            FilterField::Committee => "committee",
            FilterField::Gender => "gender",
            FilterField::AgeBracket => "age",
            FilterField::ElectedCount => "count",
            FilterField::ElectedMethod => "method",
            FilterField::BillName => "bill",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Name => "이름",
            FilterField::Party => "정당",
            FilterField::City => "시/도",
            FilterField::District => "구/군",
            FilterField::Committee => "위원회",
            FilterField::Gender => "성별",
            FilterField::AgeBracket => "연령",
            FilterField::ElectedCount => "당선횟수",
            FilterField::ElectedMethod => "당선방법",
            FilterField::BillName => "법안명",
        }
    }

    pub fn match_kind(self) -> MatchKind {
        match self {
            FilterField::Name | FilterField::BillName => MatchKind::Contains,
            _ => MatchKind::Equals,
        }
    }

    /// 自由输入字段没有候选列表
    pub fn is_free_text(self) -> bool {
        self.match_kind() == MatchKind::Contains
    }

    /// 下拉候选值（不含“全部”）
    pub fn options(self) -> &'static [&'static str] {
        match self {
            FilterField::Party => PARTIES,
            FilterField::City => CITIES,
            FilterField::Committee => COMMITTEES,
            FilterField::Gender => &["남", "여"],
            FilterField::AgeBracket => &["u30", "u40", "u50", "u60", "u70", "o70"],
            FilterField::ElectedCount => &["초선", "재선", "3선", "4선", "5선", "6선"],
            FilterField::ElectedMethod => &["지역구", "비례대표"],
            FilterField::District | FilterField::Name | FilterField::BillName => &[],
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for FilterField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "name" | "이름" => Ok(FilterField::Name),
            "party" | "정당" => Ok(FilterField::Party),
            "city" | "region" | "시도" => Ok(FilterField::City),
            "district" | "구군" => Ok(FilterField::District),
            "committee" | "위원회" => Ok(FilterField::Committee),
            "gender" | "성별" => Ok(FilterField::Gender),
            "age" | "연령" => Ok(FilterField::AgeBracket),
            "count" | "당선횟수" => Ok(FilterField::ElectedCount),
            "method" | "당선방법" => Ok(FilterField::ElectedMethod),
            "bill" | "billname" | "법안명" => Ok(FilterField::BillName),
            _ => Err(format!("unknown filter field: {}", s.trim())),
        }
    }
}

pub const PARTIES: &[&str] = &[
    "더불어민주당",
    "국민의힘",
    "기본소득당",
    "국민의당",
    "열린민주당",
    "미래통합당",
    "미래한국당",
    "정의당",
    "새로운미래",
    "시대전환",
    "무소속",
];

pub const CITIES: &[&str] = &[
    "서울", "부산", "대구", "인천", "광주", "대전", "울산", "경기", "강원", "충북", "충남", "전북",
    "전남", "경북", "경남", "제주", "세종",
];

pub const COMMITTEES: &[&str] = &[
    "과학기술정보방송통신위원회",
    "교육위원회",
    "국방위원회",
    "국토교통위원회",
    "국회운영위원회",
    "기획재정위원회",
    "농림축산식품해양수산위원회",
    "문화체육관광위원회",
    "법제사법위원회",
    "보건복지위원회",
    "산업통상자원중소벤처기업위원회",
    "여성가족위원회",
    "예산결산특별위원회",
    "외교통일위원회",
    "윤리특별위원회",
    "정무위원회",
    "정보위원회",
    "행정안전위원회",
    "환경노동위원회",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_parse_back_to_fields() {
        for field in FilterField::ALL {
            assert_eq!(field.key().parse::<FilterField>(), Ok(field));
        }
        assert_eq!("region".parse::<FilterField>(), Ok(FilterField::City));
        assert!("height".parse::<FilterField>().is_err());
    }

    #[test]
    fn only_text_fields_match_by_substring() {
        let contains: Vec<_> = FilterField::ALL
            .into_iter()
            .filter(|f| f.match_kind() == MatchKind::Contains)
            .collect();
        assert_eq!(contains, vec![FilterField::Name, FilterField::BillName]);
    }
}
