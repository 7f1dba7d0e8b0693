use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// 后端的 id / 次数字段有时是数字有时是字符串，统一读成字符串
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        Some(other) => Some(other.to_string()),
    })
}

/// 数值字段容错：数字、数字字符串都接受，其余视为缺失
pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

pub fn u64_lenient<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<Value>::deserialize(deserializer)?;
    Ok(match v {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse::<u64>().unwrap_or(0),
        _ => 0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "opt_string_or_number")]
        id: Option<String>,
        #[serde(default, deserialize_with = "opt_f64_lenient")]
        score: Option<f64>,
        #[serde(default, deserialize_with = "u64_lenient")]
        n: u64,
    }

    #[test]
    fn accepts_numbers_and_strings() {
        let p: Probe = serde_json::from_str(r#"{"id": 101, "score": "0.5", "n": 3.0}"#).unwrap();
        assert_eq!(p.id.as_deref(), Some("101"));
        assert_eq!(p.score, Some(0.5));
        assert_eq!(p.n, 3);

        let p: Probe = serde_json::from_str(r#"{"id": null, "score": "n/a"}"#).unwrap();
        assert_eq!(p.id, None);
        assert_eq!(p.score, None);
        assert_eq!(p.n, 0);
    }
}
