use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Display language. Persian is the default, as the quiz was written for a Persian audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    #[default]
    Fa,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fa => "fa",
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Language::En => Language::Fa,
            Language::Fa => Language::En,
        }
    }

    /// Pick the string matching this language
    pub fn pick<'a>(&self, en: &'a str, fa: &'a str) -> &'a str {
        match self {
            Language::En => en,
            Language::Fa => fa,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Language::En),
            "fa" | "persian" | "farsi" => Ok(Language::Fa),
            other => Err(format!("unknown language '{}' (expected 'en' or 'fa')", other)),
        }
    }
}

/// A Likert agreement value, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Likert(u8);

impl Likert {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Likert(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// All five options, in ascending order
    pub fn options() -> impl Iterator<Item = Likert> {
        (Self::MIN..=Self::MAX).map(Likert)
    }

    pub fn label(self, lang: Language) -> &'static str {
        match self.0 {
            1 => lang.pick("Strongly Disagree", "کاملاً مخالفم"),
            2 => lang.pick("Disagree", "مخالفم"),
            3 => lang.pick("Neutral", "نظری ندارم"),
            4 => lang.pick("Agree", "موافقم"),
            _ => lang.pick("Strongly Agree", "کاملاً موافقم"),
        }
    }
}

impl TryFrom<u8> for Likert {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Likert::new(value).ok_or_else(|| format!("response {} is outside the 1-5 scale", value))
    }
}

impl From<Likert> for u8 {
    fn from(value: Likert) -> Self {
        value.0
    }
}

/// Answers keyed by question id.
///
/// Ids are not checked against the question table here; scoring ignores
/// unknown ids so that partially corrupted progress still produces a result.
/// Keys that are not question ids at all (negative, too large, not numeric)
/// are dropped while decoding. Values must still be on the 1-5 scale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ResponseSet(BTreeMap<u32, Likert>);

impl<'de> Deserialize<'de> for ResponseSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ResponsesVisitor;

        impl<'de> Visitor<'de> for ResponsesVisitor {
            type Value = ResponseSet;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping question ids to answers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut responses = BTreeMap::new();
                while let Some(key) = map.next_key::<String>()? {
                    match key.trim().parse::<u32>() {
                        Ok(id) => {
                            responses.insert(id, map.next_value::<Likert>()?);
                        }
                        Err(_) => {
                            map.next_value::<IgnoredAny>()?;
                            tracing::debug!(%key, "ignoring answer to unknown question id");
                        }
                    }
                }
                Ok(ResponseSet(responses))
            }
        }

        deserializer.deserialize_map(ResponsesVisitor)
    }
}

impl ResponseSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any earlier answer to the same question
    pub fn insert(&mut self, question_id: u32, value: Likert) -> Option<Likert> {
        self.0.insert(question_id, value)
    }

    pub fn get(&self, question_id: u32) -> Option<Likert> {
        self.0.get(&question_id).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, Likert)> + '_ {
        self.0.iter().map(|(id, value)| (*id, *value))
    }
}

impl FromIterator<(u32, Likert)> for ResponseSet {
    fn from_iter<T: IntoIterator<Item = (u32, Likert)>>(iter: T) -> Self {
        ResponseSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_likert_bounds() {
        assert!(Likert::new(0).is_none());
        assert!(Likert::new(6).is_none());
        assert_eq!(Likert::new(1).unwrap().value(), 1);
        assert_eq!(Likert::new(5).unwrap().value(), 5);
        assert_eq!(Likert::options().count(), 5);
    }

    #[test]
    fn test_likert_labels() {
        let agree = Likert::new(4).unwrap();
        assert_eq!(agree.label(Language::En), "Agree");
        assert_eq!(agree.label(Language::Fa), "موافقم");
    }

    #[test]
    fn test_response_set_json_uses_string_keys() {
        let mut responses = ResponseSet::new();
        responses.insert(1, Likert::new(5).unwrap());
        responses.insert(11, Likert::new(4).unwrap());

        let json = serde_json::to_string(&responses).unwrap();
        assert_eq!(json, r#"{"1":5,"11":4}"#);

        let parsed: ResponseSet = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, responses);
    }

    #[test]
    fn test_response_set_rejects_out_of_scale_values() {
        let result: Result<ResponseSet, _> = serde_json::from_str(r#"{"1":7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_response_set_skips_ids_outside_u32() {
        let parsed: ResponseSet =
            serde_json::from_str(r#"{"-1":3,"1":5,"5000000000":2,"abc":9}"#).unwrap();
        let expected: ResponseSet = [(1, Likert::new(5).unwrap())].into_iter().collect();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_response_set_from_json_value() {
        let value = serde_json::json!({"2": 4, "-7": 1});
        let parsed: ResponseSet = serde_json::from_value(value).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed.get(2), Likert::new(4));
    }

    #[test]
    fn test_response_set_insert_replaces() {
        let mut responses = ResponseSet::new();
        responses.insert(3, Likert::new(2).unwrap());
        let previous = responses.insert(3, Likert::new(4).unwrap());
        assert_eq!(previous, Likert::new(2));
        assert_eq!(responses.len(), 1);
        assert_eq!(responses.get(3), Likert::new(4));
    }

    #[test]
    fn test_language_parse_and_toggle() {
        assert_eq!("EN".parse::<Language>().unwrap(), Language::En);
        assert_eq!("farsi".parse::<Language>().unwrap(), Language::Fa);
        assert!("de".parse::<Language>().is_err());
        assert_eq!(Language::Fa.toggle(), Language::En);
        assert_eq!(Language::default(), Language::Fa);
    }
}
