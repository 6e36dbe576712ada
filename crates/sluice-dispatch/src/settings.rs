use serde::{Deserialize, Serialize};
use sluice_notation::{Arg, Notation};

/// Tunables for a [`Filter`](crate::Filter).
///
/// Every field has a default, so a partial YAML or JSON document
/// deserializes into a complete value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Parameter carrying the page number.
    pub page_param: String,
    /// Parameter carrying the page size.
    pub per_page_param: String,
    pub default_page: u64,
    pub default_per_page: u64,
    pub min_per_page: u64,
    pub max_per_page: u64,
    /// Budget given to operations registered without an explicit one.
    pub default_max_calls: u32,
    /// Type unquoted bracket elements (`true`, `12`, `1.5`) instead of
    /// keeping them as strings.
    pub infer_scalars: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            page_param: "page".to_string(),
            per_page_param: "perPage".to_string(),
            default_page: 1,
            default_per_page: 20,
            min_per_page: 1,
            max_per_page: 100,
            default_max_calls: 10,
            infer_scalars: false,
        }
    }
}

impl Settings {
    /// The parser these settings describe.
    pub fn notation(&self) -> Notation {
        Notation::new().infer_scalars(self.infer_scalars)
    }

    /// Resolves a submitted page number.
    ///
    /// Only integers (or integer strings) greater than one are taken;
    /// anything else yields the default.
    pub fn page(&self, submitted: Option<&Arg>) -> u64 {
        submitted
            .and_then(Arg::to_integer)
            .filter(|&page| page > 1)
            .and_then(|page| u64::try_from(page).ok())
            .unwrap_or(self.default_page)
    }

    /// Resolves a submitted page size.
    ///
    /// Values outside `min_per_page..=max_per_page` yield the default
    /// rather than the nearest bound.
    pub fn per_page(&self, submitted: Option<&Arg>) -> u64 {
        submitted
            .and_then(Arg::to_integer)
            .and_then(|n| u64::try_from(n).ok())
            .filter(|n| (self.min_per_page..=self.max_per_page).contains(n))
            .unwrap_or(self.default_per_page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.page(None), 1);
        assert_eq!(settings.page(Some(&Arg::Int(3))), 3);
        assert_eq!(settings.page(Some(&Arg::from("3"))), 3);
        assert_eq!(settings.page(Some(&Arg::Int(1))), 1);
        assert_eq!(settings.page(Some(&Arg::Int(0))), 1);
        assert_eq!(settings.page(Some(&Arg::Int(-4))), 1);
        assert_eq!(settings.page(Some(&Arg::from("two"))), 1);
        assert_eq!(settings.page(Some(&Arg::Float(2.5))), 1);
    }

    #[test]
    fn per_page_falls_back_instead_of_clamping() {
        let settings = Settings::default();
        assert_eq!(settings.per_page(None), 20);
        assert_eq!(settings.per_page(Some(&Arg::Int(1))), 1);
        assert_eq!(settings.per_page(Some(&Arg::from("100"))), 100);
        assert_eq!(settings.per_page(Some(&Arg::Int(101))), 20);
        assert_eq!(settings.per_page(Some(&Arg::Int(0))), 20);
        assert_eq!(settings.per_page(Some(&Arg::Int(-5))), 20);
        assert_eq!(settings.per_page(Some(&Arg::Bool(true))), 20);
    }

    #[test]
    fn partial_documents_keep_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"max_per_page": 50, "page_param": "p"}"#).unwrap();
        assert_eq!(settings.page_param, "p");
        assert_eq!(settings.max_per_page, 50);
        assert_eq!(settings.per_page_param, "perPage");
        assert_eq!(settings.per_page(Some(&Arg::Int(60))), 20);
    }
}
