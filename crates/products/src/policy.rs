use core::str::FromStr;

use serde::{Deserialize, Serialize};

use catalog_core::Entity;

/// Which products count as valid in a bulk validation request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BulkValidationPolicy {
    /// Only `available` products are valid; a soft-deleted id fails the request.
    #[default]
    AvailableOnly,
    /// Any stored product is valid, soft-deleted or not.
    IncludeUnavailable,
}

impl BulkValidationPolicy {
    pub fn admits<E: Entity>(&self, item: &E) -> bool {
        match self {
            Self::AvailableOnly => item.is_available(),
            Self::IncludeUnavailable => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AvailableOnly => "available-only",
            Self::IncludeUnavailable => "include-unavailable",
        }
    }
}

impl core::fmt::Display for BulkValidationPolicy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkValidationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "available-only" | "available_only" => Ok(Self::AvailableOnly),
            "include-unavailable" | "include_unavailable" => Ok(Self::IncludeUnavailable),
            other => Err(format!(
                "unknown bulk validation policy '{other}' (expected available-only or include-unavailable)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_both_spellings() {
        assert_eq!("available-only".parse(), Ok(BulkValidationPolicy::AvailableOnly));
        assert_eq!(
            "INCLUDE_UNAVAILABLE".parse(),
            Ok(BulkValidationPolicy::IncludeUnavailable)
        );
        assert!("everything".parse::<BulkValidationPolicy>().is_err());
    }

    #[test]
    fn default_filters_soft_deleted() {
        assert_eq!(BulkValidationPolicy::default(), BulkValidationPolicy::AvailableOnly);
    }

    #[test]
    fn admits_follows_availability() {
        let now = chrono::Utc::now();
        let mut product = crate::Product {
            id: crate::ProductId::new(1),
            name: "Widget".into(),
            price: 10.0,
            available: true,
            created_at: now,
            updated_at: now,
        };
        assert!(BulkValidationPolicy::AvailableOnly.admits(&product));

        product.available = false;
        assert!(!BulkValidationPolicy::AvailableOnly.admits(&product));
        assert!(BulkValidationPolicy::IncludeUnavailable.admits(&product));
    }
}
