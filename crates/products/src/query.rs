//! Query vocabulary for catalog lookups.

use serde::{Deserialize, Serialize};

/// Price sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    /// Parse a direction token. Only `asc` (any case) is ascending; every other
    /// token, including the empty string, means descending.
    pub fn from_token(token: &str) -> Self {
        if token.eq_ignore_ascii_case("asc") {
            SortOrder::Asc
        } else {
            SortOrder::Desc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn asc_is_case_insensitive() {
        assert_eq!(SortOrder::from_token("asc"), SortOrder::Asc);
        assert_eq!(SortOrder::from_token("ASC"), SortOrder::Asc);
        assert_eq!(SortOrder::from_token("aSc"), SortOrder::Asc);
    }

    #[test]
    fn desc_and_unknown_tokens_are_descending() {
        assert_eq!(SortOrder::from_token("desc"), SortOrder::Desc);
        assert_eq!(SortOrder::from_token(""), SortOrder::Desc);
        assert_eq!(SortOrder::from_token("ascending"), SortOrder::Desc);
    }

    proptest! {
        #[test]
        fn any_non_asc_token_is_descending(token in "[a-zA-Z]{0,8}") {
            prop_assume!(!token.eq_ignore_ascii_case("asc"));
            prop_assert_eq!(SortOrder::from_token(&token), SortOrder::Desc);
        }
    }
}
