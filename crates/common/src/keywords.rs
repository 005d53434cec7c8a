//! Action keyword whitelist

use serde::{Deserialize, Serialize};

/// Actions that are treated as known when validating steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKeyword {
    Login,
    Enters,
    Clicks,
    Redirected,
    Displayed,
}

/// The complete whitelist. Order carries no meaning.
pub const KNOWN_ACTION_KEYWORDS: [ActionKeyword; 5] = [
    ActionKeyword::Login,
    ActionKeyword::Enters,
    ActionKeyword::Clicks,
    ActionKeyword::Redirected,
    ActionKeyword::Displayed,
];

impl ActionKeyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKeyword::Login => "login",
            ActionKeyword::Enters => "enters",
            ActionKeyword::Clicks => "clicks",
            ActionKeyword::Redirected => "redirected",
            ActionKeyword::Displayed => "displayed",
        }
    }

    /// First whitelisted keyword occurring anywhere in `text`, ignoring case
    pub fn find_in(text: &str) -> Option<ActionKeyword> {
        let text = text.to_lowercase();
        KNOWN_ACTION_KEYWORDS
            .iter()
            .copied()
            .find(|keyword| text.contains(keyword.as_str()))
    }
}

impl std::fmt::Display for ActionKeyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_in_matches_substrings() {
        assert_eq!(ActionKeyword::find_in("the user CLICKS it"), Some(ActionKeyword::Clicks));
        assert_eq!(ActionKeyword::find_in("relogin later"), Some(ActionKeyword::Login));
        assert_eq!(ActionKeyword::find_in("an error is Displayed"), Some(ActionKeyword::Displayed));
        assert_eq!(ActionKeyword::find_in("the user performs a backflip"), None);
        assert_eq!(ActionKeyword::find_in(""), None);
    }

    #[test]
    fn test_whitelist_is_exactly_five() {
        let words: Vec<&str> = KNOWN_ACTION_KEYWORDS.iter().map(|k| k.as_str()).collect();
        assert_eq!(words, ["login", "enters", "clicks", "redirected", "displayed"]);
    }
}
