use std::fmt::Display;

use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    #[default]
    Couple,
    Friends,
    Pet,
}

impl Display for PageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let page_type = match self {
            PageType::Couple => "couple",
            PageType::Friends => "friends",
            PageType::Pet => "pet",
        };
        write!(f, "{}", page_type)
    }
}

impl PageType {
    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "couple" => Some(PageType::Couple),
            "friends" => Some(PageType::Friends),
            "pet" => Some(PageType::Pet),
            _ => None,
        }
    }

    /// Pet pages honor a single name; the other types name two people.
    pub fn requires_second_name(&self) -> bool {
        !matches!(self, PageType::Pet)
    }
}
