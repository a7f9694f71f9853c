use serde::{Deserialize, Serialize};

/// Title of a media or name of a character
///
/// Remote names map `full` onto `english`; remote synonyms land in `alternative`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Alias {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub english: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub romaji: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative: Vec<String>,
}

impl Alias {
    pub fn english(value: impl Into<String>) -> Self {
        Self {
            english: Some(value.into()),
            ..Self::default()
        }
    }

    /// Non-empty `[english, romaji, native]` in that priority order
    pub fn to_array(&self) -> Vec<String> {
        [&self.english, &self.romaji, &self.native]
            .into_iter()
            .flatten()
            .filter(|value| !value.trim().is_empty())
            .cloned()
            .collect()
    }

    /// Every form a search may match against, primary forms first
    pub fn searchable(&self) -> Vec<String> {
        let mut forms = self.to_array();
        forms.extend(
            self.alternative
                .iter()
                .filter(|value| !value.trim().is_empty())
                .cloned(),
        );
        forms
    }

    /// The display form, falling back to the first alternative
    pub fn primary(&self) -> Option<String> {
        self.to_array()
            .into_iter()
            .next()
            .or_else(|| self.alternative.first().cloned())
    }
}
