use crate::models::RecommendMethod;

/// Where a document-level click landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    SearchInput,
    /// Inside the dropdown but not on an item
    Suggestions,
    /// On the suggestion at this index
    SuggestionItem(usize),
    RecommendButton,
    Elsewhere,
}

impl ClickTarget {
    /// Whether the click should close the dropdown
    pub fn is_outside_search(self) -> bool {
        !matches!(
            self,
            ClickTarget::SearchInput | ClickTarget::Suggestions | ClickTarget::SuggestionItem(_)
        )
    }
}

/// Keys the search input reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Other(char),
}

/// Every input the client reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// Page finished loading
    Loaded,
    /// Search input value changed
    Input(String),
    Focus,
    Click(ClickTarget),
    KeyPress(Key),
    MethodChanged(RecommendMethod),
    CountChanged(u32),
}
