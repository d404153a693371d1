//! Composite filter state for the listing and global search pages.
//!
//! Free text and the categorical filters are held in one value so that a
//! search always reads them consistently together.

/// Label of the "no filtering" selection.
pub const ALL: &str = "All";

/// Query parameters sent to the filter endpoint, in request order.
pub type QueryParams = Vec<(String, String)>;

const TEXT_PARAM: &str = "search";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Stage,
    Category,
    Location,
}

impl FilterField {
    pub const ALL_FIELDS: [FilterField; 3] =
        [FilterField::Stage, FilterField::Category, FilterField::Location];

    pub fn param_name(self) -> &'static str {
        match self {
            FilterField::Stage => "stage",
            FilterField::Category => "category",
            FilterField::Location => "location",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL_FIELDS
            .into_iter()
            .find(|field| field.param_name().eq_ignore_ascii_case(name.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Selection {
    #[default]
    All,
    Only(String),
}

impl Selection {
    /// Interprets a raw select value; empty input or "All" (any case) selects everything.
    pub fn from_input(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            Selection::All
        } else {
            Selection::Only(value.to_string())
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }

    pub fn label(&self) -> &str {
        match self {
            Selection::All => ALL,
            Selection::Only(value) => value,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FilterState {
    text: String,
    stage: Selection,
    category: Selection,
    location: Selection,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn selection(&self, field: FilterField) -> &Selection {
        match field {
            FilterField::Stage => &self.stage,
            FilterField::Category => &self.category,
            FilterField::Location => &self.location,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Replaces exactly one categorical field.
    pub fn set_filter(&mut self, field: FilterField, value: &str) {
        let selection = Selection::from_input(value);
        match field {
            FilterField::Stage => self.stage = selection,
            FilterField::Category => self.category = selection,
            FilterField::Location => self.location = selection,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when nothing is filtered: the bulk collection is shown as-is.
    pub fn is_default(&self) -> bool {
        self.text.trim().is_empty()
            && FilterField::ALL_FIELDS
                .into_iter()
                .all(|field| self.selection(field).is_all())
    }

    /// Only the non-default fields, text first.
    pub fn query_params(&self) -> QueryParams {
        let mut params = Vec::with_capacity(4);
        let text = self.text.trim();
        if !text.is_empty() {
            params.push((TEXT_PARAM.to_string(), text.to_string()));
        }
        for field in FilterField::ALL_FIELDS {
            if let Selection::Only(value) = self.selection(field) {
                params.push((field.param_name().to_string(), value.clone()));
            }
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_filter_touches_one_field_only() {
        let mut filters = FilterState::new();
        filters.set_text("fintech");
        filters.set_filter(FilterField::Stage, "MVP");
        filters.set_filter(FilterField::Location, "Germany");

        filters.set_filter(FilterField::Stage, "Scaling");

        assert_eq!(filters.text(), "fintech");
        assert_eq!(
            filters.selection(FilterField::Stage),
            &Selection::Only("Scaling".to_string())
        );
        assert!(filters.selection(FilterField::Category).is_all());
        assert_eq!(filters.selection(FilterField::Location).label(), "Germany");
    }

    #[test]
    fn all_and_blank_values_select_default() {
        let mut filters = FilterState::new();
        filters.set_filter(FilterField::Category, "SaaS");
        filters.set_filter(FilterField::Category, "all");
        assert!(filters.is_default());

        filters.set_filter(FilterField::Category, "  ");
        filters.set_text("   ");
        assert!(filters.is_default());
        assert!(filters.query_params().is_empty());
    }

    #[test]
    fn query_params_carry_only_non_default_fields() {
        let mut filters = FilterState::new();
        filters.set_filter(FilterField::Category, "SaaS");

        assert_eq!(
            filters.query_params(),
            vec![("category".to_string(), "SaaS".to_string())]
        );

        filters.set_text(" robotics ");
        filters.set_filter(FilterField::Location, "India");
        assert_eq!(
            filters.query_params(),
            vec![
                ("search".to_string(), "robotics".to_string()),
                ("category".to_string(), "SaaS".to_string()),
                ("location".to_string(), "India".to_string()),
            ]
        );
    }

    #[test]
    fn reset_restores_every_default() {
        let mut filters = FilterState::new();
        filters.set_text("abc");
        filters.set_filter(FilterField::Stage, "Idea");
        filters.reset();
        assert_eq!(filters, FilterState::default());
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!(FilterField::parse("Stage"), Some(FilterField::Stage));
        assert_eq!(FilterField::parse(" location"), Some(FilterField::Location));
        assert_eq!(FilterField::parse("country"), None);
    }
}
