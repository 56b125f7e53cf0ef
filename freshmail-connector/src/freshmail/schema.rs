//! Static field catalog and label localization.

use mailstats::contract::{
    ConceptType, DataType, LocalizedField, SemanticGroup, SemanticType, Semantics,
};

use super::config::DEFAULT_LANGUAGE;

/// One catalog entry with labels for every supported language.
#[derive(Debug)]
pub struct FieldDefinition {
    pub name: &'static str,
    /// `(language_code, label)` pairs
    pub labels: &'static [(&'static str, &'static str)],
    pub data_type: DataType,
    pub semantics: Semantics,
}

impl FieldDefinition {
    /// Label in `language`, else in the default language.
    pub fn label(&self, language: &str) -> &'static str {
        self.label_in(language)
            .or_else(|| self.label_in(DEFAULT_LANGUAGE))
            .unwrap_or(self.name)
    }

    fn label_in(&self, language: &str) -> Option<&'static str> {
        self.labels
            .iter()
            .find(|(code, _)| *code == language)
            .map(|(_, label)| *label)
    }

    pub fn localize(&self, language: &str) -> LocalizedField {
        LocalizedField {
            name: self.name.to_string(),
            label: self.label(language).to_string(),
            data_type: self.data_type,
            semantics: self.semantics,
        }
    }
}

const fn metric(
    name: &'static str,
    labels: &'static [(&'static str, &'static str)],
) -> FieldDefinition {
    FieldDefinition {
        name,
        labels,
        data_type: DataType::Number,
        semantics: Semantics {
            concept_type: ConceptType::Metric,
            semantic_type: Some(SemanticType::Number),
            semantic_group: Some(SemanticGroup::Numeric),
        },
    }
}

pub static CATALOG: [FieldDefinition; 12] = [
    FieldDefinition {
        name: "id_hash",
        labels: &[("pl", "Id"), ("en", "Id")],
        data_type: DataType::String,
        semantics: Semantics {
            concept_type: ConceptType::Dimension,
            semantic_type: None,
            semantic_group: None,
        },
    },
    FieldDefinition {
        name: "sent",
        labels: &[("pl", "Wysłane"), ("en", "Sent")],
        data_type: DataType::String,
        semantics: Semantics {
            concept_type: ConceptType::Dimension,
            semantic_type: None,
            semantic_group: Some(SemanticGroup::Datetime),
        },
    },
    FieldDefinition {
        name: "topic",
        labels: &[("en", "Topic"), ("pl", "Temat")],
        data_type: DataType::String,
        semantics: Semantics {
            concept_type: ConceptType::Dimension,
            semantic_type: Some(SemanticType::Text),
            semantic_group: None,
        },
    },
    metric("subscribers", &[("pl", "Subskrybenci"), ("en", "Subscribers")]),
    metric("delivered", &[("pl", "Dostarczone"), ("en", "Delivered")]),
    metric("hard_bounce", &[("en", "Hard bounce"), ("pl", "Twarde odbicia")]),
    metric("soft_bounce", &[("en", "Soft bounce"), ("pl", "Miękkie odbicia")]),
    metric("opened", &[("en", "Opened"), ("pl", "Otwarte")]),
    metric("clicked", &[("en", "Clicked"), ("pl", "Kliki")]),
    metric("unique_opened", &[("en", "Unique opened"), ("pl", "Unikalne otwarcia")]),
    metric("unique_clicked", &[("en", "Unique clicked"), ("pl", "Unikalne kliki")]),
    metric("resigned", &[("en", "Resigned"), ("pl", "Rezygnacje")]),
];

pub fn find_field(name: &str) -> Option<&'static FieldDefinition> {
    CATALOG.iter().find(|field| field.name == name)
}

/// Whole catalog localized to `language`, in catalog order.
pub fn full_schema(language: &str) -> Vec<LocalizedField> {
    CATALOG.iter().map(|field| field.localize(language)).collect()
}

/// Schema for the requested fields, one slot per name in request order.
///
/// An empty request means the whole catalog. Unknown names yield `None` so
/// schema and row positions stay aligned.
pub fn schema_for(language: &str, requested: &[String]) -> Vec<Option<LocalizedField>> {
    if requested.is_empty() {
        return full_schema(language).into_iter().map(Some).collect();
    }
    requested
        .iter()
        .map(|name| find_field(name).map(|field| field.localize(language)))
        .collect()
}
