//! Point-of-sale settings page contribution.
//!
//! The host renders settings from plain field descriptors. This module only
//! produces the descriptors for the POS Products section and applies submitted
//! values back to the [`DefaultResolver`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AvailabilityError;
use crate::ports::OptionStore;
use crate::resolver::DefaultResolver;

/// Field id of the "sell all products by default" checkbox.
pub const SELL_ALL_BY_DEFAULT_SETTING: &str = "sell_all_products_by_default";

/// Id shared by the section's title and end markers.
pub const POS_PRODUCTS_SECTION: &str = "pos_products";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Title,
    Checkbox,
    SectionEnd,
}

/// One entry of a settings page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub desc: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub default: Option<String>,
}

impl SettingField {
    fn new(id: &str, field_type: FieldType) -> Self {
        Self {
            id: id.to_string(),
            field_type,
            title: None,
            desc: None,
            default: None,
        }
    }
}

/// The POS Products section: title, the default checkbox, section end.
pub fn pos_products_section() -> Vec<SettingField> {
    vec![
        SettingField {
            title: Some("POS Products".to_string()),
            desc: Some("Choose which catalog items are offered at the point of sale.".to_string()),
            ..SettingField::new(POS_PRODUCTS_SECTION, FieldType::Title)
        },
        SettingField {
            title: Some("Sell all products by default".to_string()),
            desc: Some(
                "New and updated products without an explicit choice are available at the point of sale."
                    .to_string(),
            ),
            default: Some("yes".to_string()),
            ..SettingField::new(SELL_ALL_BY_DEFAULT_SETTING, FieldType::Checkbox)
        },
        SettingField::new(POS_PRODUCTS_SECTION, FieldType::SectionEnd),
    ]
}

/// Prepend the POS Products section to the host's existing settings.
pub fn contribute(existing: Vec<SettingField>) -> Vec<SettingField> {
    let mut fields = pos_products_section();
    fields.extend(existing);
    fields
}

/// Current values of the fields this module owns, keyed by field id.
pub fn current_values<O: OptionStore>(resolver: &DefaultResolver<O>) -> BTreeMap<String, String> {
    let value = if resolver.get_default() { "yes" } else { "no" };
    BTreeMap::from([(SELL_ALL_BY_DEFAULT_SETTING.to_string(), value.to_string())])
}

/// Apply a submitted settings form.
///
/// An unchecked checkbox is simply absent from the submission, so absence
/// means `false`.
pub fn save<O: OptionStore>(
    resolver: &DefaultResolver<O>,
    submitted: &BTreeMap<String, String>,
) -> Result<(), AvailabilityError> {
    let checked = submitted
        .get(SELL_ALL_BY_DEFAULT_SETTING)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "yes" | "1" | "on" | "true"))
        .unwrap_or(false);
    resolver.set_default(checked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeStore;

    fn field(id: &str) -> SettingField {
        SettingField::new(id, FieldType::Checkbox)
    }

    #[test]
    fn section_is_prepended_to_existing_settings() {
        let fields = contribute(vec![field("host_a"), field("host_b")]);
        let ids: Vec<_> = fields.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                POS_PRODUCTS_SECTION,
                SELL_ALL_BY_DEFAULT_SETTING,
                POS_PRODUCTS_SECTION,
                "host_a",
                "host_b"
            ]
        );
        assert_eq!(fields[2].field_type, FieldType::SectionEnd);
    }

    #[test]
    fn checkbox_defaults_to_yes() {
        let section = pos_products_section();
        let checkbox = section
            .iter()
            .find(|f| f.id == SELL_ALL_BY_DEFAULT_SETTING)
            .unwrap();
        assert_eq!(checkbox.default.as_deref(), Some("yes"));
    }

    #[test]
    fn serializes_in_host_shape() {
        let json = serde_json::to_value(pos_products_section()).unwrap();
        assert_eq!(json[1]["type"], "checkbox");
        assert_eq!(json[2]["type"], "sectionend");
        assert!(json[2].get("title").is_none());
    }

    #[test]
    fn save_and_read_back() {
        let resolver = DefaultResolver::new(FakeStore::new());
        assert_eq!(current_values(&resolver)[SELL_ALL_BY_DEFAULT_SETTING], "yes");

        save(&resolver, &BTreeMap::new()).unwrap();
        assert!(!resolver.get_default());
        assert_eq!(current_values(&resolver)[SELL_ALL_BY_DEFAULT_SETTING], "no");

        let submitted = BTreeMap::from([(SELL_ALL_BY_DEFAULT_SETTING.to_string(), "on".to_string())]);
        save(&resolver, &submitted).unwrap();
        assert!(resolver.get_default());
    }
}
