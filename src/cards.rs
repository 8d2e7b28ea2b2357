//! Transport-neutral description of the meme form.
//!
//! The chat transport renders this however it likes (an adaptive card in
//! practice) and posts the filled values back as a flat `field id -> string`
//! map.

use crate::catalog::TemplateCatalog;
use serde::Serialize;
use std::collections::BTreeMap;

pub const FIELD_MEME_TYPE: &str = "meme_type";
pub const FIELD_TEXT_TOP: &str = "text_top";
pub const FIELD_TEXT_BOTTOM: &str = "text_bottom";

/// Inputs are capped at this many characters; `Workflow::submit` rejects longer text.
pub const TEXT_MAX_LENGTH: usize = 100;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FormDescription {
    pub title: String,
    pub notes: Vec<String>,
    pub choice_set: ChoiceSet,
    pub text_inputs: Vec<TextInput>,
    pub actions: Vec<FormAction>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ChoiceSet {
    pub id: String,
    pub is_multi_select: bool,
    pub choices: Vec<Choice>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Choice {
    pub title: String,
    pub value: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TextInput {
    pub id: String,
    pub placeholder: String,
    pub max_length: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormAction {
    /// Posts the inputs back together with `data`.
    Submit {
        title: String,
        data: BTreeMap<String, String>,
    },
    OpenUrl {
        title: String,
        url: String,
    },
}

impl FormAction {
    fn submit(title: &str, key: &str, value: &str) -> Self {
        FormAction::Submit {
            title: title.to_string(),
            data: BTreeMap::from([(key.to_string(), value.to_string())]),
        }
    }
}

/// Builds the "Make a Meme" form: one choice per template, two text fields,
/// then submit, view-templates and cancel actions.
pub fn meme_form(
    catalog: &TemplateCatalog,
    callback_keyword: &str,
    cancel_keyword: &str,
    templates_page_url: &str,
) -> FormDescription {
    let choices = catalog
        .templates()
        .iter()
        .map(|t| Choice {
            title: t.display_name.clone(),
            value: t.selector_value.clone(),
        })
        .collect();

    FormDescription {
        title: "Make a Meme".to_string(),
        notes: vec![
            "This bot uses memegen.link to generate memes. Click 'View Templates' to view available templates."
                .to_string(),
            "Fill in at least one field. If you want a line left blank, type a space.".to_string(),
        ],
        choice_set: ChoiceSet {
            id: FIELD_MEME_TYPE.to_string(),
            is_multi_select: false,
            choices,
        },
        text_inputs: vec![
            TextInput {
                id: FIELD_TEXT_TOP.to_string(),
                placeholder: "Top Text".to_string(),
                max_length: TEXT_MAX_LENGTH,
            },
            TextInput {
                id: FIELD_TEXT_BOTTOM.to_string(),
                placeholder: "Bottom Text".to_string(),
                max_length: TEXT_MAX_LENGTH,
            },
        ],
        actions: vec![
            FormAction::submit("Go!", "callback_keyword", callback_keyword),
            FormAction::OpenUrl {
                title: "View Templates".to_string(),
                url: templates_page_url.to_string(),
            },
            FormAction::submit("Cancel", "command_keyword", cancel_keyword),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileExtension, Template};

    fn catalog() -> TemplateCatalog {
        TemplateCatalog::new(vec![
            Template::new("drake".into(), "Drakeposting".into(), FileExtension::Jpg),
            Template::new("party".into(), "Party Parrot".into(), FileExtension::Gif),
        ])
    }

    #[test]
    fn one_choice_per_template() {
        let form = meme_form(&catalog(), "cb", "exit", "https://memegen.link/#templates");
        assert_eq!(
            form.choice_set.choices,
            vec![
                Choice { title: "Drakeposting".into(), value: "drake.jpg".into() },
                Choice { title: "Party Parrot".into(), value: "party.gif".into() },
            ]
        );
        assert_eq!(form.choice_set.id, FIELD_MEME_TYPE);
    }

    #[test]
    fn has_two_text_fields_and_cancel_action() {
        let form = meme_form(&catalog(), "cb", "exit", "https://memegen.link/#templates");
        let ids: Vec<&str> = form.text_inputs.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec![FIELD_TEXT_TOP, FIELD_TEXT_BOTTOM]);

        let json = serde_json::to_value(&form.actions).unwrap();
        assert_eq!(json[0]["type"], "submit");
        assert_eq!(json[0]["data"]["callback_keyword"], "cb");
        assert_eq!(json[1]["url"], "https://memegen.link/#templates");
        assert_eq!(json[2]["data"]["command_keyword"], "exit");
    }
}
