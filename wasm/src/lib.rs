use row_config_engine::layout_dump::LayoutDump;
use row_config_engine::{ConstraintTable, RowConfiguration, derive_layout, parse_row_configuration};
use serde::Deserialize;
use wasm_bindgen::prelude::*;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutOptions {
    constraints: Option<ConstraintTable>,
}

fn layout_json(configuration: &str, options: LayoutOptions) -> Result<String, String> {
    let config: RowConfiguration = if configuration.trim().is_empty() {
        RowConfiguration::default()
    } else {
        parse_row_configuration(configuration).map_err(|error| error.to_string())?
    };
    let table = options.constraints.unwrap_or_default();
    let layout = derive_layout(&config, &table);
    serde_json::to_string(&LayoutDump::from_layout(&layout, &config)).map_err(|error| error.to_string())
}

/// Derives the renderer-facing layout for a saved configuration.
#[wasm_bindgen]
pub fn derive_row_layout(configuration: &str, options_json: Option<String>) -> Result<String, JsValue> {
    let options = if let Some(raw_options) = options_json {
        serde_json::from_str::<LayoutOptions>(&raw_options)
            .map_err(|error| JsValue::from_str(&error.to_string()))?
    } else {
        LayoutOptions::default()
    };

    layout_json(configuration, options).map_err(|error| JsValue::from_str(&error))
}

#[cfg(test)]
mod tests {
    use crate::{LayoutOptions, layout_json};

    #[test]
    fn derives_default_layout_for_empty_input() {
        let json = layout_json("", LayoutOptions::default()).expect("default layout should derive");
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["workingWidth"], 1800);
        assert_eq!(value["rows"].as_array().unwrap().len(), 6);
    }

    #[test]
    fn malformed_configuration_is_an_error() {
        assert!(layout_json("{activeRows:", LayoutOptions::default()).is_err());
    }
}
