#![forbid(unsafe_code)]

//! Stylesheet that binds host chrome to the theme custom properties.
//!
//! The host renders its own buttons, links, and navigation with colours
//! baked in at page load. Installing these rules once makes that chrome
//! follow whatever token set the bridge applies afterwards.

use crate::config::BridgeConfig;

/// Element id of the installed override stylesheet.
pub const HOST_OVERRIDES_ID: &str = "tintbridge-host-overrides";

const ROOT_ALIASES: [(&str, &str); 7] = [
    ("primaryButtonBackground", "themePrimary"),
    ("primaryButtonText", "white"),
    ("primaryButtonBackgroundHovered", "themeDarkAlt"),
    ("primaryButtonBackgroundPressed", "themeDark"),
    ("actionLink", "themePrimary"),
    ("linkHovered", "themeDarkAlt"),
    ("linkPressed", "themeDark"),
];

// selector, [(property, slot)]
const CHROME_RULES: [(&str, &[(&str, &str)]); 9] = [
    (
        ".ms-Button--primary",
        &[
            ("background-color", "themePrimary"),
            ("border-color", "themePrimary"),
            ("color", "white"),
        ],
    ),
    (
        ".ms-Button--primary:hover",
        &[
            ("background-color", "themeDarkAlt"),
            ("border-color", "themeDarkAlt"),
        ],
    ),
    (
        ".ms-Link, a:not([class*='ms-'])",
        &[("color", "themePrimary")],
    ),
    (
        ".ms-Link:hover, a:not([class*='ms-']):hover",
        &[("color", "themeDarkAlt")],
    ),
    (
        ".ms-TextField-fieldGroup:focus-within",
        &[("border-color", "themePrimary")],
    ),
    (
        ".ms-Nav-link.is-selected",
        &[
            ("background-color", "themeLighter"),
            ("color", "themePrimary"),
        ],
    ),
    (
        ".ms-CommandBar-primaryCommand",
        &[("color", "themePrimary")],
    ),
    (
        ".ms-List-cell.is-selected",
        &[("border-left", "4px solid var(--themePrimary)")],
    ),
    (
        "body",
        &[("background-color", "bodyBackground"), ("color", "bodyText")],
    ),
];

fn value_for(slot_or_value: &str) -> String {
    if slot_or_value.contains(' ') {
        slot_or_value.to_string()
    } else {
        format!("var(--{slot_or_value})")
    }
}

/// Render the host override stylesheet for `config`.
#[must_use]
pub fn host_override_css(config: &BridgeConfig) -> String {
    let mut css = String::from(":root {\n");
    for (alias, slot) in ROOT_ALIASES {
        css.push_str(&format!("  --{alias}: var(--{slot});\n"));
    }
    css.push_str("}\n\n");

    css.push_str(&format!(".{} {{\n  color-scheme: dark;\n}}\n", config.mode_class));

    for (selector, declarations) in CHROME_RULES {
        css.push_str(&format!("\n{selector} {{\n"));
        for (property, slot) in declarations {
            css.push_str(&format!("  {property}: {} !important;\n", value_for(slot)));
        }
        css.push_str("}\n");
    }
    css
}
