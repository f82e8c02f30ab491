//! Interaction breadcrumbs.

use snag_core::config::OptionDescriptor;
use snag_core::config::schema::{is_bool, null};
use snag_core::{Breadcrumb, BreadcrumbKind, Client, PluginDescriptor, PluginResult, define_plugin};

use crate::breadcrumb_channel_enabled;

/// Longest target text kept on a click breadcrumb.
const MAX_TARGET_TEXT: usize = 140;

/// The interaction breadcrumbs plugin.
pub static INTERACTION_BREADCRUMBS: PluginDescriptor = define_plugin! {
    name: "interaction breadcrumbs",
    desc: "Records user clicks.",
    config_schema: &[(
        "interactionBreadcrumbsEnabled",
        OptionDescriptor::new(null, is_bool, "should be true|false"),
    )],
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    if breadcrumb_channel_enabled(client, "interactionBreadcrumbsEnabled") {
        client.enable_breadcrumbs(BreadcrumbKind::User);
    }
    Ok(())
}

/// Breadcrumb for a click on an element.
pub fn click_breadcrumb(target_text: &str, target_selector: &str) -> Breadcrumb {
    let text = target_text.trim();
    let text: String = if text.chars().count() > MAX_TARGET_TEXT {
        let mut cut: String = text.chars().take(MAX_TARGET_TEXT).collect();
        cut.push_str("(...)");
        cut
    } else {
        text.to_string()
    };
    Breadcrumb::new("UI click", BreadcrumbKind::User)
        .with_meta("targetText", text)
        .with_meta("targetSelector", target_selector)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::configured_with;
    use serde_json::json;
    use snag_core::HostInfo;

    #[test]
    fn test_click_text_truncated() {
        let crumb = click_breadcrumb(&"x".repeat(200), "BUTTON.buy");
        let text = crumb.meta_data["targetText"].as_str().unwrap();
        assert!(text.ends_with("(...)"));
        assert_eq!(text.chars().count(), MAX_TARGET_TEXT + 5);
    }

    #[test]
    fn test_channel_enabled() {
        let (client, _) = configured_with(
            &INTERACTION_BREADCRUMBS,
            json!({ "apiKey": "k" }),
            HostInfo::default(),
        );
        assert!(client.records_breadcrumbs(BreadcrumbKind::User));
    }
}
