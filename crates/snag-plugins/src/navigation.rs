//! Navigation breadcrumbs.

use snag_core::config::OptionDescriptor;
use snag_core::config::schema::{is_bool, null};
use snag_core::{Breadcrumb, BreadcrumbKind, Client, PluginDescriptor, PluginResult, define_plugin};

use crate::breadcrumb_channel_enabled;

/// The navigation breadcrumbs plugin.
pub static NAVIGATION_BREADCRUMBS: PluginDescriptor = define_plugin! {
    name: "navigation breadcrumbs",
    desc: "Records page and route changes.",
    config_schema: &[(
        "navigationBreadcrumbsEnabled",
        OptionDescriptor::new(null, is_bool, "should be true|false"),
    )],
    init: init,
};

fn init(client: &mut Client) -> PluginResult<()> {
    if breadcrumb_channel_enabled(client, "navigationBreadcrumbsEnabled") {
        client.enable_breadcrumbs(BreadcrumbKind::Navigation);
    }
    Ok(())
}

/// Breadcrumb for a change of location.
pub fn navigation_breadcrumb(from: &str, to: &str) -> Breadcrumb {
    Breadcrumb::new("Navigated", BreadcrumbKind::Navigation)
        .with_meta("from", from)
        .with_meta("to", to)
}
