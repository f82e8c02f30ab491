//! Plugin activation policy.
//!
//! Decides, from a validated configuration, which plugins are registered and
//! in what order:
//!
//! | Plugins | Active |
//! |---------|--------|
//! | device, context, request | always |
//! | window onerror, unhandled rejection, navigation and interaction breadcrumbs | unless `autoNotify` is `false` |
//! | console breadcrumbs | if `autoConsoleBreadcrumbsEnabled`, or the release stage is not `dev`/`development` |
//! | inline script content | always |
//! | caller plugins | always, in supplied order |
//! | throttle | always, last |

use std::sync::LazyLock;

use regex::Regex;

use snag_core::{PluginDescriptor, ValidatedConfig};
use snag_plugins::{
    CONSOLE_BREADCRUMBS, CONTEXT, DEVICE, INLINE_SCRIPT_CONTENT, INTERACTION_BREADCRUMBS,
    NAVIGATION_BREADCRUMBS, REQUEST, THROTTLE, UNHANDLED_REJECTION, WINDOW_ERROR,
};

static DEVELOPMENT_STAGE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("^dev(elopment)?$").ok());

/// Whether `stage` names a development release stage. Case-sensitive.
pub fn is_development_stage(stage: &str) -> bool {
    DEVELOPMENT_STAGE
        .as_ref()
        .is_some_and(|pattern| pattern.is_match(stage))
}

/// Whether console breadcrumbs are registered for `config`.
pub fn console_breadcrumbs_active(config: &ValidatedConfig) -> bool {
    config.auto_console_breadcrumbs_enabled()
        || !config.release_stage().is_some_and(is_development_stage)
}

/// Returns the plugins to register for `config`, in registration order.
pub fn select_plugins(config: &ValidatedConfig, extra: &[PluginDescriptor]) -> Vec<PluginDescriptor> {
    let mut plugins = vec![DEVICE, CONTEXT, REQUEST];

    if config.auto_notify() {
        plugins.extend([
            WINDOW_ERROR,
            UNHANDLED_REJECTION,
            NAVIGATION_BREADCRUMBS,
            INTERACTION_BREADCRUMBS,
        ]);
    }
    if console_breadcrumbs_active(config) {
        plugins.push(CONSOLE_BREADCRUMBS);
    }

    plugins.push(INLINE_SCRIPT_CONTENT);
    plugins.extend_from_slice(extra);
    plugins.push(THROTTLE);
    plugins
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use snag_core::{merge_schema, validate_options};

    fn config(options: Value) -> ValidatedConfig {
        let schema = merge_schema(&snag_core::base_schema(), &snag_plugins::builtin_plugins());
        validate_options(&schema, options.as_object().unwrap()).unwrap()
    }

    fn names(plugins: &[PluginDescriptor]) -> Vec<&'static str> {
        plugins.iter().map(|p| p.name).collect()
    }

    #[test]
    fn test_development_pattern() {
        assert!(is_development_stage("dev"));
        assert!(is_development_stage("development"));
        assert!(!is_development_stage("Development"));
        assert!(!is_development_stage("devel"));
        assert!(!is_development_stage("predev"));
    }

    #[test]
    fn test_default_selection_order() {
        let selected = select_plugins(&config(json!({ "apiKey": "k" })), &[]);
        assert_eq!(
            names(&selected),
            vec![
                "device",
                "context",
                "request",
                "window onerror",
                "unhandled rejection",
                "navigation breadcrumbs",
                "interaction breadcrumbs",
                "console breadcrumbs",
                "inline script content",
                "throttle",
            ]
        );
    }

    #[test]
    fn test_console_breadcrumbs_follow_release_stage() {
        let dev = select_plugins(
            &config(json!({ "apiKey": "k", "releaseStage": "development" })),
            &[],
        );
        assert!(!names(&dev).contains(&"console breadcrumbs"));

        let forced = select_plugins(
            &config(json!({
                "apiKey": "k",
                "releaseStage": "dev",
                "autoConsoleBreadcrumbsEnabled": true,
            })),
            &[],
        );
        assert!(names(&forced).contains(&"console breadcrumbs"));

        let prod = select_plugins(
            &config(json!({ "apiKey": "k", "releaseStage": "production" })),
            &[],
        );
        assert!(names(&prod).contains(&"console breadcrumbs"));
    }

    #[test]
    fn test_auto_notify_off_drops_capture_plugins() {
        for stage in [json!(null), json!("development"), json!("production")] {
            let selected = select_plugins(
                &config(json!({ "apiKey": "k", "autoNotify": false, "releaseStage": stage })),
                &[],
            );
            let names = names(&selected);
            for absent in [
                "window onerror",
                "unhandled rejection",
                "navigation breadcrumbs",
                "interaction breadcrumbs",
            ] {
                assert!(!names.contains(&absent), "{absent} active");
            }
            assert_eq!(names.last(), Some(&"throttle"));
        }
    }

    #[test]
    fn test_throttle_always_last() {
        fn init(_: &mut snag_core::Client) -> snag_core::PluginResult<()> {
            Ok(())
        }
        let extra = [PluginDescriptor::new("extra", init)];
        for auto_notify in [true, false] {
            for console in [true, false] {
                for stage in ["dev", "production"] {
                    let selected = select_plugins(
                        &config(json!({
                            "apiKey": "k",
                            "autoNotify": auto_notify,
                            "autoConsoleBreadcrumbsEnabled": console,
                            "releaseStage": stage,
                        })),
                        &extra,
                    );
                    let names = names(&selected);
                    assert_eq!(names.last(), Some(&"throttle"));
                    assert_eq!(names[names.len() - 2], "extra");
                }
            }
        }
    }
}
