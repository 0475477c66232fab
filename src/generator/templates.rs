use askama::Template;

use super::platform::{Platform, PlatformBuckets};

/// Template for the fixed head of the generated module
///
/// Renders the caller's prefix lines, the banner and the `Param`, `Proto`
/// and `Extension` helper classes.
#[derive(Template)]
#[template(path = "prelude.py.txt", escape = "none")]
pub struct PreludeTemplate<'a> {
    /// Lines emitted verbatim before the banner
    pub prefix_text: &'a [String],
}

/// Template data for the tail of the generated module
///
/// Carries the global object lists, the platform buckets and the
/// display-server lists behind the `extensions` selector.
#[derive(Template)]
#[template(path = "extension_lists.py.txt", escape = "none")]
pub struct ExtensionListsTemplate<'a> {
    /// Dispatchable handles in first-seen order
    pub dispatchable_objects: &'a [String],
    /// Non-dispatchable handles in first-seen order
    pub non_dispatchable_objects: &'a [String],
    /// Feature names split by platform
    pub buckets: &'a PlatformBuckets,
    /// `['Android']`
    pub android_display_servers: String,
    /// `['Xcb', 'Xlib', 'Wayland', 'Mir', 'Display']`
    pub linux_display_servers: String,
    /// `['Win32']`
    pub win32_display_servers: String,
}

impl<'a> ExtensionListsTemplate<'a> {
    pub fn new(
        dispatchable_objects: &'a [String],
        non_dispatchable_objects: &'a [String],
        buckets: &'a PlatformBuckets,
    ) -> Self {
        ExtensionListsTemplate {
            dispatchable_objects,
            non_dispatchable_objects,
            buckets,
            android_display_servers: python_str_list(Platform::Android.display_servers()),
            linux_display_servers: python_str_list(Platform::Linux.display_servers()),
            win32_display_servers: python_str_list(Platform::Win32.display_servers()),
        }
    }
}

/// `['a', 'b']`
fn python_str_list(items: &[&str]) -> String {
    let quoted: Vec<String> = items.iter().map(|s| format!("'{s}'")).collect();
    format!("[{}]", quoted.join(", "))
}
