//! Platform partitioning of feature names.
//!
//! Every feature name lands in exactly one of eight buckets: a WSI or
//! platform-only bucket for Win32, Linux or Android, the common bucket, or
//! `other`. Routing is an ordered rule table; the first rule whose matcher
//! accepts the name decides.

use serde::Serialize;
use std::fmt;

/// Platform-specific WSI extensions recognized by default.
pub const DEFAULT_WSI_EXTENSIONS: [&str; 6] = [
    "VK_KHR_android_surface",
    "VK_KHR_win32_surface",
    "VK_KHR_xlib_surface",
    "VK_KHR_xcb_surface",
    "VK_KHR_wayland_surface",
    "VK_KHR_mir_surface",
];

/// Core version plus the platform-agnostic WSI extensions.
pub const DEFAULT_BASE_EXTENSIONS: [&str; 4] = [
    "VK_VERSION_1_0",
    "VK_KHR_surface",
    "VK_KHR_swapchain",
    "VK_KHR_display_swapchain",
];

/// Name fragments marking Linux windowing systems.
pub const LINUX_WSI_MARKERS: [&str; 4] = ["xlib_", "xcb_", "wayland_", "mir_"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Platform {
    Win32,
    Linux,
    Android,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Win32, Platform::Linux, Platform::Android];

    /// Display-server tokens that select this platform (case-sensitive).
    pub fn display_servers(self) -> &'static [&'static str] {
        match self {
            Platform::Win32 => &["Win32"],
            Platform::Linux => &["Xcb", "Xlib", "Wayland", "Mir", "Display"],
            Platform::Android => &["Android"],
        }
    }

    /// Platform selected by a display-server token, if recognized.
    pub fn from_display_server(token: &str) -> Option<Platform> {
        Platform::ALL
            .into_iter()
            .find(|p| p.display_servers().contains(&token))
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Win32 => "win32",
            Platform::Linux => "linux",
            Platform::Android => "android",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Destination of a single feature name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Bucket {
    Wsi(Platform),
    Only(Platform),
    Common,
    Other,
}

/// How a rule recognizes a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    /// Name contains any of the fragments
    ContainsAny(Vec<String>),
    /// Name is one of the listed names
    OneOf(Vec<String>),
}

impl NameMatch {
    fn matches(&self, name: &str) -> bool {
        match self {
            NameMatch::ContainsAny(fragments) => fragments.iter().any(|f| name.contains(f.as_str())),
            NameMatch::OneOf(names) => names.iter().any(|n| n == name),
        }
    }
}

fn contains_any(fragments: &[&str]) -> NameMatch {
    NameMatch::ContainsAny(fragments.iter().map(|s| s.to_string()).collect())
}

/// Where a matching rule sends the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleTarget {
    /// WSI bucket if the name is on the WSI allowlist, else the only bucket
    Platform(Platform),
    Common,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRule {
    pub matcher: NameMatch,
    pub target: RuleTarget,
}

/// Ordered rule table plus the WSI allowlist. Names no rule accepts go to
/// [`Bucket::Other`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformRules {
    pub rules: Vec<PlatformRule>,
    pub wsi_extensions: Vec<String>,
}

impl Default for PlatformRules {
    fn default() -> Self {
        PlatformRules::new(
            DEFAULT_WSI_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
            DEFAULT_BASE_EXTENSIONS.iter().map(|s| s.to_string()).collect(),
        )
    }
}

impl PlatformRules {
    /// Standard rule order (win32, android, linux markers, base set) over
    /// the given allowlist and base set.
    pub fn new(wsi_extensions: Vec<String>, base_extensions: Vec<String>) -> Self {
        PlatformRules {
            rules: vec![
                PlatformRule {
                    matcher: contains_any(&["win32"]),
                    target: RuleTarget::Platform(Platform::Win32),
                },
                PlatformRule {
                    matcher: contains_any(&["android"]),
                    target: RuleTarget::Platform(Platform::Android),
                },
                PlatformRule {
                    matcher: contains_any(&LINUX_WSI_MARKERS),
                    target: RuleTarget::Platform(Platform::Linux),
                },
                PlatformRule {
                    matcher: NameMatch::OneOf(base_extensions),
                    target: RuleTarget::Common,
                },
            ],
            wsi_extensions,
        }
    }

    /// Bucket for a single name.
    pub fn classify(&self, name: &str) -> Bucket {
        let Some(rule) = self.rules.iter().find(|r| r.matcher.matches(name)) else {
            return Bucket::Other;
        };
        match rule.target {
            RuleTarget::Common => Bucket::Common,
            RuleTarget::Platform(p) if self.wsi_extensions.iter().any(|w| w == name) => {
                Bucket::Wsi(p)
            }
            RuleTarget::Platform(p) => Bucket::Only(p),
        }
    }

    /// Partition `names`, keeping input order inside each bucket.
    pub fn partition<'a, I>(&self, names: I) -> PlatformBuckets
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut buckets = PlatformBuckets::default();
        for name in names {
            buckets.bucket_mut(self.classify(name)).push(name.to_string());
        }
        buckets
    }
}

/// Per-platform WSI and platform-only lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformLists {
    pub wsi: Vec<String>,
    pub only: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlatformBuckets {
    pub win32: PlatformLists,
    pub linux: PlatformLists,
    pub android: PlatformLists,
    pub common: Vec<String>,
    pub other: Vec<String>,
}

/// `extensions` / `extensions_all` for one display-server choice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtensionSelection {
    pub extensions: Vec<String>,
    pub extensions_all: Vec<String>,
}

impl PlatformBuckets {
    pub fn platform(&self, platform: Platform) -> &PlatformLists {
        match platform {
            Platform::Win32 => &self.win32,
            Platform::Linux => &self.linux,
            Platform::Android => &self.android,
        }
    }

    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Wsi(p) => &self.platform(p).wsi,
            Bucket::Only(p) => &self.platform(p).only,
            Bucket::Common => &self.common,
            Bucket::Other => &self.other,
        }
    }

    fn platform_mut(&mut self, platform: Platform) -> &mut PlatformLists {
        match platform {
            Platform::Win32 => &mut self.win32,
            Platform::Linux => &mut self.linux,
            Platform::Android => &mut self.android,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<String> {
        match bucket {
            Bucket::Wsi(p) => &mut self.platform_mut(p).wsi,
            Bucket::Only(p) => &mut self.platform_mut(p).only,
            Bucket::Common => &mut self.common,
            Bucket::Other => &mut self.other,
        }
    }

    /// All eight buckets in a fixed order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &[String])> {
        Platform::ALL
            .into_iter()
            .flat_map(|p| [Bucket::Wsi(p), Bucket::Only(p)])
            .chain([Bucket::Common, Bucket::Other])
            .map(move |b| (b, self.bucket(b)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, names)| names.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the lists a consumer sees for a display-server choice.
    ///
    /// `extensions` is common plus the platform's WSI list; `extensions_all`
    /// is other, then `extensions`, then the platform-only list. With no
    /// recognized platform every platform is included (win32, linux,
    /// android order).
    pub fn select(&self, platform: Option<Platform>) -> ExtensionSelection {
        let platforms: Vec<Platform> = match platform {
            Some(p) => vec![p],
            None => Platform::ALL.to_vec(),
        };

        let mut extensions = self.common.clone();
        for p in &platforms {
            extensions.extend(self.platform(*p).wsi.iter().cloned());
        }

        let mut extensions_all = self.other.clone();
        extensions_all.extend(extensions.iter().cloned());
        for p in &platforms {
            extensions_all.extend(self.platform(*p).only.iter().cloned());
        }

        ExtensionSelection {
            extensions,
            extensions_all,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_classify_default_rules() {
        let rules = PlatformRules::default();
        assert_eq!(rules.classify("VK_KHR_win32_surface"), Bucket::Wsi(Platform::Win32));
        assert_eq!(
            rules.classify("VK_KHR_external_memory_win32"),
            Bucket::Only(Platform::Win32)
        );
        assert_eq!(
            rules.classify("VK_KHR_android_surface"),
            Bucket::Wsi(Platform::Android)
        );
        assert_eq!(
            rules.classify("VK_ANDROID_native_buffer"),
            Bucket::Other,
            "rule matching is case-sensitive"
        );
        assert_eq!(
            rules.classify("VK_ANDROID_external_memory_android_hardware_buffer"),
            Bucket::Only(Platform::Android)
        );
        assert_eq!(rules.classify("VK_KHR_xcb_surface"), Bucket::Wsi(Platform::Linux));
        assert_eq!(
            rules.classify("VK_EXT_acquire_xlib_display"),
            Bucket::Only(Platform::Linux)
        );
        assert_eq!(rules.classify("VK_VERSION_1_0"), Bucket::Common);
        assert_eq!(rules.classify("VK_KHR_swapchain"), Bucket::Common);
        assert_eq!(rules.classify("VK_EXT_debug_report"), Bucket::Other);
    }

    #[test]
    fn test_rule_order_breaks_ties() {
        // Matches both the win32 and the xcb marker; win32 is listed first.
        let rules = PlatformRules::default();
        assert_eq!(
            rules.classify("VK_FAKE_win32_xcb_bridge"),
            Bucket::Only(Platform::Win32)
        );
        // Android beats the Linux markers.
        assert_eq!(
            rules.classify("VK_FAKE_android_wayland_bridge"),
            Bucket::Only(Platform::Android)
        );
    }

    #[test]
    fn test_partition_is_complete_and_exclusive() {
        let names = [
            "VK_VERSION_1_0",
            "VK_KHR_surface",
            "VK_KHR_swapchain",
            "VK_KHR_display",
            "VK_KHR_display_swapchain",
            "VK_KHR_xlib_surface",
            "VK_KHR_xcb_surface",
            "VK_KHR_wayland_surface",
            "VK_KHR_mir_surface",
            "VK_KHR_android_surface",
            "VK_KHR_win32_surface",
            "VK_NV_win32_keyed_mutex",
            "VK_EXT_debug_report",
            "VK_EXT_acquire_xlib_display",
        ];
        let buckets = PlatformRules::default().partition(names);

        let mut seen = HashSet::new();
        for (_, members) in buckets.iter() {
            for name in members {
                assert!(seen.insert(name.clone()), "{name} appears twice");
            }
        }
        assert_eq!(seen.len(), names.len());
        assert_eq!(buckets.len(), names.len());
        for name in names {
            assert!(seen.contains(name));
        }

        assert_eq!(
            buckets.common,
            vec![
                "VK_VERSION_1_0",
                "VK_KHR_surface",
                "VK_KHR_swapchain",
                "VK_KHR_display_swapchain"
            ]
        );
        assert_eq!(
            buckets.linux.wsi,
            vec![
                "VK_KHR_xlib_surface",
                "VK_KHR_xcb_surface",
                "VK_KHR_wayland_surface",
                "VK_KHR_mir_surface"
            ]
        );
        assert_eq!(buckets.linux.only, vec!["VK_EXT_acquire_xlib_display"]);
        assert_eq!(buckets.win32.only, vec!["VK_NV_win32_keyed_mutex"]);
        assert_eq!(buckets.other, vec!["VK_KHR_display", "VK_EXT_debug_report"]);
    }

    #[test]
    fn test_custom_allowlist() {
        let rules = PlatformRules::new(vec![], vec!["VK_VERSION_1_0".to_string()]);
        assert_eq!(
            rules.classify("VK_KHR_win32_surface"),
            Bucket::Only(Platform::Win32)
        );
        assert_eq!(rules.classify("VK_KHR_surface"), Bucket::Other);
    }

    #[test]
    fn test_display_server_tokens() {
        assert_eq!(Platform::from_display_server("Win32"), Some(Platform::Win32));
        assert_eq!(Platform::from_display_server("Wayland"), Some(Platform::Linux));
        assert_eq!(Platform::from_display_server("Display"), Some(Platform::Linux));
        assert_eq!(Platform::from_display_server("Android"), Some(Platform::Android));
        assert_eq!(Platform::from_display_server("xcb"), None);
        assert_eq!(Platform::from_display_server(""), None);
    }

    #[test]
    fn test_select_for_platform_and_fallback() {
        let buckets = PlatformRules::default().partition([
            "VK_VERSION_1_0",
            "VK_KHR_xcb_surface",
            "VK_KHR_win32_surface",
            "VK_KHR_external_memory_win32",
            "VK_EXT_debug_report",
        ]);

        let linux = buckets.select(Platform::from_display_server("Xcb"));
        assert_eq!(linux.extensions, vec!["VK_VERSION_1_0", "VK_KHR_xcb_surface"]);
        assert_eq!(
            linux.extensions_all,
            vec!["VK_EXT_debug_report", "VK_VERSION_1_0", "VK_KHR_xcb_surface"]
        );

        let all = buckets.select(Platform::from_display_server("Cocoa"));
        assert_eq!(
            all.extensions,
            vec!["VK_VERSION_1_0", "VK_KHR_win32_surface", "VK_KHR_xcb_surface"]
        );
        assert_eq!(
            all.extensions_all,
            vec![
                "VK_EXT_debug_report",
                "VK_VERSION_1_0",
                "VK_KHR_win32_surface",
                "VK_KHR_xcb_surface",
                "VK_KHR_external_memory_win32",
            ]
        );
    }
}
