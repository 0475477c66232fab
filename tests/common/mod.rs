#![allow(dead_code)]

pub mod fixtures {
    /// A miniature registry covering core versions, WSI and platform-only
    /// extensions, handle aliases, command aliases and api-filtered elements.
    pub const MINI_REGISTRY: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<registry>
  <comment>Miniature registry for tests</comment>
  <types>
    <type category="include" name="vk_platform">#include "vk_platform.h"</type>
    <type requires="vk_platform" name="uint32_t"/>
    <type category="basetype">typedef <type>uint32_t</type> <name>VkBool32</name>;</type>
    <type category="handle"><type>VK_DEFINE_HANDLE</type>(<name>VkInstance</name>)</type>
    <type category="handle" parent="VkInstance"><type>VK_DEFINE_HANDLE</type>(<name>VkPhysicalDevice</name>)</type>
    <type category="handle" parent="VkPhysicalDevice"><type>VK_DEFINE_HANDLE</type>(<name>VkDevice</name>)</type>
    <type category="handle" parent="VkDevice"><type>VK_DEFINE_HANDLE</type>(<name>VkQueue</name>)</type>
    <type category="handle" parent="VkDevice"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkFence</name>)</type>
    <type category="handle" parent="VkInstance"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkSurfaceKHR</name>)</type>
    <type category="handle" parent="VkSurfaceKHR"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkSwapchainKHR</name>)</type>
    <type category="handle" parent="VkInstance"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkDebugReportCallbackEXT</name>)</type>
    <type category="handle" name="VkFenceAliasKHR" alias="VkFence"/>
    <type category="handle" api="vulkansc"><type>VK_DEFINE_NON_DISPATCHABLE_HANDLE</type>(<name>VkFaultHandleSC</name>)</type>
    <type category="struct" name="VkInstanceCreateInfo">
      <member><type>uint32_t</type> <name>flags</name></member>
    </type>
    <type category="struct" name="VkAllocationCallbacks"/>
    <type category="struct" name="VkWin32SurfaceCreateInfoKHR"/>
    <type category="struct" name="VkXcbSurfaceCreateInfoKHR"/>
  </types>
  <commands>
    <command>
      <proto><type>VkResult</type> <name>vkCreateInstance</name></proto>
      <param>const <type>VkInstanceCreateInfo</type>* <name>pCreateInfo</name></param>
      <param optional="true">const <type>VkAllocationCallbacks</type>* <name>pAllocator</name></param>
      <param><type>VkInstance</type>* <name>pInstance</name></param>
    </command>
    <command>
      <proto><type>VkResult</type> <name>vkEnumeratePhysicalDevices</name></proto>
      <param><type>VkInstance</type> <name>instance</name></param>
      <param><type>uint32_t</type>* <name>pPhysicalDeviceCount</name></param>
      <param><type>VkPhysicalDevice</type>* <name>pPhysicalDevices</name></param>
    </command>
    <command>
      <proto><type>void</type> <name>vkGetDeviceQueue</name></proto>
      <param><type>VkDevice</type> <name>device</name></param>
      <param><type>uint32_t</type> <name>queueFamilyIndex</name></param>
      <param><type>uint32_t</type> <name>queueIndex</name></param>
      <param><type>VkQueue</type>* <name>pQueue</name></param>
    </command>
    <command>
      <proto><type>VkResult</type> <name>vkWaitForFences</name></proto>
      <param><type>VkDevice</type> <name>device</name></param>
      <param><type>uint32_t</type> <name>fenceCount</name></param>
      <param>const <type>VkFence</type>* <name>pFences</name></param>
    </command>
    <command>
      <proto><type>VkResult</type> <name>vkGetFenceStatusKHR</name></proto>
      <param><type>VkDevice</type> <name>device</name></param>
      <param><type>VkFenceAliasKHR</type> <name>fence</name></param>
    </command>
    <command>
      <proto><type>void</type> <name>vkDestroySurfaceKHR</name></proto>
      <param><type>VkInstance</type> <name>instance</name></param>
      <param optional="true"><type>VkSurfaceKHR</type> <name>surface</name></param>
      <param optional="true">const <type>VkAllocationCallbacks</type>* <name>pAllocator</name></param>
    </command>
    <command>
      <proto><type>VkResult</type> <name>vkCreateSwapchainKHR</name></proto>
      <param><type>VkDevice</type> <name>device</name></param>
      <param><type>VkSurfaceKHR</type> <name>surface</name></param>
      <param><type>VkSwapchainKHR</type>* <name>pSwapchain</name></param>
    </command>
    <command>
      <proto><type>VkResult</type> <name>vkCreateWin32SurfaceKHR</name></proto>
      <param><type>VkInstance</type> <name>instance</name></param>
      <param>const <type>VkWin32SurfaceCreateInfoKHR</type>* <name>pCreateInfo</name></param>
      <param><type>VkSurfaceKHR</type>* <name>pSurface</name></param>
    </command>
    <command>
      <proto><type>VkResult</type> <name>vkCreateXcbSurfaceKHR</name></proto>
      <param><type>VkInstance</type> <name>instance</name></param>
      <param>const <type>VkXcbSurfaceCreateInfoKHR</type>* <name>pCreateInfo</name></param>
      <param><type>VkSurfaceKHR</type>* <name>pSurface</name></param>
    </command>
    <command>
      <proto><type>VkResult</type> <name>vkCreateDebugReportCallbackEXT</name></proto>
      <param><type>VkInstance</type> <name>instance</name></param>
      <param><type>VkDebugReportCallbackEXT</type>* <name>pCallback</name></param>
    </command>
    <command>
      <proto><type>void</type> <name>vkGetFaultDataSC</name></proto>
      <param><type>VkFaultHandleSC</type> <name>fault</name></param>
    </command>
    <command name="vkWaitForFencesKHR" alias="vkWaitForFences"/>
  </commands>
  <feature api="vulkan" name="VK_VERSION_1_1" number="1.1">
    <require>
      <command name="vkGetFenceStatusKHR"/>
      <command name="vkCreateInstance"/>
    </require>
  </feature>
  <feature api="vulkan,vulkansc" name="VK_VERSION_1_0" number="1.0">
    <require>
      <command name="vkCreateInstance"/>
      <command name="vkEnumeratePhysicalDevices"/>
      <command name="vkGetDeviceQueue"/>
      <command name="vkWaitForFences"/>
    </require>
  </feature>
  <feature api="vulkansc" name="VKSC_VERSION_1_0" number="1.0">
    <require>
      <command name="vkGetFaultDataSC"/>
    </require>
  </feature>
  <extensions>
    <extension name="VK_KHR_win32_surface" number="10" supported="vulkan" protect="VK_USE_PLATFORM_WIN32_KHR" platform="win32">
      <require>
        <command name="vkCreateWin32SurfaceKHR"/>
      </require>
    </extension>
    <extension name="VK_KHR_surface" number="1" supported="vulkan,vulkansc">
      <require>
        <command name="vkDestroySurfaceKHR"/>
      </require>
    </extension>
    <extension name="VK_KHR_swapchain" number="2" supported="vulkan,vulkansc">
      <require>
        <command name="vkCreateSwapchainKHR"/>
        <command name="vkWaitForFencesKHR"/>
        <command name="vkMissingFromTable"/>
      </require>
    </extension>
    <extension name="VK_KHR_xcb_surface" number="6" supported="vulkan" protect="VK_USE_PLATFORM_XCB_KHR" platform="xcb">
      <require>
        <command name="vkCreateXcbSurfaceKHR"/>
      </require>
    </extension>
    <extension name="VK_EXT_debug_report" number="12" supported="vulkan">
      <require>
        <command name="vkCreateDebugReportCallbackEXT"/>
      </require>
    </extension>
    <extension name="VK_KHR_external_memory_win32" number="74" supported="vulkan" protect="VK_USE_PLATFORM_WIN32_KHR" platform="win32"/>
    <extension name="VK_NV_extension_13" number="13" supported="disabled"/>
  </extensions>
</registry>
"#;

    /// Feature names the mini registry yields for `vulkan`, in emission order.
    pub const VULKAN_FEATURES: [&str; 8] = [
        "VK_VERSION_1_0",
        "VK_VERSION_1_1",
        "VK_KHR_surface",
        "VK_KHR_swapchain",
        "VK_KHR_xcb_surface",
        "VK_KHR_win32_surface",
        "VK_EXT_debug_report",
        "VK_KHR_external_memory_win32",
    ];
}

pub mod temp_files {
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Writes `xml` as `vk.xml` into a fresh temporary directory.
    ///
    /// The directory is removed when the returned guard drops.
    pub fn registry_dir(xml: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vk.xml");
        std::fs::write(&path, xml).unwrap();
        (dir, path)
    }

    /// Writes the miniature registry into a fresh temporary directory.
    pub fn mini_registry() -> (TempDir, PathBuf) {
        registry_dir(super::fixtures::MINI_REGISTRY)
    }

    /// Writes `vk-api-gen.toml` next to the registry at `registry`.
    pub fn write_config(registry: &Path, toml: &str) -> PathBuf {
        let path = registry.parent().unwrap().join("vk-api-gen.toml");
        std::fs::write(&path, toml).unwrap();
        path
    }
}
