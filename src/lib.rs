use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::config::DashboardConfig;
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Element the Leptos app mounts into
pub const ROOT_ELEMENT_ID: &str = "dashboard-root";
/// Optional `<script type="application/json">` holding a [`DashboardConfig`]
pub const CONFIG_ELEMENT_ID: &str = "dashboard-config";

fn element_by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()?.document()?.get_element_by_id(id)
}

fn load_config() -> (DashboardConfig, Option<String>) {
    let Some(raw) = element_by_id(CONFIG_ELEMENT_ID).and_then(|e| e.text_content()) else {
        return (DashboardConfig::default(), None);
    };
    match DashboardConfig::from_json(&raw) {
        Ok(config) => (config, None),
        Err(e) => (DashboardConfig::default(), Some(format!("Ignoring invalid dashboard config: {}", e))),
    }
}

#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let (dashboard_config, config_problem) = load_config();
    let console = infrastructure::ConsoleLogger::new(dashboard_config.log_level());
    let root = element_by_id(ROOT_ELEMENT_ID).and_then(|e| e.dyn_into::<web_sys::HtmlElement>().ok());

    if root.is_some() {
        domain::logging::init_logger(Box::new(app::LeptosLogger::new(console)));
    } else {
        domain::logging::init_logger(Box::new(console));
    }
    domain::logging::init_time_provider(Box::new(infrastructure::BrowserTimeProvider::new()));
    config::init_config(dashboard_config);

    if let Some(problem) = config_problem {
        get_logger().warn(LogComponent::Presentation("Initialize"), &problem);
    }

    match root {
        Some(root) => {
            leptos::mount_to(root, app::App);
            get_logger().info(LogComponent::Presentation("Initialize"), "Dashboard mounted");
        }
        None => get_logger().info(
            LogComponent::Presentation("Initialize"),
            "No #dashboard-root element, exposing the JS API only",
        ),
    }
}
