use axum::{Router, middleware, routing::{get, post}};
use tower_http::trace::TraceLayer;

use crate::core::{handler as core_handler, middleware::require_auth};
use crate::prelude::*;
use crate::{notice, plugin, settings};

fn init_admin(state: App) -> Router<App> {
	Router::new()
		.route("/settings", get(settings::handler::get_settings))
		.route("/update-setting", post(settings::handler::post_update_setting))
		.route("/disable-pro-notices", post(settings::handler::post_disable_pro_notices))
		.route("/migrate-to-builder", post(settings::handler::post_migrate_to_builder))
		.route("/notices", get(notice::handler::get_notices))
		.route("/dismiss-notice", post(notice::handler::post_dismiss_notice))
		.route("/plugins", get(plugin::handler::get_plugins))
		.route("/plugin/activate", post(plugin::handler::post_activate_plugin))
		.route("/plugin/deactivate", post(plugin::handler::post_deactivate_plugin))
		.route("/nonces", get(core_handler::get_nonces))
		.layer(middleware::from_fn_with_state(state, require_auth))
}

pub fn init(state: App) -> Router {
	Router::new()
		.nest("/api/admin", init_admin(state.clone()))
		.layer(TraceLayer::new_for_http())
		.with_state(state)
}

// vim: ts=4
