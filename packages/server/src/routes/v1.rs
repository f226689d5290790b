use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .merge(data_routes())
        .merge(design_routes())
        .merge(portfolio_routes())
        .routes(routes!(handlers::portfolio::health))
}

fn data_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::data::list_data_items,
            handlers::data::create_data_item
        ))
        .routes(routes!(handlers::data::search_data_items))
        .routes(routes!(handlers::data::list_tags))
        .routes(routes!(
            handlers::data::get_data_item,
            handlers::data::update_data_item,
            handlers::data::delete_data_item
        ))
}

fn design_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::design::list_designs,
            handlers::design::create_design
        ))
        .routes(routes!(handlers::design::get_active_design))
        .routes(routes!(
            handlers::design::get_color_scheme,
            handlers::design::update_color_scheme
        ))
        .routes(routes!(handlers::design::get_css))
        .routes(routes!(handlers::design::get_palette))
        .routes(routes!(
            handlers::design::get_design,
            handlers::design::update_design,
            handlers::design::delete_design
        ))
        .routes(routes!(handlers::design::activate_design))
}

fn portfolio_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::experience::list_experiences,
            handlers::experience::create_experience
        ))
        .routes(routes!(
            handlers::experience::get_experience,
            handlers::experience::update_experience,
            handlers::experience::delete_experience
        ))
        .routes(routes!(
            handlers::project::list_projects,
            handlers::project::create_project
        ))
        .routes(routes!(
            handlers::project::get_project,
            handlers::project::update_project,
            handlers::project::delete_project
        ))
        .routes(routes!(
            handlers::profile::get_profile,
            handlers::profile::create_profile,
            handlers::profile::update_profile
        ))
        .routes(routes!(handlers::portfolio::get_portfolio))
}
