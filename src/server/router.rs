//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All API endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered in one `routes!` call so that utoipa documents them
/// as operations of the same path item.
///
/// # OpenAPI Documentation
/// The OpenAPI specification is available at `/api/docs/openapi.json`, Swagger UI is served
/// at `/api/docs`.
///
/// # Returns
/// An Axum `Router<AppState>` without session handling; the caller adds the
/// `SessionManagerLayer` and state.
///
/// # Example
/// ```ignore
/// let app = routes().layer(session_layer).with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Helpdesk", description = "Helpdesk & ticketing API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Sign-in and the signed in user"),
        (name = controller::user::USER_TAG, description = "User administration"),
        (name = controller::category::CATEGORY_TAG, description = "Ticket categories"),
        (name = controller::ticket::TICKET_TAG, description = "Tickets, their lifecycle and votes"),
        (name = controller::comment::COMMENT_TAG, description = "Ticket comments and internal notes"),
        (name = controller::attachment::ATTACHMENT_TAG, description = "File attachments"),
        (name = controller::notification::NOTIFICATION_TAG, description = "In-app notifications"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        // Auth
        .routes(routes!(controller::auth::sign_in))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(controller::auth::get_current_user))
        .routes(routes!(controller::auth::update_preferences))
        // Users
        .routes(routes!(controller::user::list_users))
        .routes(routes!(controller::user::list_staff))
        .routes(routes!(controller::user::update_role))
        .routes(routes!(controller::user::set_suspended))
        .routes(routes!(controller::user::set_active))
        // Categories
        .routes(routes!(
            controller::category::list_categories,
            controller::category::create_category
        ))
        .routes(routes!(
            controller::category::update_category,
            controller::category::delete_category
        ))
        // Tickets
        .routes(routes!(
            controller::ticket::list_tickets,
            controller::ticket::create_ticket
        ))
        .routes(routes!(controller::ticket::get_ticket_stats))
        .routes(routes!(
            controller::ticket::get_ticket,
            controller::ticket::update_ticket,
            controller::ticket::delete_ticket
        ))
        .routes(routes!(controller::ticket::change_status))
        .routes(routes!(controller::ticket::assign_ticket))
        .routes(routes!(
            controller::vote::cast_vote,
            controller::vote::retract_vote
        ))
        // Comments
        .routes(routes!(
            controller::comment::list_comments,
            controller::comment::add_comment
        ))
        .routes(routes!(
            controller::comment::edit_comment,
            controller::comment::delete_comment
        ))
        // Attachments
        .routes(routes!(controller::attachment::list_attachments))
        .routes(routes!(controller::attachment::add_attachment))
        .routes(routes!(controller::attachment::delete_attachment))
        // Notifications
        .routes(routes!(controller::notification::list_notifications))
        .routes(routes!(controller::notification::get_unread_count))
        .routes(routes!(controller::notification::mark_all_read))
        .routes(routes!(controller::notification::mark_read))
        .routes(routes!(controller::notification::delete_notification))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
