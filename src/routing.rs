//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    category_page::get_categories_page,
    dashboard::get_dashboard_page,
    endpoints,
    expense::{create_expense_endpoint, get_expenses_page, get_new_expense_page},
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    receipt::get_receipts_page,
    report::get_reports_page,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::NEW_EXPENSE_VIEW, get(get_new_expense_page))
        .route(endpoints::RECEIPTS_VIEW, get(get_receipts_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .route(endpoints::EXPENSES_API, post(create_expense_endpoint))
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the dashboard page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::DASHBOARD_VIEW)
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;

    use crate::{
        AppState, CategoryTable, RecordStore, SubmissionService, build_router, endpoints,
    };

    fn test_server() -> TestServer {
        let categories = CategoryTable::default();
        let records = RecordStore::with_sample_data(&categories)
            .expect("sample data should validate against the default table");
        let state = AppState::new(records, categories, SubmissionService::new(), "Etc/UTC");

        TestServer::try_new(build_router(state)).expect("Could not create test server")
    }

    #[tokio::test]
    async fn root_redirects_to_dashboard() {
        let server = test_server();

        let response = server.get(endpoints::ROOT).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert_eq!(
            response.header("location"),
            endpoints::DASHBOARD_VIEW,
            "expected redirect to the dashboard"
        );
    }

    #[tokio::test]
    async fn every_page_renders_successfully() {
        let server = test_server();

        for endpoint in [
            endpoints::DASHBOARD_VIEW,
            endpoints::EXPENSES_VIEW,
            endpoints::NEW_EXPENSE_VIEW,
            endpoints::RECEIPTS_VIEW,
            endpoints::CATEGORIES_VIEW,
            endpoints::REPORTS_VIEW,
        ] {
            let response = server.get(endpoint).await;

            response.assert_status_ok();
            assert!(
                response.text().contains("Spendwell"),
                "{endpoint} should render the app shell"
            );
        }
    }

    #[tokio::test]
    async fn expenses_page_accepts_filter_query_params() {
        let server = test_server();

        let response = server
            .get("/expenses?q=grocery&category=food&sort=amount-desc")
            .await;

        response.assert_status_ok();
        let text = response.text();
        assert!(text.contains("Weekly Grocery Shopping"));
        assert!(!text.contains("New Shoes"));
    }

    #[tokio::test]
    async fn unknown_route_returns_404_page() {
        let server = test_server();

        let response = server.get("/wallets").await;

        response.assert_status(StatusCode::NOT_FOUND);
        assert!(response.text().contains("404"));
    }
}
