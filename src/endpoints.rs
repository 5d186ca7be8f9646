//! The application's route URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The landing page with summary cards and recent expenses.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for browsing, filtering and sorting expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page with the form for recording a new expense.
pub const NEW_EXPENSE_VIEW: &str = "/expenses/new";
/// The page for browsing receipts.
pub const RECEIPTS_VIEW: &str = "/receipts";
/// The page showing the category grid with per-category totals.
pub const CATEGORIES_VIEW: &str = "/categories";
/// The page with spending charts.
pub const REPORTS_VIEW: &str = "/reports";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for submitting a new expense.
pub const EXPENSES_API: &str = "/api/expenses";
