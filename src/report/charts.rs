//! Chart generation and rendering for the reports page.
//!
//! Each chart is generated as configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization
//! code:
//! - **Spending Trend**: total expenses per month as a line
//! - **Monthly Breakdown**: the same totals as bars
//! - **Category Distribution**: the share of spending per category as a pie

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    category::CategoryTable,
    html::HeadElement,
    record::store::{CategoryTotal, MonthlyTotal},
};

/// A report chart with its HTML container ID and ECharts configuration.
pub(super) struct ReportChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the report charts.
pub(super) fn charts_view(charts: &[ReportChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for the report charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[ReportChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn spending_trend_chart(monthly_totals: &[MonthlyTotal]) -> Chart {
    let (labels, values) = monthly_labels_and_values(monthly_totals);

    Chart::new()
        .title(
            Title::new()
                .text("Spending Trend")
                .subtext("Total expenses per month"),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Amount").data(values))
}

pub(super) fn monthly_breakdown_chart(monthly_totals: &[MonthlyTotal]) -> Chart {
    let (labels, values) = monthly_labels_and_values(monthly_totals);

    Chart::new()
        .title(
            Title::new()
                .text("Monthly Breakdown")
                .subtext("Expenses by month"),
        )
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Amount").data(values))
}

pub(super) fn category_distribution_chart(
    category_totals: &[CategoryTotal],
    categories: &CategoryTable,
) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .filter(|total| total.count > 0)
        .map(|total| {
            (
                total.total.to_major_units(),
                categories.display_name(&total.category),
            )
        })
        .collect();

    Chart::new()
        .title(
            Title::new()
                .text("Category Distribution")
                .subtext("Where your money is going"),
        )
        .tooltip(Tooltip::new().trigger(Trigger::Item))
        .legend(Legend::new().bottom("1%"))
        .series(Pie::new().name("Spending").radius("55%").data(data))
}

fn monthly_labels_and_values(monthly_totals: &[MonthlyTotal]) -> (Vec<String>, Vec<f64>) {
    monthly_totals
        .iter()
        .map(|monthly| (monthly.label.clone(), monthly.total.to_major_units()))
        .unzip()
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
