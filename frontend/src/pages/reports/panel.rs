use crate::api::{ApiError, ExpenseStatus, ExportFormat, ReportSummary};
use crate::components::{
    empty_state::EmptyState,
    error::{FieldError, InlineErrorMessage},
    feedback::MessageBanner,
    layout::{Layout, LoadingSpinner},
};
use crate::pages::reports::{
    utils::{grouping_label, parse_grouping, row_share, GROUPINGS},
    view_model::{use_reports_view_model, ReportsViewModel},
};
use crate::utils::time::format_amount;
use leptos::{ev::SubmitEvent, *};

const FORMATS: [ExportFormat; 3] = [ExportFormat::Csv, ExportFormat::Xlsx, ExportFormat::Pdf];

#[component]
fn ReportFilters(vm: ReportsViewModel) -> impl IntoView {
    let filters = vm.filters;
    let error: Signal<Option<ApiError>> = vm.filter_error.into();
    view! {
        <form class="bg-surface-elevated shadow rounded-lg p-4 grid grid-cols-1 gap-3 md:grid-cols-5"
            on:submit=move |ev: SubmitEvent| { ev.prevent_default(); vm.apply(); }>
            <div>
                <input id="report-from" type="date" class="w-full border border-form-control-border rounded px-2 py-1 text-sm"
                    prop:value=filters.from on:input=move |ev| filters.from.set(event_target_value(&ev)) />
                <FieldError error=error field="from" />
            </div>
            <div>
                <input id="report-to" type="date" class="w-full border border-form-control-border rounded px-2 py-1 text-sm"
                    prop:value=filters.to on:input=move |ev| filters.to.set(event_target_value(&ev)) />
                <FieldError error=error field="to" />
            </div>
            <select id="report-group" class="border border-form-control-border rounded px-2 py-1 text-sm"
                on:change=move |ev| filters.group_by.set(parse_grouping(&event_target_value(&ev)))>
                {GROUPINGS.into_iter().map(|g| view! {
                    <option value=g.as_str() selected=move || filters.group_by.get() == g>{format!("By {}", grouping_label(g).to_lowercase())}</option>
                }).collect_view()}
            </select>
            <select id="report-status" class="border border-form-control-border rounded px-2 py-1 text-sm"
                prop:value=filters.status on:change=move |ev| filters.status.set(event_target_value(&ev))>
                <option value="">"All statuses"</option>
                {ExpenseStatus::ALL.into_iter().map(|s| view! { <option value=s.as_str()>{s.label()}</option> }).collect_view()}
            </select>
            <button type="submit" class="px-3 py-1 rounded text-sm text-action-primary-text bg-action-primary-bg">"Apply"</button>
        </form>
    }
}

#[component]
fn SummaryTable(summary: ReportSummary) -> impl IntoView {
    if summary.rows.is_empty() {
        return view! { <EmptyState title="No expenses match these filters" icon="fa-chart-bar" /> }.into_view();
    }
    let currency = summary.currency.clone();
    let total = summary.total_amount;
    view! {
        <table class="min-w-full bg-surface-elevated shadow rounded-lg divide-y divide-border">
            <thead>
                <tr class="text-left text-xs uppercase text-fg-muted">
                    <th class="px-4 py-2">"Group"</th>
                    <th class="px-4 py-2 text-right">"Count"</th>
                    <th class="px-4 py-2 text-right">"Amount"</th>
                    <th class="px-4 py-2 text-right">"Share"</th>
                </tr>
            </thead>
            <tbody class="divide-y divide-border">
                {summary.rows.into_iter().map(|row| view! {
                    <tr data-key=row.key.clone()>
                        <td class="px-4 py-2 text-sm text-fg">{row.label.clone()}</td>
                        <td class="px-4 py-2 text-sm text-right">{row.count}</td>
                        <td class="px-4 py-2 text-sm text-right">{format_amount(row.total_amount, &currency)}</td>
                        <td class="px-4 py-2 text-sm text-right">{format!("{}%", row_share(row.total_amount, total))}</td>
                    </tr>
                }).collect_view()}
            </tbody>
            <tfoot>
                <tr class="font-semibold">
                    <td class="px-4 py-2 text-sm">"Total"</td>
                    <td class="px-4 py-2 text-sm text-right">{summary.total_count}</td>
                    <td class="px-4 py-2 text-sm text-right">{format_amount(total, &summary.currency)}</td>
                    <td></td>
                </tr>
            </tfoot>
        </table>
    }
    .into_view()
}

#[component]
pub fn ReportsPage() -> impl IntoView {
    let vm = use_reports_view_model();
    view! {
        <Layout>
            <div class="space-y-6">
                <div class="flex items-center justify-between">
                    <h1 class="text-2xl font-bold text-fg">"Reports"</h1>
                    <div class="flex items-center gap-2">
                        <select id="export-format" class="border border-form-control-border rounded px-2 py-1 text-sm"
                            on:change=move |ev| {
                                let value = event_target_value(&ev);
                                if let Some(format) = FORMATS.into_iter().find(|f| f.extension() == value) {
                                    vm.export_format.set(format);
                                }
                            }>
                            {FORMATS.into_iter().map(|f| view! {
                                <option value=f.extension()>{f.extension().to_uppercase()}</option>
                            }).collect_view()}
                        </select>
                        <button id="export-report" type="button"
                            class="px-3 py-1 rounded text-sm border border-border disabled:opacity-50"
                            disabled=move || vm.export_action.pending().get()
                            on:click=move |_| vm.export()>
                            {move || if vm.export_action.pending().get() { "Exporting..." } else { "Export" }}
                        </button>
                    </div>
                </div>
                <MessageBanner message=vm.message />
                <ReportFilters vm=vm />
                <Transition fallback=|| view! { <LoadingSpinner /> }>
                    {move || vm.summary.get().map(|result| match result {
                        Ok(summary) => view! { <SummaryTable summary=summary /> }.into_view(),
                        Err(err) => {
                            let error = Signal::derive(move || Some(err.clone()));
                            view! { <InlineErrorMessage error=error /> }.into_view()
                        }
                    })}
                </Transition>
            </div>
        </Layout>
    }
}
